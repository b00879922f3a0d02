//! Global settings, per-document overrides and their merge.

use crate::types::{ParseConfig, StrategyKind};
use serde::{Deserialize, Serialize};

/// A line that does not open an HTML comment (`<!--`).
const BODY_LINE: &str = r"(?:^.{1,3}$|^(?:[^<\n]|<[^!\n]|<![^\-\n]|<!-[^\-\n]).*)";

/// Like [`BODY_LINE`], but the line must not start with `#` either.
const PLAIN_BODY_LINE: &str = r"(?:^[^\n#].{0,2}$|^(?:[^\n#<]|<[^!\n]|<![^\-\n]|<!-[^\-\n]).*)";

/// A named regex pattern selectable in settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexPreset {
    pub alias: String,
    pub pattern: String,
    pub flags: String,
    pub enabled: bool,
}

impl RegexPreset {
    fn new(alias: &str, pattern: String) -> Self {
        Self {
            alias: alias.to_string(),
            pattern,
            flags: "gm".to_string(),
            enabled: false,
        }
    }
}

/// Built-in regex presets, all disabled.
pub fn default_regex_presets() -> Vec<RegexPreset> {
    vec![
        RegexPreset::new(
            "Single line separated by ::",
            r"^(.*[^\n:]{1}):{2}([^\n:]{1}.*)".to_string(),
        ),
        RegexPreset::new(
            "Multi-line Q&A starting with Q: and A:",
            format!(r"^Q: ((?:.+\n)*)\n*A: (.+(?:\n{BODY_LINE})*)"),
        ),
        RegexPreset::new(
            "Multi-line text separated by '#flashcard'",
            format!(r"((?:[^\n][\n]?)+) #flashcard ?\n*((?:\n{BODY_LINE})+)"),
        ),
        RegexPreset::new(
            "Multi-line text separated by ---",
            format!(r"((?:[^\n][\n]?)+\n)-{{3,}}((?:\n{BODY_LINE})*)"),
        ),
        RegexPreset::new(
            "Cloze paragraph format",
            format!(r"((?:.+\n)*(?:.*\{{.*)(?:\n{BODY_LINE})*)"),
        ),
        RegexPreset::new(
            "All headings and paragraphs",
            format!(r"^#+(.+)\n*((?:\n{PLAIN_BODY_LINE})+)"),
        ),
    ]
}

/// Global settings configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    pub deck: String,
    pub model: String,
    pub tag: String,
    pub strategy: StrategyKind,
    pub heading_level: i64,
    pub update_existing: bool,
    pub allow_single_field: bool,
    pub html_break: bool,
    pub line_break_marker: String,
    pub regex_presets: Vec<RegexPreset>,
    pub card_start: String,
    pub field_separator: String,
    pub card_end: String,
    pub single_separator: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            deck: "Default".to_string(),
            model: "Basic".to_string(),
            tag: "blue-star".to_string(),
            strategy: StrategyKind::default(),
            heading_level: 2,
            update_existing: false,
            allow_single_field: false,
            html_break: false,
            line_break_marker: "<br>".to_string(),
            regex_presets: default_regex_presets(),
            card_start: "<!-- card start -->".to_string(),
            field_separator: "<!-- field separator -->".to_string(),
            card_end: "<!-- card end -->".to_string(),
            single_separator: "<!-- field separator -->".to_string(),
        }
    }
}

impl GlobalSettings {
    /// First enabled regex preset, which supplies the default pattern.
    pub fn active_preset(&self) -> Option<&RegexPreset> {
        self.regex_presets.iter().find(|preset| preset.enabled)
    }

    /// Enable the preset called `alias`, disabling the others.
    ///
    /// Returns false when no preset has that alias.
    pub fn enable_preset(&mut self, alias: &str) -> bool {
        let found = self.regex_presets.iter().any(|preset| preset.alias == alias);
        if found {
            for preset in &mut self.regex_presets {
                preset.enabled = preset.alias == alias;
            }
        }
        found
    }
}

/// Per-document overrides read from a config block (all fields optional).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex_flags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_single_field: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_break: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<bool>,
}

/// Effective configuration (global settings merged with document overrides).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub parse: ParseConfig,
    pub deck: String,
    pub model: String,
    pub tag: String,
    pub update: bool,
    pub ignore: bool,
}

impl EffectiveConfig {
    /// Merge global settings with optional document overrides.
    pub fn merge(global: &GlobalSettings, document: Option<&ConfigOverride>) -> Self {
        let empty = ConfigOverride::default();
        let doc = document.unwrap_or(&empty);
        let preset = global.active_preset();

        let pick = |value: &Option<String>, fallback: &str| {
            value.clone().unwrap_or_else(|| fallback.to_string())
        };

        let parse = ParseConfig {
            strategy: pick(&doc.strategy, global.strategy.as_str()),
            allow_single_field: doc.allow_single_field.unwrap_or(global.allow_single_field),
            html_break: doc.html_break.unwrap_or(global.html_break),
            line_break_marker: global.line_break_marker.clone(),
            heading_level: Some(doc.heading_level.unwrap_or(global.heading_level)),
            regex: doc
                .regex
                .clone()
                .or_else(|| preset.map(|preset| preset.pattern.clone())),
            regex_flags: pick(
                &doc.regex_flags,
                preset.map_or("g", |preset| preset.flags.as_str()),
            ),
            card_start: pick(&doc.card_start, &global.card_start),
            field_separator: pick(&doc.field_separator, &global.field_separator),
            card_end: pick(&doc.card_end, &global.card_end),
            // A document-level field separator also drives the single delimiter.
            single_separator: pick(
                &doc.single_separator.clone().or_else(|| doc.field_separator.clone()),
                &global.single_separator,
            ),
        };

        Self {
            parse,
            deck: pick(&doc.deck, &global.deck),
            model: pick(&doc.model, &global.model),
            tag: pick(&doc.tag, &global.tag),
            update: doc.update.unwrap_or(global.update_existing),
            ignore: doc.ignore.unwrap_or(false),
        }
    }
}
