//! Core types for card parsing.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One parsed card: an ordered list of field strings.
///
/// Serialized as a bare JSON array so downstream note builders can map
/// field positions onto template slots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card {
    pub fields: Vec<String>,
}

impl Card {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Field at `index`, or an empty string when the card is shorter.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }
}

impl<S: Into<String>> FromIterator<S> for Card {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Document segmentation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    SectionSubsection,
    HeadingParagraph,
    MultiSubsection,
    MultiSubparagraph,
    Regex,
    CustomDelimiter,
    SingleDelimiter,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 7] = [
        Self::SectionSubsection,
        Self::HeadingParagraph,
        Self::MultiSubsection,
        Self::MultiSubparagraph,
        Self::Regex,
        Self::CustomDelimiter,
        Self::SingleDelimiter,
    ];

    /// Get the strategy name as used in settings and config blocks.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SectionSubsection => "section-subsection",
            Self::HeadingParagraph => "heading-paragraph",
            Self::MultiSubsection => "multi-subsection",
            Self::MultiSubparagraph => "multi-subparagraph",
            Self::Regex => "regex",
            Self::CustomDelimiter => "custom-delimiter",
            Self::SingleDelimiter => "single-delimiter",
        }
    }

    /// Whether the strategy segments on heading levels.
    pub fn uses_heading_level(&self) -> bool {
        matches!(
            self,
            Self::SectionSubsection
                | Self::HeadingParagraph
                | Self::MultiSubsection
                | Self::MultiSubparagraph
        )
    }
}

impl Default for StrategyKind {
    fn default() -> Self {
        Self::SectionSubsection
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    /// Names are matched case-insensitively after trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| Error::UnknownStrategy(s.to_string()))
    }
}

/// Fully resolved configuration for one parse call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Strategy name, resolved through [`StrategyKind`] at build time.
    pub strategy: String,
    pub allow_single_field: bool,
    pub html_break: bool,
    pub line_break_marker: String,
    pub heading_level: Option<i64>,
    pub regex: Option<String>,
    pub regex_flags: String,
    pub card_start: String,
    pub field_separator: String,
    pub card_end: String,
    pub single_separator: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default().as_str().to_string(),
            allow_single_field: false,
            html_break: false,
            line_break_marker: "<br>".to_string(),
            heading_level: None,
            regex: None,
            regex_flags: "g".to_string(),
            card_start: String::new(),
            field_separator: String::new(),
            card_end: String::new(),
            single_separator: String::new(),
        }
    }
}

impl ParseConfig {
    /// Create a config for the named strategy with every other option at its default.
    pub fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            ..Self::default()
        }
    }

    /// Minimum number of fields a card needs to be kept.
    pub fn min_fields(&self) -> usize {
        if self.allow_single_field {
            1
        } else {
            2
        }
    }

    /// Break marker to insert between joined lines, if enabled.
    pub fn line_break(&self) -> Option<&str> {
        if self.html_break {
            Some(self.line_break_marker.as_str())
        } else {
            None
        }
    }
}
