//! Per-document configuration block.
//!
//! # Format
//! ````markdown
//! ```anki
//! deck: Rust::Ownership
//! parser: heading-paragraph
//! heading-level: 3
//! html: yes
//! ```
//! ````
//!
//! Keys are case-insensitive and accept several aliases; `：` works as a
//! separator as well as `:`.

use crate::error::{Error, Result};
use crate::settings::ConfigOverride;
use regex::Regex;
use std::sync::OnceLock;

/// Info string marking the configuration block.
pub const CONFIG_LANGUAGE: &str = "anki";

fn block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"(?s)```{CONFIG_LANGUAGE}\s+(.*?)\s+```"))
            .expect("config block pattern is valid")
    })
}

/// Extract the first config block of `text`, if any.
pub fn extract_config(text: &str) -> Result<Option<ConfigOverride>> {
    let Some(body) = block_pattern().captures(text).and_then(|caps| caps.get(1)) else {
        return Ok(None);
    };

    let first_line = text[..body.start()].matches('\n').count() + 1;
    parse_config_body(body.as_str(), first_line).map(Some)
}

/// Parse the `key: value` lines of a config block body.
///
/// `first_line` is the document line number of the body's first line and
/// is only used in error messages.
pub fn parse_config_body(body: &str, first_line: usize) -> Result<ConfigOverride> {
    let mut config = ConfigOverride::default();

    for (idx, raw) in body.lines().enumerate() {
        let line = first_line + idx;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (key, value) = trimmed
            .split_once(|c: char| c == ':' || c == '：')
            .ok_or_else(|| Error::ConfigParse {
                line,
                reason: format!("expected `key: value`, found {trimmed:?}"),
            })?;

        let key = key.trim().to_lowercase();
        let value = value.trim();

        if key.is_empty() {
            return Err(Error::ConfigParse {
                line,
                reason: "missing key".to_string(),
            });
        }
        if value.is_empty() {
            return Err(Error::ConfigParse {
                line,
                reason: format!("missing value for `{key}`"),
            });
        }

        apply(&mut config, &key, value, line)?;
    }

    Ok(config)
}

fn apply(config: &mut ConfigOverride, key: &str, value: &str, line: usize) -> Result<()> {
    let text = || Some(value.to_string());

    match key {
        "deck" | "anki-deck" => config.deck = text(),
        "model" | "anki-model" | "note-type" | "anki-note-type" => config.model = text(),
        "tag" | "anki-tag" | "card-tag" | "anki-card-tag" => config.tag = text(),
        "parser" | "parser-mode" | "match" | "match-mode" => config.strategy = text(),
        "regex" => config.regex = text(),
        "flags" | "flag" | "regex-flags" | "regex-flag" => config.regex_flags = text(),
        "heading" | "heading-level" => {
            let level = value.parse::<i64>().map_err(|_| Error::ConfigParse {
                line,
                reason: format!("`{key}` expects an integer, found {value:?}"),
            })?;
            config.heading_level = Some(level);
        }
        "update" | "upsert" => config.update = Some(parse_bool(value)),
        "single" | "single-field" => config.allow_single_field = Some(parse_bool(value)),
        "html" | "html-break" | "html-line-break" => config.html_break = Some(parse_bool(value)),
        "ignore" => config.ignore = Some(parse_bool(value)),
        "card-start" => config.card_start = text(),
        "field" | "field-split" | "field-separator" => config.field_separator = text(),
        "card-end" => config.card_end = text(),
        "single-separator" | "separator" => config.single_separator = text(),
        _ => tracing::debug!(key, line, "ignoring unknown config key"),
    }

    Ok(())
}

/// Tolerant boolean: `true`, `1`, `yes` and `y` (any case) are true, anything else false.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_block_returns_none() {
        assert_eq!(extract_config("## Q\n### A").unwrap(), None);
        assert_eq!(extract_config("```rust\nlet a = 1;\n```").unwrap(), None);
    }

    #[test]
    fn parses_aliases() {
        let doc = "# Notes\n```anki\nAnki-Deck: Rust::Basics\nnote-type: Basic (and reversed)\nmatch-mode: Multi-Subsection\nheading-level: 3\ncard-tag: rust\n```\n## Q";
        let config = extract_config(doc).unwrap().unwrap();
        assert_eq!(
            config,
            ConfigOverride {
                deck: Some("Rust::Basics".to_string()),
                model: Some("Basic (and reversed)".to_string()),
                strategy: Some("Multi-Subsection".to_string()),
                heading_level: Some(3),
                tag: Some("rust".to_string()),
                ..ConfigOverride::default()
            }
        );
    }

    #[test]
    fn value_keeps_later_colons() {
        let doc = "```anki\nregex: ^(.*)::(.*)$\nflags: gm\n```";
        let config = extract_config(doc).unwrap().unwrap();
        assert_eq!(config.regex.as_deref(), Some("^(.*)::(.*)$"));
        assert_eq!(config.regex_flags.as_deref(), Some("gm"));
    }

    #[test]
    fn fullwidth_colon_separates() {
        let doc = "```anki\ndeck：日本語\n```";
        let config = extract_config(doc).unwrap().unwrap();
        assert_eq!(config.deck.as_deref(), Some("日本語"));
    }

    #[test]
    fn booleans_are_tolerant() {
        let doc = "```anki\nsingle: YES\nhtml-line-break: 1\nupsert: no\nignore: Y\n```";
        let config = extract_config(doc).unwrap().unwrap();
        assert_eq!(config.allow_single_field, Some(true));
        assert_eq!(config.html_break, Some(true));
        assert_eq!(config.update, Some(false));
        assert_eq!(config.ignore, Some(true));
    }

    #[test]
    fn delimiter_keys() {
        let doc = "```anki\ncard-start: <<\nfield-split: ||\ncard-end: >>\nseparator: --\n```";
        let config = extract_config(doc).unwrap().unwrap();
        assert_eq!(config.card_start.as_deref(), Some("<<"));
        assert_eq!(config.field_separator.as_deref(), Some("||"));
        assert_eq!(config.card_end.as_deref(), Some(">>"));
        assert_eq!(config.single_separator.as_deref(), Some("--"));
    }

    #[test]
    fn only_first_block_is_used() {
        let doc = "```anki\ndeck: first\n```\n\n```anki\ndeck: second\n```";
        let config = extract_config(doc).unwrap().unwrap();
        assert_eq!(config.deck.as_deref(), Some("first"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let doc = "```anki\ncolour: blue\ndeck: X\n```";
        let config = extract_config(doc).unwrap().unwrap();
        assert_eq!(
            config,
            ConfigOverride {
                deck: Some("X".to_string()),
                ..ConfigOverride::default()
            }
        );
    }

    #[test]
    fn line_without_separator_is_an_error() {
        let doc = "intro\n\n```anki\ndeck: X\njust words\n```";
        let err = extract_config(doc).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { line: 5, .. }), "{err}");
    }

    #[test]
    fn non_integer_heading_is_an_error() {
        let doc = "```anki\nheading: two\n```";
        let err = extract_config(doc).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { line: 2, ref reason } if reason.contains("integer")));
    }

    #[test]
    fn empty_value_is_an_error() {
        let doc = "```anki\ndeck:\nmodel: Basic\n```";
        assert!(matches!(
            extract_config(doc),
            Err(Error::ConfigParse { line: 2, .. })
        ));
    }

    #[test]
    fn parse_bool_variants() {
        for yes in ["true", "TRUE", "1", "yes", "Y", " y "] {
            assert!(parse_bool(yes), "{yes}");
        }
        for no in ["false", "0", "no", "on", ""] {
            assert!(!parse_bool(no), "{no}");
        }
    }
}
