//! Delimiter-based strategies.
//!
//! Markers are compared against the trimmed line with a prefix match, so
//! `<!-- card start --> deck A` still opens a card.

use super::scan::{scan, FieldPolicy, Scanner, Segmenter};
use super::{delimiter, ParserStrategy};
use crate::error::Result;
use crate::line::LineKind;
use crate::types::{Card, ParseConfig, StrategyKind};

/// Custom delimiter strategy: explicit card start, field separator and card end markers.
#[derive(Debug, Clone)]
pub struct CustomDelimiter {
    card_start: String,
    field_separator: String,
    card_end: String,
    policy: FieldPolicy,
}

impl CustomDelimiter {
    pub fn from_config(config: &ParseConfig) -> Result<Self> {
        let kind = StrategyKind::CustomDelimiter;
        Ok(Self {
            card_start: delimiter(kind, "card_start", &config.card_start)?,
            field_separator: delimiter(kind, "field_separator", &config.field_separator)?,
            card_end: delimiter(kind, "card_end", &config.card_end)?,
            policy: FieldPolicy::from_config(config),
        })
    }
}

impl ParserStrategy for CustomDelimiter {
    fn kind(&self) -> StrategyKind {
        StrategyKind::CustomDelimiter
    }

    fn parse(&self, content: &str) -> Vec<Card> {
        scan(
            content,
            &self.policy,
            MarkerSegments {
                markers: self,
                in_card: false,
            },
        )
    }
}

struct MarkerSegments<'a> {
    markers: &'a CustomDelimiter,
    in_card: bool,
}

impl Segmenter for MarkerSegments<'_> {
    fn collecting(&self) -> bool {
        self.in_card
    }

    fn line(&mut self, scanner: &mut Scanner<'_>, line: &str, _kind: LineKind) {
        let trimmed = line.trim();

        if trimmed.starts_with(&self.markers.card_start) {
            scanner.close_card();
            self.in_card = true;
            return;
        }
        if !self.in_card {
            return;
        }

        if trimmed.starts_with(&self.markers.field_separator) {
            scanner.split_field();
        } else if trimmed.starts_with(&self.markers.card_end) {
            scanner.close_card();
            self.in_card = false;
        } else {
            scanner.push_line(line);
        }
    }
}

/// Single delimiter strategy: blank lines separate cards, one marker separates fields.
#[derive(Debug, Clone)]
pub struct SingleDelimiter {
    separator: String,
    policy: FieldPolicy,
}

impl SingleDelimiter {
    pub fn from_config(config: &ParseConfig) -> Result<Self> {
        Ok(Self {
            separator: delimiter(
                StrategyKind::SingleDelimiter,
                "single_separator",
                &config.single_separator,
            )?,
            policy: FieldPolicy::from_config(config),
        })
    }
}

impl ParserStrategy for SingleDelimiter {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SingleDelimiter
    }

    fn parse(&self, content: &str) -> Vec<Card> {
        scan(
            content,
            &self.policy,
            BlankLineSegments {
                separator: &self.separator,
                seen_separator: false,
            },
        )
    }
}

struct BlankLineSegments<'a> {
    separator: &'a str,
    seen_separator: bool,
}

impl Segmenter for BlankLineSegments<'_> {
    fn collecting(&self) -> bool {
        true
    }

    fn line(&mut self, scanner: &mut Scanner<'_>, line: &str, _kind: LineKind) {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            // Runs without a separator are plain prose, not cards.
            scanner.end_card(self.seen_separator);
            self.seen_separator = false;
        } else if trimmed.starts_with(self.separator) {
            scanner.split_field();
            self.seen_separator = true;
        } else {
            scanner.push_line(line);
        }
    }

    fn finish(&mut self, scanner: &mut Scanner<'_>) {
        scanner.finish_card(self.seen_separator);
    }
}
