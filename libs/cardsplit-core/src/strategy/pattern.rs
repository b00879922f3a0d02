//! Regex strategy: every match is a card, capture groups are its fields.

use super::scan::{rejoin_lines, FieldPolicy};
use super::ParserStrategy;
use crate::error::{Error, Result};
use crate::types::{Card, ParseConfig, StrategyKind};
use regex::{Regex, RegexBuilder};

/// Regex strategy.
#[derive(Debug, Clone)]
pub struct RegexStrategy {
    regex: Regex,
    policy: FieldPolicy,
}

impl RegexStrategy {
    pub fn from_config(config: &ParseConfig) -> Result<Self> {
        let pattern = config
            .regex
            .as_deref()
            .filter(|pattern| !pattern.trim().is_empty())
            .ok_or_else(|| Error::configuration(StrategyKind::Regex, "regex", "pattern is empty"))?;

        Ok(Self {
            regex: compile(pattern, &config.regex_flags)?,
            policy: FieldPolicy::from_config(config),
        })
    }

    fn field(&self, text: &str) -> String {
        let text = text.strip_suffix('\r').unwrap_or(text);
        match self.policy.line_break.as_deref() {
            Some(marker) => rejoin_lines(text, marker),
            None => text.to_string(),
        }
    }
}

impl ParserStrategy for RegexStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Regex
    }

    fn parse(&self, content: &str) -> Vec<Card> {
        self.regex
            .captures_iter(content)
            .filter_map(|caps| {
                let fields: Vec<String> = caps
                    .iter()
                    .skip(1)
                    .map(|group| group.map_or_else(String::new, |m| self.field(m.as_str())))
                    .collect();

                let filled = fields.iter().filter(|field| !field.is_empty()).count();
                (filled >= self.policy.min_fields).then(|| Card::new(fields))
            })
            .collect()
    }
}

/// Compile `pattern` with JavaScript-style flags.
///
/// Matching always walks every match, so `g` is accepted as a no-op, as is
/// `u` since the engine is Unicode-aware by default.
pub fn compile(pattern: &str, flags: &str) -> Result<Regex> {
    let mut builder = RegexBuilder::new(pattern);
    builder.crlf(true);

    for flag in flags.chars() {
        match flag {
            'g' | 'u' => {}
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            other => {
                return Err(Error::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: format!("unsupported flag {other:?}"),
                })
            }
        }
    }

    builder.build().map_err(|err| Error::InvalidPattern {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    })
}
