//! Heading-based strategies producing one field per subheading.
//!
//! A heading at or above the configured level `L` opens a card; each
//! heading at `L + 1` opens a field. Multi-Subsection keeps the subheading
//! line at the top of its field, Multi-Subparagraph keeps only the body
//! beneath it.

use super::scan::{scan, FieldPolicy, Scanner, Segmenter};
use super::{heading_level, ParserStrategy};
use crate::error::Result;
use crate::line::LineKind;
use crate::types::{Card, ParseConfig, StrategyKind};

/// Multi-Subsection strategy.
#[derive(Debug, Clone)]
pub struct MultiSubsection {
    heading_level: usize,
    policy: FieldPolicy,
}

impl MultiSubsection {
    pub fn from_config(config: &ParseConfig) -> Result<Self> {
        Ok(Self {
            heading_level: heading_level(StrategyKind::MultiSubsection, config)?,
            policy: FieldPolicy::from_config(config),
        })
    }
}

impl ParserStrategy for MultiSubsection {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MultiSubsection
    }

    fn parse(&self, content: &str) -> Vec<Card> {
        scan(
            content,
            &self.policy,
            SubheadingSegments::new(self.heading_level, true),
        )
    }
}

/// Multi-Subparagraph strategy.
#[derive(Debug, Clone)]
pub struct MultiSubparagraph {
    heading_level: usize,
    policy: FieldPolicy,
}

impl MultiSubparagraph {
    pub fn from_config(config: &ParseConfig) -> Result<Self> {
        Ok(Self {
            heading_level: heading_level(StrategyKind::MultiSubparagraph, config)?,
            policy: FieldPolicy::from_config(config),
        })
    }
}

impl ParserStrategy for MultiSubparagraph {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MultiSubparagraph
    }

    fn parse(&self, content: &str) -> Vec<Card> {
        scan(
            content,
            &self.policy,
            SubheadingSegments::new(self.heading_level, false),
        )
    }
}

struct SubheadingSegments {
    level: usize,
    keep_heading: bool,
    in_card: bool,
    in_field: bool,
}

impl SubheadingSegments {
    fn new(level: usize, keep_heading: bool) -> Self {
        Self {
            level,
            keep_heading,
            in_card: false,
            in_field: false,
        }
    }
}

impl Segmenter for SubheadingSegments {
    fn collecting(&self) -> bool {
        self.in_card && self.in_field
    }

    fn line(&mut self, scanner: &mut Scanner<'_>, line: &str, kind: LineKind) {
        match kind {
            LineKind::Heading { level } if level <= self.level => {
                scanner.close_card();
                self.in_card = true;
                self.in_field = false;
            }
            _ if !self.in_card => {}
            LineKind::Heading { level } if level == self.level + 1 => {
                if self.in_field {
                    // An empty body still occupies its field slot.
                    scanner.split_field();
                }
                if self.keep_heading {
                    scanner.push_line(line);
                }
                self.in_field = true;
            }
            _ if !self.in_field => {}
            _ => scanner.push_line(line),
        }
    }
}
