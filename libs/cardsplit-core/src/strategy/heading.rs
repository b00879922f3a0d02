//! Heading-based strategies with a fixed front/back split.
//!
//! # Section::Subsection
//! ```markdown
//! ## What is ownership?        <- opens a card, starts the front
//! Intro text joins the front.
//! ### Answer                   <- first deeper heading starts the back
//! Each value has one owner.
//! ```
//!
//! # Heading::Paragraph
//! ```markdown
//! ## What is borrowing?        <- the front is exactly this line
//! Everything below, deeper headings included, is the back.
//! ```

use super::scan::{scan, FieldPolicy, Scanner, Segmenter};
use super::{heading_level, ParserStrategy};
use crate::error::Result;
use crate::line::LineKind;
use crate::types::{Card, ParseConfig, StrategyKind};

/// Section::Subsection strategy.
#[derive(Debug, Clone)]
pub struct SectionSubsection {
    heading_level: usize,
    policy: FieldPolicy,
}

impl SectionSubsection {
    pub fn from_config(config: &ParseConfig) -> Result<Self> {
        Ok(Self {
            heading_level: heading_level(StrategyKind::SectionSubsection, config)?,
            policy: FieldPolicy::from_config(config),
        })
    }
}

impl ParserStrategy for SectionSubsection {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SectionSubsection
    }

    fn parse(&self, content: &str) -> Vec<Card> {
        scan(
            content,
            &self.policy,
            SectionSegments {
                level: self.heading_level,
                in_card: false,
                on_front: false,
            },
        )
    }
}

struct SectionSegments {
    level: usize,
    in_card: bool,
    on_front: bool,
}

impl Segmenter for SectionSegments {
    fn collecting(&self) -> bool {
        self.in_card
    }

    fn line(&mut self, scanner: &mut Scanner<'_>, line: &str, kind: LineKind) {
        match kind {
            LineKind::Heading { level } if level == self.level => {
                scanner.close_card();
                scanner.push_line(line);
                self.in_card = true;
                self.on_front = true;
            }
            _ if !self.in_card => {}
            LineKind::Heading { level } if level < self.level => {
                scanner.close_card();
                self.in_card = false;
                self.on_front = false;
            }
            // Deeper headings after the first stay inside the back.
            LineKind::Heading { .. } if self.on_front => {
                scanner.close_field();
                scanner.push_line(line);
                self.on_front = false;
            }
            _ => scanner.push_line(line),
        }
    }
}

/// Heading::Paragraph strategy.
#[derive(Debug, Clone)]
pub struct HeadingParagraph {
    heading_level: usize,
    policy: FieldPolicy,
}

impl HeadingParagraph {
    pub fn from_config(config: &ParseConfig) -> Result<Self> {
        Ok(Self {
            heading_level: heading_level(StrategyKind::HeadingParagraph, config)?,
            policy: FieldPolicy::from_config(config),
        })
    }
}

impl ParserStrategy for HeadingParagraph {
    fn kind(&self) -> StrategyKind {
        StrategyKind::HeadingParagraph
    }

    fn parse(&self, content: &str) -> Vec<Card> {
        scan(
            content,
            &self.policy,
            ParagraphSegments {
                level: self.heading_level,
                in_card: false,
            },
        )
    }
}

struct ParagraphSegments {
    level: usize,
    in_card: bool,
}

impl Segmenter for ParagraphSegments {
    fn collecting(&self) -> bool {
        self.in_card
    }

    fn line(&mut self, scanner: &mut Scanner<'_>, line: &str, kind: LineKind) {
        match kind {
            LineKind::Heading { level } if level == self.level => {
                scanner.close_card();
                scanner.push_field(line);
                self.in_card = true;
            }
            _ if !self.in_card => {}
            LineKind::Heading { level } if level < self.level => {
                scanner.close_card();
                self.in_card = false;
            }
            _ => scanner.push_line(line),
        }
    }
}
