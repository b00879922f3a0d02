//! Document segmentation strategies.

pub mod delimiter;
pub mod heading;
pub mod multi;
pub mod pattern;
mod scan;

pub use delimiter::{CustomDelimiter, SingleDelimiter};
pub use heading::{HeadingParagraph, SectionSubsection};
pub use multi::{MultiSubparagraph, MultiSubsection};
pub use pattern::RegexStrategy;

use crate::error::{Error, Result};
use crate::types::{Card, ParseConfig, StrategyKind};

/// Highest heading level accepted by the heading-based strategies.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Trait for document segmentation strategies.
///
/// Implementations capture their configuration at construction, so `parse`
/// is a pure function of `content` and safe to call from several threads.
pub trait ParserStrategy: Send + Sync {
    /// Strategy identifier.
    fn kind(&self) -> StrategyKind;

    /// Split `content` into cards. Never fails; unmatched content yields no cards.
    fn parse(&self, content: &str) -> Vec<Card>;
}

impl std::fmt::Debug for dyn ParserStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserStrategy").field("kind", &self.kind()).finish()
    }
}

/// Build the strategy called `strategy_name`, validating its parameters.
pub fn build(strategy_name: &str, config: &ParseConfig) -> Result<Box<dyn ParserStrategy>> {
    let kind: StrategyKind = strategy_name.parse()?;

    let strategy: Box<dyn ParserStrategy> = match kind {
        StrategyKind::SectionSubsection => Box::new(SectionSubsection::from_config(config)?),
        StrategyKind::HeadingParagraph => Box::new(HeadingParagraph::from_config(config)?),
        StrategyKind::MultiSubsection => Box::new(MultiSubsection::from_config(config)?),
        StrategyKind::MultiSubparagraph => Box::new(MultiSubparagraph::from_config(config)?),
        StrategyKind::Regex => Box::new(RegexStrategy::from_config(config)?),
        StrategyKind::CustomDelimiter => Box::new(CustomDelimiter::from_config(config)?),
        StrategyKind::SingleDelimiter => Box::new(SingleDelimiter::from_config(config)?),
    };

    tracing::debug!(strategy = %kind, "built parser strategy");
    Ok(strategy)
}

/// A built strategy ready to parse documents.
pub struct Parser {
    strategy: Box<dyn ParserStrategy>,
}

impl Parser {
    /// Build the strategy named by `config.strategy`.
    pub fn new(config: &ParseConfig) -> Result<Self> {
        Ok(Self {
            strategy: build(&config.strategy, config)?,
        })
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn parse(&self, content: &str) -> Vec<Card> {
        let cards = self.strategy.parse(content);
        tracing::debug!(strategy = %self.kind(), cards = cards.len(), "parsed document");
        cards
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser").field("kind", &self.kind()).finish()
    }
}

/// Validate the heading level required by the heading-based strategies.
pub(crate) fn heading_level(kind: StrategyKind, config: &ParseConfig) -> Result<usize> {
    let level = config
        .heading_level
        .ok_or_else(|| Error::configuration(kind, "heading_level", "no heading level set"))?;

    match usize::try_from(level) {
        Ok(level) if (1..=MAX_HEADING_LEVEL).contains(&level) => Ok(level),
        _ => Err(Error::configuration(
            kind,
            "heading_level",
            format!("{level} is outside 1..={MAX_HEADING_LEVEL}"),
        )),
    }
}

/// Validate a delimiter marker and return it trimmed.
pub(crate) fn delimiter(kind: StrategyKind, parameter: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::configuration(kind, parameter, "delimiter is empty"));
    }
    Ok(trimmed.to_string())
}
