//! Whole-document pipeline: config block, merge, strategy, cards.

use crate::config_block::extract_config;
use crate::error::Result;
use crate::settings::{EffectiveConfig, GlobalSettings};
use crate::strategy::Parser;
use crate::types::Card;
use serde::{Deserialize, Serialize};

/// Cards parsed from one document together with where they should go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCards {
    pub deck: String,
    pub model: String,
    pub tag: String,
    pub update: bool,
    /// Set when the document's config block asked to be skipped.
    pub ignored: bool,
    pub cards: Vec<Card>,
}

impl DocumentCards {
    fn empty(config: EffectiveConfig, ignored: bool) -> Self {
        Self {
            deck: config.deck,
            model: config.model,
            tag: config.tag,
            update: config.update,
            ignored,
            cards: Vec::new(),
        }
    }
}

/// Resolve the effective configuration for `text` against `global`.
pub fn resolve_config(text: &str, global: &GlobalSettings) -> Result<EffectiveConfig> {
    let document = extract_config(text)?;
    Ok(EffectiveConfig::merge(global, document.as_ref()))
}

/// Parse `text` into cards using its config block merged over `global`.
pub fn parse_document(text: &str, global: &GlobalSettings) -> Result<DocumentCards> {
    let config = resolve_config(text, global)?;

    if config.ignore {
        tracing::info!("document marked ignore, skipping");
        return Ok(DocumentCards::empty(config, true));
    }

    let parser = Parser::new(&config.parse)?;
    let cards = parser.parse(text);

    let mut result = DocumentCards::empty(config, false);
    result.cards = cards;
    Ok(result)
}
