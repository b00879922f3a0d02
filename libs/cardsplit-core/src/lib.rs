//! Core card-splitting library.
//!
//! Provides:
//! - Line classifier for headings and code fences
//! - Segmentation strategies (heading, delimiter and regex based)
//! - Per-document config blocks and settings merge
//! - Shared types (Card, ParseConfig, StrategyKind, etc.)

pub mod config_block;
pub mod document;
pub mod error;
pub mod line;
pub mod settings;
pub mod strategy;
pub mod types;

pub use config_block::{extract_config, parse_bool};
pub use document::{parse_document, resolve_config, DocumentCards};
pub use error::{Error, Result};
pub use line::{classify, FenceRole, LineKind};
pub use settings::{default_regex_presets, ConfigOverride, EffectiveConfig, GlobalSettings, RegexPreset};
pub use strategy::{build, Parser, ParserStrategy};
pub use types::{Card, ParseConfig, StrategyKind};
