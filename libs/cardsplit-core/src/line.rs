//! Line classification shared by every line-based strategy.
//!
//! A line is a heading (`## Title`), a code fence (a run of three or more
//! backticks, optionally followed by an info string) or plain content.

use serde::{Deserialize, Serialize};

const FENCE_CHAR: char = '`';
const INDENTED_CODE_WIDTH: usize = 4;

/// Whether a fence line may close an open fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FenceRole {
    /// Fence followed by an info string; it can open a block but never close one.
    OnlyBegin,
    /// Bare run of backticks; closes any fence opened with at most as many.
    CanBeEnd,
}

/// Category of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind {
    Content,
    Heading { level: usize },
    Fence { ticks: usize, role: FenceRole },
}

impl LineKind {
    pub fn is_fence(&self) -> bool {
        matches!(self, Self::Fence { .. })
    }

    /// Whether this line closes a fence opened with `open_ticks` backticks.
    pub fn closes_fence(&self, open_ticks: usize) -> bool {
        matches!(
            self,
            Self::Fence { ticks, role: FenceRole::CanBeEnd } if *ticks >= open_ticks
        )
    }
}

/// Classify one line. Depends on nothing but `line`.
pub fn classify(line: &str) -> LineKind {
    // Indented code is never a fence or an ATX heading.
    if is_indented_code(line) {
        return LineKind::Content;
    }

    let trimmed = line.trim();

    if trimmed.starts_with("```") {
        classify_fence(trimmed)
    } else if trimmed.starts_with('#') {
        classify_heading(trimmed)
    } else {
        LineKind::Content
    }
}

fn classify_fence(trimmed: &str) -> LineKind {
    let ticks = trimmed.chars().take_while(|&c| c == FENCE_CHAR).count();
    // Backticks are all ASCII, so the char count doubles as a byte offset.
    let rest = &trimmed[ticks..];

    if rest.contains(FENCE_CHAR) {
        LineKind::Content
    } else if rest.trim().is_empty() {
        LineKind::Fence {
            ticks,
            role: FenceRole::CanBeEnd,
        }
    } else {
        LineKind::Fence {
            ticks,
            role: FenceRole::OnlyBegin,
        }
    }
}

fn classify_heading(trimmed: &str) -> LineKind {
    let marker = trimmed.split(' ').next().unwrap_or_default();

    if marker.chars().all(|c| c == '#') {
        LineKind::Heading {
            level: marker.len(),
        }
    } else {
        LineKind::Content
    }
}

fn is_indented_code(line: &str) -> bool {
    line.starts_with('\t') || line.starts_with(&" ".repeat(INDENTED_CODE_WIDTH))
}
