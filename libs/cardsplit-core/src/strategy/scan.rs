//! Shared line-scanning loop for the line-based strategies.
//!
//! The loop owns code-fence tracking and field/card accumulation. Each
//! strategy supplies a [`Segmenter`] that only decides where fields and
//! cards begin and end; fenced lines never reach it.

use crate::line::{classify, LineKind};
use crate::types::{Card, ParseConfig};

/// Card-level policies captured from the configuration at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldPolicy {
    pub min_fields: usize,
    pub line_break: Option<String>,
}

impl FieldPolicy {
    pub fn from_config(config: &ParseConfig) -> Self {
        Self {
            min_fields: config.min_fields(),
            line_break: config.line_break().map(str::to_string),
        }
    }

    /// Whether `field` carries anything besides whitespace and break markers.
    fn is_meaningful(&self, field: &str) -> bool {
        match self.line_break.as_deref() {
            Some(marker) if !marker.is_empty() => !field.replace(marker, "").trim().is_empty(),
            _ => !field.trim().is_empty(),
        }
    }
}

/// Boundary decisions of one strategy.
pub(crate) trait Segmenter {
    /// Whether lines are currently collected into a field.
    fn collecting(&self) -> bool;

    /// Handle one line that is not part of a code fence.
    fn line(&mut self, scanner: &mut Scanner<'_>, line: &str, kind: LineKind);

    /// Flush pending state at end of input.
    fn finish(&mut self, scanner: &mut Scanner<'_>) {
        scanner.finish_card(true);
    }
}

/// Accumulator for cards, the current card and the current field.
pub(crate) struct Scanner<'p> {
    policy: &'p FieldPolicy,
    cards: Vec<Card>,
    card: Vec<String>,
    field: String,
    fence: usize,
}

impl<'p> Scanner<'p> {
    fn new(policy: &'p FieldPolicy) -> Self {
        Self {
            policy,
            cards: Vec::new(),
            card: Vec::new(),
            field: String::new(),
            fence: 0,
        }
    }

    /// Append a line, inserting the break marker when it is not the first line.
    ///
    /// Leading empty lines never start a field.
    pub fn push_line(&mut self, line: &str) {
        if self.field.is_empty() {
            self.field.push_str(line);
            return;
        }
        if let Some(marker) = self.policy.line_break.as_deref() {
            self.field.push_str(marker);
        }
        self.field.push('\n');
        self.field.push_str(line);
    }

    /// Append a fenced line untouched.
    fn push_verbatim(&mut self, line: &str) {
        if !self.field.is_empty() {
            self.field.push('\n');
        }
        self.field.push_str(line);
    }

    /// Add a complete field to the current card.
    pub fn push_field(&mut self, field: impl Into<String>) {
        self.card.push(field.into());
    }

    /// Close the current field, keeping it only if it has content.
    pub fn close_field(&mut self) {
        if !self.field.is_empty() {
            let field = std::mem::take(&mut self.field);
            self.card.push(field);
        }
    }

    /// Close the current field even when it is empty, preserving field positions.
    pub fn split_field(&mut self) {
        let field = std::mem::take(&mut self.field);
        self.card.push(field);
    }

    /// Close the current field and card; the card is kept only when `keep`
    /// holds and it has enough fields.
    pub fn end_card(&mut self, keep: bool) {
        self.close_field();
        self.emit(keep);
    }

    pub fn close_card(&mut self) {
        self.end_card(true);
    }

    /// End-of-input flush: whitespace-only fields are dropped.
    pub fn finish_card(&mut self, keep: bool) {
        if self.policy.is_meaningful(&self.field) {
            self.close_field();
        }
        self.field.clear();
        self.emit(keep);
    }

    fn emit(&mut self, keep: bool) {
        let card = std::mem::take(&mut self.card);
        if keep && card.len() >= self.policy.min_fields {
            self.cards.push(Card::new(card));
        }
    }
}

/// Run `segmenter` over every line of `content`.
pub(crate) fn scan<S: Segmenter>(content: &str, policy: &FieldPolicy, mut segmenter: S) -> Vec<Card> {
    let mut scanner = Scanner::new(policy);

    for raw in content.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let kind = classify(line);

        if scanner.fence > 0 {
            if segmenter.collecting() {
                scanner.push_verbatim(line);
            }
            if kind.closes_fence(scanner.fence) {
                scanner.fence = 0;
            }
            continue;
        }

        if let LineKind::Fence { ticks, .. } = kind {
            scanner.fence = ticks;
            if segmenter.collecting() {
                scanner.push_line(line);
            }
            continue;
        }

        segmenter.line(&mut scanner, line, kind);
    }

    segmenter.finish(&mut scanner);
    scanner.cards
}

/// Re-join the lines of an already extracted field under the break policy.
pub(crate) fn rejoin_lines(text: &str, marker: &str) -> String {
    let mut joined = String::with_capacity(text.len());
    let mut fence = 0;

    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            if fence == 0 {
                joined.push_str(marker);
            }
            joined.push('\n');
        }
        joined.push_str(line);

        let kind = classify(line);
        if fence > 0 {
            if kind.closes_fence(fence) {
                fence = 0;
            }
        } else if let LineKind::Fence { ticks, .. } = kind {
            fence = ticks;
        }
    }

    joined
}
