//! Inline ingredient annotations.
//!
//! Recipe steps embed ingredients as `{quantity;unit;name}` tokens inside otherwise
//! free-form prose, e.g. `"Whisk {2;cup;flour} with {1;tsp;salt}."`. The
//! [`locate_annotations`] scanner finds the brace-delimited spans and
//! [`decode_annotation`] turns each span into an [`IngredientRecord`].
//! [`parse_step`] runs both over a single step.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::error::ChompError;
use crate::model::IngredientRecord;

mod decoder;
mod locator;

pub use self::decoder::decode_annotation;
pub use self::locator::locate_annotations;

/// Byte offsets of one annotation: `start` is the `{`, `end` is the matching `}`.
///
/// Offsets are always absolute positions in the step text the span was located in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AnnotationSpan {
    pub start: usize,
    pub end: usize,
}

impl AnnotationSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Text strictly between the braces, or `None` if the span does not
    /// delimit a `{...}` token in `text`.
    pub fn inner<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.start >= self.end {
            return None;
        }
        let bytes = text.as_bytes();
        if bytes.get(self.start) != Some(&b'{') || bytes.get(self.end) != Some(&b'}') {
            return None;
        }
        text.get(self.start + 1..self.end)
    }
}

impl fmt::Display for AnnotationSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Errors produced while locating or decoding annotations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    /// An opening `{` with no `}` anywhere after it; `text` runs from the brace to the end
    #[error("unmatched '{{' at byte {offset} in {text:?}")]
    UnmatchedBrace { offset: usize, text: String },

    /// The annotation does not contain two `;` delimiters
    #[error("malformed annotation {text:?} at bytes {span}, expected {{quantity;unit;name}}")]
    MalformedAnnotation { span: AnnotationSpan, text: String },

    /// The quantity field is not a finite decimal number
    #[error("invalid quantity {quantity:?} in annotation {text:?} at bytes {span}")]
    InvalidQuantity {
        span: AnnotationSpan,
        text: String,
        quantity: String,
    },
}

impl AnnotationError {
    pub fn span(&self) -> Option<AnnotationSpan> {
        match self {
            AnnotationError::UnmatchedBrace { .. } => None,
            AnnotationError::MalformedAnnotation { span, .. }
            | AnnotationError::InvalidQuantity { span, .. } => Some(*span),
        }
    }

    /// Byte offset of the opening brace of the offending annotation
    pub fn offset(&self) -> usize {
        match self {
            AnnotationError::UnmatchedBrace { offset, .. } => *offset,
            AnnotationError::MalformedAnnotation { span, .. }
            | AnnotationError::InvalidQuantity { span, .. } => span.start,
        }
    }

    /// Offending source text
    pub fn text(&self) -> &str {
        match self {
            AnnotationError::UnmatchedBrace { text, .. }
            | AnnotationError::MalformedAnnotation { text, .. }
            | AnnotationError::InvalidQuantity { text, .. } => text,
        }
    }
}

/// Outcome of parsing one recipe step.
///
/// A step without any `{` is reported as [`ParseResult::NoAnnotations`], which callers
/// treat differently from a step whose annotations produced records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "ingredients", rename_all = "snake_case")]
pub enum ParseResult {
    NoAnnotations,
    Ingredients(Vec<IngredientRecord>),
}

impl ParseResult {
    pub fn has_annotations(&self) -> bool {
        matches!(self, ParseResult::Ingredients(_))
    }

    /// Records in step order; empty for [`ParseResult::NoAnnotations`]
    pub fn ingredients(&self) -> &[IngredientRecord] {
        match self {
            ParseResult::NoAnnotations => &[],
            ParseResult::Ingredients(records) => records,
        }
    }
}

/// Extract every ingredient annotation of a single recipe step, in order.
///
/// Fails on the first malformed annotation; no partial results are returned.
pub fn parse_step(text: &str) -> Result<ParseResult, AnnotationError> {
    let spans = locate_annotations(text)?;
    if spans.is_empty() {
        return Ok(ParseResult::NoAnnotations);
    }

    let records = spans
        .into_iter()
        .map(|span| decode_annotation(text, span))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ParseResult::Ingredients(records))
}

/// Parse every step of a recipe in order.
///
/// The first failing step aborts the batch and the error carries its index.
pub fn parse_steps<S: AsRef<str>>(steps: &[S]) -> Result<Vec<ParseResult>, ChompError> {
    steps
        .iter()
        .enumerate()
        .map(|(step, text)| {
            parse_step(text.as_ref()).map_err(|source| ChompError::Step { step, source })
        })
        .collect()
}
