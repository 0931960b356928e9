//! Feature identifier domain model.

use serde::Serialize;

use crate::domain::AppError;
use crate::impl_validated_id;

/// A validated feature identifier.
///
/// Guarantees:
/// - Non-empty
/// - Contains only alphanumeric characters, `-`, `_`, or `.`
/// - No path traversal components (/, \\, .., etc.)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl_validated_id!(FeatureId, true, AppError::InvalidFeatureId);

impl FeatureId {
    /// Derive an identifier from a manifest file stem.
    ///
    /// A leading numeric ordering prefix (`01-`, `20_`) is dropped, so
    /// `01-storage-spaces` becomes `storage-spaces`. A stem that is nothing
    /// but a prefix keeps its digits.
    pub fn from_file_stem(stem: &str) -> Result<Self, AppError> {
        Self::new(strip_order_prefix(stem))
    }

    /// Derive an identifier from a stem that may contain disallowed characters.
    ///
    /// Each disallowed character becomes `-` before the ordering prefix is
    /// dropped. A stem with nothing usable left becomes `feature-NN`, where
    /// `NN` is the file's 1-based position in discovery order.
    pub fn sanitized(stem: &str, position: usize) -> Self {
        let replaced: String = stem
            .chars()
            .map(|c| if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '-' })
            .collect();
        let trimmed = replaced.trim_matches('-');
        Self::from_file_stem(trimmed).unwrap_or_else(|_| Self(format!("feature-{:02}", position)))
    }

    /// Same identifier with a numeric suffix, used to break collisions.
    pub fn with_suffix(&self, n: usize) -> Self {
        Self(format!("{}-{}", self.0, n))
    }

    /// Case-insensitive comparison used for command-line selection.
    pub fn matches(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name.trim())
    }
}

fn strip_order_prefix(stem: &str) -> &str {
    let digits = stem.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return stem;
    }
    match stem[digits..].strip_prefix(['-', '_']) {
        Some(rest) if !rest.is_empty() => rest,
        _ => stem,
    }
}
