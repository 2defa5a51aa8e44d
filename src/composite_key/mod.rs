//! Composite keys - Emulated secondary indexes over a flat key-value store.
//!
//! A composite key packs an index name and an ordered list of attribute
//! segments into one string:
//!
//! ```text
//! U+0000 index U+0000 seg1 U+0000 seg2 U+0000 ... segN U+0000
//! ```
//!
//! Every segment is terminated by the separator, so the key built from a
//! leading subsequence of segments is a strict prefix of exactly the keys
//! whose leading fields are equal. `"blue"` never prefix-matches `"bluegreen"`.
//!
//! The separator and `U+10FFFF` are reserved: they are rejected in the index
//! name and in every segment instead of being escaped.
//!
//! ## Example
//!
//! ```ignore
//! use car_ledger::composite_key::{self, CompositeKey};
//!
//! let key = CompositeKey::new("color~owner~ID", ["blue", "2", "c6"])?.encode();
//! let prefix = composite_key::prefix("color~owner~ID", &["blue"])?;
//! assert!(key.starts_with(&prefix));
//!
//! let decoded = CompositeKey::decode(&key)?;
//! assert_eq!(decoded.segments(), ["blue", "2", "c6"]);
//! ```

use thiserror::Error;

/// Separator between the index name and segments. Also the composite namespace marker.
pub const SEPARATOR: char = '\u{0}';

/// Reserved code point, never allowed inside a segment.
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// Error type for composite key encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("composite key index name must not be empty")]
    EmptyIndex,
    #[error("composite key segment {segment:?} contains a reserved character")]
    ReservedCharacter { segment: String },
    #[error("primary key {key:?} must not start with the composite key separator")]
    ReservedPrimaryKey { key: String },
    #[error("malformed composite key: {0:?}")]
    Malformed(String),
}

/// A decoded composite key: index name plus its attribute segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    index: String,
    segments: Vec<String>,
}

impl CompositeKey {
    /// Build a composite key, validating the index name and every segment.
    pub fn new<I, S>(index: &str, segments: I) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        validate_index(index)?;
        let segments = segments.into_iter().map(Into::into).collect::<Vec<String>>();
        for segment in &segments {
            validate_segment(segment)?;
        }

        Ok(Self {
            index: index.to_string(),
            segments,
        })
    }

    /// Parse an encoded composite key back into index name and segments.
    pub fn decode(key: &str) -> Result<Self, KeyError> {
        let body = key
            .strip_prefix(SEPARATOR)
            .and_then(|rest| rest.strip_suffix(SEPARATOR))
            .ok_or_else(|| KeyError::Malformed(key.to_string()))?;

        let mut parts = body.split(SEPARATOR);
        let index = parts
            .next()
            .filter(|index| !index.is_empty())
            .ok_or_else(|| KeyError::Malformed(key.to_string()))?;

        Ok(Self {
            index: index.to_string(),
            segments: parts.map(str::to_string).collect(),
        })
    }

    /// Encode into the flat, scan-compatible key string.
    pub fn encode(&self) -> String {
        let capacity = self.index.len()
            + self.segments.iter().map(String::len).sum::<usize>()
            + self.segments.len()
            + 2;
        let mut key = String::with_capacity(capacity);
        key.push(SEPARATOR);
        key.push_str(&self.index);
        key.push(SEPARATOR);
        for segment in &self.segments {
            key.push_str(segment);
            key.push(SEPARATOR);
        }
        key
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Consume the key, returning its segments.
    pub fn into_segments(self) -> Vec<String> {
        self.segments
    }
}

/// Build the scan prefix for a leading subsequence of an index's segments.
///
/// An empty `segments` slice yields the prefix of the whole index.
pub fn prefix(index: &str, segments: &[&str]) -> Result<String, KeyError> {
    Ok(CompositeKey::new(index, segments.iter().copied())?.encode())
}

/// Returns true if `key` lives in the composite key namespace.
pub fn is_composite(key: &str) -> bool {
    key.starts_with(SEPARATOR)
}

/// Primary record keys must stay outside the composite key namespace.
pub fn validate_primary_key(key: &str) -> Result<(), KeyError> {
    if is_composite(key) {
        return Err(KeyError::ReservedPrimaryKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

fn validate_index(index: &str) -> Result<(), KeyError> {
    if index.is_empty() {
        return Err(KeyError::EmptyIndex);
    }
    validate_segment(index)
}

fn validate_segment(segment: &str) -> Result<(), KeyError> {
    if segment.contains([SEPARATOR, MAX_UNICODE_RUNE]) {
        return Err(KeyError::ReservedCharacter {
            segment: segment.to_string(),
        });
    }
    Ok(())
}
