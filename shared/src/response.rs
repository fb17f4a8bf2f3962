//! Response envelope adapters
//!
//! Endpoints are inconsistent about wrapping: some return a bare JSON array
//! or object, others wrap it as `{ "data": ... }`. Each endpoint client
//! decodes through one of these adapters so the shape is normalized at the
//! boundary and never inspected again.

use serde::Deserialize;

/// A list payload that arrives either bare or wrapped in `{ "data": [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    /// `{ "data": [...] }` (extra keys such as pagination are ignored)
    Wrapped { data: Vec<T> },
    /// `[...]`
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    /// Unwrap into the contained items
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(items) => items,
        }
    }
}

impl<T> From<ListEnvelope<T>> for Vec<T> {
    fn from(envelope: ListEnvelope<T>) -> Self {
        envelope.into_vec()
    }
}

/// A single-object payload that arrives either bare or wrapped in `{ "data": {...} }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemEnvelope<T> {
    /// `{ "data": {...} }`
    Wrapped { data: T },
    /// `{...}`
    Bare(T),
}

impl<T> ItemEnvelope<T> {
    /// Unwrap into the contained item
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(item) => item,
        }
    }
}
