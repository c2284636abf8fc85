//! Opaque document identifiers.
//!
//! Every record in the document store is keyed by a [`DocumentId`]. Clients
//! must treat these as opaque tokens: compare them for equality and pass
//! them back to the API, never construct or inspect their internals.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing a [`DocumentId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input is not the expected length.
    #[error("identifier must be {expected} characters, got {got}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Actual length of the input.
        got: usize,
    },
    /// The input contains a non-hex character.
    #[error("identifier must contain only hex characters")]
    NotHex,
}

/// An opaque identifier assigned by the document store.
///
/// Rendered as a fixed-length lowercase hex string (32 characters).
/// Parsing accepts hex in either case but rejects every other shape, so a
/// malformed id from a client fails before it ever reaches the store.
///
/// ## Examples
///
/// ```
/// use orchard_core::DocumentId;
///
/// let id = DocumentId::generate();
/// let parsed = DocumentId::parse(&id.to_string()).unwrap();
/// assert_eq!(parsed, id);
///
/// assert!(DocumentId::parse("not-an-id").is_err());
/// assert!(DocumentId::parse("").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Length of the rendered form.
    pub const LENGTH: usize = 32;

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a `DocumentId` from its rendered form.
    ///
    /// # Errors
    ///
    /// Returns [`IdError`] if the input is not exactly 32 hex characters.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.len() != Self::LENGTH {
            return Err(IdError::WrongLength {
                expected: Self::LENGTH,
                got: s.len(),
            });
        }

        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(IdError::NotHex);
        }

        // 32 hex digits always form a valid UUID in simple form.
        Uuid::try_parse(s).map(Self).map_err(|_| IdError::NotHex)
    }

    /// Get the underlying UUID (for store backends that key on UUID).
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl std::str::FromStr for DocumentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.to_string()
    }
}
