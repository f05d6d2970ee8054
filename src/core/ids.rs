//! Player and team identifiers.
//!
//! ## PlayerKey
//!
//! The short key a roster uses for a player (usually initials, e.g. `"MSD"`).
//! Keys are trimmed on construction and compared exactly.
//!
//! ## TeamCode
//!
//! Team identifiers are case-insensitive: `TeamCode::new("CSK")` and
//! `TeamCode::new("csk")` are the same team. Display is upper case.

use serde::{Deserialize, Serialize};

/// Roster key identifying a player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerKey(pub String);

impl PlayerKey {
    /// Create a new player key, trimming surrounding whitespace.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(key.as_ref().trim().to_string())
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the key is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Case-insensitive team identifier, stored lower case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamCode(String);

impl TeamCode {
    /// Create a new team code. Input is trimmed and lower-cased.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    /// Lower-case form, as used for roster lookup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case form, as used in messages.
    #[must_use]
    pub fn upper(&self) -> String {
        self.0.to_uppercase()
    }
}

impl std::fmt::Display for TeamCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.upper())
    }
}

impl From<&str> for TeamCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}
