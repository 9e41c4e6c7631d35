//! # Id
//!
//! Store-assigned document identifiers and their external string form.
//!
//! Internally an identifier is the document store's 12-byte object id. Callers only
//! ever see the external form: exactly 24 lowercase hexadecimal characters.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use bson::oid::ObjectId;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Unexpected};

/// A document identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(ObjectId);

/// Errors that can occur when parsing an `Id` from a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    /// The string is not 24 lowercase hexadecimal characters.
    #[error("invalid id string `{0}`")]
    InvalidString(String),
}

impl Id {
    /// Length of the external string form.
    pub const ENCODED_LEN: usize = 24;

    /// Wraps a store object id.
    #[must_use]
    pub const fn new(id: ObjectId) -> Self {
        Self(id)
    }

    /// Allocates a fresh identifier.
    ///
    /// Object ids embed a timestamp, a per-process random value and a counter, so
    /// identifiers generated here never collide with ones assigned by the store.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Decodes the external string form.
    ///
    /// # Errors
    ///
    /// Returns [`ParseIdError::InvalidString`] if the input has the wrong length or
    /// contains anything other than lowercase hexadecimal digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_common::id::Id;
    ///
    /// let id = Id::decode("65f1c0a2b3d4e5f601234567").unwrap();
    /// assert_eq!(id.encode(), "65f1c0a2b3d4e5f601234567");
    /// assert!(Id::decode("not-a-valid-id").is_err());
    /// ```
    pub fn decode<S: AsRef<str>>(input: S) -> Result<Self, ParseIdError> {
        let input = input.as_ref();
        if !crate::regex!("^[0-9a-f]{24}$").is_match(input) {
            return Err(ParseIdError::InvalidString(input.into()));
        }
        ObjectId::parse_str(input)
            .map(Self)
            .map_err(|_| ParseIdError::InvalidString(input.into()))
    }

    /// Encodes into the external string form.
    #[must_use]
    pub fn encode(&self) -> String {
        self.0.to_hex()
    }

    /// Returns the underlying store object id.
    #[must_use]
    pub const fn object_id(self) -> ObjectId {
        self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl From<ObjectId> for Id {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl From<Id> for ObjectId {
    fn from(id: Id) -> Self {
        id.0
    }
}

#[cfg(feature = "serde")]
impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let value = String::deserialize(deserializer)?;
        Self::decode(&value).map_err(|_| {
            <D as Deserializer<'de>>::Error::invalid_value(Unexpected::Str(value.as_str()), &"Id")
        })
    }
}
