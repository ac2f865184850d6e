//! Strongly-typed identifiers for ledger entities
//!
//! Students and payments are both keyed by UUIDs; wrapping them keeps a
//! payment id from ever being looked up as a student id. The human-readable
//! admission number is a separate attribute, not an identifier.
//!
//! Ids display with a short kind tag (`STU-…`, `PAY-…`) for receipts and
//! logs, but serialize as the bare UUID so snapshots stay tag-free.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors from parsing a displayed identifier
#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Expected a {expected} id, got a {found} id")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Malformed id: {0}")]
    Malformed(#[from] uuid::Error),
}

const KIND_TAGS: [&str; 2] = ["STU", "PAY"];

/// Declares an id newtype with its display tag
macro_rules! ledger_id {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[derive(Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Random id, used for records entered by hand
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Time-ordered id, used where ids are minted in arrival order
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// The kind tag shown before the UUID
            pub fn prefix() -> &'static str {
                $tag
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $tag, self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            /// Accepts the tagged form or a bare UUID
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let raw = match s.split_once('-') {
                    Some((tag, rest)) if tag == $tag => rest,
                    Some((tag, _)) => match KIND_TAGS.iter().copied().find(|k| *k == tag) {
                        Some(found) => {
                            return Err(IdError::WrongKind {
                                expected: $tag,
                                found,
                            })
                        }
                        None => s,
                    },
                    None => s,
                };
                Ok(Self(Uuid::parse_str(raw)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

ledger_id!(
    /// Identifies one enrolled student's fee record
    StudentId,
    "STU"
);

ledger_id!(
    /// Identifies one payment received at the bursary
    PaymentId,
    "PAY"
);
