// Radio unit and talkgroup addresses
//
// Both kinds share one parser: a fixed field width plus one reserved all-ones
// pattern that means "all units" / "all talkgroups". The role tags the same
// raw field as source, destination or undirected depending on the message.

use super::{check_width, IdentifierKind, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction an address plays within a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    From,
    To,
    #[default]
    Any,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::From => f.write_str("FROM"),
            Role::To => f.write_str("TO"),
            Role::Any => f.write_str("ANY"),
        }
    }
}

/// Decoded address value: either the wildcard or a literal unit/group number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Address {
    Any,
    Value(u32),
}

impl Address {
    fn parse(kind: IdentifierKind, raw: u32, bits: u32, wildcard: u32) -> Result<Self> {
        let raw = check_width(kind, raw, bits)?;
        if raw == wildcard {
            Ok(Address::Any)
        } else {
            Ok(Address::Value(raw))
        }
    }

    fn parse_or_any(kind: IdentifierKind, raw: u32, bits: u32, wildcard: u32) -> Self {
        Self::parse(kind, raw, bits, wildcard).unwrap_or_else(|err| {
            tracing::warn!("{}, substituting ANY", err);
            Address::Any
        })
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Address::Any)
    }

    /// Literal value, `None` for the wildcard
    pub fn value(&self) -> Option<u32> {
        match self {
            Address::Any => None,
            Address::Value(v) => Some(*v),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Any => f.write_str("ANY"),
            Address::Value(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! address_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $bits:expr, $wildcard:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name {
            address: Address,
            role: Role,
        }

        impl $name {
            /// Field width in bits
            pub const BITS: u32 = $bits;

            /// Reserved raw value meaning "all"
            pub const WILDCARD: u32 = $wildcard;

            /// Validate `raw` and tag it with `role`
            pub fn try_create(raw: u32, role: Role) -> Result<Self> {
                Ok(Self {
                    address: Address::parse($kind, raw, Self::BITS, Self::WILDCARD)?,
                    role,
                })
            }

            /// Like `try_create`, but an out-of-range value becomes the wildcard
            pub fn create(raw: u32, role: Role) -> Self {
                Self {
                    address: Address::parse_or_any($kind, raw, Self::BITS, Self::WILDCARD),
                    role,
                }
            }

            pub fn create_from(raw: u32) -> Self {
                Self::create(raw, Role::From)
            }

            pub fn create_to(raw: u32) -> Self {
                Self::create(raw, Role::To)
            }

            pub fn create_any(raw: u32) -> Self {
                Self::create(raw, Role::Any)
            }

            pub fn address(&self) -> Address {
                self.address
            }

            pub fn role(&self) -> Role {
                self.role
            }

            pub fn is_any(&self) -> bool {
                self.address.is_any()
            }

            pub fn value(&self) -> Option<u32> {
                self.address.value()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.address)
            }
        }
    };
}

address_identifier!(
    /// 24-bit radio unit address; `0xFFFFFF` addresses all units
    Radio,
    IdentifierKind::Radio,
    24,
    0xFF_FFFF
);

address_identifier!(
    /// 16-bit talkgroup address; `0xFFFF` addresses all talkgroups
    Talkgroup,
    IdentifierKind::Talkgroup,
    16,
    0xFFFF
);
