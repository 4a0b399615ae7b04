// Typed identifiers decoded from message fields
//
// Every identifier is immutable once built. Factories take the raw field value
// and either validate it (`try_create`) or degrade an invalid value to the
// kind's ANY/UNKNOWN sentinel (`create`) so a single bad field never aborts a
// message decode.

pub mod address;
pub mod channel;
pub mod network;

pub use address::{Address, Radio, Role, Talkgroup};
pub use channel::{Channel, FrequencyBand};
pub use network::{Lra, Rfss, Site, SystemId, Wacn};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Invalid {kind} value {value:#x} for a {bits} bit field")]
    InvalidFieldValue {
        kind: IdentifierKind,
        value: u32,
        bits: u32,
    },
}

pub type Result<T> = std::result::Result<T, IdentifierError>;

/// Semantic kind of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierKind {
    Radio,
    Talkgroup,
    Site,
    Rfss,
    System,
    Wacn,
    Lra,
    Channel,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentifierKind::Radio => "RADIO",
            IdentifierKind::Talkgroup => "TALKGROUP",
            IdentifierKind::Site => "SITE",
            IdentifierKind::Rfss => "RFSS",
            IdentifierKind::System => "SYSTEM",
            IdentifierKind::Wacn => "WACN",
            IdentifierKind::Lra => "LRA",
            IdentifierKind::Channel => "CHANNEL",
        };
        f.write_str(name)
    }
}

/// Check that `raw` fits in `bits` bits
pub(crate) fn check_width(kind: IdentifierKind, raw: u32, bits: u32) -> Result<u32> {
    if bits < 32 && raw >> bits != 0 {
        return Err(IdentifierError::InvalidFieldValue {
            kind,
            value: raw,
            bits,
        });
    }
    Ok(raw)
}

/// A single decoded domain value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identifier {
    Radio(Radio),
    Talkgroup(Talkgroup),
    Site(Site),
    Rfss(Rfss),
    System(SystemId),
    Wacn(Wacn),
    Lra(Lra),
    /// Channel reference; resolves to a frequency through a [`FrequencyBand`]
    Channel(Channel),
}

impl Identifier {
    pub fn kind(&self) -> IdentifierKind {
        match self {
            Identifier::Radio(_) => IdentifierKind::Radio,
            Identifier::Talkgroup(_) => IdentifierKind::Talkgroup,
            Identifier::Site(_) => IdentifierKind::Site,
            Identifier::Rfss(_) => IdentifierKind::Rfss,
            Identifier::System(_) => IdentifierKind::System,
            Identifier::Wacn(_) => IdentifierKind::Wacn,
            Identifier::Lra(_) => IdentifierKind::Lra,
            Identifier::Channel(_) => IdentifierKind::Channel,
        }
    }

    /// Directionality of address identifiers; everything else is `Role::Any`
    pub fn role(&self) -> Role {
        match self {
            Identifier::Radio(radio) => radio.role(),
            Identifier::Talkgroup(talkgroup) => talkgroup.role(),
            _ => Role::Any,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Radio(v) => write!(f, "{}", v),
            Identifier::Talkgroup(v) => write!(f, "{}", v),
            Identifier::Site(v) => write!(f, "{}", v),
            Identifier::Rfss(v) => write!(f, "{}", v),
            Identifier::System(v) => write!(f, "{}", v),
            Identifier::Wacn(v) => write!(f, "{}", v),
            Identifier::Lra(v) => write!(f, "{}", v),
            Identifier::Channel(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_from_identifier {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Identifier {
                fn from(value: $ty) -> Self {
                    Identifier::$variant(value)
                }
            }
        )*
    };
}

impl_from_identifier!(
    Radio(Radio),
    Talkgroup(Talkgroup),
    Site(Site),
    Rfss(Rfss),
    System(SystemId),
    Wacn(Wacn),
    Lra(Lra),
    Channel(Channel),
);
