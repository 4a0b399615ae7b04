// Network topology identifiers: site, RFSS, system, WACN and LRA
// None of these kinds reserve a wildcard pattern; an out-of-range value decodes as UNKNOWN.

use super::{check_width, IdentifierKind, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! network_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $bits:expr, $format:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name {
            value: Option<u32>,
        }

        impl $name {
            pub const BITS: u32 = $bits;

            pub fn try_create(raw: u32) -> Result<Self> {
                Ok(Self {
                    value: Some(check_width($kind, raw, Self::BITS)?),
                })
            }

            pub fn create(raw: u32) -> Self {
                Self::try_create(raw).unwrap_or_else(|err| {
                    tracing::warn!("{}, substituting UNKNOWN", err);
                    Self::UNKNOWN
                })
            }

            pub const UNKNOWN: Self = Self { value: None };

            pub fn value(&self) -> Option<u32> {
                self.value
            }

            pub fn is_unknown(&self) -> bool {
                self.value.is_none()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.value {
                    Some(v) => write!(f, $format, v),
                    None => f.write_str("UNKNOWN"),
                }
            }
        }
    };
}

network_identifier!(
    /// Site number within an RFSS
    Site,
    IdentifierKind::Site,
    8,
    "{}"
);

network_identifier!(
    /// Radio frequency subsystem number
    Rfss,
    IdentifierKind::Rfss,
    8,
    "{}"
);

network_identifier!(
    /// System id, rendered in hex
    SystemId,
    IdentifierKind::System,
    12,
    "{:03X}"
);

network_identifier!(
    /// Wide area communications network id, rendered in hex
    Wacn,
    IdentifierKind::Wacn,
    20,
    "{:05X}"
);

network_identifier!(
    /// Location registration area
    Lra,
    IdentifierKind::Lra,
    8,
    "{}"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_and_rfss() {
        assert_eq!(Site::create(7).to_string(), "7");
        assert_eq!(Rfss::create(3).value(), Some(3));
        assert!(Site::try_create(256).is_err());
        assert!(Site::create(256).is_unknown());
        assert_eq!(Site::create(256).to_string(), "UNKNOWN");
    }

    #[test]
    fn test_hex_rendering() {
        assert_eq!(SystemId::create(0x1A3).to_string(), "1A3");
        assert_eq!(SystemId::create(0x1).to_string(), "001");
        assert_eq!(Wacn::create(0xBEE00).to_string(), "BEE00");
        assert!(Wacn::try_create(0x10_0000).is_err());
    }
}
