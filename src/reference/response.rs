// Response and deny reason codes returned by the FNE

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2-bit response code carried by registration and affiliation responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Response {
    Accept,
    Fail,
    Deny,
    Refused,
    Unknown,
}

impl Response {
    pub fn from_value(value: u32) -> Self {
        match value {
            0 => Response::Accept,
            1 => Response::Fail,
            2 => Response::Deny,
            3 => Response::Refused,
            _ => Response::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Response::Accept => "ACCEPT",
            Response::Fail => "FAIL",
            Response::Deny => "DENY",
            Response::Refused => "REFUSED",
            Response::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 8-bit reason code carried by a deny response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenyReason {
    RequestingUnitNotValid,
    RequestingUnitNotAuthorizedForService,
    TargetUnitNotValid,
    TargetUnitNotAuthorizedForService,
    TargetUnitRefusedCall,
    TargetGroupNotValid,
    TargetGroupNotAuthorizedForService,
    InvalidDialingString,
    TelephoneNumberNotAuthorized,
    PstnNotValid,
    CallTimeout,
    LandlineTerminatedCall,
    SubscriberUnitTerminatedCall,
    CallPreempted,
    SiteAccessDenial,
    CallOptionsNotValid,
    ProtectionServiceOptionNotValid,
    DuplexServiceOptionNotValid,
    CircuitOrPacketModeServiceOptionNotValid,
    SystemDoesNotSupportService,
    Unknown(u8),
}

impl DenyReason {
    pub fn from_value(value: u32) -> Self {
        match value {
            0x10 => DenyReason::RequestingUnitNotValid,
            0x11 => DenyReason::RequestingUnitNotAuthorizedForService,
            0x20 => DenyReason::TargetUnitNotValid,
            0x21 => DenyReason::TargetUnitNotAuthorizedForService,
            0x2F => DenyReason::TargetUnitRefusedCall,
            0x30 => DenyReason::TargetGroupNotValid,
            0x31 => DenyReason::TargetGroupNotAuthorizedForService,
            0x40 => DenyReason::InvalidDialingString,
            0x41 => DenyReason::TelephoneNumberNotAuthorized,
            0x42 => DenyReason::PstnNotValid,
            0x50 => DenyReason::CallTimeout,
            0x51 => DenyReason::LandlineTerminatedCall,
            0x52 => DenyReason::SubscriberUnitTerminatedCall,
            0x5F => DenyReason::CallPreempted,
            0x60 => DenyReason::SiteAccessDenial,
            0x61 => DenyReason::CallOptionsNotValid,
            0x62 => DenyReason::ProtectionServiceOptionNotValid,
            0x63 => DenyReason::DuplexServiceOptionNotValid,
            0x64 => DenyReason::CircuitOrPacketModeServiceOptionNotValid,
            0x65 => DenyReason::SystemDoesNotSupportService,
            other => DenyReason::Unknown((other & 0xFF) as u8),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DenyReason::RequestingUnitNotValid => "REQUESTING UNIT NOT VALID",
            DenyReason::RequestingUnitNotAuthorizedForService => {
                "REQUESTING UNIT NOT AUTHORIZED FOR SERVICE"
            }
            DenyReason::TargetUnitNotValid => "TARGET UNIT NOT VALID",
            DenyReason::TargetUnitNotAuthorizedForService => {
                "TARGET UNIT NOT AUTHORIZED FOR SERVICE"
            }
            DenyReason::TargetUnitRefusedCall => "TARGET UNIT REFUSED CALL",
            DenyReason::TargetGroupNotValid => "TARGET GROUP NOT VALID",
            DenyReason::TargetGroupNotAuthorizedForService => {
                "TARGET GROUP NOT AUTHORIZED FOR SERVICE"
            }
            DenyReason::InvalidDialingString => "INVALID DIALING STRING",
            DenyReason::TelephoneNumberNotAuthorized => "TELEPHONE NUMBER NOT AUTHORIZED",
            DenyReason::PstnNotValid => "PSTN NOT VALID",
            DenyReason::CallTimeout => "CALL TIMEOUT",
            DenyReason::LandlineTerminatedCall => "LANDLINE TERMINATED CALL",
            DenyReason::SubscriberUnitTerminatedCall => "SUBSCRIBER UNIT TERMINATED CALL",
            DenyReason::CallPreempted => "CALL PREEMPTED",
            DenyReason::SiteAccessDenial => "SITE ACCESS DENIAL",
            DenyReason::CallOptionsNotValid => "CALL OPTIONS NOT VALID",
            DenyReason::ProtectionServiceOptionNotValid => "PROTECTION SERVICE OPTION NOT VALID",
            DenyReason::DuplexServiceOptionNotValid => "DUPLEX SERVICE OPTION NOT VALID",
            DenyReason::CircuitOrPacketModeServiceOptionNotValid => {
                "CIRCUIT OR PACKET MODE SERVICE OPTION NOT VALID"
            }
            DenyReason::SystemDoesNotSupportService => "SYSTEM DOES NOT SUPPORT SERVICE",
            DenyReason::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::Unknown(v) => write!(f, "UNKNOWN REASON {:02X}", v),
            _ => f.write_str(self.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_table() {
        assert_eq!(Response::from_value(0), Response::Accept);
        assert_eq!(Response::from_value(3), Response::Refused);
        assert_eq!(Response::from_value(4), Response::Unknown);
        assert_eq!(Response::from_value(0).to_string(), "ACCEPT");
    }

    #[test]
    fn test_deny_reason_table() {
        assert_eq!(DenyReason::from_value(0x30), DenyReason::TargetGroupNotValid);
        assert_eq!(DenyReason::from_value(0x77), DenyReason::Unknown(0x77));
        assert_eq!(DenyReason::from_value(0x77).to_string(), "UNKNOWN REASON 77");
    }
}
