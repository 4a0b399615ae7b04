// TSBK opcodes, 6 bits. Outbound (FNE to subscriber) and inbound
// (subscriber to FNE) share the value space with different meanings.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opcodes {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:literal => $label:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant,)*
            Unknown(u8),
        }

        impl $name {
            pub fn from_value(value: u8) -> Self {
                match value {
                    $($value => $name::$variant,)*
                    other => $name::Unknown(other),
                }
            }

            pub const fn value(&self) -> u8 {
                match self {
                    $($name::$variant => $value,)*
                    $name::Unknown(v) => *v,
                }
            }

            pub const fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)*
                    $name::Unknown(_) => "UNKNOWN",
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $name::Unknown(v) => write!(f, "OPCODE-{:02X}", v),
                    _ => f.write_str(self.label()),
                }
            }
        }
    };
}

opcodes! {
    /// Control channel messages sent by the network
    Opcode {
        GroupVoiceChannelGrant = 0x00 => "GRP_V_CH_GRANT",
        GroupVoiceChannelGrantUpdate = 0x02 => "GRP_V_CH_GRANT_UPDT",
        GroupVoiceChannelGrantUpdateExplicit = 0x03 => "GRP_V_CH_GRANT_UPDT_EXP",
        UnitToUnitVoiceChannelGrant = 0x04 => "UU_V_CH_GRANT",
        UnitToUnitAnswerRequest = 0x05 => "UU_ANS_REQ",
        UnitToUnitVoiceChannelGrantUpdate = 0x06 => "UU_V_CH_GRANT_UPDT",
        TelephoneInterconnectChannelGrant = 0x08 => "TELE_INT_CH_GRANT",
        SndcpDataChannelGrant = 0x14 => "SN_DATA_CHN_GNT",
        AcknowledgeResponse = 0x20 => "ACK_RSP_FNE",
        QueuedResponse = 0x21 => "QUE_RSP",
        ExtendedFunctionCommand = 0x24 => "EXT_FNCT_CMD",
        DenyResponse = 0x27 => "DENY_RSP",
        GroupAffiliationResponse = 0x28 => "GRP_AFF_RSP",
        SecondaryControlChannelBroadcastExplicit = 0x29 => "SCCB_EXP",
        GroupAffiliationQuery = 0x2A => "GRP_AFF_Q",
        LocationRegistrationResponse = 0x2B => "LOC_REG_RSP",
        UnitRegistrationResponse = 0x2C => "U_REG_RSP",
        UnitRegistrationCommand = 0x2D => "U_REG_CMD",
        UnitDeregistrationAcknowledge = 0x2F => "U_DE_REG_ACK",
        IdentifierUpdateVhfUhf = 0x34 => "IDEN_UP_VU",
        TimeAndDateAnnouncement = 0x35 => "TIME_DATE_ANN",
        SystemServiceBroadcast = 0x38 => "SYS_SRV_BCST",
        SecondaryControlChannelBroadcast = 0x39 => "SCCB",
        RfssStatusBroadcast = 0x3A => "RFSS_STS_BCST",
        NetworkStatusBroadcast = 0x3B => "NET_STS_BCST",
        AdjacentStatusBroadcast = 0x3C => "ADJ_STS_BCST",
        IdentifierUpdate = 0x3D => "IDEN_UP",
    }
}

opcodes! {
    /// Service requests sent by subscriber units, as echoed in deny and queued responses
    InboundOpcode {
        GroupVoiceServiceRequest = 0x00 => "GRP_V_REQ",
        UnitToUnitVoiceServiceRequest = 0x04 => "UU_V_REQ",
        UnitToUnitAnswerResponse = 0x05 => "UU_ANS_RSP",
        TelephoneInterconnectExplicitDial = 0x08 => "TELE_INT_DIAL_REQ",
        TelephoneInterconnectPstnRequest = 0x09 => "TELE_INT_PSTN_REQ",
        TelephoneInterconnectAnswerResponse = 0x0A => "TELE_INT_ANS_RSP",
        SndcpDataChannelRequest = 0x12 => "SN_DATA_CHN_REQ",
        SndcpDataPageResponse = 0x13 => "SN_DATA_PAGE_RES",
        SndcpReconnectRequest = 0x14 => "SN_REC_REQ",
        StatusUpdateRequest = 0x18 => "STS_UPDT_REQ",
        StatusQueryResponse = 0x19 => "STS_Q_RSP",
        StatusQueryRequest = 0x1A => "STS_Q_REQ",
        MessageUpdateRequest = 0x1C => "MSG_UPDT_REQ",
        RadioUnitMonitorRequest = 0x1D => "RAD_MON_REQ",
        CallAlertRequest = 0x1F => "CALL_ALRT_REQ",
        AcknowledgeResponse = 0x20 => "ACK_RSP_U",
        CancelServiceRequest = 0x23 => "CAN_SRV_REQ",
        ExtendedFunctionResponse = 0x24 => "EXT_FNCT_RSP",
        EmergencyAlarmRequest = 0x27 => "EMRG_ALRM_REQ",
        GroupAffiliationRequest = 0x28 => "GRP_AFF_REQ",
        GroupAffiliationQueryResponse = 0x29 => "GRP_AFF_Q_RSP",
        UnitDeregistrationRequest = 0x2B => "U_DE_REG_REQ",
        UnitRegistrationRequest = 0x2C => "U_REG_REQ",
        LocationRegistrationRequest = 0x2D => "LOC_REG_REQ",
        IdentifierUpdateRequest = 0x32 => "IDEN_UP_REQ",
        RoamingAddressRequest = 0x36 => "ROAM_ADDR_REQ",
        RoamingAddressResponse = 0x37 => "ROAM_ADDR_RSP",
    }
}
