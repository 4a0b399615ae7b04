// Serializable snapshot of a decoded message for event logs

use super::{Message, Result};
use crate::identifier::Identifier;
use crate::reference::DataUnitId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub data_unit: DataUnitId,
    pub nac: u16,
    pub timestamp: u64,
    pub opcode: u8,
    pub label: String,
    pub valid: bool,

    #[serde(default)]
    pub identifiers: Vec<Identifier>,

    /// Canonical text rendering at capture time
    #[serde(default)]
    pub text: String,
}

impl MessageRecord {
    pub fn from_message<M: Message + ?Sized>(message: &M) -> Self {
        Self {
            data_unit: message.data_unit(),
            nac: message.nac(),
            timestamp: message.timestamp(),
            opcode: message.opcode(),
            label: message.label().to_string(),
            valid: message.is_valid(),
            identifiers: message.identifiers().to_vec(),
            text: message.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
