// Deny response (DENY_RSP)

use super::{check_fields, TsbkBlock, TsbkDecode};
use crate::bits::field;
use crate::identifier::{Identifier, Radio, Talkgroup};
use crate::message::{Message, MessageContext};
use crate::reference::{DenyReason, InboundOpcode, Opcode};
use std::fmt;
use std::sync::OnceLock;

const ADDITIONAL_INFO_VALID: usize = 16;
const SERVICE_TYPE: [usize; 6] = field(18);
const REASON: [usize; 8] = field(24);
const ADDITIONAL_INFO: [usize; 24] = field(32);
const ADDITIONAL_GROUP: [usize; 16] = field(40);
const TARGET_ADDRESS: [usize; 24] = field(56);

check_fields!(SERVICE_TYPE, REASON, ADDITIONAL_INFO, ADDITIONAL_GROUP, TARGET_ADDRESS);

/// Service types whose additional info field carries a talkgroup
const GROUP_SERVICES: std::ops::RangeInclusive<u8> = 0x00..=0x03;

#[derive(Debug)]
struct Fields {
    service_type: u8,
    reason: DenyReason,
    additional: Option<Identifier>,
    target_address: Radio,
    identifiers: Vec<Identifier>,
}

#[derive(Debug)]
pub struct DenyResponse {
    block: TsbkBlock,
    fields: OnceLock<Fields>,
}

impl DenyResponse {
    fn fields(&self) -> &Fields {
        self.fields.get_or_init(|| {
            let service_type = self.block.int(&SERVICE_TYPE) as u8;
            let target_address = Radio::create_to(self.block.int(&TARGET_ADDRESS));

            let additional: Option<Identifier> = if self.block.flag(ADDITIONAL_INFO_VALID) {
                if GROUP_SERVICES.contains(&service_type) {
                    Some(Talkgroup::create_from(self.block.int(&ADDITIONAL_GROUP)).into())
                } else {
                    Some(Radio::create_from(self.block.int(&ADDITIONAL_INFO)).into())
                }
            } else {
                None
            };

            let mut identifiers = vec![target_address.into()];
            identifiers.extend(additional);

            Fields {
                service_type,
                reason: DenyReason::from_value(self.block.int(&REASON)),
                additional,
                target_address,
                identifiers,
            }
        })
    }

    /// Inbound opcode of the denied service request
    pub fn service_type(&self) -> InboundOpcode {
        InboundOpcode::from_value(self.fields().service_type)
    }

    pub fn reason(&self) -> DenyReason {
        self.fields().reason
    }

    /// Requesting talkgroup or radio, present only when the AIV flag is set
    pub fn additional(&self) -> Option<Identifier> {
        self.fields().additional
    }

    pub fn target_address(&self) -> Radio {
        self.fields().target_address
    }
}

impl TsbkDecode for DenyResponse {
    const OPCODE: Opcode = Opcode::DenyResponse;

    fn from_block(block: TsbkBlock) -> Self {
        Self {
            block,
            fields: OnceLock::new(),
        }
    }
}

impl Message for DenyResponse {
    fn context(&self) -> &MessageContext {
        self.block.context()
    }

    fn opcode(&self) -> u8 {
        Self::OPCODE.value()
    }

    fn label(&self) -> &'static str {
        Self::OPCODE.label()
    }

    fn identifiers(&self) -> &[Identifier] {
        &self.fields().identifiers
    }

    fn is_valid(&self) -> bool {
        self.block.is_valid()
    }
}

impl fmt::Display for DenyResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.block.write_stub(f, self.label())?;
        write!(f, " TO:{}", self.target_address())?;
        if let Some(additional) = self.additional() {
            write!(f, " FROM:{}", additional)?;
        }
        write!(
            f,
            " SERVICE:{} REASON:{}",
            self.service_type(),
            self.reason()
        )
    }
}

crate::register_decoder!(DenyResponse);
