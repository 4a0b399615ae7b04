// Group affiliation response (GRP_AFF_RSP)

use super::{check_fields, TsbkBlock, TsbkDecode};
use crate::bits::field;
use crate::identifier::{Identifier, Radio, Talkgroup};
use crate::message::{Message, MessageContext};
use crate::reference::{Opcode, Response};
use std::fmt;
use std::sync::OnceLock;

const LOCAL_GLOBAL: usize = 16;
const RESPONSE: [usize; 2] = field(22);
const ANNOUNCEMENT_GROUP: [usize; 16] = field(24);
const GROUP_ADDRESS: [usize; 16] = field(40);
const TARGET_ADDRESS: [usize; 24] = field(56);

check_fields!(RESPONSE, ANNOUNCEMENT_GROUP, GROUP_ADDRESS, TARGET_ADDRESS);

#[derive(Debug)]
struct Fields {
    global: bool,
    response: Response,
    announcement_group: Talkgroup,
    group_address: Talkgroup,
    target_address: Radio,
    identifiers: Vec<Identifier>,
}

#[derive(Debug)]
pub struct GroupAffiliationResponse {
    block: TsbkBlock,
    fields: OnceLock<Fields>,
}

impl GroupAffiliationResponse {
    fn fields(&self) -> &Fields {
        self.fields.get_or_init(|| {
            let announcement_group = Talkgroup::create_any(self.block.int(&ANNOUNCEMENT_GROUP));
            let group_address = Talkgroup::create_to(self.block.int(&GROUP_ADDRESS));
            let target_address = Radio::create_to(self.block.int(&TARGET_ADDRESS));

            Fields {
                global: self.block.flag(LOCAL_GLOBAL),
                response: Response::from_value(self.block.int(&RESPONSE)),
                announcement_group,
                group_address,
                target_address,
                identifiers: vec![
                    target_address.into(),
                    group_address.into(),
                    announcement_group.into(),
                ],
            }
        })
    }

    /// True when the affiliation is valid system-wide rather than at this site only
    pub fn is_global(&self) -> bool {
        self.fields().global
    }

    pub fn response(&self) -> Response {
        self.fields().response
    }

    pub fn announcement_group(&self) -> Talkgroup {
        self.fields().announcement_group
    }

    pub fn group_address(&self) -> Talkgroup {
        self.fields().group_address
    }

    pub fn target_address(&self) -> Radio {
        self.fields().target_address
    }
}

impl TsbkDecode for GroupAffiliationResponse {
    const OPCODE: Opcode = Opcode::GroupAffiliationResponse;

    fn from_block(block: TsbkBlock) -> Self {
        Self {
            block,
            fields: OnceLock::new(),
        }
    }
}

impl Message for GroupAffiliationResponse {
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

impl fmt::Display for GroupAffiliationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.block.write_stub(f, self.label())?;
        write!(
            f,
            " TO:{} GROUP:{} ANNOUNCEMENT GROUP:{} AFFILIATION:{} RESPONSE:{}",
            self.target_address(),
            self.group_address(),
            self.announcement_group(),
            if self.is_global() { "GLOBAL" } else { "LOCAL" },
            self.response()
        )
    }
}

crate::register_decoder!(GroupAffiliationResponse);
