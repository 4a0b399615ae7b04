// Location registration response (LOC_REG_RSP)

use super::{check_fields, TsbkBlock, TsbkDecode};
use crate::bits::field;
use crate::identifier::{Identifier, Radio, Rfss, Site, Talkgroup};
use crate::message::{Message, MessageContext};
use crate::reference::{Opcode, Response};
use std::fmt;
use std::sync::OnceLock;

const RESPONSE: [usize; 2] = field(22);
const GROUP_ADDRESS: [usize; 16] = field(24);
const RFSS: [usize; 8] = field(40);
const SITE: [usize; 8] = field(48);
const TARGET_ADDRESS: [usize; 24] = field(56);

check_fields!(RESPONSE, GROUP_ADDRESS, RFSS, SITE, TARGET_ADDRESS);

#[derive(Debug)]
struct Fields {
    response: Response,
    group_address: Talkgroup,
    rfss: Rfss,
    site: Site,
    target_address: Radio,
    identifiers: Vec<Identifier>,
}

/// Location registration response
#[derive(Debug)]
pub struct LocationRegistrationResponse {
    block: TsbkBlock,
    fields: OnceLock<Fields>,
}

impl LocationRegistrationResponse {
    fn fields(&self) -> &Fields {
        self.fields.get_or_init(|| {
            let group_address = Talkgroup::create_any(self.block.int(&GROUP_ADDRESS));
            let rfss = Rfss::create(self.block.int(&RFSS));
            let site = Site::create(self.block.int(&SITE));
            let target_address = Radio::create_to(self.block.int(&TARGET_ADDRESS));

            Fields {
                response: Response::from_value(self.block.int(&RESPONSE)),
                group_address,
                rfss,
                site,
                target_address,
                identifiers: vec![
                    group_address.into(),
                    rfss.into(),
                    site.into(),
                    target_address.into(),
                ],
            }
        })
    }

    pub fn response(&self) -> Response {
        self.fields().response
    }

    pub fn group_address(&self) -> Talkgroup {
        self.fields().group_address
    }

    pub fn rfss(&self) -> Rfss {
        self.fields().rfss
    }

    pub fn site(&self) -> Site {
        self.fields().site
    }

    pub fn target_address(&self) -> Radio {
        self.fields().target_address
    }
}

impl TsbkDecode for LocationRegistrationResponse {
    const OPCODE: Opcode = Opcode::LocationRegistrationResponse;

    fn from_block(block: TsbkBlock) -> Self {
        Self {
            block,
            fields: OnceLock::new(),
        }
    }
}

impl Message for LocationRegistrationResponse {
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

impl fmt::Display for LocationRegistrationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.block.write_stub(f, self.label())?;
        write!(
            f,
            " TO:{} GROUP:{} RFSS:{} SITE:{} RESPONSE:{}",
            self.target_address(),
            self.group_address(),
            self.rfss(),
            self.site(),
            self.response()
        )
    }
}

crate::register_decoder!(LocationRegistrationResponse);
