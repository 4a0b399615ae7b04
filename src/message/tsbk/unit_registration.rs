// Unit registration response (U_REG_RSP)

use super::{check_fields, TsbkBlock, TsbkDecode};
use crate::bits::field;
use crate::identifier::{Identifier, Radio, SystemId};
use crate::message::{Message, MessageContext};
use crate::reference::{Opcode, Response};
use std::fmt;
use std::sync::OnceLock;

const RESPONSE: [usize; 2] = field(18);
const SYSTEM: [usize; 12] = field(20);
const SOURCE_ID: [usize; 24] = field(32);
const SOURCE_ADDRESS: [usize; 24] = field(56);

check_fields!(RESPONSE, SYSTEM, SOURCE_ID, SOURCE_ADDRESS);

#[derive(Debug)]
struct Fields {
    response: Response,
    system: SystemId,
    source_id: Radio,
    source_address: Radio,
    identifiers: Vec<Identifier>,
}

/// Unit registration response.
///
/// `source_id` is the identity the unit registered with; `source_address` is
/// the working unit address the system assigned to it.
#[derive(Debug)]
pub struct UnitRegistrationResponse {
    block: TsbkBlock,
    fields: OnceLock<Fields>,
}

impl UnitRegistrationResponse {
    fn fields(&self) -> &Fields {
        self.fields.get_or_init(|| {
            let system = SystemId::create(self.block.int(&SYSTEM));
            let source_id = Radio::create_any(self.block.int(&SOURCE_ID));
            let source_address = Radio::create_to(self.block.int(&SOURCE_ADDRESS));

            Fields {
                response: Response::from_value(self.block.int(&RESPONSE)),
                system,
                source_id,
                source_address,
                identifiers: vec![system.into(), source_id.into(), source_address.into()],
            }
        })
    }

    pub fn response(&self) -> Response {
        self.fields().response
    }

    pub fn system(&self) -> SystemId {
        self.fields().system
    }

    pub fn source_id(&self) -> Radio {
        self.fields().source_id
    }

    pub fn source_address(&self) -> Radio {
        self.fields().source_address
    }
}

impl TsbkDecode for UnitRegistrationResponse {
    const OPCODE: Opcode = Opcode::UnitRegistrationResponse;

    fn from_block(block: TsbkBlock) -> Self {
        Self {
            block,
            fields: OnceLock::new(),
        }
    }
}

impl Message for UnitRegistrationResponse {
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

impl fmt::Display for UnitRegistrationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.block.write_stub(f, self.label())?;
        write!(
            f,
            " TO:{} ID:{} SYSTEM:{} RESPONSE:{}",
            self.source_address(),
            self.source_id(),
            self.system(),
            self.response()
        )
    }
}

crate::register_decoder!(UnitRegistrationResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::tsbk::test_support::{context, sealed_tsbk};

    #[test]
    fn test_unit_registration() {
        let bits = sealed_tsbk(
            Opcode::UnitRegistrationResponse,
            &[(18..20, 0), (20..32, 0x1A3), (32..56, 900_001), (56..80, 4_321)],
        );
        let msg = UnitRegistrationResponse::from_block(TsbkBlock::new(context(), bits, true).unwrap());

        assert_eq!(msg.response(), Response::Accept);
        assert_eq!(msg.system().value(), Some(0x1A3));
        assert_eq!(msg.source_id().value(), Some(900_001));
        assert_eq!(msg.source_address().value(), Some(4_321));
        assert_eq!(
            msg.to_string(),
            "NAC:293 TSBK U_REG_RSP TO:4321 ID:900001 SYSTEM:1A3 RESPONSE:ACCEPT"
        );
    }
}
