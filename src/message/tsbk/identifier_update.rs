// Identifier update (IDEN_UP): channel plan for one frequency band id

use super::{check_fields, TsbkBlock, TsbkDecode};
use crate::bits::field;
use crate::identifier::{FrequencyBand, Identifier};
use crate::message::{Message, MessageContext};
use crate::reference::Opcode;
use std::fmt;
use std::sync::OnceLock;

const IDENTIFIER: [usize; 4] = field(16);
const BANDWIDTH: [usize; 9] = field(20);
const TRANSMIT_OFFSET_SIGN: usize = 29;
const TRANSMIT_OFFSET: [usize; 8] = field(30);
const CHANNEL_SPACING: [usize; 10] = field(38);
const BASE_FREQUENCY: [usize; 32] = field(48);

check_fields!(IDENTIFIER, BANDWIDTH, TRANSMIT_OFFSET, CHANNEL_SPACING, BASE_FREQUENCY);

#[derive(Debug)]
pub struct IdentifierUpdate {
    block: TsbkBlock,
    band: OnceLock<FrequencyBand>,
}

impl IdentifierUpdate {
    /// Band announced by this message; channels carrying the same id resolve against it
    pub fn frequency_band(&self) -> &FrequencyBand {
        self.band.get_or_init(|| {
            FrequencyBand::from_fields(
                self.block.int(&IDENTIFIER),
                self.block.int(&BANDWIDTH),
                self.block.flag(TRANSMIT_OFFSET_SIGN),
                self.block.int(&TRANSMIT_OFFSET),
                self.block.int(&CHANNEL_SPACING),
                self.block.int(&BASE_FREQUENCY),
            )
        })
    }
}

impl TsbkDecode for IdentifierUpdate {
    const OPCODE: Opcode = Opcode::IdentifierUpdate;

    fn from_block(block: TsbkBlock) -> Self {
        Self {
            block,
            band: OnceLock::new(),
        }
    }
}

impl Message for IdentifierUpdate {
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
        &[]
    }

    fn is_valid(&self) -> bool {
        self.block.is_valid()
    }
}

impl fmt::Display for IdentifierUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let band = self.frequency_band();
        self.block.write_stub(f, self.label())?;
        write!(
            f,
            " ID:{} BASE:{} SPACING:{} OFFSET:{} BANDWIDTH:{}",
            band.id(),
            band.base_frequency(),
            band.channel_spacing(),
            band.transmit_offset(),
            band.bandwidth()
        )
    }
}

crate::register_decoder!(IdentifierUpdate);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Channel;
    use crate::message::tsbk::test_support::{context, sealed_tsbk};

    // 851.00625 MHz base, 6.25 kHz spacing, -45 MHz offset, 12.5 kHz bandwidth
    fn message() -> IdentifierUpdate {
        let bits = sealed_tsbk(
            Opcode::IdentifierUpdate,
            &[
                (16..20, 1),
                (20..29, 100),
                (29..30, 0),
                (30..38, 180),
                (38..48, 50),
                (48..80, 170_201_250),
            ],
        );
        IdentifierUpdate::from_block(TsbkBlock::new(context(), bits, true).unwrap())
    }

    #[test]
    fn test_frequency_band() {
        let msg = message();
        let band = msg.frequency_band();

        assert_eq!(band.id(), 1);
        assert_eq!(band.base_frequency(), 851_006_250);
        assert_eq!(band.channel_spacing(), 6_250);
        assert_eq!(band.transmit_offset(), -45_000_000);
        assert_eq!(band.bandwidth(), 12_500);
        assert!(msg.identifiers().is_empty());
    }

    #[test]
    fn test_channel_resolution() {
        let msg = message();
        let channel = Channel::new(1, 10).unwrap();
        assert_eq!(channel.downlink_frequency(msg.frequency_band()), Some(851_068_750));
        assert_eq!(channel.uplink_frequency(msg.frequency_band()), Some(806_068_750));
        assert_eq!(Channel::new(2, 10).unwrap().downlink_frequency(msg.frequency_band()), None);
    }

    #[test]
    fn test_rendering() {
        assert_eq!(
            message().to_string(),
            "NAC:293 TSBK IDEN_UP ID:1 BASE:851006250 SPACING:6250 OFFSET:-45000000 BANDWIDTH:12500"
        );
    }
}
