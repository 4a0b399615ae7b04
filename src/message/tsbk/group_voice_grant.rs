// Group voice channel grant (GRP_V_CH_GRANT) and grant update (GRP_V_CH_GRANT_UPDT)

use super::{check_fields, TsbkBlock, TsbkDecode};
use crate::bits::field;
use crate::identifier::{Channel, Identifier, Radio, Talkgroup};
use crate::message::{Message, MessageContext};
use crate::reference::{Opcode, ServiceOptions};
use std::fmt;
use std::sync::OnceLock;

const SERVICE_OPTIONS: [usize; 8] = field(16);
const CHANNEL: [usize; 16] = field(24);
const GROUP_ADDRESS: [usize; 16] = field(40);
const SOURCE_ADDRESS: [usize; 24] = field(56);

check_fields!(SERVICE_OPTIONS, CHANNEL, GROUP_ADDRESS, SOURCE_ADDRESS);

#[derive(Debug)]
struct GrantFields {
    service_options: ServiceOptions,
    channel: Channel,
    group_address: Talkgroup,
    source_address: Radio,
    identifiers: Vec<Identifier>,
}

/// Assigns a traffic channel to a talkgroup call
#[derive(Debug)]
pub struct GroupVoiceChannelGrant {
    block: TsbkBlock,
    fields: OnceLock<GrantFields>,
}

impl GroupVoiceChannelGrant {
    fn fields(&self) -> &GrantFields {
        self.fields.get_or_init(|| {
            let channel = Channel::create(self.block.int(&CHANNEL));
            let group_address = Talkgroup::create_to(self.block.int(&GROUP_ADDRESS));
            let source_address = Radio::create_from(self.block.int(&SOURCE_ADDRESS));

            GrantFields {
                service_options: ServiceOptions::from_value(self.block.int(&SERVICE_OPTIONS)),
                channel,
                group_address,
                source_address,
                identifiers: vec![channel.into(), group_address.into(), source_address.into()],
            }
        })
    }

    pub fn service_options(&self) -> ServiceOptions {
        self.fields().service_options
    }

    pub fn channel(&self) -> Channel {
        self.fields().channel
    }

    pub fn group_address(&self) -> Talkgroup {
        self.fields().group_address
    }

    pub fn source_address(&self) -> Radio {
        self.fields().source_address
    }
}

impl TsbkDecode for GroupVoiceChannelGrant {
    const OPCODE: Opcode = Opcode::GroupVoiceChannelGrant;

    fn from_block(block: TsbkBlock) -> Self {
        Self {
            block,
            fields: OnceLock::new(),
        }
    }
}

impl Message for GroupVoiceChannelGrant {
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

impl fmt::Display for GroupVoiceChannelGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.block.write_stub(f, self.label())?;
        write!(
            f,
            " {} CHAN:{} FROM:{} TO:{}",
            self.service_options(),
            self.channel(),
            self.source_address(),
            self.group_address()
        )
    }
}

crate::register_decoder!(GroupVoiceChannelGrant);

const CHANNEL_A: [usize; 16] = field(16);
const GROUP_ADDRESS_A: [usize; 16] = field(32);
const CHANNEL_B: [usize; 16] = field(48);
const GROUP_ADDRESS_B: [usize; 16] = field(64);

check_fields!(CHANNEL_A, GROUP_ADDRESS_A, CHANNEL_B, GROUP_ADDRESS_B);

#[derive(Debug)]
struct UpdateFields {
    channel_a: Channel,
    group_address_a: Talkgroup,
    second: Option<(Channel, Talkgroup)>,
    identifiers: Vec<Identifier>,
}

/// Reminds late-entry radios of up to two active group calls.
///
/// When the second pair repeats the first, only one call is reported.
#[derive(Debug)]
pub struct GroupVoiceChannelGrantUpdate {
    block: TsbkBlock,
    fields: OnceLock<UpdateFields>,
}

impl GroupVoiceChannelGrantUpdate {
    fn fields(&self) -> &UpdateFields {
        self.fields.get_or_init(|| {
            let channel_a = Channel::create(self.block.int(&CHANNEL_A));
            let group_address_a = Talkgroup::create_to(self.block.int(&GROUP_ADDRESS_A));
            let channel_b = Channel::create(self.block.int(&CHANNEL_B));
            let group_address_b = Talkgroup::create_to(self.block.int(&GROUP_ADDRESS_B));

            let mut identifiers = vec![channel_a.into(), group_address_a.into()];
            let second = if channel_a == channel_b && group_address_a == group_address_b {
                None
            } else {
                identifiers.push(channel_b.into());
                identifiers.push(group_address_b.into());
                Some((channel_b, group_address_b))
            };

            UpdateFields {
                channel_a,
                group_address_a,
                second,
                identifiers,
            }
        })
    }

    pub fn channel_a(&self) -> Channel {
        self.fields().channel_a
    }

    pub fn group_address_a(&self) -> Talkgroup {
        self.fields().group_address_a
    }

    /// Second call, `None` when it duplicates the first
    pub fn second(&self) -> Option<(Channel, Talkgroup)> {
        self.fields().second
    }
}

impl TsbkDecode for GroupVoiceChannelGrantUpdate {
    const OPCODE: Opcode = Opcode::GroupVoiceChannelGrantUpdate;

    fn from_block(block: TsbkBlock) -> Self {
        Self {
            block,
            fields: OnceLock::new(),
        }
    }
}

impl Message for GroupVoiceChannelGrantUpdate {
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

impl fmt::Display for GroupVoiceChannelGrantUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.block.write_stub(f, self.label())?;
        write!(f, " GROUP-A:{} CHAN-A:{}", self.group_address_a(), self.channel_a())?;
        if let Some((channel, group)) = self.second() {
            write!(f, " GROUP-B:{} CHAN-B:{}", group, channel)?;
        }
        Ok(())
    }
}

crate::register_decoder!(GroupVoiceChannelGrantUpdate);
