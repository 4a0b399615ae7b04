// Control channel status broadcasts (RFSS_STS_BCST, NET_STS_BCST)

use super::{check_fields, TsbkBlock, TsbkDecode};
use crate::bits::field;
use crate::identifier::{Channel, Identifier, Lra, Rfss, Site, SystemId, Wacn};
use crate::message::{Message, MessageContext};
use crate::reference::{Opcode, ServiceClass};
use std::fmt;
use std::sync::OnceLock;

const LRA: [usize; 8] = field(16);
const CHANNEL: [usize; 16] = field(56);
const SERVICE_CLASS: [usize; 8] = field(72);

const ACTIVE_NETWORK_CONNECTION: usize = 27;
const RFSS_SYSTEM: [usize; 12] = field(28);
const RFSS: [usize; 8] = field(40);
const SITE: [usize; 8] = field(48);

const WACN: [usize; 20] = field(24);
const NETWORK_SYSTEM: [usize; 12] = field(44);

check_fields!(LRA, CHANNEL, SERVICE_CLASS, RFSS_SYSTEM, RFSS, SITE, WACN, NETWORK_SYSTEM);

#[derive(Debug)]
struct RfssFields {
    lra: Lra,
    active_network_connection: bool,
    system: SystemId,
    rfss: Rfss,
    site: Site,
    channel: Channel,
    service_class: ServiceClass,
    identifiers: Vec<Identifier>,
}

/// Identifies the site transmitting this control channel
#[derive(Debug)]
pub struct RfssStatusBroadcast {
    block: TsbkBlock,
    fields: OnceLock<RfssFields>,
}

impl RfssStatusBroadcast {
    fn fields(&self) -> &RfssFields {
        self.fields.get_or_init(|| {
            let lra = Lra::create(self.block.int(&LRA));
            let system = SystemId::create(self.block.int(&RFSS_SYSTEM));
            let rfss = Rfss::create(self.block.int(&RFSS));
            let site = Site::create(self.block.int(&SITE));
            let channel = Channel::create(self.block.int(&CHANNEL));

            RfssFields {
                lra,
                active_network_connection: self.block.flag(ACTIVE_NETWORK_CONNECTION),
                system,
                rfss,
                site,
                channel,
                service_class: ServiceClass::from_value(self.block.int(&SERVICE_CLASS)),
                identifiers: vec![
                    lra.into(),
                    system.into(),
                    rfss.into(),
                    site.into(),
                    channel.into(),
                ],
            }
        })
    }

    pub fn lra(&self) -> Lra {
        self.fields().lra
    }

    /// Site is connected to the RFSS controller
    pub fn has_active_network_connection(&self) -> bool {
        self.fields().active_network_connection
    }

    pub fn system(&self) -> SystemId {
        self.fields().system
    }

    pub fn rfss(&self) -> Rfss {
        self.fields().rfss
    }

    pub fn site(&self) -> Site {
        self.fields().site
    }

    pub fn channel(&self) -> Channel {
        self.fields().channel
    }

    pub fn service_class(&self) -> ServiceClass {
        self.fields().service_class
    }
}

impl TsbkDecode for RfssStatusBroadcast {
    const OPCODE: Opcode = Opcode::RfssStatusBroadcast;

    fn from_block(block: TsbkBlock) -> Self {
        Self {
            block,
            fields: OnceLock::new(),
        }
    }
}

impl Message for RfssStatusBroadcast {
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

impl fmt::Display for RfssStatusBroadcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.block.write_stub(f, self.label())?;
        write!(
            f,
            " SYSTEM:{} RFSS:{} SITE:{} LRA:{} CHAN:{} SERVICES:{}",
            self.system(),
            self.rfss(),
            self.site(),
            self.lra(),
            self.channel(),
            self.service_class()
        )?;
        if self.has_active_network_connection() {
            f.write_str(" NETWORK CONNECTED")?;
        }
        Ok(())
    }
}

crate::register_decoder!(RfssStatusBroadcast);

#[derive(Debug)]
struct NetworkFields {
    lra: Lra,
    wacn: Wacn,
    system: SystemId,
    channel: Channel,
    service_class: ServiceClass,
    identifiers: Vec<Identifier>,
}

/// Identifies the wide area network and system of this control channel
#[derive(Debug)]
pub struct NetworkStatusBroadcast {
    block: TsbkBlock,
    fields: OnceLock<NetworkFields>,
}

impl NetworkStatusBroadcast {
    fn fields(&self) -> &NetworkFields {
        self.fields.get_or_init(|| {
            let lra = Lra::create(self.block.int(&LRA));
            let wacn = Wacn::create(self.block.int(&WACN));
            let system = SystemId::create(self.block.int(&NETWORK_SYSTEM));
            let channel = Channel::create(self.block.int(&CHANNEL));

            NetworkFields {
                lra,
                wacn,
                system,
                channel,
                service_class: ServiceClass::from_value(self.block.int(&SERVICE_CLASS)),
                identifiers: vec![lra.into(), wacn.into(), system.into(), channel.into()],
            }
        })
    }

    pub fn lra(&self) -> Lra {
        self.fields().lra
    }

    pub fn wacn(&self) -> Wacn {
        self.fields().wacn
    }

    pub fn system(&self) -> SystemId {
        self.fields().system
    }

    pub fn channel(&self) -> Channel {
        self.fields().channel
    }

    pub fn service_class(&self) -> ServiceClass {
        self.fields().service_class
    }
}

impl TsbkDecode for NetworkStatusBroadcast {
    const OPCODE: Opcode = Opcode::NetworkStatusBroadcast;

    fn from_block(block: TsbkBlock) -> Self {
        Self {
            block,
            fields: OnceLock::new(),
        }
    }
}

impl Message for NetworkStatusBroadcast {
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

impl fmt::Display for NetworkStatusBroadcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.block.write_stub(f, self.label())?;
        write!(
            f,
            " WACN:{} SYSTEM:{} LRA:{} CHAN:{} SERVICES:{}",
            self.wacn(),
            self.system(),
            self.lra(),
            self.channel(),
            self.service_class()
        )
    }
}

crate::register_decoder!(NetworkStatusBroadcast);
