// RADIO-DECODE: P25 trunking signaling decoder and vocoder device control
// Copyright 2024 - Licensed under GPLv3

pub mod bits;
pub mod identifier;
pub mod message;
pub mod reference;
pub mod serial;
pub mod vocoder;

// Re-export commonly used types
pub use bits::{BitError, CorrectedBitBuffer};
pub use identifier::{Identifier, IdentifierError, Radio, Role, Talkgroup};
pub use message::{
    decode, decode_tsbk, FactoryConfig, Message, MessageContext, MessageError, MessageFactory,
    MessageRecord,
};
pub use reference::{DataUnitId, Opcode, Response};
pub use serial::{SerialConfig, SerialPort, Transport};
pub use vocoder::{DeviceError, VocoderConfig, VocoderDevice};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
