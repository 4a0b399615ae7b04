// Commands sent to the vocoder

use super::packet::{encode, PacketField, PacketType};
use super::{DeviceError, Result};

/// Largest channel frame the decoder accepts, in bits
pub const MAX_CHANNEL_BITS: u8 = 0xF0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Select one of the built-in rate table entries
    SetVocoderRate(u8),
    /// Custom rate control words RCW0..RCW5
    SetVocoderParameters([u16; 6]),
    Initialize { encoder: bool, decoder: bool },
    Reset,
    ProductId,
    VersionString,
    /// Decode one channel frame of `bits` bits, packed MSB first in `data`
    DecodeChannel { bits: u8, data: Vec<u8> },
}

impl Request {
    /// Field that identifies this request in its packet
    pub fn field(&self) -> PacketField {
        match self {
            Request::SetVocoderRate(_) => PacketField::RateIndex,
            Request::SetVocoderParameters(_) => PacketField::RateParameters,
            Request::Initialize { .. } => PacketField::Initialize,
            Request::Reset => PacketField::Reset,
            Request::ProductId => PacketField::ProductId,
            Request::VersionString => PacketField::Version,
            Request::DecodeChannel { .. } => PacketField::ChannelData,
        }
    }

    /// Field of the response that answers this request
    pub fn response_field(&self) -> PacketField {
        match self {
            Request::Reset => PacketField::Ready,
            Request::DecodeChannel { .. } => PacketField::SpeechData,
            other => other.field(),
        }
    }

    pub fn packet_type(&self) -> PacketType {
        match self {
            Request::DecodeChannel { .. } => PacketType::Channel,
            _ => PacketType::Control,
        }
    }

    /// Serialize to a complete framed packet
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut fields = vec![self.field().value()];

        match self {
            Request::SetVocoderRate(index) => fields.push(*index),
            Request::SetVocoderParameters(words) => {
                for word in words {
                    fields.extend_from_slice(&word.to_be_bytes());
                }
            }
            Request::Initialize { encoder, decoder } => {
                if !encoder && !decoder {
                    return Err(DeviceError::InvalidRequest(
                        "initialize needs the encoder, the decoder, or both".to_string(),
                    ));
                }
                fields.push(u8::from(*encoder) | u8::from(*decoder) << 1);
            }
            Request::Reset | Request::ProductId | Request::VersionString => {}
            Request::DecodeChannel { bits, data } => {
                if *bits == 0 || *bits > MAX_CHANNEL_BITS {
                    return Err(DeviceError::InvalidRequest(format!(
                        "channel frame of {} bits",
                        bits
                    )));
                }
                let expected = (*bits as usize).div_ceil(8);
                if data.len() != expected {
                    return Err(DeviceError::InvalidRequest(format!(
                        "{} bits need {} bytes, got {}",
                        bits,
                        expected,
                        data.len()
                    )));
                }
                fields.push(*bits);
                fields.extend_from_slice(data);
            }
        }

        Ok(encode(self.packet_type(), &fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_rate_parameters_encoding() {
        let request = Request::SetVocoderParameters([0x0558, 0x086B, 0x1030, 0, 0, 0x0190]);
        let frame = request.encode().unwrap();

        assert_eq!(&frame[..5], &[0x61, 0x00, 0x0F, 0x00, 0x0A]);
        assert_eq!(&frame[5..7], &[0x05, 0x58]);
        assert_eq!(&frame[15..17], &[0x01, 0x90]);
        assert_eq!(frame.len(), 19);
        assert_eq!(request.response_field(), PacketField::RateParameters);
    }

    #[test]
    fn test_reset_answered_by_ready() {
        assert_eq!(Request::Reset.response_field(), PacketField::Ready);
        assert_eq!(Request::ProductId.response_field(), PacketField::ProductId);
    }

    #[test]
    fn test_initialize_encoding() {
        let frame = Request::Initialize { encoder: false, decoder: true }.encode().unwrap();
        assert_eq!(&frame[4..6], &[0x0B, 0x02]);

        let err = Request::Initialize { encoder: false, decoder: false }.encode();
        assert!(matches!(err, Err(DeviceError::InvalidRequest(_))));
    }

    #[test]
    fn test_decode_channel_validation() {
        let request = Request::DecodeChannel { bits: 12, data: vec![0xAB, 0xC0] };
        let frame = request.encode().unwrap();
        assert_eq!(frame[3], PacketType::Channel.value());
        assert_eq!(&frame[4..8], &[0x01, 12, 0xAB, 0xC0]);

        let short = Request::DecodeChannel { bits: 12, data: vec![0xAB] };
        assert!(matches!(short.encode(), Err(DeviceError::InvalidRequest(_))));
    }
}
