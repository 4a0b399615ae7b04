// Responses returned by the vocoder
//
// Parsing never fails: bytes that do not form a packet produce a response
// that reports itself as unsuccessful and keeps the raw bytes for diagnostics.

use super::packet::{parity_ok, PacketField, PacketType, PARITY_FIELD, START_BYTE};
use crate::bits::to_hex;
use nom::{
    bytes::complete::{tag, take, take_till},
    number::complete::{be_u16, be_u8},
    IResult, Parser,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    packet_type: Option<PacketType>,
    field: Option<PacketField>,
    payload: Vec<u8>,
    raw: Vec<u8>,
}

/// Packet type byte and everything the length field covers
fn frame(input: &[u8]) -> IResult<&[u8], (u8, &[u8])> {
    let (input, _) = tag(&[START_BYTE][..]).parse(input)?;
    let (input, length) = be_u16(input)?;
    let (input, packet_type) = be_u8(input)?;
    let (input, body) = take(length as usize).parse(input)?;
    Ok((input, (packet_type, body)))
}

/// NUL-terminated ASCII string
fn cstring(input: &[u8]) -> IResult<&[u8], &[u8]> {
    let (input, text) = take_till(|b| b == 0).parse(input)?;
    let (input, _) = tag(&[0u8][..]).parse(input)?;
    Ok((input, text))
}

impl Response {
    /// Parse a complete frame as read from the device
    pub fn parse(bytes: &[u8]) -> Self {
        match frame(bytes) {
            Ok((_, (packet_type, body))) => {
                let (field, payload) = match body.split_first() {
                    Some((id, rest)) => (Some(PacketField::from_value(*id)), rest.to_vec()),
                    None => (None, Vec::new()),
                };
                Self {
                    packet_type: Some(PacketType::from_value(packet_type)),
                    field,
                    payload,
                    raw: bytes.to_vec(),
                }
            }
            Err(_) => Self {
                packet_type: None,
                field: None,
                payload: bytes.to_vec(),
                raw: bytes.to_vec(),
            },
        }
    }

    /// Response built from an already-extracted field and payload
    pub fn new(packet_type: PacketType, field: PacketField, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            packet_type: Some(packet_type),
            field: Some(field),
            payload: payload.into(),
            raw: Vec::new(),
        }
    }

    pub fn packet_type(&self) -> Option<PacketType> {
        self.packet_type
    }

    pub fn field(&self) -> Option<PacketField> {
        self.field
    }

    /// Bytes following the field id, parity field included
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Parity check over the raw frame; false for responses built with [`Response::new`]
    pub fn parity_ok(&self) -> bool {
        parity_ok(&self.raw)
    }

    /// Whether the device reported success for this field.
    ///
    /// Computed on every call from the payload shape:
    /// - status commands: exactly a status byte of 0 followed by the parity field
    /// - reset and ready: nothing but the parity field
    /// - product id and version: a NUL-terminated ASCII string
    /// - speech data: a sample count followed by that many 16-bit samples
    pub fn is_successful(&self) -> bool {
        let Some(field) = self.field else {
            return false;
        };
        let payload = self.payload.as_slice();

        match field {
            PacketField::RateIndex
            | PacketField::RateParameters
            | PacketField::Initialize
            | PacketField::EncoderMode
            | PacketField::DecoderMode
            | PacketField::Compand => payload.len() == 3 && payload[0] == 0x00,
            PacketField::Reset | PacketField::Ready => {
                payload.len() == 2 && payload[0] == PARITY_FIELD
            }
            PacketField::ProductId | PacketField::Version => self.text().is_some(),
            PacketField::SpeechData => {
                self.packet_type == Some(PacketType::Speech) && self.samples().is_some()
            }
            _ => false,
        }
    }

    /// Status byte of a status command response
    pub fn status(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    /// String carried by a product id or version response
    pub fn text(&self) -> Option<String> {
        if !matches!(self.field, Some(PacketField::ProductId | PacketField::Version)) {
            return None;
        }
        let (_, text) = cstring(&self.payload).ok()?;
        if !text.is_ascii() {
            return None;
        }
        Some(String::from_utf8_lossy(text).into_owned())
    }

    /// Decoded speech samples, if the payload holds exactly the advertised count
    pub fn samples(&self) -> Option<Vec<i16>> {
        let (&count, rest) = self.payload.split_first()?;
        let sample_bytes = count as usize * 2;

        let trailer = rest.get(sample_bytes..)?;
        if !(trailer.is_empty() || (trailer.len() == 2 && trailer[0] == PARITY_FIELD)) {
            return None;
        }

        Some(
            rest[..sample_bytes]
                .chunks_exact(2)
                .map(|pair| i16::from_be_bytes([pair[0], pair[1]]))
                .collect(),
        )
    }

    fn label(&self) -> &'static str {
        self.field.map(|f| f.label()).unwrap_or("UNKNOWN")
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_successful() {
            return write!(
                f,
                "{} **FAILED** - RESPONSE:{}",
                self.label(),
                to_hex(&self.payload)
            );
        }
        write!(f, "{} SUCCESSFUL", self.label())?;
        if let Some(text) = self.text() {
            write!(f, " - {}", text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocoder::packet::encode;

    #[test]
    fn test_set_rate_success() {
        let response = Response::new(PacketType::Control, PacketField::RateParameters, [0x00, 0xAA, 0xBB]);
        assert!(response.is_successful());
        assert_eq!(response.to_string(), "SET VOCODER RATE SUCCESSFUL");
    }

    #[test]
    fn test_set_rate_failure_renders_payload() {
        let response = Response::new(PacketType::Control, PacketField::RateParameters, [0x01, 0xAA, 0xBB]);
        assert!(!response.is_successful());
        assert_eq!(
            response.to_string(),
            "SET VOCODER RATE **FAILED** - RESPONSE:01 AA BB"
        );
    }

    #[test]
    fn test_status_length_is_exact() {
        let short = Response::new(PacketType::Control, PacketField::RateParameters, [0x00, 0xAA]);
        let long = Response::new(PacketType::Control, PacketField::RateParameters, [0x00, 0xAA, 0xBB, 0xCC]);
        let empty = Response::new(PacketType::Control, PacketField::RateParameters, Vec::new());

        assert!(!short.is_successful());
        assert!(!long.is_successful());
        assert!(!empty.is_successful());
        assert_eq!(empty.to_string(), "SET VOCODER RATE **FAILED** - RESPONSE:(empty)");
    }

    #[test]
    fn test_parse_device_frame() {
        let frame = encode(PacketType::Control, &[0x0A, 0x00]);
        let response = Response::parse(&frame);

        assert_eq!(response.packet_type(), Some(PacketType::Control));
        assert_eq!(response.field(), Some(PacketField::RateParameters));
        assert_eq!(response.status(), Some(0x00));
        assert!(response.parity_ok());
        assert!(response.is_successful());
        assert_eq!(response.text(), None);
        assert_eq!(response.to_string(), "SET VOCODER RATE SUCCESSFUL");
        // Parsing is idempotent
        assert_eq!(Response::parse(&frame), response);
    }

    #[test]
    fn test_parse_garbage_never_fails() {
        for bytes in [&[][..], &[0x61][..], &[0x61, 0x00, 0x09, 0x00, 0x0A][..], &[0x12, 0x34][..]] {
            let response = Response::parse(bytes);
            assert!(!response.is_successful());
            assert_eq!(response.field(), None);
        }
        assert_eq!(
            Response::parse(&[0x12, 0x34]).to_string(),
            "UNKNOWN **FAILED** - RESPONSE:12 34"
        );
    }

    #[test]
    fn test_ready_and_product_id() {
        let ready = Response::parse(&encode(PacketType::Control, &[0x39]));
        assert!(ready.is_successful());
        assert_eq!(ready.to_string(), "READY SUCCESSFUL");

        let mut fields = vec![0x30];
        fields.extend_from_slice(b"AMBE3000R\0");
        let product = Response::parse(&encode(PacketType::Control, &fields));
        assert_eq!(product.text().as_deref(), Some("AMBE3000R"));
        assert_eq!(product.to_string(), "PRODUCT ID SUCCESSFUL - AMBE3000R");

        let unterminated = Response::parse(&encode(PacketType::Control, &[0x31, b'V', b'1']));
        assert!(!unterminated.is_successful());
    }

    #[test]
    fn test_speech_samples() {
        let frame = encode(PacketType::Speech, &[0x00, 2, 0x00, 0x10, 0xFF, 0xFE]);
        let response = Response::parse(&frame);
        assert_eq!(response.samples(), Some(vec![16, -2]));
        assert!(response.is_successful());

        let truncated = Response::new(PacketType::Speech, PacketField::SpeechData, [3, 0x00, 0x10]);
        assert_eq!(truncated.samples(), None);
        assert!(!truncated.is_successful());
    }
}
