// Request/response exchange with a vocoder over a byte transport

use super::packet::{PacketField, HEADER_LEN, MAX_PACKET_LEN, START_BYTE};
use super::request::Request;
use super::response::Response;
use super::{DeviceError, Result, VocoderConfig};
use crate::serial::Transport;
use tokio::time::timeout;

/// Default rate control words for the P25 phase 1 full rate vocoder (7200 bps with FEC)
pub const P25_FULL_RATE: [u16; 6] = [0x0558, 0x086B, 0x1030, 0x0000, 0x0000, 0x0190];

pub struct VocoderDevice<T: Transport> {
    transport: T,
    config: VocoderConfig,
}

impl<T: Transport> VocoderDevice<T> {
    pub fn new(transport: T, config: VocoderConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &VocoderConfig {
        &self.config
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Send one request and wait for the response to it.
    ///
    /// Frames answering a different field are logged and discarded. No
    /// matching frame within `response_timeout`, or a read timeout from the
    /// transport, is a `TransportTimeout` carrying `response_timeout`. An
    /// unsuccessful response is still returned as `Ok`.
    pub async fn send(&mut self, request: &Request) -> Result<Response> {
        let frame = request.encode()?;
        tracing::debug!("Sending {}", request.field());
        self.transport.write_all(&frame).await?;

        let window = self.config.response_timeout;
        match timeout(window, self.await_response(request.response_field())).await {
            Ok(Err(DeviceError::TransportTimeout(_))) | Err(_) => {
                Err(DeviceError::TransportTimeout(window))
            }
            Ok(result) => result,
        }
    }

    /// Send a request, retrying while the device stays silent.
    ///
    /// Fails with `ProtocolFailure` when the device answers unsuccessfully.
    pub async fn execute(&mut self, request: &Request) -> Result<Response> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.send(request).await {
                Ok(response) if response.is_successful() => {
                    tracing::debug!("{}", response);
                    return Ok(response);
                }
                Ok(response) => {
                    tracing::warn!("{}", response);
                    return Err(DeviceError::ProtocolFailure(response));
                }
                Err(DeviceError::TransportTimeout(after)) if attempt < max_attempts => {
                    tracing::debug!(
                        "No {} response after {:?}, attempt {}/{}",
                        request.response_field(),
                        after,
                        attempt,
                        max_attempts
                    );
                    self.transport.clear_input().await?;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Soft reset; completes when the device reports ready
    pub async fn reset(&mut self) -> Result<()> {
        self.execute(&Request::Reset).await.map(|_| ())
    }

    pub async fn product_id(&mut self) -> Result<String> {
        let response = self.execute(&Request::ProductId).await?;
        Ok(response.text().unwrap_or_default())
    }

    pub async fn version(&mut self) -> Result<String> {
        let response = self.execute(&Request::VersionString).await?;
        Ok(response.text().unwrap_or_default())
    }

    pub async fn set_rate(&mut self, index: u8) -> Result<()> {
        self.execute(&Request::SetVocoderRate(index)).await.map(|_| ())
    }

    pub async fn set_rate_parameters(&mut self, words: [u16; 6]) -> Result<()> {
        self.execute(&Request::SetVocoderParameters(words)).await.map(|_| ())
    }

    pub async fn initialize(&mut self, encoder: bool, decoder: bool) -> Result<()> {
        self.execute(&Request::Initialize { encoder, decoder })
            .await
            .map(|_| ())
    }

    /// Decode one channel frame into 16-bit PCM samples
    pub async fn decode_channel(&mut self, bits: u8, data: &[u8]) -> Result<Vec<i16>> {
        let request = Request::DecodeChannel {
            bits,
            data: data.to_vec(),
        };
        let response = self.execute(&request).await?;
        Ok(response.samples().unwrap_or_default())
    }

    async fn await_response(&mut self, expected: PacketField) -> Result<Response> {
        loop {
            let frame = self.read_frame().await?;
            let response = Response::parse(&frame);

            if !response.parity_ok() {
                tracing::debug!("Parity mismatch in {}", hex::encode_upper(&frame));
            }
            if response.field() == Some(expected) {
                return Ok(response);
            }
            tracing::debug!("Discarding {} while waiting for {}", response, expected);
        }
    }

    /// Read one frame, skipping bytes until a start byte with a plausible length
    async fn read_frame(&mut self) -> Result<Vec<u8>> {
        loop {
            let mut byte = [0u8; 1];
            let mut skipped = 0usize;
            loop {
                self.transport.read_exact(&mut byte).await?;
                if byte[0] == START_BYTE {
                    break;
                }
                skipped += 1;
            }
            if skipped > 0 {
                tracing::debug!("Skipped {} bytes before start of packet", skipped);
            }

            let mut header = [0u8; HEADER_LEN - 1];
            self.transport.read_exact(&mut header).await?;
            let length = u16::from_be_bytes([header[0], header[1]]) as usize;
            if HEADER_LEN + length > MAX_PACKET_LEN {
                tracing::warn!("Ignoring packet header with length {}", length);
                continue;
            }

            let mut frame = Vec::with_capacity(HEADER_LEN + length);
            frame.push(START_BYTE);
            frame.extend_from_slice(&header);
            frame.resize(HEADER_LEN + length, 0);
            self.transport.read_exact(&mut frame[HEADER_LEN..]).await?;
            return Ok(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serial::mock::MockSerialPort;
    use crate::vocoder::packet::{encode, PacketType};
    use std::time::Duration;

    fn device(port: MockSerialPort) -> VocoderDevice<MockSerialPort> {
        VocoderDevice::new(
            port,
            VocoderConfig::default().with_response_timeout(Duration::from_millis(50)),
        )
    }

    fn status_reply(field: u8, status: u8) -> Vec<u8> {
        encode(PacketType::Control, &[field, status])
    }

    #[tokio::test]
    async fn test_set_rate_parameters() {
        let mut port = MockSerialPort::new();
        port.queue_reply(&status_reply(0x0A, 0x00));
        let mut vocoder = device(port.clone());

        vocoder.set_rate_parameters(P25_FULL_RATE).await.unwrap();

        let sent = Request::SetVocoderParameters(P25_FULL_RATE).encode().unwrap();
        assert_eq!(port.get_written_data(), sent);
    }

    #[tokio::test]
    async fn test_failure_is_protocol_failure() {
        let mut port = MockSerialPort::new();
        port.queue_reply(&status_reply(0x0A, 0x01));
        let mut vocoder = device(port);

        let err = vocoder.set_rate_parameters(P25_FULL_RATE).await.unwrap_err();
        match err {
            DeviceError::ProtocolFailure(response) => {
                assert_eq!(response.status(), Some(0x01));
                assert!(response.to_string().starts_with("SET VOCODER RATE **FAILED** - RESPONSE:01 2F"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_silence_is_transport_timeout() {
        let mut vocoder = device(MockSerialPort::new());

        let err = vocoder.send(&Request::ProductId).await.unwrap_err();
        assert!(matches!(err, DeviceError::TransportTimeout(_)));
    }

    #[tokio::test]
    async fn test_timeout_reports_response_window() {
        let mut vocoder = VocoderDevice::new(
            MockSerialPort::new(),
            VocoderConfig::default()
                .with_response_timeout(Duration::from_millis(75))
                .with_max_attempts(1),
        );

        let err = vocoder.reset().await.unwrap_err();
        match err {
            DeviceError::TransportTimeout(after) => assert_eq!(after, Duration::from_millis(75)),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_retry_after_timeout() {
        let mut port = MockSerialPort::new();
        let mut reply = vec![0x30];
        reply.extend_from_slice(b"AMBE3000R\0");
        port.queue_silence();
        port.queue_reply(&encode(PacketType::Control, &reply));
        let mut vocoder = device(port.clone());

        assert_eq!(vocoder.product_id().await.unwrap(), "AMBE3000R");

        let request = Request::ProductId.encode().unwrap();
        assert_eq!(port.get_written_data().len(), request.len() * 2);
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let mut port = MockSerialPort::new();
        for _ in 0..3 {
            port.queue_silence();
        }
        let mut vocoder = device(port.clone());

        let err = vocoder.reset().await.unwrap_err();
        assert!(matches!(err, DeviceError::TransportTimeout(_)));
        assert_eq!(port.get_written_data().len(), 3 * Request::Reset.encode().unwrap().len());
    }

    #[tokio::test]
    async fn test_unrelated_frames_discarded() {
        let mut port = MockSerialPort::new();
        let mut reply = vec![0x11, 0x22];
        reply.extend(status_reply(0x09, 0x00));
        reply.extend(encode(PacketType::Control, &[0x39]));
        port.queue_reply(&reply);
        let mut vocoder = device(port);

        vocoder.reset().await.unwrap();
    }

    #[tokio::test]
    async fn test_decode_channel() {
        let mut port = MockSerialPort::new();
        port.queue_reply(&encode(PacketType::Speech, &[0x00, 2, 0x01, 0x00, 0x80, 0x00]));
        let mut vocoder = device(port);

        let samples = vocoder.decode_channel(16, &[0xAB, 0xCD]).await.unwrap();
        assert_eq!(samples, vec![256, i16::MIN]);
    }

    #[tokio::test]
    async fn test_invalid_request_not_sent() {
        let port = MockSerialPort::new();
        let mut vocoder = device(port.clone());

        let err = vocoder.initialize(false, false).await.unwrap_err();
        assert!(matches!(err, DeviceError::InvalidRequest(_)));
        assert!(port.get_written_data().is_empty());
    }
}
