// Mock serial port for testing device exchanges without hardware

use super::comm::{SerialConfig, SerialError};
use super::Transport;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted serial port.
///
/// Bytes pushed with [`push_read_data`](Self::push_read_data) are readable
/// immediately. Replies queued with [`queue_reply`](Self::queue_reply) become
/// readable one per write, so a test can script a request/response sequence,
/// including writes the device never answers.
#[derive(Clone)]
pub struct MockSerialPort {
    /// Data to be read (simulates device responses)
    read_buffer: Arc<Mutex<VecDeque<u8>>>,

    /// Data that was written (commands sent to the device)
    write_buffer: Arc<Mutex<Vec<u8>>>,

    /// One entry consumed per write; `None` leaves the write unanswered
    replies: Arc<Mutex<VecDeque<Option<Vec<u8>>>>>,

    config: SerialConfig,

    /// Simulated delay for read/write operations (in ms)
    delay_ms: u64,
}

impl MockSerialPort {
    pub fn new() -> Self {
        Self {
            read_buffer: Arc::new(Mutex::new(VecDeque::new())),
            write_buffer: Arc::new(Mutex::new(Vec::new())),
            replies: Arc::new(Mutex::new(VecDeque::new())),
            config: SerialConfig::default(),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Make bytes readable now
    pub fn push_read_data(&mut self, data: &[u8]) {
        self.read_buffer.lock().unwrap().extend(data.iter().copied());
    }

    /// Answer the next unanswered write with `data`
    pub fn queue_reply(&mut self, data: &[u8]) {
        self.replies.lock().unwrap().push_back(Some(data.to_vec()));
    }

    /// Leave the next write unanswered
    pub fn queue_silence(&mut self) {
        self.replies.lock().unwrap().push_back(None);
    }

    pub fn get_written_data(&self) -> Vec<u8> {
        self.write_buffer.lock().unwrap().clone()
    }

    pub fn clear_written_data(&mut self) {
        self.write_buffer.lock().unwrap().clear();
    }

    /// Check if a specific byte sequence was written
    pub fn was_written(&self, expected: &[u8]) -> bool {
        let buffer = self.write_buffer.lock().unwrap();
        buffer
            .windows(expected.len())
            .any(|window| window == expected)
    }

    pub fn bytes_available(&self) -> usize {
        self.read_buffer.lock().unwrap().len()
    }

    async fn delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.delay_ms)).await;
        }
    }
}

impl Default for MockSerialPort {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockSerialPort {
    async fn write_all(&mut self, buf: &[u8]) -> Result<(), SerialError> {
        self.delay().await;

        self.write_buffer.lock().unwrap().extend_from_slice(buf);
        if let Some(Some(reply)) = self.replies.lock().unwrap().pop_front() {
            self.read_buffer.lock().unwrap().extend(reply);
        }
        Ok(())
    }

    /// Fails with `Timeout` unless the whole request can be satisfied
    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SerialError> {
        self.delay().await;

        let wanted = buf.len();
        let mut buffer = self.read_buffer.lock().unwrap();
        if buffer.len() < wanted {
            return Err(SerialError::Timeout(self.config.timeout));
        }

        for (item, byte) in buf.iter_mut().zip(buffer.drain(..wanted)) {
            *item = byte;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serial_basic() {
        let mut port = MockSerialPort::new();
        port.push_read_data(b"Hello");

        let mut buf = [0u8; 5];
        port.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"Hello");

        port.write_all(b"World").await.unwrap();
        assert_eq!(port.get_written_data(), b"World");
    }

    #[tokio::test]
    async fn test_mock_serial_timeout() {
        let mut port = MockSerialPort::new();
        port.push_read_data(b"Hi");

        let mut buf = [0u8; 5];
        let result = port.read_exact(&mut buf).await;
        assert!(matches!(result, Err(SerialError::Timeout(_))));
        assert_eq!(port.bytes_available(), 2);
    }

    #[tokio::test]
    async fn test_scripted_replies() {
        let mut port = MockSerialPort::new();
        port.queue_silence();
        port.queue_reply(&[0xAA, 0xBB]);

        port.write_all(b"first").await.unwrap();
        assert_eq!(port.bytes_available(), 0);

        port.write_all(b"second").await.unwrap();
        let mut buf = [0u8; 2];
        port.read_exact(&mut buf).await.unwrap();
        assert_eq!(buf, [0xAA, 0xBB]);

        assert!(port.was_written(b"firstsecond"));
        port.clear_written_data();
        assert!(!port.was_written(b"first"));
    }

    #[tokio::test]
    async fn test_mock_with_delay() {
        let mut port = MockSerialPort::new().with_delay(10);
        port.push_read_data(b"Test");

        let start = std::time::Instant::now();
        let mut buf = [0u8; 4];
        port.read_exact(&mut buf).await.unwrap();

        assert!(start.elapsed().as_millis() >= 10);
    }
}
