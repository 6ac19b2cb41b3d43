//! Scripted transport for exercising the client without a mount.
//!
//! Expectations are consumed in order. Bytes written since the last
//! reply are matched against the next expectation on the first read,
//! and its response is then served byte by byte. An empty response
//! behaves like a port that closed without answering.

use std::collections::VecDeque;
use std::io;

use super::Transport;

#[derive(Debug, Clone)]
struct Expectation {
    request: Vec<u8>,
    response: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MockTransport {
    expectations: VecDeque<Expectation>,
    /// Bytes written but not yet matched.
    written: Vec<u8>,
    /// Response bytes not yet read.
    pending: VecDeque<u8>,
    /// Every matched request, in order.
    sent_log: Vec<Vec<u8>>,
    fail_next_read: Option<io::ErrorKind>,
    fail_next_write: Option<io::ErrorKind>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a request/response pair.
    pub fn expect(&mut self, request: &[u8], response: &[u8]) {
        self.expectations.push_back(Expectation {
            request: request.to_vec(),
            response: response.to_vec(),
        });
    }

    /// Make the next read fail with `kind`.
    pub fn fail_next_read(&mut self, kind: io::ErrorKind) {
        self.fail_next_read = Some(kind);
    }

    /// Make the next write fail with `kind`.
    pub fn fail_next_write(&mut self, kind: io::ErrorKind) {
        self.fail_next_write = Some(kind);
    }

    /// All requests matched so far.
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent_log
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// True once every queued expectation has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.expectations.is_empty()
    }

    fn match_request(&mut self) -> io::Result<()> {
        let request = std::mem::take(&mut self.written);
        let expectation = self
            .expectations
            .pop_front()
            .ok_or_else(|| io::Error::other(format!("no expectation for request {request:02X?}")))?;
        if expectation.request != request {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "expected request {:02X?}, got {:02X?}",
                    expectation.request, request
                ),
            ));
        }
        self.sent_log.push(request);
        self.pending.extend(expectation.response);
        Ok(())
    }
}

impl Transport for MockTransport {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        if let Some(kind) = self.fail_next_write.take() {
            return Err(io::Error::new(kind, "mock write failure"));
        }
        self.written.extend_from_slice(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(kind) = self.fail_next_read.take() {
            return Err(io::Error::new(kind, "mock read failure"));
        }
        if self.pending.is_empty() && !self.written.is_empty() {
            self.match_request()?;
        }
        let n = buf.len().min(self.pending.len());
        for (slot, byte) in buf.iter_mut().zip(self.pending.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}
