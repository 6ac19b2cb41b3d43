use std::io;

#[cfg(test)]
pub mod mock;
#[cfg(feature = "serial")]
pub mod serial;

/// A byte-oriented transport for NexStar communication.
///
/// Implementors provide blocking read/write access to a serial-like
/// connection. Any timeout is the implementor's concern.
pub trait Transport: Send {
    /// Write all bytes to the transport.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Flush any buffered output.
    fn flush(&mut self) -> io::Result<()>;

    /// Read bytes into the buffer. Returns the number of bytes read;
    /// `Ok(0)` means end of stream.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Read until `terminator` has been received, returning every byte
    /// read including the terminator.
    ///
    /// Reads one byte at a time so nothing past the terminator is
    /// consumed. On end of stream the bytes read so far are returned.
    fn read_until(&mut self, terminator: u8) -> io::Result<Vec<u8>> {
        let mut reply = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.read(&mut byte) {
                Ok(0) => return Ok(reply),
                Ok(_) => {
                    reply.push(byte[0]);
                    if byte[0] == terminator {
                        return Ok(reply);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
