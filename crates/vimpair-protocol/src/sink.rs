//! Transport sink consumed by a host application's send path.
//!
//! Grounded in the shape of the teacher's `TcpServer::send`/`Connection::send`
//! methods, but deliberately without a concrete socket implementation — no
//! TCP server or client lives in this crate.

use std::io::Write;

use vimpair_core::Result;

/// A totally ordered, best-effort byte sink.
///
/// The protocol core never retries a failed send; a `MessageSink`
/// implementation is free to buffer, but must preserve call order.
pub trait MessageSink {
    fn send_message(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<W: Write> MessageSink for W {
    fn send_message(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_all(bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_u8_sink_appends_bytes() {
        let mut sink: Vec<u8> = Vec::new();
        sink.send_message(b"VIMPAIR_SAVE_FILE").unwrap();
        assert_eq!(sink, b"VIMPAIR_SAVE_FILE");
    }

    #[test]
    fn repeated_sends_preserve_order() {
        let mut sink: Vec<u8> = Vec::new();
        sink.send_message(b"first").unwrap();
        sink.send_message(b"second").unwrap();
        assert_eq!(sink, b"firstsecond");
    }
}
