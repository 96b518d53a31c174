use thiserror::Error;

/// Errors surfaced at the edges of the Vimpair protocol crate.
///
/// `MessageHandler::process` never raises any of these — malformed and
/// split frames are handled entirely by re-synchronisation (see
/// `vimpair_protocol::handler`). These variants exist only for the
/// surrounding adapters: the codec's caller-configured size guard, the
/// `tokio_util::codec` trait bound on I/O errors, and the encoder's
/// boundary validation of caller-supplied strings.
#[derive(Error, Debug)]
pub enum Error {
    /// A decoded or encoded frame exceeds a caller-configured size bound.
    #[error("frame of {size} bytes exceeds maximum of {max_size} bytes")]
    FrameTooLarge { size: usize, max_size: usize },

    /// Low-level I/O error, surfaced through `Decoder`/`Encoder` impls.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A caller-supplied string was not valid UTF-8 once assembled.
    #[error("invalid UTF-8 in protocol payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
