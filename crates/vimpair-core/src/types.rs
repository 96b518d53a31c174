use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based `(line, column)` pair as carried by a cursor-position frame.
///
/// Both coordinates are coerced to `0` at construction time when the caller
/// passes a negative or absent value, matching the encoder's "no error
/// surface" contract: out-of-range coordinates are clamped, never rejected.
///
/// # Examples
///
/// ```
/// use vimpair_core::CursorPosition;
///
/// let pos = CursorPosition::clamped(-5, 12);
/// assert_eq!((pos.line(), pos.column()), (0, 12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    line: u64,
    column: u64,
}

impl CursorPosition {
    /// Build a position from two possibly-negative signed values, clamping
    /// negatives to zero.
    #[must_use]
    pub fn clamped(line: i64, column: i64) -> Self {
        Self {
            line: line.max(0) as u64,
            column: column.max(0) as u64,
        }
    }

    /// Build a position from two already-non-negative values.
    #[must_use]
    pub fn new(line: u64, column: u64) -> Self {
        Self { line, column }
    }

    #[must_use]
    pub fn line(&self) -> u64 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u64 {
        self.column
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}|{}", self.line, self.column)
    }
}

/// Configuration accepted by the encoder's file-change message generator.
///
/// # Examples
///
/// ```
/// use vimpair_core::FileChangeOptions;
///
/// let opts = FileChangeOptions::default();
/// assert!(!opts.conceal_path);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileChangeOptions {
    /// Folder component to prepend to the filename, if any.
    pub folderpath: Option<String>,
    /// When true, `folderpath` is replaced by its SHA-224 hex digest.
    /// The filename itself is never hashed.
    pub conceal_path: bool,
}

/// Configuration accepted by [`crate`] consumers that build a codec adapter.
///
/// A plain data struct a host application populates from its own config
/// file or CLI flags. This crate does not implement any loading mechanism
/// for it.
///
/// # Examples
///
/// ```
/// use vimpair_core::HandlerConfig;
///
/// let config = HandlerConfig::default();
/// assert_eq!(config.max_frame_size, None);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Upper bound, in bytes, on any single frame admitted or produced by a
    /// codec adapter. `None` means unbounded.
    pub max_frame_size: Option<usize>,
}
