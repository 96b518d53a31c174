//! Core constants for the Vimpair wire protocol.
//!
//! This module defines all protocol-level constants shared between the
//! encoder and the streaming decoder. Centralising them here keeps the
//! capacity arithmetic in one place and prevents the encoder and decoder
//! from drifting apart on frame-size limits.
//!
//! # Protocol Structure
//!
//! Every frame is one of three shapes:
//!
//! ```text
//! PREFIX|N|<N bytes of payload>      length-prefixed
//! VIMPAIR_CURSOR_POSITION|L|C        two-integer
//! VIMPAIR_TAKE_CONTROL               bare directive
//! VIMPAIR_SAVE_FILE                  bare directive
//! ```
//!
//! `|` (0x7C) is the only separator; lengths and coordinates are runs of
//! ASCII decimal digits.

/// Field/length separator used throughout the wire format.
pub const SEPARATOR: char = '|';

/// Nominal transport-buffer size the encoder packs content chunks into.
///
/// # Examples
///
/// ```
/// use vimpair_core::constants::MESSAGE_LENGTH;
///
/// assert_eq!(MESSAGE_LENGTH, 1024);
/// ```
pub const MESSAGE_LENGTH: usize = 1024;

/// Number of `|` separators in a length-prefixed frame.
pub const NUM_MARKERS: usize = 2;

/// Digits reserved for the declared length `N`, plus the two `|` markers.
///
/// `PREFIX|N|payload` spends `len(PREFIX) + LENGTH_DIGITS_AND_MARKERS` bytes
/// on framing before any payload byte is counted.
pub const LENGTH_DIGITS_AND_MARKERS: usize = 3 + NUM_MARKERS;

// ============================================================================
// Frame prefixes (the seven-entry closed alphabet)
// ============================================================================

/// Prefix for a single, unsplit full-content snapshot.
pub const FULL_UPDATE_PREFIX: &str = "VIMPAIR_FULL_UPDATE";
/// Prefix opening a multi-part content update.
pub const CONTENTS_START_PREFIX: &str = "VIMPAIR_CONTENTS_START";
/// Prefix for a middle segment of a multi-part content update.
pub const CONTENTS_PART_PREFIX: &str = "VIMPAIR_CONTENTS_PART";
/// Prefix closing a multi-part content update.
pub const CONTENTS_END_PREFIX: &str = "VIMPAIR_CONTENTS_END";
/// Prefix for a cursor-position announcement.
pub const CURSOR_POSITION_PREFIX: &str = "VIMPAIR_CURSOR_POSITION";
/// Prefix for a file-change announcement.
pub const FILE_CHANGE_PREFIX: &str = "VIMPAIR_FILE_CHANGE";
/// Bare directive transferring control to the peer.
pub const TAKE_CONTROL_MESSAGE: &str = "VIMPAIR_TAKE_CONTROL";
/// Bare directive requesting the follower persist its buffer.
pub const SAVE_FILE_MESSAGE: &str = "VIMPAIR_SAVE_FILE";

/// All eight wire tokens, used by the scan loop to find the earliest match.
///
/// `VIMPAIR_CONTENTS_START`/`PART`/`END` share the `VIMPAIR_CONTENTS_` stem,
/// so the scan must compare whole prefixes, not just the shared stem,
/// before picking a handler.
pub const ALL_PREFIXES: [&str; 8] = [
    FULL_UPDATE_PREFIX,
    CONTENTS_START_PREFIX,
    CONTENTS_PART_PREFIX,
    CONTENTS_END_PREFIX,
    CURSOR_POSITION_PREFIX,
    FILE_CHANGE_PREFIX,
    TAKE_CONTROL_MESSAGE,
    SAVE_FILE_MESSAGE,
];

// ============================================================================
// Encoder chunking capacities
// ============================================================================

/// Payload capacity of a single `CONTENTS_START` frame.
///
/// # Examples
///
/// ```
/// use vimpair_core::constants::CONTENTS_START_CAPACITY;
///
/// assert_eq!(CONTENTS_START_CAPACITY, 997);
/// ```
pub const CONTENTS_START_CAPACITY: usize =
    MESSAGE_LENGTH - CONTENTS_START_PREFIX.len() - LENGTH_DIGITS_AND_MARKERS;

/// Payload capacity of a single `CONTENTS_PART`/`CONTENTS_END` frame.
///
/// # Examples
///
/// ```
/// use vimpair_core::constants::CONTENTS_PART_CAPACITY;
///
/// assert_eq!(CONTENTS_PART_CAPACITY, 998);
/// ```
pub const CONTENTS_PART_CAPACITY: usize =
    MESSAGE_LENGTH - CONTENTS_PART_PREFIX.len() - LENGTH_DIGITS_AND_MARKERS;
