//! Frame kinds and single-frame parsing for the Vimpair wire format.
//!
//! A frame is one self-delimited protocol unit. This module knows how to
//! recognise a prefix and, given a buffer starting at that prefix, attempt
//! to carve out exactly one frame's worth of bytes. It does not know about
//! leftover buffers, pending-update reassembly, or the interrupting-frame
//! policy — that state machine lives in [`crate::handler`].

use vimpair_core::constants::{
    ALL_PREFIXES, CONTENTS_END_PREFIX, CONTENTS_PART_PREFIX, CONTENTS_START_PREFIX,
    CURSOR_POSITION_PREFIX, FILE_CHANGE_PREFIX, FULL_UPDATE_PREFIX, SAVE_FILE_MESSAGE, SEPARATOR,
    TAKE_CONTROL_MESSAGE,
};

/// The closed, disjoint set of frame kinds in the wire alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    FullUpdate,
    ContentsStart,
    ContentsPart,
    ContentsEnd,
    CursorPosition,
    FileChange,
    TakeControl,
    SaveFile,
}

impl FrameKind {
    /// The wire prefix for this frame kind.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            FrameKind::FullUpdate => FULL_UPDATE_PREFIX,
            FrameKind::ContentsStart => CONTENTS_START_PREFIX,
            FrameKind::ContentsPart => CONTENTS_PART_PREFIX,
            FrameKind::ContentsEnd => CONTENTS_END_PREFIX,
            FrameKind::CursorPosition => CURSOR_POSITION_PREFIX,
            FrameKind::FileChange => FILE_CHANGE_PREFIX,
            FrameKind::TakeControl => TAKE_CONTROL_MESSAGE,
            FrameKind::SaveFile => SAVE_FILE_MESSAGE,
        }
    }

    /// Whether this frame kind carries a `|N|payload` body.
    #[must_use]
    pub fn is_length_prefixed(self) -> bool {
        matches!(
            self,
            FrameKind::FullUpdate
                | FrameKind::ContentsStart
                | FrameKind::ContentsPart
                | FrameKind::ContentsEnd
                | FrameKind::FileChange
        )
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            FULL_UPDATE_PREFIX => Some(FrameKind::FullUpdate),
            CONTENTS_START_PREFIX => Some(FrameKind::ContentsStart),
            CONTENTS_PART_PREFIX => Some(FrameKind::ContentsPart),
            CONTENTS_END_PREFIX => Some(FrameKind::ContentsEnd),
            CURSOR_POSITION_PREFIX => Some(FrameKind::CursorPosition),
            FILE_CHANGE_PREFIX => Some(FrameKind::FileChange),
            TAKE_CONTROL_MESSAGE => Some(FrameKind::TakeControl),
            SAVE_FILE_MESSAGE => Some(FrameKind::SaveFile),
            _ => None,
        }
    }
}

/// Where in `buffer` the earliest known prefix starts, and which one it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch {
    pub start: usize,
    pub kind: FrameKind,
}

/// Scan `buffer` for the earliest occurrence of any of the seven prefixes.
///
/// Ties (two prefixes starting at the same byte) cannot occur: the prefixes
/// are themselves mutually non-prefixing except for the `VIMPAIR_CONTENTS_`
/// family, which differ immediately after the shared stem, so `find` on the
/// full prefix string is unambiguous.
#[must_use]
pub fn find_earliest_prefix(buffer: &str) -> Option<PrefixMatch> {
    ALL_PREFIXES
        .iter()
        .filter_map(|&prefix| {
            buffer.find(prefix).map(|start| PrefixMatch {
                start,
                kind: FrameKind::from_prefix(prefix).expect("ALL_PREFIXES is exhaustive"),
            })
        })
        .min_by_key(|m| m.start)
}

/// Outcome of attempting to extract one length-prefixed frame from a buffer
/// slice that starts exactly at its prefix.
pub enum ExtractOutcome<'a> {
    /// A complete frame was found; holds its payload and total byte length
    /// (prefix + markers + digits + payload) consumed from the buffer.
    Complete { payload: &'a str, consumed: usize },
    /// The buffer doesn't yet contain the full declared payload, and nothing
    /// else recognisable follows it either. The caller should stop scanning
    /// entirely and retain the prefix onward as leftover.
    Incomplete,
    /// The frame is malformed (non-digit length, missing separator). The
    /// caller should skip past the prefix and resume scanning.
    Malformed,
    /// Another known prefix starts before this frame's declared length would
    /// be satisfied — a genuine tail never arrived and a later frame took its
    /// place instead (see §4.4). The caller should skip past this prefix only
    /// and resume scanning; the later frame is picked up on the next
    /// iteration.
    Interrupted,
}

/// Parse a `PREFIX|N|<N bytes>` frame where `slice` begins at `PREFIX`.
///
/// `N`'s declared length is used verbatim. Two cases stop a frame from
/// completing:
/// - fewer than `N` bytes have arrived and nothing else recognisable
///   follows (`Incomplete`, the rest may simply not have arrived yet);
/// - another known prefix begins before byte `N` of the payload would end
///   (`Interrupted`) — the declared length can never be honoured because a
///   different frame has already claimed those bytes.
#[must_use]
pub fn extract_length_prefixed<'a>(slice: &'a str, prefix: &str) -> ExtractOutcome<'a> {
    debug_assert!(slice.starts_with(prefix));
    let after_prefix = &slice[prefix.len()..];

    let Some(rest) = after_prefix.strip_prefix(SEPARATOR) else {
        return ExtractOutcome::Malformed;
    };

    let Some(sep_pos) = rest.find(SEPARATOR) else {
        return ExtractOutcome::Malformed;
    };
    let (digits, after_length_sep) = (&rest[..sep_pos], &rest[sep_pos + 1..]);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return ExtractOutcome::Malformed;
    }
    let Ok(declared_len) = digits.parse::<usize>() else {
        return ExtractOutcome::Malformed;
    };

    if let Some(next) = find_earliest_prefix(after_length_sep) {
        if next.start < declared_len {
            return ExtractOutcome::Interrupted;
        }
    }

    if after_length_sep.len() < declared_len {
        return ExtractOutcome::Incomplete;
    }

    // Payload bytes must land on a char boundary; since the wire format is
    // ASCII-safe but payloads may carry arbitrary UTF-8, fall back to
    // Malformed rather than panicking on a mid-codepoint split.
    if !after_length_sep.is_char_boundary(declared_len) {
        return ExtractOutcome::Malformed;
    }

    let payload = &after_length_sep[..declared_len];
    let consumed = prefix.len() + 1 + digits.len() + 1 + declared_len;
    ExtractOutcome::Complete { payload, consumed }
}

/// Parse `VIMPAIR_CURSOR_POSITION|L|C` where `slice` begins at the prefix.
///
/// Both `L` and `C` must be non-negative decimal digit runs; any deviation
/// (sign, non-digit, missing separator) is rejected. Returns the parsed
/// coordinates plus the number of bytes consumed from `slice`, since the
/// column run simply stops at the first non-digit byte rather than
/// requiring a declared length.
#[must_use]
pub fn extract_cursor_position(slice: &str) -> Option<(u64, u64, usize)> {
    debug_assert!(slice.starts_with(CURSOR_POSITION_PREFIX));
    let after_prefix = &slice[CURSOR_POSITION_PREFIX.len()..];
    let rest = after_prefix.strip_prefix(SEPARATOR)?;
    let sep_pos = rest.find(SEPARATOR)?;
    let (line_digits, after_line_sep) = (&rest[..sep_pos], &rest[sep_pos + 1..]);

    if line_digits.is_empty() || !line_digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let line: u64 = line_digits.parse().ok()?;

    // The column run ends at the next non-digit byte (or end of buffer);
    // it need not be the whole remainder, since more frames may follow.
    let digit_end = after_line_sep
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(after_line_sep.len());
    let column_digits = &after_line_sep[..digit_end];
    if column_digits.is_empty() {
        return None;
    }
    let column: u64 = column_digits.parse().ok()?;

    let consumed = CURSOR_POSITION_PREFIX.len() + 1 + line_digits.len() + 1 + digit_end;
    Some((line, column, consumed))
}
