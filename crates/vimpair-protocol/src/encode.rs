//! Stateless wire-format encoders.
//!
//! Each function turns one editor event into its canonical wire
//! representation. None of them can fail: out-of-range input is clamped or
//! produces an intentionally empty payload, never an `Err`.

use sha2::{Digest, Sha224};

use vimpair_core::constants::{
    CONTENTS_END_PREFIX, CONTENTS_PART_CAPACITY, CONTENTS_PART_PREFIX, CONTENTS_START_CAPACITY,
    CONTENTS_START_PREFIX, CURSOR_POSITION_PREFIX, FILE_CHANGE_PREFIX, FULL_UPDATE_PREFIX,
    SAVE_FILE_MESSAGE, SEPARATOR, TAKE_CONTROL_MESSAGE,
};
use vimpair_core::{CursorPosition, FileChangeOptions};

fn length_prefixed_frame(prefix: &str, payload: &str) -> String {
    format!("{prefix}{SEPARATOR}{}{SEPARATOR}{payload}", payload.len())
}

/// The largest index `<= index` that lands on a UTF-8 char boundary of `s`.
///
/// Used to cap a chunk at `index` bytes without ever splitting a multi-byte
/// scalar in half — `str::split_at` panics on exactly that mid-codepoint
/// case, which a naive byte-offset chunker would hit on any content whose
/// 997th or 998th byte falls inside a multi-byte character.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Build the ordered sequence of frames that reproduce `contents` on the
/// follower's side.
///
/// `None` yields no frames at all; `Some("")` yields a single empty
/// `FULL_UPDATE` — these are deliberately distinct outcomes (see §8).
/// Each chunk boundary falls on a char boundary, so a chunk may carry a few
/// bytes fewer than its nominal capacity when a multi-byte character would
/// otherwise straddle it.
#[must_use]
pub fn generate_contents_update_messages(contents: Option<&str>) -> Vec<String> {
    let Some(contents) = contents else {
        return Vec::new();
    };

    if contents.len() <= CONTENTS_START_CAPACITY {
        return vec![length_prefixed_frame(FULL_UPDATE_PREFIX, contents)];
    }

    let mut messages = Vec::new();
    let (start, mut rest) = contents.split_at(floor_char_boundary(contents, CONTENTS_START_CAPACITY));
    messages.push(length_prefixed_frame(CONTENTS_START_PREFIX, start));

    while rest.len() > CONTENTS_PART_CAPACITY {
        let (part, remainder) = rest.split_at(floor_char_boundary(rest, CONTENTS_PART_CAPACITY));
        messages.push(length_prefixed_frame(CONTENTS_PART_PREFIX, part));
        rest = remainder;
    }
    messages.push(length_prefixed_frame(CONTENTS_END_PREFIX, rest));
    messages
}

/// Build a `VIMPAIR_CURSOR_POSITION` frame, clamping negative or absent
/// coordinates to zero.
#[must_use]
pub fn generate_cursor_position_message(line: i64, column: i64) -> String {
    let pos = CursorPosition::clamped(line, column);
    format!("{CURSOR_POSITION_PREFIX}{SEPARATOR}{pos}")
}

/// Build a `VIMPAIR_FILE_CHANGE` frame.
///
/// `filename` is trimmed; an empty result after trimming yields an empty
/// payload. A present `folderpath` is prepended (hashed to its SHA-224 hex
/// digest first when `conceal_path` is set); the filename itself is never
/// hashed.
#[must_use]
pub fn generate_file_change_message(
    filename: &str,
    folderpath: Option<&str>,
    conceal_path: bool,
) -> String {
    let filename = filename.trim();
    let payload = if filename.is_empty() {
        String::new()
    } else {
        match folderpath {
            None => filename.to_string(),
            Some(folderpath) if conceal_path => {
                format!("{}/{filename}", sha224_hex(folderpath))
            }
            Some(folderpath) => format!("{folderpath}/{filename}"),
        }
    };
    length_prefixed_frame(FILE_CHANGE_PREFIX, &payload)
}

/// Build a `VIMPAIR_FILE_CHANGE` frame from a host-supplied
/// [`FileChangeOptions`] rather than loose arguments — the shape a host
/// application populates once from its own config and reuses per call.
#[must_use]
pub fn generate_file_change_message_with_options(filename: &str, options: &FileChangeOptions) -> String {
    generate_file_change_message(filename, options.folderpath.as_deref(), options.conceal_path)
}

fn sha224_hex(input: &str) -> String {
    let digest = Sha224::digest(input.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Build the bare `VIMPAIR_SAVE_FILE` directive.
#[must_use]
pub fn generate_save_file_message() -> String {
    SAVE_FILE_MESSAGE.to_string()
}

/// Build the bare `VIMPAIR_TAKE_CONTROL` directive.
#[must_use]
pub fn generate_take_control_message() -> String {
    TAKE_CONTROL_MESSAGE.to_string()
}
