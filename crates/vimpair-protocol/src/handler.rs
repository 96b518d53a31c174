//! The streaming decoder: [`MessageHandler`].
//!
//! Owns the leftover buffer and the pending multi-part update accumulator,
//! scans each admitted chunk for known prefixes, and dispatches to a
//! [`Callbacks`] set. Grounded in the teacher's `StreamParser` — same shape
//! of "admit, scan, dispatch, retain tail" — generalised from fixed-length
//! STX/ETX frames to this protocol's length-prefixed and bare frames.

use tracing::{debug, trace};

use vimpair_core::constants::TAKE_CONTROL_MESSAGE;

use crate::callbacks::Callbacks;
use crate::frame::{extract_cursor_position, extract_length_prefixed, find_earliest_prefix, ExtractOutcome, FrameKind};

/// Result of attempting to extract one length-prefixed frame during a scan
/// step, with the length/malformed/interrupted bookkeeping collapsed into
/// the two actions the scan loop actually takes.
enum FrameOutcome<'a> {
    Dispatched { payload: &'a str, consumed: usize },
    Stalled,
    Skip { skip: usize },
}

fn classify_length_prefixed<'a>(frame_slice: &'a str, prefix: &str) -> FrameOutcome<'a> {
    match extract_length_prefixed(frame_slice, prefix) {
        ExtractOutcome::Complete { payload, consumed } => FrameOutcome::Dispatched { payload, consumed },
        ExtractOutcome::Incomplete => FrameOutcome::Stalled,
        ExtractOutcome::Malformed | ExtractOutcome::Interrupted => FrameOutcome::Skip { skip: prefix.len() },
    }
}

/// Stateful streaming decoder for the Vimpair wire protocol.
///
/// A single instance is meant to live for the lifetime of one connection.
/// Feed it chunks as they arrive, in order, via [`process`](Self::process)
/// or [`process_all`](Self::process_all); it dispatches to its
/// [`Callbacks`] inline and keeps any unconsumed tail for the next call.
pub struct MessageHandler<'a> {
    leftover: String,
    pending_update: Option<String>,
    callbacks: Callbacks<'a>,
}

impl<'a> MessageHandler<'a> {
    /// Build a decoder around a callback set. Missing sinks are no-ops.
    #[must_use]
    pub fn new(callbacks: Callbacks<'a>) -> Self {
        Self {
            leftover: String::new(),
            pending_update: None,
            callbacks,
        }
    }

    /// Feed chunks in order, identical to calling [`process`](Self::process)
    /// once per item.
    pub fn process_all<I>(&mut self, chunks: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for chunk in chunks {
            self.process(chunk.as_ref());
        }
    }

    /// Admit one chunk of bytes, dispatching any frames it completes.
    ///
    /// Never panics and never returns an error: malformed input simply
    /// fails to produce callbacks, per the infallible `process` contract.
    pub fn process(&mut self, chunk: &str) {
        let mut working = std::mem::take(&mut self.leftover);
        working.push_str(chunk);

        let mut take_control_pending = false;
        if let Some(tc_pos) = working.find(TAKE_CONTROL_MESSAGE) {
            working.truncate(tc_pos);
            take_control_pending = true;
        }

        let mut pos = 0usize;
        loop {
            let remaining = &working[pos..];
            let Some(found) = find_earliest_prefix(remaining) else {
                break;
            };
            let frame_start = pos + found.start;
            let frame_slice = &working[frame_start..];

            match found.kind {
                FrameKind::TakeControl => {
                    // Unreachable once the take-control split above has run:
                    // the working buffer no longer contains the marker. Kept
                    // as a defensive, totality-preserving arm.
                    pos = frame_start + found.kind.prefix().len();
                }
                FrameKind::SaveFile => {
                    trace!(prefix = found.kind.prefix(), "dispatching bare frame");
                    self.callbacks.save_file();
                    pos = frame_start + found.kind.prefix().len();
                }
                FrameKind::CursorPosition => match extract_cursor_position(frame_slice) {
                    Some((line, column, consumed)) => {
                        trace!(line, column, "dispatching cursor position");
                        self.pending_update = None;
                        self.callbacks.apply_cursor_position(line, column);
                        pos = frame_start + consumed;
                    }
                    None => {
                        debug!(prefix = found.kind.prefix(), "malformed cursor position, resynchronising");
                        pos = frame_start + found.kind.prefix().len();
                    }
                },
                kind => match classify_length_prefixed(frame_slice, kind.prefix()) {
                    FrameOutcome::Dispatched { payload, consumed } => {
                        trace!(prefix = kind.prefix(), len = payload.len(), "dispatching frame");
                        match kind {
                            FrameKind::FullUpdate => {
                                self.pending_update = None;
                                self.callbacks.update_contents(payload);
                            }
                            FrameKind::FileChange => {
                                self.pending_update = None;
                                self.callbacks.file_changed(payload);
                            }
                            FrameKind::ContentsStart => {
                                self.pending_update = Some(payload.to_string());
                            }
                            FrameKind::ContentsPart => {
                                if let Some(p) = self.pending_update.as_mut() {
                                    p.push_str(payload);
                                }
                            }
                            FrameKind::ContentsEnd => {
                                if let Some(mut p) = self.pending_update.take() {
                                    p.push_str(payload);
                                    self.callbacks.update_contents(&p);
                                }
                            }
                            FrameKind::TakeControl | FrameKind::SaveFile | FrameKind::CursorPosition => {
                                unreachable!("handled in the outer match arms above")
                            }
                        }
                        pos = frame_start + consumed;
                    }
                    FrameOutcome::Stalled => {
                        self.leftover = working[frame_start..].to_string();
                        self.finish_take_control(take_control_pending);
                        return;
                    }
                    FrameOutcome::Skip { skip } => {
                        debug!(prefix = kind.prefix(), "frame failed, resynchronising past prefix");
                        pos = frame_start + skip;
                    }
                },
            }
        }

        self.leftover = working[pos..].to_string();
        self.finish_take_control(take_control_pending);
    }

    fn finish_take_control(&mut self, take_control_pending: bool) {
        if take_control_pending {
            trace!("dispatching take control");
            self.callbacks.take_control();
            self.pending_update = None;
            // Control just transferred to the peer; whatever pre-marker
            // bytes were still unconsumed (a stalled partial frame, or
            // unrecognised trailing garbage) belonged to the conversation
            // we just gave up. Keeping them as leftover would mis-frame
            // the next chunk against a half-frame the peer never intended
            // to complete.
            self.leftover.clear();
        }
    }
}
