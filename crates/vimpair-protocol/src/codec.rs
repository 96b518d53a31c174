//! Tokio codec for the Vimpair wire protocol.
//!
//! `VimpairCodec` wraps [`MessageHandler`]: it feeds incoming bytes to the
//! handler and yields whatever callbacks it fired. Since `MessageHandler` is
//! callback-driven rather than frame-returning, the codec's
//! [`Decoder::Item`] is a [`DecodedEvent`] enum, queued in callback order by
//! an internal [`VecDeque`] and drained one per `decode()` call.
//!
//! # DoS protection
//!
//! An optional `max_frame_size` bound rejects any single buffer admitted
//! for decoding (or frame produced for encoding) above the configured size.
//! The core [`MessageHandler`] itself has no such cap — the bound lives
//! here, at the transport-adjacent edge, exactly as described in the
//! protocol notes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use vimpair_core::{Error, HandlerConfig, Result};

use crate::callbacks::Callbacks;
use crate::encode::{
    generate_contents_update_messages, generate_cursor_position_message,
    generate_file_change_message, generate_save_file_message, generate_take_control_message,
};
use crate::handler::MessageHandler;

/// One event produced by the decoder side of [`VimpairCodec`], mirroring the
/// five-sink [`Callbacks`] surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedEvent {
    ContentsUpdated(String),
    CursorMoved { line: u64, column: u64 },
    ControlTaken,
    FileChanged(String),
    SaveRequested,
}

/// An outbound editor event to encode onto the wire.
///
/// `ContentsUpdate` may expand into more than one frame (see
/// [`crate::encode::generate_contents_update_messages`]); every other
/// variant is exactly one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMessage {
    ContentsUpdate(Option<String>),
    CursorPosition { line: i64, column: i64 },
    FileChange { filename: String, folderpath: Option<String>, conceal_path: bool },
    SaveFile,
    TakeControl,
}

/// Tokio codec pairing [`MessageHandler`] (decode) with the stateless
/// `encode` functions (encode).
pub struct VimpairCodec {
    handler: MessageHandler<'static>,
    events: Arc<Mutex<VecDeque<DecodedEvent>>>,
    max_frame_size: Option<usize>,
}

impl VimpairCodec {
    /// Create a codec with no frame-size bound.
    #[must_use]
    pub fn new() -> Self {
        let events: Arc<Mutex<VecDeque<DecodedEvent>>> = Arc::new(Mutex::new(VecDeque::new()));
        let callbacks = build_callbacks(&events);
        Self {
            handler: MessageHandler::new(callbacks),
            events,
            max_frame_size: None,
        }
    }

    /// Create a codec that rejects any admitted buffer or produced frame
    /// larger than `max_frame_size` bytes.
    #[must_use]
    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        let mut codec = Self::new();
        codec.max_frame_size = Some(max_frame_size);
        codec
    }

    /// Create a codec from a host-supplied [`HandlerConfig`].
    #[must_use]
    pub fn from_config(config: &HandlerConfig) -> Self {
        match config.max_frame_size {
            Some(max) => Self::with_max_frame_size(max),
            None => Self::new(),
        }
    }

    /// The configured frame-size bound, if any.
    #[must_use]
    pub fn max_frame_size(&self) -> Option<usize> {
        self.max_frame_size
    }

    fn check_frame_size(&self, size: usize) -> Result<()> {
        if let Some(max) = self.max_frame_size {
            if size > max {
                return Err(Error::FrameTooLarge { size, max_size: max });
            }
        }
        Ok(())
    }
}

impl Default for VimpairCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn build_callbacks(events: &Arc<Mutex<VecDeque<DecodedEvent>>>) -> Callbacks<'static> {
    let contents = Arc::clone(events);
    let cursor = Arc::clone(events);
    let control = Arc::clone(events);
    let file = Arc::clone(events);
    let save = Arc::clone(events);

    Callbacks::new()
        .on_update_contents(move |text| {
            contents
                .lock()
                .unwrap()
                .push_back(DecodedEvent::ContentsUpdated(text.to_string()));
        })
        .on_cursor_position(move |line, column| {
            cursor
                .lock()
                .unwrap()
                .push_back(DecodedEvent::CursorMoved { line, column });
        })
        .on_take_control(move || {
            control.lock().unwrap().push_back(DecodedEvent::ControlTaken);
        })
        .on_file_changed(move |filename| {
            file.lock()
                .unwrap()
                .push_back(DecodedEvent::FileChanged(filename.to_string()));
        })
        .on_save_file(move || {
            save.lock().unwrap().push_back(DecodedEvent::SaveRequested);
        })
}

impl Decoder for VimpairCodec {
    type Item = DecodedEvent;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if let Some(event) = self.events.lock().unwrap().pop_front() {
            return Ok(Some(event));
        }

        if src.is_empty() {
            return Ok(None);
        }

        self.check_frame_size(src.len())?;

        let chunk = std::str::from_utf8(src)?;
        self.handler.process(chunk);
        src.clear();

        Ok(self.events.lock().unwrap().pop_front())
    }
}

impl Encoder<OutgoingMessage> for VimpairCodec {
    type Error = Error;

    fn encode(&mut self, item: OutgoingMessage, dst: &mut BytesMut) -> Result<()> {
        let frames: Vec<String> = match item {
            OutgoingMessage::ContentsUpdate(contents) => {
                generate_contents_update_messages(contents.as_deref())
            }
            OutgoingMessage::CursorPosition { line, column } => {
                vec![generate_cursor_position_message(line, column)]
            }
            OutgoingMessage::FileChange { filename, folderpath, conceal_path } => {
                vec![generate_file_change_message(
                    &filename,
                    folderpath.as_deref(),
                    conceal_path,
                )]
            }
            OutgoingMessage::SaveFile => vec![generate_save_file_message()],
            OutgoingMessage::TakeControl => vec![generate_take_control_message()],
        };

        for frame in frames {
            self.check_frame_size(frame.len())?;
            dst.extend_from_slice(frame.as_bytes());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_complete_full_update() {
        let mut codec = VimpairCodec::new();
        let mut buffer = BytesMut::from(&b"VIMPAIR_FULL_UPDATE|14|Some Contents."[..]);

        let event = codec.decode(&mut buffer).unwrap();
        assert_eq!(
            event,
            Some(DecodedEvent::ContentsUpdated("Some Contents.".to_string()))
        );
    }

    #[test]
    fn partial_frame_yields_no_event_yet() {
        let mut codec = VimpairCodec::new();
        let mut buffer = BytesMut::from(&b"VIMPAIR_FULL_UPDATE|5|Sh"[..]);

        assert_eq!(codec.decode(&mut buffer).unwrap(), None);

        let mut rest = BytesMut::from(&b"ort"[..]);
        assert_eq!(
            codec.decode(&mut rest).unwrap(),
            Some(DecodedEvent::ContentsUpdated("Short".to_string()))
        );
    }

    #[test]
    fn drains_multiple_events_one_per_decode_call() {
        let mut codec = VimpairCodec::new();
        let mut buffer = BytesMut::from(
            &b"VIMPAIR_CURSOR_POSITION|1|1VIMPAIR_FULL_UPDATE|17|multiline\ncontent"[..],
        );

        assert_eq!(
            codec.decode(&mut buffer).unwrap(),
            Some(DecodedEvent::CursorMoved { line: 1, column: 1 })
        );
        assert_eq!(
            codec.decode(&mut BytesMut::new()).unwrap(),
            Some(DecodedEvent::ContentsUpdated("multiline\ncontent".to_string()))
        );
        assert_eq!(codec.decode(&mut BytesMut::new()).unwrap(), None);
    }

    #[test]
    fn decode_rejects_oversized_buffer() {
        let mut codec = VimpairCodec::with_max_frame_size(8);
        let mut buffer = BytesMut::from(&b"VIMPAIR_FULL_UPDATE|14|Some Contents."[..]);

        let err = codec.decode(&mut buffer).unwrap_err();
        assert!(matches!(err, Error::FrameTooLarge { .. }));
    }

    #[test]
    fn encode_full_update_round_trips_through_decode() {
        let mut codec = VimpairCodec::new();
        let mut buffer = BytesMut::new();
        codec
            .encode(
                OutgoingMessage::ContentsUpdate(Some("hello".to_string())),
                &mut buffer,
            )
            .unwrap();

        let event = codec.decode(&mut buffer).unwrap();
        assert_eq!(event, Some(DecodedEvent::ContentsUpdated("hello".to_string())));
    }

    #[test]
    fn encode_take_control_directive() {
        let mut codec = VimpairCodec::new();
        let mut buffer = BytesMut::new();
        codec.encode(OutgoingMessage::TakeControl, &mut buffer).unwrap();
        assert_eq!(&buffer[..], b"VIMPAIR_TAKE_CONTROL");
    }

    #[test]
    fn from_config_applies_max_frame_size() {
        let config = vimpair_core::HandlerConfig { max_frame_size: Some(8) };
        let codec = VimpairCodec::from_config(&config);
        assert_eq!(codec.max_frame_size(), Some(8));
    }
}
