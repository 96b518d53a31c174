pub mod callbacks;
pub mod codec;
pub mod encode;
pub mod frame;
pub mod handler;
pub mod sink;

pub use callbacks::Callbacks;
pub use codec::{DecodedEvent, OutgoingMessage, VimpairCodec};
pub use encode::{
    generate_contents_update_messages, generate_cursor_position_message,
    generate_file_change_message, generate_file_change_message_with_options,
    generate_save_file_message, generate_take_control_message,
};
pub use frame::{extract_cursor_position, extract_length_prefixed, find_earliest_prefix, ExtractOutcome, FrameKind, PrefixMatch};
pub use handler::MessageHandler;
pub use sink::MessageSink;
