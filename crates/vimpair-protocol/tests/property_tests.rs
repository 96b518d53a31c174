//! Property-based tests for the Vimpair wire codec.
//!
//! Generates random contents/coordinates/chunk splits and checks that the
//! encoder/decoder pair agrees with itself regardless of how the bytes are
//! sliced across `decode()` calls — the thing a hand enumeration of cases
//! can't cover.

use proptest::prelude::*;
use vimpair_protocol::{
    generate_contents_update_messages, generate_cursor_position_message, Callbacks, MessageHandler,
};

/// Any Unicode scalar value, not just ASCII — §8's "for every string s"
/// invariant is only actually exercised if multi-byte characters can land on
/// a chunk boundary (997/998 bytes in), which is exactly where a naive
/// byte-offset chunker would panic mid-codepoint.
fn arbitrary_contents() -> impl Strategy<Value = String> {
    prop::string::string_regex("(?s).{0,1500}").expect("valid regex strategy")
}

fn arbitrary_coordinate() -> impl Strategy<Value = i64> {
    -10i64..1_000_000i64
}

/// The largest index `<= index` that lands on a UTF-8 char boundary of `s`.
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

proptest! {
    /// Whatever `generate_contents_update_messages` emits for `Some(contents)`,
    /// feeding every frame through a handler in one shot reproduces `contents`
    /// exactly, regardless of length (short single-frame or multi-frame split).
    #[test]
    fn contents_round_trip_through_handler(contents in arbitrary_contents()) {
        let messages = generate_contents_update_messages(Some(&contents));
        let received = std::cell::RefCell::new(None::<String>);
        let callbacks = Callbacks::new().on_update_contents(|text| {
            received.replace(Some(text.to_string()));
        });
        let mut handler = MessageHandler::new(callbacks);
        let joined: String = messages.concat();
        handler.process(&joined);

        prop_assert_eq!(received.into_inner(), Some(contents));
    }

    /// Splitting the same encoded byte stream into arbitrary chunk boundaries
    /// and feeding them one at a time must not change the final result —
    /// the handler has no notion of "chunk", only of accumulated bytes.
    #[test]
    fn contents_round_trip_is_independent_of_chunk_boundaries(
        contents in arbitrary_contents(),
        split_at in 0usize..3000usize,
    ) {
        let messages = generate_contents_update_messages(Some(&contents));
        let joined: String = messages.concat();
        let split_at = floor_char_boundary(&joined, split_at.min(joined.len()));
        let (first, second) = joined.split_at(split_at);

        let received = std::cell::RefCell::new(None::<String>);
        let callbacks = Callbacks::new().on_update_contents(|text| {
            received.replace(Some(text.to_string()));
        });
        let mut handler = MessageHandler::new(callbacks);
        handler.process(first);
        handler.process(second);

        prop_assert_eq!(received.into_inner(), Some(contents));
    }

    /// Cursor position coordinates always clamp to non-negative and decode
    /// back to exactly what a non-negative input would have produced.
    #[test]
    fn cursor_position_clamps_and_round_trips(line in arbitrary_coordinate(), column in arbitrary_coordinate()) {
        let message = generate_cursor_position_message(line, column);

        let received = std::cell::RefCell::new(None::<(u64, u64)>);
        let callbacks = Callbacks::new().on_cursor_position(|l, c| {
            received.replace(Some((l, c)));
        });
        let mut handler = MessageHandler::new(callbacks);
        handler.process(&message);

        let (decoded_line, decoded_column) = received.into_inner().expect("cursor position dispatched");
        prop_assert_eq!(decoded_line as i64, line.max(0));
        prop_assert_eq!(decoded_column as i64, column.max(0));
    }
}
