//! Integration tests for [`VimpairCodec`] over real Tokio streams.
//!
//! Mirrors what a client/follower pair actually does: one side frames
//! `OutgoingMessage`s onto a duplex stream, the other decodes whatever
//! [`DecodedEvent`]s arrive, possibly split across several reads.

use futures::{SinkExt, StreamExt};
use tokio::io::DuplexStream;
use tokio_util::codec::Framed;
use vimpair_protocol::{DecodedEvent, OutgoingMessage, VimpairCodec};

fn create_framed_duplex(
    buffer_size: usize,
) -> (
    Framed<DuplexStream, VimpairCodec>,
    Framed<DuplexStream, VimpairCodec>,
) {
    let (client, server) = tokio::io::duplex(buffer_size);
    let client_framed = Framed::new(client, VimpairCodec::new());
    let server_framed = Framed::new(server, VimpairCodec::new());
    (client_framed, server_framed)
}

#[tokio::test]
async fn roundtrip_full_update() {
    let (mut leader, mut follower) = create_framed_duplex(4096);

    leader
        .send(OutgoingMessage::ContentsUpdate(Some("fn main() {}".to_string())))
        .await
        .unwrap();

    let event = follower.next().await.unwrap().unwrap();
    assert_eq!(
        event,
        DecodedEvent::ContentsUpdated("fn main() {}".to_string())
    );
}

#[tokio::test]
async fn roundtrip_cursor_position() {
    let (mut leader, mut follower) = create_framed_duplex(4096);

    leader
        .send(OutgoingMessage::CursorPosition { line: 12, column: 4 })
        .await
        .unwrap();

    let event = follower.next().await.unwrap().unwrap();
    assert_eq!(event, DecodedEvent::CursorMoved { line: 12, column: 4 });
}

#[tokio::test]
async fn roundtrip_file_change_with_concealed_folderpath() {
    let (mut leader, mut follower) = create_framed_duplex(4096);

    leader
        .send(OutgoingMessage::FileChange {
            filename: "main.rs".to_string(),
            folderpath: Some("/home/alice/project/src".to_string()),
            conceal_path: true,
        })
        .await
        .unwrap();

    let event = follower.next().await.unwrap().unwrap();
    match event {
        DecodedEvent::FileChanged(path) => {
            assert!(path.ends_with("/main.rs"));
            assert!(!path.contains("/home/alice"));
        }
        other => panic!("expected FileChanged, got {other:?}"),
    }
}

#[tokio::test]
async fn roundtrip_save_file_and_take_control() {
    let (mut leader, mut follower) = create_framed_duplex(4096);

    leader.send(OutgoingMessage::SaveFile).await.unwrap();
    leader.send(OutgoingMessage::TakeControl).await.unwrap();

    assert_eq!(follower.next().await.unwrap().unwrap(), DecodedEvent::SaveRequested);
    assert_eq!(follower.next().await.unwrap().unwrap(), DecodedEvent::ControlTaken);
}

#[tokio::test]
async fn long_contents_update_splits_and_reassembles_across_the_wire() {
    let (mut leader, mut follower) = create_framed_duplex(8192);

    let contents = "x".repeat(2500);
    leader
        .send(OutgoingMessage::ContentsUpdate(Some(contents.clone())))
        .await
        .unwrap();

    let event = follower.next().await.unwrap().unwrap();
    assert_eq!(event, DecodedEvent::ContentsUpdated(contents));
}

#[tokio::test]
async fn absent_contents_sends_no_frame() {
    let (mut leader, mut follower) = create_framed_duplex(1024);

    leader
        .send(OutgoingMessage::ContentsUpdate(None))
        .await
        .unwrap();
    // Nothing was written to the wire, so a well-formed follow-up message
    // is the next and only thing observed.
    leader
        .send(OutgoingMessage::SaveFile)
        .await
        .unwrap();

    let event = follower.next().await.unwrap().unwrap();
    assert_eq!(event, DecodedEvent::SaveRequested);
}

#[tokio::test]
async fn oversized_frame_is_rejected_on_decode() {
    let (client, server) = tokio::io::duplex(4096);
    let mut client = Framed::new(client, VimpairCodec::new());
    let mut server = Framed::new(server, VimpairCodec::with_max_frame_size(16));

    client
        .send(OutgoingMessage::ContentsUpdate(Some("x".repeat(100))))
        .await
        .unwrap();

    let result = server.next().await.unwrap();
    assert!(result.is_err());
}
