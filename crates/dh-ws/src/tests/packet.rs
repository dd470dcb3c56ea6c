use crate::{ConnectionId, Packet, WsError};

use serde_json::json;

#[test]
fn given_connect_packet_when_encoded_then_tagged_with_sid() {
    // Given
    let sid = ConnectionId::new();

    // When
    let text = Packet::Connect { sid }.encode().unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    // Then
    assert_eq!(value["type"], json!("connect"));
    assert_eq!(value["sid"], json!(sid.to_string()));
}

#[test]
fn given_disconnect_text_when_decoded_then_disconnect() {
    let packet = Packet::decode(r#"{"type":"disconnect"}"#).unwrap();

    assert_eq!(packet, Packet::Disconnect);
}

#[test]
fn given_event_without_data_when_decoded_then_null_data() {
    let packet = Packet::decode(r#"{"type":"event","name":"ping"}"#).unwrap();

    assert_eq!(
        packet,
        Packet::Event {
            name: "ping".to_string(),
            data: serde_json::Value::Null,
        }
    );
}

#[test]
fn given_unknown_type_when_decoded_then_invalid_packet() {
    let result = Packet::decode(r#"{"type":"upgrade"}"#);

    assert!(matches!(result, Err(WsError::InvalidPacket { .. })));
}

#[test]
fn given_connect_with_malformed_sid_when_decoded_then_invalid_packet() {
    let result = Packet::decode(r#"{"type":"connect","sid":"not-a-uuid"}"#);

    assert!(matches!(result, Err(WsError::InvalidPacket { .. })));
}
