use bytes::Bytes;
use ipnetwork::IpNetwork;

use sxp_legacy::protocol::{ErrorBody, OpenBody, frame, unframe};
use sxp_legacy::{
    Action, Binding, BindingTree, ConnectionMode, Error, ErrorCode, Message, MessageBody,
    MessageType, PrefixGroup, Sgt, Source, UpdateOptions, Version, decode, encode_error,
    encode_open, encode_open_resp, encode_purge_all, encode_update,
};

fn net(s: &str) -> IpNetwork {
    s.parse().unwrap()
}

/// Answer a received frame the way a listener would during the handshake.
fn answer_open(received: Bytes, local: Version) -> Bytes {
    match decode(received) {
        Ok(message) => {
            let open = message.open().expect("open body");
            let agreed = open.version().min(local);
            encode_open_resp(agreed, ConnectionMode::Listener)
        }
        Err(err) => {
            let code = err.error_code().expect("wire errors carry a code");
            encode_error(code, &[]).unwrap()
        }
    }
}

fn database() -> BindingTree {
    BindingTree::new()
        .with_source(
            Source::new()
                .with_group(
                    PrefixGroup::new(10)
                        .with_binding(Binding::add(net("10.1.1.1/32")))
                        .with_binding(Binding::add(net("10.1.2.0/24"))),
                )
                .with_group(
                    PrefixGroup::new(20).with_binding(Binding::delete(net("2001:db8::5/128"))),
                ),
        )
        .with_source(Source::new())
        .with_source(
            Source::new().with_group(
                PrefixGroup::new(30)
                    .with_binding(
                        Binding::new(net("192.0.2.7/32"))
                            .with_action(Action::Add)
                            .with_changed(false),
                    )
                    .with_binding(Binding::new(net("192.0.2.8/32"))),
            ),
        )
}

fn decoded_tuples(message: &Message) -> Vec<(IpNetwork, Option<Sgt>, Action)> {
    message
        .records()
        .expect("update body")
        .iter()
        .map(|record| (record.prefix().unwrap(), record.sgt(), record.action()))
        .collect()
}

#[test]
fn handshake_agrees_on_lowest_version() {
    let open = encode_open(Version::V3, ConnectionMode::Speaker);
    let response = answer_open(open, Version::V2);

    let message = decode(response).unwrap();
    assert_eq!(message.message_type(), MessageType::OpenResp);
    assert_eq!(
        message.open(),
        Some(&OpenBody::new(Version::V2, ConnectionMode::Listener))
    );
}

#[test]
fn handshake_with_unknown_version_is_answered_with_error() {
    let open = frame(MessageType::Open, &[0, 0, 0, 42, 0, 0, 0, 1]).unwrap();
    let response = answer_open(open, Version::V3);

    let message = decode(response).unwrap();
    let body = message.error().expect("error body");
    assert_eq!(body.error_code(), Some(ErrorCode::VersionMismatch));
}

#[test]
fn incompatible_open_resp_maps_to_version_mismatch() {
    let response = encode_open_resp(Version::V4, ConnectionMode::Listener);

    let err = decode(response).unwrap_err();
    assert!(matches!(
        err,
        Error::IncompatiblePeerVersion {
            code: ErrorCode::VersionMismatch,
            version: 4
        }
    ));
    assert!(!err.is_framing());

    let reply = encode_error(err.error_code().unwrap(), &4u32.to_be_bytes()).unwrap();
    let (header, payload) = unframe(reply).unwrap();
    assert_eq!(header.message_type(), MessageType::Error);
    assert_eq!(payload.as_ref(), &[0, 0, 0, 1, 0, 0, 0, 4]);
}

#[test]
fn full_update_per_version() {
    let v1 = decode(
        encode_update(&database(), &UpdateOptions::new(Version::V1))
            .unwrap()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(
        decoded_tuples(&v1),
        vec![
            (net("10.1.1.1/32"), Some(Sgt(10)), Action::Add),
            (net("192.0.2.7/32"), Some(Sgt(30)), Action::Add),
        ]
    );

    let v2 = decode(
        encode_update(&database(), &UpdateOptions::new(Version::V2))
            .unwrap()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(
        decoded_tuples(&v2),
        vec![
            (net("10.1.1.1/32"), Some(Sgt(10)), Action::Add),
            (net("2001:db8::5/128"), None, Action::Delete),
            (net("192.0.2.7/32"), Some(Sgt(30)), Action::Add),
        ]
    );

    let v3 = decode(
        encode_update(&database(), &UpdateOptions::new(Version::V3))
            .unwrap()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(
        decoded_tuples(&v3),
        vec![
            (net("10.1.1.1/32"), Some(Sgt(10)), Action::Add),
            (net("10.1.2.0/24"), Some(Sgt(10)), Action::Add),
            (net("2001:db8::5/128"), None, Action::Delete),
            (net("192.0.2.7/32"), Some(Sgt(30)), Action::Add),
        ]
    );
}

#[test]
fn incremental_update_only_carries_changes() {
    let options = UpdateOptions::new(Version::V3).changed_only(true);
    let message = decode(encode_update(&database(), &options).unwrap().unwrap()).unwrap();

    assert_eq!(
        decoded_tuples(&message),
        vec![
            (net("10.1.1.1/32"), Some(Sgt(10)), Action::Add),
            (net("10.1.2.0/24"), Some(Sgt(10)), Action::Add),
            (net("2001:db8::5/128"), None, Action::Delete),
        ]
    );
}

#[test]
fn nothing_to_send_for_v1_ipv6_and_subnets() {
    let tree = BindingTree::new().with_source(
        Source::new().with_group(
            PrefixGroup::new(5)
                .with_binding(Binding::add(net("2001:db8::1/128")))
                .with_binding(Binding::delete(net("10.0.0.0/8"))),
        ),
    );

    assert_eq!(
        encode_update(&tree, &UpdateOptions::new(Version::V1)).unwrap(),
        None
    );
    assert!(
        encode_update(&tree, &UpdateOptions::new(Version::V3))
            .unwrap()
            .is_some()
    );
}

#[test]
fn encoding_for_extended_version_fails() {
    let err = encode_update(&database(), &UpdateOptions::new(Version::V4)).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedTarget {
            version: Version::V4
        }
    );
    // Local mistake, nothing to report to the peer
    assert_eq!(err.error_code(), None);
}

#[test]
fn encoded_update_is_deterministic() {
    let options = UpdateOptions::new(Version::V3);
    let first = encode_update(&database(), &options).unwrap();
    let second = encode_update(&database(), &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn purge_all_and_error_roundtrip() {
    let purge = decode(encode_purge_all()).unwrap();
    assert_eq!(purge.into_body(), MessageBody::PurgeAll);

    let data = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
    let message = decode(encode_error(ErrorCode::MessageParseError, &data).unwrap()).unwrap();
    assert_eq!(message.length(), 8 + 4 + 10);
    assert_eq!(
        message.error(),
        Some(&ErrorBody::new(ErrorCode::MessageParseError, &data).unwrap())
    );
}
