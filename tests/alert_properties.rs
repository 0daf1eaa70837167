//! Property tests for the alert codec and inbound reassembly.

use proptest::prelude::*;
use std::sync::Arc;
use tls_alerts::errors::ProtocolError;
use tls_alerts::{
    translate, AlertBehavior, AlertRecord, AlertStatus, Config, Connection, Error, ErrorCode, Pack, ProtocolVersion,
    TranslateError,
};

fn connection(version: ProtocolVersion, behavior: AlertBehavior) -> Connection {
    let mut config = Config::new();
    config.set_alert_behavior(behavior);
    let mut conn = Connection::new_client(Arc::new(config));
    conn.set_protocol_version(version);
    conn
}

fn version() -> impl Strategy<Value = ProtocolVersion> {
    prop_oneof![
        Just(ProtocolVersion::SSLv3),
        Just(ProtocolVersion::TLS10),
        Just(ProtocolVersion::TLS11),
        Just(ProtocolVersion::TLS12),
        Just(ProtocolVersion::TLS13),
    ]
}

fn behavior() -> impl Strategy<Value = AlertBehavior> {
    prop_oneof![Just(AlertBehavior::FailOnWarnings), Just(AlertBehavior::IgnoreWarnings)]
}

/// Feeds `bytes` in the given chunk sizes, stopping at the first error.
fn feed_chunks(conn: &mut Connection, bytes: &[u8], chunks: &[usize]) -> Result<AlertStatus, Error> {
    let mut offset = 0;
    let mut status = AlertStatus::Incomplete;
    for size in chunks.iter().chain(std::iter::once(&bytes.len())) {
        if offset >= bytes.len() {
            break;
        }
        let end = std::cmp::min(offset + std::cmp::max(*size, 1), bytes.len());
        let mut input = &bytes[offset..end];
        status = conn.process_alert_fragment(&mut input)?;
        offset = end;
        if status == AlertStatus::CloseNotify {
            break;
        }
    }
    Ok(status)
}

#[derive(Debug, PartialEq)]
struct Outcome {
    result: Result<AlertStatus, ErrorCode>,
    closed: bool,
    alert: Option<u8>,
}

fn outcome(conn: &Connection, result: Result<AlertStatus, Error>) -> Outcome {
    Outcome {
        result: result.map_err(|e| e.code()),
        closed: conn.is_closed(),
        alert: conn.alert().ok(),
    }
}

proptest! {
    #[test]
    fn alert_record_round_trip(level in any::<u8>(), description in any::<u8>()) {
        let record = AlertRecord { level, description };
        let mut decoded = AlertRecord::empty();
        let rest = decoded.unpack(&mut record.pack()).expect("unpack failed");
        prop_assert!(rest.is_empty());
        prop_assert_eq!(decoded, record);
    }

    /// Any split of a stream of alerts classifies exactly like the stream
    /// delivered in one piece.
    #[test]
    fn fragmentation_equivalence(
        version in version(),
        behavior in behavior(),
        alerts in prop::collection::vec((1u8..=2, prop_oneof![Just(0u8), Just(40u8), Just(90u8), Just(100u8), any::<u8>()]), 1..4),
        chunks in prop::collection::vec(1usize..4, 0..8),
    ) {
        let bytes: Vec<u8> = alerts.iter().flat_map(|(level, description)| vec![*level, *description]).collect();

        let mut whole = connection(version, behavior);
        let mut input = &bytes[..];
        let result = whole.process_alert_fragment(&mut input);
        let expected = outcome(&whole, result);

        let mut split = connection(version, behavior);
        let result = feed_chunks(&mut split, &bytes, &chunks);
        prop_assert_eq!(outcome(&split, result), expected);
    }

    #[test]
    fn packed_protocol_codes_never_unimplemented(index in 0..ProtocolError::ALL.len()) {
        let code = ErrorCode::Protocol(ProtocolError::ALL[index]).code();
        prop_assert_ne!(translate::code_to_alert(code), Err(TranslateError::Unimplemented));
    }
}
