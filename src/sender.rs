//! Outbound alerts.
//!
//! A connection holds at most one pending alert raised by the read path
//! (protocol failures) and at most one raised by the write path (the
//! close_notify of a shutdown). Queueing onto an occupied slot is a no-op.

use crate::alert::{AlertDescription, AlertLevel, AlertRecord, ALERT_LENGTH};
use crate::connection::{self, Connection};
use crate::errors::{Error, InternalError};
use crate::record;
use crate::transport::Transport;
use crate::translate::{self, TranslateError};
use crate::version::ProtocolVersion;

use log::{debug, warn};

impl Connection {
    /// Queues a warning-level close_notify, once per connection.
    pub fn queue_close_notify(&mut self) -> Result<(), Error> {
        if !self.writer_alert_out.is_empty() || self.close_notify_queued {
            return Ok(());
        }
        if !self.alerts_supported() {
            debug!("alerts disabled, not queueing close_notify");
            return Ok(());
        }

        let alert = AlertRecord::new(AlertLevel::Warning, AlertDescription::CloseNotify);
        self.writer_alert_out.extend_from_slice(&alert.to_bytes());
        self.close_notify_queued = true;
        debug!("queued close_notify");
        Ok(())
    }

    /// Queues an alert from the read path unless one is already pending.
    pub fn queue_reader_alert(&mut self, level: AlertLevel, description: AlertDescription) -> Result<(), Error> {
        if !self.reader_alert_out.is_empty() {
            return Ok(());
        }
        if !self.alerts_supported() {
            debug!("alerts disabled, not queueing {:?}", description);
            return Ok(());
        }

        let alert = AlertRecord::new(level, description);
        self.reader_alert_out.extend_from_slice(&alert.to_bytes());
        debug!("queued {:?} {:?} alert", level, description);
        Ok(())
    }

    pub fn queue_unsupported_protocol_version_alert(&mut self) -> Result<(), Error> {
        self.queue_reader_alert(AlertLevel::Fatal, AlertDescription::ProtocolVersion)
    }

    pub fn queue_handshake_failure_alert(&mut self) -> Result<(), Error> {
        self.queue_reader_alert(AlertLevel::Fatal, AlertDescription::HandshakeFailure)
    }

    /// Refuses a renegotiation request.
    ///
    /// SSLv3 has no no_renegotiation alert and no way to refuse at warning
    /// level, so it gets a fatal handshake_failure instead (RFC 5746 4.5).
    pub fn queue_no_renegotiation_alert(&mut self) -> Result<(), Error> {
        if self.protocol_version() == ProtocolVersion::SSLv3 {
            return self.queue_reader_alert(AlertLevel::Fatal, AlertDescription::HandshakeFailure);
        }
        self.queue_reader_alert(AlertLevel::Warning, AlertDescription::NoRenegotiation)
    }

    /// Queues the fatal alert that reports `err` to the peer, if it has one.
    pub fn queue_error_alert(&mut self, err: &Error) -> Result<(), Error> {
        match translate::error_to_alert(err.code()) {
            Ok(description) => self.queue_reader_alert(AlertLevel::Fatal, description),
            Err(TranslateError::NoAlert) => Ok(()),
            Err(e) => Err(Error::new(e)),
        }
    }

    /// Marks the connection as closing after `alert` was sent, unless it is
    /// the one alert we send as a warning: no_renegotiation.
    pub fn close_if_fatal(&mut self, alert: &[u8]) -> Result<(), Error> {
        if alert.len() != ALERT_LENGTH {
            return Err(Error::new(InternalError::Safety));
        }
        if alert[1] == AlertDescription::NoRenegotiation as u8 {
            if alert[0] != AlertLevel::Warning as u8 {
                return Err(Error::new(InternalError::Safety));
            }
            return Ok(());
        }
        self.closing = true;
        Ok(())
    }

    /// Writes pending alerts to `transport`, close_notify first. A slot is
    /// only emptied once its record was sent.
    pub fn flush_alerts(&mut self, transport: &dyn Transport) -> Result<(), Error> {
        let version = self.protocol_version();

        if let Some(alert) = self.pending_writer_alert() {
            transport.send(&record::alert_record(version, alert))?;
            connection::wipe_buffer(&mut self.writer_alert_out);
        }

        if let Some(alert) = self.pending_reader_alert() {
            transport.send(&record::alert_record(version, alert))?;
            connection::wipe_buffer(&mut self.reader_alert_out);
            self.close_if_fatal(&alert.to_bytes())?;
            if self.closing {
                warn!("sent fatal alert {:?}", alert);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::errors::{ErrorCode, ProtocolError, UsageError};
    use crate::transport::Pipe;

    use std::sync::Arc;

    fn connection(version: ProtocolVersion) -> Connection {
        let mut conn = Connection::new_server(Arc::new(Config::new()));
        conn.set_protocol_version(version);
        conn
    }

    #[test]
    fn close_notify_is_queued_once() {
        let mut conn = connection(ProtocolVersion::TLS12);
        conn.queue_close_notify().expect("first queue failed");
        conn.queue_close_notify().expect("second queue failed");
        assert_eq!(
            conn.pending_writer_alert(),
            Some(AlertRecord::new(AlertLevel::Warning, AlertDescription::CloseNotify))
        );
        assert_eq!(conn.writer_alert_out.len(), ALERT_LENGTH);
        assert!(conn.close_notify_queued());
    }

    #[test]
    fn close_notify_not_requeued_after_flush() {
        let mut conn = connection(ProtocolVersion::TLS12);
        let pipe = Pipe::new();
        conn.queue_close_notify().expect("queue failed");
        conn.flush_alerts(&pipe).expect("flush failed");
        conn.queue_close_notify().expect("requeue failed");
        assert!(conn.pending_writer_alert().is_none());
        assert!(!conn.is_closing());
    }

    #[test]
    fn first_reader_alert_wins() {
        let mut conn = connection(ProtocolVersion::TLS12);
        conn.queue_handshake_failure_alert().expect("queue failed");
        conn.queue_unsupported_protocol_version_alert().expect("queue failed");
        assert_eq!(
            conn.pending_reader_alert(),
            Some(AlertRecord::new(AlertLevel::Fatal, AlertDescription::HandshakeFailure))
        );
    }

    #[test]
    fn reader_and_writer_slots_are_independent() {
        let mut conn = connection(ProtocolVersion::TLS12);
        conn.queue_unsupported_protocol_version_alert().expect("queue failed");
        conn.queue_close_notify().expect("queue failed");
        assert_eq!(conn.pending_reader_alert().and_then(|a| a.description()), Some(AlertDescription::ProtocolVersion));
        assert!(conn.pending_writer_alert().map(|a| a.is_close_notify()).unwrap_or(false));
    }

    #[test]
    fn no_renegotiation_depends_on_version() {
        let mut conn = connection(ProtocolVersion::SSLv3);
        conn.queue_no_renegotiation_alert().expect("queue failed");
        assert_eq!(conn.pending_reader_alert().map(|a| a.to_bytes()), Some([2, 40]));

        for version in &[ProtocolVersion::TLS10, ProtocolVersion::TLS12, ProtocolVersion::TLS13] {
            let mut conn = connection(*version);
            conn.queue_no_renegotiation_alert().expect("queue failed");
            assert_eq!(conn.pending_reader_alert().map(|a| a.to_bytes()), Some([1, 100]));
        }
    }

    #[test]
    fn quic_queues_nothing() {
        let mut conn = connection(ProtocolVersion::TLS13);
        conn.enable_quic();
        conn.queue_close_notify().expect("close_notify failed");
        conn.queue_handshake_failure_alert().expect("handshake_failure failed");
        conn.queue_no_renegotiation_alert().expect("no_renegotiation failed");
        conn.queue_unsupported_protocol_version_alert().expect("protocol_version failed");
        assert!(conn.pending_reader_alert().is_none());
        assert!(conn.pending_writer_alert().is_none());
        assert!(!conn.close_notify_queued());
    }

    #[test]
    fn close_if_fatal() {
        let mut conn = connection(ProtocolVersion::TLS12);
        conn.close_if_fatal(&[1, 100]).expect("warning no_renegotiation failed");
        assert!(!conn.is_closing());

        let err = conn.close_if_fatal(&[2, 100]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Internal(InternalError::Safety));
        assert!(!conn.is_closing());

        let err = conn.close_if_fatal(&[2]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Internal(InternalError::Safety));

        conn.close_if_fatal(&[1, 90]).expect("user_canceled failed");
        assert!(conn.is_closing());
    }

    #[test]
    fn error_alerts() {
        let mut conn = connection(ProtocolVersion::TLS12);
        conn.queue_error_alert(&Error::new(UsageError::InvalidArgument)).expect("usage error failed");
        assert!(conn.pending_reader_alert().is_none());

        conn.queue_error_alert(&Error::new(ProtocolError::MissingExtension)).expect("protocol error failed");
        assert_eq!(conn.pending_reader_alert().map(|a| a.to_bytes()), Some([2, 109]));
    }

    #[test]
    fn flush_writes_records_in_order() {
        let mut conn = connection(ProtocolVersion::TLS12);
        let pipe = Pipe::new();
        conn.queue_handshake_failure_alert().expect("queue failed");
        conn.queue_close_notify().expect("queue failed");
        conn.flush_alerts(&pipe).expect("flush failed");

        assert_eq!(pipe.written(), hex::decode("1503030002010015030300020228").expect("decode failed"));
        assert!(conn.pending_reader_alert().is_none());
        assert!(conn.pending_writer_alert().is_none());
        assert!(conn.is_closing());
    }

    #[test]
    fn failed_flush_keeps_alert() {
        let mut conn = connection(ProtocolVersion::TLS12);
        let pipe = Pipe::new();
        pipe.shutdown();
        conn.queue_handshake_failure_alert().expect("queue failed");
        let err = conn.flush_alerts(&pipe).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Io);
        assert!(conn.pending_reader_alert().is_some());
        assert!(!conn.is_closing());
    }
}
