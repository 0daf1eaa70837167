//! Inbound alerts.
//!
//! The record layer hands over the body of alert records as it decrypts
//! them. A two byte alert may be split across records, and one record may
//! carry the tail of one alert and the start of the next, so bytes are
//! collected into the connection's `alert_in` buffer and each alert is
//! classified as soon as both of its bytes are present.

use crate::alert::{AlertDescription, AlertLevel, AlertRecord, ALERT_LENGTH};
use crate::config::AlertBehavior;
use crate::connection::{self, Connection};
use crate::errors::{Error, ErrorCode, InternalError, ProtocolError};
use crate::version::ProtocolVersion;

use bytes::Buf;
use log::{debug, warn};
use std::cmp::min;

/// Where inbound alert processing stopped, when it did not fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AlertStatus {
    /// Input ran out with half an alert buffered.
    Incomplete,
    /// Every complete alert was a tolerated warning.
    ConsumedAsWarning,
    /// The peer closed the connection cleanly.
    CloseNotify,
}

impl Connection {
    /// Consumes alert bytes from `input`.
    ///
    /// Returns `Err` with [`ErrorCode::Alert`] once a fatal alert is
    /// complete; the connection is closed and any bytes after the alert are
    /// left in `input`.
    pub fn process_alert_fragment<B: Buf>(&mut self, input: &mut B) -> Result<AlertStatus, Error> {
        if !input.has_remaining() {
            return Err(Error::new(ProtocolError::BadMessage));
        }
        if self.alert_in.len() == ALERT_LENGTH {
            return Err(Error::new(InternalError::AlertPresent));
        }
        if !self.alerts_supported() {
            return Err(Error::new(ProtocolError::BadMessage));
        }

        let mut status = AlertStatus::Incomplete;
        while input.has_remaining() {
            let bytes_required = if self.alert_in.len() == 1 { 1 } else { ALERT_LENGTH };
            let n = min(bytes_required, input.remaining());

            let mut chunk = [0; ALERT_LENGTH];
            input.copy_to_slice(&mut chunk[..n]);
            self.alert_in.extend_from_slice(&chunk[..n]);

            let alert = match self.received_alert() {
                Some(alert) => alert,
                None => {
                    status = AlertStatus::Incomplete;
                    continue;
                }
            };

            if alert.is_close_notify() {
                debug!("close_notify received");
                self.closed = true;
                self.close_notify_received = true;
                return Ok(AlertStatus::CloseNotify);
            }

            if self.process_as_warning(&alert) {
                debug!("ignoring warning alert {:?}", alert);
                connection::wipe_buffer(&mut self.alert_in);
                status = AlertStatus::ConsumedAsWarning;
                continue;
            }

            // RFC 5077 5.1: a session must not be resumed after an error alert
            if self.allowed_to_cache() && !self.session_id().is_empty() {
                if let Some(cache) = self.config().cache_delete() {
                    debug!("invalidating cached session after alert");
                    cache.delete(self.session_id());
                }
            }

            warn!("fatal alert received: {:?}", alert);
            self.closed = true;
            return Err(Error::new(ErrorCode::Alert));
        }

        Ok(status)
    }

    /// Whether `alert` can be dropped without closing the connection.
    ///
    /// TLS 1.3 deprecates the alert level: there only user_canceled is a
    /// warning, whatever level it arrives with and whatever the config says.
    pub fn process_as_warning(&self, alert: &AlertRecord) -> bool {
        if self.protocol_version() < ProtocolVersion::TLS13 {
            return alert.level == AlertLevel::Warning as u8
                && self.config().alert_behavior() == AlertBehavior::IgnoreWarnings;
        }
        alert.description == AlertDescription::UserCanceled as u8
    }
}
