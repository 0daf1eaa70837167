use crate::alert::{AlertRecord, ALERT_LENGTH};
use crate::config::Config;
use crate::errors::{Error, InternalError, UsageError};
use crate::version::ProtocolVersion;

use bytes::BytesMut;
use std::sync::Arc;

/// Longest session id TLS allows.
pub const MAX_SESSION_ID_LEN: usize = 32;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Client,
    Server,
}

/// One side of a TLS connection, as far as alerts are concerned.
///
/// A connection is driven by one thread at a time; nothing here is
/// synchronized.
#[derive(Debug)]
pub struct Connection {
    config: Arc<Config>,
    mode: Mode,
    actual_protocol_version: ProtocolVersion,
    quic_enabled: bool,
    session_id: Vec<u8>,
    caching_disabled: bool,

    // Inbound alert being reassembled, never more than ALERT_LENGTH bytes.
    pub(crate) alert_in: BytesMut,
    // At most one pending alert each.
    pub(crate) reader_alert_out: BytesMut,
    pub(crate) writer_alert_out: BytesMut,

    pub(crate) closed: bool,
    pub(crate) closing: bool,
    pub(crate) close_notify_received: bool,
    pub(crate) close_notify_queued: bool,
}

impl Connection {
    pub fn new(mode: Mode, config: Arc<Config>) -> Self {
        Self {
            config,
            mode,
            actual_protocol_version: ProtocolVersion::TLS13,
            quic_enabled: false,
            session_id: Vec::new(),
            caching_disabled: false,
            alert_in: BytesMut::with_capacity(ALERT_LENGTH),
            reader_alert_out: BytesMut::with_capacity(ALERT_LENGTH),
            writer_alert_out: BytesMut::with_capacity(ALERT_LENGTH),
            closed: false,
            closing: false,
            close_notify_received: false,
            close_notify_queued: false,
        }
    }

    pub fn new_client(config: Arc<Config>) -> Self {
        Self::new(Mode::Client, config)
    }

    pub fn new_server(config: Arc<Config>) -> Self {
        Self::new(Mode::Server, config)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_config(&mut self, config: Arc<Config>) -> &mut Self {
        self.config = config;
        self
    }

    /// Records the version the handshake settled on.
    pub fn set_protocol_version(&mut self, version: ProtocolVersion) -> &mut Self {
        self.actual_protocol_version = version;
        self
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.actual_protocol_version
    }

    /// Hands alerting to the QUIC transport. No alerts are sent or
    /// received by this connection afterwards.
    pub fn enable_quic(&mut self) -> &mut Self {
        self.quic_enabled = true;
        self
    }

    pub fn is_quic_enabled(&self) -> bool {
        self.quic_enabled
    }

    pub(crate) fn alerts_supported(&self) -> bool {
        !self.quic_enabled
    }

    pub fn set_session_id(&mut self, session_id: &[u8]) -> Result<&mut Self, Error> {
        if session_id.len() > MAX_SESSION_ID_LEN {
            return Err(Error::new(UsageError::SessionIdTooLong));
        }
        self.session_id = session_id.to_vec();
        Ok(self)
    }

    pub fn session_id(&self) -> &[u8] {
        &self.session_id
    }

    /// Opts this connection out of session caching even if the config
    /// enables it.
    pub fn disable_session_caching(&mut self) -> &mut Self {
        self.caching_disabled = true;
        self
    }

    pub fn allowed_to_cache(&self) -> bool {
        self.config.session_cache_enabled() && !self.caching_disabled
    }

    /// Description of the alert that ended the connection: close_notify or
    /// a fatal alert from the peer.
    pub fn alert(&self) -> Result<u8, Error> {
        self.received_alert()
            .map(|alert| alert.description)
            .ok_or_else(|| Error::new(UsageError::NoAlert))
    }

    pub(crate) fn received_alert(&self) -> Option<AlertRecord> {
        match self.alert_in.len() {
            ALERT_LENGTH => Some(AlertRecord::from_bytes([self.alert_in[0], self.alert_in[1]])),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Set once a fatal alert has been sent to the peer.
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    pub fn close_notify_received(&self) -> bool {
        self.close_notify_received
    }

    pub fn close_notify_queued(&self) -> bool {
        self.close_notify_queued
    }

    pub fn pending_reader_alert(&self) -> Option<AlertRecord> {
        pending(&self.reader_alert_out)
    }

    pub fn pending_writer_alert(&self) -> Option<AlertRecord> {
        pending(&self.writer_alert_out)
    }

    /// Frees the alert buffers of an idle connection. Fails while half an
    /// alert is still waiting for its second byte.
    pub fn release_buffers(&mut self) -> Result<&mut Self, Error> {
        if self.alert_in.len() % ALERT_LENGTH != 0 {
            return Err(Error::new(InternalError::StufferHasUnprocessedData));
        }
        for buf in [&mut self.alert_in, &mut self.reader_alert_out, &mut self.writer_alert_out].iter_mut() {
            if buf.is_empty() {
                **buf = BytesMut::new();
            }
        }
        Ok(self)
    }

    /// Clears all alert state so the connection can be reused. Config,
    /// mode and version are kept.
    pub fn wipe(&mut self) -> &mut Self {
        wipe_buffer(&mut self.alert_in);
        wipe_buffer(&mut self.reader_alert_out);
        wipe_buffer(&mut self.writer_alert_out);
        self.session_id.clear();
        self.closed = false;
        self.closing = false;
        self.close_notify_received = false;
        self.close_notify_queued = false;
        self
    }
}

fn pending(slot: &BytesMut) -> Option<AlertRecord> {
    match slot.len() {
        ALERT_LENGTH => Some(AlertRecord::from_bytes([slot[0], slot[1]])),
        _ => None,
    }
}

/// Zeroes and empties a buffer.
pub(crate) fn wipe_buffer(buf: &mut BytesMut) {
    for b in buf.iter_mut() {
        *b = 0;
    }
    buf.clear();
}
