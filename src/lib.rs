//!# TLS Alerts
//! The alert protocol of a TLS stack.
//!
//! `TLS Alerts` classifies failures into a layered error taxonomy, maps
//! protocol failures onto the alerts sent to a peer, reassembles inbound
//! alerts that arrive fragmented or coalesced, and queues outbound alerts.
//!
//! Record encryption, the handshake and certificate validation live
//! elsewhere; this crate only sees alert record bodies.
//!

#[macro_use]
extern crate enum_primitive_derive;
extern crate num_traits;

pub mod alert;
pub mod config;
pub mod connection;
pub mod errors;
pub mod last_error;
mod pack;
pub mod receiver;
pub mod record;
pub mod sender;
pub mod translate;
pub mod version;
pub mod transport {
    pub mod pipe;
    pub mod transport;
    pub mod udp;

    pub use self::pipe::Pipe;
    pub use self::transport::Transport;
    pub use self::udp::Udp;
}

pub use crate::alert::{AlertDescription, AlertLevel, AlertRecord, ALERT_LENGTH};
pub use crate::config::{AlertBehavior, Config, SessionCacheDelete};
pub use crate::connection::{Connection, Mode};
pub use crate::errors::{Error, ErrorCode, ErrorType};
pub use crate::pack::Pack;
pub use crate::receiver::AlertStatus;
pub use crate::translate::TranslateError;
pub use crate::version::ProtocolVersion;
