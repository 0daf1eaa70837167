//! The two byte TLS alert record.

use crate::errors::Error;
use crate::pack::{self, Pack};

use num_traits::FromPrimitive;

pub const ALERT_LENGTH: usize = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Primitive)]
#[repr(u8)]
pub enum AlertLevel {
    Warning = 1,
    Fatal = 2,
}

/// Descriptions from the IANA TLS Alert registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Primitive)]
#[repr(u8)]
pub enum AlertDescription {
    CloseNotify = 0,
    UnexpectedMessage = 10,
    BadRecordMac = 20,
    DecryptionFailedRESERVED = 21,
    RecordOverflow = 22,
    DecompressionFailure = 30,
    HandshakeFailure = 40,
    NoCertificateRESERVED = 41,
    BadCertificate = 42,
    UnsupportedCertificate = 43,
    CertificateRevoked = 44,
    CertificateExpired = 45,
    CertificateUnknown = 46,
    IllegalParameter = 47,
    UnknownCa = 48,
    AccessDenied = 49,
    DecodeError = 50,
    DecryptError = 51,
    ExportRestrictionRESERVED = 60,
    ProtocolVersion = 70,
    InsufficientSecurity = 71,
    InternalError = 80,
    InappropriateFallback = 86,
    UserCanceled = 90,
    NoRenegotiation = 100,
    MissingExtension = 109,
    UnsupportedExtension = 110,
    CertificateUnobtainable = 111,
    UnrecognizedName = 112,
    BadCertificateStatusResponse = 113,
    BadCertificateHashValue = 114,
    UnknownPskIdentity = 115,
    CertificateRequired = 116,
    NoApplicationProtocol = 120,
}

/// An alert as it appears on the wire. Both bytes are kept raw: a peer may
/// send levels and descriptions this crate has no name for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AlertRecord {
    pub level: u8,
    pub description: u8,
}

impl AlertRecord {
    pub fn new(level: AlertLevel, description: AlertDescription) -> Self {
        Self {
            level: level as u8,
            description: description as u8,
        }
    }

    pub fn from_bytes(bytes: [u8; ALERT_LENGTH]) -> Self {
        Self {
            level: bytes[0],
            description: bytes[1],
        }
    }

    pub fn to_bytes(&self) -> [u8; ALERT_LENGTH] {
        [self.level, self.description]
    }

    pub fn level(&self) -> Option<AlertLevel> {
        AlertLevel::from_u8(self.level)
    }

    pub fn description(&self) -> Option<AlertDescription> {
        AlertDescription::from_u8(self.description)
    }

    pub fn is_close_notify(&self) -> bool {
        self.description == AlertDescription::CloseNotify as u8
    }
}

impl Pack for AlertRecord {
    fn empty() -> Self {
        Self {
            level: 0,
            description: 0,
        }
    }

    fn len(&self) -> usize {
        ALERT_LENGTH
    }

    fn pack(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn unpack(&mut self, v: &mut Vec<u8>) -> Result<Vec<u8>, Error> {
        let rest = pack::split_rest(v, ALERT_LENGTH)?;
        self.level = v[0];
        self.description = v[1];
        Ok(rest)
    }
}
