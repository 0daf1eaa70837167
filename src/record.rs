//! Plaintext record framing for alert records.

use crate::alert::{AlertRecord, ALERT_LENGTH};
use crate::errors::{Error, ProtocolError};
use crate::pack::{self, Pack};
use crate::version::ProtocolVersion;

use byteorder::{BigEndian, ByteOrder};
use num_traits::FromPrimitive;
use std::cmp::min;

pub const RECORD_HEADER_LENGTH: usize = 5;

#[derive(Debug, Copy, Clone, Primitive, PartialEq, Eq)]
#[repr(u8)]
pub enum ContentType {
    ChangeCipherSpec = 20,
    Alert = 21,
    Handshake = 22,
    ApplicationData = 23,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub content_type: ContentType,
    pub version: u16,
    pub length: u16,
}

impl Pack for RecordHeader {
    fn empty() -> Self {
        Self {
            content_type: ContentType::Alert,
            version: 0,
            length: 0,
        }
    }

    fn pack(&self) -> Vec<u8> {
        let mut v = vec![0; RECORD_HEADER_LENGTH];
        v[0] = self.content_type as u8;
        BigEndian::write_u16(&mut v[1..3], self.version);
        BigEndian::write_u16(&mut v[3..5], self.length);
        v
    }

    fn unpack(&mut self, v: &mut Vec<u8>) -> Result<Vec<u8>, Error> {
        let rest = pack::split_rest(v, RECORD_HEADER_LENGTH)?;
        self.content_type = ContentType::from_u8(v[0]).ok_or_else(|| Error::new(ProtocolError::BadMessage))?;
        self.version = BigEndian::read_u16(&v[1..3]);
        self.length = BigEndian::read_u16(&v[3..5]);
        Ok(rest)
    }
}

/// Frames `alert` as a plaintext alert record. TLS 1.3 records keep the
/// TLS 1.2 version number.
pub fn alert_record(version: ProtocolVersion, alert: AlertRecord) -> Vec<u8> {
    let header = RecordHeader {
        content_type: ContentType::Alert,
        version: min(version, ProtocolVersion::TLS12).wire(),
        length: ALERT_LENGTH as u16,
    };
    let mut v = header.pack();
    v.extend_from_slice(&alert.pack());
    v
}
