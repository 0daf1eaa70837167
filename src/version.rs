use crate::errors::{Error, ProtocolError};
use crate::pack::{self, Pack};

use byteorder::{BigEndian, ByteOrder};
use num_traits::FromPrimitive;

/// Negotiated protocol version, ordered oldest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Primitive)]
#[repr(u8)]
pub enum ProtocolVersion {
    SSLv2 = 20,
    SSLv3 = 30,
    TLS10 = 31,
    TLS11 = 32,
    TLS12 = 33,
    TLS13 = 34,
}

impl ProtocolVersion {
    /// `major.minor` as carried in record and hello headers.
    pub fn wire(self) -> u16 {
        let n = self as u16;
        ((n / 10) << 8) | (n % 10)
    }

    pub fn from_wire(wire: u16) -> Option<Self> {
        let (major, minor) = (wire >> 8, wire & 0xff);
        if minor > 9 {
            return None;
        }
        Self::from_u16(major * 10 + minor)
    }
}

impl Pack for ProtocolVersion {
    fn empty() -> Self {
        ProtocolVersion::TLS12
    }

    fn pack(&self) -> Vec<u8> {
        let mut bytes: [u8; 2] = [0; 2];
        BigEndian::write_u16(&mut bytes, self.wire());
        bytes.to_vec()
    }

    fn unpack(&mut self, v: &mut Vec<u8>) -> Result<Vec<u8>, Error> {
        let rest = pack::split_rest(v, 2)?;
        *self = Self::from_wire(BigEndian::read_u16(v)).ok_or_else(|| Error::new(ProtocolError::ProtocolVersionUnsupported))?;
        Ok(rest)
    }
}
