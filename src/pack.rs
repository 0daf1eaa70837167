use crate::errors::{Error, InternalError};

/// Wire encoding for fixed-layout protocol values.
pub trait Pack {
    fn empty() -> Self;
    fn len(&self) -> usize {
        self.pack().len()
    }
    fn pack(&self) -> Vec<u8>;
    /// Decodes `self` from the front of `v`, leaving the consumed bytes in
    /// `v` and returning the rest.
    fn unpack(&mut self, v: &mut Vec<u8>) -> Result<Vec<u8>, Error>;
}

/// Splits `v` after `n` bytes, or fails if fewer are present.
pub(crate) fn split_rest(v: &mut Vec<u8>, n: usize) -> Result<Vec<u8>, Error> {
    if v.len() < n {
        return Err(Error::new(InternalError::StufferOutOfData));
    }
    Ok(v.drain(n..).collect())
}
