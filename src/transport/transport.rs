use crate::errors::Error;

/// Where flushed records go and where received records come from.
pub trait Transport {
    fn send(&self, buf: &[u8]) -> Result<(), Error>;
    fn recv(&self, buf: &mut [u8]) -> Result<usize, Error>;
}
