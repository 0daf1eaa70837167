use crate::errors::{BlockedError, Error, ErrorCode};
use crate::transport::transport::Transport;

use bytes::{Buf, BytesMut};
use std::cell::{Cell, RefCell};
use std::cmp::min;

/// An in-memory byte stream: whatever is sent can be received back.
#[derive(Debug, Default)]
pub struct Pipe {
    buf: RefCell<BytesMut>,
    shut_down: Cell<bool>,
}

impl Pipe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes sent and not yet received.
    pub fn written(&self) -> Vec<u8> {
        self.buf.borrow().to_vec()
    }

    /// Makes every later send fail.
    pub fn shutdown(&self) {
        self.shut_down.set(true);
    }
}

impl Transport for Pipe {
    fn send(&self, buf: &[u8]) -> Result<(), Error> {
        if self.shut_down.get() {
            return Err(Error::new(ErrorCode::Io));
        }
        self.buf.borrow_mut().extend_from_slice(buf);
        Ok(())
    }

    fn recv(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut pending = self.buf.borrow_mut();
        if pending.is_empty() {
            return Err(Error::new(BlockedError::IoBlocked));
        }
        let n = min(buf.len(), pending.len());
        buf[..n].copy_from_slice(&pending[..n]);
        pending.advance(n);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recv_returns_sent_bytes() {
        let pipe = Pipe::new();
        pipe.send(&[1, 2, 3]).expect("send failed");

        let mut buf = [0; 2];
        assert_eq!(pipe.recv(&mut buf).expect("recv failed"), 2);
        assert_eq!(buf, [1, 2]);
        assert_eq!(pipe.written(), vec![3]);
    }

    #[test]
    fn empty_pipe_blocks() {
        let pipe = Pipe::new();
        let err = pipe.recv(&mut [0; 4]).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn shut_down_pipe_fails_sends() {
        let pipe = Pipe::new();
        pipe.shutdown();
        assert_eq!(pipe.send(&[1]).unwrap_err().code(), ErrorCode::Io);
    }
}
