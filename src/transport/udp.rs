use crate::errors::Error;
use crate::transport::transport::Transport;

use std::net::{SocketAddr, UdpSocket};

/// Sends each record as one datagram to a fixed peer.
pub struct Udp {
    peer: SocketAddr,
    socket: UdpSocket,
}

impl Udp {
    pub fn new(peer: SocketAddr, local: &str) -> Result<Self, Error> {
        let socket = UdpSocket::bind(local)?;
        Ok(Self { peer, socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.socket.local_addr()?)
    }
}

impl Transport for Udp {
    fn send(&self, buf: &[u8]) -> Result<(), Error> {
        let _ = self.socket.send_to(buf, self.peer)?;
        Ok(())
    }

    fn recv(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let (n, _) = self.socket.recv_from(buf)?;
        Ok(n)
    }
}
