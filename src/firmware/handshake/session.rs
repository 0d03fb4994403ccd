use super::super::types::{PeerEndpoint, TcpError, HANDSHAKE_RX_BUF};
use super::socket::HandshakeSocket;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandshakeStats {
    pub connected: bool,
    pub reads: u32,
    pub bytes: usize,
    pub complete: bool,
}

/// Owns the socket for one handshake. The socket is closed when the session drops.
pub(super) struct HandshakeSession<S: HandshakeSocket> {
    socket: S,
    buffer: [u8; HANDSHAKE_RX_BUF],
    stats: HandshakeStats,
}

impl<S: HandshakeSocket> HandshakeSession<S> {
    pub(super) fn new(socket: S) -> Self {
        Self {
            socket,
            buffer: [0u8; HANDSHAKE_RX_BUF],
            stats: HandshakeStats::default(),
        }
    }

    pub(super) async fn connect(&mut self, peer: PeerEndpoint) -> Result<(), TcpError> {
        match self.socket.connect(peer).await {
            Ok(()) => {
                self.stats.connected = true;
                Ok(())
            }
            Err(err) => {
                log::warn!("handshake: connect peer={} err={:?}", peer, err);
                Err(TcpError::ConnectFailed)
            }
        }
    }

    /// Reads once into a zeroed buffer and returns the bytes received.
    pub(super) async fn read_candidate(&mut self) -> Result<&[u8], TcpError> {
        self.buffer.fill(0);
        let read = match self.socket.read(&mut self.buffer).await {
            Ok(0) => return Err(TcpError::ConnectionClosed),
            Ok(read) => read,
            Err(err) => {
                log::warn!("handshake: read err={:?}", err);
                return Err(TcpError::ReceiveFailed);
            }
        };
        self.stats.reads = self.stats.reads.saturating_add(1);
        self.stats.bytes = self.stats.bytes.saturating_add(read);
        Ok(&self.buffer[..read])
    }

    pub(super) fn mark_complete(&mut self) {
        self.stats.complete = true;
    }

    pub(super) fn stats(&self) -> HandshakeStats {
        self.stats
    }
}

impl<S: HandshakeSocket> Drop for HandshakeSession<S> {
    fn drop(&mut self) {
        self.socket.close();
    }
}
