use embedded_io_async::Read;

use super::super::types::PeerEndpoint;

/// A stream socket the handshake can drive.
#[allow(async_fn_in_trait)]
pub trait HandshakeSocket: Read {
    async fn connect(&mut self, peer: PeerEndpoint) -> Result<(), Self::Error>;

    /// Releases the connection. Must be safe to call on an unconnected socket.
    fn close(&mut self);
}

/// Hands out sockets; `None` means no socket could be allocated.
pub trait SocketFactory {
    type Socket<'s>: HandshakeSocket
    where
        Self: 's;

    fn open(&mut self) -> Option<Self::Socket<'_>>;
}
