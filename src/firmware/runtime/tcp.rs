use embassy_net::{
    tcp::{ConnectError, TcpSocket},
    IpAddress, IpEndpoint, Stack,
};
use embedded_io_async::{ErrorKind, ErrorType, Read};
use static_cell::StaticCell;

use super::super::{
    handshake::{HandshakeSocket, SocketFactory},
    types::PeerEndpoint,
};

const TCP_RX_BUF: usize = 1024;
const TCP_TX_BUF: usize = 256;

/// Hands out one `embassy-net` TCP socket at a time over static buffers.
pub(super) struct EspTcpConnector {
    stack: Stack<'static>,
    rx_buffer: &'static mut [u8; TCP_RX_BUF],
    tx_buffer: &'static mut [u8; TCP_TX_BUF],
}

impl EspTcpConnector {
    /// `None` once the buffers have been claimed.
    pub(super) fn new(stack: Stack<'static>) -> Option<Self> {
        static RX_BUFFER: StaticCell<[u8; TCP_RX_BUF]> = StaticCell::new();
        static TX_BUFFER: StaticCell<[u8; TCP_TX_BUF]> = StaticCell::new();

        let rx_buffer = RX_BUFFER.try_init([0u8; TCP_RX_BUF])?;
        let tx_buffer = TX_BUFFER.try_init([0u8; TCP_TX_BUF])?;
        Some(Self {
            stack,
            rx_buffer,
            tx_buffer,
        })
    }
}

impl SocketFactory for EspTcpConnector {
    type Socket<'s> = EspTcpSocket<'s>;

    fn open(&mut self) -> Option<Self::Socket<'_>> {
        if !self.stack.is_config_up() {
            log::warn!("tcp: stack has no address");
            return None;
        }
        let mut socket = TcpSocket::new(self.stack, &mut self.rx_buffer[..], &mut self.tx_buffer[..]);
        socket.set_timeout(None);
        Some(EspTcpSocket { socket })
    }
}

pub(super) struct EspTcpSocket<'a> {
    socket: TcpSocket<'a>,
}

impl ErrorType for EspTcpSocket<'_> {
    type Error = ErrorKind;
}

impl Read for EspTcpSocket<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.socket
            .read(buf)
            .await
            .map_err(|_| ErrorKind::ConnectionReset)
    }
}

impl HandshakeSocket for EspTcpSocket<'_> {
    async fn connect(&mut self, peer: PeerEndpoint) -> Result<(), Self::Error> {
        let remote = IpEndpoint::new(IpAddress::Ipv4(peer.addr), peer.port);
        self.socket.connect(remote).await.map_err(|err| match err {
            ConnectError::ConnectionReset => ErrorKind::ConnectionReset,
            ConnectError::TimedOut => ErrorKind::TimedOut,
            _ => ErrorKind::NotConnected,
        })
    }

    fn close(&mut self) {
        self.socket.close();
    }
}
