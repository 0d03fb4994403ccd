use embassy_time::Timer;

use super::super::{
    telemetry,
    types::{HandshakePolicy, PeerEndpoint, TcpError},
};
use super::{
    matcher::token_matches,
    session::{HandshakeSession, HandshakeStats},
    socket::{HandshakeSocket, SocketFactory},
};

/// Connects to the peer and waits for its readiness token.
pub struct HandshakeClient<F> {
    factory: F,
    policy: HandshakePolicy,
    last: HandshakeStats,
}

impl<F: SocketFactory> HandshakeClient<F> {
    pub fn new(factory: F, policy: HandshakePolicy) -> Self {
        Self {
            factory,
            policy: policy.sanitized(),
            last: HandshakeStats::default(),
        }
    }

    /// Counters from the most recent `connect_and_wait`.
    pub fn last_stats(&self) -> HandshakeStats {
        self.last
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Blocks until one read carries exactly `token`. There is no timeout.
    pub async fn connect_and_wait(
        &mut self,
        peer: PeerEndpoint,
        token: &[u8],
    ) -> Result<(), TcpError> {
        self.last = HandshakeStats::default();
        let Some(socket) = self.factory.open() else {
            telemetry::record_handshake_error(TcpError::SocketCreationFailed);
            log::error!("handshake: socket allocation failed");
            return Err(TcpError::SocketCreationFailed);
        };

        let mut session = HandshakeSession::new(socket);
        let result = wait_for_token(&mut session, peer, token, self.policy).await;
        self.last = session.stats();
        drop(session);

        match result {
            Ok(()) => {
                telemetry::record_handshake_complete();
                log::info!(
                    "handshake: token received peer={} reads={} bytes={}",
                    peer,
                    self.last.reads,
                    self.last.bytes
                );
            }
            Err(err) => {
                telemetry::record_handshake_error(err);
                log::error!("handshake: failed peer={} err={}", peer, err);
            }
        }
        result
    }
}

async fn wait_for_token<S: HandshakeSocket>(
    session: &mut HandshakeSession<S>,
    peer: PeerEndpoint,
    token: &[u8],
    policy: HandshakePolicy,
) -> Result<(), TcpError> {
    log::info!("handshake: connecting peer={}", peer);
    session.connect(peer).await?;
    telemetry::record_handshake_connected();
    log::info!("handshake: connected; waiting for token");

    loop {
        let candidate = session.read_candidate().await?;
        telemetry::record_handshake_read(candidate.len());
        if token_matches(candidate, token) {
            session.mark_complete();
            return Ok(());
        }
        telemetry::record_handshake_mismatch();
        log::debug!("handshake: read {} bytes without token", candidate.len());

        if let Some(delay) = policy.read_delay() {
            Timer::after(delay).await;
        }
    }
}
