mod base;
mod net;
mod wifi;

pub use base::{
    HANDSHAKE_RX_BUF, HANDSHAKE_TOKEN_MAX, MAX_JOIN_RETRIES, NET_EVENT_QUEUE_DEPTH,
    WIFI_PASSPHRASE_MAX, WIFI_SSID_MAX,
};
pub use net::{
    InitFailure, JoinError, JoinFailure, JoinOutcome, JoinState, NetEvent, TcpError,
};
pub use wifi::{
    AuthMode, ConfigError, EndpointConfig, HandshakePolicy, JoinWaitPolicy, PeerEndpoint,
    HANDSHAKE_READ_DELAY_DEFAULT_MS, HANDSHAKE_READ_DELAY_MAX_MS,
};
