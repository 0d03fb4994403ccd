pub const WIFI_SSID_MAX: usize = 32;
pub const WIFI_PASSPHRASE_MAX: usize = 64;
pub const HANDSHAKE_TOKEN_MAX: usize = 32;

/// Disconnects tolerated per join attempt; the one that reaches this count is terminal.
pub const MAX_JOIN_RETRIES: u8 = 10;

pub const NET_EVENT_QUEUE_DEPTH: usize = 8;
pub const HANDSHAKE_RX_BUF: usize = 128;
