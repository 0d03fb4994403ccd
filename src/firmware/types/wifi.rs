use core::{fmt, net::Ipv4Addr};

use embassy_time::Duration;
use heapless::String;

use super::{HANDSHAKE_TOKEN_MAX, WIFI_PASSPHRASE_MAX, WIFI_SSID_MAX};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Open,
    Wep,
    WpaPersonal,
    Wpa2Personal,
    WpaWpa2Personal,
    Wpa3Personal,
    Wpa2Wpa3Personal,
}

impl AuthMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Wep => "wep",
            Self::WpaPersonal => "wpa",
            Self::Wpa2Personal => "wpa2",
            Self::WpaWpa2Personal => "wpa-wpa2",
            Self::Wpa3Personal => "wpa3",
            Self::Wpa2Wpa3Personal => "wpa2-wpa3",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        const ALL: [AuthMode; 7] = [
            AuthMode::Open,
            AuthMode::Wep,
            AuthMode::WpaPersonal,
            AuthMode::Wpa2Personal,
            AuthMode::WpaWpa2Personal,
            AuthMode::Wpa3Personal,
            AuthMode::Wpa2Wpa3Personal,
        ];
        let value = value.trim();
        ALL.into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(value))
    }

    pub(crate) const fn as_persisted(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Wep => 1,
            Self::WpaPersonal => 2,
            Self::Wpa2Personal => 3,
            Self::WpaWpa2Personal => 4,
            Self::Wpa3Personal => 5,
            Self::Wpa2Wpa3Personal => 6,
        }
    }

    pub(crate) const fn from_persisted(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Open),
            1 => Some(Self::Wep),
            2 => Some(Self::WpaPersonal),
            3 => Some(Self::Wpa2Personal),
            4 => Some(Self::WpaWpa2Personal),
            5 => Some(Self::Wpa3Personal),
            6 => Some(Self::Wpa2Wpa3Personal),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeerEndpoint {
    pub addr: Ipv4Addr,
    pub port: u16,
}

impl PeerEndpoint {
    pub const fn new(addr: Ipv4Addr, port: u16) -> Self {
        Self { addr, port }
    }

    pub fn parse(addr: &str, port: &str) -> Result<Self, ConfigError> {
        let addr = addr
            .trim()
            .parse::<Ipv4Addr>()
            .map_err(|_| ConfigError::InvalidPeerAddress)?;
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPeerPort)?;
        if port == 0 {
            return Err(ConfigError::InvalidPeerPort);
        }
        Ok(Self { addr, port })
    }
}

impl fmt::Display for PeerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    EmptySsid,
    SsidTooLong,
    PassphraseTooLong,
    EmptyToken,
    TokenTooLong,
    InvalidToken,
    InvalidPeerAddress,
    InvalidPeerPort,
    InvalidAuthMode,
}

impl ConfigError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptySsid => "empty_ssid",
            Self::SsidTooLong => "ssid_too_long",
            Self::PassphraseTooLong => "passphrase_too_long",
            Self::EmptyToken => "empty_token",
            Self::TokenTooLong => "token_too_long",
            Self::InvalidToken => "invalid_token",
            Self::InvalidPeerAddress => "invalid_peer_address",
            Self::InvalidPeerPort => "invalid_peer_port",
            Self::InvalidAuthMode => "invalid_auth_mode",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one join attempt plus handshake needs. Read-only once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfig {
    pub ssid: String<WIFI_SSID_MAX>,
    pub passphrase: String<WIFI_PASSPHRASE_MAX>,
    pub auth: AuthMode,
    pub peer: PeerEndpoint,
    pub token: String<HANDSHAKE_TOKEN_MAX>,
}

impl EndpointConfig {
    pub fn new(
        ssid: &str,
        passphrase: &str,
        auth: AuthMode,
        peer: PeerEndpoint,
        token: &str,
    ) -> Result<Self, ConfigError> {
        if ssid.is_empty() {
            return Err(ConfigError::EmptySsid);
        }
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        // Reads are cut at their first NUL, so the token must be printable ASCII.
        if !token.bytes().all(|byte| byte.is_ascii_graphic() || byte == b' ') {
            return Err(ConfigError::InvalidToken);
        }
        Ok(Self {
            ssid: bounded(ssid, ConfigError::SsidTooLong)?,
            passphrase: bounded(passphrase, ConfigError::PassphraseTooLong)?,
            auth,
            peer,
            token: bounded(token, ConfigError::TokenTooLong)?,
        })
    }

    /// An empty passphrase always joins as an open network.
    pub fn effective_auth(&self) -> AuthMode {
        if self.passphrase.is_empty() {
            AuthMode::Open
        } else {
            self.auth
        }
    }

    pub fn token_bytes(&self) -> &[u8] {
        self.token.as_bytes()
    }
}

fn bounded<const N: usize>(value: &str, too_long: ConfigError) -> Result<String<N>, ConfigError> {
    let mut out = String::new();
    out.push_str(value).map_err(|_| too_long)?;
    Ok(out)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JoinWaitPolicy {
    /// Zero keeps the wait unbounded.
    pub timeout_ms: u32,
}

impl JoinWaitPolicy {
    pub const fn unbounded() -> Self {
        Self { timeout_ms: 0 }
    }

    pub const fn timeout(self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms as u64))
        }
    }
}

pub const HANDSHAKE_READ_DELAY_DEFAULT_MS: u32 = 100;
pub const HANDSHAKE_READ_DELAY_MAX_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandshakePolicy {
    /// Pause between reads; zero disables it.
    pub read_delay_ms: u32,
}

impl HandshakePolicy {
    pub const fn defaults() -> Self {
        Self {
            read_delay_ms: HANDSHAKE_READ_DELAY_DEFAULT_MS,
        }
    }

    pub const fn sanitized(self) -> Self {
        let read_delay_ms = if self.read_delay_ms > HANDSHAKE_READ_DELAY_MAX_MS {
            HANDSHAKE_READ_DELAY_MAX_MS
        } else {
            self.read_delay_ms
        };
        Self { read_delay_ms }
    }

    pub const fn read_delay(self) -> Option<Duration> {
        if self.read_delay_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.read_delay_ms as u64))
        }
    }
}

impl Default for HandshakePolicy {
    fn default() -> Self {
        Self::defaults()
    }
}
