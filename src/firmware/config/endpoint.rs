use embedded_storage::Storage;

use super::super::{
    storage::ConfigStore,
    types::{AuthMode, ConfigError, EndpointConfig, PeerEndpoint},
};

pub const DEFAULT_AUTH: AuthMode = AuthMode::Wpa2Personal;
pub const DEFAULT_PEER_ADDR: &str = "192.168.4.1";
pub const DEFAULT_PEER_PORT: &str = "3333";
pub const DEFAULT_TOKEN: &str = "HELLO";

/// Raw endpoint settings before validation. `None` falls back to the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EndpointParts<'a> {
    pub ssid: Option<&'a str>,
    pub passphrase: Option<&'a str>,
    pub auth: Option<&'a str>,
    pub peer_addr: Option<&'a str>,
    pub peer_port: Option<&'a str>,
    pub token: Option<&'a str>,
}

impl EndpointParts<'static> {
    pub const fn compiled() -> Self {
        Self {
            ssid: option_env!("NETGATE_WIFI_SSID"),
            passphrase: option_env!("NETGATE_WIFI_PASSWORD"),
            auth: option_env!("NETGATE_WIFI_AUTH"),
            peer_addr: option_env!("NETGATE_PEER_ADDR"),
            peer_port: option_env!("NETGATE_PEER_PORT"),
            token: option_env!("NETGATE_HANDSHAKE_TOKEN"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointSource {
    Compiled,
    Stored,
}

impl EndpointSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compiled => "compiled",
            Self::Stored => "stored",
        }
    }
}

pub fn endpoint_from_parts(parts: EndpointParts<'_>) -> Result<EndpointConfig, ConfigError> {
    let auth = match parts.auth {
        Some(label) => AuthMode::parse(label).ok_or(ConfigError::InvalidAuthMode)?,
        None => DEFAULT_AUTH,
    };
    let peer = PeerEndpoint::parse(
        parts.peer_addr.unwrap_or(DEFAULT_PEER_ADDR),
        parts.peer_port.unwrap_or(DEFAULT_PEER_PORT),
    )?;
    EndpointConfig::new(
        parts.ssid.unwrap_or(""),
        parts.passphrase.unwrap_or(""),
        auth,
        peer,
        parts.token.unwrap_or(DEFAULT_TOKEN),
    )
}

/// Picks the stored override when one exists. The handshake token always
/// comes from `compiled`; storage only carries the link settings.
pub fn resolve_endpoint<S: Storage>(
    store: &mut ConfigStore<S>,
    compiled: EndpointParts<'_>,
) -> Result<(EndpointConfig, EndpointSource), ConfigError> {
    match store.load_endpoint() {
        Ok(Some(stored)) => {
            let config = EndpointConfig::new(
                &stored.ssid,
                &stored.passphrase,
                stored.auth,
                stored.peer,
                compiled.token.unwrap_or(DEFAULT_TOKEN),
            )?;
            Ok((config, EndpointSource::Stored))
        }
        Ok(None) => endpoint_from_parts(compiled).map(|config| (config, EndpointSource::Compiled)),
        Err(err) => {
            log::warn!("config: stored endpoint unreadable err={}", err);
            endpoint_from_parts(compiled).map(|config| (config, EndpointSource::Compiled))
        }
    }
}
