use core::net::Ipv4Addr;

use heapless::String;

use super::super::{
    config::{CONFIG_STORE_MAGIC, CONFIG_STORE_VERSION},
    types::{AuthMode, EndpointConfig, PeerEndpoint, WIFI_PASSPHRASE_MAX, WIFI_SSID_MAX},
};

const SSID_LEN_AT: usize = 5;
const SSID_AT: usize = SSID_LEN_AT + 1;
const PASS_LEN_AT: usize = SSID_AT + WIFI_SSID_MAX;
const PASS_AT: usize = PASS_LEN_AT + 1;
const AUTH_AT: usize = PASS_AT + WIFI_PASSPHRASE_MAX;
const ADDR_AT: usize = AUTH_AT + 1;
const PORT_AT: usize = ADDR_AT + 4;
const CHECKSUM_AT: usize = PORT_AT + 2;

pub(super) const RECORD_LEN: usize = CHECKSUM_AT + 1;

/// Link settings persisted in flash. The handshake token is never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredEndpoint {
    pub ssid: String<WIFI_SSID_MAX>,
    pub passphrase: String<WIFI_PASSPHRASE_MAX>,
    pub auth: AuthMode,
    pub peer: PeerEndpoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum RecordFault {
    Magic,
    Version,
    Checksum,
    Layout,
}

impl RecordFault {
    pub(super) const fn as_str(self) -> &'static str {
        match self {
            Self::Magic => "magic",
            Self::Version => "version",
            Self::Checksum => "checksum",
            Self::Layout => "layout",
        }
    }
}

pub(super) fn is_blank(record: &[u8; RECORD_LEN]) -> bool {
    record.iter().all(|&byte| byte == 0xFF)
}

pub(super) fn encode(config: &EndpointConfig) -> [u8; RECORD_LEN] {
    let mut record = [0xFFu8; RECORD_LEN];
    record[0..4].copy_from_slice(&CONFIG_STORE_MAGIC.to_le_bytes());
    record[4] = CONFIG_STORE_VERSION;

    let ssid = config.ssid.as_bytes();
    record[SSID_LEN_AT] = ssid.len() as u8;
    record[SSID_AT..SSID_AT + WIFI_SSID_MAX].fill(0);
    record[SSID_AT..SSID_AT + ssid.len()].copy_from_slice(ssid);

    let passphrase = config.passphrase.as_bytes();
    record[PASS_LEN_AT] = passphrase.len() as u8;
    record[PASS_AT..PASS_AT + WIFI_PASSPHRASE_MAX].fill(0);
    record[PASS_AT..PASS_AT + passphrase.len()].copy_from_slice(passphrase);

    record[AUTH_AT] = config.auth.as_persisted();
    record[ADDR_AT..ADDR_AT + 4].copy_from_slice(&config.peer.addr.octets());
    record[PORT_AT..PORT_AT + 2].copy_from_slice(&config.peer.port.to_le_bytes());
    record[CHECKSUM_AT] = checksum8(&record[..CHECKSUM_AT]);
    record
}

pub(super) fn decode(record: &[u8; RECORD_LEN]) -> Result<StoredEndpoint, RecordFault> {
    if u32::from_le_bytes([record[0], record[1], record[2], record[3]]) != CONFIG_STORE_MAGIC {
        return Err(RecordFault::Magic);
    }
    if record[4] != CONFIG_STORE_VERSION {
        return Err(RecordFault::Version);
    }
    if record[CHECKSUM_AT] != checksum8(&record[..CHECKSUM_AT]) {
        return Err(RecordFault::Checksum);
    }

    let ssid = text::<WIFI_SSID_MAX>(&record[SSID_AT..], record[SSID_LEN_AT])?;
    let passphrase = text::<WIFI_PASSPHRASE_MAX>(&record[PASS_AT..], record[PASS_LEN_AT])?;
    let auth = AuthMode::from_persisted(record[AUTH_AT]).ok_or(RecordFault::Layout)?;
    let addr = Ipv4Addr::new(
        record[ADDR_AT],
        record[ADDR_AT + 1],
        record[ADDR_AT + 2],
        record[ADDR_AT + 3],
    );
    let port = u16::from_le_bytes([record[PORT_AT], record[PORT_AT + 1]]);
    if ssid.is_empty() || port == 0 {
        return Err(RecordFault::Layout);
    }

    Ok(StoredEndpoint {
        ssid,
        passphrase,
        auth,
        peer: PeerEndpoint::new(addr, port),
    })
}

fn text<const N: usize>(field: &[u8], len: u8) -> Result<String<N>, RecordFault> {
    let len = len as usize;
    if len > N {
        return Err(RecordFault::Layout);
    }
    let value = core::str::from_utf8(&field[..len]).map_err(|_| RecordFault::Layout)?;
    let mut out = String::new();
    out.push_str(value).map_err(|_| RecordFault::Layout)?;
    Ok(out)
}

fn checksum8(bytes: &[u8]) -> u8 {
    let mut acc = 0x5Au8;
    for &byte in bytes {
        acc ^= byte.rotate_left(1);
    }
    acc
}
