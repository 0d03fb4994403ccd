use core::net::Ipv4Addr;

use super::super::{
    config::CONFIG_STORE_VERSION,
    types::{AuthMode, EndpointConfig, PeerEndpoint},
};
use super::record::RECORD_LEN;
use super::*;

const CAPACITY: usize = 4 * CONFIG_SECTOR_SIZE as usize;
const RECORD_AT: usize = CAPACITY - CONFIG_SECTOR_SIZE as usize;

fn endpoint() -> EndpointConfig {
    EndpointConfig::new(
        "lab-ap",
        "correct horse",
        AuthMode::WpaWpa2Personal,
        PeerEndpoint::new(Ipv4Addr::new(192, 168, 4, 1), 3333),
        "HELLO",
    )
    .unwrap()
}

#[test]
fn blank_sector_is_ready_and_untouched() {
    let mut store = ConfigStore::new(RamFlash::new(CAPACITY));

    assert_eq!(store.init(), Ok(StorageStatus::Ready));
    assert_eq!(store.load_endpoint(), Ok(None));
    assert_eq!(store.into_inner().writes, 0);
}

#[test]
fn stored_endpoint_is_read_back_from_last_sector() {
    let mut store = ConfigStore::new(RamFlash::new(CAPACITY));
    store.store_endpoint(&endpoint()).unwrap();

    let stored = store.load_endpoint().unwrap().unwrap();
    assert_eq!(stored.ssid.as_str(), "lab-ap");
    assert_eq!(stored.passphrase.as_str(), "correct horse");
    assert_eq!(stored.auth, AuthMode::WpaWpa2Personal);
    assert_eq!(stored.peer.port, 3333);

    let flash = store.into_inner();
    assert_ne!(flash.bytes[RECORD_AT], 0xFF);
    assert!(flash.bytes[..RECORD_AT].iter().all(|&byte| byte == 0xFF));
}

#[test]
fn identical_record_is_not_rewritten() {
    let mut store = ConfigStore::new(RamFlash::new(CAPACITY));
    store.store_endpoint(&endpoint()).unwrap();
    store.store_endpoint(&endpoint()).unwrap();
    assert_eq!(store.into_inner().writes, 1);
}

#[test]
fn stale_version_is_erased_and_reinitialized() {
    let mut store = ConfigStore::new(RamFlash::new(CAPACITY));
    store.store_endpoint(&endpoint()).unwrap();
    let mut flash = store.into_inner();
    flash.bytes[RECORD_AT + 4] = CONFIG_STORE_VERSION.wrapping_add(1);

    let mut store = ConfigStore::new(flash);
    assert_eq!(store.init(), Ok(StorageStatus::Reinitialized));
    assert_eq!(store.load_endpoint(), Ok(None));
    let flash = store.into_inner();
    assert!(flash.bytes[RECORD_AT..RECORD_AT + RECORD_LEN]
        .iter()
        .all(|&byte| byte == 0xFF));
}

#[test]
fn corrupt_checksum_is_erased() {
    let mut store = ConfigStore::new(RamFlash::new(CAPACITY));
    store.store_endpoint(&endpoint()).unwrap();
    let mut flash = store.into_inner();
    flash.bytes[RECORD_AT + 10] ^= 0x01;

    let mut store = ConfigStore::new(flash);
    assert_eq!(store.init(), Ok(StorageStatus::Reinitialized));
}

#[test]
fn valid_record_survives_init() {
    let mut store = ConfigStore::new(RamFlash::new(CAPACITY));
    store.store_endpoint(&endpoint()).unwrap();

    assert_eq!(store.init(), Ok(StorageStatus::Ready));
    assert!(store.load_endpoint().unwrap().is_some());
}

#[test]
fn read_failure_is_fatal() {
    let mut flash = RamFlash::new(CAPACITY);
    flash.fail_reads = true;
    let mut store = ConfigStore::new(flash);
    assert_eq!(store.init(), Err(StorageError::Read));
}

#[test]
fn erase_failure_is_fatal() {
    let mut store = ConfigStore::new(RamFlash::new(CAPACITY));
    store.store_endpoint(&endpoint()).unwrap();
    let mut flash = store.into_inner();
    flash.bytes[RECORD_AT] ^= 0xA5;
    flash.fail_writes = true;

    let mut store = ConfigStore::new(flash);
    assert_eq!(store.init(), Err(StorageError::Write));
}
