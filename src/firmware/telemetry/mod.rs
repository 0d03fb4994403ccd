use core::{
    net::Ipv4Addr,
    sync::atomic::{AtomicBool, AtomicU32, Ordering},
};

use super::types::TcpError;

static JOIN_ATTEMPTS: AtomicU32 = AtomicU32::new(0);
static JOIN_REQUESTS: AtomicU32 = AtomicU32::new(0);
static JOIN_RETRIES: AtomicU32 = AtomicU32::new(0);
static JOIN_SUCCESSES: AtomicU32 = AtomicU32::new(0);
static JOIN_FAILURES: AtomicU32 = AtomicU32::new(0);
static JOIN_INIT_FAILURES: AtomicU32 = AtomicU32::new(0);
static JOIN_DISCONNECTS: AtomicU32 = AtomicU32::new(0);
static JOIN_LAST_DISCONNECT_REASON: AtomicU32 = AtomicU32::new(0);
static NET_EVENTS_DROPPED: AtomicU32 = AtomicU32::new(0);
static HANDSHAKE_CONNECTS: AtomicU32 = AtomicU32::new(0);
static HANDSHAKE_READS: AtomicU32 = AtomicU32::new(0);
static HANDSHAKE_BYTES: AtomicU32 = AtomicU32::new(0);
static HANDSHAKE_MISMATCHES: AtomicU32 = AtomicU32::new(0);
static HANDSHAKE_COMPLETIONS: AtomicU32 = AtomicU32::new(0);
static HANDSHAKE_SOCKET_FAILURES: AtomicU32 = AtomicU32::new(0);
static HANDSHAKE_CONNECT_FAILURES: AtomicU32 = AtomicU32::new(0);
static HANDSHAKE_RECEIVE_FAILURES: AtomicU32 = AtomicU32::new(0);
static HANDSHAKE_PEER_CLOSES: AtomicU32 = AtomicU32::new(0);
static LINK_CONNECTED: AtomicBool = AtomicBool::new(false);
static LINK_IPV4: AtomicU32 = AtomicU32::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub join_attempts: u32,
    pub join_requests: u32,
    pub join_retries: u32,
    pub join_successes: u32,
    pub join_failures: u32,
    pub join_init_failures: u32,
    pub join_disconnects: u32,
    pub join_last_disconnect_reason: u8,
    pub net_events_dropped: u32,
    pub handshake_connects: u32,
    pub handshake_reads: u32,
    pub handshake_bytes: u32,
    pub handshake_mismatches: u32,
    pub handshake_completions: u32,
    pub handshake_socket_failures: u32,
    pub handshake_connect_failures: u32,
    pub handshake_receive_failures: u32,
    pub handshake_peer_closes: u32,
    pub link_connected: bool,
    pub link_ipv4: Option<Ipv4Addr>,
}

pub fn snapshot() -> Snapshot {
    let link_ipv4_raw = LINK_IPV4.load(Ordering::Relaxed);
    let link_ipv4 = if link_ipv4_raw == 0 {
        None
    } else {
        Some(Ipv4Addr::from(link_ipv4_raw))
    };
    Snapshot {
        join_attempts: JOIN_ATTEMPTS.load(Ordering::Relaxed),
        join_requests: JOIN_REQUESTS.load(Ordering::Relaxed),
        join_retries: JOIN_RETRIES.load(Ordering::Relaxed),
        join_successes: JOIN_SUCCESSES.load(Ordering::Relaxed),
        join_failures: JOIN_FAILURES.load(Ordering::Relaxed),
        join_init_failures: JOIN_INIT_FAILURES.load(Ordering::Relaxed),
        join_disconnects: JOIN_DISCONNECTS.load(Ordering::Relaxed),
        join_last_disconnect_reason: JOIN_LAST_DISCONNECT_REASON.load(Ordering::Relaxed) as u8,
        net_events_dropped: NET_EVENTS_DROPPED.load(Ordering::Relaxed),
        handshake_connects: HANDSHAKE_CONNECTS.load(Ordering::Relaxed),
        handshake_reads: HANDSHAKE_READS.load(Ordering::Relaxed),
        handshake_bytes: HANDSHAKE_BYTES.load(Ordering::Relaxed),
        handshake_mismatches: HANDSHAKE_MISMATCHES.load(Ordering::Relaxed),
        handshake_completions: HANDSHAKE_COMPLETIONS.load(Ordering::Relaxed),
        handshake_socket_failures: HANDSHAKE_SOCKET_FAILURES.load(Ordering::Relaxed),
        handshake_connect_failures: HANDSHAKE_CONNECT_FAILURES.load(Ordering::Relaxed),
        handshake_receive_failures: HANDSHAKE_RECEIVE_FAILURES.load(Ordering::Relaxed),
        handshake_peer_closes: HANDSHAKE_PEER_CLOSES.load(Ordering::Relaxed),
        link_connected: LINK_CONNECTED.load(Ordering::Relaxed),
        link_ipv4,
    }
}

pub(crate) fn record_join_attempt() {
    JOIN_ATTEMPTS.fetch_add(1, Ordering::Relaxed);
    LINK_CONNECTED.store(false, Ordering::Relaxed);
    LINK_IPV4.store(0, Ordering::Relaxed);
}

pub(crate) fn record_join_request() {
    JOIN_REQUESTS.fetch_add(1, Ordering::Relaxed);
    log::trace!("telemetry join_request");
}

pub(crate) fn record_join_retry() {
    JOIN_RETRIES.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_join_disconnect(reason: u8) {
    JOIN_DISCONNECTS.fetch_add(1, Ordering::Relaxed);
    JOIN_LAST_DISCONNECT_REASON.store(u32::from(reason), Ordering::Relaxed);
    log::trace!(
        "telemetry join_disconnect reason={} ({})",
        reason,
        disconnect_reason_label(reason)
    );
}

pub(crate) fn record_join_success(address: Ipv4Addr) {
    JOIN_SUCCESSES.fetch_add(1, Ordering::Relaxed);
    LINK_CONNECTED.store(true, Ordering::Relaxed);
    LINK_IPV4.store(u32::from(address), Ordering::Relaxed);
    log::trace!("telemetry join_success");
}

pub(crate) fn record_join_failure() {
    JOIN_FAILURES.fetch_add(1, Ordering::Relaxed);
    LINK_CONNECTED.store(false, Ordering::Relaxed);
    log::trace!("telemetry join_failure");
}

pub(crate) fn record_join_init_failure() {
    JOIN_INIT_FAILURES.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_net_event_dropped() {
    NET_EVENTS_DROPPED.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_handshake_connected() {
    HANDSHAKE_CONNECTS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_handshake_read(bytes: usize) {
    HANDSHAKE_READS.fetch_add(1, Ordering::Relaxed);
    saturating_add_u32(&HANDSHAKE_BYTES, bytes.min(u32::MAX as usize) as u32);
}

pub(crate) fn record_handshake_mismatch() {
    HANDSHAKE_MISMATCHES.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_handshake_complete() {
    HANDSHAKE_COMPLETIONS.fetch_add(1, Ordering::Relaxed);
    log::trace!("telemetry handshake_complete");
}

pub(crate) fn record_handshake_error(error: TcpError) {
    let counter = match error {
        TcpError::SocketCreationFailed => &HANDSHAKE_SOCKET_FAILURES,
        TcpError::ConnectFailed => &HANDSHAKE_CONNECT_FAILURES,
        TcpError::ReceiveFailed => &HANDSHAKE_RECEIVE_FAILURES,
        TcpError::ConnectionClosed => &HANDSHAKE_PEER_CLOSES,
    };
    counter.fetch_add(1, Ordering::Relaxed);
    log::trace!("telemetry handshake_error kind={}", error.as_str());
}

pub fn set_link_connected(connected: bool) {
    LINK_CONNECTED.store(connected, Ordering::Relaxed);
    if !connected {
        LINK_IPV4.store(0, Ordering::Relaxed);
    }
}

pub fn disconnect_reason_label(reason: u8) -> &'static str {
    match reason {
        2 => "auth_expire",
        4 => "assoc_expire",
        8 => "assoc_leave",
        15 => "4way_handshake_timeout",
        200 => "beacon_timeout",
        201 => "no_ap_found",
        202 => "auth_fail",
        203 => "assoc_fail",
        204 => "handshake_timeout",
        205 => "connection_fail",
        210 => "no_ap_found_compatible_security",
        211 => "no_ap_found_authmode_threshold",
        212 => "no_ap_found_rssi_threshold",
        _ => "other",
    }
}

fn saturating_add_u32(counter: &AtomicU32, value: u32) {
    let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
        Some(current.saturating_add(value))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_errors_land_in_their_own_bucket() {
        let before = snapshot();
        record_handshake_error(TcpError::ConnectFailed);
        record_handshake_error(TcpError::SocketCreationFailed);
        let after = snapshot();
        assert!(after.handshake_connect_failures > before.handshake_connect_failures);
        assert!(after.handshake_socket_failures > before.handshake_socket_failures);
    }

    #[test]
    fn byte_counter_saturates() {
        let counter = AtomicU32::new(u32::MAX - 1);
        saturating_add_u32(&counter, 10);
        assert_eq!(counter.load(Ordering::Relaxed), u32::MAX);
    }

    #[test]
    fn disconnect_reasons_have_labels() {
        assert_eq!(disconnect_reason_label(201), "no_ap_found");
        assert_eq!(disconnect_reason_label(202), "auth_fail");
        assert_eq!(disconnect_reason_label(99), "other");
    }
}
