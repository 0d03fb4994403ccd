use embassy_sync::channel::Channel;

use super::super::join::{JoinCancel, JoinRendezvous, NetEventChannel};

/// Driver callbacks post here; the connection supervisor is the only consumer.
pub static NET_EVENTS: NetEventChannel = Channel::new();
pub static JOIN_RENDEZVOUS: JoinRendezvous = JoinRendezvous::new();
pub static JOIN_CANCEL: JoinCancel = JoinCancel::new();
