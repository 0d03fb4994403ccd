mod channels;
mod endpoint;

pub use channels::{JOIN_CANCEL, JOIN_RENDEZVOUS, NET_EVENTS};
pub use endpoint::{
    endpoint_from_parts, resolve_endpoint, EndpointParts, EndpointSource,
    DEFAULT_AUTH, DEFAULT_PEER_ADDR, DEFAULT_PEER_PORT, DEFAULT_TOKEN,
};

use super::types::{HandshakePolicy, JoinWaitPolicy};

pub const JOIN_WAIT_POLICY: JoinWaitPolicy = JoinWaitPolicy::unbounded();
pub const HANDSHAKE_POLICY: HandshakePolicy = HandshakePolicy::defaults();

pub const CONFIG_STORE_MAGIC: u32 = 0x4E47_4350;
pub const CONFIG_STORE_VERSION: u8 = 1;
