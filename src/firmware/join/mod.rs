mod engine;
mod machine;
mod port;
mod rendezvous;
mod supervisor;
#[cfg(test)]
mod tests;

pub use engine::JoinEngine;
pub use port::StationPort;
pub use rendezvous::{JoinCancel, JoinRendezvous, WaitOptions};
pub use supervisor::{ConnectionSupervisor, NetEventChannel};

use super::{telemetry, types::NetEvent};

/// Non-blocking post from a driver callback. A full queue drops the event.
pub fn post_net_event(events: &NetEventChannel, event: NetEvent) -> bool {
    match events.try_send(event) {
        Ok(()) => true,
        Err(_) => {
            telemetry::record_net_event_dropped();
            false
        }
    }
}
