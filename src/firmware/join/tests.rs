use std::{collections::VecDeque, vec, vec::Vec};

use core::net::Ipv4Addr;

use embassy_futures::block_on;
use embassy_time::Duration;

use super::super::types::{
    AuthMode, EndpointConfig, InitFailure, JoinError, JoinFailure, JoinOutcome, JoinState,
    NetEvent, PeerEndpoint, MAX_JOIN_RETRIES, NET_EVENT_QUEUE_DEPTH,
};
use super::*;

const LEASE: Ipv4Addr = Ipv4Addr::new(192, 168, 4, 23);

struct MockStation<'a> {
    events: &'a NetEventChannel,
    on_start: Vec<NetEvent>,
    on_join: VecDeque<Vec<NetEvent>>,
    default_on_join: Vec<NetEvent>,
    bring_up_failure: Option<InitFailure>,
    join_requests: u32,
    installs: u32,
    removals: u32,
}

impl<'a> MockStation<'a> {
    fn new(events: &'a NetEventChannel) -> Self {
        Self {
            events,
            on_start: vec![NetEvent::StationStarted],
            on_join: VecDeque::new(),
            default_on_join: Vec::new(),
            bring_up_failure: None,
            join_requests: 0,
            installs: 0,
            removals: 0,
        }
    }

    fn always_disconnect(mut self, reason: u8) -> Self {
        self.default_on_join = vec![NetEvent::StationDisconnected { reason }];
        self
    }

    fn then_on_join(mut self, events: &[NetEvent]) -> Self {
        self.on_join.push_back(events.to_vec());
        self
    }

    fn post(&self, events: &[NetEvent]) {
        for event in events {
            assert!(post_net_event(self.events, *event), "event queue overflow");
        }
    }
}

impl StationPort for MockStation<'_> {
    fn install_observers(&mut self) {
        self.installs += 1;
    }

    fn remove_observers(&mut self) {
        self.removals += 1;
    }

    async fn bring_up(&mut self, _config: &EndpointConfig) -> Result<(), InitFailure> {
        if let Some(failure) = self.bring_up_failure {
            return Err(failure);
        }
        let on_start = self.on_start.clone();
        self.post(&on_start);
        Ok(())
    }

    async fn request_join(&mut self) -> Result<(), &'static str> {
        self.join_requests += 1;
        let response = self
            .on_join
            .pop_front()
            .unwrap_or_else(|| self.default_on_join.clone());
        self.post(&response);
        Ok(())
    }
}

fn config() -> EndpointConfig {
    EndpointConfig::new(
        "lab-ap",
        "correct horse",
        AuthMode::Wpa2Personal,
        PeerEndpoint::new(Ipv4Addr::new(192, 168, 4, 1), 3333),
        "HELLO",
    )
    .unwrap()
}

#[test]
fn retry_cap_reached_after_max_disconnects_without_extra_request() {
    let events = NetEventChannel::new();
    let rendezvous = JoinRendezvous::new();
    let station = MockStation::new(&events).always_disconnect(201);
    let mut supervisor = ConnectionSupervisor::new(station, &events, &rendezvous);

    let result = block_on(supervisor.connect(&config()));

    assert_eq!(
        result,
        Ok(JoinOutcome::Failure(JoinFailure::RetryLimitExceeded {
            attempts: MAX_JOIN_RETRIES
        }))
    );
    assert_eq!(supervisor.engine().state(), JoinState::Failed);
    assert_eq!(supervisor.engine().retries(), MAX_JOIN_RETRIES);
    // One initial request plus a retry for every non-terminal disconnect.
    assert_eq!(supervisor.join_requests(), u32::from(MAX_JOIN_RETRIES));
    assert_eq!(supervisor.port().join_requests, u32::from(MAX_JOIN_RETRIES));
}

#[test]
fn each_disconnect_below_cap_reissues_one_join() {
    let events = NetEventChannel::new();
    let rendezvous = JoinRendezvous::new();
    let disconnect = NetEvent::StationDisconnected { reason: 2 };
    let station = MockStation::new(&events)
        .then_on_join(&[disconnect])
        .then_on_join(&[disconnect])
        .then_on_join(&[disconnect])
        .then_on_join(&[NetEvent::AddressAcquired(LEASE)]);
    let mut supervisor = ConnectionSupervisor::new(station, &events, &rendezvous);

    let result = block_on(supervisor.connect(&config()));

    assert_eq!(result, Ok(JoinOutcome::Success(LEASE)));
    assert_eq!(supervisor.join_requests(), 4);
    assert_eq!(supervisor.engine().retries(), 0);
    assert_eq!(supervisor.engine().state(), JoinState::Connected);
}

#[test]
fn address_on_first_join_succeeds_without_retry() {
    let events = NetEventChannel::new();
    let rendezvous = JoinRendezvous::new();
    let station = MockStation::new(&events).then_on_join(&[NetEvent::AddressAcquired(LEASE)]);
    let mut supervisor = ConnectionSupervisor::new(station, &events, &rendezvous);

    let result = block_on(supervisor.connect(&config()));

    assert_eq!(result.map(JoinOutcome::address), Ok(Some(LEASE)));
    assert_eq!(supervisor.join_requests(), 1);
    let station = supervisor.into_port();
    assert_eq!(station.installs, 1);
    assert_eq!(station.removals, 1);
}

#[test]
fn racing_terminal_events_publish_exactly_once() {
    let events = NetEventChannel::new();
    let rendezvous = JoinRendezvous::new();
    let station = MockStation::new(&events).then_on_join(&[
        NetEvent::AddressAcquired(LEASE),
        NetEvent::StationDisconnected { reason: 8 },
        NetEvent::AddressAcquired(Ipv4Addr::new(10, 0, 0, 9)),
    ]);
    let mut supervisor = ConnectionSupervisor::new(station, &events, &rendezvous);

    let result = block_on(supervisor.connect(&config()));

    assert_eq!(result, Ok(JoinOutcome::Success(LEASE)));
    assert!(rendezvous.is_published());
    assert!(!rendezvous.publish(JoinOutcome::Failure(
        JoinFailure::RetryLimitExceeded { attempts: 1 }
    )));
    assert!(events.try_receive().is_err(), "stale events must be drained");
    assert_eq!(supervisor.join_requests(), 1);
}

#[test]
fn disconnect_then_address_in_one_burst_still_succeeds() {
    let events = NetEventChannel::new();
    let rendezvous = JoinRendezvous::new();
    let station = MockStation::new(&events).then_on_join(&[
        NetEvent::StationDisconnected { reason: 4 },
        NetEvent::AddressAcquired(LEASE),
    ]);
    let mut supervisor = ConnectionSupervisor::new(station, &events, &rendezvous);

    let result = block_on(supervisor.connect(&config()));

    assert_eq!(result, Ok(JoinOutcome::Success(LEASE)));
    assert_eq!(supervisor.join_requests(), 2);
    assert_eq!(supervisor.engine().retries(), 0);
}

#[test]
fn bring_up_failure_is_fatal_and_issues_no_join() {
    let events = NetEventChannel::new();
    let rendezvous = JoinRendezvous::new();
    let mut station = MockStation::new(&events);
    station.bring_up_failure = Some(InitFailure::Start);
    let mut supervisor = ConnectionSupervisor::new(station, &events, &rendezvous);

    let result = block_on(supervisor.connect(&config()));

    assert_eq!(result, Err(JoinError::FatalInit(InitFailure::Start)));
    assert!(!rendezvous.is_published());
    let station = supervisor.into_port();
    assert_eq!(station.join_requests, 0);
    assert_eq!(station.installs, station.removals);
}

#[test]
fn cancelled_wait_returns_without_outcome() {
    let events = NetEventChannel::new();
    let rendezvous = JoinRendezvous::new();
    let cancel = JoinCancel::new();
    let station = MockStation::new(&events);
    let mut supervisor = ConnectionSupervisor::new(station, &events, &rendezvous);

    cancel.cancel();
    let options = WaitOptions::unbounded().with_cancel(&cancel);
    let result = block_on(supervisor.connect_with(&config(), options));

    assert_eq!(result, Err(JoinError::Cancelled));
    assert!(cancel.is_cancelled());
    let station = supervisor.into_port();
    assert_eq!(station.installs, station.removals);
}

#[test]
fn bounded_wait_times_out_when_driver_stays_silent() {
    let events = NetEventChannel::new();
    let rendezvous = JoinRendezvous::new();
    let station = MockStation::new(&events);
    let mut supervisor = ConnectionSupervisor::new(station, &events, &rendezvous);

    let options = WaitOptions::unbounded().with_timeout(Some(Duration::from_millis(20)));
    let result = block_on(supervisor.connect_with(&config(), options));

    assert_eq!(result, Err(JoinError::TimedOut));
    assert_eq!(supervisor.engine().state(), JoinState::Joining);
}

#[test]
fn supervisor_rearms_between_attempts() {
    let events = NetEventChannel::new();
    let rendezvous = JoinRendezvous::new();
    let station = MockStation::new(&events).always_disconnect(201);
    let mut supervisor = ConnectionSupervisor::new(station, &events, &rendezvous);

    let first = block_on(supervisor.connect(&config()));
    assert!(matches!(first, Ok(JoinOutcome::Failure(_))));

    let mut station = supervisor.into_port();
    station.default_on_join = vec![NetEvent::AddressAcquired(LEASE)];
    let mut supervisor = ConnectionSupervisor::new(station, &events, &rendezvous);
    let second = block_on(supervisor.connect(&config()));

    assert_eq!(second, Ok(JoinOutcome::Success(LEASE)));
    assert_eq!(supervisor.join_requests(), 1);
}

#[test]
fn rendezvous_hands_outcome_over_once() {
    let rendezvous = JoinRendezvous::new();
    assert!(rendezvous.publish(JoinOutcome::Success(LEASE)));
    assert!(!rendezvous.publish(JoinOutcome::Success(Ipv4Addr::new(10, 0, 0, 1))));

    let observed = block_on(rendezvous.wait(WaitOptions::unbounded()));
    assert_eq!(observed, Ok(JoinOutcome::Success(LEASE)));

    rendezvous.reset();
    assert!(!rendezvous.is_published());
    assert!(rendezvous.publish(JoinOutcome::Failure(
        JoinFailure::RetryLimitExceeded { attempts: 10 }
    )));
}

#[test]
fn full_event_queue_drops_instead_of_blocking() {
    let events = NetEventChannel::new();
    for _ in 0..NET_EVENT_QUEUE_DEPTH {
        assert!(post_net_event(&events, NetEvent::StationStarted));
    }
    assert!(!post_net_event(
        &events,
        NetEvent::StationDisconnected { reason: 1 }
    ));
}
