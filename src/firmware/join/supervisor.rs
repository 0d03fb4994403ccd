use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use super::super::{
    telemetry,
    types::{EndpointConfig, JoinError, JoinOutcome, NetEvent, NET_EVENT_QUEUE_DEPTH},
};
use super::{
    engine::{JoinEngine, JoinStep},
    machine::JoinAction,
    port::StationPort,
    rendezvous::{JoinRendezvous, WaitOptions},
};

pub type NetEventChannel = Channel<CriticalSectionRawMutex, NetEvent, NET_EVENT_QUEUE_DEPTH>;

/// Drives one join attempt at a time over a [`StationPort`].
///
/// The supervisor is the only consumer of `events`; driver observers post into
/// the channel from their own context and the outcome comes back through the
/// rendezvous.
pub struct ConnectionSupervisor<'a, P> {
    port: P,
    events: &'a NetEventChannel,
    rendezvous: &'a JoinRendezvous,
    engine: JoinEngine,
    join_requests: u32,
}

impl<'a, P: StationPort> ConnectionSupervisor<'a, P> {
    pub fn new(port: P, events: &'a NetEventChannel, rendezvous: &'a JoinRendezvous) -> Self {
        Self {
            port,
            events,
            rendezvous,
            engine: JoinEngine::new(),
            join_requests: 0,
        }
    }

    pub fn engine(&self) -> &JoinEngine {
        &self.engine
    }

    /// Join requests issued during the current (or last) attempt.
    pub fn join_requests(&self) -> u32 {
        self.join_requests
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }

    /// Joins with an unbounded wait.
    pub async fn connect(&mut self, config: &EndpointConfig) -> Result<JoinOutcome, JoinError> {
        self.connect_with(config, WaitOptions::unbounded()).await
    }

    pub async fn connect_with(
        &mut self,
        config: &EndpointConfig,
        options: WaitOptions<'_>,
    ) -> Result<JoinOutcome, JoinError> {
        self.begin_attempt();
        telemetry::record_join_attempt();
        log::info!(
            "join: starting ssid={} auth={}",
            config.ssid.as_str(),
            config.effective_auth().as_str()
        );

        self.port.install_observers();
        if let Err(failure) = self.port.bring_up(config).await {
            self.port.remove_observers();
            telemetry::record_join_init_failure();
            log::error!("join: interface bring-up failed stage={}", failure.as_str());
            return Err(JoinError::FatalInit(failure));
        }

        let rendezvous = self.rendezvous;
        let result = match select(rendezvous.wait(options), self.drive()).await {
            Either::First(result) => result,
            Either::Second(()) => rendezvous.wait(WaitOptions::unbounded()).await,
        };

        self.port.remove_observers();
        self.drain_events();

        match result {
            Ok(outcome) => log::info!(
                "join: finished {} retries={} join_requests={}",
                outcome,
                self.engine.retries(),
                self.join_requests
            ),
            Err(err) => log::warn!(
                "join: wait ended {} state={} retries={}",
                err,
                self.engine.state().as_str(),
                self.engine.retries()
            ),
        }
        result
    }

    fn begin_attempt(&mut self) {
        self.engine = JoinEngine::new();
        self.join_requests = 0;
        self.rendezvous.reset();
        self.drain_events();
    }

    fn drain_events(&self) {
        while self.events.try_receive().is_ok() {}
    }

    /// Consumes events until the engine publishes a terminal outcome.
    async fn drive(&mut self) {
        loop {
            let event = self.events.receive().await;
            if self.dispatch(event).await.after.is_terminal() {
                return;
            }
        }
    }

    async fn dispatch(&mut self, event: NetEvent) -> JoinStep {
        let step = self.engine.apply(event);
        if step.transitioned() {
            log::info!(
                "join: {} -> {} on {}",
                step.before.as_str(),
                step.after.as_str(),
                event.as_str()
            );
        }
        if let NetEvent::StationDisconnected { reason } = event {
            telemetry::record_join_disconnect(reason);
        }

        match step.action {
            JoinAction::None => {}
            JoinAction::IssueJoin => {
                if step.retries > 0 {
                    telemetry::record_join_retry();
                    log::info!("join: retrying immediately retry={}", step.retries);
                }
                self.join_requests = self.join_requests.saturating_add(1);
                telemetry::record_join_request();
                if let Err(err) = self.port.request_join().await {
                    // The driver follows a rejected request with a disconnect event.
                    log::warn!("join: join request rejected err={}", err);
                }
            }
            JoinAction::Publish(outcome) => {
                match outcome {
                    JoinOutcome::Success(address) => telemetry::record_join_success(address),
                    JoinOutcome::Failure(_) => telemetry::record_join_failure(),
                }
                if !self.rendezvous.publish(outcome) {
                    log::warn!("join: outcome already published; dropping {}", outcome);
                }
            }
        }
        step
    }
}
