use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::WifiDevice;
use esp_storage::FlashStorage;

use super::super::{
    config::{
        resolve_endpoint, EndpointParts, HANDSHAKE_POLICY, JOIN_CANCEL, JOIN_RENDEZVOUS,
        JOIN_WAIT_POLICY, NET_EVENTS,
    },
    handshake::HandshakeClient,
    join::{post_net_event, ConnectionSupervisor, WaitOptions},
    storage::ConfigStore,
    telemetry,
    types::{JoinOutcome, NetEvent},
};
use super::{station::EspStation, tcp::EspTcpConnector};

const PARK_INTERVAL_SECS: u64 = 60;

pub(super) struct BootContext {
    pub(super) station: EspStation,
    pub(super) stack: Stack<'static>,
    pub(super) store: ConfigStore<FlashStorage<'static>>,
}

#[embassy_executor::task]
pub(super) async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}

/// Turns DHCP configuration changes into supervisor events.
#[embassy_executor::task]
pub(super) async fn address_watch_task(stack: Stack<'static>) {
    loop {
        stack.wait_config_up().await;
        if let Some(config) = stack.config_v4() {
            let address = config.address.address();
            log::debug!("net: dhcp lease {}", address);
            post_net_event(&NET_EVENTS, NetEvent::AddressAcquired(address));
        }
        stack.wait_config_down().await;
        log::warn!("net: dhcp lease lost");
        telemetry::set_link_connected(false);
    }
}

#[embassy_executor::task]
pub(super) async fn bootstrap_task(context: BootContext) {
    match startup(context).await {
        Ok(()) => log::info!("bootstrap: peer ready"),
        Err(stage) => log::error!("bootstrap: halted at {}", stage),
    }
    log::info!("bootstrap: telemetry {:?}", telemetry::snapshot());

    loop {
        Timer::after(Duration::from_secs(PARK_INTERVAL_SECS)).await;
    }
}

async fn startup(mut context: BootContext) -> Result<(), &'static str> {
    match context.store.init() {
        Ok(status) => log::info!("bootstrap: storage {}", status.as_str()),
        Err(err) => {
            log::error!("bootstrap: storage init failed err={}", err);
            return Err("storage");
        }
    }

    let (config, source) = resolve_endpoint(&mut context.store, EndpointParts::compiled())
        .map_err(|err| {
            log::error!("bootstrap: endpoint config invalid err={}", err);
            "config"
        })?;
    log::info!(
        "bootstrap: endpoint source={} ssid={} peer={}",
        source.as_str(),
        config.ssid.as_str(),
        config.peer
    );

    let mut supervisor = ConnectionSupervisor::new(context.station, &NET_EVENTS, &JOIN_RENDEZVOUS);
    let options = WaitOptions::unbounded()
        .with_timeout(JOIN_WAIT_POLICY.timeout())
        .with_cancel(&JOIN_CANCEL);
    match supervisor.connect_with(&config, options).await {
        Ok(JoinOutcome::Success(address)) => log::info!("bootstrap: joined address={}", address),
        Ok(outcome) => {
            log::error!("bootstrap: join {}", outcome);
            return Err("join");
        }
        Err(err) => {
            log::error!("bootstrap: join err={}", err);
            return Err("join");
        }
    }

    let connector = EspTcpConnector::new(context.stack).ok_or("tcp buffers")?;
    let mut client = HandshakeClient::new(connector, HANDSHAKE_POLICY);
    client
        .connect_and_wait(config.peer, config.token_bytes())
        .await
        .map_err(|_| "handshake")
}
