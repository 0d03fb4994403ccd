use esp_radio::wifi::{
    event::{self, EventExt},
    AuthMethod, ClientConfig, ModeConfig, ScanMethod, WifiController,
};

use super::super::{
    config::NET_EVENTS,
    join::{post_net_event, StationPort},
    types::{AuthMode, EndpointConfig, InitFailure, NetEvent},
};

/// `StationPort` over the esp-radio station controller.
pub(super) struct EspStation {
    controller: WifiController<'static>,
}

impl EspStation {
    pub(super) fn new(controller: WifiController<'static>) -> Self {
        Self { controller }
    }
}

impl StationPort for EspStation {
    fn install_observers(&mut self) {
        event::StaStart::update_handler(|_| {
            post_net_event(&NET_EVENTS, NetEvent::StationStarted);
        });
        event::StaDisconnected::update_handler(|event| {
            let reason = event.reason();
            post_net_event(&NET_EVENTS, NetEvent::StationDisconnected { reason });
        });
    }

    fn remove_observers(&mut self) {
        let _ = event::StaStart::take_handler();
        let _ = event::StaDisconnected::take_handler();
    }

    async fn bring_up(&mut self, config: &EndpointConfig) -> Result<(), InitFailure> {
        if matches!(self.controller.is_started(), Ok(true)) {
            let _ = self.controller.stop_async().await;
        }

        let mode = mode_config(config);
        if let Err(err) = self.controller.set_config(&mode) {
            log::error!("station: set_config err={:?}", err);
            return Err(InitFailure::Configure);
        }
        if let Err(err) = self.controller.start_async().await {
            log::error!("station: start err={:?}", err);
            return Err(InitFailure::Start);
        }
        Ok(())
    }

    async fn request_join(&mut self) -> Result<(), &'static str> {
        self.controller.connect().map_err(|err| {
            log::warn!("station: connect err={:?}", err);
            "station: connect request rejected"
        })
    }
}

fn mode_config(config: &EndpointConfig) -> ModeConfig {
    let client = ClientConfig::default()
        .with_ssid(config.ssid.as_str().into())
        .with_password(config.passphrase.as_str().into())
        .with_auth_method(auth_method(config.effective_auth()))
        .with_scan_method(ScanMethod::AllChannels);
    ModeConfig::Client(client)
}

const fn auth_method(mode: AuthMode) -> AuthMethod {
    match mode {
        AuthMode::Open => AuthMethod::None,
        AuthMode::Wep => AuthMethod::Wep,
        AuthMode::WpaPersonal => AuthMethod::Wpa,
        AuthMode::Wpa2Personal => AuthMethod::Wpa2Personal,
        AuthMode::WpaWpa2Personal => AuthMethod::WpaWpa2Personal,
        AuthMode::Wpa3Personal => AuthMethod::Wpa3Personal,
        AuthMode::Wpa2Wpa3Personal => AuthMethod::Wpa2Wpa3Personal,
    }
}
