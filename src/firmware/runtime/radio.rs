use embassy_net::{Runner, Stack, StackResources};
use esp_hal::rng::Rng;
use esp_radio::wifi::{Config as WifiRuntimeConfig, WifiController, WifiDevice};
use static_cell::StaticCell;

// DHCP plus the single handshake socket.
const STACK_SOCKETS: usize = 2;

pub(super) struct RadioRuntime {
    pub(super) controller: WifiController<'static>,
    pub(super) net_runner: Runner<'static, WifiDevice<'static>>,
    pub(super) stack: Stack<'static>,
}

/// Station-only radio with a DHCP-configured stack.
pub(super) fn bring_up(
    wifi: esp_hal::peripherals::WIFI<'static>,
) -> Result<RadioRuntime, &'static str> {
    static RADIO: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();
    static RESOURCES: StaticCell<StackResources<STACK_SOCKETS>> = StaticCell::new();

    let radio = esp_radio::init().map_err(|err| {
        log::error!("radio: init err={:?}", err);
        "radio init"
    })?;
    let (controller, interfaces) =
        esp_radio::wifi::new(RADIO.init(radio), wifi, WifiRuntimeConfig::default()).map_err(
            |err| {
                log::error!("radio: wifi driver err={:?}", err);
                "wifi driver"
            },
        )?;

    let (stack, net_runner) = embassy_net::new(
        interfaces.sta,
        embassy_net::Config::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        stack_seed(),
    );

    Ok(RadioRuntime {
        controller,
        net_runner,
        stack,
    })
}

fn stack_seed() -> u64 {
    let rng = Rng::new();
    let high = u64::from(rng.random());
    let low = u64::from(rng.random());
    (high << 32) | low
}
