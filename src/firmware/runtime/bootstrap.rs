use esp_hal::timer::timg::TimerGroup;
use esp_storage::FlashStorage;

use super::super::storage::ConfigStore;
use super::{
    radio,
    station::EspStation,
    tasks::{address_watch_task, bootstrap_task, net_task, BootContext},
};

const RADIO_HEAP_BYTES: usize = 72 * 1024;

pub fn run() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    esp_alloc::heap_allocator!(size: RADIO_HEAP_BYTES);
    esp_println::logger::init_logger_from_env();

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);
    log::info!("bootstrap: netgate {}", env!("CARGO_PKG_VERSION"));

    let flash = FlashStorage::new(peripherals.FLASH).multicore_auto_park();
    let store = ConfigStore::new(flash);

    let radio = match radio::bring_up(peripherals.WIFI) {
        Ok(radio) => radio,
        Err(err) => {
            log::error!("bootstrap: fatal init {}", err);
            halt_forever();
        }
    };

    let context = BootContext {
        station: EspStation::new(radio.controller),
        stack: radio.stack,
        store,
    };

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(net_task(radio.net_runner));
        spawner.must_spawn(address_watch_task(radio.stack));
        spawner.must_spawn(bootstrap_task(context));
    });
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
