pub mod config;
pub mod handshake;
pub mod join;
#[cfg(feature = "esp32")]
mod runtime;
pub mod storage;
pub mod telemetry;
pub mod types;

#[cfg(feature = "esp32")]
pub use runtime::run;
