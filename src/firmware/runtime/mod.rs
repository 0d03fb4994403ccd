mod bootstrap;
mod radio;
mod station;
mod tasks;
mod tcp;

pub use bootstrap::run;
