mod config_store;
#[cfg(test)]
mod ram;
mod record;
#[cfg(test)]
mod tests;

pub use config_store::{ConfigStore, StorageError, StorageStatus, CONFIG_SECTOR_SIZE};
#[cfg(test)]
pub(crate) use ram::RamFlash;
pub use record::StoredEndpoint;
