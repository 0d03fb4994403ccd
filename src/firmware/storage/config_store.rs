use core::fmt;

use embedded_storage::Storage;

use super::super::types::EndpointConfig;
use super::record::{self, StoredEndpoint, RECORD_LEN};

pub const CONFIG_SECTOR_SIZE: u32 = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageStatus {
    Ready,
    /// A stale or corrupt record was erased.
    Reinitialized,
}

impl StorageStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Reinitialized => "reinitialized",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageError {
    Read,
    Write,
}

impl StorageError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Endpoint override record kept in the last sector of `S`.
pub struct ConfigStore<S> {
    storage: S,
    offset: u32,
}

impl<S: Storage> ConfigStore<S> {
    pub fn new(storage: S) -> Self {
        let capacity = storage.capacity() as u32;
        let offset = capacity.saturating_sub(CONFIG_SECTOR_SIZE);
        Self { storage, offset }
    }

    /// Validates the sector before first use. Read and erase failures are fatal.
    pub fn init(&mut self) -> Result<StorageStatus, StorageError> {
        let record = self.read_record()?;
        if record::is_blank(&record) {
            return Ok(StorageStatus::Ready);
        }
        match record::decode(&record) {
            Ok(_) => Ok(StorageStatus::Ready),
            Err(fault) => {
                log::warn!("storage: erasing config record fault={}", fault.as_str());
                self.erase()?;
                Ok(StorageStatus::Reinitialized)
            }
        }
    }

    pub fn load_endpoint(&mut self) -> Result<Option<StoredEndpoint>, StorageError> {
        let record = self.read_record()?;
        if record::is_blank(&record) {
            return Ok(None);
        }
        match record::decode(&record) {
            Ok(stored) => Ok(Some(stored)),
            Err(fault) => {
                log::debug!("storage: ignoring config record fault={}", fault.as_str());
                Ok(None)
            }
        }
    }

    pub fn store_endpoint(&mut self, config: &EndpointConfig) -> Result<(), StorageError> {
        let record = record::encode(config);
        if self.read_record().ok() == Some(record) {
            return Ok(());
        }
        self.storage
            .write(self.offset, &record)
            .map_err(|_| StorageError::Write)
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    fn erase(&mut self) -> Result<(), StorageError> {
        self.storage
            .write(self.offset, &[0xFFu8; RECORD_LEN])
            .map_err(|_| StorageError::Write)
    }

    fn read_record(&mut self) -> Result<[u8; RECORD_LEN], StorageError> {
        let mut record = [0u8; RECORD_LEN];
        self.storage
            .read(self.offset, &mut record)
            .map_err(|_| StorageError::Read)?;
        Ok(record)
    }
}
