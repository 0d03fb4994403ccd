use std::{vec, vec::Vec};

use embedded_storage::{ReadStorage, Storage};

/// Flash stand-in for host tests.
pub(crate) struct RamFlash {
    pub(crate) bytes: Vec<u8>,
    pub(crate) fail_reads: bool,
    pub(crate) fail_writes: bool,
    pub(crate) writes: u32,
}

impl RamFlash {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0xFF; capacity],
            fail_reads: false,
            fail_writes: false,
            writes: 0,
        }
    }
}

#[derive(Debug)]
pub(crate) struct RamFlashError;

impl ReadStorage for RamFlash {
    type Error = RamFlashError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads {
            return Err(RamFlashError);
        }
        let start = offset as usize;
        let end = start + bytes.len();
        bytes.copy_from_slice(self.bytes.get(start..end).ok_or(RamFlashError)?);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl Storage for RamFlash {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(RamFlashError);
        }
        let start = offset as usize;
        let end = start + bytes.len();
        self.bytes
            .get_mut(start..end)
            .ok_or(RamFlashError)?
            .copy_from_slice(bytes);
        self.writes += 1;
        Ok(())
    }
}
