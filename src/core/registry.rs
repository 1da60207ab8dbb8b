use std::collections::HashMap;

use super::record::DeviceRecord;
use super::source::{DeviceKey, InputDevice};
use crate::error::{Result, TabletError};

/// Live device records keyed by device identity.
pub struct DeviceRegistry<D> {
    records: HashMap<DeviceKey, DeviceRecord<D>>,
}

impl<D: InputDevice> DeviceRegistry<D> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Track a new record; a second registration of the same device without
    /// removal in between is a `DuplicateDevice` fault.
    pub fn register(&mut self, record: DeviceRecord<D>) -> Result<&mut DeviceRecord<D>> {
        let key = record.device().key();
        if self.records.contains_key(&key) {
            return Err(TabletError::DuplicateDevice(key));
        }
        Ok(self.records.entry(key).or_insert(record))
    }

    /// Stop tracking a device and hand back its record for teardown.
    pub fn unregister(&mut self, key: DeviceKey) -> Result<DeviceRecord<D>> {
        self.records
            .remove(&key)
            .ok_or(TabletError::UnknownDevice(key))
    }

    pub fn get(&self, key: DeviceKey) -> Option<&DeviceRecord<D>> {
        self.records.get(&key)
    }

    pub fn get_mut(&mut self, key: DeviceKey) -> Option<&mut DeviceRecord<D>> {
        self.records.get_mut(&key)
    }

    pub fn contains(&self, key: DeviceKey) -> bool {
        self.records.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut DeviceRecord<D>> {
        self.records.values_mut()
    }
}

impl<D: InputDevice> Default for DeviceRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}
