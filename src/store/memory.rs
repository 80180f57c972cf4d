use super::MapStore;
use crate::error::NavError;
use crate::graph::MapData;

/// Store that keeps the dataset in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: MapData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: MapData) -> Self {
        MemoryStore { data }
    }
}

impl MapStore for MemoryStore {
    fn load_all(&self) -> Result<MapData, NavError> {
        Ok(self.data.clone())
    }

    fn replace_all(&mut self, data: MapData) -> Result<(), NavError> {
        self.data = data;
        Ok(())
    }

    fn is_empty(&self) -> Result<bool, NavError> {
        Ok(self.data.is_empty())
    }
}
