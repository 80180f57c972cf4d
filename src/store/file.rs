use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::MapStore;
use crate::error::NavError;
use crate::graph::MapData;

/// Store backed by a single JSON file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl MapStore for JsonFileStore {
    fn load_all(&self) -> Result<MapData, NavError> {
        if !self.path.exists() {
            return Ok(MapData::default());
        }
        debug!("loading map data from : {}", self.path.display());
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    // 先写临时文件再重命名, 写入失败时原文件保持不变
    fn replace_all(&mut self, data: MapData) -> Result<(), NavError> {
        let tmp = self.temp_path();
        let written = write_json(&tmp, &data)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(NavError::from));
        if let Err(e) = written {
            warn!("write map data to {} failed: {}", self.path.display(), e);
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        debug!("wrote map data to {}", self.path.display());
        Ok(())
    }

    fn is_empty(&self) -> Result<bool, NavError> {
        Ok(self.load_all()?.is_empty())
    }
}

fn write_json(path: &Path, data: &MapData) -> Result<(), NavError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::MapNode;

    fn one_node() -> MapData {
        MapData {
            nodes: vec![MapNode {
                id: "0".to_string(),
                lat: 22.6,
                lon: 113.99,
            }],
            ..MapData::default()
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path =
            std::env::temp_dir().join(format!("campus-nav-none-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);
        let store = JsonFileStore::new(path);
        assert!(store.is_empty().unwrap());
        assert_eq!(store.load_all().unwrap(), MapData::default());
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        // a directory in place of the store file makes the final rename fail
        let dir = std::env::temp_dir().join(format!("campus-nav-dir-{}", std::process::id()));
        fs::create_dir_all(dir.join("inner")).unwrap();
        let mut store = JsonFileStore::new(dir.clone());

        assert!(store.replace_all(one_node()).is_err());
        assert!(!store.temp_path().exists());
        assert!(dir.is_dir());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_replace_all_overwrites() {
        let path =
            std::env::temp_dir().join(format!("campus-nav-over-{}.json", std::process::id()));
        let mut store = JsonFileStore::new(path.clone());
        store.replace_all(one_node()).unwrap();
        assert_eq!(store.load_all().unwrap(), one_node());
        assert!(!store.temp_path().exists());

        store.clear().unwrap();
        assert!(store.is_empty().unwrap());

        fs::remove_file(&path).unwrap();
    }
}
