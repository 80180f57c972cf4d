//! GeoJSON map import: survey features in, flat map dataset out.

pub mod config;
pub mod reader;
pub mod tags;

pub use self::config::{ImportConfig, MAX_SNAP_DECIMALS};
pub use self::reader::{import_features, map_data_from_geojson, GeoJsonImporter, ImportReport};
pub use self::tags::{parse_other_tags, TagError};
