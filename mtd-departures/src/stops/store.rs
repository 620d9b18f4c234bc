//! On-disk stop data.
//!
//! Two JSON files live in the data directory:
//! - `stops.json`: the `getstops` response, as received
//! - `stop_name_to_id.json`: a flat `{ "name": "id" }` object derived from it
//!
//! Both are regenerated wholesale, never patched.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::domain::{StopId, StopName};
use crate::mtd::{StopDto, StopsResponse};
use crate::pretty::pretty_print;

use super::directory::StopDirectory;
use super::error::StopError;

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "mtd bus stop data";

const STOPS_FILE: &str = "stops.json";
const NAME_TO_ID_FILE: &str = "stop_name_to_id.json";

/// Reader/writer for the stop data directory.
#[derive(Debug, Clone)]
pub struct StopStore {
    dir: PathBuf,
}

impl StopStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stops_path(&self) -> PathBuf {
        self.dir.join(STOPS_FILE)
    }

    pub fn name_to_id_path(&self) -> PathBuf {
        self.dir.join(NAME_TO_ID_FILE)
    }

    /// Load the raw stop listing.
    pub fn load_stops(&self) -> Result<Vec<StopDto>, StopError> {
        let response: StopsResponse = read_json(&self.stops_path())?;
        Ok(response.stops)
    }

    /// Persist a `getstops` response.
    pub fn save_stops_json(&self, listing: &serde_json::Value) -> Result<(), StopError> {
        write_json(&self.stops_path(), listing)
    }

    /// Load the derived name → id index.
    pub fn load_name_to_id(&self) -> Result<StopDirectory, StopError> {
        let ids: HashMap<StopName, StopId> = read_json(&self.name_to_id_path())?;
        Ok(StopDirectory::new(ids))
    }

    /// Persist the name → id index, keys sorted.
    pub fn save_name_to_id(&self, directory: &StopDirectory) -> Result<(), StopError> {
        let sorted: BTreeMap<&StopName, &StopId> = directory.as_map().iter().collect();
        write_json(&self.name_to_id_path(), &sorted)
    }

    /// Rebuild `stop_name_to_id.json` from `stops.json`.
    pub fn rebuild_name_to_id(&self) -> Result<StopDirectory, StopError> {
        let directory = StopDirectory::from_listing(self.load_stops()?);
        self.save_name_to_id(&directory)?;
        Ok(directory)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StopError> {
    let contents = std::fs::read_to_string(path).map_err(|source| StopError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| StopError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StopError> {
    // Create parent directories if needed
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|source| StopError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = pretty_print(value).map_err(|source| StopError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::write(path, json).map_err(|source| StopError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn listing() -> serde_json::Value {
        serde_json::json!({
            "changeset_id": "abc",
            "stops": [
                {"stop_id": "IT", "stop_name": "Illinois Terminal"},
                {"stop_id": "STOP123", "stop_name": "Fourth and Chalmers"}
            ]
        })
    }

    #[test]
    fn save_and_load_stops() {
        let dir = tempdir().unwrap();
        let store = StopStore::new(dir.path());

        store.save_stops_json(&listing()).unwrap();

        let stops = store.load_stops().unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].stop_id.as_str(), "IT");
        assert_eq!(stops[1].stop_name, "Fourth and Chalmers");
    }

    #[test]
    fn stops_file_is_verbatim_and_indented() {
        let dir = tempdir().unwrap();
        let store = StopStore::new(dir.path());

        store.save_stops_json(&listing()).unwrap();

        let text = std::fs::read_to_string(store.stops_path()).unwrap();
        assert!(text.contains("\n    \"changeset_id\": \"abc\""));
        let reread: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reread, listing());
    }

    #[test]
    fn rebuild_index_from_listing() {
        let dir = tempdir().unwrap();
        let store = StopStore::new(dir.path());
        store.save_stops_json(&listing()).unwrap();

        let built = store.rebuild_name_to_id().unwrap();
        let loaded = store.load_name_to_id().unwrap();

        assert_eq!(built, loaded);
        let name = StopName::parse("Fourth and Chalmers").unwrap();
        assert_eq!(loaded.resolve(&name), Ok(&StopId::new("STOP123")));

        let text = std::fs::read_to_string(store.name_to_id_path()).unwrap();
        let flat: BTreeMap<String, String> = serde_json::from_str(&text).unwrap();
        assert_eq!(flat["Illinois Terminal"], "IT");
    }

    #[test]
    fn numeric_ids_in_index_are_loaded() {
        let dir = tempdir().unwrap();
        let store = StopStore::new(dir.path());
        std::fs::write(
            store.name_to_id_path(),
            r#"{"Fourth and Chalmers": 123, "Illinois Terminal": "IT"}"#,
        )
        .unwrap();

        let directory = store.load_name_to_id().unwrap();

        let name = StopName::parse("Fourth and Chalmers").unwrap();
        assert_eq!(directory.resolve(&name), Ok(&StopId::new("123")));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn numeric_ids_in_listing_are_loaded() {
        let dir = tempdir().unwrap();
        let store = StopStore::new(dir.path());
        store
            .save_stops_json(&serde_json::json!({
                "stops": [{"stop_id": 42, "stop_name": "Lincoln Square"}]
            }))
            .unwrap();

        let directory = store.rebuild_name_to_id().unwrap();

        let name = StopName::parse("Lincoln Square").unwrap();
        assert_eq!(directory.resolve(&name), Ok(&StopId::new("42")));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = StopStore::new(dir.path().join("nested").join("data"));

        store.save_stops_json(&listing()).unwrap();
        assert!(store.stops_path().exists());
    }

    #[test]
    fn missing_file_is_io_error() {
        let store = StopStore::new("/nonexistent/path");

        assert!(matches!(store.load_name_to_id(), Err(StopError::Io { .. })));
    }

    #[test]
    fn wrong_shape_is_json_error() {
        let dir = tempdir().unwrap();
        let store = StopStore::new(dir.path());
        std::fs::write(store.stops_path(), r#"{"stations": []}"#).unwrap();

        assert!(matches!(store.load_stops(), Err(StopError::Json { .. })));
    }
}
