//! Saved-icon store.
//!
//! Saved icons are `{ name, code, date }` records keyed by an opaque id. The
//! store never looks inside a record except to check that an imported code
//! decodes.
//!
//! Every operation reads the whole store from its [`StoreBackend`], changes
//! the map, and writes the whole store back. Two writers racing on the same
//! backend therefore resolve as last-writer-wins on the entire map.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{ImportError, StoreError};
use crate::log::{debug, warn};

/// One saved icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SavedIcon {
    pub name: String,
    pub code: String,
    /// ISO-8601 timestamp of when the icon was saved. Empty if unknown.
    #[serde(default)]
    pub date: String,
}

/// The full contents of a store, ordered by id.
pub type SavedIcons = BTreeMap<String, SavedIcon>;

/// Outcome of a bulk import.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    /// Records written to the store.
    pub imported: usize,
    /// Ids of records whose code did not decode.
    pub skipped: Vec<String>,
}

impl ImportReport {
    /// True if some records were skipped.
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

// ============================================================================
// Backends
// ============================================================================

/// Whole-snapshot persistence for a store.
pub trait StoreBackend {
    fn load(&self) -> Result<SavedIcons, StoreError>;
    fn save(&mut self, icons: &SavedIcons) -> Result<(), StoreError>;
}

/// Keeps the store in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    icons: SavedIcons,
}

impl StoreBackend for MemoryBackend {
    fn load(&self) -> Result<SavedIcons, StoreError> {
        Ok(self.icons.clone())
    }

    fn save(&mut self, icons: &SavedIcons) -> Result<(), StoreError> {
        self.icons = icons.clone();
        Ok(())
    }
}

/// Keeps the store in a pretty-printed JSON file.
///
/// A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreBackend for JsonFileBackend {
    fn load(&self) -> Result<SavedIcons, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(SavedIcons::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, icons: &SavedIcons) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(icons)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), count = icons.len(), "wrote icon store");
        Ok(())
    }
}

// ============================================================================
// IconStore
// ============================================================================

/// Saved icons on top of a [`StoreBackend`].
#[derive(Debug, Clone, Default)]
pub struct IconStore<B> {
    backend: B,
}

impl<B: StoreBackend> IconStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Saves a record stamped with the current time and returns its id.
    pub fn save(&mut self, name: impl Into<String>, code: impl Into<String>) -> Result<String, StoreError> {
        self.save_at(name, code, SystemTime::now())
    }

    /// Saves a record stamped with `now` and returns its id.
    ///
    /// The id is the millisecond timestamp, bumped until it is unused.
    pub fn save_at(
        &mut self,
        name: impl Into<String>,
        code: impl Into<String>,
        now: SystemTime,
    ) -> Result<String, StoreError> {
        let mut icons = self.backend.load()?;
        let millis = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        let mut stamp = millis;
        while icons.contains_key(&stamp.to_string()) {
            stamp += 1;
        }
        let id = stamp.to_string();

        icons.insert(
            id.clone(),
            SavedIcon {
                name: name.into(),
                code: code.into(),
                date: iso8601(millis),
            },
        );
        self.backend.save(&icons)?;
        Ok(id)
    }

    /// All records, ordered by id.
    pub fn list(&self) -> Result<SavedIcons, StoreError> {
        self.backend.load()
    }

    pub fn get(&self, id: &str) -> Result<Option<SavedIcon>, StoreError> {
        Ok(self.backend.load()?.remove(id))
    }

    /// Deletes a record. Returns false if there was none.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut icons = self.backend.load()?;
        if icons.remove(id).is_none() {
            return Ok(false);
        }
        self.backend.save(&icons)?;
        Ok(true)
    }

    /// The whole store as a pretty-printed JSON document.
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.backend.load()?)?)
    }

    /// Merges a JSON document produced by [`export_json`](Self::export_json).
    ///
    /// Imported records overwrite existing ones with the same id. Records
    /// whose code does not decode are skipped and listed in the report; a
    /// document that is not a map of records fails as a whole.
    pub fn import_json(&mut self, json: &str) -> Result<ImportReport, ImportError> {
        let incoming: SavedIcons = serde_json::from_str(json)?;
        let mut icons = self.backend.load().map_err(ImportError::Store)?;
        let mut report = ImportReport::default();

        for (id, record) in incoming {
            if let Err(err) = codec::decode(&record.code) {
                warn!(%id, %err, "skipping saved icon with invalid code");
                report.skipped.push(id);
                continue;
            }
            icons.insert(id, record);
            report.imported += 1;
        }

        self.backend.save(&icons)?;
        Ok(report)
    }
}

// ============================================================================
// Timestamps
// ============================================================================

/// Formats milliseconds since the Unix epoch as `YYYY-MM-DDTHH:MM:SS.sssZ`.
fn iso8601(millis: u128) -> String {
    let secs = (millis / 1000) as i64;
    let (days, day_secs) = (secs.div_euclid(86_400), secs.rem_euclid(86_400));
    let (year, month, day) = civil_from_days(days);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{:03}Z",
        day_secs / 3600,
        day_secs % 3600 / 60,
        day_secs % 60,
        millis % 1000
    )
}

/// Gregorian date for a day count since 1970-01-01 (Howard Hinnant's
/// `civil_from_days`).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

// ============================================================================
// Tests
// ============================================================================
