use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::{Candidate, Profile, SavedList};

const PROFILE_FILE: &str = "profile.json";
const LIKED_FILE: &str = "liked.json";

/// Persistent key-value store for the two durable records
///
/// Absence of a record is the valid first-run state. Malformed stored JSON
/// is treated as absence (logged, never surfaced); persistence happens
/// synchronously at each mutation site.
pub trait StateStore: Send + Sync {
    fn load_profile(&self) -> Option<Profile>;
    fn save_profile(&self, profile: &Profile);
    fn load_saved_list(&self) -> SavedList;
    fn save_saved_list(&self, list: &SavedList);
}

/// File-backed store keeping one JSON document per record
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform data directory
    pub fn in_data_dir() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("reelmatch");
        Self::new(dir)
    }

    fn read_record<T: serde::de::DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    record = %file,
                    error = %e,
                    "Ignoring malformed persisted record"
                );
                None
            }
        }
    }

    fn write_record<T: serde::Serialize + ?Sized>(&self, file: &str, value: &T) {
        if let Err(e) = self.try_write_record(file, value) {
            tracing::error!(record = %file, error = %e, "Failed to persist record");
        }
    }

    fn try_write_record<T: serde::Serialize + ?Sized>(&self, file: &str, value: &T) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.dir.join(file), json)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StateStore for JsonFileStore {
    fn load_profile(&self) -> Option<Profile> {
        self.read_record(PROFILE_FILE)
    }

    fn save_profile(&self, profile: &Profile) {
        self.write_record(PROFILE_FILE, profile);
    }

    fn load_saved_list(&self) -> SavedList {
        self.read_record::<Vec<Candidate>>(LIKED_FILE)
            .map(SavedList::from_entries)
            .unwrap_or_default()
    }

    fn save_saved_list(&self, list: &SavedList) {
        self.write_record(LIKED_FILE, list.entries());
    }
}

/// In-memory store for tests and storage-less embeddings
#[derive(Default)]
pub struct MemoryStore {
    profile: Mutex<Option<Profile>>,
    saved: Mutex<SavedList>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Profile) -> Self {
        let store = Self::new();
        *store.profile.lock().unwrap() = Some(profile);
        store
    }
}

impl StateStore for MemoryStore {
    fn load_profile(&self) -> Option<Profile> {
        self.profile.lock().unwrap().clone()
    }

    fn save_profile(&self, profile: &Profile) {
        *self.profile.lock().unwrap() = Some(profile.clone());
    }

    fn load_saved_list(&self) -> SavedList {
        self.saved.lock().unwrap().clone()
    }

    fn save_saved_list(&self, list: &SavedList) {
        *self.saved.lock().unwrap() = list.clone();
    }
}
