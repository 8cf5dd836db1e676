//! Persisted settings: one "audio enabled" flag per quiz mode.
//!
//! Loaded once at startup and saved explicitly on every change. Storage is
//! optional; any failure is logged and the in-memory value wins.

use std::collections::HashMap;

use log::warn;

use crate::error::StorageError;

pub const READ_AUDIO_KEY: &str = "readcn.audioEnabled";
pub const WRITE_AUDIO_KEY: &str = "learncn.write.audioEnabled";

/// Client-local string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store, used natively and whenever browser storage is missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore(HashMap<String, String>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum QuizMode {
    Read,
    Write,
}

impl QuizMode {
    pub fn audio_key(self) -> &'static str {
        match self {
            QuizMode::Read => READ_AUDIO_KEY,
            QuizMode::Write => WRITE_AUDIO_KEY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Settings {
    pub read_audio: bool,
    pub write_audio: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            read_audio: true,
            write_audio: true,
        }
    }
}

impl Settings {
    /// Reads both flags. A missing or unreadable flag means "enabled".
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            read_audio: load_bool(store, READ_AUDIO_KEY, true),
            write_audio: load_bool(store, WRITE_AUDIO_KEY, true),
        }
    }

    pub fn audio_enabled(&self, mode: QuizMode) -> bool {
        match mode {
            QuizMode::Read => self.read_audio,
            QuizMode::Write => self.write_audio,
        }
    }

    /// Updates the flag and writes it through. Write failures are ignored.
    pub fn set_audio_enabled(&mut self, mode: QuizMode, enabled: bool, store: &mut dyn KeyValueStore) {
        match mode {
            QuizMode::Read => self.read_audio = enabled,
            QuizMode::Write => self.write_audio = enabled,
        }
        store_bool(store, mode.audio_key(), enabled);
    }
}

fn load_bool(store: &dyn KeyValueStore, key: &str, fallback: bool) -> bool {
    match store.get(key) {
        Ok(Some(value)) => value == "true",
        Ok(None) => fallback,
        Err(e) => {
            warn!("ignoring unreadable setting: {e}");
            fallback
        }
    }
}

fn store_bool(store: &mut dyn KeyValueStore, key: &str, value: bool) {
    if let Err(e) = store.set(key, if value { "true" } else { "false" }) {
        warn!("setting not saved: {e}");
    }
}
