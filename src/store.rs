//! Session-scoped key-value persistence.
//!
//! The only thing remembered between launches is whether a full boot has
//! already been shown to this shell session.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{flog_debug, flog_warn, Result};

pub const HAS_BOOTED: &str = "hasBooted";
const SESSION_ENV: &str = "FOLIO_SESSION_ID";

pub trait SessionStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

pub fn has_booted(store: &dyn SessionStore) -> bool {
    store.get(HAS_BOOTED).as_deref() == Some("true")
}

pub fn mark_booted(store: &mut dyn SessionStore) -> Result<()> {
    store.set(HAS_BOOTED, "true")
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// JSON map in the temp dir, one file per controlling shell session.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSessionStore {
    /// Store for the shell this process was launched from.
    pub fn for_current_session() -> Result<Self> {
        Self::open(session_path(&session_key()))
    }

    /// Missing or unreadable files start empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        flog_debug!("FileSessionStore::open path={}", path.display());

        let values = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents).unwrap_or_else(|e| {
                flog_warn!("Ignoring corrupt session store {}: {}", path.display(), e);
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let temp_path = self.path.with_extension("json.tmp");
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&temp_path, &contents)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

fn session_key() -> String {
    if let Ok(id) = std::env::var(SESSION_ENV) {
        if !id.trim().is_empty() {
            return sanitize(&id);
        }
    }
    parent_key()
}

#[cfg(unix)]
fn parent_key() -> String {
    std::os::unix::process::parent_id().to_string()
}

#[cfg(not(unix))]
fn parent_key() -> String {
    "default".to_string()
}

fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

fn session_path(key: &str) -> PathBuf {
    std::env::temp_dir().join(format!("folio-session-{key}.json"))
}
