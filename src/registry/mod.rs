//! File-backed user registry.
//!
//! One JSON file per user under `<data>/users/<clientID>.json`. Writes go
//! through a temp file, fsync, and an atomic rename so a crash never leaves
//! a half-written record. The whole directory is read once at startup; the
//! in-memory map is the working copy.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rand::distributions::Uniform;
use rand::prelude::*;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

const USER_DIRECTORY_NAME: &str = "users";

/// RFC 4648 base-32 alphabet; 26 characters cover the 16 bytes of id entropy.
const BASE32_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const CLIENT_ID_LEN: usize = 26;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// Derived from the file name, never stored in the body.
    #[serde(skip)]
    pub client_id: String,
    pub client_secret: String,
    pub display_name: String,
}

#[derive(Debug)]
pub struct UserStore {
    root: PathBuf,
    users: Mutex<HashMap<String, UserRecord>>,
}

fn new_client_id() -> String {
    let dist = Uniform::from(0..BASE32_ALPHABET.len());
    let mut rng = OsRng;
    (0..CLIENT_ID_LEN)
        .map(|_| BASE32_ALPHABET[dist.sample(&mut rng)] as char)
        .collect()
}

impl UserStore {
    /// Open (creating directories as needed) and load every user record.
    pub fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(USER_DIRECTORY_NAME))?;

        let mut users = HashMap::new();
        for entry in fs::read_dir(root.join(USER_DIRECTORY_NAME))? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let record = read_user(&path)?;
            users.insert(record.client_id.clone(), record);
        }
        debug!(count = users.len(), "loaded user registry");

        Ok(Self {
            root,
            users: Mutex::new(users),
        })
    }

    fn user_dir(&self) -> PathBuf {
        self.root.join(USER_DIRECTORY_NAME)
    }

    /// Create a user, persist it, and return the fresh client id.
    pub fn register(&self, client_secret: &str, display_name: &str) -> std::io::Result<String> {
        let record = UserRecord {
            client_id: new_client_id(),
            client_secret: client_secret.to_string(),
            display_name: display_name.to_string(),
        };
        write_user(&self.user_dir(), &record)?;

        let client_id = record.client_id.clone();
        self.users
            .lock()
            .expect("user registry lock poisoned")
            .insert(client_id.clone(), record);
        Ok(client_id)
    }

    pub fn get(&self, client_id: &str) -> Option<UserRecord> {
        self.users
            .lock()
            .expect("user registry lock poisoned")
            .get(client_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().expect("user registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_user(path: &Path) -> std::io::Result<UserRecord> {
    let data = fs::read(path)?;
    let mut record: UserRecord = serde_json::from_slice(&data)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidData, "bad user file name"))?;
    record.client_id = stem.to_string();
    Ok(record)
}

fn write_user(user_dir: &Path, record: &UserRecord) -> std::io::Result<()> {
    let final_path = user_dir.join(format!("{}.json", record.client_id));
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{}", record.client_id))
        .tempfile_in(user_dir)?;
    serde_json::to_writer(&mut tmp, record)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(&final_path).map_err(|err| err.error)?;
    Ok(())
}
