// src/persistence.rs

//! Snapshot persistence for SAVE / RESTORE.
//!
//! The whole [`Keyspace`] (values and expiry deadlines) is encoded with
//! `bincode` into one file. Saving truncates and rewrites the file in place;
//! there is no temp-file rename, so a crash mid-write can leave a torn
//! snapshot behind.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::engine::kv::Keyspace;
use crate::error::SnapshotError;

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "dump.ledis";

/// Reads and writes the snapshot file at a fixed path.
#[derive(Debug, Clone)]
pub struct Persistence {
    path: PathBuf,
}

impl Default for Persistence {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_PATH)
    }
}

impl Persistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encode `ks` and replace whatever snapshot was there before.
    pub fn save(&self, ks: &Keyspace) -> Result<(), SnapshotError> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        bincode::serialize_into(&mut writer, ks)?;
        writer.flush()?;
        info!(
            path = %self.path.display(),
            keys = ks.len(),
            expiring = ks.expires.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Decode the snapshot into a detached keyspace.
    pub fn load(&self) -> Result<Keyspace, SnapshotError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let ks: Keyspace = bincode::deserialize_from(reader)?;
        Ok(ks)
    }
}
