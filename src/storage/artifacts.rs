//! Model artifacts on local disk. Each file is one JSON envelope carrying
//! the payload verbatim plus its SHA-256, so a truncated or edited file is
//! rejected at load instead of producing a half-valid model. Writes replace
//! the whole file through a temp file and rename.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMeta {
    pub kind: String,
    pub trained_at: DateTime<Utc>,
    pub run_id: Uuid,
    pub sha256: String,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    meta: ArtifactMeta,
    payload: Box<RawValue>,
}

fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Sibling temp file that `commit` renames over `name`
    fn staging_path(&self, name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        Ok(self.path(&format!(".{name}.tmp")))
    }

    fn commit(&self, staged: &Path, name: &str) -> Result<PathBuf> {
        let path = self.path(name);
        fs::rename(staged, &path)?;
        Ok(path)
    }

    fn replace_file(&self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        let tmp = self.staging_path(name)?;
        fs::write(&tmp, contents)?;
        self.commit(&tmp, name)
    }

    /// Serialize `value` under `name`, overwriting any previous artifact.
    pub fn save<T: Serialize>(&self, name: &str, kind: &str, run_id: Uuid, value: &T) -> Result<ArtifactMeta> {
        let payload_text = serde_json::to_string(value)?;
        let meta = ArtifactMeta {
            kind: kind.to_string(),
            trained_at: Utc::now(),
            run_id,
            sha256: sha256_hex(payload_text.as_bytes()),
        };
        let envelope = Envelope {
            meta: meta.clone(),
            payload: RawValue::from_string(payload_text)?,
        };
        let bytes = serde_json::to_vec(&envelope)?;
        let path = self.replace_file(name, &bytes)?;
        info!(path = %path.display(), kind, sha256 = %meta.sha256, bytes = bytes.len(), "artifact saved");
        Ok(meta)
    }

    /// Read, verify and deserialize the artifact `name` of the given kind.
    pub fn load<T: DeserializeOwned>(&self, name: &str, kind: &str) -> Result<(T, ArtifactMeta)> {
        let path = self.path(name);
        if !path.exists() {
            return Err(Error::ArtifactMissing(path));
        }
        let data = fs::read(&path)?;
        let corrupt = |reason: String| Error::ArtifactCorrupt {
            path: path.clone(),
            reason,
        };

        let envelope: Envelope = serde_json::from_slice(&data).map_err(|e| corrupt(format!("envelope: {e}")))?;
        if envelope.meta.kind != kind {
            return Err(corrupt(format!("expected kind {kind}, found {}", envelope.meta.kind)));
        }
        let actual = sha256_hex(envelope.payload.get().as_bytes());
        if actual != envelope.meta.sha256 {
            return Err(corrupt(format!("checksum mismatch: recorded {}, computed {actual}", envelope.meta.sha256)));
        }
        let value = serde_json::from_str(envelope.payload.get()).map_err(|e| corrupt(format!("payload: {e}")))?;
        debug!(path = %path.display(), kind, run_id = %envelope.meta.run_id, "artifact loaded");
        Ok((value, envelope.meta))
    }

    /// Write a header plus records as CSV, quoting fields only where needed.
    pub fn write_csv(&self, name: &str, header: &[&str], records: &[Vec<String>]) -> Result<PathBuf> {
        let tmp = self.staging_path(name)?;
        let mut writer = csv::Writer::from_path(&tmp)?;
        writer.write_record(header)?;
        for record in records {
            writer.write_record(record)?;
        }
        writer.flush()?;
        drop(writer);
        let path = self.commit(&tmp, name)?;
        info!(path = %path.display(), rows = records.len(), "dataset written");
        Ok(path)
    }
}
