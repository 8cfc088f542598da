//! Persistence layer for snapshots

use crate::error::SnapshotError;
use crate::snapshot::{Snapshot, SNAPSHOT_FORMAT_VERSION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, instrument};

/// On-disk encoding of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    #[default]
    Json,
    Bincode,
}

impl SnapshotFormat {
    /// Pick a format from the file extension, falling back to `default`.
    pub fn for_path(path: &Path, default: SnapshotFormat) -> SnapshotFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => SnapshotFormat::Json,
            Some("bin") | Some("snap") => SnapshotFormat::Bincode,
            _ => default,
        }
    }
}

impl FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(SnapshotFormat::Json),
            "bincode" => Ok(SnapshotFormat::Bincode),
            other => Err(format!(
                "Invalid snapshot format: {} (must be 'json' or 'bincode')",
                other
            )),
        }
    }
}

impl std::fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotFormat::Json => write!(f, "json"),
            SnapshotFormat::Bincode => write!(f, "bincode"),
        }
    }
}

/// Save and load snapshot documents
pub trait SnapshotStore {
    fn save(&self, snapshot: &Snapshot, destination: &Path) -> Result<(), SnapshotError>;
    fn load(&self, source: &Path) -> Result<Snapshot, SnapshotError>;
}

/// Pretty-printed JSON snapshots
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSnapshotStore;

impl SnapshotStore for JsonSnapshotStore {
    fn save(&self, snapshot: &Snapshot, destination: &Path) -> Result<(), SnapshotError> {
        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        write_file(destination, &bytes)
    }

    fn load(&self, source: &Path) -> Result<Snapshot, SnapshotError> {
        let bytes = fs::read(source).map_err(|e| SnapshotError::from_io(source, e))?;
        let parse_error = |e: serde_json::Error| {
            SnapshotError::Serialization(format!("Failed to parse {}: {}", source.display(), e))
        };

        let header: VersionHeader = serde_json::from_slice(&bytes).map_err(parse_error)?;
        check_version(header.version)?;
        serde_json::from_slice(&bytes).map_err(parse_error)
    }
}

/// Leading bytes of a binary snapshot file
const BINCODE_MAGIC: [u8; 4] = *b"DSNP";

/// Fields read before the full document, so newer schemas fail on version
#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

/// Compact binary snapshots: magic prefix, then the bincode document
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeSnapshotStore;

impl SnapshotStore for BincodeSnapshotStore {
    fn save(&self, snapshot: &Snapshot, destination: &Path) -> Result<(), SnapshotError> {
        let body =
            bincode::serialize(snapshot).map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        let mut bytes = Vec::with_capacity(BINCODE_MAGIC.len() + body.len());
        bytes.extend_from_slice(&BINCODE_MAGIC);
        bytes.extend_from_slice(&body);
        write_file(destination, &bytes)
    }

    fn load(&self, source: &Path) -> Result<Snapshot, SnapshotError> {
        let bytes = fs::read(source).map_err(|e| SnapshotError::from_io(source, e))?;
        let decode_error = |e: bincode::Error| {
            SnapshotError::Serialization(format!("Failed to decode {}: {}", source.display(), e))
        };

        let body = bytes.strip_prefix(&BINCODE_MAGIC[..]).ok_or_else(|| {
            SnapshotError::Serialization(format!(
                "{} is not a dirsnap binary snapshot",
                source.display()
            ))
        })?;
        // `version` is the first field of every schema version
        let version: u32 = bincode::deserialize(body).map_err(decode_error)?;
        check_version(version)?;
        bincode::deserialize(body).map_err(decode_error)
    }
}

/// Store implementation for `format`
pub fn open_store(format: SnapshotFormat) -> Box<dyn SnapshotStore> {
    match format {
        SnapshotFormat::Json => Box::new(JsonSnapshotStore),
        SnapshotFormat::Bincode => Box::new(BincodeSnapshotStore),
    }
}

#[instrument(skip_all, fields(path = %destination.display(), bytes = bytes.len()))]
fn write_file(destination: &Path, bytes: &[u8]) -> Result<(), SnapshotError> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SnapshotError::from_io(parent, e))?;
        }
    }
    fs::write(destination, bytes).map_err(|e| SnapshotError::from_io(destination, e))?;
    debug!("Snapshot written");
    Ok(())
}

fn check_version(version: u32) -> Result<(), SnapshotError> {
    if version != SNAPSHOT_FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(version));
    }
    Ok(())
}
