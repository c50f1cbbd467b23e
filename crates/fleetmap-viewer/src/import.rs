//! Asynchronous file import.
//!
//! Imports are read-then-parse on a worker thread; the app polls a channel
//! each frame and applies completed messages in arrival order. Starting a
//! second import of the same kind before the first resolves is not guarded
//! against — the later completion wins. There is no cancellation; a failure
//! is only observed when the read completes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use fleetmap_model::{DecodeError, SecurityConfig, TopologyMap};
use thiserror::Error;

/// Which of the two file formats an import carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Map,
    Security,
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportKind::Map => write!(f, "map"),
            ImportKind::Security => write!(f, "security"),
        }
    }
}

/// An import failure, worded exactly as shown to the user.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Transport-level failure; the file never made it into memory
    #[error("Error reading {kind} file")]
    Read {
        kind: ImportKind,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but did not decode
    #[error("Error parsing {kind} file: {source}")]
    Parse {
        kind: ImportKind,
        #[source]
        source: DecodeError,
    },
}

/// A successfully decoded import.
#[derive(Debug)]
pub enum ImportPayload {
    Map(TopologyMap),
    Security(SecurityConfig),
}

/// Completion message for one import request.
#[derive(Debug)]
pub struct ImportMessage {
    pub kind: ImportKind,
    pub file_name: String,
    pub result: Result<ImportPayload, ImportError>,
}

/// Spawns import workers and collects their completions.
pub struct Importer {
    tx: Sender<ImportMessage>,
    rx: Receiver<ImportMessage>,
}

impl Default for Importer {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl Importer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an import on a worker thread. Completion arrives via
    /// [`poll`](Self::poll).
    pub fn request(&self, kind: ImportKind, path: PathBuf) {
        tracing::info!(%kind, path = %path.display(), "import requested");
        let tx = self.tx.clone();
        thread::spawn(move || {
            // The receiver may be gone during shutdown; nothing to do then.
            let _ = tx.send(load(kind, &path));
        });
    }

    /// Next completed import, if any. Non-blocking.
    pub fn poll(&self) -> Option<ImportMessage> {
        self.rx.try_recv().ok()
    }
}

fn load(kind: ImportKind, path: &Path) -> ImportMessage {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let result = std::fs::read_to_string(path)
        .map_err(|source| ImportError::Read { kind, source })
        .and_then(|raw| decode(kind, &raw));
    ImportMessage {
        kind,
        file_name,
        result,
    }
}

/// Decode raw file contents for the given kind.
pub fn decode(kind: ImportKind, raw: &str) -> Result<ImportPayload, ImportError> {
    match kind {
        ImportKind::Map => TopologyMap::decode(raw)
            .map(ImportPayload::Map)
            .map_err(|source| ImportError::Parse { kind, source }),
        ImportKind::Security => SecurityConfig::decode(raw)
            .map(ImportPayload::Security)
            .map_err(|source| ImportError::Parse { kind, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn read_error_message_matches_contract() {
        let err = ImportError::Read {
            kind: ImportKind::Map,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "Error reading map file");
    }

    #[test]
    fn parse_error_message_matches_contract() {
        let err = decode(ImportKind::Security, r#"{"nope": 1}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error parsing security file: missing required field `AvoidSceneSet`"
        );
    }

    #[test]
    fn decode_routes_by_kind() {
        let map = decode(
            ImportKind::Map,
            r#"{"nodeKeys": [], "lineKeys": [], "nodeArr": []}"#,
        )
        .unwrap();
        assert!(matches!(map, ImportPayload::Map(_)));

        let security = decode(ImportKind::Security, r#"{"AvoidSceneSet": []}"#).unwrap();
        assert!(matches!(security, ImportPayload::Security(_)));
    }

    #[test]
    fn missing_file_completes_with_read_error() {
        let importer = Importer::new();
        importer.request(
            ImportKind::Map,
            PathBuf::from("/definitely/not/here/compress.json"),
        );

        let mut message = None;
        for _ in 0..100 {
            if let Some(msg) = importer.poll() {
                message = Some(msg);
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        let message = message.expect("import should complete");
        assert_eq!(message.kind, ImportKind::Map);
        assert!(matches!(message.result, Err(ImportError::Read { .. })));
    }
}
