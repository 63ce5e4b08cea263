//! File-backed document store
//!
//! Each collection is an append-only file `<root>/<collection>.jsonl`. One
//! line holds one document:
//!
//! ```text
//! <crc32 as 8 hex chars><TAB><document JSON>\n
//! ```
//!
//! The checksum covers exactly the JSON bytes. Every read verifies it, and a
//! mismatch or malformed line fails the whole read with
//! [`StoreError::Corruption`]; nothing is skipped or repaired. Each insert is
//! synced to disk before its identifier is returned. An insert into a file
//! whose last line is unterminated (a torn write) is refused with the same
//! error, since the new record would be glued onto the partial line.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use super::checksum::{compute_checksum, format_checksum, parse_checksum, verify_checksum};
use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::object_id::ObjectId;
use super::{stamp_document, validate_collection_name, Document, DocumentStore};

const COLLECTION_EXTENSION: &str = "jsonl";

/// Document store persisting collections as checksummed JSON-lines files
#[derive(Debug)]
pub struct FileDocumentStore {
    root: PathBuf,
    /// Serializes appends and reads so a reader never observes a partial line
    io_lock: Mutex<()>,
}

impl FileDocumentStore {
    /// Opens the store rooted at `root`, creating the directory if missing.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            StoreError::io(
                format!("Failed to create data directory {}", root.display()),
                e,
            )
        })?;

        Ok(Self {
            root,
            io_lock: Mutex::new(()),
        })
    }

    /// Path of the file backing `collection`
    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", collection, COLLECTION_EXTENSION))
    }

    fn append_line(&self, collection: &str, json: &[u8]) -> StoreResult<()> {
        let path = self.collection_path(collection);

        let mut line = Vec::with_capacity(json.len() + 10);
        line.extend_from_slice(format_checksum(compute_checksum(json)).as_bytes());
        line.push(b'\t');
        line.extend_from_slice(json);
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                StoreError::io(format!("Failed to open collection file {}", path.display()), e)
            })?;

        ensure_terminated(collection, &path, &mut file)?;

        file.write_all(&line).map_err(|e| {
            StoreError::io(format!("Failed to append to {}", path.display()), e)
        })?;
        file.sync_data()
            .map_err(|e| StoreError::io(format!("Failed to sync {}", path.display()), e))?;

        Ok(())
    }

    fn scan(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        let path = self.collection_path(collection);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::io(
                    format!("Failed to open collection file {}", path.display()),
                    e,
                ))
            }
        };

        let mut documents = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            if documents.len() >= limit {
                break;
            }
            let line = line.map_err(|e| {
                StoreError::io(format!("Failed to read {}", path.display()), e)
            })?;
            if line.is_empty() {
                continue;
            }

            let document = decode_line(collection, index + 1, &line)?;
            if filter.matches(&document) {
                documents.push(document);
            }
        }

        Ok(documents)
    }
}

/// Fails with `Corruption` when a non-empty file does not end in a newline.
fn ensure_terminated(collection: &str, path: &Path, file: &mut File) -> StoreResult<()> {
    let read_err = |e| StoreError::io(format!("Failed to read {}", path.display()), e);

    let len = file.metadata().map_err(read_err)?.len();
    if len == 0 {
        return Ok(());
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1)).map_err(read_err)?;
    file.read_exact(&mut last).map_err(read_err)?;
    if last[0] == b'\n' {
        return Ok(());
    }

    let mut content = Vec::new();
    file.seek(SeekFrom::Start(0)).map_err(read_err)?;
    file.read_to_end(&mut content).map_err(read_err)?;
    let line = content.iter().filter(|&&b| b == b'\n').count() + 1;

    Err(StoreError::corruption(
        collection,
        line,
        "unterminated last line",
    ))
}

/// Verifies and parses one persisted line.
fn decode_line(collection: &str, line_no: usize, line: &str) -> StoreResult<Document> {
    let (prefix, json) = line
        .split_once('\t')
        .ok_or_else(|| StoreError::corruption(collection, line_no, "missing checksum separator"))?;

    let expected = parse_checksum(prefix)
        .ok_or_else(|| StoreError::corruption(collection, line_no, "malformed checksum"))?;

    if !verify_checksum(json.as_bytes(), expected) {
        return Err(StoreError::corruption(
            collection,
            line_no,
            "checksum mismatch",
        ));
    }

    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(StoreError::corruption(
            collection,
            line_no,
            "record is not a JSON object",
        )),
        Err(e) => Err(StoreError::corruption(
            collection,
            line_no,
            format!("invalid JSON: {}", e),
        )),
    }
}

impl DocumentStore for FileDocumentStore {
    fn create_document(&self, collection: &str, document: Document) -> StoreResult<ObjectId> {
        validate_collection_name(collection)?;
        let (id, document) = stamp_document(document);
        let json = serde_json::to_vec(&document)?;

        let _guard = self.io_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.append_line(collection, &json)?;

        Ok(id)
    }

    fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        validate_collection_name(collection)?;
        let _guard = self.io_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.scan(collection, filter, limit)
    }

    fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            StoreError::io(
                format!("Failed to list data directory {}", self.root.display()),
                e,
            )
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io("Failed to read directory entry", e))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(COLLECTION_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_collection_name(stem).is_ok() {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();

        Ok(names)
    }
}
