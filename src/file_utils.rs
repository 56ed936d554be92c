use anyhow::{Result, Context};
use log::{debug, error, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

// @module: File utilities for the pipeline's durable JSON files

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load a JSON file, treating a missing or corrupt file as absent.
    ///
    /// The queue and dataset files are rebuilt from scratch when unreadable,
    /// so both cases collapse to `None` here.
    pub fn read_json_or_none<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Option<T> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Could not read {:?}: {}", path, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Could not parse {:?}, treating as absent: {}", path, e);
                None
            }
        }
    }

    /// Serialize a value to a JSON file, overwriting any previous content
    pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
        let content = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize JSON for {:?}", path.as_ref()))?;
        Self::write_to_file(path, &content)
    }

    /// Delete a file, logging instead of failing when it does not exist
    pub fn delete_file<P: AsRef<Path>>(path: P) {
        let path = path.as_ref();
        match fs::remove_file(path) {
            Ok(()) => debug!("File {:?} deleted successfully", path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!("File {:?} not found", path);
            }
            Err(e) => error!("An error occurred deleting {:?}: {}", path, e),
        }
    }
}
