use log::{debug, info};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::errors::DashboardResult;

/// CsvConnection owns the data directory and the single in-process write lock.
///
/// Every repository built from clones of one connection shares the same lock, so
/// registration and audit appends never interleave within this process.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> DashboardResult<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Resolve a file name relative to the data directory. Absolute paths are kept.
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        let path = Path::new(file_name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_directory.join(path)
        }
    }

    /// Directory holding one user's records in the per-user layout
    pub fn user_directory(&self, username: &str) -> PathBuf {
        self.base_directory.join(safe_directory_name(username))
    }

    pub fn user_records_path(&self, username: &str) -> PathBuf {
        self.user_directory(username).join("expenses.csv")
    }

    /// Serialize writes to the backing files
    pub fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ensure a CSV file exists and starts with a header row.
    /// Returns true when the file was created or was empty.
    pub fn ensure_file_with_header(&self, path: &Path, header: &[&str]) -> DashboardResult<bool> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let is_empty = match fs::metadata(path) {
            Ok(metadata) => metadata.len() == 0,
            Err(_) => true,
        };

        if is_empty {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}", header.join(","))?;
            debug!("Wrote CSV header to {}", path.display());
        }

        Ok(is_empty)
    }
}

/// Generate a safe filesystem identifier from a username.
/// Converts "Emma Smith" -> "emma_smith", "José María" -> "jose_maria", etc.
pub fn safe_directory_name(username: &str) -> String {
    let mapped: String = username
        .trim()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'a',
            'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'u',
            'ñ' | 'Ñ' => 'n',
            'ç' | 'Ç' => 'c',
            c if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
            '.' | '-' => c,
            _ => '_',
        })
        .collect();

    // Collapse consecutive underscores
    let mut collapsed = String::with_capacity(mapped.len());
    let mut last_was_underscore = false;
    for c in mapped.chars() {
        if c == '_' {
            if !last_was_underscore {
                collapsed.push('_');
            }
            last_was_underscore = true;
        } else {
            collapsed.push(c);
            last_was_underscore = false;
        }
    }

    let trimmed = collapsed.trim_matches(|c| c == '_' || c == '.');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}
