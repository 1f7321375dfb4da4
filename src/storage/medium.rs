use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Durable key-value medium holding string values
///
/// A missing key reads as `Ok(None)`. Implementations must be `Send` so the
/// store can live behind the server's mutex.
pub trait Medium: Send {
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Directory-backed medium with one file per key
///
/// `:` in keys maps to `.` in file names, so `td:tasks:v1` is stored in
/// `<dir>/td.tasks.v1`. The directory is created on first write.
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key.replace(':', "."))
    }
}

impl Medium for FileMedium {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }
}

/// In-memory medium for tests and throwaway sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryMedium {
    entries: HashMap<String, String>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any serialization
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Medium for MemoryMedium {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
