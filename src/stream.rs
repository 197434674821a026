//! Resolution of destination/source identifiers into byte streams

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use crate::error::BackupError;

/// Identifier meaning standard output (export) or standard input (import)
pub const STDIO_TARGET: &str = "-";

/// Turns an opaque location into a readable or writable stream
pub trait StreamResolver {
    fn open_writer(&self, target: &str) -> Result<Box<dyn Write>, BackupError>;

    fn open_reader(&self, source: &str) -> Result<Box<dyn Read>, BackupError>;
}

/// Resolves identifiers as filesystem paths, with `-` for stdio
///
/// Relative paths are joined onto `base_dir` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileStreamResolver {
    base_dir: Option<PathBuf>,
}

impl FileStreamResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative identifiers against `base_dir`
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir: Some(base_dir),
        }
    }

    /// The filesystem path an identifier refers to
    pub fn resolve_path(&self, target: &str) -> PathBuf {
        let path = PathBuf::from(target);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }
}

impl StreamResolver for FileStreamResolver {
    fn open_writer(&self, target: &str) -> Result<Box<dyn Write>, BackupError> {
        if target == STDIO_TARGET {
            return Ok(Box::new(io::stdout()));
        }

        let path = self.resolve_path(target);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| BackupError::stream_unavailable(target, e))?;
        }

        let file = File::create(&path).map_err(|e| BackupError::stream_unavailable(target, e))?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn open_reader(&self, source: &str) -> Result<Box<dyn Read>, BackupError> {
        if source == STDIO_TARGET {
            return Ok(Box::new(io::stdin()));
        }

        let file = File::open(self.resolve_path(source))
            .map_err(|e| BackupError::stream_unavailable(source, e))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writer_then_reader() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = FileStreamResolver::with_base_dir(temp_dir.path().to_path_buf());

        {
            let mut writer = resolver.open_writer("out/backup.json").unwrap();
            writer.write_all(b"hello").unwrap();
            writer.flush().unwrap();
        }

        let mut contents = String::new();
        resolver
            .open_reader("out/backup.json")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "hello");
    }

    #[test]
    fn test_missing_source_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = FileStreamResolver::with_base_dir(temp_dir.path().to_path_buf());

        let err = resolver.open_reader("missing.json").err().unwrap();
        assert!(matches!(err, BackupError::StreamUnavailable { .. }));
    }

    #[test]
    fn test_absolute_path_ignores_base() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = FileStreamResolver::with_base_dir(PathBuf::from("/unused"));
        let absolute = temp_dir.path().join("x.json");

        assert_eq!(resolver.resolve_path(absolute.to_str().unwrap()), absolute);
    }
}
