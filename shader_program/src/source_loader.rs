//! Shader source loading
//!
//! A loader returns the complete text of a shader source or an error; it
//! never hands back a partial buffer. The resource layer treats every loader
//! error the same way ("source unavailable").

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::config::LoaderConfig;

/// Source loader collaborator
pub trait SourceLoader {
    /// Read the whole content of `path` as text
    fn read_whole_file(&self, path: &Path) -> io::Result<String>;
}

// ============================================================================
// File loader
// ============================================================================

/// Loader reading shader sources from the filesystem
#[derive(Debug, Clone, Default)]
pub struct FileSourceLoader {
    config: LoaderConfig,
}

impl FileSourceLoader {
    /// Create a loader with the given configuration
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Loader configuration
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Path actually opened for `path` (joined with `shader_root` when relative)
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.config.shader_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl SourceLoader for FileSourceLoader {
    fn read_whole_file(&self, path: &Path) -> io::Result<String> {
        if path.as_os_str().is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty shader path"));
        }

        let resolved = self.resolve(path);
        let metadata = fs::metadata(&resolved)?;
        if !metadata.is_file() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
        }
        if metadata.len() > self.config.max_source_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "source is {} bytes, limit is {} bytes",
                    metadata.len(),
                    self.config.max_source_size
                ),
            ));
        }

        fs::read_to_string(&resolved)
    }
}

// ============================================================================
// In-memory loader
// ============================================================================

/// Loader serving sources registered in memory (embedded shaders, tests)
#[derive(Debug, Clone, Default)]
pub struct MemorySourceLoader {
    sources: FxHashMap<PathBuf, String>,
}

impl MemorySourceLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the source served for `path`
    pub fn insert(&mut self, path: impl Into<PathBuf>, source: impl Into<String>) {
        self.sources.insert(path.into(), source.into());
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_source(mut self, path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    /// Number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True when no source is registered
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl SourceLoader for MemorySourceLoader {
    fn read_whole_file(&self, path: &Path) -> io::Result<String> {
        self.sources.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no source registered for this path")
        })
    }
}

#[cfg(test)]
#[path = "source_loader_tests.rs"]
mod tests;
