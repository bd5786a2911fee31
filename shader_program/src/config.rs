/// Configuration of the shader source loader

use std::path::PathBuf;

/// Default upper bound for a single shader source file (16 MiB)
pub const DEFAULT_MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// File loader configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory relative shader paths are resolved against
    /// (`None` = relative to the working directory)
    pub shader_root: Option<PathBuf>,
    /// Files larger than this are refused as unavailable
    pub max_source_size: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            shader_root: None,
            max_source_size: DEFAULT_MAX_SOURCE_SIZE,
        }
    }
}

impl LoaderConfig {
    /// Default configuration rooted at `shader_root`
    pub fn with_root(shader_root: impl Into<PathBuf>) -> Self {
        Self {
            shader_root: Some(shader_root.into()),
            ..Self::default()
        }
    }
}
