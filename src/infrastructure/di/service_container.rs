//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::{AnalysisService, ProfileService};
use crate::config;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub profiles: ProfileService,

    pub analysis: AnalysisService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations
    /// and the config file under the user's home directory.
    pub fn new() -> Self {
        Self::with_deps(Arc::new(RealFileSystem), config::config_path())
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(fs: Arc<dyn FileSystem>, config_path: PathBuf) -> Self {
        Self {
            profiles: ProfileService::new(fs.clone(), config_path),
            analysis: AnalysisService::new(fs.clone()),
            fs,
        }
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}
