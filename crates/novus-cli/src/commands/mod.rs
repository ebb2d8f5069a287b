//! CLI command implementations.

pub mod catalog;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use novus_core::Catalog;
use tracing::{info, warn};

/// Load the catalog file if given, otherwise the builtin tables
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let catalog = Catalog::load(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?;
            info!("Loaded catalog from {}", path.display());
            Ok(catalog)
        }
        None => {
            warn!("No catalog file given, using builtin tables without duty baselines");
            Ok(Catalog::builtin())
        }
    }
}
