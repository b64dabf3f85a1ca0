//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can prepare the
//! data directory next to the store it opens.

use std::path::Path;

/// Ensure the store's parent directory exists; warn if static assets are missing.
pub async fn ensure_env(static_dir: &Path, data_file: &Path) -> anyhow::Result<()> {
    let data_dir = match data_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    common::env::ensure_env(static_dir, data_dir).await
}
