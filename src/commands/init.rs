use crate::commands::Out;
use crate::config::default_config_path;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Writes a config file holding the default settings, at `path` or at `~/.split-ledger.json`.
///
/// # Errors
/// - Returns an error if the file already exists or cannot be written.
pub async fn init(path: Option<&Path>) -> Result<Out<()>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()
            .context("Unable to find your home directory, pass --path instead")?,
    };
    let config = Config::create(&path)
        .await
        .context("Unable to create the config file")?;
    Ok(format!(
        "Created {} (excluded category '{}')",
        path.display(),
        config.excluded_category()
    )
    .into())
}
