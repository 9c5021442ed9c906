//! CLI command implementations.

pub mod check;
pub mod contact;
pub mod list;
pub mod serve;
pub mod show;

pub use check::check_content;
pub use contact::send_contact;
pub use list::{list_articles, recent_articles, tagged_articles};
pub use serve::serve;
pub use show::show_article;

use anyhow::{Context, Result};
use pressroom_core::Config;
use std::path::Path;

/// Read the config file (defaults when it doesn't exist) and apply
/// command-line overrides.
pub fn load_config(config_path: &Path, content_dir: Option<&Path>) -> Result<Config> {
    let mut config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    if let Some(dir) = content_dir {
        config.override_content_dir(dir);
    }

    Ok(config)
}
