//! Workspace settings files, layered base first:
//! `<workspace>/config/config.toml`, then `<workspace>/config/<profile>.toml`
//! where the profile comes from `CACONF_ENV`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the settings profile
pub const PROFILE_VAR: &str = "CACONF_ENV";

const DEFAULT_PROFILE: &str = "development";

/// Active settings profile; unset or blank means `development`
pub fn settings_profile() -> String {
    std::env::var(PROFILE_VAR)
        .ok()
        .map(|profile| profile.trim().to_string())
        .filter(|profile| !profile.is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}

/// Settings files of a workspace in layering order, whether or not they exist
pub fn workspace_config_paths(workspace_root: &Path, profile: &str) -> Vec<PathBuf> {
    let settings_dir = workspace_root.join("config");
    vec![
        settings_dir.join("config.toml"),
        settings_dir.join(format!("{}.toml", profile)),
    ]
}

/// Layer the workspace files that exist onto `builder`
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let profile = settings_profile();
    let layered = workspace_config_paths(workspace_root, &profile)
        .into_iter()
        .filter(|path| {
            let present = path.is_file();
            if !present {
                debug!(config_path = %path.display(), profile = %profile, "No workspace settings file");
            }
            present
        })
        .fold(builder, |builder, path| {
            builder.add_source(File::from(path.as_path()).required(false))
        });
    Ok(layered)
}
