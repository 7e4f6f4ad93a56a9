//! CLI route: single route table and run context. Dispatches to the resolver and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_candidates_json, format_candidates_text, format_value_map, format_value_maps,
    CandidateRow,
};
use crate::config::{CaconfConfig, ConfigLoader};
use crate::error::{ConfigurationError, StoreError};
use crate::resolver::ConfigurationResolver;
use crate::store::SledResourceStore;
use crate::tree::import::{import_file, load_file};
use crate::tree::{MemoryResourceStore, ResourceStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded settings and the content tree location.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: CaconfConfig,
    workspace_root: PathBuf,
    store_path: Option<PathBuf>,
}

impl RunContext {
    /// Create run context from workspace root, optional settings file and optional content tree.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        store_path: Option<PathBuf>,
    ) -> Result<Self, ConfigurationError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        if let Err(errors) = config.validate() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(ConfigurationError::Settings(messages.join("; ")));
        }

        Ok(Self {
            config,
            workspace_root,
            store_path,
        })
    }

    pub fn config(&self) -> &CaconfConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ConfigurationError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command.name(),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ConfigurationError> {
        match command {
            Commands::Resolve {
                context,
                name,
                format,
            } => {
                let resolver = self.resolver()?;
                let values = resolver.get_path(context)?.name(name.as_str()).as_value_map()?;
                format_value_map(&values, format)
            }
            Commands::Collection {
                context,
                name,
                format,
            } => {
                let resolver = self.resolver()?;
                let members = resolver
                    .get_path(context)?
                    .name(name.as_str())
                    .as_value_map_collection()?;
                format_value_maps(&members, format)
            }
            Commands::Has { context, name } => {
                let resolver = self.resolver()?;
                let found = resolver.get_path(context)?.has_name(name)?;
                Ok(found.to_string())
            }
            Commands::Candidates {
                context,
                name,
                format,
            } => {
                let resolver = self.resolver()?;
                let candidates = resolver.get_path(context)?.candidates(name)?;
                let rows: Vec<CandidateRow> = candidates
                    .iter()
                    .map(|candidate| CandidateRow {
                        path: candidate.path.to_string(),
                        origin: candidate.origin.to_string(),
                        exists: resolver.store().exists(&candidate.path).ok(),
                    })
                    .collect();
                if format == "json" {
                    format_candidates_json(&rows)
                } else {
                    Ok(format_candidates_text(&rows))
                }
            }
            Commands::Import { from, db } => {
                let store = SledResourceStore::new(db)?;
                let written = import_file(&store, from)?;
                store.flush()?;
                Ok(format!(
                    "Imported {} resources from {} into {}",
                    written,
                    from.display(),
                    db.display()
                ))
            }
        }
    }

    /// Resolver over the configured content tree.
    ///
    /// A directory is opened as a sled store, a file is loaded into memory and
    /// no store at all gives an empty tree, so only defaults and overrides apply.
    fn resolver(&self) -> Result<ConfigurationResolver, ConfigurationError> {
        let store: Arc<dyn ResourceStore> = match &self.store_path {
            Some(path) if path.is_dir() => {
                debug!(store = %path.display(), "Opening sled content store");
                Arc::new(SledResourceStore::new(path)?)
            }
            Some(path) if path.is_file() => {
                debug!(store = %path.display(), "Loading content file");
                Arc::new(load_file(path)?)
            }
            Some(path) => {
                return Err(StoreError::NotFound(format!(
                    "content store {} does not exist",
                    path.display()
                ))
                .into())
            }
            None => Arc::new(MemoryResourceStore::new()),
        };

        let overrides = self.config.override_provider()?;
        Ok(
            ConfigurationResolver::from_settings(store, &self.config.resolver)?
                .with_overrides(Arc::new(overrides)),
        )
    }
}
