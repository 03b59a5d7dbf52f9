//! CLI route: single route table and run context.

use crate::cli::output::format_changes_text;
use crate::cli::parse::Commands;
use crate::config::{ConfigLoader, DendriteConfig};
use crate::error::ApiError;
use crate::session::Session;
use crate::store::DirectoryStore;
use crate::types::{DatabaseKind, NoteId};
use crate::views::ViewMode;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: resolved configuration and the
/// database directory.
pub struct RunContext {
    config: DendriteConfig,
    backend: DirectoryStore,
}

impl RunContext {
    /// Load configuration from `config_path` if given, else from the layered
    /// sources of `workspace_root`. `db_root` wins over the configured root.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        db_root: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        config.validate().map_err(crate::config::validation_failed)?;

        let root = match db_root {
            Some(root) => root,
            None => config.resolve_db_root(&workspace_root),
        };
        debug!(db_root = %root.display(), "Resolved database root");
        Ok(Self {
            config,
            backend: DirectoryStore::new(root),
        })
    }

    pub fn config(&self) -> &DendriteConfig {
        &self.config
    }

    pub fn db_root(&self) -> &Path {
        self.backend.root()
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Init => self.handle_init(),
            Commands::Check => self.handle_check(),
            Commands::Render {
                kind,
                node,
                open,
                max_length,
                mode,
            } => self.handle_render(*kind, node.as_deref(), open, *max_length, *mode),
            Commands::Resolve { path, note, kind } => self.handle_resolve(path, *note, *kind),
            Commands::Config => self.handle_config(),
            Commands::Status { format } => self.handle_status(format),
        }
    }

    fn open_session(&self) -> Result<Session, ApiError> {
        if !self.backend.exists() {
            return Err(ApiError::MissingDatabase(self.backend.root().to_path_buf()));
        }
        Ok(Session::open(&self.backend, &self.config)?)
    }

    fn handle_init(&self) -> Result<String, ApiError> {
        let root = self.backend.root().display();
        if self.backend.initialize()? {
            Ok(format!("Initialized empty database at {}", root))
        } else {
            Ok(format!("Database already present at {}", root))
        }
    }

    fn handle_check(&self) -> Result<String, ApiError> {
        let session = self.open_session()?;
        let store = session.store();
        let mut lines = Vec::new();
        for kind in DatabaseKind::ALL {
            lines.push(format!("{}: {} nodes", kind, store.tree(kind).len()));
        }
        lines.push(format!("notes: {}", store.note_count()));
        lines.push(format!("next note id: {}", store.next_note_id()));
        info!(notes = store.note_count(), "Database check passed");
        Ok(lines.join("\n"))
    }

    fn handle_render(
        &self,
        kind: DatabaseKind,
        node: Option<&str>,
        open: &[String],
        max_length: Option<usize>,
        mode: ViewMode,
    ) -> Result<String, ApiError> {
        let mut session = self.open_session()?;
        if let Some(path) = node {
            session.open_node(kind, path)?;
        }
        for path in open {
            session.open_note(kind, path)?;
        }
        let budget = max_length.unwrap_or(self.config.render.max_interface_length);
        Ok(session.render_with_budget(kind, mode, budget))
    }

    fn handle_resolve(&self, path: &str, note: bool, kind: DatabaseKind) -> Result<String, ApiError> {
        let session = self.open_session()?;
        let store = session.store();
        let anchor = store.root_of(kind);
        if note {
            let (node, id): (_, NoteId) = store.resolve_note(path, anchor)?;
            Ok(format!("{}/{}", store.node_path(node), id))
        } else {
            let resolved = store.resolve(path, anchor, false)?;
            Ok(store.node_path(resolved.node))
        }
    }

    fn handle_config(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(&self.config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to encode configuration: {}", e)))
    }

    fn handle_status(&self, format: &str) -> Result<String, ApiError> {
        let session = self.open_session()?;
        let changes = session.changes();
        match format {
            "json" => serde_json::to_string_pretty(&changes)
                .map_err(|e| ApiError::ConfigError(format!("Failed to encode status: {}", e))),
            "text" => Ok(format_changes_text(&changes)),
            other => Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}
