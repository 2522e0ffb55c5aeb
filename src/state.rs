use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::Config;
use crate::data::error::LoadError;
use crate::data::filter::{self, ProjectView, Summary};
use crate::data::index::IndexedTables;
use crate::data::loader;
use crate::data::model::TableSet;
use crate::data::schema::{self, KeyTypeMismatch};

// ---------------------------------------------------------------------------
// Loaded snapshot
// ---------------------------------------------------------------------------

/// Size and mtime of every file a load reads. Absent files record `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint(Vec<(PathBuf, Option<(SystemTime, u64)>)>);

impl Fingerprint {
    fn of(path: &Path, config: &Config) -> Self {
        let mut files = loader::input_files(path, &config.sheet_names());
        files.push(config.resources_path(path));
        Fingerprint(
            files
                .into_iter()
                .map(|f| {
                    let stamp = file_stamp(&f);
                    (f, stamp)
                })
                .collect(),
        )
    }

    /// The source itself is listed first.
    fn source_exists(&self) -> bool {
        self.0.first().is_some_and(|(_, stamp)| stamp.is_some())
    }
}

fn file_stamp(path: &Path) -> Option<(SystemTime, u64)> {
    let meta = std::fs::metadata(path).ok()?;
    Some((meta.modified().ok()?, meta.len()))
}

/// One cleaned snapshot of a source, with its problems.
pub struct LoadedSource {
    pub path: PathBuf,
    fingerprint: Fingerprint,
    pub data: IndexedTables,
    pub diagnostics: Vec<LoadError>,
    pub key_warnings: Vec<KeyTypeMismatch>,
}

impl LoadedSource {
    fn load(path: &Path, config: &Config) -> Self {
        // Taken before reading so a write during the load shows up as stale.
        let fingerprint = Fingerprint::of(path, config);
        let resources = config.resources_path(path);
        let report = loader::load_source(
            path,
            &config.sheet_names(),
            Some(&resources),
            &config.clean_config(),
        );
        let key_warnings = schema::check_key_types(&report.tables);
        for w in &key_warnings {
            log::warn!("{w}");
        }
        LoadedSource {
            path: path.to_path_buf(),
            fingerprint,
            data: IndexedTables::new(report.tables),
            diagnostics: report.diagnostics,
            key_warnings,
        }
    }

    /// Nothing this snapshot was read from has changed on disk.
    fn is_fresh(&self, path: &Path, config: &Config) -> bool {
        self.path == path
            && self.fingerprint.source_exists()
            && self.fingerprint == Fingerprint::of(path, config)
    }

    pub fn tables(&self) -> &TableSet {
        self.data.tables()
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Sources found under `config.data_dir`.
    pub sources: Vec<PathBuf>,

    /// Current snapshot (None until a source is chosen).
    pub loaded: Option<LoadedSource>,

    /// Project names of the current snapshot, selector order.
    pub project_names: Vec<String>,

    pub selected_project: Option<String>,

    /// Filtered tables for the selected project (cached).
    pub view: Option<ProjectView>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let mut state = AppState {
            config,
            sources: Vec::new(),
            loaded: None,
            project_names: Vec::new(),
            selected_project: None,
            view: None,
            status_message: None,
        };
        state.refresh_sources();
        if let Some(path) = state.config.default_source_path() {
            state.set_source(&path);
        }
        state
    }

    pub fn refresh_sources(&mut self) {
        self.sources = loader::discover_sources(&self.config.data_dir);
        log::debug!("{} sources under {}", self.sources.len(), self.config.data_dir.display());
    }

    /// Switch to `path`. Re-selecting an unchanged source reuses the snapshot.
    pub fn set_source(&mut self, path: &Path) {
        let reuse = self
            .loaded
            .as_ref()
            .is_some_and(|l| l.is_fresh(path, &self.config));
        if !reuse {
            let loaded = LoadedSource::load(path, &self.config);
            self.status_message = if loaded.tables().contains(schema::PROJECTS) {
                None
            } else {
                Some("No Projects data available.".to_string())
            };
            self.project_names = filter::project_names(loaded.tables());
            self.loaded = Some(loaded);
        }

        // Keep the current project when the new source still has it.
        let keep = self
            .selected_project
            .clone()
            .filter(|name| self.project_names.contains(name));
        match keep.or_else(|| self.project_names.first().cloned()) {
            Some(name) => self.select_project(&name),
            None => {
                self.selected_project = None;
                self.view = None;
            }
        }
    }

    /// Read the current source again, whatever its files say.
    pub fn reload(&mut self) {
        if let Some(loaded) = self.loaded.take() {
            self.set_source(&loaded.path);
        }
    }

    /// Recompute the filtered tables for `name`.
    pub fn select_project(&mut self, name: &str) {
        let Some(loaded) = &self.loaded else {
            return;
        };
        let view = loaded.data.project_view(name);
        log::debug!(
            "{name}: {} tasks, {} goals, {} stakeholders",
            view.tasks.len(),
            view.goals.len(),
            view.stakeholders.details.len()
        );
        self.selected_project = Some(name.to_string());
        self.view = Some(view);
    }

    pub fn current_source(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|l| l.path.as_path())
    }

    pub fn summary(&self) -> Summary {
        self.loaded
            .as_ref()
            .map(|l| filter::summary(l.tables()))
            .unwrap_or_default()
    }

    /// Everything worth telling the user about the current snapshot.
    pub fn diagnostics(&self) -> Vec<String> {
        let Some(loaded) = &self.loaded else {
            return Vec::new();
        };
        loaded
            .diagnostics
            .iter()
            .map(|d| d.to_string())
            .chain(loaded.key_warnings.iter().map(|w| w.to_string()))
            .collect()
    }
}
