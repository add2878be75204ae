use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::logging::Logger;
use crate::model::{AppState, StoredState, default_state};
use chrono::{Local, NaiveDate};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const APP_FOLDER_NAME: &str = "DesktopTaskAid";
pub const STATE_FILE_NAME: &str = "appState.json";

#[derive(Debug)]
pub enum FallbackReason {
    Missing,
    Corrupt(StoreError),
}

/// Result of a load. A fallback always carries a usable default state.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(AppState),
    Fallback {
        state: AppState,
        reason: FallbackReason,
    },
}

impl LoadOutcome {
    pub fn state(&self) -> &AppState {
        match self {
            LoadOutcome::Loaded(state) => state,
            LoadOutcome::Fallback { state, .. } => state,
        }
    }

    pub fn into_state(self) -> AppState {
        match self {
            LoadOutcome::Loaded(state) => state,
            LoadOutcome::Fallback { state, .. } => state,
        }
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback_reason().is_some()
    }
}

pub struct StateStore {
    data_folder: PathBuf,
    state_file: PathBuf,
    logger: Arc<dyn Logger>,
}

impl StateStore {
    /// Resolves `<data dir>/<app folder>` and creates it if needed.
    pub fn new(config: &StoreConfig, logger: Arc<dyn Logger>) -> Result<Self, StoreError> {
        let base = config
            .data_dir
            .clone()
            .or_else(dirs::data_dir)
            .ok_or(StoreError::NoDataDir)?;
        Self::with_file_name(
            base.join(&config.app_folder_name),
            &config.state_file_name,
            logger,
        )
    }

    pub fn at(
        data_folder: impl Into<PathBuf>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, StoreError> {
        Self::with_file_name(data_folder.into(), STATE_FILE_NAME, logger)
    }

    fn with_file_name(
        data_folder: PathBuf,
        file_name: &str,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, StoreError> {
        logger.log(&format!("data folder path: {}", data_folder.display()));
        if data_folder.is_dir() {
            logger.log("data folder already exists");
        } else {
            std::fs::create_dir_all(&data_folder).map_err(|source| StoreError::Init {
                path: data_folder.clone(),
                source,
            })?;
            logger.log("data folder created");
        }

        let state_file = data_folder.join(file_name);
        logger.log(&format!("state file path: {}", state_file.display()));

        Ok(Self {
            data_folder,
            state_file,
            logger,
        })
    }

    pub fn data_folder_path(&self) -> &Path {
        &self.data_folder
    }

    pub fn state_file_path(&self) -> &Path {
        &self.state_file
    }

    pub fn load_state(&self) -> AppState {
        self.load_state_on(Local::now().date_naive())
    }

    pub fn load_state_on(&self, today: NaiveDate) -> AppState {
        self.load_outcome_on(today).into_state()
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome_on(Local::now().date_naive())
    }

    /// Never fails: a missing or unusable file yields the default state.
    pub fn load_outcome_on(&self, today: NaiveDate) -> LoadOutcome {
        self.logger.log("loading state");

        let content = match std::fs::read_to_string(&self.state_file) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.logger
                    .log("state file does not exist, creating default state");
                return LoadOutcome::Fallback {
                    state: self.default_state(),
                    reason: FallbackReason::Missing,
                };
            }
            Err(source) => {
                return self.corrupt(StoreError::Read {
                    path: self.state_file.clone(),
                    source,
                });
            }
        };
        self.logger.log(&format!(
            "state file read, length: {} chars",
            content.chars().count()
        ));

        let mut state = match self.parse(&content) {
            Ok(state) => state,
            Err(err) => return self.corrupt(err),
        };

        if state.timer.refresh_daily_tracking(today) {
            self.logger
                .log(&format!("timer daily tracking rolled over to {today}"));
        }

        self.logger.log(&format!(
            "state loaded - tasks: {}, theme: {}",
            state.tasks.len(),
            state.settings.theme
        ));
        LoadOutcome::Loaded(state)
    }

    /// Writes the whole state through a sibling temp file so readers never see a
    /// partial document. Failures are logged and returned.
    pub fn save_state(&self, state: &AppState) -> Result<(), StoreError> {
        self.logger.log("saving state");
        match self.write(state) {
            Ok(len) => {
                self.logger.log(&format!("state saved ({len} bytes)"));
                Ok(())
            }
            Err(err) => {
                self.logger.log_error("failed to save state", &err);
                Err(err)
            }
        }
    }

    fn parse(&self, content: &str) -> Result<AppState, StoreError> {
        let stored: Option<StoredState> =
            serde_json::from_str(content).map_err(|source| StoreError::Parse {
                path: self.state_file.clone(),
                source,
            })?;
        stored
            .and_then(StoredState::into_app_state)
            .ok_or_else(|| StoreError::MissingTasks {
                path: self.state_file.clone(),
            })
    }

    fn write(&self, state: &AppState) -> Result<usize, StoreError> {
        let serialized =
            serde_json::to_string_pretty(state).map_err(|source| StoreError::Serialize {
                path: self.state_file.clone(),
                source,
            })?;

        let tmp = self.temp_path();
        let replaced = std::fs::write(&tmp, &serialized)
            .and_then(|()| std::fs::rename(&tmp, &self.state_file));
        if let Err(source) = replaced {
            if tmp.is_file() {
                let _ = std::fs::remove_file(&tmp);
            }
            return Err(StoreError::Write {
                path: self.state_file.clone(),
                source,
            });
        }
        Ok(serialized.len())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .state_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.state_file.with_file_name(name)
    }

    fn corrupt(&self, err: StoreError) -> LoadOutcome {
        self.logger
            .log_error("state file unusable, creating default state", &err);
        LoadOutcome::Fallback {
            state: self.default_state(),
            reason: FallbackReason::Corrupt(err),
        }
    }

    fn default_state(&self) -> AppState {
        let state = default_state();
        self.logger.log(&format!(
            "default state created with {} sample tasks",
            state.tasks.len()
        ));
        state
    }
}
