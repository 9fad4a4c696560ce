//! Application state management structures.
//!
//! The trainer app owns one [`Session`] plus the UI-only state around it:
//! which page is showing, which panel skin is selected, and the bookkeeping
//! for recipe downloads and uploads.

use crate::constants;
use crate::session::Session;
use crate::types::NoteCode;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Top-level pages reachable from the navigation panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Page {
    /// Welcome text, golden rules, sample recipe download
    Home,
    /// The control panel itself
    MoldSetting,
    /// Plain-language definitions
    Glossary,
}

impl Page {
    /// All pages in navigation order.
    pub const ALL: [Page; 3] = [Page::Home, Page::MoldSetting, Page::Glossary];

    /// Navigation label.
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::MoldSetting => "Mold Setting",
            Page::Glossary => "Glossary",
        }
    }
}

/// Visual treatment of the Mold Setting page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Skin {
    /// Simple layout with tips, note editors and the action log
    Trainer,
    /// Look-alike of the DABO machine's MOLD SETTING screen
    DaboClone,
}

/// State related to recipe files.
///
/// Async dialogs report back through the channel; results are drained at the
/// start of every frame.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct FileState {
    /// Download requested this frame
    #[serde(skip)]
    pub pending_save_operation: Option<PendingSaveOperation>,
    /// Upload requested this frame
    #[serde(skip)]
    pub pending_load_operation: Option<PendingLoadOperation>,
    /// Channel for receiving file operation results from async contexts
    #[serde(skip)]
    pub file_operation_sender: Option<Sender<FileOperationResult>>,
    /// Receiving end, drained by the UI thread
    #[serde(skip)]
    pub file_operation_receiver: Option<Receiver<FileOperationResult>>,
    /// Last outcome shown under the panel
    #[serde(skip)]
    pub status: Option<StatusMessage>,
}

impl Default for FileState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            pending_save_operation: None,
            pending_load_operation: None,
            file_operation_sender: Some(sender),
            file_operation_receiver: Some(receiver),
            status: None,
        }
    }
}

/// Which recipe a pending download should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingSaveOperation {
    /// Factory settings with starter tips
    SampleRecipe,
    /// Snapshot of the current session
    CurrentRecipe,
}

impl PendingSaveOperation {
    /// Suggested file name for the download.
    pub fn file_name(self) -> &'static str {
        match self {
            PendingSaveOperation::SampleRecipe => constants::SAMPLE_RECIPE_FILE,
            PendingSaveOperation::CurrentRecipe => constants::CURRENT_RECIPE_FILE,
        }
    }
}

/// Represents a pending load operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingLoadOperation {
    /// Pick a recipe file and load it into the session
    Recipe,
}

/// Messages sent from async file operations back to the main app.
#[derive(Debug)]
pub enum FileOperationResult {
    /// Save operation completed successfully with the given path
    SaveCompleted(String),
    /// Load operation completed successfully with path and content
    LoadCompleted(String, String),
    /// Operation failed with an error message
    OperationFailed(String),
}

/// A one-line status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Something finished
    Info(String),
    /// Something went wrong
    Error(String),
}

/// The main application structure.
///
/// Only UI preferences are persisted between launches; the session always
/// starts fresh.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerApp {
    /// The trainee's session
    #[serde(skip)]
    pub session: Session,
    /// Page currently shown
    pub page: Page,
    /// Look of the Mold Setting page
    pub skin: Skin,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Recipe file bookkeeping
    #[serde(skip)]
    pub file: FileState,
    /// Row whose NOTE editor is expanded on the clone skin
    #[serde(skip)]
    pub open_note: Option<NoteCode>,
}

impl Default for TrainerApp {
    fn default() -> Self {
        Self {
            session: Session::new(),
            page: Page::Home,
            skin: Skin::Trainer,
            dark_mode: true,
            file: FileState::default(),
            open_note: None,
        }
    }
}

impl TrainerApp {
    /// Builds the app, restoring UI preferences from eframe storage if present.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let restored = cc
            .storage
            .and_then(|storage| storage.get_string(constants::APP_STATE_KEY))
            .and_then(|json| match Self::from_json(&json) {
                Ok(app) => Some(app),
                Err(err) => {
                    log::warn!("Ignoring stored UI preferences: {err}");
                    None
                }
            })
            .unwrap_or_default();
        log::info!("session {} started", restored.session.id());
        restored
    }

    /// Serializes the persisted UI preferences to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Restores UI preferences from JSON. Session fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub(crate) fn set_status_info(&mut self, text: impl Into<String>) {
        self.file.status = Some(StatusMessage::Info(text.into()));
    }

    pub(crate) fn set_status_error(&mut self, text: impl Into<String>) {
        self.file.status = Some(StatusMessage::Error(text.into()));
    }
}
