//! Per-session state store.
//!
//! A [`Session`] owns every value a trainee can see or change during one
//! interactive session: the process value, the six settings, saved notes, the
//! note text still being typed, and the action log. It performs no validation;
//! the control panel actions and the input widgets clamp before writing.

use crate::config::SimulatorConfig;
use crate::constants;
use crate::error::Result;
use crate::recipe::Recipe;
use crate::types::*;
use chrono::NaiveDateTime;
use std::collections::VecDeque;
use uuid::Uuid;

/// Unique identifier for an interactive session.
pub type SessionId = Uuid;

/// State for one interactive session.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    config: SimulatorConfig,
    pv_mm: f64,
    settings: SettingsRecord,
    notes: NotesRecord,
    note_buffers: NotesRecord,
    /// Newest entry first
    log: VecDeque<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with every field at its default.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Creates a session using custom limits.
    pub fn with_config(config: SimulatorConfig) -> Self {
        let notes = NotesRecord::default();
        Self {
            id: Uuid::new_v4(),
            config,
            pv_mm: constants::DEFAULT_PV_MM,
            settings: SettingsRecord::default(),
            note_buffers: notes.clone(),
            notes,
            log: VecDeque::new(),
        }
    }

    /// Identifier used to correlate log output.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Limits this session was created with.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Reads a numeric field by its JSON name.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownField`](crate::Error::UnknownField) if `field` is neither
    /// `pv_mm` nor a setting key.
    pub fn get(&self, field: &str) -> Result<f64> {
        Ok(match field.parse::<Field>()? {
            Field::ProcessValue => self.pv_mm,
            Field::Setting(key) => self.settings.get(key),
        })
    }

    /// Overwrites a numeric field by its JSON name. The value is stored as given.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownField`](crate::Error::UnknownField) if `field` is neither
    /// `pv_mm` nor a setting key.
    pub fn set(&mut self, field: &str, value: f64) -> Result<()> {
        match field.parse::<Field>()? {
            Field::ProcessValue => self.pv_mm = value,
            Field::Setting(key) => self.settings.set(key, value),
        }
        Ok(())
    }

    /// Current simulated mould position.
    pub fn pv_mm(&self) -> f64 {
        self.pv_mm
    }

    /// Overwrites the process value. Callers apply the travel clamp.
    pub fn set_pv_mm(&mut self, value: f64) {
        self.pv_mm = value;
    }

    /// All six settings.
    pub fn settings(&self) -> &SettingsRecord {
        &self.settings
    }

    /// One setting.
    pub fn setting(&self, key: SettingKey) -> f64 {
        self.settings.get(key)
    }

    /// Overwrites one setting.
    pub fn set_setting(&mut self, key: SettingKey, value: f64) {
        self.settings.set(key, value);
    }

    /// Saved notes.
    pub fn notes(&self) -> &NotesRecord {
        &self.notes
    }

    /// Saved note for one code.
    pub fn note(&self, code: NoteCode) -> &str {
        self.notes.get(code)
    }

    pub(crate) fn notes_mut(&mut self) -> &mut NotesRecord {
        &mut self.notes
    }

    /// Unsaved note text for one code.
    pub fn note_buffer(&self, code: NoteCode) -> &str {
        self.note_buffers.get(code)
    }

    /// Unsaved note text for one code, for a text editor to write into.
    pub fn note_buffer_mut(&mut self, code: NoteCode) -> &mut String {
        self.note_buffers.get_mut(code)
    }

    /// Replaces the unsaved note text for one code.
    pub fn set_note_buffer(&mut self, code: NoteCode, text: impl Into<String>) {
        self.note_buffers.set(code, text);
    }

    pub(crate) fn note_buffers(&self) -> &NotesRecord {
        &self.note_buffers
    }

    /// Every stored log entry, newest first.
    pub fn log(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.log.iter().map(String::as_str)
    }

    /// Number of stored log entries.
    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// The entries shown on the panel: newest first, at most
    /// `log_display_limit` of them.
    pub fn recent_log(&self) -> impl Iterator<Item = &str> + '_ {
        self.log().take(self.config.log_display_limit)
    }

    /// Prepends `"[HH:MM:SS] message"` and drops the oldest entries beyond
    /// the configured capacity.
    pub(crate) fn push_log(&mut self, now: NaiveDateTime, message: &str) {
        let entry = format!("[{}] {}", now.format(constants::LOG_TIME_FORMAT), message);
        self.log.push_front(entry);
        self.log.truncate(self.config.log_capacity);
    }

    /// Loads an imported recipe into this session.
    ///
    /// Numbers are clamped into the travel range. Both the saved notes and the
    /// note editors take the recipe's text. The action log is left alone.
    pub fn apply_recipe(&mut self, recipe: &Recipe) {
        self.pv_mm = self.config.clamp(recipe.pv_mm);
        for (key, value) in recipe.settings.iter() {
            self.settings.set(key, self.config.clamp(value));
        }
        self.notes = recipe.notes.clone();
        self.note_buffers = recipe.notes.clone();
        log::info!(
            "session {}: loaded recipe stamped {}",
            self.id,
            recipe.timestamp.format(constants::RECIPE_TIMESTAMP_FORMAT)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_session_defaults() {
        let session = Session::new();
        assert_eq!(session.pv_mm(), 0.0);
        assert_eq!(session.settings(), &SettingsRecord::default());
        for code in NoteCode::ALL {
            assert_eq!(session.note(code), "");
            assert_eq!(session.note_buffer(code), "");
        }
        assert_eq!(session.log_len(), 0);
    }

    #[test]
    fn test_reads_do_not_reset_values() {
        let mut session = Session::new();
        session.set_setting(SettingKey::Cracking, 11.5);
        session.set_pv_mm(40.0);
        let _ = session.get("cracking_mm").unwrap();
        let _ = session.settings();
        assert_eq!(session.setting(SettingKey::Cracking), 11.5);
        assert_eq!(session.pv_mm(), 40.0);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = Session::new();
        let second = Session::new();
        first.set_pv_mm(25.0);
        first.set_note_buffer(NoteCode::A, "only here");
        assert_eq!(second.pv_mm(), 0.0);
        assert_eq!(second.note_buffer(NoteCode::A), "");
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_get_and_set_by_name() {
        let mut session = Session::new();
        assert_eq!(session.get("open_stop1_mm").unwrap(), 60.0);
        session.set("open_stop1_mm", 61.5).unwrap();
        assert_eq!(session.setting(SettingKey::OpenStop1), 61.5);

        session.set("pv_mm", 12.0).unwrap();
        assert_eq!(session.get("pv_mm").unwrap(), 12.0);
    }

    #[test]
    fn test_unknown_field_fails_fast() {
        let mut session = Session::new();
        assert!(matches!(session.get("speed_mm"), Err(Error::UnknownField(f)) if f == "speed_mm"));
        assert!(matches!(session.set("notes", 1.0), Err(Error::UnknownField(_))));
        assert_eq!(session.settings(), &SettingsRecord::default());
    }

    #[test]
    fn test_store_does_not_clamp() {
        let mut session = Session::new();
        session.set("pv_mm", 999.0).unwrap();
        assert_eq!(session.pv_mm(), 999.0);
    }

    #[test]
    fn test_push_log_prepends_formatted_entry() {
        let mut session = Session::new();
        session.push_log(at(8, 5, 9), "Mold Open");
        session.push_log(at(8, 5, 10), "Mold Close");
        let entries: Vec<&str> = session.log().collect();
        assert_eq!(entries, vec!["[08:05:10] Mold Close", "[08:05:09] Mold Open"]);
    }

    #[test]
    fn test_recent_log_is_capped_for_display() {
        let mut session = Session::new();
        for i in 0..30 {
            session.push_log(at(9, 0, i), "Mold Open");
        }
        assert_eq!(session.log_len(), 30);
        let recent: Vec<&str> = session.recent_log().collect();
        assert_eq!(recent.len(), 25);
        assert_eq!(recent[0], "[09:00:29] Mold Open");
        assert_eq!(recent[24], "[09:00:05] Mold Open");
    }

    #[test]
    fn test_log_capacity_drops_oldest() {
        let config = SimulatorConfig {
            log_capacity: 3,
            ..SimulatorConfig::default()
        };
        let mut session = Session::with_config(config);
        for i in 0..5 {
            session.push_log(at(10, 0, i), "Mold Close");
        }
        let entries: Vec<&str> = session.log().collect();
        assert_eq!(
            entries,
            vec![
                "[10:00:04] Mold Close",
                "[10:00:03] Mold Close",
                "[10:00:02] Mold Close"
            ]
        );
    }
}
