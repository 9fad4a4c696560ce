//! Core data types for the mold setting simulator.
//!
//! This module defines the named settings, the note codes that label them, and
//! the two records a trainee edits: the settings record and the notes record.

use crate::constants;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// JSON key of the process value.
pub const PV_FIELD: &str = "pv_mm";

/// One of the six configurable machine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// A. Small opening offset used to ease ejection and venting
    Cracking,
    /// B. Position where the closing stroke switches to slow speed
    CloseSlow,
    /// C. Position where the opening stroke switches to slow speed
    OpenSlow,
    /// D. First stop position when opening
    OpenStop1,
    /// F. Air-to-air gap when closing
    A2aClose,
    /// G. Air-to-air gap when opening
    A2aOpen,
}

impl SettingKey {
    /// All settings in panel order.
    pub const ALL: [SettingKey; 6] = [
        SettingKey::Cracking,
        SettingKey::CloseSlow,
        SettingKey::OpenSlow,
        SettingKey::OpenStop1,
        SettingKey::A2aClose,
        SettingKey::A2aOpen,
    ];

    /// JSON key used in recipes and by [`Session::get`](crate::Session::get).
    pub fn field_name(self) -> &'static str {
        match self {
            SettingKey::Cracking => "cracking_mm",
            SettingKey::CloseSlow => "close_slow_mm",
            SettingKey::OpenSlow => "open_slow_mm",
            SettingKey::OpenStop1 => "open_stop1_mm",
            SettingKey::A2aClose => "a2a_close_mm",
            SettingKey::A2aOpen => "a2a_open_mm",
        }
    }

    /// Upper-case process name as printed on the machine panel.
    pub fn label(self) -> &'static str {
        match self {
            SettingKey::Cracking => "CRACKING",
            SettingKey::CloseSlow => "MOLD CLOSE SLOW",
            SettingKey::OpenSlow => "MOLD OPEN SLOW",
            SettingKey::OpenStop1 => "MOLD OPEN STOP 1",
            SettingKey::A2aClose => "A2A CLOSE",
            SettingKey::A2aOpen => "A2A OPEN",
        }
    }

    /// The panel code for this row.
    pub fn code(self) -> NoteCode {
        match self {
            SettingKey::Cracking => NoteCode::A,
            SettingKey::CloseSlow => NoteCode::B,
            SettingKey::OpenSlow => NoteCode::C,
            SettingKey::OpenStop1 => NoteCode::D,
            SettingKey::A2aClose => NoteCode::F,
            SettingKey::A2aOpen => NoteCode::G,
        }
    }

    /// Factory default for this setting.
    pub fn default_mm(self) -> f64 {
        match self {
            SettingKey::Cracking => constants::DEFAULT_CRACKING_MM,
            SettingKey::CloseSlow => constants::DEFAULT_CLOSE_SLOW_MM,
            SettingKey::OpenSlow => constants::DEFAULT_OPEN_SLOW_MM,
            SettingKey::OpenStop1 => constants::DEFAULT_OPEN_STOP1_MM,
            SettingKey::A2aClose => constants::DEFAULT_A2A_CLOSE_MM,
            SettingKey::A2aOpen => constants::DEFAULT_A2A_OPEN_MM,
        }
    }
}

impl FromStr for SettingKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.field_name() == s)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Panel code labelling a setting row and its note. There is no `E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteCode {
    /// Cracking
    A,
    /// Mold close slow
    B,
    /// Mold open slow
    C,
    /// Mold open stop 1
    D,
    /// A2A close
    F,
    /// A2A open
    G,
}

impl NoteCode {
    /// All codes in panel order.
    pub const ALL: [NoteCode; 6] = [
        NoteCode::A,
        NoteCode::B,
        NoteCode::C,
        NoteCode::D,
        NoteCode::F,
        NoteCode::G,
    ];

    /// The single-letter key used in recipes.
    pub fn as_str(self) -> &'static str {
        match self {
            NoteCode::A => "A",
            NoteCode::B => "B",
            NoteCode::C => "C",
            NoteCode::D => "D",
            NoteCode::F => "F",
            NoteCode::G => "G",
        }
    }

    /// The setting this code labels.
    pub fn setting(self) -> SettingKey {
        match self {
            NoteCode::A => SettingKey::Cracking,
            NoteCode::B => SettingKey::CloseSlow,
            NoteCode::C => SettingKey::OpenSlow,
            NoteCode::D => SettingKey::OpenStop1,
            NoteCode::F => SettingKey::A2aClose,
            NoteCode::G => SettingKey::A2aOpen,
        }
    }
}

impl FromStr for NoteCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| Error::UnknownNoteCode(s.to_string()))
    }
}

impl fmt::Display for NoteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric field addressable by name: the process value or a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `pv_mm`
    ProcessValue,
    /// One of the six settings
    Setting(SettingKey),
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == PV_FIELD {
            Ok(Field::ProcessValue)
        } else {
            s.parse().map(Field::Setting)
        }
    }
}

/// The six configurable machine parameters, in millimetres.
///
/// Serialized with the exact recipe keys; every key is required when parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsRecord {
    /// A. CRACKING
    pub cracking_mm: f64,
    /// B. MOLD CLOSE SLOW
    pub close_slow_mm: f64,
    /// C. MOLD OPEN SLOW
    pub open_slow_mm: f64,
    /// D. MOLD OPEN STOP 1
    pub open_stop1_mm: f64,
    /// F. A2A CLOSE
    pub a2a_close_mm: f64,
    /// G. A2A OPEN
    pub a2a_open_mm: f64,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            cracking_mm: constants::DEFAULT_CRACKING_MM,
            close_slow_mm: constants::DEFAULT_CLOSE_SLOW_MM,
            open_slow_mm: constants::DEFAULT_OPEN_SLOW_MM,
            open_stop1_mm: constants::DEFAULT_OPEN_STOP1_MM,
            a2a_close_mm: constants::DEFAULT_A2A_CLOSE_MM,
            a2a_open_mm: constants::DEFAULT_A2A_OPEN_MM,
        }
    }
}

impl SettingsRecord {
    /// Returns the value of one setting.
    pub fn get(&self, key: SettingKey) -> f64 {
        match key {
            SettingKey::Cracking => self.cracking_mm,
            SettingKey::CloseSlow => self.close_slow_mm,
            SettingKey::OpenSlow => self.open_slow_mm,
            SettingKey::OpenStop1 => self.open_stop1_mm,
            SettingKey::A2aClose => self.a2a_close_mm,
            SettingKey::A2aOpen => self.a2a_open_mm,
        }
    }

    /// Returns a mutable reference to one setting.
    pub fn get_mut(&mut self, key: SettingKey) -> &mut f64 {
        match key {
            SettingKey::Cracking => &mut self.cracking_mm,
            SettingKey::CloseSlow => &mut self.close_slow_mm,
            SettingKey::OpenSlow => &mut self.open_slow_mm,
            SettingKey::OpenStop1 => &mut self.open_stop1_mm,
            SettingKey::A2aClose => &mut self.a2a_close_mm,
            SettingKey::A2aOpen => &mut self.a2a_open_mm,
        }
    }

    /// Overwrites one setting without validation.
    pub fn set(&mut self, key: SettingKey, value: f64) {
        *self.get_mut(key) = value;
    }

    /// Iterates over `(key, value)` pairs in panel order.
    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, f64)> + '_ {
        SettingKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// Free-text notes keyed by panel code. Every code is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotesRecord {
    #[serde(rename = "A")]
    a: String,
    #[serde(rename = "B")]
    b: String,
    #[serde(rename = "C")]
    c: String,
    #[serde(rename = "D")]
    d: String,
    #[serde(rename = "F")]
    f: String,
    #[serde(rename = "G")]
    g: String,
}

impl NotesRecord {
    /// Returns the note for `code`.
    pub fn get(&self, code: NoteCode) -> &str {
        match code {
            NoteCode::A => &self.a,
            NoteCode::B => &self.b,
            NoteCode::C => &self.c,
            NoteCode::D => &self.d,
            NoteCode::F => &self.f,
            NoteCode::G => &self.g,
        }
    }

    /// Returns the note for `code` for in-place editing.
    pub fn get_mut(&mut self, code: NoteCode) -> &mut String {
        match code {
            NoteCode::A => &mut self.a,
            NoteCode::B => &mut self.b,
            NoteCode::C => &mut self.c,
            NoteCode::D => &mut self.d,
            NoteCode::F => &mut self.f,
            NoteCode::G => &mut self.g,
        }
    }

    /// Replaces the note for `code`.
    pub fn set(&mut self, code: NoteCode, text: impl Into<String>) {
        *self.get_mut(code) = text.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = SettingsRecord::default();
        let values: Vec<f64> = settings.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![8.0, 20.0, 15.0, 60.0, 2.0, 8.0]);
        for key in SettingKey::ALL {
            assert_eq!(settings.get(key), key.default_mm());
        }
    }

    #[test]
    fn test_settings_set_and_get() {
        let mut settings = SettingsRecord::default();
        settings.set(SettingKey::OpenStop1, 72.5);
        assert_eq!(settings.open_stop1_mm, 72.5);
        *settings.get_mut(SettingKey::A2aClose) += 1.0;
        assert_eq!(settings.get(SettingKey::A2aClose), 3.0);
    }

    #[test]
    fn test_setting_key_parse() {
        for key in SettingKey::ALL {
            assert_eq!(key.field_name().parse::<SettingKey>().unwrap(), key);
        }
        let err = "cracking".parse::<SettingKey>().unwrap_err();
        assert!(matches!(err, Error::UnknownField(name) if name == "cracking"));
    }

    #[test]
    fn test_field_parse() {
        assert_eq!("pv_mm".parse::<Field>().unwrap(), Field::ProcessValue);
        assert_eq!(
            "a2a_open_mm".parse::<Field>().unwrap(),
            Field::Setting(SettingKey::A2aOpen)
        );
        assert!(matches!("hydraulic_log".parse::<Field>(), Err(Error::UnknownField(_))));
    }

    #[test]
    fn test_note_code_parse_rejects_e() {
        assert_eq!("F".parse::<NoteCode>().unwrap(), NoteCode::F);
        assert!(matches!("E".parse::<NoteCode>(), Err(Error::UnknownNoteCode(code)) if code == "E"));
        assert!("a".parse::<NoteCode>().is_err());
    }

    #[test]
    fn test_codes_and_settings_pair_up() {
        for key in SettingKey::ALL {
            assert_eq!(key.code().setting(), key);
        }
        let codes: Vec<&str> = SettingKey::ALL.iter().map(|k| k.code().as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "C", "D", "F", "G"]);
    }

    #[test]
    fn test_settings_serialization_keys() {
        let json = serde_json::to_value(SettingsRecord::default()).unwrap();
        let object = json.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        let mut expected: Vec<&str> = SettingKey::ALL.iter().map(|k| k.field_name()).collect();
        expected.sort_unstable();
        let mut keys_sorted = keys.clone();
        keys_sorted.sort_unstable();
        assert_eq!(keys_sorted, expected);
    }

    #[test]
    fn test_settings_deserialization_requires_every_key() {
        let json = r#"{"cracking_mm": 8.0, "close_slow_mm": 20.0}"#;
        assert!(serde_json::from_str::<SettingsRecord>(json).is_err());
    }

    #[test]
    fn test_notes_serialization_uses_codes() {
        let mut notes = NotesRecord::default();
        notes.set(NoteCode::D, "stop early");
        let json = serde_json::to_value(&notes).unwrap();
        assert_eq!(json["D"], "stop early");
        assert_eq!(json["A"], "");
        assert_eq!(json.as_object().unwrap().len(), 6);
        assert!(json.get("E").is_none());
    }
}
