//! Recipe snapshots: the exportable JSON form of a session.
//!
//! A recipe captures the process value, the six settings and the saved notes
//! at one moment. It is built fresh on every export and never stored in the
//! session. The same document can be read back to restore a session.

use crate::constants;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::types::*;
use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

/// Snapshot of a session in recipe form.
///
/// Field order and names match the exported document exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    /// Process value at snapshot time
    pub pv_mm: f64,
    /// The six settings
    pub settings: SettingsRecord,
    /// Saved notes (not the unsaved editor text)
    pub notes: NotesRecord,
    /// Local time of the snapshot, whole seconds
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

impl Recipe {
    /// Snapshot of `session`, stamped with the local clock.
    pub fn snapshot(session: &Session) -> Self {
        Self::snapshot_at(session, Local::now().naive_local())
    }

    /// Snapshot of `session`, stamped with `now` truncated to the second.
    pub fn snapshot_at(session: &Session, now: NaiveDateTime) -> Self {
        Self {
            pv_mm: session.pv_mm(),
            settings: session.settings().clone(),
            notes: session.notes().clone(),
            timestamp: now.trunc_subsecs(0),
        }
    }

    /// The sample recipe offered before any edits, stamped with the local clock.
    pub fn sample() -> Self {
        Self::sample_at(Local::now().naive_local())
    }

    /// The sample recipe: factory settings, closed mould, two starter tips.
    pub fn sample_at(now: NaiveDateTime) -> Self {
        let mut notes = NotesRecord::default();
        notes.set(NoteCode::A, "Use 6–10 mm for small parts");
        notes.set(NoteCode::B, "Close slow to protect edges");
        Self {
            pv_mm: constants::DEFAULT_PV_MM,
            settings: SettingsRecord::default(),
            notes,
            timestamp: now.trunc_subsecs(0),
        }
    }

    /// Renders the recipe as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`Error::NonFiniteValue`] if any number is NaN or infinite. JSON has no
    /// spelling for those and the document would otherwise carry `null`.
    pub fn to_json(&self) -> Result<String> {
        self.check_finite()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a recipe document. Every key of the exported layout is required
    /// and no other key is accepted.
    pub fn from_json(json: &str) -> Result<Self> {
        let recipe: Recipe = serde_json::from_str(json)?;
        recipe.check_finite()?;
        Ok(recipe)
    }

    fn check_finite(&self) -> Result<()> {
        if !self.pv_mm.is_finite() {
            return Err(Error::NonFiniteValue { field: PV_FIELD });
        }
        match self.settings.iter().find(|(_, value)| !value.is_finite()) {
            Some((key, _)) => Err(Error::NonFiniteValue {
                field: key.field_name(),
            }),
            None => Ok(()),
        }
    }
}

mod timestamp_format {
    use crate::constants::RECIPE_TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(RECIPE_TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, RECIPE_TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::ControlPanel;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_round_trip_scenario() {
        let mut session = Session::new();
        session.mold_open_at(at(11, 0, 0));
        session.mold_open_at(at(11, 0, 1));
        session.set_note_buffer(NoteCode::A, "hello");
        session.save_notes();

        let json = Recipe::snapshot_at(&session, at(11, 0, 2)).to_json().unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(doc["pv_mm"], 10.0);
        assert_eq!(doc["notes"]["A"], "hello");
        assert_eq!(doc["settings"]["cracking_mm"], 8.0);
        assert_eq!(doc["settings"]["close_slow_mm"], 20.0);
        assert_eq!(doc["settings"]["open_slow_mm"], 15.0);
        assert_eq!(doc["settings"]["open_stop1_mm"], 60.0);
        assert_eq!(doc["settings"]["a2a_close_mm"], 2.0);
        assert_eq!(doc["settings"]["a2a_open_mm"], 8.0);
        assert_eq!(doc["timestamp"], "2026-10-18T11:00:02");
    }

    #[test]
    fn test_document_layout() {
        let json = Recipe::snapshot_at(&Session::new(), at(8, 0, 0)).to_json().unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = doc.as_object().unwrap();
        assert_eq!(object.len(), 4);
        for key in ["pv_mm", "settings", "notes", "timestamp"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(doc["notes"].as_object().unwrap().len(), 6);

        // Keys are written in the documented order.
        let pv = json.find("\"pv_mm\"").unwrap();
        let settings = json.find("\"settings\"").unwrap();
        let notes = json.find("\"notes\"").unwrap();
        let timestamp = json.find("\"timestamp\"").unwrap();
        assert!(pv < settings && settings < notes && notes < timestamp);
    }

    #[test]
    fn test_settings_keys_fixed_after_many_edits() {
        let mut session = Session::new();
        for i in 0..50 {
            let key = SettingKey::ALL[i % 6];
            session.set_setting(key, (i as f64) * 1.5);
        }
        let doc = serde_json::to_value(Recipe::snapshot_at(&session, at(8, 0, 0))).unwrap();
        let mut keys: Vec<String> = doc["settings"].as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "a2a_close_mm",
                "a2a_open_mm",
                "close_slow_mm",
                "cracking_mm",
                "open_slow_mm",
                "open_stop1_mm"
            ]
        );
    }

    #[test]
    fn test_snapshot_uses_saved_notes_not_buffers() {
        let mut session = Session::new();
        session.set_note_buffer(NoteCode::C, "unsaved");
        let recipe = Recipe::snapshot_at(&session, at(8, 0, 0));
        assert_eq!(recipe.notes.get(NoteCode::C), "");
    }

    #[test]
    fn test_snapshot_does_not_mutate_session() {
        let mut session = Session::new();
        session.mold_open_at(at(8, 0, 0));
        let before_log: Vec<String> = session.log().map(str::to_string).collect();
        let _ = Recipe::snapshot_at(&session, at(8, 0, 1)).to_json().unwrap();
        let after_log: Vec<String> = session.log().map(str::to_string).collect();
        assert_eq!(before_log, after_log);
        assert_eq!(session.pv_mm(), 5.0);
    }

    #[test]
    fn test_timestamp_drops_subseconds() {
        let now = at(8, 30, 15) + chrono::Duration::milliseconds(750);
        let recipe = Recipe::snapshot_at(&Session::new(), now);
        assert_eq!(recipe.timestamp, at(8, 30, 15));
        let json = recipe.to_json().unwrap();
        assert!(json.contains("\"timestamp\": \"2026-10-18T08:30:15\""));
    }

    #[test]
    fn test_sample_recipe() {
        let sample = Recipe::sample_at(at(9, 0, 0));
        assert_eq!(sample.pv_mm, 0.0);
        assert_eq!(sample.settings, SettingsRecord::default());
        assert_eq!(sample.notes.get(NoteCode::A), "Use 6–10 mm for small parts");
        assert_eq!(sample.notes.get(NoteCode::B), "Close slow to protect edges");
        assert_eq!(sample.notes.get(NoteCode::G), "");
    }

    #[test]
    fn test_sample_and_snapshot_share_layout() {
        let sample = serde_json::to_value(Recipe::sample_at(at(9, 0, 0))).unwrap();
        let current = serde_json::to_value(Recipe::snapshot_at(&Session::new(), at(9, 0, 0))).unwrap();
        let sample_keys: Vec<&String> = sample.as_object().unwrap().keys().collect();
        let current_keys: Vec<&String> = current.as_object().unwrap().keys().collect();
        assert_eq!(sample_keys, current_keys);
        assert_eq!(sample["settings"], current["settings"]);
    }

    #[test]
    fn test_non_finite_value_is_an_error() {
        let mut session = Session::new();
        session.set_setting(SettingKey::OpenSlow, f64::NAN);
        let err = Recipe::snapshot_at(&session, at(8, 0, 0)).to_json().unwrap_err();
        assert!(matches!(err, Error::NonFiniteValue { field: "open_slow_mm" }));

        let mut session = Session::new();
        session.set_pv_mm(f64::INFINITY);
        let err = Recipe::snapshot_at(&session, at(8, 0, 0)).to_json().unwrap_err();
        assert!(matches!(err, Error::NonFiniteValue { field: "pv_mm" }));
    }

    #[test]
    fn test_import_restores_equivalent_session() {
        let mut original = Session::new();
        original.mold_open_at(at(10, 0, 0));
        original.set_setting(SettingKey::A2aOpen, 12.5);
        original.set_note_buffer(NoteCode::F, "gap check");
        original.save_notes();
        let json = Recipe::snapshot_at(&original, at(10, 0, 1)).to_json().unwrap();

        let recipe = Recipe::from_json(&json).unwrap();
        let mut restored = Session::new();
        restored.apply_recipe(&recipe);

        assert_eq!(restored.pv_mm(), original.pv_mm());
        assert_eq!(restored.settings(), original.settings());
        assert_eq!(restored.notes(), original.notes());
        assert_eq!(restored.note_buffer(NoteCode::F), "gap check");
        assert_eq!(Recipe::snapshot_at(&restored, at(10, 0, 1)), recipe);
    }

    #[test]
    fn test_import_clamps_out_of_range_values() {
        let json = r#"{
            "pv_mm": 450.0,
            "settings": {
                "cracking_mm": -2.0, "close_slow_mm": 20.0, "open_slow_mm": 15.0,
                "open_stop1_mm": 60.0, "a2a_close_mm": 2.0, "a2a_open_mm": 8.0
            },
            "notes": {"A": "", "B": "", "C": "", "D": "", "F": "", "G": ""},
            "timestamp": "2026-10-18T10:00:00"
        }"#;
        let mut session = Session::new();
        session.apply_recipe(&Recipe::from_json(json).unwrap());
        assert_eq!(session.pv_mm(), 300.0);
        assert_eq!(session.setting(SettingKey::Cracking), 0.0);
    }

    #[test]
    fn test_import_requires_every_key() {
        let missing_note = r#"{
            "pv_mm": 0.0,
            "settings": {
                "cracking_mm": 8.0, "close_slow_mm": 20.0, "open_slow_mm": 15.0,
                "open_stop1_mm": 60.0, "a2a_close_mm": 2.0, "a2a_open_mm": 8.0
            },
            "notes": {"A": "", "B": "", "C": "", "D": "", "F": ""},
            "timestamp": "2026-10-18T10:00:00"
        }"#;
        assert!(matches!(Recipe::from_json(missing_note), Err(Error::Json(_))));

        let bad_timestamp = r#"{
            "pv_mm": 0.0,
            "settings": {
                "cracking_mm": 8.0, "close_slow_mm": 20.0, "open_slow_mm": 15.0,
                "open_stop1_mm": 60.0, "a2a_close_mm": 2.0, "a2a_open_mm": 8.0
            },
            "notes": {"A": "", "B": "", "C": "", "D": "", "F": "", "G": ""},
            "timestamp": "yesterday"
        }"#;
        assert!(Recipe::from_json(bad_timestamp).is_err());
    }

    #[test]
    fn test_import_rejects_unknown_keys() {
        let settings = r#"{"cracking_mm": 8.0, "close_slow_mm": 20.0, "open_slow_mm": 15.0,
            "open_stop1_mm": 60.0, "a2a_close_mm": 2.0, "a2a_open_mm": 8.0"#;
        let notes = r#""A": "", "B": "", "C": "", "D": "", "F": "", "G": """#;
        let document = |extra_top: &str, extra_setting: &str, extra_note: &str| {
            format!(
                r#"{{"pv_mm": 5.0, "settings": {settings}{extra_setting}}},
                "notes": {{{notes}{extra_note}}}, "timestamp": "2026-10-18T10:00:00"{extra_top}}}"#
            )
        };

        assert!(Recipe::from_json(&document("", "", "")).is_ok());
        for json in [
            document(r#", "bogus": 1"#, "", ""),
            document("", r#", "speed_mm": 99.0"#, ""),
            document("", "", r#", "E": "x""#),
        ] {
            assert!(matches!(Recipe::from_json(&json), Err(Error::Json(_))), "accepted {json}");
        }
    }

    #[test]
    fn test_import_rejects_partial_notes() {
        // Older sample files carried only the two starter tips.
        let json = r#"{
            "pv_mm": 0.0,
            "settings": {
                "cracking_mm": 8.0, "close_slow_mm": 20.0, "open_slow_mm": 15.0,
                "open_stop1_mm": 60.0, "a2a_close_mm": 2.0, "a2a_open_mm": 8.0
            },
            "notes": {"A": "Use 6–10 mm for small parts", "B": "Close slow to protect edges"},
            "timestamp": "2026-10-18T10:00:00"
        }"#;
        assert!(matches!(Recipe::from_json(json), Err(Error::Json(_))));
    }
}
