//! Hydraulic control panel actions.
//!
//! MOLD CLOSE and MOLD OPEN jog the process value by a fixed step and record
//! the press in the action log. The remaining six buttons on the panel are not
//! wired to anything on the training machine and are kept as no-ops.

use crate::session::Session;
use crate::types::NoteCode;
use chrono::{Local, NaiveDateTime};

/// Every button on the HYDRAULIC panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelButton {
    /// Moves the mould toward closed
    MoldClose,
    /// Moves the mould toward open
    MoldOpen,
    /// HIGH
    High,
    /// PRESSURE RELEASE
    PressureRelease,
    /// CLAMP CYL' FOR'
    ClampCylinderForward,
    /// CLAMP CYL' REV'
    ClampCylinderReverse,
    /// CLAMP SLIDE REV' (left)
    ClampSlideReverseLeft,
    /// CLAMP SLIDE REV' (right)
    ClampSlideReverseRight,
}

impl PanelButton {
    /// All buttons in panel order, left to right and top to bottom.
    pub const ALL: [PanelButton; 8] = [
        PanelButton::MoldClose,
        PanelButton::MoldOpen,
        PanelButton::High,
        PanelButton::PressureRelease,
        PanelButton::ClampCylinderForward,
        PanelButton::ClampCylinderReverse,
        PanelButton::ClampSlideReverseLeft,
        PanelButton::ClampSlideReverseRight,
    ];

    /// Text printed on the button.
    pub fn label(self) -> &'static str {
        match self {
            PanelButton::MoldClose => "MOLD CLOSE",
            PanelButton::MoldOpen => "MOLD OPEN",
            PanelButton::High => "HIGH",
            PanelButton::PressureRelease => "PRESSURE RELEASE",
            PanelButton::ClampCylinderForward => "CLAMP CYL' FOR'",
            PanelButton::ClampCylinderReverse => "CLAMP CYL' REV'",
            PanelButton::ClampSlideReverseLeft | PanelButton::ClampSlideReverseRight => {
                "CLAMP SLIDE REV'"
            }
        }
    }

    /// Stable widget id; the two slide buttons share a label but not an id.
    pub fn id(self) -> &'static str {
        match self {
            PanelButton::MoldClose => "btn_close",
            PanelButton::MoldOpen => "btn_open",
            PanelButton::High => "btn_high",
            PanelButton::PressureRelease => "btn_pr",
            PanelButton::ClampCylinderForward => "btn_cyl_for",
            PanelButton::ClampCylinderReverse => "btn_cyl_rev",
            PanelButton::ClampSlideReverseLeft => "btn_slide_rev_left",
            PanelButton::ClampSlideReverseRight => "btn_slide_rev_right",
        }
    }

    /// Whether pressing this button changes nothing.
    pub fn is_inert(self) -> bool {
        !matches!(self, PanelButton::MoldClose | PanelButton::MoldOpen)
    }
}

/// What a button press did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    /// The process value was jogged (it may have stayed put at a limit).
    Moved {
        /// Process value before the press
        from: f64,
        /// Process value after the press
        to: f64,
    },
    /// The button has no behaviour.
    Inert(PanelButton),
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Control panel actions over a session.
///
/// Each action has an `_at` form taking the wall-clock time to stamp in the
/// log; the plain form uses the local clock.
pub trait ControlPanel {
    /// MOLD CLOSE: jog the process value down by one step, then clamp.
    fn mold_close_at(&mut self, now: NaiveDateTime) -> ActionOutcome;

    /// MOLD OPEN: jog the process value up by one step, then clamp.
    fn mold_open_at(&mut self, now: NaiveDateTime) -> ActionOutcome;

    /// SAVE NOTES: copy every note editor's text into the saved notes.
    fn save_notes(&mut self);

    /// Dispatches any panel button.
    fn press_at(&mut self, button: PanelButton, now: NaiveDateTime) -> ActionOutcome;

    /// MOLD CLOSE stamped with the local clock.
    fn mold_close(&mut self) -> ActionOutcome {
        self.mold_close_at(now())
    }

    /// MOLD OPEN stamped with the local clock.
    fn mold_open(&mut self) -> ActionOutcome {
        self.mold_open_at(now())
    }

    /// Dispatches any panel button, stamped with the local clock.
    fn press(&mut self, button: PanelButton) -> ActionOutcome {
        self.press_at(button, now())
    }
}

impl Session {
    fn jog_at(&mut self, delta: f64, message: &str, now: NaiveDateTime) -> ActionOutcome {
        let from = self.pv_mm();
        let to = self.config().clamp(from + delta);
        self.set_pv_mm(to);
        self.push_log(now, message);
        log::info!("session {}: {} {:.1} -> {:.1} mm", self.id(), message, from, to);
        ActionOutcome::Moved { from, to }
    }
}

impl ControlPanel for Session {
    fn mold_close_at(&mut self, now: NaiveDateTime) -> ActionOutcome {
        let step = self.config().jog_step_mm;
        self.jog_at(-step, "Mold Close", now)
    }

    fn mold_open_at(&mut self, now: NaiveDateTime) -> ActionOutcome {
        let step = self.config().jog_step_mm;
        self.jog_at(step, "Mold Open", now)
    }

    fn save_notes(&mut self) {
        let buffers = self.note_buffers().clone();
        for code in NoteCode::ALL {
            self.notes_mut().set(code, buffers.get(code));
        }
        log::info!("session {}: notes saved", self.id());
    }

    fn press_at(&mut self, button: PanelButton, now: NaiveDateTime) -> ActionOutcome {
        match button {
            PanelButton::MoldClose => self.mold_close_at(now),
            PanelButton::MoldOpen => self.mold_open_at(now),
            inert => {
                log::debug!("session {}: {} has no action", self.id(), inert.label());
                ActionOutcome::Inert(inert)
            }
        }
    }
}
