//! User interface for the EPP trainer.
//!
//! The UI is a thin view over a [`Session`](crate::Session): every frame it
//! reads current values, draws them, and forwards clicks and edits to the
//! session's accessors and [`ControlPanel`] actions.
//!
//! # Module Organization
//!
//! - `state` - UI state structures and the main TrainerApp
//! - `file_ops` - Recipe download and upload for native and WASM
//! - `rendering` - The Mold Setting page in both skins

mod file_ops;
mod rendering;
mod state;


pub use state::{Page, Skin, TrainerApp};

use self::state::StatusMessage;
use crate::constants;
use crate::panel::{ActionOutcome, ControlPanel, PanelButton};
use eframe::egui;

const GLOSSARY: [(&str, &str); 5] = [
    ("PV (Process Value)", "What the machine has now (live reading)."),
    ("SV (Set Value)", "Your target number. What you want."),
    ("Cracking", "A small open of the mold to help steam/air and easy eject."),
    ("A2A", "Air-to-Air gap (open/close distance)."),
    ("Mold Open Stop 1", "First stop position when opening."),
];

const GOLDEN_RULES: [(&str, &str); 3] = [
    ("One change at a time.", ""),
    ("Small steps.", " Move by little numbers."),
    ("See – Think – Save.", " Look at the result, learn, save the recipe."),
];

impl eframe::App for TrainerApp {
    /// Persist UI preferences between restarts. The session is not stored.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => {
                storage.set_string(constants::APP_STATE_KEY, json);
            }
            Err(err) => {
                log::error!("Failed to serialize app state: {err}");
            }
        }
    }

    /// Main update function called by egui for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_pending_operations(ctx);
        self.draw_frame(ctx);
    }
}

impl TrainerApp {
    /// Lays out navigation, status bar and the current page.
    pub(crate) fn draw_frame(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("navigation")
            .resizable(false)
            .default_width(170.0)
            .show(ctx, |ui| {
                self.draw_navigation(ui);
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.draw_status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.page {
                    Page::Home => self.draw_home(ui),
                    Page::MoldSetting => self.draw_mold_setting(ui),
                    Page::Glossary => self.draw_glossary(ui),
                });
        });
    }

    /// Dispatches a hydraulic panel button to the session.
    pub(crate) fn press_button(&mut self, button: PanelButton) -> ActionOutcome {
        self.session.press(button)
    }

    /// Copies the note editors into the saved notes.
    pub(crate) fn save_notes(&mut self) {
        self.session.save_notes();
        self.set_status_info("Notes saved");
    }

    fn draw_navigation(&mut self, ui: &mut egui::Ui) {
        ui.heading("EPP Trainer");
        ui.label("DABO Simulator");
        ui.separator();
        ui.label("Go to");
        for page in Page::ALL {
            ui.selectable_value(&mut self.page, page, page.title());
        }

        ui.separator();
        ui.label("Panel style");
        ui.radio_value(&mut self.skin, Skin::Trainer, "Trainer");
        ui.radio_value(&mut self.skin, Skin::DaboClone, "DABO screen");

        ui.separator();
        ui.checkbox(&mut self.dark_mode, "Dark mode");
    }

    fn draw_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!("PV {:.1} mm", self.session.pv_mm()));
            ui.separator();
            match &self.file.status {
                Some(StatusMessage::Info(text)) => {
                    ui.label(text);
                }
                Some(StatusMessage::Error(text)) => {
                    let color = ui.visuals().error_fg_color;
                    ui.colored_label(color, text);
                }
                None => {
                    ui.weak("Ready");
                }
            }
        });
    }

    pub(crate) fn draw_home(&mut self, ui: &mut egui::Ui) {
        ui.heading(egui::RichText::new("Welcome • EPP Trainer").strong().size(28.0));
        ui.add_space(6.0);
        ui.label(
            "Goal: Train people in any plant that uses Expanded Polypropylene (EPP) machines.",
        );
        ui.label("Click a big button. Change one number. See what happens.");
        ui.add_space(10.0);

        ui.columns(3, |columns| {
            let size = [columns[0].available_width(), 36.0];
            if columns[0].add_sized(size, egui::Button::new("➡ Mold Setting")).clicked() {
                self.page = Page::MoldSetting;
            }
            if columns[1].add_sized(size, egui::Button::new("ℹ Glossary")).clicked() {
                self.page = Page::Glossary;
            }
            if columns[2]
                .add_sized(size, egui::Button::new("Download Sample Recipe"))
                .clicked()
            {
                self.download_sample_recipe();
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.heading("Three golden rules (super simple)");
        for (i, (rule, detail)) in GOLDEN_RULES.iter().enumerate() {
            ui.horizontal_wrapped(|ui| {
                ui.label(format!("{})", i + 1));
                ui.label(egui::RichText::new(*rule).strong());
                if !detail.is_empty() {
                    ui.label(*detail);
                }
            });
        }
    }

    pub(crate) fn draw_glossary(&mut self, ui: &mut egui::Ui) {
        ui.heading("Glossary (Very Simple)");
        ui.add_space(6.0);
        for (term, meaning) in GLOSSARY {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(term).strong());
                ui.label("—");
                ui.label(meaning);
            });
        }
    }
}
