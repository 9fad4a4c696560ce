//! Mold Setting page rendering.
//!
//! Two skins draw the same session: a trainer layout with tips, note editors
//! and the action log, and a look-alike of the machine's MOLD SETTING screen.

use super::state::{Skin, TrainerApp};
use crate::config::clamp_mm;
use crate::constants;
use crate::panel::PanelButton;
use crate::types::{NoteCode, SettingKey};
use eframe::egui;

// DABO screen palette
const PANEL_BG: egui::Color32 = egui::Color32::from_rgb(0x0E, 0x35, 0x3B);
const PANEL_BORDER: egui::Color32 = egui::Color32::from_rgb(0x1F, 0x5B, 0x66);
const ACCENT_YELLOW: egui::Color32 = egui::Color32::from_rgb(0xF3, 0xC8, 0x3E);
const ACCENT_RED: egui::Color32 = egui::Color32::from_rgb(0xE6, 0x4E, 0x43);
const TEXT_WHITE: egui::Color32 = egui::Color32::from_rgb(0xEA, 0xF7, 0xFA);
const PV_BG: egui::Color32 = egui::Color32::from_rgb(0x0A, 0x20, 0x25);

const BUTTON_HEIGHT: f32 = 34.0;

/// Formats the process value the way each skin shows it.
pub(crate) fn pv_text(pv_mm: f64, skin: Skin) -> String {
    match skin {
        Skin::Trainer => format!("{pv_mm:.1} mm"),
        Skin::DaboClone => format!("{pv_mm:.2}"),
    }
}

/// Row label such as `"A. CRACKING"`.
pub(crate) fn row_label(key: SettingKey) -> String {
    format!("{}. {}", key.code(), key.label())
}

/// Draws the hydraulic buttons `per_row` to a row and returns the one clicked.
fn hydraulic_buttons(ui: &mut egui::Ui, per_row: usize) -> Option<PanelButton> {
    let mut pressed = None;
    for row in PanelButton::ALL.chunks(per_row) {
        ui.columns(per_row, |columns| {
            for (column, button) in columns.iter_mut().zip(row) {
                let width = column.available_width();
                let clicked = column
                    .push_id(button.id(), |ui| {
                        ui.add_sized(
                            [width, BUTTON_HEIGHT],
                            egui::Button::new(egui::RichText::new(button.label()).strong()),
                        )
                    })
                    .inner
                    .clicked();
                if clicked {
                    pressed = Some(*button);
                }
            }
        });
    }
    pressed
}

impl TrainerApp {
    /// Draws the Mold Setting page in the selected skin.
    pub(crate) fn draw_mold_setting(&mut self, ui: &mut egui::Ui) {
        match self.skin {
            Skin::Trainer => self.draw_trainer_skin(ui),
            Skin::DaboClone => self.draw_dabo_skin(ui),
        }
    }

    /// Numeric editor for one setting, clamped and stepped at the input.
    fn draw_setting_editor(&mut self, ui: &mut egui::Ui, key: SettingKey) {
        let config = self.session.config().clone();
        let mut value = self.session.setting(key);
        let mut changed = false;

        ui.push_id(key.field_name(), |ui| {
            ui.horizontal(|ui| {
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut value)
                            .range(config.min_mm..=config.max_mm)
                            .speed(config.input_step_mm)
                            .fixed_decimals(constants::INPUT_DECIMALS),
                    )
                    .changed();
                if ui.small_button("−").clicked() {
                    value -= config.input_step_mm;
                    changed = true;
                }
                if ui.small_button("+").clicked() {
                    value += config.input_step_mm;
                    changed = true;
                }
            });
        });

        if changed {
            self.session.set_setting(key, clamp_mm(&config, value));
        }
    }

    fn draw_note_editor(&mut self, ui: &mut egui::Ui, code: NoteCode) {
        ui.add(
            egui::TextEdit::multiline(self.session.note_buffer_mut(code))
                .id_salt(("note", code.as_str()))
                .desired_rows(2)
                .desired_width(f32::INFINITY)
                .hint_text("Write a short tip…"),
        );
    }

    fn draw_action_log(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_salt("action_log")
            .max_height(240.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for entry in self.session.recent_log() {
                    ui.monospace(entry);
                }
            });
    }

    fn draw_trainer_skin(&mut self, ui: &mut egui::Ui) {
        ui.heading("Mold Setting");

        egui::CollapsingHeader::new("Kid tip 👶: What is PV?").show(ui, |ui| {
            ui.label("PV means Process Value. It is what the machine feels now. PV is live.");
        });

        ui.vertical_centered(|ui| {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("PV:").strong().size(20.0));
                    ui.label(
                        egui::RichText::new(pv_text(self.session.pv_mm(), Skin::Trainer))
                            .strong()
                            .size(28.0),
                    );
                });
            });
        });

        ui.separator();

        ui.columns(2, |columns| {
            let (left, right) = columns.split_at_mut(1);
            let left = &mut left[0];
            let right = &mut right[0];

            left.heading("Process Name & Setting (mm)");
            for key in SettingKey::ALL {
                left.horizontal(|ui| {
                    ui.label(egui::RichText::new(row_label(key)).strong());
                    self.draw_setting_editor(ui, key);
                });
                self.draw_note_editor(left, key.code());
                left.add_space(4.0);
            }
            left.horizontal(|ui| {
                if ui.button("Save Notes").clicked() {
                    self.save_notes();
                }
                if ui.button("Download Recipe (JSON)").clicked() {
                    self.download_current_recipe();
                }
                if ui.button("Load Recipe").clicked() {
                    self.load_recipe();
                }
            });

            right.heading("Hydraulic");
            if let Some(button) = hydraulic_buttons(right, 1) {
                self.press_button(button);
            }
            right.add_space(8.0);
            right.label(egui::RichText::new("Action Log").small());
            self.draw_action_log(right);
        });

        ui.separator();
        ui.label("Try: change CRACKING a little. Press MOLD OPEN. Watch PV move. Save recipe.");
    }

    fn draw_dabo_skin(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for title in ["MENU", "OPERATION"] {
                // Decorative: the simulator has no separate menu screens.
                ui.add(egui::Button::new(egui::RichText::new(title).strong().color(egui::Color32::WHITE)).fill(ACCENT_RED));
            }
            egui::Frame::group(ui.style())
                .fill(PANEL_BG)
                .stroke(egui::Stroke::new(1.0, PANEL_BORDER))
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new("MOLD SETTING").strong().size(28.0).color(ACCENT_YELLOW));
                    });
                });
        });

        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("PV").strong().size(20.0).color(ACCENT_YELLOW));
                egui::Frame::group(ui.style()).fill(PV_BG).show(ui, |ui| {
                    ui.set_min_width(180.0);
                    ui.label(
                        egui::RichText::new(pv_text(self.session.pv_mm(), Skin::DaboClone))
                            .strong()
                            .size(22.0)
                            .color(egui::Color32::WHITE),
                    );
                });
                ui.label(egui::RichText::new("mm").strong().color(ACCENT_YELLOW));
            });
        });

        ui.separator();

        ui.columns(2, |columns| {
            let (left, right) = columns.split_at_mut(1);
            let left = &mut left[0];
            let right = &mut right[0];

            egui::Frame::group(left.style())
                .fill(PANEL_BG)
                .stroke(egui::Stroke::new(1.0, PANEL_BORDER))
                .show(left, |ui| {
                    egui::Grid::new("dabo_settings")
                        .num_columns(3)
                        .spacing([12.0, 8.0])
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new("PROCESS NAME").strong().color(ACCENT_YELLOW));
                            ui.label(egui::RichText::new("SETTING").strong().color(ACCENT_YELLOW));
                            ui.label("");
                            ui.end_row();

                            for key in SettingKey::ALL {
                                ui.label(egui::RichText::new(row_label(key)).strong().color(TEXT_WHITE));
                                self.draw_setting_editor(ui, key);
                                let code = key.code();
                                let selected = self.open_note == Some(code);
                                let note_button = egui::Button::new(egui::RichText::new("NOTE").strong().color(egui::Color32::BLACK))
                                    .fill(ACCENT_YELLOW)
                                    .selected(selected);
                                if ui.push_id(code.as_str(), |ui| ui.add(note_button)).inner.clicked() {
                                    self.open_note = if selected { None } else { Some(code) };
                                }
                                ui.end_row();
                            }
                        });

                    if let Some(code) = self.open_note {
                        ui.separator();
                        ui.label(egui::RichText::new(format!("Note {code}")).strong().color(ACCENT_YELLOW));
                        self.draw_note_editor(ui, code);
                        if ui.button("Save Notes").clicked() {
                            self.save_notes();
                        }
                    }
                });

            egui::Frame::group(right.style())
                .fill(PANEL_BG)
                .stroke(egui::Stroke::new(1.0, PANEL_BORDER))
                .show(right, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new("HYDRAULIC").strong().background_color(ACCENT_YELLOW).color(egui::Color32::BLACK));
                    });
                    if let Some(button) = hydraulic_buttons(ui, 2) {
                        self.press_button(button);
                    }
                });
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Download Recipe (JSON)").clicked() {
                self.download_current_recipe();
            }
            if ui.button("Load Recipe").clicked() {
                self.load_recipe();
            }
        });
        ui.small("Pixel-style clone of the DABO 'Mold Setting' screen.");
    }
}
