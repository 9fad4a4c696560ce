//! # EPP Trainer
//!
//! A training simulator for operators of Expanded Polypropylene (EPP) molding
//! machines. It shows a simplified MOLD SETTING control panel:
//! - **Settings**: six named positions in millimetres, edited directly
//! - **Process value**: the simulated mould position, jogged by MOLD OPEN / MOLD CLOSE
//! - **Notes**: a short tip per setting, saved on request
//! - **Recipes**: JSON snapshots of all of the above, downloaded or loaded back
//!
//! The core ([`Session`], [`ControlPanel`], [`Recipe`]) has no UI dependency;
//! the egui front end in `ui` only reads and writes through it.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
mod error;
mod panel;
mod recipe;
mod session;
mod types;
mod ui;

// Re-export public types and functions
pub use config::{clamp_mm, SimulatorConfig};
pub use error::{Error, Result};
pub use panel::*;
pub use recipe::Recipe;
pub use session::*;
pub use types::*;
pub use ui::{Page, Skin, TrainerApp};

/// Runs the trainer in a native window.
///
/// # Returns
///
/// Returns `Ok(())` when the window is closed, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), eframe::Error> {
///     epp_trainer::run_app()
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> std::result::Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "EPP Trainer • DABO Simulator",
        options,
        Box::new(|cc| Ok(Box::new(TrainerApp::new(cc)))),
    )
}

/// Starts the trainer on the `<canvas>` element with id `canvas_id`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn start_web(canvas_id: String) {
    use wasm_bindgen::JsCast;

    let _ = eframe::WebLogger::init(log::LevelFilter::Info);

    wasm_bindgen_futures::spawn_local(async move {
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(&canvas_id))
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok());
        let Some(canvas) = canvas else {
            log::error!("No canvas element with id `{canvas_id}`");
            return;
        };

        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(TrainerApp::new(cc)))),
            )
            .await;
        if let Err(err) = result {
            log::error!("Failed to start the trainer: {err:?}");
        }
    });
}
