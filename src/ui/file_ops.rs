//! Recipe downloads and uploads.
//!
//! This module hands exported recipe JSON to the user and reads recipes back,
//! using native file dialogs on desktop and browser downloads / file pickers
//! on WASM.

use super::state::{FileOperationResult, PendingLoadOperation, PendingSaveOperation, TrainerApp};
use crate::error::Result;
use crate::recipe::Recipe;
use eframe::egui;
use futures::channel::oneshot;
use std::cell::RefCell;
use std::rc::Rc;

/// Reply slot shared by the browser file picker's event handlers.
///
/// Whichever of `change` or `cancel` fires first settles the picker; later
/// events are ignored.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) struct PickerReply<T> {
    sender: Rc<RefCell<Option<oneshot::Sender<Option<T>>>>>,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl<T> PickerReply<T> {
    pub(crate) fn new() -> (Self, oneshot::Receiver<Option<T>>) {
        let (sender, receiver) = oneshot::channel();
        let reply = Self {
            sender: Rc::new(RefCell::new(Some(sender))),
        };
        (reply, receiver)
    }

    /// Sends `value` unless the picker was already settled.
    pub(crate) fn settle(&self, value: Option<T>) {
        if let Some(sender) = self.sender.borrow_mut().take() {
            let _ = sender.send(value);
        }
    }
}

impl<T> Clone for PickerReply<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Rc::clone(&self.sender),
        }
    }
}

impl TrainerApp {
    /// Handles pending file operations for both native and WASM platforms.
    ///
    /// Processes results of completed async operations, then starts any newly
    /// requested download or upload.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for requesting repaints
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        self.drain_file_results();

        // Handle pending save operations
        if let Some(save_op) = self.file.pending_save_operation.take() {
            let (file_name, json) = match self.recipe_payload(save_op) {
                Ok(payload) => payload,
                Err(err) => {
                    log::error!("Recipe export failed: {err}");
                    self.set_status_error(format!("Recipe export failed: {err}"));
                    return;
                }
            };
            let ctx = ctx.clone();
            let sender = self.file.file_operation_sender.clone();

            #[cfg(target_arch = "wasm32")]
            {
                // Use synchronous download for Firefox compatibility
                let result = match Self::trigger_download(file_name, &json) {
                    Ok(()) => FileOperationResult::SaveCompleted(file_name.to_string()),
                    Err(e) => FileOperationResult::OperationFailed(e),
                };
                if let Some(tx) = sender {
                    let _ = tx.send(result);
                }
                ctx.request_repaint();
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                tokio::spawn(async move {
                    if let Some(handle) = rfd::AsyncFileDialog::new()
                        .add_filter("JSON", &["json"])
                        .set_file_name(file_name)
                        .save_file()
                        .await
                    {
                        let path = handle.path();
                        let result = match std::fs::write(path, json) {
                            Ok(()) => FileOperationResult::SaveCompleted(path.display().to_string()),
                            Err(e) => FileOperationResult::OperationFailed(format!(
                                "Failed to save recipe: {}",
                                e
                            )),
                        };
                        if let Some(tx) = sender {
                            let _ = tx.send(result);
                        }
                    }
                    ctx.request_repaint();
                });
            }
        }

        // Handle pending load operations
        if let Some(PendingLoadOperation::Recipe) = self.file.pending_load_operation.take() {
            let ctx = ctx.clone();
            let sender = self.file.file_operation_sender.clone();

            #[cfg(target_arch = "wasm32")]
            {
                wasm_bindgen_futures::spawn_local(async move {
                    match Self::show_open_file_picker().await {
                        Some(file) => {
                            let filename = file.name();
                            let result = match Self::read_file(file).await {
                                Ok(content) => FileOperationResult::LoadCompleted(filename, content),
                                Err(e) => FileOperationResult::OperationFailed(e),
                            };
                            if let Some(tx) = sender {
                                let _ = tx.send(result);
                            }
                        }
                        None => {
                            log::debug!("Open dialog cancelled or API not supported");
                        }
                    }
                    ctx.request_repaint();
                });
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                tokio::spawn(async move {
                    if let Some(handle) = rfd::AsyncFileDialog::new()
                        .add_filter("JSON", &["json"])
                        .pick_file()
                        .await
                    {
                        let path = handle.path();
                        let result = match std::fs::read_to_string(path) {
                            Ok(json) => {
                                FileOperationResult::LoadCompleted(path.display().to_string(), json)
                            }
                            Err(e) => FileOperationResult::OperationFailed(format!(
                                "Failed to read recipe: {}",
                                e
                            )),
                        };
                        if let Some(tx) = sender {
                            let _ = tx.send(result);
                        }
                    }
                    ctx.request_repaint();
                });
            }
        }
    }

    /// Applies every result the async file operations have reported so far.
    pub(crate) fn drain_file_results(&mut self) {
        let results: Vec<FileOperationResult> = match &self.file.file_operation_receiver {
            Some(receiver) => receiver.try_iter().collect(),
            None => return,
        };
        for result in results {
            self.apply_file_result(result);
        }
    }

    fn apply_file_result(&mut self, result: FileOperationResult) {
        match result {
            FileOperationResult::SaveCompleted(path) => {
                log::info!("session {}: recipe saved to {path}", self.session.id());
                self.set_status_info(format!("Recipe saved: {path}"));
            }
            FileOperationResult::LoadCompleted(path, content) => match Recipe::from_json(&content) {
                Ok(recipe) => {
                    self.session.apply_recipe(&recipe);
                    self.set_status_info(format!("Recipe loaded: {path}"));
                }
                Err(err) => {
                    log::error!("Failed to parse recipe {path}: {err}");
                    self.set_status_error(format!("Not a valid recipe: {err}"));
                }
            },
            FileOperationResult::OperationFailed(error) => {
                log::error!("File operation failed: {error}");
                self.set_status_error(error);
            }
        }
    }

    /// Builds the file name and JSON text for a download.
    ///
    /// Fails instead of producing a malformed document.
    pub fn recipe_payload(&self, op: PendingSaveOperation) -> Result<(&'static str, String)> {
        let recipe = match op {
            PendingSaveOperation::SampleRecipe => Recipe::sample(),
            PendingSaveOperation::CurrentRecipe => Recipe::snapshot(&self.session),
        };
        let json = recipe.to_json()?;
        log::info!("session {}: exporting {}", self.session.id(), op.file_name());
        Ok((op.file_name(), json))
    }

    /// Triggers a file download in the browser (WASM only, Firefox-compatible).
    ///
    /// Creates a temporary anchor element with a blob URL and triggers a download.
    #[cfg(target_arch = "wasm32")]
    fn trigger_download(filename: &str, content: &str) -> std::result::Result<(), String> {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("No window found")?;
        let document = window.document().ok_or("No document found")?;

        let blob_parts = js_sys::Array::new();
        blob_parts.push(&wasm_bindgen::JsValue::from_str(content));

        let blob_options = web_sys::BlobPropertyBag::new();
        blob_options.set_type("application/json");

        let blob = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &blob_options)
            .map_err(|_| "Failed to create blob")?;

        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Failed to create object URL")?;

        let anchor = document
            .create_element("a")
            .map_err(|_| "Failed to create anchor element")?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Failed to cast to anchor element")?;

        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        let body = document.body().ok_or("No body found")?;
        body.append_child(&anchor)
            .map_err(|_| "Failed to append anchor")?;
        anchor.click();
        body.remove_child(&anchor)
            .map_err(|_| "Failed to remove anchor")?;

        web_sys::Url::revoke_object_url(&url).map_err(|_| "Failed to revoke object URL")?;

        Ok(())
    }

    /// Opens a file picker in the browser (WASM only) and waits for a choice.
    #[cfg(target_arch = "wasm32")]
    async fn show_open_file_picker() -> Option<web_sys::File> {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let window = web_sys::window()?;
        let document = window.document()?;

        let input = document
            .create_element("input")
            .ok()?
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()?;

        input.set_type("file");
        input.set_accept(".json,application/json");
        input.style().set_property("display", "none").ok()?;

        let (reply, receiver) = PickerReply::<web_sys::File>::new();

        let change_reply = reply.clone();
        let onchange = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let file = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            change_reply.settle(file);
        }) as Box<dyn FnMut(_)>);

        let oncancel = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            reply.settle(None);
        }) as Box<dyn FnMut(_)>);

        input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        input
            .add_event_listener_with_callback("cancel", oncancel.as_ref().unchecked_ref())
            .ok()?;

        let body = document.body()?;
        body.append_child(&input).ok()?;
        input.click();
        // The open dialog keeps the element alive; it must not linger in the page.
        let _ = body.remove_child(&input);

        let file = receiver.await.ok().flatten();
        drop(onchange);
        drop(oncancel);
        file
    }

    /// Reads a browser `File` as text (WASM only).
    #[cfg(target_arch = "wasm32")]
    async fn read_file(file: web_sys::File) -> std::result::Result<String, String> {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;
        use wasm_bindgen::JsValue;

        let file_reader =
            web_sys::FileReader::new().map_err(|_| "Failed to create FileReader".to_string())?;

        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            let reader = file_reader.clone();

            let onload = Closure::wrap(Box::new(move |_event: web_sys::ProgressEvent| {
                if let Ok(result) = reader.result() {
                    let _ = resolve.call1(&JsValue::NULL, &result);
                }
            }) as Box<dyn FnMut(_)>);
            file_reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let onerror = Closure::wrap(Box::new(move |_event: web_sys::ProgressEvent| {
                let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("Failed to read file"));
            }) as Box<dyn FnMut(_)>);
            file_reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        });

        file_reader
            .read_as_text(&file)
            .map_err(|_| "Failed to start reading file".to_string())?;

        let result = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| format!("Failed to read file: {:?}", e))?;

        result
            .as_string()
            .ok_or_else(|| "File content is not a string".to_string())
    }

    /// Offers the sample recipe for download.
    pub fn download_sample_recipe(&mut self) {
        self.file.pending_save_operation = Some(PendingSaveOperation::SampleRecipe);
    }

    /// Offers a snapshot of the current session for download.
    pub fn download_current_recipe(&mut self) {
        self.file.pending_save_operation = Some(PendingSaveOperation::CurrentRecipe);
    }

    /// Asks the user for a recipe file to load into the session.
    pub fn load_recipe(&mut self) {
        self.file.pending_load_operation = Some(PendingLoadOperation::Recipe);
    }
}
