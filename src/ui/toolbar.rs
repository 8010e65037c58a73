use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{EguiContexts, egui};
use futures_lite::future;
use std::path::PathBuf;

use crate::config::{AppConfig, SetActorRequest};
use crate::session::{EditMode, EditSession, SessionOutput};
use crate::store::{CurrentImage, ImageSource, OpenImageRequest};
use crate::theme;
use crate::viewport::Viewport;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp", "gif"];

#[derive(Resource, Default)]
pub struct ToolbarState {
    pub url_input: String,
    pub actor_input: String,
    /// Native file picker running off the main thread
    pub pending_open: Option<Task<Option<PathBuf>>>,
}

impl ToolbarState {
    pub fn is_browsing(&self) -> bool {
        self.pending_open.is_some()
    }
}

pub fn sync_actor_field(config: Res<AppConfig>, mut state: ResMut<ToolbarState>) {
    state.actor_input = config.data.actor_id.clone();
}

fn toolbar_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).size(14.0).strong())
        .min_size(egui::vec2(0.0, 28.0))
}

/// Main toolbar: image source, zoom and the edit session controls
#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<ToolbarState>,
    mut session: ResMut<EditSession>,
    mut viewport: ResMut<Viewport>,
    current: Res<CurrentImage>,
    config: Res<AppConfig>,
    mut open_events: MessageWriter<OpenImageRequest>,
    mut actor_events: MessageWriter<SetActorRequest>,
    mut output: SessionOutput,
) -> Result {
    if let Some(ref mut task) = state.pending_open
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        state.pending_open = None;
        if let Some(path) = result {
            open_events.write(OpenImageRequest {
                source: path.to_string_lossy().to_string(),
            });
        }
    }

    let mut should_browse = false;
    let mut open_source: Option<String> = None;
    let busy = session.saving || current.loading;

    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                // Image source
                if ui
                    .add_enabled(!busy && !state.is_browsing(), toolbar_button("Open…"))
                    .on_hover_text("Open a thermal image from disk")
                    .clicked()
                {
                    should_browse = true;
                }

                ui.add_enabled_ui(!busy && !config.data.recent_images.is_empty(), |ui| {
                    ui.menu_button("Recent", |ui| {
                        for recent in &config.data.recent_images {
                            let label = ImageSource::parse(recent).display_name();
                            if ui.button(label).on_hover_text(recent).clicked() {
                                open_source = Some(recent.clone());
                                ui.close();
                            }
                        }
                    });
                });

                let url_response = ui.add(
                    egui::TextEdit::singleline(&mut state.url_input)
                        .hint_text("Image path or URL")
                        .desired_width(220.0),
                );
                let submitted = url_response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let can_load = !busy && !state.url_input.trim().is_empty();
                if ui.add_enabled(can_load, egui::Button::new("Load")).clicked()
                    || (submitted && can_load)
                {
                    open_source = Some(state.url_input.trim().to_string());
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                // Zoom
                if ui.add(toolbar_button("−")).on_hover_text("Zoom out (-)").clicked() {
                    viewport.zoom_out();
                }
                ui.label(
                    egui::RichText::new(format!("{:.0}%", viewport.scale * 100.0))
                        .color(theme::ui::LABEL_TEXT),
                );
                if ui.add(toolbar_button("+")).on_hover_text("Zoom in (+)").clicked() {
                    viewport.zoom_in();
                }
                if ui.add(toolbar_button("Reset")).on_hover_text("Reset view (0)").clicked() {
                    viewport.reset();
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                edit_controls(ui, &mut session, config.data.actor(), &mut output);

                // Right-aligned identity and save status
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let actor_response = ui.add(
                        egui::TextEdit::singleline(&mut state.actor_input)
                            .desired_width(110.0),
                    );
                    if actor_response.lost_focus() {
                        let actor_id = state.actor_input.trim().to_string();
                        if actor_id != config.data.actor_id {
                            actor_events.write(SetActorRequest { actor_id });
                        }
                    }
                    ui.label(egui::RichText::new("Inspector:").color(theme::ui::LABEL_TEXT));

                    if session.saving {
                        ui.add_space(8.0);
                        ui.spinner();
                        ui.label(egui::RichText::new("Saving...").color(theme::ui::HINT_TEXT));
                    }
                });
            });
        });

    if let Some(source) = open_source {
        open_events.write(OpenImageRequest { source });
    }

    if should_browse && state.pending_open.is_none() {
        let task_pool = AsyncComputeTaskPool::get();
        state.pending_open = Some(task_pool.spawn(async {
            rfd::AsyncFileDialog::new()
                .set_title("Open Thermal Image")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        }));
    }

    Ok(())
}

/// Edit / Save / Cancel / Draw New Box / Delete, enabled per mode.
fn edit_controls(
    ui: &mut egui::Ui,
    session: &mut EditSession,
    actor: &str,
    output: &mut SessionOutput,
) {
    match session.mode {
        EditMode::Viewing => {
            if ui
                .add_enabled(session.can_enter_edit(), toolbar_button("Edit"))
                .on_hover_text("Edit the detected boxes")
                .clicked()
            {
                session.enter_edit();
            }
        }
        EditMode::Editing | EditMode::DrawingNew | EditMode::ConfirmingNewBox => {
            let confirming = session.mode == EditMode::ConfirmingNewBox;

            if ui
                .add_enabled(!confirming, toolbar_button("Save"))
                .on_hover_text("Save changes (Ctrl+S)")
                .clicked()
                && let Some(annotations) = session.save(actor, chrono::Utc::now())
            {
                let highlight = session.highlighted;
                output.commit(annotations, highlight, highlight);
            }

            if ui
                .add_enabled(!confirming, toolbar_button("Cancel"))
                .on_hover_text("Discard unsaved changes (Esc)")
                .clicked()
            {
                session.cancel();
            }

            ui.add_space(8.0);

            let drawing = session.mode == EditMode::DrawingNew;
            let draw_button = toolbar_button("Draw New Box").selected(drawing);
            if ui.add_enabled(!confirming, draw_button).clicked() {
                if drawing {
                    session.stop_drawing();
                } else {
                    session.begin_draw_new();
                }
            }

            let can_delete = session.mode == EditMode::Editing && session.selected.is_some();
            if ui
                .add_enabled(can_delete, toolbar_button("Delete"))
                .on_hover_text("Delete the selected box (Del)")
                .clicked()
            {
                session.request_delete();
            }
        }
    }
}
