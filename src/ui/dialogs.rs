//! Modal windows: the new-box label form, delete confirmation and error notices.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::annotation::{AnomalyClass, class_color};
use crate::config::{AppConfig, ConfigResetNotification};
use crate::session::{EditSession, SessionOutput};
use crate::store::StoreErrorDialog;
use crate::theme;

/// Label form for a just-drawn box
pub fn new_box_dialog_ui(
    mut contexts: EguiContexts,
    mut session: ResMut<EditSession>,
    config: Res<AppConfig>,
    mut output: SessionOutput,
) -> Result {
    let Some(draft) = session.draft.as_mut() else {
        return Ok(());
    };

    let mut should_confirm = false;
    let mut should_cancel = false;
    let size = draft.bounds.size();

    egui::Window::new("New Annotation")
        .collapsible(false)
        .resizable(false)
        .min_width(320.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(
                egui::RichText::new(format!("Box: {:.0} × {:.0} px", size.x, size.y))
                    .color(theme::ui::HINT_TEXT),
            );
            ui.add_space(8.0);

            egui::Grid::new("new_box_form")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Class:");
                    egui::ComboBox::from_id_salt("new_box_class")
                        .selected_text(
                            egui::RichText::new(&draft.class_label)
                                .color(class_color(&draft.class_label)),
                        )
                        .width(180.0)
                        .show_ui(ui, |ui| {
                            for class in AnomalyClass::known() {
                                let label = class.label();
                                let is_selected = draft.class_label == label;
                                if ui
                                    .selectable_label(
                                        is_selected,
                                        egui::RichText::new(label).color(class.color()),
                                    )
                                    .clicked()
                                {
                                    draft.class_label = label.to_string();
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Confidence:");
                    ui.add(
                        egui::TextEdit::singleline(&mut draft.confidence_input)
                            .hint_text("0.0 - 1.0")
                            .desired_width(80.0),
                    );
                    ui.end_row();

                    ui.label("Comments:");
                    ui.add(
                        egui::TextEdit::multiline(&mut draft.comments)
                            .desired_rows(3)
                            .desired_width(220.0),
                    );
                    ui.end_row();
                });

            if let Some(error) = &draft.error {
                ui.add_space(4.0);
                ui.colored_label(theme::ui::ERROR_TEXT, error);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Add Box").clicked() {
                    should_confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    should_cancel = true;
                }
            });
        });

    if should_confirm {
        let highlight = session.highlighted;
        match session.confirm_new_box(config.data.actor(), chrono::Utc::now()) {
            Ok(annotations) => output.commit(annotations, highlight, session.highlighted),
            Err(e) => warn!("New box rejected: {}", e),
        }
    } else if should_cancel {
        session.cancel_new_box();
    }

    Ok(())
}

pub fn delete_confirmation_ui(
    mut contexts: EguiContexts,
    mut session: ResMut<EditSession>,
    mut output: SessionOutput,
) -> Result {
    let Some(index) = session.pending_delete else {
        return Ok(());
    };
    let Some(annotation) = session.working.get(index) else {
        session.cancel_delete();
        return Ok(());
    };
    let label = annotation.label_text();

    let mut should_delete = false;
    let mut should_cancel = false;

    egui::Window::new("Delete Annotation")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Delete this annotation? This is saved immediately.");
            ui.add_space(5.0);
            ui.label(egui::RichText::new(label).strong());
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() {
                    should_delete = true;
                }
                if ui.button("Cancel").clicked() {
                    should_cancel = true;
                }
            });
        });

    if should_delete {
        let highlight = session.highlighted;
        if let Some(annotations) = session.confirm_delete() {
            output.commit(annotations, highlight, session.highlighted);
        }
    } else if should_cancel {
        session.cancel_delete();
    }

    Ok(())
}

pub fn store_error_dialog_ui(
    mut contexts: EguiContexts,
    mut error_dialog: ResMut<StoreErrorDialog>,
) -> Result {
    let Some(message) = error_dialog.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::ui::ERROR_TEXT, message);
            });
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                error_dialog.message = None;
            }
        });

    Ok(())
}

/// Shown once at startup when the config file had to be replaced with defaults
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).weak());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}
