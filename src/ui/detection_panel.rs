//! Right-hand panel describing the detections on the current image.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::annotation::{Annotation, Severity, class_color};
use crate::session::{EditSession, SetHighlight};
use crate::theme;

const PANEL_WIDTH: f32 = 280.0;

/// `potentially_faulty` -> `Potentially faulty`
fn display_class(label: &str) -> String {
    let spaced = label.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rounded area with thousands separators, e.g. `12,345px²`
fn format_area(area: f32) -> String {
    let digits = (area.round().max(0.0) as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}px²", grouped)
}

fn format_point(v: Vec2) -> String {
    format!("({}, {})", v.x.round(), v.y.round())
}

fn format_size(v: Vec2) -> String {
    format!("{} × {}", v.x.round(), v.y.round())
}

pub(super) fn anomaly_count_text(count: usize) -> String {
    if count == 1 {
        "1 anomaly detected".to_string()
    } else {
        format!("{} anomalies detected", count)
    }
}

fn class_swatch(ui: &mut egui::Ui, label: &str) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
    ui.painter()
        .circle_filled(rect.center(), 5.0, class_color(label));
}

fn stat_row(ui: &mut egui::Ui, name: &str, value: String) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(name).color(theme::ui::HINT_TEXT).size(11.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(value).monospace().size(11.0));
        });
    });
}

/// One clickable card per detection. Returns the index clicked.
fn summary_cards(ui: &mut egui::Ui, annotations: &[Annotation]) -> Option<usize> {
    let mut clicked = None;

    ui.label(
        egui::RichText::new(format!(
            "Detection Summary ({})",
            anomaly_count_text(annotations.len())
        ))
        .strong(),
    );
    ui.add_space(6.0);

    for (index, annotation) in annotations.iter().enumerate() {
        let severity = Severity::from_confidence(annotation.confidence);
        let response = egui::Frame::group(ui.style())
            .fill(theme::ui::CARD_BACKGROUND)
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    class_swatch(ui, &annotation.class_label);
                    ui.label(
                        egui::RichText::new(display_class(&annotation.class_label)).size(12.0),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("{:.1}%", annotation.confidence * 100.0))
                                .color(severity.color())
                                .strong()
                                .size(12.0),
                        );
                    });
                });
                stat_row(ui, "Position:", format_point(annotation.center));
                stat_row(ui, "Size:", format_size(annotation.size));
                stat_row(ui, "Area:", format_area(annotation.area()));
            })
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);

        if response.clicked() {
            clicked = Some(index);
        }
        ui.add_space(4.0);
    }

    clicked
}

/// Detail view for one detection. Returns true when "View All" was pressed.
fn detail_view(ui: &mut egui::Ui, annotation: &Annotation, editing: bool) -> bool {
    let mut view_all = false;
    let severity = Severity::from_confidence(annotation.confidence);

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Selected Detection Details").strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("View All").clicked() {
                view_all = true;
            }
        });
    });
    ui.add_space(6.0);

    egui::Frame::group(ui.style())
        .fill(theme::ui::CARD_BACKGROUND)
        .stroke(egui::Stroke::new(1.0, theme::ui::CARD_FOCUSED_BORDER))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            egui::Grid::new("detection_detail")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Class").color(theme::ui::HINT_TEXT));
                    ui.horizontal(|ui| {
                        class_swatch(ui, &annotation.class_label);
                        ui.label(
                            egui::RichText::new(display_class(&annotation.class_label)).strong(),
                        );
                    });
                    ui.end_row();

                    ui.label(egui::RichText::new("Severity").color(theme::ui::HINT_TEXT));
                    ui.label(
                        egui::RichText::new(severity.display_name())
                            .color(severity.color())
                            .strong(),
                    );
                    ui.end_row();

                    ui.label(egui::RichText::new("Confidence").color(theme::ui::HINT_TEXT));
                    ui.label(format!("{:.2}%", annotation.confidence * 100.0));
                    ui.end_row();

                    ui.label(egui::RichText::new("Center (X, Y)").color(theme::ui::HINT_TEXT));
                    ui.monospace(format_point(annotation.center));
                    ui.end_row();

                    ui.label(egui::RichText::new("Size (W × H)").color(theme::ui::HINT_TEXT));
                    ui.monospace(format_size(annotation.size));
                    ui.end_row();

                    ui.label(egui::RichText::new("Area").color(theme::ui::HINT_TEXT));
                    ui.monospace(format_area(annotation.area()));
                    ui.end_row();

                    ui.label(egui::RichText::new("Source").color(theme::ui::HINT_TEXT));
                    ui.label(annotation.provenance.display_name());
                    ui.end_row();
                });

            if let Some(comments) = &annotation.comments {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(comments).italics());
            }
        });

    ui.add_space(6.0);
    let hint = if editing {
        "Values update as you move or resize the box"
    } else {
        "Click Edit to modify this detection"
    };
    ui.label(egui::RichText::new(hint).color(theme::ui::HINT_TEXT).size(11.0));

    view_all
}

pub fn detection_panel_ui(
    mut contexts: EguiContexts,
    session: Res<EditSession>,
    mut highlight_events: MessageWriter<SetHighlight>,
) -> Result {
    let mut request: Option<Option<usize>> = None;

    egui::SidePanel::right("detection_panel")
        .default_width(PANEL_WIDTH)
        .resizable(true)
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::same(10))
                .fill(theme::ui::PANEL_BACKGROUND),
        )
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if session.working.is_empty() {
                    ui.add_space(12.0);
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new("No detections available")
                                .color(theme::ui::HINT_TEXT),
                        );
                    });
                    return;
                }

                let focused = session
                    .focused_index()
                    .and_then(|i| session.working.get(i));
                match focused {
                    Some(annotation) => {
                        if detail_view(ui, annotation, session.is_editing()) {
                            request = Some(None);
                        }
                    }
                    None => {
                        if let Some(index) = summary_cards(ui, &session.working) {
                            request = Some(Some(index));
                        }
                    }
                }
            });
        });

    if let Some(index) = request {
        highlight_events.write(SetHighlight { index });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_class_spaces_and_capitalizes() {
        assert_eq!(display_class("potentially_faulty"), "Potentially faulty");
        assert_eq!(display_class("normal"), "Normal");
        assert_eq!(display_class(""), "");
    }

    #[test]
    fn test_format_area_groups_thousands() {
        assert_eq!(format_area(0.0), "0px²");
        assert_eq!(format_area(999.4), "999px²");
        assert_eq!(format_area(1234.0), "1,234px²");
        assert_eq!(format_area(1_234_567.0), "1,234,567px²");
    }

    #[test]
    fn test_format_point_rounds() {
        assert_eq!(format_point(Vec2::new(10.4, 20.6)), "(10, 21)");
        assert_eq!(format_size(Vec2::new(5.5, 3.2)), "6 × 3");
    }

    #[test]
    fn test_anomaly_count_pluralizes() {
        assert_eq!(anomaly_count_text(1), "1 anomaly detected");
        assert_eq!(anomaly_count_text(3), "3 anomalies detected");
    }
}
