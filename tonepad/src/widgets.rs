//! Custom widgets: palette swatch, status bar, file list row.

use crate::theme::PadColors;
use egui::{Color32, Response, Sense, Stroke, Ui, Widget};

/// A palette swatch: a filled square, outlined thicker when selected.
pub struct Swatch {
    color: Color32,
    selected: bool,
}

impl Swatch {
    pub fn new(color: Color32) -> Self {
        Self { color, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for Swatch {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(32.0, 32.0), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, self.color);
            let width = if self.selected {
                3.0
            } else if response.hovered() {
                2.0
            } else {
                1.0
            };
            painter.rect_stroke(rect.shrink(width / 2.0), 0.0, Stroke::new(width, PadColors::BLACK));
        }

        response
    }
}

/// Status bar: white strip, 1px black border
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(PadColors::WHITE)
        .stroke(Stroke::new(1.0, PadColors::BLACK))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}

/// One row of the file picker; selected rows are inverted.
pub struct FileListItem<'a> {
    name: &'a str,
    is_directory: bool,
    selected: bool,
}

impl<'a> FileListItem<'a> {
    pub fn new(name: &'a str, is_directory: bool) -> Self {
        Self { name, is_directory, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for FileListItem<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 20.0;
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let (fill, text_color) = if self.selected {
                (PadColors::BLACK, PadColors::WHITE)
            } else if response.hovered() {
                (PadColors::LAVENDER, PadColors::BLACK)
            } else {
                (PadColors::WHITE, PadColors::BLACK)
            };
            painter.rect_filled(rect, 0.0, fill);

            let icon = if self.is_directory { "📁" } else { "📄" };
            painter.text(
                egui::pos2(rect.min.x + 12.0, rect.center().y),
                egui::Align2::CENTER_CENTER,
                icon,
                egui::FontId::proportional(12.0),
                text_color,
            );
            painter.text(
                egui::pos2(rect.min.x + 24.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.name,
                egui::FontId::proportional(12.0),
                text_color,
            );
        }

        response
    }
}
