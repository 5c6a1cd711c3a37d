//! Flat lavender theme: 1px black outlines, no rounding.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use tonecore::palette::PaletteColor;

pub struct PadColors;

impl PadColors {
    pub const LAVENDER: Color32 = Color32::from_rgb(0xCC, 0xCC, 0xFF);
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
}

pub fn palette_color(color: PaletteColor) -> Color32 {
    let [r, g, b] = color.rgb();
    Color32::from_rgb(r, g, b)
}

pub struct PadTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for PadTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 20.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 6.0,
        }
    }
}

impl PadTheme {
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::light();
        visuals.window_fill = PadColors::LAVENDER;
        visuals.panel_fill = PadColors::LAVENDER;
        visuals.faint_bg_color = PadColors::LAVENDER;
        visuals.extreme_bg_color = PadColors::WHITE;
        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, PadColors::BLACK);

        let flat = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::new(1.0, PadColors::BLACK);
            ws.fg_stroke = Stroke::new(1.0, PadColors::BLACK);
            ws.rounding = Rounding::ZERO;
        };
        flat(&mut visuals.widgets.noninteractive, PadColors::LAVENDER);
        flat(&mut visuals.widgets.inactive, PadColors::LAVENDER);
        flat(&mut visuals.widgets.hovered, PadColors::WHITE);
        flat(&mut visuals.widgets.active, PadColors::WHITE);
        flat(&mut visuals.widgets.open, PadColors::WHITE);

        visuals.selection.bg_fill = PadColors::BLACK;
        visuals.selection.stroke = Stroke::new(1.0, PadColors::WHITE);

        style.visuals = visuals;
        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }
}

/// Menu bar strip with a 1px outline
pub fn menu_bar(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(PadColors::LAVENDER)
        .stroke(Stroke::new(1.0, PadColors::BLACK))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| {
            ui.horizontal(add_contents);
        });
}
