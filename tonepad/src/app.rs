//! The tonepad window: note buttons, transport, palette, drawing canvas.

use crate::picker::{FilePicker, PickerAction, PickerMode};
use crate::theme::{menu_bar, palette_color, PadColors};
use crate::widgets::{status_bar, Swatch};
use eframe::CreationContext;
use egui::{Context, Key, Sense, Stroke, Vec2};
use std::collections::VecDeque;
use std::path::PathBuf;
use tonecore::bank::{RodioOutput, SoundBank};
use tonecore::canvas::{Canvas, Point, Shape};
use tonecore::palette::PaletteColor;
use tonecore::settings::documents_dir;
use tonecore::timer::SystemClock;
use tonecore::{Command, Controller, Level, Note, Notice, Prompt, Settings};

const DEFAULT_SAVE_NAME: &str = "sequence.json";

pub struct TonePadApp {
    controller: Controller<SoundBank<RodioOutput>, SystemClock>,
    picker: Option<FilePicker>,
    /// Notices waiting for the user to dismiss them, oldest first
    notices: VecDeque<Notice>,
    /// Folder the picker opens in; follows the last file used
    last_dir: PathBuf,
    show_about: bool,
}

impl TonePadApp {
    pub fn new(_cc: &CreationContext<'_>, settings: &Settings) -> Self {
        let (bank, failures) = SoundBank::load(&settings.sounds_dir, RodioOutput::open());
        let canvas = Canvas::new(settings.canvas_width, settings.canvas_height)
            .with_style(settings.stroke_width, settings.marker_radius);
        let mut controller = Controller::new(bank, SystemClock, canvas);
        for (note, e) in failures {
            controller.notify(Level::Warning, format!("Cannot load sound for note {note}: {e}"));
        }

        Self {
            controller,
            picker: None,
            notices: VecDeque::new(),
            last_dir: documents_dir(),
            show_about: false,
        }
    }

    /// Load a sequence file into the collection, as if picked from the load dialog.
    pub fn open_sequence(&mut self, path: PathBuf) {
        self.remember_dir(&path);
        self.controller.dispatch(Command::LoadFrom(path));
    }

    fn handle_keys(&mut self, ctx: &Context) {
        if !keys_enabled(self.picker.as_ref(), &self.notices) {
            return;
        }

        let mut commands = Vec::new();
        ctx.input(|i| {
            if i.modifiers.command {
                if i.key_pressed(Key::Z) {
                    commands.push(Command::UndoStroke);
                }
                return;
            }
            for note in Note::ALL {
                if note_key(note).map_or(false, |key| i.key_pressed(key)) {
                    commands.push(Command::PlayNote(note));
                }
            }
        });
        for command in commands {
            self.controller.dispatch(command);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect()
        });
        for path in dropped {
            let is_json = path
                .extension()
                .map(|e| e.to_string_lossy().eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if is_json {
                self.open_sequence(path);
            } else {
                log::debug!("ignoring dropped file {}", path.display());
            }
        }
    }

    /// Move controller output (notices, path prompts) into UI state.
    fn collect_requests(&mut self) {
        for notice in self.controller.take_notices() {
            if self.notices.back() != Some(&notice) {
                self.notices.push_back(notice);
            }
        }
        if let Some(prompt) = self.controller.take_prompt() {
            let dir = self.last_dir.clone();
            self.picker = Some(match prompt {
                Prompt::SavePath => FilePicker::save(dir, DEFAULT_SAVE_NAME),
                Prompt::LoadPath => FilePicker::open(dir),
            });
        }
    }

    fn remember_dir(&mut self, path: &std::path::Path) {
        if let Some(parent) = path.parent().filter(|p| p.is_dir()) {
            self.last_dir = parent.to_path_buf();
        }
    }

    fn render_note_buttons(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for note in Note::ALL {
                if ui.add_sized([90.0, 36.0], egui::Button::new(note.label())).clicked() {
                    self.controller.dispatch(Command::PlayNote(note));
                }
            }
        });
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        let recording = self.controller.is_recording();
        ui.horizontal(|ui| {
            if ui.add(egui::Button::new("Record").selected(recording)).clicked() {
                self.controller.dispatch(Command::StartRecording);
            }
            if ui.button("Stop").clicked() {
                self.controller.dispatch(Command::StopRecording);
            }
            if ui.button("Play").clicked() {
                self.controller.dispatch(Command::PlaySequence);
            }
            if ui.button("Save").clicked() {
                self.controller.dispatch(Command::RequestSave);
            }
            if ui.button("Load").clicked() {
                self.controller.dispatch(Command::RequestLoad);
            }
            if ui.button("Mix").clicked() {
                self.controller.dispatch(Command::Mix);
            }
        });
    }

    fn render_palette(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label("color");
            let current = self.controller.canvas().color();
            for color in PaletteColor::ALL {
                let response = ui
                    .add(Swatch::new(palette_color(color)).selected(color == current))
                    .on_hover_text(color.name());
                if response.clicked() {
                    self.controller.dispatch(Command::SetColor(color));
                }
            }
        });
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let canvas = self.controller.canvas();
        let size = Vec2::new(canvas.width(), canvas.height());
        let (response, painter) = ui.allocate_painter(size, Sense::drag());
        let rect = response.rect;
        let origin = rect.min;
        let to_screen = |p: Point| egui::pos2(origin.x + p.x, origin.y + p.y);

        painter.rect_filled(rect, 0.0, PadColors::WHITE);
        for (_, shape) in canvas.shapes() {
            match *shape {
                Shape::Segment { from, to, color, width } => {
                    painter.line_segment(
                        [to_screen(from), to_screen(to)],
                        Stroke::new(width, palette_color(color)),
                    );
                }
                Shape::Marker { center, radius, color } => {
                    painter.circle(
                        to_screen(center),
                        radius,
                        palette_color(color),
                        Stroke::new(1.0, PadColors::BLACK),
                    );
                }
            }
        }
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, PadColors::BLACK));

        let to_canvas = |p: egui::Pos2| Point::new(p.x - origin.x, p.y - origin.y);
        if response.drag_started() {
            let pressed_at = ui
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = pressed_at {
                self.controller.dispatch(Command::PenDown(to_canvas(pos)));
            }
        }
        if response.dragged() && response.drag_delta() != Vec2::ZERO {
            if let Some(pos) = response.interact_pointer_pos() {
                self.controller.dispatch(Command::PenMove(to_canvas(pos)));
            }
        }
        if response.drag_stopped() {
            self.controller.dispatch(Command::PenUp);
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let state = if self.controller.is_recording() { "recording" } else { "idle" };
        let text = format!(
            "{} | {} events | {} loaded | {} queued | {} strokes | color: {}",
            state,
            self.controller.sequence().len(),
            self.controller.collection().len(),
            self.controller.pending_notes(),
            self.controller.canvas().stroke_count(),
            self.controller.canvas().color().name(),
        );
        status_bar(ui, &text);
    }

    fn render_picker(&mut self, ctx: &Context) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        let mode = picker.mode();
        match picker.show(ctx) {
            PickerAction::None => {}
            PickerAction::Cancel => self.picker = None,
            PickerAction::Chosen(path) => {
                self.picker = None;
                match mode {
                    PickerMode::Save => {
                        self.remember_dir(&path);
                        self.controller.dispatch(Command::SaveTo(path));
                    }
                    PickerMode::Open => self.open_sequence(path),
                }
            }
        }
    }

    fn render_notice(&mut self, ctx: &Context) {
        let Some(notice) = self.notices.front() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(notice.level.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&notice.message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed || ctx.input(|i| i.key_pressed(Key::Enter)) {
            self.notices.pop_front();
        }
    }

    fn render_about(&mut self, ctx: &Context) {
        egui::Window::new("about tonepad")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .open(&mut self.show_about)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("tonepad");
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                });
                ui.add_space(8.0);
                ui.label("play notes with the buttons or the a s d f g h j keys.");
                ui.label("record, play back, save, load and mix sequences.");
                ui.label("draw on the canvas: left to right is time, top to bottom is pitch.");
                ui.add_space(4.0);
                ui.label("undo a stroke with ⌘Z / ctrl+Z.");
            });
    }
}

/// Shortcuts are ignored while the picker or a notice dialog is up.
fn keys_enabled(picker: Option<&FilePicker>, notices: &VecDeque<Notice>) -> bool {
    picker.is_none() && notices.is_empty()
}

/// Keyboard key for a note, from its letter binding
fn note_key(note: Note) -> Option<Key> {
    Key::from_name(&note.key().to_ascii_uppercase().to_string())
}

impl eframe::App for TonePadApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.controller.tick();
        self.handle_keys(ctx);
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            menu_bar(ui, |ui| {
                ui.menu_button("file", |ui| {
                    if ui.button("save...").clicked() {
                        self.controller.dispatch(Command::RequestSave);
                        ui.close_menu();
                    }
                    if ui.button("load...").clicked() {
                        self.controller.dispatch(Command::RequestLoad);
                        ui.close_menu();
                    }
                    if ui.button("mix loaded").clicked() {
                        self.controller.dispatch(Command::Mix);
                        ui.close_menu();
                    }
                });
                ui.menu_button("edit", |ui| {
                    if ui.button("undo stroke  ⌘Z").clicked() {
                        self.controller.dispatch(Command::UndoStroke);
                        ui.close_menu();
                    }
                });
                ui.menu_button("help", |ui| {
                    if ui.button("about tonepad").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::top("notes").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_note_buttons(ui);
            self.render_controls(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.render_status(ui);
        });

        egui::SidePanel::right("palette")
            .resizable(false)
            .exact_width(64.0)
            .show(ctx, |ui| {
                self.render_palette(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.render_canvas(ui);
            });
        });

        self.collect_requests();
        self.render_picker(ctx);
        self.render_notice(ctx);
        if self.show_about {
            self.render_about(ctx);
        }

        if let Some(wait) = self.controller.next_wakeup() {
            ctx.request_repaint_after(wait);
        }
    }
}
