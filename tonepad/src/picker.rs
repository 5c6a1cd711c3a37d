//! In-app file picker for sequence files.

use crate::widgets::FileListItem;
use egui::Context;
use std::path::{Path, PathBuf};
use tonecore::store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Open,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    None,
    Cancel,
    Chosen(PathBuf),
}

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
}

pub struct FilePicker {
    mode: PickerMode,
    current_dir: PathBuf,
    entries: Vec<FileEntry>,
    selected: Option<usize>,
    filename: String,
}

impl FilePicker {
    pub fn open(dir: PathBuf) -> Self {
        Self::new(PickerMode::Open, dir, String::new())
    }

    pub fn save(dir: PathBuf, default_name: &str) -> Self {
        Self::new(PickerMode::Save, dir, default_name.to_string())
    }

    fn new(mode: PickerMode, current_dir: PathBuf, filename: String) -> Self {
        let mut picker = Self {
            mode,
            current_dir,
            entries: Vec::new(),
            selected: None,
            filename,
        };
        picker.refresh();
        picker
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Re-read the current directory: parent link, then folders, then sequence files.
    pub fn refresh(&mut self) {
        self.entries.clear();
        self.selected = None;

        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_directory: true,
            });
        }

        let read_dir = match std::fs::read_dir(&self.current_dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                log::warn!("cannot list {}: {}", self.current_dir.display(), e);
                return;
            }
        };

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in read_dir.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let is_directory = path.is_dir();
            if !is_directory && !is_sequence_file(&path) {
                continue;
            }
            let entry = FileEntry { name, path, is_directory };
            if is_directory {
                dirs.push(entry);
            } else {
                files.push(entry);
            }
        }
        dirs.sort_by_key(|e| e.name.to_lowercase());
        files.sort_by_key(|e| e.name.to_lowercase());
        self.entries.extend(dirs);
        self.entries.extend(files);
    }

    pub fn navigate_to(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.current_dir = path;
            self.refresh();
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = Some(index);
            let entry = &self.entries[index];
            if self.mode == PickerMode::Save && !entry.is_directory {
                self.filename = entry.name.clone();
            }
        }
    }

    /// The path the picker would hand back right now, if any
    pub fn target(&self) -> Option<PathBuf> {
        match self.mode {
            PickerMode::Save => {
                let name = self.filename.trim();
                if name.is_empty() {
                    None
                } else {
                    Some(store::with_default_extension(self.current_dir.join(name)))
                }
            }
            PickerMode::Open => self
                .selected
                .and_then(|i| self.entries.get(i))
                .filter(|e| !e.is_directory)
                .map(|e| e.path.clone()),
        }
    }

    pub fn show(&mut self, ctx: &Context) -> PickerAction {
        let mut action = PickerAction::None;
        let title = match self.mode {
            PickerMode::Open => "load sequence",
            PickerMode::Save => "save sequence",
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(400.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("location:");
                    ui.label(self.current_dir().to_string_lossy().to_string());
                });
                ui.separator();

                let mut navigate = None;
                egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                    for idx in 0..self.entries().len() {
                        let entry = &self.entries[idx];
                        let selected = self.selected == Some(idx);
                        let response =
                            ui.add(FileListItem::new(&entry.name, entry.is_directory).selected(selected));
                        if response.double_clicked() {
                            if entry.is_directory {
                                navigate = Some(entry.path.clone());
                            } else if self.mode == PickerMode::Open {
                                action = PickerAction::Chosen(entry.path.clone());
                            }
                        } else if response.clicked() {
                            self.select(idx);
                        }
                    }
                });
                if let Some(path) = navigate {
                    self.navigate_to(path);
                }

                if self.mode == PickerMode::Save {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label("filename:");
                        ui.text_edit_singleline(&mut self.filename);
                    });
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        action = PickerAction::Cancel;
                    }
                    let label = match self.mode {
                        PickerMode::Open => "load",
                        PickerMode::Save => "save",
                    };
                    let target = self.target();
                    if ui.add_enabled(target.is_some(), egui::Button::new(label)).clicked() {
                        if let Some(path) = target {
                            action = PickerAction::Chosen(path);
                        }
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            action = PickerAction::Cancel;
        }
        action
    }
}

fn is_sequence_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(store::EXTENSION))
        .unwrap_or(false)
}
