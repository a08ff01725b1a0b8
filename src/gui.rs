//! Desktop window with a file drop target
//!
//! Everything runs on the UI thread: a drop is handled to completion inside
//! `update` before the next frame is drawn.

use eframe::egui;

use crate::drop::{DropHandler, DropOutcome, INSTALL_INSTRUCTIONS};
use crate::error::GuiError;

pub const WINDOW_TITLE: &str = "Dependency Extractor";
pub const DROP_PROMPT: &str = "Drag and drop your .py or .pyw file here";
const INSTRUCTIONS_BUTTON: &str = "Show Installation Instructions";
const INSTRUCTIONS_TITLE: &str = "Installation Instructions";

/// Window state: the handler, the latest status line, and whether the
/// instructions dialog is open.
pub struct DropApp {
    handler: DropHandler,
    status: String,
    show_instructions: bool,
}

impl DropApp {
    pub fn new(handler: DropHandler) -> Self {
        Self {
            handler,
            status: String::new(),
            show_instructions: false,
        }
    }

    fn handle_dropped_files(&mut self, dropped: &[egui::DroppedFile]) {
        let outcome = match dropped {
            [file] => match &file.path {
                Some(path) => self.handler.handle(&path.to_string_lossy()),
                None => DropOutcome::Rejected,
            },
            _ => DropOutcome::Rejected,
        };
        self.status = outcome.message();
    }

    fn instructions_dialog(&mut self, ctx: &egui::Context) {
        let mut open = self.show_instructions;
        let mut dismissed = false;
        egui::Window::new(INSTRUCTIONS_TITLE)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(INSTALL_INSTRUCTIONS);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });
        self.show_instructions = open && !dismissed;
    }
}

impl eframe::App for DropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if !dropped.is_empty() {
            self.handle_dropped_files(&dropped);
        }
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                if hovering {
                    ui.strong(DROP_PROMPT);
                } else {
                    ui.label(DROP_PROMPT);
                }
                ui.add_space(20.0);
                ui.label(&self.status);
                ui.add_space(10.0);
                if ui.button(INSTRUCTIONS_BUTTON).clicked() {
                    self.show_instructions = true;
                }
            });
        });

        if self.show_instructions {
            self.instructions_dialog(ctx);
        }
    }
}

/// Open the window and block until it is closed.
pub fn run(handler: DropHandler) -> Result<(), GuiError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([400.0, 200.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(DropApp::new(handler)))),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::distribution::InstalledDistributions;
    use crate::drop::REJECTED_MESSAGE;
    use crate::test_utils::TestDir;
    use crate::writer::OutputTarget;
    use std::path::PathBuf;

    fn app_in(dir: &TestDir) -> DropApp {
        let config = Config {
            output: OutputTarget::in_dir(dir.path()),
            ..Default::default()
        };
        DropApp::new(DropHandler::new(config, InstalledDistributions::new()))
    }

    fn dropped(path: PathBuf) -> egui::DroppedFile {
        egui::DroppedFile {
            path: Some(path),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_drop_updates_status() {
        let dir = TestDir::new();
        let script = dir.add_file("app.py", "import requests\n");
        let mut app = app_in(&dir);

        app.handle_dropped_files(&[dropped(script)]);
        assert_eq!(app.status, "Requirements written to requirements.txt");
    }

    #[test]
    fn test_multi_file_drop_is_rejected() {
        let dir = TestDir::new();
        let a = dir.add_file("a.py", "import os\n");
        let b = dir.add_file("b.py", "import sys\n");
        let mut app = app_in(&dir);

        app.handle_dropped_files(&[dropped(a), dropped(b)]);
        assert_eq!(app.status, REJECTED_MESSAGE);
        assert!(!dir.path().join("requirements.txt").exists());
    }

    #[test]
    fn test_drop_without_path_is_rejected() {
        let dir = TestDir::new();
        let mut app = app_in(&dir);

        app.handle_dropped_files(&[egui::DroppedFile::default()]);
        assert_eq!(app.status, REJECTED_MESSAGE);
    }
}
