//! "Export frame": snapshot the background to PNG and save it.

use super::state::{ExportResult, PreviewApp};
use crate::export::render_png;

impl PreviewApp {
    /// Renders the current field frame and opens a save dialog for it.
    pub fn export_frame(&mut self) {
        let png = match render_png(&self.field.borrow().field) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("PNG export failed: {err}");
                self.status = Some(format!("Export failed: {err}"));
                return;
            }
        };

        let sender = self.export_sender.clone();
        tokio::spawn(async move {
            if let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter("PNG", &["png"])
                .set_file_name("particles.png")
                .save_file()
                .await
            {
                let path = handle.path();
                let result = match std::fs::write(path, png) {
                    Ok(()) => ExportResult::Saved(path.display().to_string()),
                    Err(e) => ExportResult::Failed(format!("Failed to save PNG: {e}")),
                };
                let _ = sender.send(result);
            }
        });
    }

    /// Drains finished export tasks into the status line.
    pub fn poll_export_results(&mut self) {
        while let Ok(result) = self.export_receiver.try_recv() {
            self.status = Some(match result {
                ExportResult::Saved(path) => {
                    log::info!("Frame exported to {path}");
                    format!("Saved {path}")
                }
                ExportResult::Failed(message) => {
                    log::warn!("{message}");
                    message
                }
            });
        }
    }
}
