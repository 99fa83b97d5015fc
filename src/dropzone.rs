use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use eframe::egui;

use crate::format::human_size;
use crate::inference::model::Zone;

pub const NO_FILE_MESSAGE: &str = "No file selected.";

/// Shown in every zone when a drop cannot be matched to one of them.
pub const UNTARGETED_DROP_MESSAGE: &str = "Drop the image onto the Brain MRI or Chest X-ray panel.";

/// Extensions offered by the file dialog.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "gif", "webp"];

// ---------------------------------------------------------------------------
// SelectedFile – the image a zone will upload
// ---------------------------------------------------------------------------

/// An image picked or dropped by the user, read fully into memory.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub path: Option<PathBuf>,
    pub name: String,
    pub size: u64,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    /// Read an image from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: Some(path.to_path_buf()),
            name,
            size: bytes.len() as u64,
            bytes: bytes.into(),
        })
    }

    /// Wrap bytes that are already in memory.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            path: None,
            name: name.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// Convert a file dropped onto the window. Native drops carry a path,
    /// web drops carry the bytes.
    pub fn from_dropped(file: &egui::DroppedFile) -> Result<Self> {
        if let Some(bytes) = &file.bytes {
            return Ok(Self::from_bytes(file.name.clone(), bytes.clone()));
        }
        match &file.path {
            Some(path) => Self::load(path),
            None => Err(anyhow!("dropped item '{}' has no readable content", file.name)),
        }
    }
}

// ---------------------------------------------------------------------------
// Dropzone – upload widget state for one zone
// ---------------------------------------------------------------------------

/// Image handed to egui's loaders for the preview.
#[derive(Debug, Clone)]
pub struct Preview {
    pub uri: String,
    pub bytes: Arc<[u8]>,
}

#[derive(Debug)]
pub struct Dropzone {
    pub zone: Zone,
    file: Option<SelectedFile>,
    info: String,
    preview: Option<Preview>,
    drag_active: bool,
    /// Bumped per selection so egui never serves a cached preview.
    generation: u64,
}

impl Dropzone {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            file: None,
            info: NO_FILE_MESSAGE.to_string(),
            preview: None,
            drag_active: false,
            generation: 0,
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// Files are being dragged over this zone.
    pub fn drag_over(&mut self) {
        self.drag_active = true;
    }

    /// Drag left the zone (or ended elsewhere).
    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// Files were dropped on this zone; only the first one is used.
    pub fn drop_file(&mut self, first: Option<Result<SelectedFile>>) {
        self.drag_active = false;
        match first {
            Some(Ok(file)) => self.select(Some(file)),
            Some(Err(e)) => self.set_error(&e),
            None => {}
        }
    }

    /// Replace the selection and refresh info text and preview.
    pub fn select(&mut self, file: Option<SelectedFile>) {
        self.generation += 1;
        match file {
            Some(f) => {
                log::info!("{}: selected {} ({} bytes)", self.zone, f.name, f.size);
                self.info = format!("Selected: {} • {}", f.name, human_size(f.size));
                self.preview = Some(Preview {
                    uri: format!("bytes://{}/{}/{}", self.zone, self.generation, f.name),
                    bytes: f.bytes.clone(),
                });
                self.file = Some(f);
            }
            None => {
                self.info = NO_FILE_MESSAGE.to_string();
                self.preview = None;
                self.file = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.select(None);
    }

    /// Load and select a file from disk, reporting read failures inline.
    pub fn select_path(&mut self, path: &Path) {
        match SelectedFile::load(path) {
            Ok(file) => self.select(Some(file)),
            Err(e) => self.set_error(&e),
        }
    }

    /// Open the native file dialog. Cancelling keeps the current selection.
    pub fn pick_file(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title(format!("Choose {} image", self.zone.title()))
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file();

        if let Some(path) = picked {
            self.select_path(&path);
        }
    }

    /// Inline message in the info line (validation prompts).
    pub fn prompt(&mut self, message: &str) {
        self.info = message.to_string();
    }

    fn set_error(&mut self, err: &anyhow::Error) {
        log::error!("{}: failed to read image: {err:#}", self.zone);
        self.info = format!("Error: {err:#}");
    }
}
