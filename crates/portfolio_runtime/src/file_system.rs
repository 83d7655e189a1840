//! Desktop folders and the trash bin.

use portfolio_host::{calendar_date, next_monotonic_timestamp_ms, unix_time_ms_now};
use serde::{Deserialize, Serialize};

use crate::icon_layout::{GridCell, LayoutMode};

/// Whether a desktop entry is a plain file or a nested folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Folder,
}

/// A file or folder entry shown inside a folder window or the trash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    pub id: String,
    pub name: String,
    pub kind: FileKind,
    #[serde(default)]
    pub content: Option<String>,
    /// `YYYY-MM-DD`
    pub date_created: String,
    /// `YYYY-MM-DD`
    pub date_modified: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesktopPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<FileItem>,
    pub position: DesktopPoint,
}

/// Desktop folders plus the trash bin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileSystem {
    folders: Vec<Folder>,
    trash: Vec<FileItem>,
}

impl FileSystem {
    pub fn new(folders: Vec<Folder>, trash: Vec<FileItem>) -> Self {
        Self { folders, trash }
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    pub fn trash(&self) -> &[FileItem] {
        &self.trash
    }

    /// Creates an empty folder and returns its id (`folder-<unix ms>`).
    pub fn create_folder(&mut self, name: impl Into<String>, position: DesktopPoint) -> String {
        let id = format!("folder-{}", next_monotonic_timestamp_ms());
        self.folders.push(Folder {
            id: id.clone(),
            name: name.into(),
            items: Vec::new(),
            position,
        });
        id
    }

    pub fn delete_folder(&mut self, id: &str) {
        self.folders.retain(|f| f.id != id);
    }

    pub fn rename_folder(&mut self, id: &str, name: impl Into<String>) {
        if let Some(folder) = self.folders.iter_mut().find(|f| f.id == id) {
            folder.name = name.into();
        }
    }

    pub fn add_item_to_folder(&mut self, folder_id: &str, item: FileItem) {
        if let Some(folder) = self.folders.iter_mut().find(|f| f.id == folder_id) {
            folder.items.push(item);
        }
    }

    pub fn move_to_trash(&mut self, item: FileItem) {
        self.trash.push(item);
    }

    pub fn empty_trash(&mut self) {
        self.trash.clear();
    }

    /// Takes an item back out of the trash. Restored items are not re-filed into a folder.
    pub fn restore_from_trash(&mut self, id: &str) {
        self.trash.retain(|item| item.id != id);
    }
}

impl FileItem {
    /// A new empty file stamped with today's date.
    pub fn new_file(id: impl Into<String>, name: impl Into<String>) -> Self {
        let today = calendar_date(unix_time_ms_now());
        Self {
            id: id.into(),
            name: name.into(),
            kind: FileKind::File,
            content: None,
            date_created: today.clone(),
            date_modified: today,
        }
    }
}

/// Default cell of the `index`-th folder icon.
///
/// On desktop folders continue the first row after the `app_icon_count` app icons. On mobile
/// the first folder sits in the second row next to the contact icon and later folders fill
/// three-wide rows below it.
pub fn default_folder_cell(index: usize, app_icon_count: usize, layout: LayoutMode) -> GridCell {
    match layout {
        LayoutMode::Desktop => GridCell::new((app_icon_count + index) as i32, 0),
        LayoutMode::Mobile if index == 0 => GridCell::new(1, 1),
        LayoutMode::Mobile => {
            let rest = (index - 1) as i32;
            GridCell::new(rest % 3, 2 + rest / 3)
        }
    }
}
