//! Built-in app catalog: launcher listings, dock layout, desktop icon defaults, and the
//! default window each app opens with.
//!
//! The catalog is validated at build time from `app_catalog.toml` and parsed once on first use.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::{
    file_system::{default_folder_cell, FileItem, FileSystem, Folder},
    icon_layout::{GridCell, IconGridConfig, LayoutMode},
    model::{AppId, OpenWindowRequest, WindowContent, WindowId},
    reducer::DesktopState,
};

include!(concat!(env!("OUT_DIR"), "/desktop_catalog_generated.rs"));

/// Launcher panel an app is listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LauncherGroup {
    Apps,
    Attacks,
    Hidden,
}

/// Geometry a window opens with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WindowDefaults {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Catalog metadata for one built-in app.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppCatalogEntry {
    pub app_id: AppId,
    pub title: String,
    desktop_label: Option<String>,
    pub category: String,
    pub description: Option<String>,
    pub launcher: LauncherGroup,
    desktop_cell: Option<[i32; 2]>,
    mobile_cell: Option<[i32; 2]>,
    pub window: WindowDefaults,
}

impl AppCatalogEntry {
    /// Label under the desktop icon, which may be shorter than the window title.
    pub fn desktop_label(&self) -> &str {
        self.desktop_label.as_deref().unwrap_or(&self.title)
    }

    /// Default desktop cell, or `None` when the app has no desktop icon.
    ///
    /// Apps without a dedicated mobile cell reuse their desktop cell.
    pub fn default_cell(&self, layout: LayoutMode) -> Option<GridCell> {
        let cell = match layout {
            LayoutMode::Desktop => self.desktop_cell,
            LayoutMode::Mobile => self.mobile_cell.or(self.desktop_cell),
        };
        cell.map(|[x, y]| GridCell::new(x, y))
    }

    /// Returns `true` when the app has a desktop icon.
    pub fn shows_on_desktop(&self) -> bool {
        self.desktop_cell.is_some()
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.category.to_lowercase().contains(&query)
    }
}

/// One dock slot, pointing at an app or an external link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DockEntry {
    pub entry_id: String,
    pub label: String,
    app_id: Option<AppId>,
    url: Option<String>,
}

/// What clicking a dock entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockTarget<'a> {
    App(AppId),
    External(&'a str),
}

impl DockEntry {
    pub fn target(&self) -> Option<DockTarget<'_>> {
        match (&self.app_id, &self.url) {
            (Some(app_id), _) => Some(DockTarget::App(*app_id)),
            (None, Some(url)) => Some(DockTarget::External(url)),
            (None, None) => None,
        }
    }
}

/// Parsed form of the built-in catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DesktopCatalog {
    pub schema_version: u32,
    pub icon_grid: IconGridConfig,
    pub apps: Vec<AppCatalogEntry>,
    pub dock: Vec<DockEntry>,
    pub folder_window: WindowDefaults,
    pub folders: Vec<Folder>,
    pub trash: Vec<FileItem>,
}

/// Returns the parsed built-in catalog.
pub fn catalog() -> &'static DesktopCatalog {
    static CATALOG: OnceLock<DesktopCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        serde_json::from_str(DESKTOP_CATALOG_JSON)
            .expect("generated desktop catalog should parse")
    })
}

/// Returns the generated catalog JSON payload.
pub fn catalog_json() -> &'static str {
    DESKTOP_CATALOG_JSON
}

/// Catalog entry for `app_id`.
pub fn app_entry(app_id: AppId) -> Option<&'static AppCatalogEntry> {
    catalog().apps.iter().find(|entry| entry.app_id == app_id)
}

/// The window an app opens with when launched from any launcher.
pub fn default_open_request(app_id: AppId) -> Option<OpenWindowRequest> {
    let entry = app_entry(app_id)?;
    Some(
        OpenWindowRequest::new(
            WindowId::App(app_id),
            entry.title.clone(),
            WindowContent::App(app_id),
        )
        .at(entry.window.x, entry.window.y)
        .sized(entry.window.width, entry.window.height),
    )
}

/// The window a folder opens in, titled with the folder name.
pub fn folder_open_request(folder: &Folder) -> OpenWindowRequest {
    let defaults = catalog().folder_window;
    OpenWindowRequest::new(
        WindowId::folder(folder.id.clone()),
        folder.name.clone(),
        WindowContent::Folder,
    )
    .at(defaults.x, defaults.y)
    .sized(defaults.width, defaults.height)
}

/// Apps listed in `group` whose title or category contains `query` (case-insensitive).
pub fn launcher_entries(group: LauncherGroup, query: &str) -> Vec<&'static AppCatalogEntry> {
    catalog()
        .apps
        .iter()
        .filter(|entry| entry.launcher == group && entry.matches(query.trim()))
        .collect()
}

/// Dock entries in display order.
pub fn dock_entries() -> &'static [DockEntry] {
    &catalog().dock
}

/// Dock entry with `entry_id`.
pub fn dock_entry(entry_id: &str) -> Option<&'static DockEntry> {
    dock_entries().iter().find(|entry| entry.entry_id == entry_id)
}

/// File system seeded with the catalog's folders and trash.
pub fn seeded_file_system() -> FileSystem {
    FileSystem::new(catalog().folders.clone(), catalog().trash.clone())
}

/// What a desktop icon launches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopIconTarget {
    App(AppId),
    Folder(String),
}

/// One icon as the desktop should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopIcon {
    /// Key into the icon position map.
    pub icon_id: String,
    pub label: String,
    pub target: DesktopIconTarget,
    pub cell: GridCell,
}

impl DesktopIcon {
    /// The window this icon opens, or `None` for a folder that no longer exists.
    pub fn open_request(&self, files: &FileSystem) -> Option<OpenWindowRequest> {
        match &self.target {
            DesktopIconTarget::App(app_id) => default_open_request(*app_id),
            DesktopIconTarget::Folder(folder_id) => files.folder(folder_id).map(folder_open_request),
        }
    }
}

/// App icons followed by folder icons, each at its stored cell or its default cell.
pub fn desktop_icons(state: &DesktopState, layout: LayoutMode) -> Vec<DesktopIcon> {
    let mut icons: Vec<DesktopIcon> = catalog()
        .apps
        .iter()
        .filter_map(|entry| {
            let default = entry.default_cell(layout)?;
            let icon_id = entry.app_id.as_str();
            Some(DesktopIcon {
                icon_id: icon_id.to_string(),
                label: entry.desktop_label().to_string(),
                target: DesktopIconTarget::App(entry.app_id),
                cell: state.icons.cell_or(icon_id, default),
            })
        })
        .collect();

    let app_icon_count = icons.len();
    icons.extend(state.files.folders().iter().enumerate().map(|(index, folder)| {
        let default = default_folder_cell(index, app_icon_count, layout);
        DesktopIcon {
            icon_id: folder.id.clone(),
            label: folder.name.clone(),
            target: DesktopIconTarget::Folder(folder.id.clone()),
            cell: state.icons.cell_or(&folder.id, default),
        }
    }));
    icons
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::icon_layout::IconPosition;
    use crate::model::{WindowPosition, WindowSize};

    #[test]
    fn every_app_has_a_catalog_entry() {
        for app_id in AppId::ALL {
            assert!(app_entry(app_id).is_some(), "missing catalog entry for {app_id}");
        }
        assert_eq!(catalog().schema_version, 1);
        assert!(catalog_json().contains("\"apps\""));
    }

    #[test]
    fn desktop_open_request_uses_catalog_defaults() {
        let request = default_open_request(AppId::About).expect("about");
        assert_eq!(request.id, WindowId::App(AppId::About));
        assert_eq!(request.title, "About Me");
        assert_eq!(request.content, WindowContent::App(AppId::About));
        assert_eq!(request.position, WindowPosition { x: 200, y: 150 });
        assert_eq!(
            request.size,
            WindowSize {
                width: 900,
                height: 600
            }
        );
        assert!(!request.minimized && !request.maximized);
    }

    #[test]
    fn folder_windows_use_folder_defaults() {
        let files = seeded_file_system();
        let documents = files.folder("documents").expect("seed folder");
        let request = folder_open_request(documents);

        assert_eq!(request.id.to_string(), "folder-documents");
        assert_eq!(request.title, "Documents");
        assert_eq!(request.content, WindowContent::Folder);
        assert_eq!(
            request.size,
            WindowSize {
                width: 800,
                height: 600
            }
        );
    }

    #[test]
    fn launcher_search_matches_title_or_category() {
        let system: Vec<_> = launcher_entries(LauncherGroup::Apps, "SYSTEM")
            .into_iter()
            .map(|entry| entry.app_id)
            .collect();
        assert_eq!(system, vec![AppId::Terminal, AppId::Settings, AppId::Trash]);

        let by_title: Vec<_> = launcher_entries(LauncherGroup::Apps, "proj")
            .into_iter()
            .map(|entry| entry.app_id)
            .collect();
        assert_eq!(by_title, vec![AppId::Projects]);

        assert_eq!(launcher_entries(LauncherGroup::Attacks, "").len(), 5);
    }

    #[test]
    fn dock_mixes_apps_and_links() {
        assert_eq!(
            dock_entry("terminal").and_then(DockEntry::target),
            Some(DockTarget::App(AppId::Terminal))
        );
        assert!(matches!(
            dock_entry("github").and_then(DockEntry::target),
            Some(DockTarget::External(url)) if url.starts_with("https://github.com/")
        ));
        assert!(dock_entry("paint").is_none());
    }

    #[test]
    fn desktop_icons_fall_back_to_default_cells() {
        let mut state = DesktopState::default();
        let icons = desktop_icons(&state, LayoutMode::Desktop);
        let cells: Vec<_> = icons
            .iter()
            .map(|icon| (icon.icon_id.as_str(), icon.cell))
            .collect();
        assert_eq!(
            cells,
            vec![
                ("about", GridCell::new(0, 0)),
                ("projects", GridCell::new(1, 0)),
                ("contact", GridCell::new(2, 0)),
                ("certifications", GridCell::new(3, 0)),
                ("documents", GridCell::new(4, 0)),
            ]
        );
        assert_eq!(icons[3].label, "Certifi..");

        state.icons.update_position(
            "contact",
            IconPosition {
                x: 30.0,
                y: 320.0,
                grid_x: 0,
                grid_y: 2,
            },
        );
        let moved = desktop_icons(&state, LayoutMode::Desktop);
        assert_eq!(moved[2].cell, GridCell::new(0, 2));
    }

    #[test]
    fn mobile_icons_use_mobile_cells() {
        let state = DesktopState::default();
        let icons = desktop_icons(&state, LayoutMode::Mobile);
        let contact = icons
            .iter()
            .find(|icon| icon.icon_id == "contact")
            .expect("contact");
        assert_eq!(contact.cell, GridCell::new(0, 1));
        let documents = icons.last().expect("folder icon");
        assert_eq!(documents.cell, GridCell::new(1, 1));
        assert_eq!(
            documents.open_request(&state.files).map(|r| r.id),
            Some(WindowId::folder("documents"))
        );
    }
}
