//! Desktop state owner, the actions that mutate it, and the side-effect intents they emit.
//!
//! Every store mutation goes through [`reduce_desktop`]. The reducer is synchronous and never
//! fails: actions naming an unknown window, folder, or dock entry are no-ops.

use serde::{Deserialize, Serialize};

use crate::{
    apps::{self, DockTarget},
    file_system::{DesktopPoint, FileItem, FileSystem},
    icon_layout::{GridMetrics, IconPositions, Placement},
    model::{AppId, OpenWindowRequest, WindowId, WindowPosition, WindowSize},
    window_manager::WindowManager,
};

/// The single owner of all desktop state, handed to the UI tree root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    /// Open windows and their stacking order.
    pub windows: WindowManager,
    /// Icons moved away from their default cell.
    pub icons: IconPositions,
    /// Desktop folders and the trash.
    pub files: FileSystem,
}

impl Default for DesktopState {
    /// No open windows, no moved icons, and the catalog's seed folders and trash.
    fn default() -> Self {
        Self {
            windows: WindowManager::new(),
            icons: IconPositions::new(apps::catalog().icon_grid.cell_size),
            files: apps::seeded_file_system(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`].
pub enum DesktopAction {
    /// Open (or re-focus) an app with its catalog defaults.
    OpenApp { app_id: AppId },
    /// Open (or re-focus) a window described by the caller.
    OpenWindow(OpenWindowRequest),
    /// Open (or re-focus) the window listing a folder's contents.
    OpenFolder { folder_id: String },
    CloseWindow { window_id: WindowId },
    ToggleMinimize { window_id: WindowId },
    ToggleMaximize { window_id: WindowId },
    /// Raise a window above every other one.
    FocusWindow { window_id: WindowId },
    /// Store a dragged position. Ignored while the window is maximized.
    MoveWindow {
        window_id: WindowId,
        position: WindowPosition,
    },
    /// Store a resized frame. Ignored while the window is maximized.
    ResizeWindow {
        window_id: WindowId,
        position: WindowPosition,
        size: WindowSize,
    },
    /// Click on a dock entry: opens an app or leaves the desktop.
    ActivateDockEntry { entry_id: String },
    /// An icon drag ended at pixel (`x`, `y`).
    DropIcon {
        icon_id: String,
        x: f64,
        y: f64,
        metrics: GridMetrics,
    },
    /// Send every icon back to its default cell and drop the saved layout.
    ResetIconLayout,
    /// Replace icon positions with a layout loaded from storage.
    HydrateIconLayout { icons: IconPositions },
    CreateFolder { name: String, position: DesktopPoint },
    /// Remove a folder together with its window and stored icon cell.
    DeleteFolder { folder_id: String },
    RenameFolder { folder_id: String, name: String },
    AddItemToFolder { folder_id: String, item: FileItem },
    MoveToTrash { item: FileItem },
    EmptyTrash,
    RestoreFromTrash { item_id: String },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the provider to execute.
pub enum RuntimeEffect {
    /// Write the current icon layout to durable storage.
    PersistIconLayout,
    /// Remove the saved icon layout so the next boot starts from the default cells.
    ClearIconLayout,
    /// Open a link outside the desktop.
    OpenExternalUrl(String),
    /// Report where a dropped icon ended up (for example to flash the grid when no space was found).
    IconPlaced { icon_id: String, placement: Placement },
}

fn open_app(state: &mut DesktopState, app_id: AppId) {
    if let Some(request) = apps::default_open_request(app_id) {
        state.windows.open(request);
    }
}

fn is_maximized(state: &DesktopState, window_id: &WindowId) -> bool {
    state
        .windows
        .get(window_id)
        .is_some_and(|window| window.maximized)
}

/// Applies `action` to `state` and returns the side effects the caller should run.
pub fn reduce_desktop(state: &mut DesktopState, action: DesktopAction) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenApp { app_id } => open_app(state, app_id),
        DesktopAction::OpenWindow(request) => state.windows.open(request),
        DesktopAction::OpenFolder { folder_id } => {
            if let Some(folder) = state.files.folder(&folder_id) {
                let request = apps::folder_open_request(folder);
                state.windows.open(request);
            }
        }
        DesktopAction::CloseWindow { window_id } => state.windows.close(&window_id),
        DesktopAction::ToggleMinimize { window_id } => state.windows.toggle_minimize(&window_id),
        DesktopAction::ToggleMaximize { window_id } => state.windows.toggle_maximize(&window_id),
        DesktopAction::FocusWindow { window_id } => state.windows.focus(&window_id),
        DesktopAction::MoveWindow {
            window_id,
            position,
        } => {
            if !is_maximized(state, &window_id) {
                state.windows.update_position(&window_id, position);
            }
        }
        DesktopAction::ResizeWindow {
            window_id,
            position,
            size,
        } => {
            if !is_maximized(state, &window_id) {
                state.windows.update_size(&window_id, size);
                state.windows.update_position(&window_id, position);
            }
        }
        DesktopAction::ActivateDockEntry { entry_id } => {
            match apps::dock_entry(&entry_id).and_then(|entry| entry.target()) {
                Some(DockTarget::App(app_id)) => open_app(state, app_id),
                Some(DockTarget::External(url)) => {
                    effects.push(RuntimeEffect::OpenExternalUrl(url.to_string()));
                }
                None => {}
            }
        }
        DesktopAction::DropIcon {
            icon_id,
            x,
            y,
            metrics,
        } => {
            let placement = state.icons.drop_icon(&icon_id, x, y, metrics);
            effects.push(RuntimeEffect::IconPlaced { icon_id, placement });
            effects.push(RuntimeEffect::PersistIconLayout);
        }
        DesktopAction::ResetIconLayout => {
            state.icons.reset();
            effects.push(RuntimeEffect::ClearIconLayout);
        }
        DesktopAction::HydrateIconLayout { icons } => state.icons = icons,
        DesktopAction::CreateFolder { name, position } => {
            state.files.create_folder(name, position);
        }
        DesktopAction::DeleteFolder { folder_id } => {
            if state.files.folder(&folder_id).is_some() {
                state.windows.close(&WindowId::folder(folder_id.clone()));
                state.files.delete_folder(&folder_id);
                if state.icons.remove(&folder_id).is_some() {
                    effects.push(RuntimeEffect::PersistIconLayout);
                }
            }
        }
        DesktopAction::RenameFolder { folder_id, name } => {
            state.files.rename_folder(&folder_id, name)
        }
        DesktopAction::AddItemToFolder { folder_id, item } => {
            state.files.add_item_to_folder(&folder_id, item)
        }
        DesktopAction::MoveToTrash { item } => state.files.move_to_trash(item),
        DesktopAction::EmptyTrash => state.files.empty_trash(),
        DesktopAction::RestoreFromTrash { item_id } => state.files.restore_from_trash(&item_id),
    }
    effects
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::icon_layout::GridCell;
    use crate::model::WindowContent;

    fn metrics() -> GridMetrics {
        GridMetrics {
            cell_size: 120.0,
            padding_x: 30.0,
            padding_y: 80.0,
        }
    }

    #[test]
    fn open_app_uses_catalog_window() {
        let mut state = DesktopState::default();
        let effects = reduce_desktop(
            &mut state,
            DesktopAction::OpenApp {
                app_id: AppId::Settings,
            },
        );

        assert!(effects.is_empty());
        let window = state
            .windows
            .get(&WindowId::App(AppId::Settings))
            .expect("settings window");
        assert_eq!(window.content, WindowContent::App(AppId::Settings));
        assert_eq!(window.position, WindowPosition { x: 200, y: 100 });
    }

    #[test]
    fn maximized_windows_ignore_geometry_updates() {
        let mut state = DesktopState::default();
        let window_id = WindowId::App(AppId::About);
        reduce_desktop(&mut state, DesktopAction::OpenApp { app_id: AppId::About });
        reduce_desktop(
            &mut state,
            DesktopAction::ToggleMaximize {
                window_id: window_id.clone(),
            },
        );
        reduce_desktop(
            &mut state,
            DesktopAction::MoveWindow {
                window_id: window_id.clone(),
                position: WindowPosition { x: 0, y: 0 },
            },
        );
        assert_eq!(
            state.windows.get(&window_id).expect("about").position,
            WindowPosition { x: 200, y: 150 }
        );

        reduce_desktop(
            &mut state,
            DesktopAction::ToggleMaximize {
                window_id: window_id.clone(),
            },
        );
        reduce_desktop(
            &mut state,
            DesktopAction::ResizeWindow {
                window_id: window_id.clone(),
                position: WindowPosition { x: 150, y: 150 },
                size: WindowSize {
                    width: 950,
                    height: 600,
                },
            },
        );
        let about = state.windows.get(&window_id).expect("about");
        assert_eq!(about.position, WindowPosition { x: 150, y: 150 });
        assert_eq!(about.size.width, 950);
    }

    #[test]
    fn dock_links_leave_the_desktop() {
        let mut state = DesktopState::default();
        let effects = reduce_desktop(
            &mut state,
            DesktopAction::ActivateDockEntry {
                entry_id: "linkedin".to_string(),
            },
        );

        assert!(state.windows.is_empty());
        assert!(matches!(
            effects.as_slice(),
            [RuntimeEffect::OpenExternalUrl(url)] if url.contains("linkedin.com")
        ));
    }

    #[test]
    fn dock_apps_open_windows() {
        let mut state = DesktopState::default();
        reduce_desktop(
            &mut state,
            DesktopAction::ActivateDockEntry {
                entry_id: "trash".to_string(),
            },
        );
        reduce_desktop(
            &mut state,
            DesktopAction::ActivateDockEntry {
                entry_id: "unknown".to_string(),
            },
        );
        assert_eq!(state.windows.len(), 1);
        assert!(state.windows.contains(&WindowId::App(AppId::Trash)));
    }

    #[test]
    fn icon_drops_and_resets_update_storage() {
        let mut state = DesktopState::default();
        let effects = reduce_desktop(
            &mut state,
            DesktopAction::DropIcon {
                icon_id: "about".to_string(),
                x: 270.0,
                y: 200.0,
                metrics: metrics(),
            },
        );
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::IconPlaced {
                    icon_id: "about".to_string(),
                    placement: Placement::Placed(GridCell::new(2, 1)),
                },
                RuntimeEffect::PersistIconLayout,
            ]
        );

        let effects = reduce_desktop(&mut state, DesktopAction::ResetIconLayout);
        assert_eq!(effects, vec![RuntimeEffect::ClearIconLayout]);
        assert!(state.icons.is_empty());
    }

    #[test]
    fn hydration_does_not_write_back() {
        let mut state = DesktopState::default();
        let mut icons = IconPositions::default();
        icons.drop_icon("contact", 30.0, 320.0, metrics());

        let effects = reduce_desktop(
            &mut state,
            DesktopAction::HydrateIconLayout {
                icons: icons.clone(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.icons, icons);
    }

    #[test]
    fn folders_open_as_folder_windows() {
        let mut state = DesktopState::default();
        reduce_desktop(
            &mut state,
            DesktopAction::CreateFolder {
                name: "New Folder".to_string(),
                position: DesktopPoint { x: 250.0, y: 250.0 },
            },
        );
        let folder_id = state.files.folders().last().expect("new folder").id.clone();

        reduce_desktop(
            &mut state,
            DesktopAction::RenameFolder {
                folder_id: folder_id.clone(),
                name: "Writeups".to_string(),
            },
        );
        reduce_desktop(
            &mut state,
            DesktopAction::OpenFolder {
                folder_id: folder_id.clone(),
            },
        );

        let window = state
            .windows
            .get(&WindowId::folder(folder_id.clone()))
            .expect("folder window");
        assert_eq!(window.title, "Writeups");
        assert_eq!(window.content, WindowContent::Folder);

        reduce_desktop(
            &mut state,
            DesktopAction::OpenFolder {
                folder_id: "missing".to_string(),
            },
        );
        assert_eq!(state.windows.len(), 1);
    }

    #[test]
    fn deleting_a_folder_closes_its_window_and_frees_its_cell() {
        let mut state = DesktopState::default();
        let window_id = WindowId::folder("documents");
        reduce_desktop(
            &mut state,
            DesktopAction::DropIcon {
                icon_id: "documents".to_string(),
                x: 750.0,
                y: 440.0,
                metrics: metrics(),
            },
        );
        reduce_desktop(
            &mut state,
            DesktopAction::OpenFolder {
                folder_id: "documents".to_string(),
            },
        );
        assert!(state.windows.contains(&window_id));

        let effects = reduce_desktop(
            &mut state,
            DesktopAction::DeleteFolder {
                folder_id: "documents".to_string(),
            },
        );

        assert_eq!(effects, vec![RuntimeEffect::PersistIconLayout]);
        assert!(state.files.folder("documents").is_none());
        assert!(!state.windows.contains(&window_id));
        assert!(!state.icons.is_occupied(GridCell::new(6, 3), None));

        let effects = reduce_desktop(
            &mut state,
            DesktopAction::DropIcon {
                icon_id: "about".to_string(),
                x: 750.0,
                y: 440.0,
                metrics: metrics(),
            },
        );
        assert_eq!(
            effects[0],
            RuntimeEffect::IconPlaced {
                icon_id: "about".to_string(),
                placement: Placement::Placed(GridCell::new(6, 3)),
            }
        );
    }

    #[test]
    fn deleting_an_unmoved_folder_needs_no_write() {
        let mut state = DesktopState::default();
        let effects = reduce_desktop(
            &mut state,
            DesktopAction::DeleteFolder {
                folder_id: "documents".to_string(),
            },
        );
        assert!(effects.is_empty());
        assert!(state.files.folders().is_empty());

        let effects = reduce_desktop(
            &mut state,
            DesktopAction::DeleteFolder {
                folder_id: "documents".to_string(),
            },
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn trash_actions_update_file_system() {
        let mut state = DesktopState::default();
        let seeded = state.files.trash().len();
        assert!(seeded > 0);

        reduce_desktop(
            &mut state,
            DesktopAction::MoveToTrash {
                item: FileItem::new_file("tmp", "scratch.txt"),
            },
        );
        assert_eq!(state.files.trash().len(), seeded + 1);

        reduce_desktop(
            &mut state,
            DesktopAction::RestoreFromTrash {
                item_id: "tmp".to_string(),
            },
        );
        assert_eq!(state.files.trash().len(), seeded);

        reduce_desktop(&mut state, DesktopAction::EmptyTrash);
        assert!(state.files.trash().is_empty());
    }
}
