//! Desktop runtime for the portfolio desktop: window stacking, icon grid placement, folders and
//! trash, the reducer that owns them, and the Leptos provider that wires it to host services.

pub mod apps;
pub mod file_system;
pub mod icon_layout;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod window_manager;

pub use apps::{desktop_icons, DesktopIcon, DesktopIconTarget};
pub use file_system::{FileItem, FileKind, FileSystem, Folder};
pub use icon_layout::{GridCell, GridMetrics, IconPosition, IconPositions, LayoutMode, Placement};
pub use model::*;
pub use persistence::{load_icon_layout, persist_icon_layout, PersistenceError};
pub use reducer::{reduce_desktop, DesktopAction, DesktopState, RuntimeEffect};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use window_manager::{clamp_drag_position, resize_frame, ResizeEdge, WindowBounds, WindowManager};
