//! Open-window collection with counter-based stacking, plus caller-side drag/resize geometry.
//!
//! Focus-to-front is O(1): raising a window hands it the next value of a single counter instead
//! of reordering the collection. The counter only grows and resets with the manager.

use serde::{Deserialize, Serialize};

use crate::model::{
    OpenWindowRequest, Viewport, WindowFrame, WindowId, WindowPosition, WindowRecord, WindowSize,
};

/// Stacking counter value of a freshly constructed manager.
pub const INITIAL_Z_INDEX: u64 = 100;

/// Viewports narrower than this use the mobile window bounds.
pub const MOBILE_BREAKPOINT: i32 = 768;
/// Smallest width a desktop window can be resized to.
pub const DESKTOP_MIN_WIDTH: i32 = 400;
/// Smallest height a desktop window can be resized to.
pub const DESKTOP_MIN_HEIGHT: i32 = 300;
/// Vertical space reserved for the top bar and dock on desktop layouts.
pub const DESKTOP_RESERVED_HEIGHT: i32 = 120;
/// Vertical space reserved for the top bar and dock on mobile layouts.
pub const MOBILE_RESERVED_HEIGHT: i32 = 112;
/// Dragged windows never start above the top bar.
pub const DRAG_MIN_Y: i32 = 56;
/// Horizontal strip of a dragged window that must stay inside the viewport.
pub const DRAG_VISIBLE_WIDTH: i32 = 100;
/// Vertical strip of a dragged window that must stay inside the viewport.
pub const DRAG_VISIBLE_HEIGHT: i32 = 150;

/// Open windows in open order plus the stacking counter.
///
/// One manager exists per desktop; construct it explicitly and hand it to the state owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    max_z_index: u64,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager {
    /// An empty manager whose counter starts at [`INITIAL_Z_INDEX`].
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            max_z_index: INITIAL_Z_INDEX,
        }
    }

    fn next_z_index(&mut self) -> u64 {
        self.max_z_index += 1;
        self.max_z_index
    }

    fn find_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| &w.id == id)
    }

    /// Opens a window, or un-minimizes and raises the existing window with the same id.
    ///
    /// A re-opened window keeps its current title and geometry; the request only supplies them
    /// for a window that is not open yet.
    pub fn open(&mut self, request: OpenWindowRequest) {
        let z_index = self.next_z_index();
        if let Some(existing) = self.find_mut(&request.id) {
            existing.minimized = false;
            existing.z_index = z_index;
            return;
        }
        self.windows.push(request.into_record(z_index));
    }

    /// Removes the window. Its geometry is not remembered for the next open.
    pub fn close(&mut self, id: &WindowId) {
        self.windows.retain(|w| &w.id != id);
    }

    /// Flips the minimized flag without touching the stacking order.
    pub fn toggle_minimize(&mut self, id: &WindowId) {
        if let Some(window) = self.find_mut(id) {
            window.minimized = !window.minimized;
        }
    }

    /// Flips the maximized flag; the stored geometry is kept for un-maximizing.
    pub fn toggle_maximize(&mut self, id: &WindowId) {
        if let Some(window) = self.find_mut(id) {
            window.maximized = !window.maximized;
        }
    }

    /// Raises `id` above every other window.
    ///
    /// Always consumes one counter value, even for the topmost or an unknown window.
    pub fn focus(&mut self, id: &WindowId) {
        let z_index = self.next_z_index();
        if let Some(window) = self.find_mut(id) {
            window.z_index = z_index;
        }
    }

    /// Overwrites the stored position. No clamping happens here.
    pub fn update_position(&mut self, id: &WindowId, position: WindowPosition) {
        if let Some(window) = self.find_mut(id) {
            window.position = position;
        }
    }

    /// Overwrites the stored size. No clamping happens here.
    pub fn update_size(&mut self, id: &WindowId, size: WindowSize) {
        if let Some(window) = self.find_mut(id) {
            window.size = size;
        }
    }

    /// Windows in the order they were opened (taskbar order).
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    /// The window with `id`, if open.
    pub fn get(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == id)
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The last stacking value handed out.
    pub fn max_z_index(&self) -> u64 {
        self.max_z_index
    }

    /// The window with the highest stacking value, minimized or not.
    pub fn top_window(&self) -> Option<&WindowRecord> {
        self.windows.iter().max_by_key(|w| w.z_index)
    }

    /// The visible window drawn on top of all others.
    pub fn focused_window(&self) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
    }

    /// Windows sorted back-to-front.
    pub fn stacked(&self) -> Vec<&WindowRecord> {
        let mut stack: Vec<_> = self.windows.iter().collect();
        stack.sort_by_key(|w| w.z_index);
        stack
    }
}

/// Edge or corner grabbed during a resize drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    fn moves_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    fn moves_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    fn moves_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    fn moves_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }
}

/// Size limits for user-driven resizing in a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub min: WindowSize,
    pub max: WindowSize,
}

impl WindowBounds {
    /// Desktop viewports allow 400x300 up to the area between top bar and dock. Mobile
    /// viewports pin windows to that area.
    pub fn for_viewport(viewport: Viewport) -> Self {
        if viewport.width < MOBILE_BREAKPOINT {
            let usable_height = viewport.height - MOBILE_RESERVED_HEIGHT;
            Self {
                min: WindowSize {
                    width: viewport.width,
                    height: usable_height,
                },
                max: WindowSize {
                    width: viewport.width,
                    height: usable_height,
                },
            }
        } else {
            Self {
                min: WindowSize {
                    width: DESKTOP_MIN_WIDTH,
                    height: DESKTOP_MIN_HEIGHT,
                },
                max: WindowSize {
                    width: viewport.width.max(DESKTOP_MIN_WIDTH),
                    height: (viewport.height - DESKTOP_RESERVED_HEIGHT).max(DESKTOP_MIN_HEIGHT),
                },
            }
        }
    }
}

/// Keeps a dragged window's grab strip inside the viewport and below the top bar.
pub fn clamp_drag_position(desired: WindowPosition, viewport: Viewport) -> WindowPosition {
    let max_x = (viewport.width - DRAG_VISIBLE_WIDTH).max(0);
    let max_y = (viewport.height - DRAG_VISIBLE_HEIGHT).max(DRAG_MIN_Y);
    WindowPosition {
        x: desired.x.clamp(0, max_x),
        y: desired.y.clamp(DRAG_MIN_Y, max_y),
    }
}

/// Applies a resize drag of (`dx`, `dy`) pixels, measured from the drag start, to `start`.
///
/// Growing edges clamp to `bounds`. Shrinking from the west or north never goes below the
/// minimum size and keeps the opposite edge anchored.
pub fn resize_frame(
    start: WindowFrame,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    bounds: WindowBounds,
) -> WindowFrame {
    let mut frame = start;

    if edge.moves_east() {
        frame.size.width = (start.size.width + dx).clamp(bounds.min.width, bounds.max.width);
    } else if edge.moves_west() {
        let width = (start.size.width - dx).max(bounds.min.width);
        frame.position.x = start.position.x + start.size.width - width;
        frame.size.width = width;
    }

    if edge.moves_south() {
        frame.size.height = (start.size.height + dy).clamp(bounds.min.height, bounds.max.height);
    } else if edge.moves_north() {
        let height = (start.size.height - dy).max(bounds.min.height);
        frame.position.y = start.position.y + start.size.height - height;
        frame.size.height = height;
    }

    frame
}
