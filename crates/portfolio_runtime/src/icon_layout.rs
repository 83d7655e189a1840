//! Desktop icon placement: pixel/grid conversion, collision-free cell search, and the
//! in-memory position map.
//!
//! Nothing in this module touches storage. Callers persist through [`crate::persistence`] after
//! mutating.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default edge length of one grid cell, in pixels.
pub const DEFAULT_GRID_SIZE: u32 = 120;
/// Largest ring radius scanned by [`IconPositions::find_nearest_empty_cell`].
pub const MAX_SEARCH_RADIUS: i32 = 10;

/// One cell of the desktop icon grid, counted from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCell {
    /// Column index.
    pub grid_x: i32,
    /// Row index.
    pub grid_y: i32,
}

impl GridCell {
    /// Creates a cell from its column and row.
    pub const fn new(grid_x: i32, grid_y: i32) -> Self {
        Self { grid_x, grid_y }
    }

    fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.grid_x + dx, self.grid_y + dy)
    }

    fn is_on_desktop(self) -> bool {
        self.grid_x >= 0 && self.grid_y >= 0
    }
}

/// Stored placement of one icon. The cell is authoritative; `x`/`y` cache its pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconPosition {
    /// Cached left edge in pixels.
    pub x: f64,
    /// Cached top edge in pixels.
    pub y: f64,
    /// Column of the stored cell.
    pub grid_x: i32,
    /// Row of the stored cell.
    pub grid_y: i32,
}

impl IconPosition {
    /// The authoritative grid cell.
    pub fn cell(&self) -> GridCell {
        GridCell::new(self.grid_x, self.grid_y)
    }
}

/// Outcome of a nearest-free-cell search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The returned cell is free.
    Placed(GridCell),
    /// Every cell within [`MAX_SEARCH_RADIUS`] is taken; carries the requested (occupied) cell.
    NoSpaceFound(GridCell),
}

impl Placement {
    /// The cell to use: the free cell, or the overlapping target when no space was found.
    pub fn cell(self) -> GridCell {
        match self {
            Self::Placed(cell) | Self::NoSpaceFound(cell) => cell,
        }
    }

    /// Returns `true` when a free cell was found.
    pub fn is_placed(self) -> bool {
        matches!(self, Self::Placed(_))
    }
}

/// Whether icons are laid out for a phone-sized or a desktop-sized screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Wide screens: fixed-size cells in a single first row.
    Desktop,
    /// Narrow screens: smaller cells in a three-column grid.
    Mobile,
}

/// Grid metrics loaded from the desktop catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconGridConfig {
    /// Desktop cell edge, also the snapping unit of [`IconPositions::pixel_to_grid`].
    pub cell_size: u32,
    pub padding_x: f64,
    pub padding_y: f64,
    /// Viewports narrower than this use [`LayoutMode::Mobile`].
    pub mobile_breakpoint: f64,
    /// Upper bound of the mobile cell edge.
    pub mobile_max_cell_size: f64,
    pub mobile_columns: u32,
    /// Horizontal space not available to mobile columns.
    pub mobile_gutter: f64,
    pub mobile_padding_x: f64,
    pub mobile_padding_y: f64,
}

impl IconGridConfig {
    /// Picks the layout for a screen `viewport_width` pixels wide.
    pub fn layout_mode(&self, viewport_width: f64) -> LayoutMode {
        if viewport_width < self.mobile_breakpoint {
            LayoutMode::Mobile
        } else {
            LayoutMode::Desktop
        }
    }

    /// Metrics used to draw and snap icons on a screen `viewport_width` pixels wide.
    ///
    /// Mobile layouts shrink the cell so that `mobile_columns` icons fit across.
    pub fn metrics_for_width(&self, viewport_width: f64) -> GridMetrics {
        match self.layout_mode(viewport_width) {
            LayoutMode::Desktop => GridMetrics {
                cell_size: f64::from(self.cell_size),
                padding_x: self.padding_x,
                padding_y: self.padding_y,
            },
            LayoutMode::Mobile => GridMetrics {
                cell_size: self.mobile_max_cell_size.min(
                    (viewport_width - self.mobile_gutter) / f64::from(self.mobile_columns),
                ),
                padding_x: self.mobile_padding_x,
                padding_y: self.mobile_padding_y,
            },
        }
    }
}

/// Pixel geometry of the icon grid on the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    pub cell_size: f64,
    pub padding_x: f64,
    pub padding_y: f64,
}

impl GridMetrics {
    /// Top-left pixel of `cell`, padding included.
    pub fn cell_origin(&self, cell: GridCell) -> (f64, f64) {
        (
            f64::from(cell.grid_x) * self.cell_size + self.padding_x,
            f64::from(cell.grid_y) * self.cell_size + self.padding_y,
        )
    }

    /// Cell whose origin is nearest to the pixel (`x`, `y`), padding included.
    pub fn snap(&self, x: f64, y: f64) -> GridCell {
        GridCell::new(
            round_half_up((x - self.padding_x) / self.cell_size),
            round_half_up((y - self.padding_y) / self.cell_size),
        )
    }
}

// Halves round toward positive infinity (-0.5 -> 0, 2.5 -> 3), unlike `f64::round`.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Stored icon placements keyed by icon id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconPositions {
    positions: BTreeMap<String, IconPosition>,
    grid_size: u32,
}

impl Default for IconPositions {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

impl IconPositions {
    /// An empty map snapping with `grid_size` pixel cells (at least 1).
    pub fn new(grid_size: u32) -> Self {
        Self {
            positions: BTreeMap::new(),
            grid_size: grid_size.max(1),
        }
    }

    pub(crate) fn from_parts(grid_size: u32, positions: BTreeMap<String, IconPosition>) -> Self {
        Self {
            positions,
            grid_size: grid_size.max(1),
        }
    }

    /// Edge length of one cell in pixels.
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Every stored placement keyed by icon id.
    pub fn positions(&self) -> &BTreeMap<String, IconPosition> {
        &self.positions
    }

    /// Returns `true` when no icon was ever moved (or all were reset).
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Snaps a pixel coordinate to the nearest grid cell.
    pub fn pixel_to_grid(&self, x: f64, y: f64) -> GridCell {
        let size = f64::from(self.grid_size);
        GridCell::new(round_half_up(x / size), round_half_up(y / size))
    }

    /// Returns `true` when an icon other than `excluding` sits in `cell`.
    pub fn is_occupied(&self, cell: GridCell, excluding: Option<&str>) -> bool {
        self.positions
            .iter()
            .any(|(id, pos)| Some(id.as_str()) != excluding && pos.cell() == cell)
    }

    /// Finds the free cell closest to `target`, scanning outward in square rings.
    ///
    /// Ring `r` covers only the cells with `max(|dx|, |dy|) == r`, visited with `dx` ascending
    /// and `dy` ascending within each column. Cells left of or above the origin are skipped.
    pub fn find_nearest_empty_cell(&self, target: GridCell, excluding: Option<&str>) -> Placement {
        if !self.is_occupied(target, excluding) {
            return Placement::Placed(target);
        }

        for radius in 1..=MAX_SEARCH_RADIUS {
            for dx in -radius..=radius {
                for dy in -radius..=radius {
                    if dx.abs() != radius && dy.abs() != radius {
                        continue;
                    }
                    let cell = target.offset(dx, dy);
                    if cell.is_on_desktop() && !self.is_occupied(cell, excluding) {
                        return Placement::Placed(cell);
                    }
                }
            }
        }

        Placement::NoSpaceFound(target)
    }

    /// Stores `position` for `id`, replacing any previous entry. Collisions are not checked.
    pub fn update_position(&mut self, id: impl Into<String>, position: IconPosition) {
        self.positions.insert(id.into(), position);
    }

    /// The stored placement for `id`, or `None` when the icon sits at its default cell.
    pub fn position(&self, id: &str) -> Option<&IconPosition> {
        self.positions.get(id)
    }

    /// The stored cell for `id`, or `default` when the icon was never moved.
    pub fn cell_or(&self, id: &str, default: GridCell) -> GridCell {
        self.position(id).map_or(default, IconPosition::cell)
    }

    /// Drops the stored placement for `id`, returning it when one existed.
    ///
    /// Used when the icon itself goes away so its cell no longer counts as occupied.
    pub fn remove(&mut self, id: &str) -> Option<IconPosition> {
        self.positions.remove(id)
    }

    /// Forgets every stored placement so icons return to their default layout.
    pub fn reset(&mut self) {
        self.positions.clear();
    }

    /// Completes an icon drag released at pixel (`x`, `y`).
    ///
    /// The drop point is snapped with `metrics`, moved to the nearest free cell, and stored along
    /// with the pixel origin of the resolved cell.
    pub fn drop_icon(&mut self, id: &str, x: f64, y: f64, metrics: GridMetrics) -> Placement {
        let target = metrics.snap(x, y);
        let placement = self.find_nearest_empty_cell(target, Some(id));
        let cell = placement.cell();
        let (px, py) = metrics.cell_origin(cell);
        self.update_position(
            id,
            IconPosition {
                x: px,
                y: py,
                grid_x: cell.grid_x,
                grid_y: cell.grid_y,
            },
        );
        placement
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(cell: GridCell) -> IconPosition {
        IconPosition {
            x: f64::from(cell.grid_x * 120),
            y: f64::from(cell.grid_y * 120),
            grid_x: cell.grid_x,
            grid_y: cell.grid_y,
        }
    }

    fn desktop_metrics() -> GridMetrics {
        GridMetrics {
            cell_size: 120.0,
            padding_x: 30.0,
            padding_y: 80.0,
        }
    }

    fn ring_distance(a: GridCell, b: GridCell) -> i32 {
        (a.grid_x - b.grid_x).abs().max((a.grid_y - b.grid_y).abs())
    }

    #[test]
    fn pixel_to_grid_snaps_multiples_exactly() {
        let icons = IconPositions::default();
        for k in -3..=12 {
            let px = f64::from(k * 120);
            assert_eq!(icons.pixel_to_grid(px, px), GridCell::new(k, k));
        }
    }

    #[test]
    fn pixel_to_grid_rounds_halves_up() {
        let icons = IconPositions::default();
        assert_eq!(icons.pixel_to_grid(59.0, 61.0), GridCell::new(0, 1));
        assert_eq!(icons.pixel_to_grid(60.0, -60.0), GridCell::new(1, 0));
        assert_eq!(icons.pixel_to_grid(299.0, 300.0), GridCell::new(2, 3));
    }

    #[test]
    fn occupancy_ignores_excluded_icon() {
        let mut icons = IconPositions::default();
        icons.update_position("about", at(GridCell::new(2, 1)));

        assert!(icons.is_occupied(GridCell::new(2, 1), None));
        assert!(icons.is_occupied(GridCell::new(2, 1), Some("projects")));
        assert!(!icons.is_occupied(GridCell::new(2, 1), Some("about")));
        assert!(!icons.is_occupied(GridCell::new(1, 2), None));
    }

    #[test]
    fn free_target_is_returned_unchanged() {
        let mut icons = IconPositions::default();
        icons.update_position("about", at(GridCell::new(0, 0)));
        assert_eq!(
            icons.find_nearest_empty_cell(GridCell::new(4, 4), None),
            Placement::Placed(GridCell::new(4, 4))
        );
    }

    #[test]
    fn collision_resolves_to_adjacent_free_cell_in_scan_order() {
        let mut icons = IconPositions::default();
        icons.update_position("about", at(GridCell::new(0, 0)));
        icons.update_position("projects", at(GridCell::new(1, 0)));

        let placement = icons.find_nearest_empty_cell(GridCell::new(0, 0), Some("contact"));
        assert_eq!(placement, Placement::Placed(GridCell::new(0, 1)));
    }

    #[test]
    fn interior_search_visits_lower_columns_first() {
        let mut icons = IconPositions::default();
        icons.update_position("a", at(GridCell::new(5, 5)));

        // Ring one starts at (4, 4).
        assert_eq!(
            icons.find_nearest_empty_cell(GridCell::new(5, 5), None),
            Placement::Placed(GridCell::new(4, 4))
        );
    }

    #[test]
    fn search_finds_a_nearest_ring_cell() {
        let mut icons = IconPositions::default();
        let target = GridCell::new(6, 6);
        // Fill target plus rings one and two, except a single ring-two gap.
        let gap = GridCell::new(8, 5);
        for x in 4..=8 {
            for y in 4..=8 {
                let cell = GridCell::new(x, y);
                if cell != gap {
                    icons.update_position(format!("icon-{x}-{y}"), at(cell));
                }
            }
        }

        let placement = icons.find_nearest_empty_cell(target, None);
        assert_eq!(placement, Placement::Placed(gap));
        assert_eq!(ring_distance(placement.cell(), target), 2);
    }

    #[test]
    fn negative_cells_are_never_offered() {
        let mut icons = IconPositions::default();
        icons.update_position("a", at(GridCell::new(0, 0)));
        let cell = icons
            .find_nearest_empty_cell(GridCell::new(0, 0), None)
            .cell();
        assert!(cell.grid_x >= 0 && cell.grid_y >= 0);
    }

    #[test]
    fn saturated_neighbourhood_reports_no_space() {
        let mut icons = IconPositions::default();
        let target = GridCell::new(10, 10);
        for x in 0..=20 {
            for y in 0..=20 {
                icons.update_position(format!("icon-{x}-{y}"), at(GridCell::new(x, y)));
            }
        }

        let placement = icons.find_nearest_empty_cell(target, None);
        assert_eq!(placement, Placement::NoSpaceFound(target));
        assert_eq!(placement.cell(), target);
        assert!(!placement.is_placed());
    }

    #[test]
    fn reset_forgets_every_icon() {
        let mut icons = IconPositions::default();
        icons.update_position("about", at(GridCell::new(3, 3)));
        icons.reset();

        assert!(icons.position("about").is_none());
        assert_eq!(
            icons.cell_or("about", GridCell::new(0, 0)),
            GridCell::new(0, 0)
        );
    }

    #[test]
    fn removed_icon_frees_its_cell() {
        let mut icons = IconPositions::default();
        icons.update_position("documents", at(GridCell::new(6, 3)));

        assert_eq!(icons.remove("documents"), Some(at(GridCell::new(6, 3))));
        assert_eq!(icons.remove("documents"), None);
        assert!(!icons.is_occupied(GridCell::new(6, 3), None));
    }

    #[test]
    fn drop_icon_snaps_resolves_and_caches_pixels() {
        let mut icons = IconPositions::default();
        icons.update_position("about", at(GridCell::new(0, 0)));

        // Dropped right on top of "about" at cell (0, 0).
        let placement = icons.drop_icon("projects", 35.0, 90.0, desktop_metrics());
        assert_eq!(placement, Placement::Placed(GridCell::new(0, 1)));
        assert_eq!(
            icons.position("projects"),
            Some(&IconPosition {
                x: 30.0,
                y: 200.0,
                grid_x: 0,
                grid_y: 1,
            })
        );
    }

    #[test]
    fn dropping_an_icon_onto_its_own_cell_keeps_it() {
        let mut icons = IconPositions::default();
        icons.drop_icon("about", 150.0, 80.0, desktop_metrics());
        let placement = icons.drop_icon("about", 160.0, 90.0, desktop_metrics());
        assert_eq!(placement, Placement::Placed(GridCell::new(1, 0)));
    }

    #[test]
    fn mobile_metrics_fit_three_columns() {
        let config = IconGridConfig {
            cell_size: 120,
            padding_x: 30.0,
            padding_y: 80.0,
            mobile_breakpoint: 768.0,
            mobile_max_cell_size: 110.0,
            mobile_columns: 3,
            mobile_gutter: 60.0,
            mobile_padding_x: 20.0,
            mobile_padding_y: 70.0,
        };

        assert_eq!(config.layout_mode(1024.0), LayoutMode::Desktop);
        assert_eq!(config.metrics_for_width(1024.0), desktop_metrics());

        let narrow = config.metrics_for_width(330.0);
        assert_eq!(narrow.cell_size, 90.0);
        assert_eq!(narrow.padding_x, 20.0);

        let wide_phone = config.metrics_for_width(600.0);
        assert_eq!(wide_phone.cell_size, 110.0);
    }
}
