use crate::catalog::ObjectCatalog;
use crate::error::{FengShuiError, FsResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum_macros::Display;

/// Room bounds. Valid coordinates are `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> FsResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(FengShuiError::InvalidInput(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    #[inline(always)]
    pub fn min_dimension(&self) -> i32 {
        self.width.min(self.height)
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[inline(always)]
    pub fn is_edge_cell(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y)
            && (x == 0 || x == self.width - 1 || y == 0 || y == self.height - 1)
    }

    pub fn contains_rect(&self, r: &Rect) -> bool {
        r.x >= 0 && r.y >= 0 && r.right() <= self.width && r.bottom() <= self.height
    }
}

/// Top-left anchor of one object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: i32,
    pub y: i32,
}

impl Placement {
    pub fn new(kind: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            kind: kind.into(),
            x,
            y,
        }
    }

    pub fn at_origin(kind: impl Into<String>) -> Self {
        Self::new(kind, 0, 0)
    }
}

/// Axis-aligned cell rectangle, half-open on the right and bottom. Edges
/// saturate at `i32::MAX`, so a footprint anchored near the limit still
/// reads as out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline(always)]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    #[inline(always)]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Two rectangles intersect when they share at least one cell.
    #[inline(always)]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    /// Per-axis cell gap between this rectangle and a point (0 when the
    /// point lies inside the span on that axis).
    pub fn gap_to(&self, px: i32, py: i32) -> (i32, i32) {
        let gx = if px < self.x {
            self.x.saturating_sub(px)
        } else if px >= self.right() {
            px.saturating_sub(self.right() - 1)
        } else {
            0
        };
        let gy = if py < self.y {
            self.y.saturating_sub(py)
        } else if py >= self.bottom() {
            py.saturating_sub(self.bottom() - 1)
        } else {
            0
        };
        (gx, gy)
    }

    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.x..self.right()).flat_map(move |cx| (self.y..self.bottom()).map(move |cy| (cx, cy)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// Which walls a furniture footprint is flush against.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    /// Flush against one vertical and one horizontal wall.
    pub fn is_corner(&self) -> bool {
        (self.left || self.right) && (self.top || self.bottom)
    }
}

/// Furniture cells claimed by the operation currently in progress.
#[derive(Debug, Default, Clone)]
pub struct OccupiedSet {
    cells: HashSet<(i32, i32)>,
}

impl OccupiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cells.contains(&(x, y))
    }

    pub fn insert(&mut self, x: i32, y: i32) {
        self.cells.insert((x, y));
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

pub fn footprint_rect(catalog: &ObjectCatalog, kind: &str, x: i32, y: i32) -> Rect {
    let (w, h) = catalog.footprint(kind);
    Rect { x, y, w, h }
}

pub fn placement_rect(catalog: &ObjectCatalog, p: &Placement) -> Rect {
    footprint_rect(catalog, &p.kind, p.x, p.y)
}

#[inline(always)]
fn fits_vertical(grid: Grid, x: i32, y: i32, span: i32) -> bool {
    (x == 0 || x == grid.width - 1) && y.saturating_add(span) <= grid.height
}

#[inline(always)]
fn fits_horizontal(grid: Grid, x: i32, y: i32, span: i32) -> bool {
    (y == 0 || y == grid.height - 1) && x.saturating_add(span) <= grid.width
}

/// The wall a boundary anchor belongs to. On a corner cell the wall whose
/// run can hold the span wins, vertical first.
pub fn boundary_wall(catalog: &ObjectCatalog, grid: Grid, p: &Placement) -> Option<Wall> {
    if !grid.is_edge_cell(p.x, p.y) {
        return None;
    }
    let span = catalog.boundary_span(&p.kind);
    let vertical = p.x == 0 || p.x == grid.width - 1;
    let horizontal = p.y == 0 || p.y == grid.height - 1;

    let pick_vertical = if vertical && horizontal {
        fits_vertical(grid, p.x, p.y, span) || !fits_horizontal(grid, p.x, p.y, span)
    } else {
        vertical
    };

    Some(match (pick_vertical, p.x == 0, p.y == 0) {
        (true, true, _) => Wall::Left,
        (true, false, _) => Wall::Right,
        (false, _, true) => Wall::Top,
        (false, _, false) => Wall::Bottom,
    })
}

/// Visual center of a placement: the footprint center for furniture, the
/// midpoint of the span along its wall for boundaries.
pub fn placement_center(catalog: &ObjectCatalog, grid: Grid, p: &Placement) -> (f32, f32) {
    if catalog.is_boundary(&p.kind) {
        let half = catalog.boundary_span(&p.kind) as f32 / 2.0;
        return match boundary_wall(catalog, grid, p) {
            Some(Wall::Left) | Some(Wall::Right) => (p.x as f32, p.y as f32 + half),
            Some(Wall::Top) | Some(Wall::Bottom) => (p.x as f32 + half, p.y as f32),
            None => (p.x as f32, p.y as f32),
        };
    }
    placement_rect(catalog, p).center()
}

pub fn wall_contact(grid: Grid, r: &Rect) -> WallContact {
    WallContact {
        left: r.x == 0,
        right: r.right() == grid.width,
        top: r.y == 0,
        bottom: r.bottom() == grid.height,
    }
}

/// Cells between the footprint and the closest wall (0 when flush).
pub fn wall_distance(grid: Grid, r: &Rect) -> i32 {
    r.x.min(r.y)
        .min(grid.width.saturating_sub(r.right()))
        .min(grid.height.saturating_sub(r.bottom()))
        .max(0)
}

#[inline(always)]
pub fn euclidean(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Bounds and wall-anchoring rule for a single object. Unknown types are
/// never valid.
pub fn is_position_valid(catalog: &ObjectCatalog, grid: Grid, x: i32, y: i32, kind: &str) -> bool {
    if !catalog.contains(kind) {
        return false;
    }

    if catalog.is_boundary(kind) {
        if !grid.is_edge_cell(x, y) {
            return false;
        }
        let span = catalog.boundary_span(kind);
        return fits_vertical(grid, x, y, span) || fits_horizontal(grid, x, y, span);
    }

    grid.contains_rect(&footprint_rect(catalog, kind, x, y))
}

/// True when a furniture footprint would land on an occupied cell.
/// Boundaries never collide.
pub fn check_object_collision(
    catalog: &ObjectCatalog,
    x: i32,
    y: i32,
    kind: &str,
    occupied: &OccupiedSet,
) -> bool {
    if catalog.is_boundary(kind) {
        return false;
    }
    footprint_rect(catalog, kind, x, y)
        .cells()
        .any(|(cx, cy)| occupied.contains(cx, cy))
}

pub fn add_occupied_positions(
    catalog: &ObjectCatalog,
    x: i32,
    y: i32,
    kind: &str,
    occupied: &mut OccupiedSet,
) {
    if catalog.is_boundary(kind) {
        return;
    }
    for (cx, cy) in footprint_rect(catalog, kind, x, y).cells() {
        occupied.insert(cx, cy);
    }
}

/// Bounding-box intersection of two furniture placements.
pub fn objects_overlap(catalog: &ObjectCatalog, a: &Placement, b: &Placement) -> bool {
    if catalog.is_boundary(&a.kind) || catalog.is_boundary(&b.kind) {
        return false;
    }
    placement_rect(catalog, a).intersects(&placement_rect(catalog, b))
}

/// Every placement valid and no furniture cell claimed twice.
pub fn is_layout_valid(catalog: &ObjectCatalog, grid: Grid, placements: &[Placement]) -> bool {
    let mut occupied = OccupiedSet::new();
    for p in placements {
        if !is_position_valid(catalog, grid, p.x, p.y, &p.kind)
            || check_object_collision(catalog, p.x, p.y, &p.kind, &occupied)
        {
            return false;
        }
        add_occupied_positions(catalog, p.x, p.y, &p.kind, &mut occupied);
    }
    true
}
