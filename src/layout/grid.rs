// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Occupancy grid: a discretized collision map of the padded node boxes.
//!
//! Only boxes occupy cells. Routed lines never mark the grid, so lines may
//! cross each other but snapped waypoints keep clear of boxes.

use std::collections::BTreeSet;

use crate::model::geometry::{Point, Rect};
use crate::model::node::NodeRegistry;

/// Dense bitmaps larger than this fall back to scanning the box spans.
const MAX_DENSE_CELLS: usize = 1 << 22;

/// Integer cell coordinate: `floor(x / cell_size)`, `floor(y / cell_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Inclusive cell rectangle covered by one padded box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellSpan {
    min: Cell,
    max: Cell,
}

impl CellSpan {
    fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DenseBounds {
    min_x: i32,
    min_y: i32,
    width: usize,
    height: usize,
}

impl DenseBounds {
    fn idx_of(&self, cell: Cell) -> Option<usize> {
        let x = cell.x - self.min_x;
        let y = cell.y - self.min_y;
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    fn cell_of(&self, idx: usize) -> Cell {
        let x = (idx % self.width) as i32 + self.min_x;
        let y = (idx / self.width) as i32 + self.min_y;
        Cell::new(x, y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    cell_size: f64,
    spans: Vec<CellSpan>,
    dense: Option<(DenseBounds, Vec<u8>)>,
}

impl OccupancyGrid {
    /// Marks every cell intersecting a node box expanded by `padding`.
    pub fn build(nodes: &NodeRegistry, padding: f64, cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 { cell_size } else { 1.0 };
        let spans = nodes
            .iter()
            .map(|node| cell_span(&node.rect().padded(padding), cell_size))
            .collect::<Vec<_>>();

        let dense = dense_bitmap(&spans);
        if dense.is_none() && !spans.is_empty() {
            tracing::debug!(boxes = spans.len(), "occupancy grid too large for a bitmap");
        }

        Self { cell_size, spans, dense }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn cell_of(&self, x: f64, y: f64) -> Cell {
        Cell::new(to_cell(x, self.cell_size), to_cell(y, self.cell_size))
    }

    pub fn cell_center(&self, cell: Cell) -> Point {
        Point::new(
            (f64::from(cell.x) + 0.5) * self.cell_size,
            (f64::from(cell.y) + 0.5) * self.cell_size,
        )
    }

    pub fn is_cell_free(&self, cell: Cell) -> bool {
        match &self.dense {
            Some((bounds, bits)) => bounds.idx_of(cell).map_or(true, |idx| bits[idx] == 0),
            None => !self.spans.iter().any(|span| span.contains(cell)),
        }
    }

    pub fn is_free(&self, x: f64, y: f64) -> bool {
        self.is_cell_free(self.cell_of(x, y))
    }

    /// All occupied cells.
    pub fn occupied_cells(&self) -> BTreeSet<Cell> {
        match &self.dense {
            Some((bounds, bits)) => bits
                .iter()
                .enumerate()
                .filter(|(_, bit)| **bit != 0)
                .map(|(idx, _)| bounds.cell_of(idx))
                .collect(),
            None => {
                let mut cells = BTreeSet::new();
                for span in &self.spans {
                    for y in span.min.y..=span.max.y {
                        for x in span.min.x..=span.max.x {
                            cells.insert(Cell::new(x, y));
                        }
                    }
                }
                cells
            }
        }
    }

    /// Nearest free position to `(x, y)`.
    ///
    /// A point already on a free cell is returned unchanged. Otherwise Chebyshev
    /// rings of growing radius are scanned and the free cell centre closest to
    /// the point within the first ring that has one wins (ties: row-major scan
    /// order). Nothing free within `max_radius` returns the point unchanged.
    pub fn nearest_free(&self, x: f64, y: f64, max_radius: u32) -> Point {
        let origin = self.cell_of(x, y);
        let point = Point::new(x, y);
        if self.is_cell_free(origin) {
            return point;
        }

        let max_radius = max_radius.min(i32::MAX as u32) as i32;
        for radius in 1..=max_radius {
            let mut best: Option<(f64, Point)> = None;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx.abs() != radius && dy.abs() != radius {
                        continue;
                    }
                    let cell = origin.offset(dx, dy);
                    if !self.is_cell_free(cell) {
                        continue;
                    }
                    let center = self.cell_center(cell);
                    let dist = (center.x - x).powi(2) + (center.y - y).powi(2);
                    if best.map_or(true, |(best_dist, _)| dist < best_dist) {
                        best = Some((dist, center));
                    }
                }
            }
            if let Some((_, center)) = best {
                return center;
            }
        }

        tracing::debug!(x, y, max_radius, "no free cell near waypoint");
        point
    }

    /// Nearest free row for the cell column under `x`, alternating above and
    /// below the desired row. Keeps `x`; exhaustion returns the input unchanged.
    pub fn nearest_free_row_in_column(&self, x: f64, y: f64, max_search: u32) -> Point {
        let origin = self.cell_of(x, y);
        if self.is_cell_free(origin) {
            return Point::new(x, y);
        }

        let free_row = alternating_rows(origin.y, max_search)
            .find(|&row| self.is_cell_free(Cell::new(origin.x, row)));
        match free_row {
            Some(row) => Point::new(x, self.cell_center(Cell::new(origin.x, row)).y),
            None => {
                tracing::debug!(x, y, max_search, "no free row in column");
                Point::new(x, y)
            }
        }
    }

    /// Whether every cell of the horizontal band at `y` between `x0` and `x1` is free.
    pub fn is_row_band_free(&self, y: f64, x0: f64, x1: f64) -> bool {
        let row = to_cell(y, self.cell_size);
        self.is_cell_row_band_free(row, x0, x1)
    }

    fn is_cell_row_band_free(&self, row: i32, x0: f64, x1: f64) -> bool {
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (lo, hi) = (to_cell(lo, self.cell_size), to_cell(hi, self.cell_size));
        (lo..=hi).all(|col| self.is_cell_free(Cell::new(col, row)))
    }

    /// Like [`Self::nearest_free_row_in_column`] but the whole band between
    /// `x0` and `x1` must be free. `None` when nothing qualifies.
    pub fn nearest_clear_row(&self, y: f64, x0: f64, x1: f64, max_search: u32) -> Option<f64> {
        if self.is_row_band_free(y, x0, x1) {
            return Some(y);
        }
        let origin = to_cell(y, self.cell_size);
        alternating_rows(origin, max_search)
            .find(|&row| self.is_cell_row_band_free(row, x0, x1))
            .map(|row| (f64::from(row) + 0.5) * self.cell_size)
    }
}

fn to_cell(value: f64, cell_size: f64) -> i32 {
    clamp_cell((value / cell_size).floor())
}

/// First cell index at or after `value`; `to_cell` rounding up.
fn to_cell_ceil(value: f64, cell_size: f64) -> i32 {
    clamp_cell((value / cell_size).ceil())
}

fn clamp_cell(cell: f64) -> i32 {
    cell.clamp(f64::from(i32::MIN / 2), f64::from(i32::MAX / 2)) as i32
}

fn cell_span(rect: &Rect, cell_size: f64) -> CellSpan {
    let min = Cell::new(to_cell(rect.x, cell_size), to_cell(rect.y, cell_size));
    // A box ending exactly on a cell boundary does not reach into the next cell.
    let max_x = (to_cell_ceil(rect.right(), cell_size) - 1).max(min.x);
    let max_y = (to_cell_ceil(rect.bottom(), cell_size) - 1).max(min.y);
    CellSpan { min, max: Cell::new(max_x, max_y) }
}

fn dense_bitmap(spans: &[CellSpan]) -> Option<(DenseBounds, Vec<u8>)> {
    let first = spans.first()?;
    let (mut min, mut max) = (first.min, first.max);
    for span in spans {
        min = Cell::new(min.x.min(span.min.x), min.y.min(span.min.y));
        max = Cell::new(max.x.max(span.max.x), max.y.max(span.max.y));
    }

    let width = usize::try_from(i64::from(max.x) - i64::from(min.x) + 1).ok()?;
    let height = usize::try_from(i64::from(max.y) - i64::from(min.y) + 1).ok()?;
    let len = width.checked_mul(height).filter(|len| *len <= MAX_DENSE_CELLS)?;

    let bounds = DenseBounds { min_x: min.x, min_y: min.y, width, height };
    let mut bits = vec![0u8; len];
    for span in spans {
        for y in span.min.y..=span.max.y {
            for x in span.min.x..=span.max.x {
                if let Some(idx) = bounds.idx_of(Cell::new(x, y)) {
                    bits[idx] = 1;
                }
            }
        }
    }
    Some((bounds, bits))
}

/// `origin-1, origin+1, origin-2, origin+2, ...` up to `max_search` rows away.
fn alternating_rows(origin: i32, max_search: u32) -> impl Iterator<Item = i32> {
    let max_search = max_search.min(i32::MAX as u32) as i32;
    (1..=max_search).flat_map(move |k| [origin.saturating_sub(k), origin.saturating_add(k)])
}
