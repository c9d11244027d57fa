// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use serde::Serialize;
use smallvec::{smallvec, SmallVec};

use super::adjacency::{AdjacencyIndex, Lane};
use super::channels::Channels;
use super::grid::OccupancyGrid;
use crate::config::LayoutConfig;
use crate::model::geometry::Point;
use crate::model::ids::{CourseId, EdgeKey};
use crate::model::node::{Node, NodeRegistry};
use crate::render::overlay::is_active_edge;

/// Orthogonal polyline waypoints; routes never exceed six points.
pub type Waypoints = SmallVec<[Point; 6]>;

const SINGLE_LANE: Lane = Lane { index: 0, count: 1 };

/// Which branch of the router produced a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// Two points: short hop between nearby boxes in different columns.
    Direct,
    /// Four points: level exit and entry with a clear band between them.
    Straight,
    /// Six points through the inter-column corridor.
    Corridor,
    /// Four points looping through the gap right of a shared column.
    SameColumn,
}

/// Routing direction between the source and destination columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Destination column is to the right: exit right edge, enter left edge.
    Forward,
    /// Destination column is to the left: exit left edge, enter right edge.
    Backward,
    /// Same column: exit and enter on the right edges.
    SameColumn,
}

impl Heading {
    pub fn of(source_column: usize, dest_column: usize) -> Self {
        match dest_column.cmp(&source_column) {
            std::cmp::Ordering::Greater => Self::Forward,
            std::cmp::Ordering::Less => Self::Backward,
            std::cmp::Ordering::Equal => Self::SameColumn,
        }
    }

    fn sign(self) -> f64 {
        match self {
            Self::Forward | Self::SameColumn => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// One routed prerequisite connector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgePath {
    pub from: CourseId,
    pub to: CourseId,
    pub points: Waypoints,
    pub kind: RouteKind,
    pub active: bool,
}

impl EdgePath {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from.clone(), self.to.clone())
    }

    pub fn source_exit(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn dest_entry(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// Everything the router reads for one computation cycle.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub config: &'a LayoutConfig,
    pub nodes: &'a NodeRegistry,
    pub adjacency: &'a AdjacencyIndex,
    pub grid: &'a OccupancyGrid,
    pub channels: &'a Channels,
}

/// Point where `edge` leaves its source box.
///
/// The exit side is split into `|outgoing| + 1` equal segments and the edge
/// takes the boundary after segment `lane.index`.
pub fn exit_point(source: &Node, lane: Lane, heading: Heading) -> Point {
    let rect = source.rect();
    let y = rect.y + rect.height * lane.fraction();
    match heading {
        Heading::Forward | Heading::SameColumn => Point::new(rect.right(), y),
        Heading::Backward => Point::new(rect.x, y),
    }
}

/// Point where `edge` enters its destination box; mirror of [`exit_point`].
pub fn entry_point(dest: &Node, lane: Lane, heading: Heading) -> Point {
    let rect = dest.rect();
    let y = rect.y + rect.height * lane.fraction();
    match heading {
        Heading::Forward => Point::new(rect.x, y),
        Heading::Backward | Heading::SameColumn => Point::new(rect.right(), y),
    }
}

/// Routes one edge. `None` when either endpoint has no box in the registry.
pub fn route(
    edge: &EdgeKey,
    ctx: &RouteContext<'_>,
    active: &BTreeSet<CourseId>,
) -> Option<EdgePath> {
    let source = ctx.nodes.get(&edge.from)?;
    let dest = ctx.nodes.get(&edge.to)?;

    let heading = Heading::of(source.column(), dest.column());
    let source_lane = ctx.adjacency.source_lane(edge).unwrap_or(SINGLE_LANE);
    let dest_lane = ctx.adjacency.dest_lane(edge).unwrap_or(SINGLE_LANE);
    let exit = exit_point(source, source_lane, heading);
    let entry = entry_point(dest, dest_lane, heading);

    let (kind, points) = if heading == Heading::SameColumn {
        (RouteKind::SameColumn, same_column_route(ctx, source, exit, entry, source_lane))
    } else if is_direct(ctx.config, exit, entry) {
        (RouteKind::Direct, smallvec![exit, entry])
    } else {
        corridor_route(ctx, source, dest, heading, exit, entry, source_lane, dest_lane)
    };

    Some(EdgePath {
        from: edge.from.clone(),
        to: edge.to.clone(),
        points,
        kind,
        active: is_active_edge(edge, active),
    })
}

/// Short, tight hops are drawn as a single segment without occupancy checks.
fn is_direct(config: &LayoutConfig, exit: Point, entry: Point) -> bool {
    (entry.x - exit.x).abs() < config.direct_max_dx
        && (entry.y - exit.y).abs() < config.direct_max_dy
}

#[allow(clippy::too_many_arguments)]
fn corridor_route(
    ctx: &RouteContext<'_>,
    source: &Node,
    dest: &Node,
    heading: Heading,
    exit: Point,
    entry: Point,
    source_lane: Lane,
    dest_lane: Lane,
) -> (RouteKind, Waypoints) {
    let config = ctx.config;
    let grid = ctx.grid;
    let sign = heading.sign();

    let gap = match heading {
        Heading::Forward => ctx.channels.gap_after(source.column()),
        Heading::Backward => ctx.channels.gap_before(source.column()),
        Heading::SameColumn => None,
    }
    .unwrap_or(exit.x + sign * config.approach_offset);
    let corridor_limit = free_edge(ctx, source.column(), sign);
    let corridor_step = lane_step(config.lane_spacing, source_lane, gap, corridor_limit, sign);
    let corridor_x = gap + sign * corridor_step * source_lane.index as f64;

    let near_base = entry.x - sign * config.approach_offset;
    let near_limit = free_edge(ctx, dest.column(), -sign);
    let near_step = lane_step(config.lane_spacing, dest_lane, near_base, near_limit, -sign);
    let near_x = near_base - sign * near_step * dest_lane.index as f64;

    let desired_y = corridor_y(ctx.channels, source, dest, exit, entry, source_lane);
    let mut waypoint = grid.nearest_free(corridor_x, desired_y, config.snap_radius);
    if !grid.is_free(waypoint.x, waypoint.y) {
        waypoint = grid.nearest_free_row_in_column(waypoint.x, waypoint.y, config.row_search);
    }
    let corridor_x = waypoint.x;

    if (exit.y - entry.y).abs() < config.straight_epsilon {
        let clearance = config.box_padding + grid.cell_size();
        let band_start = exit.x + sign * clearance;
        let band_end = entry.x - sign * clearance;
        let band_is_empty = (band_end - band_start) * sign < 0.0;
        let band_is_free = band_is_empty
            || (grid.is_row_band_free(exit.y, band_start, corridor_x)
                && grid.is_row_band_free(entry.y, corridor_x, band_end));
        if band_is_free {
            // Any sub-epsilon step happens on the corridor line.
            let points = smallvec![
                exit,
                Point::new(corridor_x, exit.y),
                Point::new(corridor_x, entry.y),
                entry
            ];
            return (RouteKind::Straight, points);
        }
    }

    let mut run_y = waypoint.y;
    if !grid.is_row_band_free(run_y, corridor_x, near_x) {
        match grid.nearest_clear_row(run_y, corridor_x, near_x, config.row_search) {
            Some(y) => run_y = y,
            None => {
                tracing::debug!(from = %source.id(), to = %dest.id(), "corridor run crosses boxes");
            }
        }
    }

    let points = smallvec![
        exit,
        Point::new(corridor_x, exit.y),
        Point::new(corridor_x, run_y),
        Point::new(near_x, run_y),
        Point::new(near_x, entry.y),
        entry
    ];
    (RouteKind::Corridor, points)
}

/// Outermost free x on the `direction` side of `column` before the padded
/// boxes of its neighbouring column start. `None` without such a neighbour.
fn free_edge(ctx: &RouteContext<'_>, column: usize, direction: f64) -> Option<f64> {
    let clearance = ctx.config.box_padding + ctx.grid.cell_size();
    if direction > 0.0 {
        ctx.channels.extent_after(column).map(|extent| extent.left - clearance)
    } else {
        ctx.channels.extent_before(column).map(|extent| extent.right + clearance)
    }
}

/// Lane spacing starting at `start` and moving in `direction`, shrunk so that
/// the last of `lane.count` lanes still lands at or before `limit`.
fn lane_step(spacing: f64, lane: Lane, start: f64, limit: Option<f64>, direction: f64) -> f64 {
    let Some(limit) = limit else {
        return spacing;
    };
    if lane.count < 2 {
        return spacing;
    }
    let room = ((limit - start) * direction).max(0.0);
    spacing.min(room / (lane.count - 1) as f64)
}

/// Height of the horizontal corridor run.
///
/// Prefers a gap between stacked boxes lying between the exit and entry
/// heights: gaps of the columns crossed by the run, or of the destination
/// column when the columns are adjacent. The gap nearest the exit wins (ties
/// go to the smaller y). Without one, the height is interpolated between exit
/// and entry in proportion to the source lane.
fn corridor_y(
    channels: &Channels,
    source: &Node,
    dest: &Node,
    exit: Point,
    entry: Point,
    source_lane: Lane,
) -> f64 {
    let (lo, hi) = if exit.y <= entry.y { (exit.y, entry.y) } else { (entry.y, exit.y) };

    let mut columns = channels.columns_between(source.column(), dest.column()).collect::<Vec<_>>();
    if columns.is_empty() {
        columns.push(dest.column());
    }

    let gap = columns
        .iter()
        .flat_map(|&column| channels.gaps_in(column).iter().copied())
        .filter(|&gap| gap >= lo && gap <= hi)
        .min_by(|a, b| {
            (a - exit.y).abs().total_cmp(&(b - exit.y).abs()).then_with(|| a.total_cmp(b))
        });

    gap.unwrap_or_else(|| exit.y + (entry.y - exit.y) * source_lane.fraction())
}

fn same_column_route(
    ctx: &RouteContext<'_>,
    source: &Node,
    exit: Point,
    entry: Point,
    source_lane: Lane,
) -> Waypoints {
    let config = ctx.config;
    let column = source.column();
    let base_x = ctx.channels.gap_after(column).unwrap_or_else(|| {
        let right = ctx.channels.column_extent(column).map_or(exit.x, |extent| extent.right);
        right + config.approach_offset
    });
    let limit = free_edge(ctx, column, 1.0);
    let step = lane_step(config.lane_spacing, source_lane, base_x, limit, 1.0);
    let desired_x = base_x + step * source_lane.index as f64;

    let mid_y = (exit.y + entry.y) / 2.0;
    let loop_x = ctx.grid.nearest_free(desired_x, mid_y, config.snap_radius).x;

    smallvec![exit, Point::new(loop_x, exit.y), Point::new(loop_x, entry.y), entry]
}
