// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde::Serialize;

use super::adjacency::AdjacencyIndex;
use super::channels::Channels;
use super::grid::OccupancyGrid;
use super::router::{route, EdgePath, RouteContext};
use crate::config::LayoutConfig;
use crate::model::ids::{CourseId, EdgeKey};
use crate::model::node::NodeRegistry;
use crate::render::overlay::{apply, select, Decorations};

/// Result of one layout computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    /// Routed paths in draw order: the inactive layer, then the active layer.
    pub paths: Vec<EdgePath>,
    pub decorations: Decorations,
    /// Edges with an endpoint missing from the node registry; no path emitted.
    pub skipped: Vec<EdgeKey>,
}

impl Layout {
    pub fn path(&self, from: &CourseId, to: &CourseId) -> Option<&EdgePath> {
        self.paths.iter().find(|path| &path.from == from && &path.to == to)
    }

    pub fn active_paths(&self) -> impl Iterator<Item = &EdgePath> {
        self.paths.iter().filter(|path| path.active)
    }
}

/// Disposable edge-routing engine.
///
/// Every [`LayoutEngine::compute`] call rebuilds the occupancy grid and
/// channels from the boxes it is given; nothing but the configuration
/// survives between calls.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn compute(
        &self,
        nodes: &NodeRegistry,
        adjacency: &AdjacencyIndex,
        selection: Option<&CourseId>,
    ) -> Layout {
        let span = tracing::debug_span!(
            "layout.compute",
            nodes = nodes.len(),
            edges = adjacency.edges().len()
        );
        let _enter = span.enter();

        let grid = OccupancyGrid::build(nodes, self.config.box_padding, self.config.cell_size());
        let channels = Channels::allocate(nodes);
        let active = select(selection, adjacency, self.config.selection_policy);
        let ctx = RouteContext {
            config: &self.config,
            nodes,
            adjacency,
            grid: &grid,
            channels: &channels,
        };

        let mut paths = Vec::with_capacity(adjacency.edges().len());
        let mut skipped = Vec::new();
        for edge in adjacency.edges() {
            match route(edge, &ctx, &active) {
                Some(path) => paths.push(path),
                None => {
                    tracing::debug!(edge = %edge, "skipping edge with unregistered endpoint");
                    skipped.push(edge.clone());
                }
            }
        }

        let decorations = apply(&mut paths, &active);
        tracing::debug!(paths = paths.len(), skipped = skipped.len(), "layout computed");
        Layout { paths, decorations, skipped }
    }

    /// Applies a new selection to an existing layout.
    ///
    /// Geometry is reused as is; only active flags, draw order and decorations
    /// change. The result equals what [`Self::compute`] would return for the
    /// same boxes and the new selection.
    pub fn reselect(
        &self,
        layout: &Layout,
        adjacency: &AdjacencyIndex,
        selection: Option<&CourseId>,
    ) -> Layout {
        let declared = adjacency
            .edges()
            .iter()
            .enumerate()
            .map(|(ordinal, edge)| (edge, ordinal))
            .collect::<BTreeMap<_, _>>();

        let mut paths = layout.paths.clone();
        paths.sort_by_key(|path| declared.get(&path.key()).copied().unwrap_or(usize::MAX));

        let active = select(selection, adjacency, self.config.selection_policy);
        let decorations = apply(&mut paths, &active);
        Layout { paths, decorations, skipped: layout.skipped.clone() }
    }
}
