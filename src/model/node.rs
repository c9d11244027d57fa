// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use super::geometry::Rect;
use super::ids::CourseId;

/// One measured course box.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: CourseId,
    rect: Rect,
    column: usize,
}

impl Node {
    pub fn new(id: CourseId, rect: Rect, column: usize) -> Self {
        Self { id, rect, column }
    }

    pub fn id(&self) -> &CourseId {
        &self.id
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

/// Ordered collection of the node boxes produced by the external layout pass.
///
/// Read-only input for one computation cycle; callers supply a fresh registry
/// after every measurement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    index: BTreeMap<CourseId, usize>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. Returns `false` (and keeps the registry unchanged) for a
    /// duplicate id or a malformed box.
    pub fn insert(&mut self, node: Node) -> bool {
        if !node.rect.is_well_formed() {
            tracing::debug!(id = %node.id, "ignoring node with malformed box");
            return false;
        }
        if self.index.contains_key(&node.id) {
            tracing::debug!(id = %node.id, "ignoring duplicate node id");
            return false;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &CourseId) -> Option<&Node> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, id: &CourseId) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Populated column indices, ascending.
    pub fn columns(&self) -> Vec<usize> {
        self.nodes.iter().map(Node::column).collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// Nodes of one column sorted by top offset (ties by id).
    pub fn nodes_in_column(&self, column: usize) -> Vec<&Node> {
        let mut nodes = self.nodes.iter().filter(|node| node.column == column).collect::<Vec<_>>();
        nodes.sort_by(|a, b| a.rect.y.total_cmp(&b.rect.y).then_with(|| a.id.cmp(&b.id)));
        nodes
    }

    /// Vertical position of a node within its column, starting at 0.
    pub fn row_order(&self, id: &CourseId) -> Option<usize> {
        let node = self.get(id)?;
        self.nodes_in_column(node.column).iter().position(|other| other.id == node.id)
    }
}

impl FromIterator<Node> for NodeRegistry {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut registry = Self::new();
        for node in iter {
            registry.insert(node);
        }
        registry
    }
}
