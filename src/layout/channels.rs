// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::node::NodeRegistry;

/// Horizontal extent of one column: leftmost box edge to rightmost box edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnExtent {
    pub left: f64,
    pub right: f64,
}

/// Routing corridors derived from the node boxes.
///
/// - `column_gap_x[i]` is the x midpoint between populated column `i` and
///   `i + 1` (positions in [`Channels::columns`], not raw column indices);
/// - `column_gap_y[col]` holds the y midpoints between vertically stacked
///   boxes of that column, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channels {
    columns: Vec<usize>,
    extents: Vec<ColumnExtent>,
    column_gap_x: Vec<f64>,
    column_gap_y: BTreeMap<usize, Vec<f64>>,
}

impl Channels {
    pub fn allocate(nodes: &NodeRegistry) -> Self {
        let columns = nodes.columns();
        let mut extents = Vec::with_capacity(columns.len());
        let mut column_gap_y = BTreeMap::new();

        for &column in &columns {
            let stacked = nodes.nodes_in_column(column);

            let mut extent = ColumnExtent { left: f64::INFINITY, right: f64::NEG_INFINITY };
            for node in &stacked {
                extent.left = extent.left.min(node.rect().x);
                extent.right = extent.right.max(node.rect().right());
            }
            extents.push(extent);

            let gaps = stacked
                .windows(2)
                .map(|pair| (pair[0].rect().bottom() + pair[1].rect().y) / 2.0)
                .collect::<Vec<_>>();
            column_gap_y.insert(column, gaps);
        }

        let column_gap_x =
            extents.windows(2).map(|pair| (pair[0].right + pair[1].left) / 2.0).collect();

        Self { columns, extents, column_gap_x, column_gap_y }
    }

    /// Populated column indices, ascending.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn column_gap_x(&self) -> &[f64] {
        &self.column_gap_x
    }

    fn position(&self, column: usize) -> Option<usize> {
        self.columns.binary_search(&column).ok()
    }

    pub fn column_extent(&self, column: usize) -> Option<ColumnExtent> {
        self.position(column).map(|pos| self.extents[pos])
    }

    /// Extent of the next populated column to the right of `column`.
    pub fn extent_after(&self, column: usize) -> Option<ColumnExtent> {
        let pos = self.position(column)?;
        self.extents.get(pos + 1).copied()
    }

    /// Extent of the previous populated column to the left of `column`.
    pub fn extent_before(&self, column: usize) -> Option<ColumnExtent> {
        let pos = self.position(column)?;
        self.extents.get(pos.checked_sub(1)?).copied()
    }

    /// Corridor between `column` and the next populated column to its right.
    pub fn gap_after(&self, column: usize) -> Option<f64> {
        let pos = self.position(column)?;
        self.column_gap_x.get(pos).copied()
    }

    /// Corridor between `column` and the previous populated column to its left.
    pub fn gap_before(&self, column: usize) -> Option<f64> {
        let pos = self.position(column)?;
        self.column_gap_x.get(pos.checked_sub(1)?).copied()
    }

    /// Gaps between stacked boxes of `column`; empty for columns with ≤1 node.
    pub fn gaps_in(&self, column: usize) -> &[f64] {
        self.column_gap_y.get(&column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Populated columns strictly between `a` and `b`, in ascending order.
    pub fn columns_between(&self, a: usize, b: usize) -> impl Iterator<Item = usize> + '_ {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.columns.iter().copied().filter(move |&column| column > lo && column < hi)
    }
}
