// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edge routing for the prerequisite map.
//!
//! Boxes come from an external measurement pass; this module turns them and the
//! prerequisite adjacency into orthogonal connector paths that keep clear of
//! every box.

pub mod adjacency;
pub mod channels;
pub mod engine;
pub mod grid;
pub mod router;

pub use adjacency::{build_adjacency, AdjacencyIndex, Lane, RawPrerequisites, RequirementEntry};
pub use channels::{Channels, ColumnExtent};
pub use engine::{Layout, LayoutEngine};
pub use grid::{Cell, OccupancyGrid};
pub use router::{route, EdgePath, Heading, RouteContext, RouteKind};
