// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Input data model: course ids, node boxes and drawing-surface geometry.

pub(crate) mod fixtures;
pub mod geometry;
pub mod ids;
pub mod node;

pub use geometry::{Point, Rect};
pub use ids::{CourseId, CourseIdError, EdgeKey, NUMERIC_CODE_WIDTH};
pub use node::{Node, NodeRegistry};
