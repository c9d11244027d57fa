// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Prereqmap: collision-aware connector routing for curriculum prerequisite maps.
//!
//! Courses are boxes laid out in term columns by an external measurement pass.
//! [`layout::LayoutEngine`] turns those boxes plus the prerequisite lists into
//! orthogonal paths that never cross a box, and [`render::overlay`] restyles
//! them for the current selection.

pub mod config;
pub mod layout;
pub mod model;
pub mod render;
pub mod scene;
pub mod trigger;

pub use config::{LayoutConfig, SelectionPolicy};
pub use layout::{Layout, LayoutEngine};
pub use scene::{Scene, SceneError};
