// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Presentation state layered over routed paths.
//!
//! Highlighting only restyles and reorders existing paths; it never touches
//! geometry, so a selection change is cheap compared to a full layout.

pub mod overlay;

pub use overlay::{apply, is_active_edge, select, styled, toggle_selection, Decorations};
