// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use smol_str::SmolStr;

/// Width numeric course codes are zero-padded to (`"42"` becomes `"0042"`).
pub const NUMERIC_CODE_WIDTH: usize = 4;

/// A normalized course identifier.
///
/// Every id that enters the engine goes through [`CourseId::normalize`], so two
/// spellings of the same course (`" 101"`, `"0101"`, `101`) compare equal.
/// Normalization is idempotent: normalizing an already normalized id is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseId {
    value: SmolStr,
}

impl CourseId {
    pub fn normalize(raw: &str) -> Result<Self, CourseIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CourseIdError::Empty);
        }

        if trimmed.bytes().all(|b| b.is_ascii_digit()) && trimmed.len() < NUMERIC_CODE_WIDTH {
            let padded = format!("{trimmed:0>width$}", width = NUMERIC_CODE_WIDTH);
            return Ok(Self { value: SmolStr::new(padded) });
        }

        Ok(Self { value: SmolStr::new(trimmed) })
    }

    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CourseId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for CourseId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for CourseId {
    type Err = CourseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl TryFrom<&str> for CourseId {
    type Error = CourseIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::normalize(value)
    }
}

impl Serialize for CourseId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseIdError {
    Empty,
}

impl fmt::Display for CourseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("course id must not be empty"),
        }
    }
}

impl std::error::Error for CourseIdError {}

/// Identifies one prerequisite edge: `from` is a prerequisite of `to`.
///
/// Serializes as its display form, `from->to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub from: CourseId,
    pub to: CourseId,
}

impl EdgeKey {
    pub fn new(from: CourseId, to: CourseId) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

impl Serialize for EdgeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
