// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Coalescing of layout triggers.
//!
//! Resize and scroll arrive in bursts. Every layout fully supersedes the
//! previous one, so a burst only needs the last relayout: the coalescer keeps
//! the latest pending work and releases it once the burst has gone quiet.
//! Selection changes alone never need geometry and resolve to a cheap
//! reselect right away.

use std::time::{Duration, Instant};

use crate::model::ids::CourseId;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(120);

/// Something that invalidates the current layout or its highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutTrigger {
    /// Initial boxes are measured.
    ViewReady,
    Resize,
    /// Scrolling settled (boxes moved on the surface).
    Scroll,
    /// Prerequisite data or the node set changed.
    DataChanged,
    /// The selected node changed (`None` clears the selection).
    Selection(Option<CourseId>),
}

/// Work the caller should perform now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// Full recomputation: grid, channels and paths.
    Relayout { selection: Option<CourseId> },
    /// Highlight refresh over the existing paths.
    Reselect { selection: Option<CourseId> },
}

/// Latest-wins coalescer for [`LayoutTrigger`]s.
///
/// Not thread-safe; drive it from the thread that owns the layout.
#[derive(Debug, Clone)]
pub struct TriggerCoalescer {
    quiet_period: Duration,
    selection: Option<CourseId>,
    /// When the pending relayout may run.
    relayout_due: Option<Instant>,
    reselect_pending: bool,
    coalesced: u32,
}

impl Default for TriggerCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl TriggerCoalescer {
    #[must_use]
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            selection: None,
            relayout_due: None,
            reselect_pending: false,
            coalesced: 0,
        }
    }

    /// Current selection as seen by the coalescer.
    pub fn selection(&self) -> Option<&CourseId> {
        self.selection.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        self.relayout_due.is_some() || self.reselect_pending
    }

    /// Records `trigger` at `now`. Nothing runs until [`Self::poll`] or [`Self::flush`].
    pub fn push(&mut self, trigger: LayoutTrigger, now: Instant) {
        if self.has_pending() {
            self.coalesced = self.coalesced.saturating_add(1);
        }
        match trigger {
            LayoutTrigger::Selection(selection) => {
                self.selection = selection;
                self.reselect_pending = true;
            }
            LayoutTrigger::Resize | LayoutTrigger::Scroll => {
                self.relayout_due = Some(now + self.quiet_period);
            }
            LayoutTrigger::ViewReady | LayoutTrigger::DataChanged => {
                self.relayout_due = Some(now);
            }
        }
    }

    /// Pending work that is ready at `now`, if any.
    ///
    /// A relayout waits for the quiet period after the last bursty trigger
    /// and absorbs any selection change made in the meantime.
    pub fn poll(&mut self, now: Instant) -> Option<Pending> {
        match self.relayout_due {
            Some(due) if now >= due => self.take(),
            Some(_) => None,
            None if self.reselect_pending => self.take(),
            None => None,
        }
    }

    /// Pending work regardless of the quiet period.
    pub fn flush(&mut self) -> Option<Pending> {
        self.take()
    }

    fn take(&mut self) -> Option<Pending> {
        let selection = self.selection.clone();
        let pending = if self.relayout_due.take().is_some() {
            Pending::Relayout { selection }
        } else if self.reselect_pending {
            Pending::Reselect { selection }
        } else {
            return None;
        };

        self.reselect_pending = false;
        if self.coalesced > 0 {
            tracing::debug!(coalesced = self.coalesced, "coalesced layout triggers");
            self.coalesced = 0;
        }
        Some(pending)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{LayoutTrigger, Pending, TriggerCoalescer};
    use crate::model::fixtures::cid;

    const QUIET: Duration = Duration::from_millis(100);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn resize_bursts_collapse_into_one_relayout() {
        let start = Instant::now();
        let mut coalescer = TriggerCoalescer::new(QUIET);

        coalescer.push(LayoutTrigger::Resize, start);
        coalescer.push(LayoutTrigger::Resize, start + ms(40));
        coalescer.push(LayoutTrigger::Scroll, start + ms(80));

        assert_eq!(coalescer.poll(start + ms(120)), None);
        assert_eq!(coalescer.poll(start + ms(180)), Some(Pending::Relayout { selection: None }));
        assert_eq!(coalescer.poll(start + ms(500)), None);
        assert!(!coalescer.has_pending());
    }

    #[test]
    fn selection_alone_resolves_to_a_reselect_immediately() {
        let start = Instant::now();
        let mut coalescer = TriggerCoalescer::new(QUIET);

        coalescer.push(LayoutTrigger::Selection(Some(cid("A"))), start);

        assert_eq!(coalescer.poll(start), Some(Pending::Reselect { selection: Some(cid("A")) }));
        assert_eq!(coalescer.selection(), Some(&cid("A")));
    }

    #[test]
    fn selection_during_a_burst_rides_along_with_the_relayout() {
        let start = Instant::now();
        let mut coalescer = TriggerCoalescer::new(QUIET);

        coalescer.push(LayoutTrigger::Resize, start);
        coalescer.push(LayoutTrigger::Selection(Some(cid("A"))), start + ms(10));
        coalescer.push(LayoutTrigger::Selection(Some(cid("B"))), start + ms(20));

        assert_eq!(coalescer.poll(start + ms(20)), None);
        assert_eq!(
            coalescer.poll(start + ms(100)),
            Some(Pending::Relayout { selection: Some(cid("B")) })
        );
        assert_eq!(coalescer.poll(start + ms(200)), None);
    }

    #[test]
    fn data_changes_are_not_debounced() {
        let start = Instant::now();
        let mut coalescer = TriggerCoalescer::new(QUIET);

        coalescer.push(LayoutTrigger::ViewReady, start);
        assert_eq!(coalescer.poll(start), Some(Pending::Relayout { selection: None }));

        coalescer.push(LayoutTrigger::DataChanged, start + ms(5));
        assert_eq!(coalescer.poll(start + ms(5)), Some(Pending::Relayout { selection: None }));
    }

    #[test]
    fn flush_ignores_the_quiet_period() {
        let start = Instant::now();
        let mut coalescer = TriggerCoalescer::new(QUIET);

        coalescer.push(LayoutTrigger::Scroll, start);
        coalescer.push(LayoutTrigger::Selection(None), start);

        assert_eq!(coalescer.flush(), Some(Pending::Relayout { selection: None }));
        assert_eq!(coalescer.flush(), None);
    }
}
