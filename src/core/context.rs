use crate::domain::model::{Issue, IssueNumber};
use std::cmp::Ordering;

pub const MAX_RECAP_WINDOW: usize = 5;

/// Number of earlier issues fed into a recap, between 1 and [`MAX_RECAP_WINDOW`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecapWindow(usize);

impl RecapWindow {
    pub fn new(size: usize) -> Self {
        Self(size.clamp(1, MAX_RECAP_WINDOW))
    }

    pub fn size(&self) -> usize {
        self.0
    }
}

impl Default for RecapWindow {
    fn default() -> Self {
        Self(MAX_RECAP_WINDOW)
    }
}

pub fn select_previous(issues: Vec<Issue>, current: IssueNumber) -> Vec<Issue> {
    select_previous_within(issues, current, RecapWindow::default())
}

/// Picks the issues that come right before `current`, oldest first.
///
/// Only issues numbered strictly below `current` are kept. The nearest
/// `window` of them survive, and a repeated issue number keeps its first
/// occurrence.
pub fn select_previous_within(
    issues: Vec<Issue>,
    current: IssueNumber,
    window: RecapWindow,
) -> Vec<Issue> {
    let mut earlier: Vec<Issue> = issues
        .into_iter()
        .filter(|issue| issue.issue_number < current)
        .collect();

    // NaN never passes the filter above, so partial_cmp always succeeds here.
    earlier.sort_by(|a, b| {
        b.issue_number
            .partial_cmp(&a.issue_number)
            .unwrap_or(Ordering::Equal)
    });
    earlier.dedup_by(|later, kept| later.issue_number == kept.issue_number);
    earlier.truncate(window.size());
    earlier.reverse();

    tracing::debug!(
        "Selected {} previous issues before #{}",
        earlier.len(),
        current
    );
    earlier
}
