//! Audience views over a generated timetable.
//!
//! [`project`] narrows the grid to one batch or one faculty, and
//! [`merge_blocks`] folds the per-slot grid back into one render block per
//! entry, so a two-period lab shows up once with a span of two.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{GridDay, Timetable, TimetableEntry, WeekCalendar};

/// Which entries a view keeps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewFilter {
    /// Every entry.
    #[default]
    All,
    /// Entries attended by one batch.
    Batch(String),
    /// Entries taught by one faculty.
    Faculty(String),
}

impl ViewFilter {
    /// Whether the entry belongs in this view.
    pub fn matches(&self, entry: &TimetableEntry) -> bool {
        match self {
            Self::All => true,
            Self::Batch(id) => entry.batch_id == *id,
            Self::Faculty(id) => entry.faculty_id == *id,
        }
    }
}

/// Projects the timetable grid through a filter.
///
/// The grid keeps its full shape (every day, every period); slots simply
/// lose the entries the filter rejects.
pub fn project(timetable: &Timetable, filter: &ViewFilter) -> Vec<GridDay> {
    timetable.grid_filtered(|e| filter.matches(e))
}

/// One entry as rendered: where it starts and how many periods it spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderBlock {
    /// The entry.
    pub entry: TimetableEntry,
    /// First period covered.
    pub start_period: usize,
    /// Number of contiguous periods covered.
    pub span: usize,
}

impl RenderBlock {
    /// One past the last period covered.
    pub fn end_period(&self) -> usize {
        self.start_period + self.span
    }

    /// Clock range such as `"09:00-11:00"`, or `None` if the block does
    /// not fit the calendar.
    pub fn time_range(&self, calendar: &WeekCalendar) -> Option<String> {
        calendar.time_range(self.start_period, self.span)
    }
}

/// Render blocks of one day, ordered by start period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBlocks {
    /// Day index.
    pub day: usize,
    /// Day label.
    pub label: String,
    /// Blocks in start order; blocks starting together keep slot order.
    pub blocks: Vec<RenderBlock>,
}

impl DayBlocks {
    /// Whether no block falls on this day.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Merges contiguous slots carrying the same entry ID into single blocks.
pub fn merge_blocks(days: &[GridDay]) -> Vec<DayBlocks> {
    days.iter()
        .map(|grid_day| {
            let mut blocks: Vec<RenderBlock> = Vec::new();
            // entry id -> index of its latest block
            let mut open: HashMap<&str, usize> = HashMap::new();

            for slot in &grid_day.slots {
                for entry in &slot.entries {
                    match open.get(entry.id.as_str()) {
                        Some(&i) if blocks[i].end_period() == slot.period => {
                            blocks[i].span += 1;
                        }
                        _ => {
                            open.insert(entry.id.as_str(), blocks.len());
                            blocks.push(RenderBlock {
                                entry: entry.clone(),
                                start_period: slot.period,
                                span: 1,
                            });
                        }
                    }
                }
            }

            DayBlocks {
                day: grid_day.day,
                label: grid_day.label.clone(),
                blocks,
            }
        })
        .collect()
}
