//! Vertical stacking of bar series.
//!
//! A stack is a doubly linked chain threaded through the `below`/`above` links
//! of [`BarSeries`] entries in a handle table. The helpers in this module are
//! the only code that writes those links, and every write updates both sides.

use slotmap::SlotMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::bar_series::BarSeries;
use crate::core::primitives::key_match_epsilon;
use crate::core::types::SeriesId;
use crate::error::{ChartError, ChartResult};

pub type SeriesTable = SlotMap<SeriesId, BarSeries>;

/// Places `upper` directly above `lower`.
///
/// `None` on one side detaches the other series at that end only. Links that
/// would become one-sided are cleared on the old neighbor too. Rejects links
/// that would close a cycle.
pub fn connect(
    table: &mut SeriesTable,
    lower: Option<SeriesId>,
    upper: Option<SeriesId>,
) -> ChartResult<()> {
    for id in [lower, upper].into_iter().flatten() {
        if !table.contains_key(id) {
            return Err(ChartError::UnknownSeries);
        }
    }

    match (lower, upper) {
        (None, None) => {}
        (None, Some(upper)) => detach_below(table, upper),
        (Some(lower), None) => detach_above(table, lower),
        (Some(lower), Some(upper)) => {
            if lower == upper || is_below(table, upper, lower) {
                return Err(ChartError::InvalidData(
                    "connecting these series would create a stacking cycle".to_owned(),
                ));
            }
            detach_above(table, lower);
            detach_below(table, upper);
            table[lower].above = Some(upper);
            table[upper].below = Some(lower);
            trace!(?lower, ?upper, "connect bar stack");
        }
    }
    Ok(())
}

/// Moves `series` directly below `target`, healing the gap it leaves behind.
///
/// With `target == None` the series is only taken out of its stack.
pub fn move_below(
    table: &mut SeriesTable,
    series: SeriesId,
    target: Option<SeriesId>,
) -> ChartResult<()> {
    if !prepare_move(table, series, target)? {
        return Ok(());
    }
    if let Some(target) = target {
        let below_target = table[target].below;
        if below_target.is_some() {
            connect(table, below_target, Some(series))?;
        }
        connect(table, Some(series), Some(target))?;
    }
    Ok(())
}

/// Moves `series` directly above `target`, healing the gap it leaves behind.
///
/// With `target == None` the series is only taken out of its stack.
pub fn move_above(
    table: &mut SeriesTable,
    series: SeriesId,
    target: Option<SeriesId>,
) -> ChartResult<()> {
    if !prepare_move(table, series, target)? {
        return Ok(());
    }
    if let Some(target) = target {
        let above_target = table[target].above;
        if above_target.is_some() {
            connect(table, Some(series), above_target)?;
        }
        connect(table, Some(target), Some(series))?;
    }
    Ok(())
}

/// Splices `series` out of its stack, connecting its former neighbors.
pub fn unlink(table: &mut SeriesTable, series: SeriesId) -> ChartResult<()> {
    let entry = table.get(series).ok_or(ChartError::UnknownSeries)?;
    let (below, above) = (entry.below, entry.above);
    connect(table, below, above)
}

/// Bottom-most series of the stack containing `series`.
pub fn stack_base(table: &SeriesTable, series: SeriesId) -> ChartResult<SeriesId> {
    let mut current = series;
    let mut entry = table.get(current).ok_or(ChartError::UnknownSeries)?;
    while let Some(below) = entry.below {
        let Some(next) = table.get(below) else { break };
        current = below;
        entry = next;
    }
    Ok(current)
}

/// Value at which the bar of `series` at `key` starts.
///
/// Walks down the stack; every series below contributes its most extreme
/// value near `key` in the requested direction (starting from zero), and the
/// bottom-most series contributes its base value. Positive and negative bars
/// therefore build separate towers.
pub fn stacked_base(
    table: &SeriesTable,
    series: SeriesId,
    key: f64,
    positive: bool,
) -> ChartResult<f64> {
    let mut entry = table.get(series).ok_or(ChartError::UnknownSeries)?;
    let epsilon = key_match_epsilon(key);
    let mut extremes: SmallVec<[f64; 8]> = SmallVec::new();

    while let Some(below) = entry.below.and_then(|id| table.get(id)) {
        let candidates = below.data.range_indices(key - epsilon, key + epsilon);
        let mut extreme = 0.0;
        for point in &below.data.as_slice()[candidates] {
            if point.key > key - epsilon
                && point.key < key + epsilon
                && ((positive && point.value > extreme) || (!positive && point.value < extreme))
            {
                extreme = point.value;
            }
        }
        extremes.push(extreme);
        entry = below;
    }

    Ok(extremes
        .iter()
        .rev()
        .fold(entry.base_value, |base, extreme| extreme + base))
}

/// Series of the stack containing `series`, bottom to top.
pub fn stack_members(table: &SeriesTable, series: SeriesId) -> ChartResult<Vec<SeriesId>> {
    let mut current = Some(stack_base(table, series)?);
    let mut members = Vec::new();
    while let Some(id) = current {
        members.push(id);
        current = table.get(id).and_then(|entry| entry.above);
    }
    Ok(members)
}

fn detach_below(table: &mut SeriesTable, upper: SeriesId) {
    if let Some(old) = table[upper].below.take() {
        if let Some(old_entry) = table.get_mut(old) {
            if old_entry.above == Some(upper) {
                old_entry.above = None;
            }
        }
    }
}

fn detach_above(table: &mut SeriesTable, lower: SeriesId) {
    if let Some(old) = table[lower].above.take() {
        if let Some(old_entry) = table.get_mut(old) {
            if old_entry.below == Some(lower) {
                old_entry.below = None;
            }
        }
    }
}

/// Whether `candidate` sits somewhere below `series` in its stack.
fn is_below(table: &SeriesTable, candidate: SeriesId, series: SeriesId) -> bool {
    let mut current = table.get(series).and_then(|entry| entry.below);
    while let Some(id) = current {
        if id == candidate {
            return true;
        }
        current = table.get(id).and_then(|entry| entry.below);
    }
    false
}

/// Validates a move request and takes `series` out of its stack.
///
/// Returns `false` for a self-targeted move, which leaves everything as is.
fn prepare_move(
    table: &mut SeriesTable,
    series: SeriesId,
    target: Option<SeriesId>,
) -> ChartResult<bool> {
    let entry = table.get(series).ok_or(ChartError::UnknownSeries)?;
    if target == Some(series) {
        return Ok(false);
    }
    if let Some(target) = target {
        let target_entry = table.get(target).ok_or(ChartError::UnknownSeries)?;
        if !entry.shares_axes_with(target_entry) {
            return Err(ChartError::AxisMismatch);
        }
    }
    unlink(table, series)?;
    Ok(true)
}
