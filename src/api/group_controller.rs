use tracing::debug;

use crate::core::{BarGroup, GroupId, SeriesId, SpacingMode};
use crate::diagnostics::Diagnostic;
use crate::error::{ChartError, ChartResult};

use super::BarPlot;

impl BarPlot {
    /// Creates an empty group with the configured spacing.
    pub fn add_group(&mut self) -> GroupId {
        self.add_group_with(self.config.spacing_mode, self.config.spacing)
    }

    pub fn add_group_with(&mut self, spacing_mode: SpacingMode, spacing: f64) -> GroupId {
        let id = self.groups.insert(BarGroup::new(spacing_mode, spacing));
        debug!(?id, count = self.groups.len(), "add bar group");
        id
    }

    /// Removes a group, detaching all of its members first.
    pub fn remove_group(&mut self, group: GroupId) -> ChartResult<BarGroup> {
        self.group_clear(group)?;
        let removed = self.groups.remove(group).ok_or(ChartError::UnknownGroup)?;
        debug!(?group, count = self.groups.len(), "remove bar group");
        Ok(removed)
    }

    #[must_use]
    pub fn group(&self, group: GroupId) -> Option<&BarGroup> {
        self.groups.get(group)
    }

    /// Mutable access to the spacing of a group. Membership stays read-only.
    #[must_use]
    pub fn group_mut(&mut self, group: GroupId) -> Option<&mut BarGroup> {
        self.groups.get_mut(group)
    }

    /// Assigns `series` to `group`, or takes it out of any group with `None`.
    ///
    /// The series' group link and the member lists of the old and new group
    /// change together; a series is never a member of two groups.
    pub fn set_series_group(
        &mut self,
        series: SeriesId,
        group: Option<GroupId>,
    ) -> ChartResult<()> {
        let previous = self.entry(series)?.group;
        if let Some(next) = group {
            if !self.groups.contains_key(next) {
                return Err(ChartError::UnknownGroup);
            }
        }
        if previous == group {
            return Ok(());
        }

        if let Some(old) = previous.and_then(|id| self.groups.get_mut(id)) {
            old.unregister(series);
        }
        if let Some(new) = group.and_then(|id| self.groups.get_mut(id)) {
            new.register(series);
        }
        self.series[series].group = group;
        debug!(?series, from = ?previous, to = ?group, "change bar group");
        Ok(())
    }

    /// Appends `series` to `group`, moving it out of any other group.
    ///
    /// Appending a current member is reported and leaves the order unchanged.
    pub fn group_append(&mut self, group: GroupId, series: SeriesId) -> ChartResult<()> {
        let members = self.groups.get(group).ok_or(ChartError::UnknownGroup)?;
        self.entry(series)?;
        if members.contains(series) {
            self.diagnostics
                .report(&Diagnostic::DuplicateGroupMember { group, series });
            return Ok(());
        }
        self.set_series_group(series, Some(group))
    }

    /// Places `series` at `index` of `group`.
    ///
    /// A current member is moved; `index` is clamped to the member range.
    pub fn group_insert(&mut self, group: GroupId, index: usize, series: SeriesId) -> ChartResult<()> {
        if !self.groups.contains_key(group) {
            return Err(ChartError::UnknownGroup);
        }
        self.set_series_group(series, Some(group))?;
        self.groups[group].reposition(series, index);
        Ok(())
    }

    /// Removes `series` from `group`. Non-members are reported and ignored.
    pub fn group_remove(&mut self, group: GroupId, series: SeriesId) -> ChartResult<()> {
        let members = self.groups.get(group).ok_or(ChartError::UnknownGroup)?;
        self.entry(series)?;
        if !members.contains(series) {
            self.diagnostics
                .report(&Diagnostic::NotInGroup { group, series });
            return Ok(());
        }
        self.set_series_group(series, None)
    }

    pub fn group_clear(&mut self, group: GroupId) -> ChartResult<()> {
        let members = self.group_members(group)?;
        for series in members {
            self.set_series_group(series, None)?;
        }
        Ok(())
    }

    /// Members of `group` in placement order.
    pub fn group_members(&self, group: GroupId) -> ChartResult<Vec<SeriesId>> {
        let members = self.groups.get(group).ok_or(ChartError::UnknownGroup)?;
        Ok(members.members().collect())
    }

    /// Member at `index`; out-of-range indices are reported and yield `None`.
    pub fn group_member_at(&self, group: GroupId, index: usize) -> ChartResult<Option<SeriesId>> {
        let members = self.groups.get(group).ok_or(ChartError::UnknownGroup)?;
        let member = members.member_at(index);
        if member.is_none() {
            self.diagnostics.report(&Diagnostic::GroupIndexOutOfBounds {
                group,
                index,
                len: members.len(),
            });
        }
        Ok(member)
    }
}
