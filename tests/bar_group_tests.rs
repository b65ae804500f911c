use std::sync::Arc;

use approx::assert_relative_eq;

use barchart_rs::core::{
    Axis, AxisId, AxisTransform, PixelRect, SeriesId, SpacingMode, WidthType,
};
use barchart_rs::diagnostics::{Diagnostic, RecordingDiagnostics};
use barchart_rs::{BarPlot, BarPlotConfig, ChartError};

fn plot_with_axes(config: BarPlotConfig) -> (BarPlot, AxisId, AxisId, Arc<RecordingDiagnostics>) {
    let diagnostics = Arc::new(RecordingDiagnostics::new());
    let mut plot = BarPlot::new(config).with_diagnostics(diagnostics.clone());
    let rect = PixelRect::new(0.0, 0.0, 1000.0, 500.0);
    let key_axis = plot.add_axis(Axis::horizontal(0.0, 10.0, rect).expect("key axis"));
    let value_axis = plot.add_axis(Axis::vertical(0.0, 100.0, rect).expect("value axis"));
    (plot, key_axis, value_axis, diagnostics)
}

fn pixel_bars() -> BarPlotConfig {
    BarPlotConfig::default()
        .with_bar_width(10.0, WidthType::Absolute)
        .with_spacing(4.0, SpacingMode::Absolute)
}

fn add_series(plot: &mut BarPlot, key_axis: AxisId, value_axis: AxisId, n: usize) -> Vec<SeriesId> {
    (0..n)
        .map(|_| plot.add_series(key_axis, value_axis).expect("series"))
        .collect()
}

#[test]
fn append_keeps_insertion_order_and_sets_the_series_link() {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(BarPlotConfig::default());
    let ids = add_series(&mut plot, key_axis, value_axis, 3);
    let group = plot.add_group();

    for id in &ids {
        plot.group_append(group, *id).expect("append");
    }

    assert_eq!(plot.group_members(group).expect("members"), ids);
    for id in &ids {
        assert_eq!(plot.series(*id).expect("series").group(), Some(group));
    }
}

#[test]
fn appending_a_member_twice_is_reported() {
    let (mut plot, key_axis, value_axis, diagnostics) = plot_with_axes(BarPlotConfig::default());
    let ids = add_series(&mut plot, key_axis, value_axis, 2);
    let group = plot.add_group();
    plot.group_append(group, ids[0]).expect("append a");
    plot.group_append(group, ids[1]).expect("append b");

    plot.group_append(group, ids[0]).expect("append a again");

    assert_eq!(plot.group_members(group).expect("members"), ids);
    assert_eq!(
        diagnostics.take(),
        vec![Diagnostic::DuplicateGroupMember {
            group,
            series: ids[0]
        }]
    );
}

#[test]
fn a_series_belongs_to_at_most_one_group() {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(BarPlotConfig::default());
    let id = plot.add_series(key_axis, value_axis).expect("series");
    let first = plot.add_group();
    let second = plot.add_group();
    plot.group_append(first, id).expect("append first");

    plot.group_append(second, id).expect("append second");

    assert!(plot.group_members(first).expect("first").is_empty());
    assert_eq!(plot.group_members(second).expect("second"), vec![id]);
    assert_eq!(plot.series(id).expect("series").group(), Some(second));
}

#[test]
fn insert_clamps_the_index_and_moves_existing_members() {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(BarPlotConfig::default());
    let ids = add_series(&mut plot, key_axis, value_axis, 4);
    let group = plot.add_group();
    plot.group_append(group, ids[0]).expect("a");
    plot.group_append(group, ids[1]).expect("b");

    plot.group_insert(group, 0, ids[2]).expect("insert c front");
    plot.group_insert(group, 99, ids[3]).expect("insert d past end");
    assert_eq!(
        plot.group_members(group).expect("members"),
        vec![ids[2], ids[0], ids[1], ids[3]]
    );

    plot.group_insert(group, 1, ids[3]).expect("move d");
    assert_eq!(
        plot.group_members(group).expect("members"),
        vec![ids[2], ids[3], ids[0], ids[1]]
    );
}

#[test]
fn removing_a_non_member_is_reported() {
    let (mut plot, key_axis, value_axis, diagnostics) = plot_with_axes(BarPlotConfig::default());
    let id = plot.add_series(key_axis, value_axis).expect("series");
    let group = plot.add_group();

    plot.group_remove(group, id).expect("remove");

    assert_eq!(
        diagnostics.take(),
        vec![Diagnostic::NotInGroup { group, series: id }]
    );
}

#[test]
fn member_at_reports_out_of_range_indices() {
    let (mut plot, key_axis, value_axis, diagnostics) = plot_with_axes(BarPlotConfig::default());
    let id = plot.add_series(key_axis, value_axis).expect("series");
    let group = plot.add_group();
    plot.group_append(group, id).expect("append");

    assert_eq!(plot.group_member_at(group, 0).expect("at 0"), Some(id));
    assert_eq!(plot.group_member_at(group, 3).expect("at 3"), None);
    assert_eq!(
        diagnostics.take(),
        vec![Diagnostic::GroupIndexOutOfBounds {
            group,
            index: 3,
            len: 1
        }]
    );
}

#[test]
fn removing_a_group_detaches_its_members() {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(BarPlotConfig::default());
    let ids = add_series(&mut plot, key_axis, value_axis, 2);
    let group = plot.add_group();
    plot.group_append(group, ids[0]).expect("a");
    plot.group_append(group, ids[1]).expect("b");

    plot.remove_group(group).expect("remove group");

    assert!(plot.group(group).is_none());
    assert_eq!(plot.series(ids[0]).expect("a").group(), None);
    assert_eq!(plot.series(ids[1]).expect("b").group(), None);
    assert_eq!(plot.group_members(group), Err(ChartError::UnknownGroup));
}

#[test]
fn removing_a_series_leaves_its_group() {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(BarPlotConfig::default());
    let ids = add_series(&mut plot, key_axis, value_axis, 2);
    let group = plot.add_group();
    plot.group_append(group, ids[0]).expect("a");
    plot.group_append(group, ids[1]).expect("b");

    plot.remove_series(ids[0]).expect("remove a");

    assert_eq!(plot.group_members(group).expect("members"), vec![ids[1]]);
}

#[test]
fn odd_group_centers_the_middle_column() {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(pixel_bars());
    let ids = add_series(&mut plot, key_axis, value_axis, 3);
    let group = plot.add_group();
    for id in &ids {
        plot.group_append(group, *id).expect("append");
    }

    let offsets: Vec<f64> = ids
        .iter()
        .map(|id| plot.key_pixel_offset(*id, 5.0).expect("offset"))
        .collect();

    assert_eq!(offsets, vec![-14.0, 0.0, 14.0]);
}

#[test]
fn even_group_straddles_the_key() {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(pixel_bars());
    let ids = add_series(&mut plot, key_axis, value_axis, 4);
    let group = plot.add_group();
    for id in &ids {
        plot.group_append(group, *id).expect("append");
    }

    let offsets: Vec<f64> = ids
        .iter()
        .map(|id| plot.key_pixel_offset(*id, 5.0).expect("offset"))
        .collect();

    assert_eq!(offsets, vec![-21.0, -7.0, 7.0, 21.0]);
}

#[test]
fn stacked_members_share_their_base_column() {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(pixel_bars());
    let ids = add_series(&mut plot, key_axis, value_axis, 3);
    let group = plot.add_group();
    for id in &ids {
        plot.group_append(group, *id).expect("append");
    }
    plot.move_above(ids[2], Some(ids[0])).expect("stack c on a");

    let a = plot.key_pixel_offset(ids[0], 5.0).expect("a");
    let b = plot.key_pixel_offset(ids[1], 5.0).expect("b");
    let c = plot.key_pixel_offset(ids[2], 5.0).expect("c");

    assert_eq!(a, -7.0);
    assert_eq!(b, 7.0);
    assert_eq!(c, a);
}

#[test]
fn ungrouped_series_are_not_offset() {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(pixel_bars());
    let id = plot.add_series(key_axis, value_axis).expect("series");

    assert_eq!(plot.key_pixel_offset(id, 5.0).expect("offset"), 0.0);
}

#[test]
fn spacing_modes_convert_to_pixels() {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(BarPlotConfig::default());
    let id = plot.add_series(key_axis, value_axis).expect("series");
    let absolute = plot.add_group_with(SpacingMode::Absolute, 6.0);
    let ratio = plot.add_group_with(SpacingMode::AxisRectRatio, 0.01);
    let coordinates = plot.add_group_with(SpacingMode::PlotCoordinates, 0.5);

    assert_eq!(plot.pixel_spacing(absolute, id, 3.0).expect("absolute"), 6.0);
    assert_eq!(plot.pixel_spacing(ratio, id, 3.0).expect("ratio"), 10.0);
    assert_relative_eq!(
        plot.pixel_spacing(coordinates, id, 3.0).expect("coordinates"),
        50.0,
        epsilon = 1e-9
    );
}

#[test]
fn group_spacing_changes_take_effect_on_the_next_query() {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(pixel_bars());
    let ids = add_series(&mut plot, key_axis, value_axis, 2);
    let group = plot.add_group();
    plot.group_append(group, ids[0]).expect("a");
    plot.group_append(group, ids[1]).expect("b");

    plot.group_mut(group).expect("group").set_spacing(10.0);

    assert_eq!(plot.key_pixel_offset(ids[1], 5.0).expect("b"), 10.0);
}

fn grouped_pair(key_axis: Axis, value_axis: Axis) -> (BarPlot, AxisId, SeriesId, SeriesId) {
    let mut plot = BarPlot::new(pixel_bars());
    let key = plot.add_axis(key_axis);
    let value = plot.add_axis(value_axis);
    let ids = add_series(&mut plot, key, value, 2);
    let group = plot.add_group();
    plot.group_append(group, ids[0]).expect("a");
    plot.group_append(group, ids[1]).expect("b");
    (plot, key, ids[0], ids[1])
}

#[test]
fn first_member_sits_at_the_smaller_key_on_vertical_key_axes() {
    let rect = PixelRect::new(0.0, 0.0, 1000.0, 500.0);
    let (plot, key_axis, a, b) = grouped_pair(
        Axis::vertical(0.0, 10.0, rect).expect("key axis"),
        Axis::horizontal(0.0, 100.0, rect).expect("value axis"),
    );
    let axis = plot.axis(key_axis).expect("axis");
    let center = axis.coord_to_pixel(5.0);

    let offset_a = plot.key_pixel_offset(a, 5.0).expect("a");
    let offset_b = plot.key_pixel_offset(b, 5.0).expect("b");

    assert_eq!((offset_a, offset_b), (7.0, -7.0));
    assert!(axis.pixel_to_coord(center + offset_a) < axis.pixel_to_coord(center + offset_b));
}

#[test]
fn first_member_sits_at_the_smaller_key_on_reversed_key_axes() {
    let rect = PixelRect::new(0.0, 0.0, 1000.0, 500.0);
    let (plot, key_axis, a, b) = grouped_pair(
        Axis::horizontal(0.0, 10.0, rect)
            .expect("key axis")
            .with_reversed(true),
        Axis::vertical(0.0, 100.0, rect).expect("value axis"),
    );
    let axis = plot.axis(key_axis).expect("axis");
    let center = axis.coord_to_pixel(5.0);

    let offset_a = plot.key_pixel_offset(a, 5.0).expect("a");
    let offset_b = plot.key_pixel_offset(b, 5.0).expect("b");

    assert_eq!((offset_a, offset_b), (7.0, -7.0));
    assert!(axis.pixel_to_coord(center + offset_a) < axis.pixel_to_coord(center + offset_b));
}

fn group_with_widths(widths: &[f64]) -> (BarPlot, Vec<SeriesId>) {
    let (mut plot, key_axis, value_axis, _) = plot_with_axes(pixel_bars());
    let ids = add_series(&mut plot, key_axis, value_axis, widths.len());
    let group = plot.add_group();
    for (id, width) in ids.iter().zip(widths) {
        plot.series_mut(*id).expect("series").width = *width;
        plot.group_append(group, *id).expect("append");
    }
    (plot, ids)
}

#[test]
fn odd_group_offsets_account_for_each_column_width() {
    let (plot, ids) = group_with_widths(&[10.0, 20.0, 30.0]);

    let offsets: Vec<f64> = ids
        .iter()
        .map(|id| plot.key_pixel_offset(*id, 5.0).expect("offset"))
        .collect();

    // Half the center column, one spacing, then half of the target column.
    assert_eq!(offsets, vec![-19.0, 0.0, 29.0]);
}

#[test]
fn even_group_offsets_add_full_widths_of_inner_columns() {
    let (plot, ids) = group_with_widths(&[10.0, 20.0, 30.0, 40.0]);

    let offsets: Vec<f64> = ids
        .iter()
        .map(|id| plot.key_pixel_offset(*id, 5.0).expect("offset"))
        .collect();

    assert_eq!(offsets, vec![-31.0, -12.0, 17.0, 56.0]);
}
