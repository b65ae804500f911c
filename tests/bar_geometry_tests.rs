use approx::assert_relative_eq;
use barchart_rs::core::{
    Axis, AxisId, AxisScaleType, AxisTransform, BarData, DataRange, Orientation, PixelPoint,
    PixelRect, WidthType,
};
use barchart_rs::{BarHit, BarPlot, BarPlotConfig, ChartError};

const RECT: PixelRect = PixelRect::new(0.0, 0.0, 1000.0, 500.0);

fn plot_with_axes(config: BarPlotConfig) -> (BarPlot, AxisId, AxisId) {
    let mut plot = BarPlot::new(config);
    let key_axis = plot.add_axis(Axis::horizontal(0.0, 10.0, RECT).expect("key axis"));
    let value_axis = plot.add_axis(Axis::vertical(0.0, 100.0, RECT).expect("value axis"));
    (plot, key_axis, value_axis)
}

fn assert_points(actual: [PixelPoint; 4], expected: [(f64, f64); 4]) {
    for (point, (x, y)) in actual.iter().zip(expected) {
        assert_relative_eq!(point.x, x, epsilon = 1e-9);
        assert_relative_eq!(point.y, y, epsilon = 1e-9);
    }
}

#[test]
fn axes_map_in_their_growth_direction() {
    let horizontal = Axis::horizontal(0.0, 10.0, RECT).expect("horizontal");
    let vertical = Axis::vertical(0.0, 100.0, RECT).expect("vertical");
    let reversed = Axis::horizontal(0.0, 10.0, RECT)
        .expect("reversed")
        .with_reversed(true);

    assert_relative_eq!(horizontal.coord_to_pixel(2.5), 250.0, epsilon = 1e-9);
    assert_relative_eq!(vertical.coord_to_pixel(20.0), 400.0, epsilon = 1e-9);
    assert_relative_eq!(reversed.coord_to_pixel(2.5), 750.0, epsilon = 1e-9);
    assert_relative_eq!(reversed.pixel_to_coord(750.0), 2.5, epsilon = 1e-9);
    assert_eq!(vertical.orientation(), Orientation::Vertical);
}

#[test]
fn logarithmic_axes_space_decades_evenly() {
    let axis = Axis::new_with_scale(
        Orientation::Horizontal,
        DataRange::new(1.0, 1000.0),
        RECT,
        AxisScaleType::Logarithmic,
    )
    .expect("log axis");

    assert_relative_eq!(axis.coord_to_pixel(10.0), 1000.0 / 3.0, epsilon = 1e-9);
    assert_relative_eq!(axis.pixel_to_coord(1000.0 / 3.0 * 2.0), 100.0, epsilon = 1e-9);
}

#[test]
fn invalid_axis_setup_is_rejected() {
    assert!(matches!(
        Axis::horizontal(1.0, 1.0, RECT),
        Err(ChartError::InvalidRange { .. })
    ));
    assert!(matches!(
        Axis::new_with_scale(
            Orientation::Vertical,
            DataRange::new(-1.0, 10.0),
            RECT,
            AxisScaleType::Logarithmic
        ),
        Err(ChartError::InvalidRange { .. })
    ));
    assert!(matches!(
        Axis::horizontal(0.0, 1.0, PixelRect::new(0.0, 0.0, 0.0, 10.0)),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn series_need_known_axes() {
    let (mut plot, key_axis, _) = plot_with_axes(BarPlotConfig::default());
    let mut other = BarPlot::default();
    let foreign = (0..3)
        .map(|_| other.add_axis(Axis::vertical(0.0, 1.0, RECT).expect("axis")))
        .last()
        .expect("axis id");

    assert_eq!(
        plot.add_series(key_axis, foreign),
        Err(ChartError::UnknownAxis)
    );
}

#[test]
fn pixel_width_follows_the_width_type() {
    let (mut plot, key_axis, value_axis) = plot_with_axes(BarPlotConfig::default());
    let id = plot.add_series(key_axis, value_axis).expect("series");

    let (lower, upper) = plot.pixel_width(id, 4.0).expect("plot coordinates");
    assert_relative_eq!(lower, -37.5, epsilon = 1e-9);
    assert_relative_eq!(upper, 37.5, epsilon = 1e-9);

    let series = plot.series_mut(id).expect("series");
    series.width = 12.0;
    series.width_type = WidthType::Absolute;
    assert_eq!(plot.pixel_width(id, 4.0).expect("absolute"), (-6.0, 6.0));

    let series = plot.series_mut(id).expect("series");
    series.width = 0.02;
    series.width_type = WidthType::AxisRectRatio;
    let (lower, upper) = plot.pixel_width(id, 4.0).expect("ratio");
    assert_relative_eq!(lower, -10.0, epsilon = 1e-9);
    assert_relative_eq!(upper, 10.0, epsilon = 1e-9);
}

#[test]
fn pixel_width_swaps_on_reversed_and_vertical_key_axes() {
    let config = BarPlotConfig::default().with_bar_width(10.0, WidthType::Absolute);
    let mut plot = BarPlot::new(config);
    let reversed = plot.add_axis(
        Axis::horizontal(0.0, 10.0, RECT)
            .expect("axis")
            .with_reversed(true),
    );
    let vertical = plot.add_axis(Axis::vertical(0.0, 10.0, RECT).expect("axis"));
    let value = plot.add_axis(Axis::vertical(0.0, 1.0, RECT).expect("axis"));
    let on_reversed = plot.add_series(reversed, value).expect("series");
    let on_vertical = plot.add_series(vertical, value).expect("series");

    assert_eq!(plot.pixel_width(on_reversed, 1.0).expect("reversed"), (5.0, -5.0));
    assert_eq!(plot.pixel_width(on_vertical, 1.0).expect("vertical"), (5.0, -5.0));
}

#[test]
fn bar_polygon_starts_on_the_stacked_base() {
    let (mut plot, key_axis, value_axis) = plot_with_axes(BarPlotConfig::default());
    let a = plot.add_series(key_axis, value_axis).expect("a");
    let b = plot.add_series(key_axis, value_axis).expect("b");
    plot.add_point(a, BarData::new(1.0, 10.0)).expect("a data");
    plot.add_point(b, BarData::new(1.0, 5.0)).expect("b data");
    plot.move_above(b, Some(a)).expect("stack");

    let polygon = plot.bar_polygon(b, 1.0, 5.0).expect("polygon");

    assert_points(
        polygon,
        [(62.5, 450.0), (62.5, 425.0), (137.5, 425.0), (137.5, 450.0)],
    );
}

#[test]
fn bar_polygon_on_a_vertical_key_axis_grows_sideways() {
    let config = BarPlotConfig::default().with_bar_width(10.0, WidthType::Absolute);
    let mut plot = BarPlot::new(config);
    let key_axis = plot.add_axis(Axis::vertical(0.0, 10.0, RECT).expect("key axis"));
    let value_axis = plot.add_axis(Axis::horizontal(0.0, 100.0, RECT).expect("value axis"));
    let id = plot.add_series(key_axis, value_axis).expect("series");

    let polygon = plot.bar_polygon(id, 2.0, 30.0).expect("polygon");

    assert_points(
        polygon,
        [(0.0, 405.0), (300.0, 405.0), (300.0, 395.0), (0.0, 395.0)],
    );
}

#[test]
fn key_range_includes_bar_width() {
    let (mut plot, key_axis, value_axis) = plot_with_axes(BarPlotConfig::default());
    let id = plot.add_series(key_axis, value_axis).expect("series");
    assert_eq!(plot.key_range(id).expect("empty"), None);

    plot.set_data(id, &[3.0, 1.0], &[1.0, 2.0], false)
        .expect("data");
    let range = plot.key_range(id).expect("range").expect("non-empty");

    assert_relative_eq!(range.lower, 0.625, epsilon = 1e-9);
    assert_relative_eq!(range.upper, 3.375, epsilon = 1e-9);
}

#[test]
fn key_range_includes_group_offset() {
    let config = BarPlotConfig::default().with_bar_width(10.0, WidthType::Absolute);
    let (mut plot, key_axis, value_axis) = plot_with_axes(config);
    let a = plot.add_series(key_axis, value_axis).expect("a");
    let b = plot.add_series(key_axis, value_axis).expect("b");
    let group = plot.add_group();
    plot.group_append(group, a).expect("a");
    plot.group_append(group, b).expect("b");
    plot.set_data(b, &[1.0, 3.0], &[1.0, 1.0], true)
        .expect("data");

    // b sits 7 px right of its keys: its bars span [key + 2 px, key + 12 px].
    let range = plot.key_range(b).expect("range").expect("non-empty");

    assert_relative_eq!(range.lower, 1.0, epsilon = 1e-9);
    assert_relative_eq!(range.upper, 3.12, epsilon = 1e-9);
}

#[test]
fn visible_bounds_include_bars_reaching_into_the_axis() {
    let (mut plot, key_axis, value_axis) = plot_with_axes(BarPlotConfig::default());
    let id = plot.add_series(key_axis, value_axis).expect("series");
    plot.set_data(
        id,
        &[-1.0, 0.2, 5.0, 10.3, 12.0],
        &[1.0, 1.0, 1.0, 1.0, 1.0],
        true,
    )
    .expect("data");

    assert_eq!(plot.visible_data_bounds(id).expect("bounds"), 1..4);
}

#[test]
fn hit_test_finds_the_topmost_bar() {
    let (mut plot, key_axis, value_axis) = plot_with_axes(BarPlotConfig::default());
    let below = plot.add_series(key_axis, value_axis).expect("below");
    let above = plot.add_series(key_axis, value_axis).expect("above");
    plot.add_point(below, BarData::new(5.0, 50.0)).expect("data");
    plot.add_point(above, BarData::new(5.0, 20.0)).expect("data");

    assert_eq!(
        plot.hit_test(PixelPoint::new(500.0, 450.0)).expect("hit"),
        Some(BarHit {
            series: above,
            index: 0,
            point: BarData::new(5.0, 20.0)
        })
    );
    assert_eq!(
        plot.hit_test(PixelPoint::new(500.0, 300.0))
            .expect("hit")
            .map(|hit| hit.series),
        Some(below)
    );
    assert_eq!(plot.hit_test(PixelPoint::new(700.0, 450.0)).expect("miss"), None);
    assert_eq!(plot.select_test(below, PixelPoint::new(500.0, 600.0)).expect("outside"), None);
}
