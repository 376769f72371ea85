use stat_charts::api::{
    AlignmentFrameInput, AlignmentFrameStyle, RadarFrameInput, RadarFrameStyle,
    alignment_geometry, build_alignment_frame, build_radar_frame, label_offset, radar_geometry,
};
use stat_charts::core::{
    AlignmentChartData, AlignmentTriangle, AlignmentWeights, Point, RadarChartData, RadarLayout,
    Viewport,
};
use stat_charts::render::{
    CirclePrimitive, Color, LinePrimitive, NullRenderer, PolygonPrimitive, RenderFrame, Renderer,
};

fn radar_input<'a>(
    chart: &'a RadarChartData,
    overlays: &'a [&'a RadarChartData],
    interactive: bool,
) -> RadarFrameInput<'a> {
    RadarFrameInput {
        viewport: Viewport::square(400),
        chart,
        layout: RadarLayout::for_size(400.0, 80.0),
        style: RadarFrameStyle::default(),
        dragging_stat: None,
        interactive,
        overlays,
    }
}

#[test]
fn radar_geometry_has_one_entry_per_axis() {
    let chart = RadarChartData::default();
    let geometry = radar_geometry(&chart, RadarLayout::for_size(400.0, 80.0));

    assert_eq!(geometry.axis_ends.len(), 5);
    assert_eq!(geometry.vertices.len(), 5);
    assert_eq!(geometry.label_anchors.len(), 5);
    assert_eq!(geometry.grid_levels.len(), 5);
    assert!(geometry.rings.iter().all(|ring| ring.len() == 5));
}

#[test]
fn labels_on_vertical_axes_sit_further_out() {
    assert!(label_offset(0.0) > label_offset(90.0));
    assert_eq!(label_offset(90.0), 72.0);
    assert_eq!(label_offset(0.0), 83.0);
}

#[test]
fn radar_frame_contains_web_polygon_handles_and_labels() {
    let chart = RadarChartData::default();
    let frame = build_radar_frame(radar_input(&chart, &[], true)).expect("frame");

    assert_eq!(frame.lines.len(), 5);
    assert_eq!(frame.polygons.len(), 6);
    assert_eq!(frame.circles.len(), 5);
    assert_eq!(frame.texts.len(), 10);
    assert_eq!(frame.texts[1].text, "50");

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("valid frame");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_polygon_count, 6);
}

#[test]
fn readonly_radar_frame_has_no_handles() {
    let chart = RadarChartData::default();
    let frame = build_radar_frame(radar_input(&chart, &[], false)).expect("frame");
    assert!(frame.circles.is_empty());
}

#[test]
fn small_scale_draws_one_ring_per_unit() {
    let mut chart = RadarChartData::default();
    chart.set_full_mark(6.0);
    let frame = build_radar_frame(radar_input(&chart, &[], true)).expect("frame");
    assert_eq!(frame.polygons.len(), 7);
}

#[test]
fn dragged_handle_is_enlarged() {
    let chart = RadarChartData::default();
    let dragged = chart.stats()[2].id.clone();
    let mut input = radar_input(&chart, &[], true);
    input.dragging_stat = Some(dragged.as_str());

    let frame = build_radar_frame(input).expect("frame");
    let style = RadarFrameStyle::default();
    assert_eq!(frame.circles[2].radius, style.dragging_handle_radius);
    assert_eq!(frame.circles[0].radius, style.handle_radius);
}

#[test]
fn overlays_add_one_polygon_each() {
    let chart = RadarChartData::default();
    let mut other = RadarChartData::default();
    other.set_color("#ff0000").expect("color");
    let overlays = [&other];

    let frame = build_radar_frame(radar_input(&chart, &overlays, true)).expect("frame");
    assert_eq!(frame.polygons.len(), 7);
    let overlay = frame.polygons.last().expect("overlay polygon");
    assert_eq!(overlay.stroke_color.map(|c| c.red), Some(1.0));
}

#[test]
fn alignment_frame_places_point_from_weights() {
    let mut chart = AlignmentChartData::default();
    chart.set_weights(AlignmentWeights::new(100.0, 0.0, 0.0));
    let triangle = AlignmentTriangle::for_size(400.0, 60.0);

    let geometry = alignment_geometry(&chart, triangle);
    assert!(geometry.point.distance_to(triangle.top) < 1e-9);
    assert_eq!(geometry.spoke_origin, triangle.base_midpoint());

    let frame = build_alignment_frame(AlignmentFrameInput {
        viewport: Viewport::square(400),
        chart: &chart,
        triangle,
        style: AlignmentFrameStyle::default(),
        dragging: false,
    })
    .expect("frame");

    assert_eq!(frame.polygons.len(), 1);
    assert_eq!(frame.lines.len(), 6);
    assert_eq!(frame.circles.len(), 1);
    assert_eq!(frame.texts.len(), 6);
    assert_eq!(frame.texts[0].text, "Mind");
    assert_eq!(frame.texts[1].text, "100%");
    NullRenderer::default().render(&frame).expect("valid frame");
}

#[test]
fn frame_validation_rejects_bad_primitives() {
    let viewport = Viewport::square(100);
    let red = Color::rgb(1.0, 0.0, 0.0);

    let nan_line = RenderFrame::new(viewport).with_line(LinePrimitive::new(
        Point::new(f64::NAN, 0.0),
        Point::new(1.0, 1.0),
        1.0,
        red,
    ));
    assert!(nan_line.validate().is_err());

    let two_points = RenderFrame::new(viewport).with_polygon(PolygonPrimitive::outline(
        vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
        1.0,
        red,
    ));
    assert!(two_points.validate().is_err());

    let zero_circle = RenderFrame::new(viewport).with_circle(CirclePrimitive::new(
        Point::new(5.0, 5.0),
        0.0,
        red,
        1.0,
        red,
    ));
    assert!(zero_circle.validate().is_err());

    assert!(RenderFrame::new(Viewport::new(0, 0)).validate().is_err());
    assert!(RenderFrame::new(viewport).is_empty());
}

#[test]
fn hex_colors_parse() {
    let color = Color::from_hex("#4a3461").expect("color");
    assert!((color.red - 74.0 / 255.0).abs() < 1e-12);
    assert!((color.blue - 97.0 / 255.0).abs() < 1e-12);
    assert_eq!(Color::from_hex("#fff").expect("short form"), Color::rgb(1.0, 1.0, 1.0));
    assert!(Color::from_hex("4a3461").is_err());
    assert!(Color::from_hex("#4a34zz").is_err());
}

#[test]
fn alignment_percent_labels_are_whole_numbers() {
    let mut chart = AlignmentChartData::default();
    chart.set_weights(AlignmentWeights::new(33.6, 33.2, 33.2));
    let frame = build_alignment_frame(AlignmentFrameInput {
        viewport: Viewport::square(400),
        chart: &chart,
        triangle: AlignmentTriangle::for_size(400.0, 60.0),
        style: AlignmentFrameStyle::default(),
        dragging: false,
    })
    .expect("frame");

    assert_eq!(frame.texts[1].text, "34%");
    assert_eq!(frame.texts[3].text, "33%");
    assert_eq!(frame.texts[5].text, "33%");
}
