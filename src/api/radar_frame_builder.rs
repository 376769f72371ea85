use crate::core::radar::axis_angle;
use crate::core::{
    Point, RadarChartData, RadarLayout, RadarPolygon, Viewport, grid_levels, polar_to_cartesian,
};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PolygonPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

/// Distance between the web edge and a label, before the vertical boost.
const LABEL_BASE_OFFSET: f64 = 50.0;
/// Combined height of the label and value lines.
const LABEL_TEXT_HEIGHT: f64 = 44.0;
const VALUE_LINE_OFFSET: f64 = 28.0;

/// Visual geometry of one radar chart, independent of any drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarGeometry {
    pub layout: RadarLayout,
    pub axis_ends: RadarPolygon,
    /// Fractional ring radii, outermost first.
    pub grid_levels: Vec<f64>,
    pub rings: Vec<RadarPolygon>,
    pub vertices: RadarPolygon,
    pub label_anchors: RadarPolygon,
}

/// Extra distance past the web for the label on an axis at `angle_degrees`.
///
/// Labels near the top and bottom get pushed further out because their text
/// grows along the axis direction.
#[must_use]
pub fn label_offset(angle_degrees: f64) -> f64 {
    let vertical = (angle_degrees - 90.0).to_radians().sin().abs();
    LABEL_BASE_OFFSET + (LABEL_TEXT_HEIGHT / 2.0) * (1.0 + vertical * 0.5)
}

#[must_use]
pub fn radar_geometry(chart: &RadarChartData, layout: RadarLayout) -> RadarGeometry {
    let count = chart.axis_count();
    let levels = grid_levels(chart.shared_full_mark());
    let rings = levels.iter().map(|level| layout.ring(*level, count)).collect();
    let axis_ends = (0..count).map(|index| layout.axis_end(index, count)).collect();
    let label_anchors = (0..count)
        .map(|index| {
            let angle = axis_angle(index, count);
            polar_to_cartesian(
                layout.center.x,
                layout.center.y,
                layout.radius + label_offset(angle),
                angle,
            )
        })
        .collect();

    RadarGeometry {
        layout,
        axis_ends,
        grid_levels: levels,
        rings,
        vertices: layout.vertices(chart),
        label_anchors,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarFrameStyle {
    pub web_color: Color,
    pub outer_ring_alpha: f64,
    pub inner_ring_alpha: f64,
    pub axis_alpha: f64,
    pub fill_alpha: f64,
    pub outline_width: f64,
    pub handle_radius: f64,
    pub dragging_handle_radius: f64,
    pub label_color: Color,
    pub value_color: Color,
    pub label_font_size_px: f64,
    pub value_font_size_px: f64,
    /// Opacity multiplier for comparison overlays.
    pub overlay_alpha: f64,
}

impl Default for RadarFrameStyle {
    fn default() -> Self {
        Self {
            web_color: Color::rgb(94.0 / 255.0, 70.0 / 255.0, 121.0 / 255.0),
            outer_ring_alpha: 0.4,
            inner_ring_alpha: 0.2,
            axis_alpha: 0.3,
            fill_alpha: 0.3,
            outline_width: 2.0,
            handle_radius: 6.0,
            dragging_handle_radius: 10.0,
            label_color: Color::rgb(0.93, 0.9, 0.97),
            value_color: Color::rgb(1.0, 0.84, 0.0),
            label_font_size_px: 20.0,
            value_font_size_px: 24.0,
            overlay_alpha: 0.6,
        }
    }
}

/// Everything needed to draw one radar chart.
#[derive(Debug, Clone, Copy)]
pub struct RadarFrameInput<'a> {
    pub viewport: Viewport,
    pub chart: &'a RadarChartData,
    pub layout: RadarLayout,
    pub style: RadarFrameStyle,
    /// Stat whose handle is being dragged, drawn enlarged.
    pub dragging_stat: Option<&'a str>,
    /// Draw handles for pointer editing.
    pub interactive: bool,
    /// Read-only charts drawn on top for comparison.
    pub overlays: &'a [&'a RadarChartData],
}

pub fn build_radar_frame(input: RadarFrameInput<'_>) -> ChartResult<RenderFrame> {
    let RadarFrameInput {
        viewport,
        chart,
        layout,
        style,
        dragging_stat,
        interactive,
        overlays,
    } = input;
    let geometry = radar_geometry(chart, layout);
    let color = Color::from_hex(chart.color())?;
    let mut frame = RenderFrame::new(viewport);

    for end in &geometry.axis_ends {
        frame.lines.push(LinePrimitive::new(
            layout.center,
            *end,
            1.0,
            style.web_color.with_alpha(style.axis_alpha),
        ));
    }

    for (index, ring) in geometry.rings.iter().enumerate() {
        let alpha = if index == 0 {
            style.outer_ring_alpha
        } else {
            style.inner_ring_alpha
        };
        frame.polygons.push(PolygonPrimitive::outline(
            ring.to_vec(),
            1.0,
            style.web_color.with_alpha(alpha),
        ));
    }

    frame.polygons.push(data_polygon(&geometry.vertices, color, style, 1.0));

    for overlay in overlays {
        let overlay_color = Color::from_hex(overlay.color())?;
        let vertices = layout.vertices(overlay);
        frame
            .polygons
            .push(data_polygon(&vertices, overlay_color, style, style.overlay_alpha));
    }

    for (stat, (vertex, anchor)) in chart
        .stats()
        .iter()
        .zip(geometry.vertices.iter().zip(geometry.label_anchors.iter()))
    {
        frame.texts.push(TextPrimitive::new(
            stat.label.clone(),
            anchor.x,
            anchor.y,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Center,
        ));
        frame.texts.push(TextPrimitive::new(
            format!("{}", stat.value.round()),
            anchor.x,
            anchor.y + VALUE_LINE_OFFSET,
            style.value_font_size_px,
            style.value_color,
            TextHAlign::Center,
        ));

        if interactive {
            let radius = if dragging_stat == Some(stat.id.as_str()) {
                style.dragging_handle_radius
            } else {
                style.handle_radius
            };
            frame.circles.push(CirclePrimitive::new(
                *vertex,
                radius,
                color,
                2.0,
                style.web_color.with_alpha(0.5),
            ));
        }
    }

    Ok(frame)
}

fn data_polygon(
    vertices: &[Point],
    color: Color,
    style: RadarFrameStyle,
    alpha: f64,
) -> PolygonPrimitive {
    PolygonPrimitive::outline(vertices.to_vec(), style.outline_width, color.with_alpha(alpha))
        .with_fill(color.with_alpha(style.fill_alpha * alpha))
}
