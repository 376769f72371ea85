use crate::core::{AlignmentChartData, AlignmentCorner, AlignmentTriangle, Point, Viewport};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PolygonPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

/// Visual geometry of one alignment chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentGeometry {
    pub triangle: AlignmentTriangle,
    /// Where the current weights put the point.
    pub point: Point,
    /// Origin of the three decorative spokes.
    pub spoke_origin: Point,
}

#[must_use]
pub fn alignment_geometry(chart: &AlignmentChartData, triangle: AlignmentTriangle) -> AlignmentGeometry {
    AlignmentGeometry {
        triangle,
        point: triangle.point_from_weights(chart.values()),
        spoke_origin: triangle.base_midpoint(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentFrameStyle {
    pub point_color: Color,
    pub outline_color: Color,
    pub spoke_color: Color,
    pub connector_alpha: f64,
    pub point_radius: f64,
    pub dragging_point_radius: f64,
    pub label_color: Color,
    pub value_color: Color,
    pub label_font_size_px: f64,
    pub value_font_size_px: f64,
}

impl Default for AlignmentFrameStyle {
    fn default() -> Self {
        Self {
            point_color: Color::rgb(74.0 / 255.0, 52.0 / 255.0, 97.0 / 255.0),
            outline_color: Color::rgba(1.0, 1.0, 1.0, 0.2),
            spoke_color: Color::rgba(1.0, 1.0, 1.0, 0.1),
            connector_alpha: 0.3,
            point_radius: 10.0,
            dragging_point_radius: 14.0,
            label_color: Color::rgb(0.93, 0.9, 0.97),
            value_color: Color::rgb(1.0, 0.84, 0.0),
            label_font_size_px: 14.0,
            value_font_size_px: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AlignmentFrameInput<'a> {
    pub viewport: Viewport,
    pub chart: &'a AlignmentChartData,
    pub triangle: AlignmentTriangle,
    pub style: AlignmentFrameStyle,
    pub dragging: bool,
}

pub fn build_alignment_frame(input: AlignmentFrameInput<'_>) -> ChartResult<RenderFrame> {
    let AlignmentFrameInput {
        viewport,
        chart,
        triangle,
        style,
        dragging,
    } = input;
    let geometry = alignment_geometry(chart, triangle);
    let corners = AlignmentCorner::ALL.map(|corner| triangle.corner(corner));

    let mut frame = RenderFrame::new(viewport).with_polygon(PolygonPrimitive::outline(
        corners.to_vec(),
        2.0,
        style.outline_color,
    ));

    for corner in corners {
        frame.lines.push(LinePrimitive::new(
            geometry.spoke_origin,
            corner,
            1.0,
            style.spoke_color,
        ));
    }
    for corner in corners {
        frame.lines.push(LinePrimitive::new(
            geometry.point,
            corner,
            1.0,
            style.point_color.with_alpha(style.connector_alpha),
        ));
    }

    let (a, b, c) = chart.values().rounded();
    let percents = [a, b, c];
    for corner in AlignmentCorner::ALL {
        let anchor = triangle.corner(corner);
        let (label_at, value_at, align) = match corner {
            AlignmentCorner::Top => (
                Point::new(anchor.x, anchor.y - 20.0),
                Point::new(anchor.x, anchor.y - 5.0),
                TextHAlign::Center,
            ),
            AlignmentCorner::Right => (
                Point::new(anchor.x + 20.0, anchor.y + 10.0),
                Point::new(anchor.x + 10.0, anchor.y + 25.0),
                TextHAlign::Left,
            ),
            AlignmentCorner::Left => (
                Point::new(anchor.x - 20.0, anchor.y + 10.0),
                Point::new(anchor.x - 10.0, anchor.y + 25.0),
                TextHAlign::Right,
            ),
        };
        frame.texts.push(TextPrimitive::new(
            chart.label(corner),
            label_at.x,
            label_at.y,
            style.label_font_size_px,
            style.label_color,
            align,
        ));
        frame.texts.push(TextPrimitive::new(
            format!("{}%", percents[corner.index()]),
            value_at.x,
            value_at.y,
            style.value_font_size_px,
            style.value_color,
            align,
        ));
    }

    let radius = if dragging {
        style.dragging_point_radius
    } else {
        style.point_radius
    };
    frame.circles.push(CirclePrimitive::new(
        geometry.point,
        radius,
        style.point_color,
        2.0,
        Color::rgb(1.0, 1.0, 1.0),
    ));

    Ok(frame)
}
