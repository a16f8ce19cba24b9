//! Annotated stress-strain charts
//!
//! [`ChartPlan`] decides what goes on the chart (curve, yield and tensile
//! markers, annotation text). [`ChartRenderer`] draws a plan with plotters
//! into an RGB buffer, encodes it as PNG, and substitutes a placeholder image
//! when anything goes wrong.

pub mod backend;

use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder};
use log::{debug, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{AnalysisError, AnalysisResult};
use crate::math;
use crate::results::{PropertyKind, PropertyResult};
use backend::GlyphTextBackend;

/// Properties listed in the annotation block
const ANNOTATED: [PropertyKind; 4] = [
    PropertyKind::ElasticModulus,
    PropertyKind::YieldStrength,
    PropertyKind::TensileStrength,
    PropertyKind::FractureStrain,
];

const MIN_SIZE: u32 = 64;
const MAX_SIZE: u32 = 8192;
const MAX_LINE_WIDTH: u32 = 16;
const MAX_TEXT_SCALE: u32 = 16;

/// Font size in pixels per unit of `text_scale`
const FONT_PX: f64 = 8.0;

const PLACEHOLDER_SIZE: (u32, u32) = (320, 120);

const INK: RGBColor = RGBColor(30, 30, 30);
const GRID_LINE: RGBColor = RGBColor(225, 225, 225);
const CURVE: RGBColor = RGBColor(31, 119, 180);
const YIELD_MARKER: RGBColor = RGBColor(214, 39, 40);
const TENSILE_MARKER: RGBColor = RGBColor(44, 160, 44);
const ANNOTATION_FILL: RGBColor = RGBColor(245, 222, 179);

/// Chart layout options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Draw grid lines
    pub grid: bool,
    /// Text size, in steps of 8 px
    pub text_scale: u32,
    /// Pen width of the curve
    pub line_width: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 600,
            grid: true,
            text_scale: 2,
            line_width: 2,
        }
    }
}

impl ChartOptions {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(MIN_SIZE..=MAX_SIZE).contains(&value) {
                return Err(AnalysisError::Config(format!(
                    "chart {} must be within {}..={}, got {}",
                    name, MIN_SIZE, MAX_SIZE, value
                )));
            }
        }
        let bounded = [
            ("text_scale", self.text_scale, MAX_TEXT_SCALE),
            ("line_width", self.line_width, MAX_LINE_WIDTH),
        ];
        for (name, value, max) in bounded {
            if value == 0 || value > max {
                return Err(AnalysisError::Config(format!(
                    "{} must be within 1..={}, got {}",
                    name, max, value
                )));
            }
        }
        Ok(())
    }
}

/// How the measured data is drawn
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSeries {
    /// Connected polyline through all samples
    Line(Vec<(f64, f64)>),
    /// One sample, drawn as a marker
    Point((f64, f64)),
}

impl CurveSeries {
    pub fn points(&self) -> &[(f64, f64)] {
        match self {
            CurveSeries::Line(points) => points,
            CurveSeries::Point(point) => std::slice::from_ref(point),
        }
    }
}

/// Everything that ends up on a chart, in data coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    pub title: String,
    pub series: CurveSeries,
    /// Raw sample whose stress is closest to the yield strength
    pub yield_point: Option<(f64, f64)>,
    /// Raw sample with the highest stress
    pub tensile_point: Option<(f64, f64)>,
    /// Lines of the annotation box
    pub annotation: Vec<String>,
}

impl ChartPlan {
    /// Select curve, markers and annotation for a chart.
    ///
    /// Markers are looked up on the raw stress, not the smoothed stress the
    /// engine used.
    pub fn build(
        strain: &[f64],
        stress: &[f64],
        result: Option<&PropertyResult>,
        label: &str,
    ) -> AnalysisResult<Self> {
        if strain.len() != stress.len() {
            return Err(AnalysisError::RenderFailure(format!(
                "strain has {} samples but stress has {}",
                strain.len(),
                stress.len()
            )));
        }
        if strain.is_empty() {
            return Err(AnalysisError::RenderFailure("nothing to plot".to_string()));
        }
        if strain.iter().chain(stress).any(|v| !v.is_finite()) {
            return Err(AnalysisError::RenderFailure(
                "data contains non-finite values".to_string(),
            ));
        }

        let points: Vec<(f64, f64)> = strain.iter().copied().zip(stress.iter().copied()).collect();
        let series = if points.len() > 1 {
            CurveSeries::Line(points)
        } else {
            CurveSeries::Point(points[0])
        };

        let (yield_point, tensile_point) = match result {
            Some(r) => {
                let y = math::argmin_distance(stress, r.yield_strength);
                let t = math::argmax(stress);
                (
                    y.map(|i| (strain[i], stress[i])),
                    t.map(|i| (strain[i], stress[i])),
                )
            }
            None => (None, None),
        };

        let mut annotation = vec![
            format!("Material: {}", label),
            format!("Samples: {}", strain.len()),
        ];
        if let Some(r) = result {
            annotation.extend(
                ANNOTATED
                    .iter()
                    .map(|&kind| format!("{}: {:.2}", kind.display_name(), r.get(kind))),
            );
        }

        Ok(Self {
            title: format!("{} stress-strain curve", label),
            series,
            yield_point,
            tensile_point,
            annotation,
        })
    }
}

/// Data range with a 5% margin; flat data is widened so the axis has extent
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if max - min <= f64::EPSILON * max.abs().max(1.0) {
        let pad = if min.abs() > 0.0 { min.abs() * 0.1 } else { 1.0 };
        (min - pad)..(max + pad)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad)..(max + pad)
    }
}

/// Tick label with enough decimals to tell neighbouring ticks on an axis
/// spanning `span` apart
fn tick_label(v: f64, span: f64) -> String {
    let decimals = if span > 0.0 && span.is_finite() {
        (1.0 - span.log10().floor()).clamp(0.0, 6.0) as usize
    } else {
        2
    };
    format!("{:.*}", decimals, v)
}

fn label_font(size: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal)
}

fn plot_error(e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::RenderFailure(e.to_string())
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> AnalysisResult<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(buffer, width, height, ExtendedColorType::Rgb8)
        .map_err(plot_error)?;
    Ok(bytes)
}

/// Draw into a fresh RGB buffer of the given size and encode it as PNG
fn rasterize<F>(width: u32, height: u32, draw: F) -> AnalysisResult<Vec<u8>>
where
    F: FnOnce(
        &DrawingArea<GlyphTextBackend<BitMapBackend<'_>>, Shift>,
    ) -> AnalysisResult<()>,
{
    let mut buffer = vec![255u8; width as usize * height as usize * 3];
    {
        let root = GlyphTextBackend::new(BitMapBackend::with_buffer(&mut buffer, (width, height)))
            .into_drawing_area();
        draw(&root)?;
        root.present().map_err(plot_error)?;
    }
    encode_png(&buffer, width, height)
}

/// Renders stress-strain charts to PNG
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    options: ChartOptions,
}

impl ChartRenderer {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Render a chart; never fails, returns a placeholder PNG on error
    pub fn render(
        &self,
        strain: &[f64],
        stress: &[f64],
        result: Option<&PropertyResult>,
        label: &str,
    ) -> Vec<u8> {
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
            self.try_render(strain, stress, result, label)
        }));
        match attempt {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                warn!("Chart rendering failed: {}", e);
                self.placeholder()
            }
            Err(_) => {
                warn!("Chart backend panicked");
                self.placeholder()
            }
        }
    }

    /// Render a chart, reporting failures
    pub fn try_render(
        &self,
        strain: &[f64],
        stress: &[f64],
        result: Option<&PropertyResult>,
        label: &str,
    ) -> AnalysisResult<Vec<u8>> {
        self.options.validate()?;
        let plan = ChartPlan::build(strain, stress, result, label)?;
        debug!(
            "Rendering {} points at {}x{}",
            plan.series.points().len(),
            self.options.width,
            self.options.height
        );
        rasterize(self.options.width, self.options.height, |root| {
            self.draw(root, &plan).map_err(plot_error)
        })
    }

    /// Small image reading "RENDER FAILED"
    pub fn placeholder(&self) -> Vec<u8> {
        let (w, h) = PLACEHOLDER_SIZE;
        let drawn = rasterize(w, h, |root| {
            let border = [(0, 0), (w as i32 - 1, h as i32 - 1)];
            root.draw(&Rectangle::new(border, YIELD_MARKER.stroke_width(2)))
                .map_err(plot_error)?;
            let style = label_font(24.0)
                .color(&YIELD_MARKER)
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new("RENDER FAILED", (w as i32 / 2, h as i32 / 2), style))
                .map_err(plot_error)
        });
        drawn.unwrap_or_else(|e| {
            warn!("Placeholder encoding failed: {}", e);
            Vec::new()
        })
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        plan: &ChartPlan,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let opts = &self.options;
        let font_px = opts.text_scale as f64 * FONT_PX;
        let text = label_font(font_px);

        root.fill(&WHITE)?;

        let points = plan.series.points();
        let x_range = padded_range(points.iter().map(|p| p.0));
        let y_range = padded_range(points.iter().map(|p| p.1));
        let x_span = x_range.end - x_range.start;
        let y_span = y_range.end - y_range.start;

        let x_label_area = ((font_px * 3.5) as u32).min(opts.height / 4);
        let y_label_area = ((font_px * 7.0) as u32).min(opts.width / 4);
        let mut chart = ChartBuilder::on(root)
            .margin(opts.width.min(opts.height) / 30)
            .caption(&plan.title, label_font(font_px * 1.25).color(&INK))
            .x_label_area_size(x_label_area)
            .y_label_area_size(y_label_area)
            .build_cartesian_2d(x_range, y_range)?;

        let x_fmt = |v: &f64| tick_label(*v, x_span);
        let y_fmt = |v: &f64| tick_label(*v, y_span);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc("Strain")
            .y_desc("Stress (MPa)")
            .x_labels(6)
            .y_labels(6)
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .label_style(text.color(&INK))
            .axis_desc_style(text.color(&INK))
            .bold_line_style(GRID_LINE)
            .light_line_style(WHITE);
        if !opts.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        let pen = CURVE.stroke_width(opts.line_width);
        let marker = 3 + opts.text_scale;
        match &plan.series {
            CurveSeries::Line(points) => {
                chart
                    .draw_series(LineSeries::new(points.iter().copied(), pen))?
                    .label("Experimental data")
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], pen));
            }
            CurveSeries::Point(point) => {
                chart
                    .draw_series(std::iter::once(Circle::new(*point, 4, CURVE.filled())))?
                    .label("Experimental data")
                    .legend(|(x, y)| Circle::new((x + 10, y), 4, CURVE.filled()));
            }
        }

        let markers = [
            (plan.yield_point, YIELD_MARKER, "Yield point"),
            (plan.tensile_point, TENSILE_MARKER, "Tensile strength"),
        ];
        for (point, color, name) in markers {
            if let Some(point) = point {
                chart
                    .draw_series(std::iter::once(Circle::new(point, marker, color.filled())))?
                    .label(name)
                    .legend(move |(x, y)| Circle::new((x + 10, y), marker, color.filled()));
            }
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.9))
            .border_style(GRID_LINE)
            .label_font(text.color(&INK))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;

        let (x_px, y_px) = chart.plotting_area().get_pixel_range();
        draw_annotation(root, &plan.annotation, (x_px.start + 10, y_px.start + 10), &text)
    }
}

/// Annotation box anchored at its top-left corner
fn draw_annotation<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    lines: &[String],
    (x, y): (i32, i32),
    font: &FontDesc<'_>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if lines.is_empty() {
        return Ok(());
    }
    let style = font.color(&INK);
    let mut width = 0;
    let mut line_height = 0;
    for line in lines {
        let (w, h) = root.estimate_text_size(line, &style)?;
        width = width.max(w as i32);
        line_height = line_height.max(h as i32);
    }
    let pad = 8;
    let gap = line_height + line_height / 2;
    let corner = (x + width + 2 * pad, y + gap * lines.len() as i32 + pad);

    root.draw(&Rectangle::new([(x, y), corner], ANNOTATION_FILL.filled()))?;
    root.draw(&Rectangle::new([(x, y), corner], INK.stroke_width(1)))?;
    for (i, line) in lines.iter().enumerate() {
        let origin = (x + pad, y + pad + i as i32 * gap);
        root.draw(&Text::new(line.as_str(), origin, style.clone()))?;
    }
    Ok(())
}
