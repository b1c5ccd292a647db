// File: crates/annotation-render-skia/src/lib.rs
// Summary: Skia implementation of the annotation drawing surface plus headless PNG/RGBA rendering.

pub mod text;

use anyhow::Result;
use log::debug;
use skia_safe as skia;

use annotation_core::geometry::PathCommand;
use annotation_core::{
    AnnotationState, Chart, ChartArea, Color, DrawTime, FontSpec, Point, Rect, Stroke, Surface, TextBaseline, Theme,
};

pub use text::TextShaper;

pub(crate) fn to_skia_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn to_skia_rect(r: Rect) -> skia::Rect {
    skia::Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32)
}

fn pt(p: Point) -> skia::Point {
    skia::Point::new(p.x as f32, p.y as f32)
}

fn fill_paint(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(to_skia_color(color));
    paint
}

fn stroke_paint(stroke: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width as f32);
    paint.set_color(to_skia_color(stroke.color));
    if !stroke.dash.is_empty() {
        let intervals: Vec<f32> = stroke.dash.iter().map(|&d| d as f32).collect();
        paint.set_path_effect(skia::PathEffect::dash(&intervals, stroke.dash_offset as f32));
    }
    paint
}

fn build_path(commands: &[PathCommand]) -> skia::Path {
    let mut path = skia::Path::new();
    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo(p) => {
                path.move_to(pt(p));
            }
            PathCommand::Arc { center, radius, start, end } => {
                let oval = skia::Rect::from_ltrb(
                    (center.x - radius) as f32,
                    (center.y - radius) as f32,
                    (center.x + radius) as f32,
                    (center.y + radius) as f32,
                );
                path.arc_to(oval, start.to_degrees() as f32, (end - start).to_degrees() as f32, false);
            }
            PathCommand::Rect(r) => {
                path.add_rect(to_skia_rect(r), None);
            }
            PathCommand::Close => {
                path.close();
            }
        }
    }
    path
}

/// [`Surface`] over a Skia canvas. Text goes through a shared [`TextShaper`].
pub struct SkiaSurface<'a> {
    canvas: &'a skia::Canvas,
    shaper: &'a TextShaper,
}

impl<'a> SkiaSurface<'a> {
    pub fn new(canvas: &'a skia::Canvas, shaper: &'a TextShaper) -> Self {
        Self { canvas, shaper }
    }
}

impl Surface for SkiaSurface<'_> {
    fn save(&mut self) {
        self.canvas.save();
    }

    fn restore(&mut self) {
        self.canvas.restore();
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.canvas.clip_rect(to_skia_rect(rect), None, None);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.canvas.translate((dx as f32, dy as f32));
    }

    fn rotate(&mut self, radians: f64) {
        self.canvas.rotate(radians.to_degrees() as f32, None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.canvas.draw_rect(to_skia_rect(rect), &fill_paint(color));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        if stroke.width > 0.0 {
            self.canvas.draw_rect(to_skia_rect(rect), &stroke_paint(stroke));
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        if stroke.width > 0.0 {
            self.canvas.draw_line(pt(from), pt(to), &stroke_paint(stroke));
        }
    }

    fn fill_path(&mut self, path: &[PathCommand], color: Color) {
        self.canvas.draw_path(&build_path(path), &fill_paint(color));
    }

    fn fill_text(&mut self, text: &str, at: Point, baseline: TextBaseline, font: &FontSpec) {
        self.shaper.draw_centered(self.canvas, text, at, baseline, font);
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> f64 {
        self.shaper.measure_width(text, font) as f64
    }
}

/// Headless render settings.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub theme: Theme,
    /// Outline the chart area and draw a light grid behind the annotations.
    pub draw_frame: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: annotation_core::types::WIDTH,
            height: annotation_core::types::HEIGHT,
            theme: Theme::default(),
            draw_frame: true,
        }
    }
}

fn draw_frame(canvas: &skia::Canvas, area: ChartArea, theme: &Theme) {
    let mut grid = Stroke::solid(1.0, theme.border);
    grid.color.a = 40;
    let paint = stroke_paint(&grid);
    for i in 1..10 {
        let x = (area.left + area.width() * i as f64 / 10.0) as f32;
        let y = (area.top + area.height() * i as f64 / 10.0) as f32;
        canvas.draw_line((x, area.top as f32), (x, area.bottom as f32), &paint);
        canvas.draw_line((area.left as f32, y), (area.right as f32, y), &paint);
    }
    canvas.draw_rect(to_skia_rect(area.rect()), &stroke_paint(&Stroke::solid(1.0, theme.border)));
}

fn render_surface(state: &mut AnnotationState, chart: &Chart, opts: &RenderOptions) -> Result<skia::Surface> {
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let shaper = TextShaper::new();
    {
        let canvas = surface.canvas();
        canvas.clear(to_skia_color(opts.theme.background));
        let mut target = SkiaSurface::new(canvas, &shaper);
        state.draw(DrawTime::BeforeDatasetsDraw, chart, &mut target);
        if opts.draw_frame {
            draw_frame(canvas, chart.area, &opts.theme);
        }
        state.draw(DrawTime::AfterDatasetsDraw, chart, &mut target);
        state.draw(DrawTime::AfterDraw, chart, &mut target);
    }
    debug!(width = opts.width, height = opts.height, elements = state.elements().len(); "annotations rendered");
    Ok(surface)
}

/// Render all draw phases and return the encoded PNG.
pub fn render_to_png_bytes(state: &mut AnnotationState, chart: &Chart, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut surface = render_surface(state, chart, opts)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render to a PNG file at `output_png_path`, creating parent directories.
pub fn render_to_png(
    state: &mut AnnotationState,
    chart: &Chart,
    opts: &RenderOptions,
    output_png_path: impl AsRef<std::path::Path>,
) -> Result<()> {
    let bytes = render_to_png_bytes(state, chart, opts)?;
    if let Some(parent) = output_png_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_png_path, bytes)?;
    Ok(())
}

/// Render into an unpremultiplied RGBA8 buffer. Returns `(pixels, width, height, stride)`.
pub fn render_to_rgba8(state: &mut AnnotationState, chart: &Chart, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
    let mut surface = render_surface(state, chart, opts)?;
    let info = skia::ImageInfo::new(
        (opts.width, opts.height),
        skia::ColorType::RGBA8888,
        skia::AlphaType::Unpremul,
        None,
    );
    let stride = opts.width as usize * 4;
    let mut pixels = vec![0u8; stride * opts.height as usize];
    if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
        anyhow::bail!("read_pixels failed");
    }
    Ok((pixels, opts.width, opts.height, stride))
}
