// File: crates/annotation-render-skia/src/text.rs
// Summary: Label text shaping with Skia textlayout, driven by annotation font specs.

use annotation_core::{FontSpec, Point, TextBaseline};
use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

use crate::to_skia_color;

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(font: &FontSpec) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size((font.size as f32).max(1.0));
        ts.set_color(to_skia_color(font.color));
        let mut families: Vec<String> = font
            .family
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
            .filter(|f| !f.is_empty())
            .collect();
        families.extend(["Arial", "DejaVu Sans"].map(String::from));
        ts.set_font_families(&families);

        let style = font.style.to_ascii_lowercase();
        let weight = if style.contains("bold") { skia::font_style::Weight::BOLD } else { skia::font_style::Weight::NORMAL };
        let slant = if style.contains("italic") { skia::font_style::Slant::Italic } else { skia::font_style::Slant::Upright };
        ts.set_font_style(skia::FontStyle::new(weight, skia::font_style::Width::NORMAL, slant));
        ts
    }

    pub fn layout(&self, text: &str, font: &FontSpec) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(font));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, font: &FontSpec) -> f32 {
        // width of the longest line
        self.layout(text, font).longest_line()
    }

    /// Paint `text` horizontally centered on `at`, with `baseline` selecting the vertical anchor.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, at: Point, baseline: TextBaseline, font: &FontSpec) {
        let mut p = self.layout(text, font);
        let x = at.x as f32 - p.longest_line() / 2.0;
        let y = match baseline {
            TextBaseline::Top => at.y as f32,
            TextBaseline::Middle => at.y as f32 - p.height() / 2.0,
        };
        p.paint(canvas, (x, y));
    }
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}
