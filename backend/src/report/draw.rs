//! Draws a [`LayoutPlan`] with genpdf.
//!
//! Each planned page becomes one [`PlannedPage`] element. The element paints
//! its primitives at their absolute positions and claims the whole page area,
//! so the document's layout moves on to a fresh page for the next one.

use super::geometry::{line_height, Rect, FOOTER_SIZE, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};
use super::layout::{LayoutPlan, Primitive, Rgb};
use super::photos::PreparedImage;
use super::text::TextMetrics;
use genpdf::elements::Image as PdfImage;
use genpdf::error::Error as PdfError;
use genpdf::render::Area;
use genpdf::style::{Color, Style};
use genpdf::{Context, Document, Element, Mm, Position, RenderResult};
use log::warn;

/// Distance between the strokes that fill a selected pill. genpdf strokes
/// are one point (about 0.35 mm) wide, so this leaves no gaps.
const FILL_STEP: f64 = 0.25;
const RULE_COLOR: Color = Color::Rgb(189, 189, 189);
const FOOTER_COLOR: Color = Color::Rgb(117, 117, 117);

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn mm(value: f64) -> Mm {
    Mm::from(value as f32)
}

fn pos(x: f64, y: f64) -> Position {
    Position::new(mm(x), mm(y))
}

/// One planned page, ready to render.
pub struct PlannedPage {
    primitives: Vec<Primitive>,
    images: Vec<PdfImage>,
    footer: String,
    footer_x: f64,
}

impl PlannedPage {
    fn text(
        area: &Area<'_>,
        context: &Context,
        x: f64,
        y: f64,
        text: &str,
        style: Style,
    ) -> Result<(), PdfError> {
        if !area.print_str(&context.font_cache, pos(x, y), style, text)? {
            warn!("Text at ({:.1}, {:.1}) mm did not fit the page: {:?}", x, y, text);
        }
        Ok(())
    }

    fn outline(area: &Area<'_>, rect: &Rect, style: Style) {
        area.draw_line(
            vec![
                pos(rect.x, rect.y),
                pos(rect.right(), rect.y),
                pos(rect.right(), rect.bottom()),
                pos(rect.x, rect.bottom()),
                pos(rect.x, rect.y),
            ],
            style,
        );
    }

    /// genpdf only strokes outlines, so a solid pill is a stack of
    /// horizontal strokes inside its border.
    fn fill(area: &Area<'_>, rect: &Rect, style: Style) {
        for y in fill_rows(rect) {
            area.draw_line(vec![pos(rect.x, y), pos(rect.right(), y)], style);
        }
        Self::outline(area, rect, style);
    }
}

/// y of every stroke that fills `rect`, top to bottom, both edges included.
fn fill_rows(rect: &Rect) -> Vec<f64> {
    let steps = (rect.height / FILL_STEP).ceil().max(1.0) as usize;
    let step = rect.height / steps as f64;
    (0..=steps).map(|i| rect.y + i as f64 * step).collect()
}

impl Element for PlannedPage {
    fn render(
        &mut self,
        context: &Context,
        area: Area<'_>,
        style: Style,
    ) -> Result<RenderResult, PdfError> {
        for primitive in &self.primitives {
            match primitive {
                Primitive::Text {
                    x,
                    y,
                    text,
                    size,
                    bold,
                    color: rgb,
                } => {
                    let mut text_style = style.with_font_size(*size).with_color(color(*rgb));
                    if *bold {
                        text_style = text_style.bold();
                    }
                    Self::text(&area, context, *x, *y, text, text_style)?;
                }
                Primitive::Pill {
                    rect,
                    color: rgb,
                    filled,
                } => {
                    let pill_style = Style::from(color(*rgb));
                    if *filled {
                        Self::fill(&area, rect, pill_style);
                    } else {
                        Self::outline(&area, rect, pill_style);
                    }
                }
                Primitive::Rule { x1, x2, y } => {
                    area.draw_line(vec![pos(*x1, *y), pos(*x2, *y)], Style::from(RULE_COLOR));
                }
                // Resolved into `images` when the page was built.
                Primitive::Image { .. } => {}
            }
        }

        for image in &mut self.images {
            image.render(context, area.clone(), style)?;
        }

        let footer_y = PAGE_HEIGHT - MARGIN - line_height(FOOTER_SIZE);
        let footer_style = style.with_font_size(FOOTER_SIZE).with_color(FOOTER_COLOR);
        Self::text(&area, context, self.footer_x, footer_y, &self.footer, footer_style)?;

        Ok(RenderResult {
            size: area.size(),
            has_more: false,
        })
    }
}

/// Builds the page elements of `plan`. Prepared images that genpdf cannot
/// load are dropped with a warning.
pub fn build_pages(
    plan: LayoutPlan,
    prepared: &[Option<PreparedImage>],
    metrics: &dyn TextMetrics,
) -> Vec<PlannedPage> {
    plan.pages
        .into_iter()
        .map(|page| {
            let mut images = Vec::new();
            for primitive in &page.primitives {
                let Primitive::Image { slot } = primitive else {
                    continue;
                };
                let Some(Some(image)) = prepared.get(*slot) else {
                    continue;
                };
                match PdfImage::from_path(image.file.path()) {
                    Ok(mut element) => {
                        element.set_position(pos(image.placement.x, image.placement.y));
                        element.set_dpi(image.dpi);
                        images.push(element);
                    }
                    Err(e) => warn!("Skipping image #{}: {}", slot, e),
                }
            }
            let footer_width = metrics.width(&page.footer, FOOTER_SIZE, false);
            PlannedPage {
                primitives: page.primitives,
                images,
                footer_x: PAGE_WIDTH - MARGIN - footer_width,
                footer: page.footer,
            }
        })
        .collect()
}

pub fn push_pages(doc: &mut Document, pages: Vec<PlannedPage>) {
    for page in pages {
        doc.push(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::geometry::PILL_HEIGHT;
    use crate::report::layout::{ImageKind, ImageSlot, PagePlan};
    use crate::report::photos::prepare_images;
    use crate::report::text::FontMetrics;
    use crate::report::testing::{font_family, png_data_url};

    #[test]
    fn fill_rows_cover_the_pill_without_gaps() {
        let rect = Rect::new(10.0, 20.0, 16.0, PILL_HEIGHT);
        let rows = fill_rows(&rect);

        assert_eq!(rows.first().copied(), Some(20.0));
        assert!((rows.last().copied().unwrap() - rect.bottom()).abs() < 1e-9);
        for pair in rows.windows(2) {
            assert!(pair[1] - pair[0] <= FILL_STEP + 1e-9);
        }
    }

    #[test]
    fn pages_keep_their_images_and_right_aligned_footers() {
        let frame = Rect::new(MARGIN, 40.0, 88.0, 60.0);
        let plan = LayoutPlan {
            pages: vec![
                PagePlan {
                    primitives: vec![Primitive::Image { slot: 0 }, Primitive::Image { slot: 1 }],
                    footer: "1 / 2".to_string(),
                },
                PagePlan {
                    primitives: vec![Primitive::Image { slot: 2 }],
                    footer: "2 / 2".to_string(),
                },
            ],
            images: vec![
                ImageSlot {
                    kind: ImageKind::Photo,
                    source: png_data_url(60, 40),
                    frame,
                },
                ImageSlot {
                    kind: ImageKind::Photo,
                    source: "data:image/png;base64,AAAA".to_string(),
                    frame,
                },
                ImageSlot {
                    kind: ImageKind::Photo,
                    source: png_data_url(40, 60),
                    frame,
                },
            ],
        };
        let prepared = prepare_images(&plan.images);
        let metrics = FontMetrics::new(font_family());

        let pages = build_pages(plan, &prepared, &metrics);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].images.len(), 1);
        assert_eq!(pages[1].images.len(), 1);
        let footer_right = pages[1].footer_x + metrics.width("2 / 2", FOOTER_SIZE, false);
        assert!((footer_right - (PAGE_WIDTH - MARGIN)).abs() < 1e-9);
    }
}
