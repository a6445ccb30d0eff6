//! # Report Layout Planner
//!
//! Turns an inspection and its template into a [`LayoutPlan`]: a list of
//! pages, each holding absolutely positioned primitives in millimetres. No
//! drawing happens here, so the whole pagination can be checked in tests.
//!
//! ## Workflow
//!
//! 1. Cover page: brand header, logo box, meta lines, overall status and
//!    counts, then general notes (flowing line by line across pages).
//! 2. Every template section opens a new page with its title.
//! 3. Each item's block height is measured first. When it would not fit in
//!    the space left, the page is broken before anything is placed. A
//!    section heading is never left alone: a first block that does not fit
//!    under it is treated as oversized instead.
//! 4. Photos past the first four go to continuation pages, four at a time,
//!    under a repeated "(continued)" header and status row.
//! 5. Once all pages exist, a post-pass stamps `i / total` into each footer.

use super::geometry::*;
use super::text::{wrap, TextMetrics};
use common::aggregate::summarize;
use common::model::inspection::Inspection;
use common::model::response::ResolvedResponse;
use common::model::template::{Item, Template};
use common::print_view::meta_fields;

pub type Rgb = (u8, u8, u8);

pub const INK: Rgb = (33, 33, 33);
pub const MUTED: Rgb = (97, 97, 97);
pub const WHITE: Rgb = (255, 255, 255);

const PILL_TEXT_SIZE: u8 = 9;

/// The three status pills, in the order they are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pill {
    Pass,
    Fail,
    Na,
}

impl Pill {
    pub const ALL: [Pill; 3] = [Pill::Pass, Pill::Fail, Pill::Na];

    /// Pill highlighted for a stored result. Matching ignores case and
    /// surrounding whitespace; anything unrecognized lands on N/A.
    pub fn select(result: &str) -> Pill {
        match result.trim().to_ascii_uppercase().as_str() {
            "PASS" => Pill::Pass,
            "FAIL" => Pill::Fail,
            _ => Pill::Na,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Pill::Pass => "Pass",
            Pill::Fail => "Fail",
            Pill::Na => "N/A",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Pill::Pass => (46, 125, 50),
            Pill::Fail => (198, 40, 40),
            Pill::Na => (117, 117, 117),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// One line of text; `(x, y)` is the top-left corner of its line box.
    Text {
        x: f64,
        y: f64,
        text: String,
        size: u8,
        bold: bool,
        color: Rgb,
    },
    Pill {
        rect: Rect,
        color: Rgb,
        filled: bool,
    },
    /// Horizontal hairline.
    Rule { x1: f64, x2: f64, y: f64 },
    /// Index into [`LayoutPlan::images`].
    Image { slot: usize },
}

impl Primitive {
    /// Lowest y the primitive reaches on its page.
    pub fn bottom(&self, images: &[ImageSlot]) -> f64 {
        match self {
            Primitive::Text { y, size, .. } => y + line_height(*size),
            Primitive::Pill { rect, .. } => rect.bottom(),
            Primitive::Rule { y, .. } => *y,
            Primitive::Image { slot } => images.get(*slot).map_or(0.0, |s| s.frame.bottom()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Logo,
    Photo,
}

/// An image to place: its inline source and the box it must fit inside.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSlot {
    pub kind: ImageKind,
    pub source: String,
    pub frame: Rect,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan {
    pub primitives: Vec<Primitive>,
    /// `i / total`, filled in once every page is known.
    pub footer: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPlan {
    pub pages: Vec<PagePlan>,
    pub images: Vec<ImageSlot>,
}

pub fn plan_report(
    inspection: &Inspection,
    template: &Template,
    metrics: &dyn TextMetrics,
) -> LayoutPlan {
    let mut planner = Planner::new(metrics);
    planner.cover(inspection, template);

    for section in &template.sections {
        planner.break_page();
        planner.section_title(&section.title);
        for item in &section.items {
            planner.item(item, &inspection.resolve(&item.id));
        }
    }

    planner.finish()
}

struct Planner<'m> {
    metrics: &'m dyn TextMetrics,
    done: Vec<PagePlan>,
    page: PagePlan,
    images: Vec<ImageSlot>,
    y: f64,
    /// Nothing but a section heading on the page so far.
    after_heading: bool,
}

impl<'m> Planner<'m> {
    fn new(metrics: &'m dyn TextMetrics) -> Planner<'m> {
        Planner {
            metrics,
            done: Vec::new(),
            page: PagePlan::default(),
            images: Vec::new(),
            y: MARGIN,
            after_heading: false,
        }
    }

    fn break_page(&mut self) {
        self.done.push(std::mem::take(&mut self.page));
        self.y = MARGIN;
        self.after_heading = false;
    }

    fn remaining(&self) -> f64 {
        CONTENT_BOTTOM - self.y
    }

    fn at_page_top(&self) -> bool {
        self.page.primitives.is_empty()
    }

    /// Whether moving the next block to a new page leaves something behind.
    fn can_break_before_block(&self) -> bool {
        !self.at_page_top() && !self.after_heading
    }

    fn push(&mut self, primitive: Primitive) {
        self.page.primitives.push(primitive);
    }

    fn wrap(&self, text: &str, size: u8, bold: bool, width: f64) -> Vec<String> {
        wrap(self.metrics, text, size, bold, width)
    }

    fn line(&mut self, x: f64, text: &str, size: u8, bold: bool, color: Rgb) {
        self.push(Primitive::Text {
            x,
            y: self.y,
            text: text.to_string(),
            size,
            bold,
            color,
        });
        self.y += line_height(size);
    }

    /// Places lines that never split from each other.
    fn lines(&mut self, lines: &[String], size: u8, bold: bool, color: Rgb) {
        for text in lines {
            self.line(MARGIN, text, size, bold, color);
        }
    }

    /// Places lines one at a time, breaking the page whenever the next one
    /// would cross the content bottom.
    fn flowing_lines(&mut self, lines: &[String], size: u8, color: Rgb) {
        let height = line_height(size);
        for text in lines {
            if height > self.remaining() && !self.at_page_top() {
                self.break_page();
            }
            self.line(MARGIN, text, size, false, color);
        }
    }

    fn rule(&mut self) {
        self.push(Primitive::Rule {
            x1: MARGIN,
            x2: MARGIN + CONTENT_WIDTH,
            y: self.y,
        });
    }

    fn image(&mut self, kind: ImageKind, source: &str, frame: Rect) {
        let slot = self.images.len();
        self.images.push(ImageSlot {
            kind,
            source: source.to_string(),
            frame,
        });
        self.push(Primitive::Image { slot });
    }

    fn cover(&mut self, inspection: &Inspection, template: &Template) {
        let logo = template.logo();
        let header_width = match logo {
            Some(_) => CONTENT_WIDTH - LOGO_BOX_WIDTH - PHOTO_GAP,
            None => CONTENT_WIDTH,
        };
        if let Some(logo) = logo {
            let frame = Rect::new(
                MARGIN + CONTENT_WIDTH - LOGO_BOX_WIDTH,
                MARGIN,
                LOGO_BOX_WIDTH,
                LOGO_BOX_HEIGHT,
            );
            self.image(ImageKind::Logo, logo, frame);
        }

        if let Some(company) = template.company_name() {
            let lines = self.wrap(company, HEADING_SIZE, true, header_width);
            self.lines(&lines, HEADING_SIZE, true, MUTED);
        }
        let title = self.wrap(template.report_title(), TITLE_SIZE, true, header_width);
        self.lines(&title, TITLE_SIZE, true, INK);
        if logo.is_some() {
            self.y = self.y.max(MARGIN + LOGO_BOX_HEIGHT);
        }
        self.y += BLOCK_GAP;
        self.rule();
        self.y += 2.0 * BLOCK_GAP;

        for field in meta_fields(inspection) {
            let text = format!("{}: {}", field.label, field.value);
            let lines = self.wrap(&text, BODY_SIZE, false, CONTENT_WIDTH);
            self.lines(&lines, BODY_SIZE, false, INK);
        }
        self.y += 2.0 * BLOCK_GAP;

        let summary = summarize(inspection, template);
        self.line(
            MARGIN,
            &format!("Overall status: {}", summary.overall.label()),
            HEADING_SIZE,
            true,
            INK,
        );
        self.line(
            MARGIN,
            &format!(
                "Pass {}   Fail {}   N/A {}   Not answered {}",
                summary.pass, summary.fail, summary.na, summary.empty
            ),
            BODY_SIZE,
            false,
            MUTED,
        );

        let notes = self.wrap(&inspection.general_notes, BODY_SIZE, false, CONTENT_WIDTH);
        if !notes.is_empty() {
            self.y += 2.0 * BLOCK_GAP;
            self.line(MARGIN, "General notes", ITEM_SIZE, true, INK);
            self.y += BLOCK_GAP;
            self.flowing_lines(&notes, BODY_SIZE, INK);
        }
    }

    fn section_title(&mut self, title: &str) {
        let lines = self.wrap(title, HEADING_SIZE, true, CONTENT_WIDTH);
        self.lines(&lines, HEADING_SIZE, true, INK);
        self.y += BLOCK_GAP;
        self.rule();
        self.y += 2.0 * BLOCK_GAP;
        self.after_heading = true;
    }

    fn status_row(&mut self, selected: Pill) {
        let count = Pill::ALL.len() as f64;
        let row_width = count * PILL_WIDTH + (count - 1.0) * PILL_GAP;
        let mut x = MARGIN + CONTENT_WIDTH - row_width;
        let text_height = line_height(PILL_TEXT_SIZE);

        for pill in Pill::ALL {
            let filled = pill == selected;
            self.push(Primitive::Pill {
                rect: Rect::new(x, self.y, PILL_WIDTH, PILL_HEIGHT),
                color: pill.color(),
                filled,
            });
            let label_width = self.metrics.width(pill.label(), PILL_TEXT_SIZE, true);
            self.push(Primitive::Text {
                x: x + (PILL_WIDTH - label_width) / 2.0,
                y: self.y + (PILL_HEIGHT - text_height) / 2.0,
                text: pill.label().to_string(),
                size: PILL_TEXT_SIZE,
                bold: true,
                color: if filled { WHITE } else { pill.color() },
            });
            x += PILL_WIDTH + PILL_GAP;
        }
        self.y += STATUS_ROW_HEIGHT;
    }

    fn item_header(&mut self, title: &[String], selected: Pill) {
        self.lines(title, ITEM_SIZE, true, INK);
        self.y += BLOCK_GAP;
        self.status_row(selected);
    }

    fn photo_grid(&mut self, photos: &[String]) {
        for (i, photo) in photos.iter().enumerate() {
            let (row, col) = (i / PHOTO_COLUMNS, i % PHOTO_COLUMNS);
            let frame = Rect::new(
                MARGIN + col as f64 * (PHOTO_BOX_WIDTH + PHOTO_GAP),
                self.y + row as f64 * (PHOTO_BOX_HEIGHT + PHOTO_GAP),
                PHOTO_BOX_WIDTH,
                PHOTO_BOX_HEIGHT,
            );
            self.image(ImageKind::Photo, photo, frame);
        }
        self.y += photo_grid_height(photos.len());
    }

    fn item(&mut self, item: &Item, response: &ResolvedResponse) {
        let title = self.wrap(&item.text, ITEM_SIZE, true, CONTENT_WIDTH);
        let notes = self.wrap(&response.comment, BODY_SIZE, false, CONTENT_WIDTH);
        let selected = Pill::select(&response.result);
        let mut chunks = response.photos.chunks(PHOTOS_PER_BLOCK);
        let first = chunks.next().unwrap_or_default();

        let height = block_height(title.len(), notes.len(), first.len());
        if height > self.remaining() && self.can_break_before_block() {
            self.break_page();
        }
        self.after_heading = false;
        // Taller than the space it starts in: flow the notes and move the
        // photos on.
        let oversized = height > self.remaining();

        self.item_header(&title, selected);
        if !notes.is_empty() {
            self.y += BLOCK_GAP;
            if oversized {
                self.flowing_lines(&notes, BODY_SIZE, INK);
            } else {
                self.lines(&notes, BODY_SIZE, false, INK);
            }
        }

        let continued = self.wrap(
            &format!("{} (continued)", item.text),
            ITEM_SIZE,
            true,
            CONTENT_WIDTH,
        );
        if !first.is_empty() {
            if oversized && BLOCK_GAP + photo_grid_height(first.len()) > self.remaining() {
                self.break_page();
                self.item_header(&continued, selected);
            }
            self.y += BLOCK_GAP;
            self.photo_grid(first);
        }
        for chunk in chunks {
            self.break_page();
            self.item_header(&continued, selected);
            self.y += BLOCK_GAP;
            self.photo_grid(chunk);
        }

        self.y += ITEM_SPACING;
    }

    fn finish(mut self) -> LayoutPlan {
        self.done.push(self.page);
        let total = self.done.len();
        for (i, page) in self.done.iter_mut().enumerate() {
            page.footer = format!("{} / {}", i + 1, total);
        }
        LayoutPlan {
            pages: self.done,
            images: self.images,
        }
    }
}

/// Height of an item block holding `photos` inline photos (at most four).
fn block_height(title_lines: usize, note_lines: usize, photos: usize) -> f64 {
    let mut height = title_lines as f64 * line_height(ITEM_SIZE) + BLOCK_GAP + STATUS_ROW_HEIGHT;
    if note_lines > 0 {
        height += BLOCK_GAP + note_lines as f64 * line_height(BODY_SIZE);
    }
    if photos > 0 {
        height += BLOCK_GAP + photo_grid_height(photos);
    }
    height
}
