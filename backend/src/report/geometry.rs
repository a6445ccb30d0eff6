//! Fixed page geometry for generated reports. All lengths are millimetres,
//! measured from the top-left corner of the page with y growing downwards.

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;
pub const MARGIN: f64 = 15.0;
pub const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
pub const FOOTER_HEIGHT: f64 = 8.0;
/// Lowest y any body content may reach; the footer band sits below it.
pub const CONTENT_BOTTOM: f64 = PAGE_HEIGHT - MARGIN - FOOTER_HEIGHT;

pub const TITLE_SIZE: u8 = 18;
pub const HEADING_SIZE: u8 = 14;
pub const ITEM_SIZE: u8 = 11;
pub const BODY_SIZE: u8 = 10;
pub const FOOTER_SIZE: u8 = 8;

pub const PILL_WIDTH: f64 = 16.0;
pub const PILL_HEIGHT: f64 = 6.0;
pub const PILL_GAP: f64 = 2.0;
pub const STATUS_ROW_HEIGHT: f64 = PILL_HEIGHT + 2.0;

pub const PHOTO_COLUMNS: usize = 2;
pub const PHOTOS_PER_BLOCK: usize = 4;
pub const PHOTO_GAP: f64 = 4.0;
pub const PHOTO_BOX_WIDTH: f64 = (CONTENT_WIDTH - PHOTO_GAP) / PHOTO_COLUMNS as f64;
pub const PHOTO_BOX_HEIGHT: f64 = 60.0;

pub const LOGO_BOX_WIDTH: f64 = 40.0;
pub const LOGO_BOX_HEIGHT: f64 = 20.0;

/// Space between the parts of one item block.
pub const BLOCK_GAP: f64 = 2.0;
/// Space after each item block.
pub const ITEM_SPACING: f64 = 6.0;

const PT_TO_MM: f64 = 25.4 / 72.0;
const LINE_SPACING: f64 = 1.25;

/// Height of one text line set at `size_pt`.
pub fn line_height(size_pt: u8) -> f64 {
    f64::from(size_pt) * PT_TO_MM * LINE_SPACING
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Largest rectangle with the aspect ratio of a `pixel_width` ×
    /// `pixel_height` image that fits inside `self`, centred in it.
    pub fn fit_inside(&self, pixel_width: u32, pixel_height: u32) -> Rect {
        if pixel_width == 0 || pixel_height == 0 {
            return *self;
        }
        let (w, h) = (f64::from(pixel_width), f64::from(pixel_height));
        let scale = (self.width / w).min(self.height / h);
        let (fit_w, fit_h) = (w * scale, h * scale);
        Rect::new(
            self.x + (self.width - fit_w) / 2.0,
            self.y + (self.height - fit_h) / 2.0,
            fit_w,
            fit_h,
        )
    }
}

/// Height of a photo grid holding `count` photos.
pub fn photo_grid_height(count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let rows = count.div_ceil(PHOTO_COLUMNS);
    rows as f64 * PHOTO_BOX_HEIGHT + (rows - 1) as f64 * PHOTO_GAP
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn wide_image_fills_width_and_centres_vertically() {
        let frame = Rect::new(10.0, 20.0, 80.0, 60.0);
        let fit = frame.fit_inside(1600, 400);

        assert!(close(fit.width, 80.0));
        assert!(close(fit.height, 20.0));
        assert!(close(fit.x, 10.0));
        assert!(close(fit.y, 40.0));
    }

    #[test]
    fn tall_image_fills_height_and_centres_horizontally() {
        let frame = Rect::new(0.0, 0.0, 80.0, 60.0);
        let fit = frame.fit_inside(300, 600);

        assert!(close(fit.height, 60.0));
        assert!(close(fit.width, 30.0));
        assert!(close(fit.x, 25.0));
        assert!(close(fit.y, 0.0));
    }

    #[test]
    fn small_image_scales_up_to_the_box() {
        let frame = Rect::new(0.0, 0.0, 88.0, 60.0);
        let fit = frame.fit_inside(44, 30);
        assert!(close(fit.width, 88.0));
        assert!(close(fit.height, 60.0));
    }

    #[test]
    fn grid_height_by_rows() {
        assert_eq!(photo_grid_height(0), 0.0);
        assert!(close(photo_grid_height(1), PHOTO_BOX_HEIGHT));
        assert!(close(photo_grid_height(2), PHOTO_BOX_HEIGHT));
        assert!(close(photo_grid_height(3), 2.0 * PHOTO_BOX_HEIGHT + PHOTO_GAP));
        assert!(close(photo_grid_height(4), 2.0 * PHOTO_BOX_HEIGHT + PHOTO_GAP));
    }

    #[test]
    fn two_photo_boxes_and_gap_span_content_width() {
        assert!(close(2.0 * PHOTO_BOX_WIDTH + PHOTO_GAP, CONTENT_WIDTH));
    }
}
