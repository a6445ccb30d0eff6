//! Decodes inline images and turns them into PNG files genpdf can embed.
//!
//! Every planned image is prepared independently on the rayon pool:
//! decode the data URL, fit it inside its frame, downsample anything denser
//! than [`IMAGE_DPI`] at its placed size, flatten alpha onto white and write
//! an RGB PNG to a temp file. An image that fails any step is logged and left
//! out; the rest of the report is unaffected.

use super::geometry::Rect;
use super::layout::ImageSlot;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, GenericImageView};
use log::warn;
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use rayon::prelude::*;
use tempfile::NamedTempFile;
use thiserror::Error;

pub const IMAGE_DPI: f64 = 150.0;
const MM_PER_INCH: f64 = 25.4;

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("not a base64 data URL")]
    NotDataUrl,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("undecodable image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("temp file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// A PNG ready for embedding. `placement` is where it goes on the page and
/// `dpi` makes it come out exactly that size.
#[derive(Debug)]
pub struct PreparedImage {
    pub file: NamedTempFile,
    pub placement: Rect,
    pub dpi: f64,
}

/// Prepares every image of a plan; the result is indexed like `slots`.
pub fn prepare_images(slots: &[ImageSlot]) -> Vec<Option<PreparedImage>> {
    slots
        .par_iter()
        .enumerate()
        .map(|(index, slot)| match prepare(slot) {
            Ok(prepared) => Some(prepared),
            Err(e) => {
                warn!("Skipping {:?} image #{}: {}", slot.kind, index, e);
                None
            }
        })
        .collect()
}

/// Bytes of a `data:<mime>;base64,<payload>` URL.
pub fn decode_data_url(source: &str) -> Result<Vec<u8>, PhotoError> {
    let (header, payload) = source
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or(PhotoError::NotDataUrl)?;
    if !header.ends_with(";base64") {
        return Err(PhotoError::NotDataUrl);
    }
    Ok(BASE64.decode(payload.trim())?)
}

fn prepare(slot: &ImageSlot) -> Result<PreparedImage, PhotoError> {
    let bytes = decode_data_url(&slot.source)?;
    let img = load_from_memory(&bytes)?;
    let (orig_w, orig_h) = img.dimensions();
    let placement = slot.frame.fit_inside(orig_w, orig_h);

    let target_w = placement.width / MM_PER_INCH * IMAGE_DPI;
    let (resized, dpi) = if f64::from(orig_w) > target_w {
        let target_h = placement.height / MM_PER_INCH * IMAGE_DPI;
        let new_w = target_w.round().max(1.0) as u32;
        let new_h = target_h.round().max(1.0) as u32;
        (img.resize_exact(new_w, new_h, FilterType::Lanczos3), IMAGE_DPI)
    } else {
        // Small images keep their pixels and are stretched by a lower DPI.
        let dpi = f64::from(orig_w) / (placement.width / MM_PER_INCH);
        (img, dpi)
    };

    let file = write_rgb_png(&resized)?;
    Ok(PreparedImage {
        file,
        placement,
        dpi,
    })
}

/// Flattens alpha over white and writes an 8-bit RGB PNG to a temp file.
fn write_rgb_png(img: &DynamicImage) -> Result<NamedTempFile, PhotoError> {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let raw = DynamicImage::ImageRgba8(background).to_rgb8().into_raw();

    let mut tmp = NamedTempFile::new()?;
    {
        let mut encoder = PngEncoder::new(tmp.as_file_mut(), w, h);
        encoder.set_color(PngColorType::Rgb);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raw)?;
    }
    Ok(tmp)
}
