use image::imageops::FilterType;
use image::ImageReader;
use signcap_common::frame::Frame;
use std::io::Cursor;

use crate::source::EncodedFrame;
use crate::CaptureError;

/// Decode a JPEG, center-crop it to a square and resize to `size x size` RGB.
pub fn decode_square(encoded: &EncodedFrame, size: u32) -> Result<Frame, CaptureError> {
    let img = ImageReader::new(Cursor::new(&encoded.jpeg))
        .with_guessed_format()
        .map_err(|e| CaptureError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| CaptureError::Decode(e.to_string()))?;

    let side = img.width().min(img.height());
    if side == 0 {
        return Err(CaptureError::Decode("empty image".into()));
    }
    let x = (img.width() - side) / 2;
    let y = (img.height() - side) / 2;

    let rgb = img
        .crop_imm(x, y, side, side)
        .resize_exact(size, size, FilterType::Triangle)
        .to_rgb8();

    Ok(Frame::new(
        rgb.into_raw(),
        size,
        size,
        encoded.seq,
        encoded.captured_at_ms,
    )?)
}
