/// Bytes per pixel of a decoded frame (packed RGB8).
pub const CHANNELS: usize = 3;

/// A decoded camera frame with capture metadata.
///
/// Pixel layout is packed RGB8, row-major:
///   [y * width * 3 + x * 3 + c]  for c in {R, G, B}
///
/// The sampler requires square frames (`width == height`); that check is
/// made when the frame is pushed, not here, so a source can hand over
/// whatever it decoded and let the caller decide.
#[derive(Debug, Clone)]
pub struct Frame {
    data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub seq: u64,
    pub captured_at_ms: i64,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        seq: u64,
        captured_at_ms: i64,
    ) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(FrameError::BufferSize {
                got: data.len(),
                expected,
                width,
                height,
            });
        }
        Ok(Self {
            data,
            width,
            height,
            seq,
            captured_at_ms,
        })
    }

    /// An all-black frame of the given shape.
    pub fn black(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * CHANNELS],
            width,
            height,
            seq: 0,
            captured_at_ms: 0,
        }
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.data
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame buffer is {got} bytes, expected {expected} for {width}x{height} RGB")]
    BufferSize {
        got: usize,
        expected: usize,
        width: u32,
        height: u32,
    },
}
