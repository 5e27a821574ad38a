//! RGBA8 output buffer: row-major, top row first, 4 bytes per pixel.

/// Bytes per pixel.
pub const CHANNELS: usize = 4;

/// The finished image. Each pixel is written exactly once, by the worker
/// that owns its row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Framebuffer {
    /// Create a black, fully opaque buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Write one complete row of pixels at its fixed offset.
    pub fn write_row(&mut self, y: u32, pixels: &[[u8; CHANNELS]]) {
        assert_eq!(pixels.len(), self.width as usize, "row length mismatch");
        let start = y as usize * self.width as usize * CHANNELS;
        for (i, pixel) in pixels.iter().enumerate() {
            let offset = start + i * CHANNELS;
            self.data[offset..offset + CHANNELS].copy_from_slice(pixel);
        }
    }

    /// The pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; CHANNELS] {
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let mut pixel = [0; CHANNELS];
        pixel.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        pixel
    }

    /// Raw RGBA8 bytes, row-major from the top row.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, yielding the raw bytes for an external encoder.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_black() {
        let fb = Framebuffer::new(4, 2);
        assert_eq!(fb.as_bytes().len(), 4 * 2 * CHANNELS);
        assert_eq!(fb.pixel(3, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_write_row_lands_at_fixed_offset() {
        let mut fb = Framebuffer::new(2, 2);
        fb.write_row(1, &[[1, 2, 3, 255], [4, 5, 6, 255]]);

        assert_eq!(fb.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(fb.pixel(0, 1), [1, 2, 3, 255]);
        assert_eq!(fb.pixel(1, 1), [4, 5, 6, 255]);
    }

    #[test]
    #[should_panic(expected = "row length mismatch")]
    fn test_short_row_is_rejected() {
        let mut fb = Framebuffer::new(3, 1);
        fb.write_row(0, &[[0, 0, 0, 255]]);
    }
}
