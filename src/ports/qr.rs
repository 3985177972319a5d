use crate::error::QrError;

/// A raw grayscale pixel buffer, one byte per pixel, addressable by row.
#[derive(Debug, Clone)]
pub struct PixelImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelImage {
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// One row of pixels; empty when the row is out of bounds or the buffer
    /// is shorter than advertised.
    pub fn line(&self, row: usize) -> &[u8] {
        let start = self.width * row;
        let end = self.width * (row + 1);
        if end > self.data.len() {
            return &[];
        }
        &self.data[start..end]
    }
}

/// Capability to detect and decode QR codes in a pixel buffer.
///
/// Pixel scanning and symbol decoding internals live behind this port; the
/// ingestion pipeline only consumes the decoded payload text.
pub trait QrScanner {
    /// Detect at most one QR code and return its decoded payload.
    fn scan_one(&self, image: &PixelImage) -> Result<Option<String>, QrError>;
}
