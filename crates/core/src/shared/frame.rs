use ndarray::ArrayView3;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("frame data length {actual} does not match {width}x{height}x{channels}")]
pub struct FrameSizeError {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub actual: usize,
}

/// A single captured camera/video frame: contiguous interleaved bytes in
/// row-major order (RGB or RGBA).
///
/// Acquisition and color conversion happen outside this crate; the frame
/// is only read when building the network input tensor.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u8,
        index: usize,
    ) -> Result<Self, FrameSizeError> {
        let expected = (width as usize) * (height as usize) * (channels as usize);
        if data.len() != expected {
            return Err(FrameSizeError {
                width,
                height,
                channels,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            index,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// `(height, width, channels)` view over the pixel data.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(
            (
                self.height as usize,
                self.width as usize,
                self.channels as usize,
            ),
            &self.data,
        )
        .expect("length checked in Frame::new")
    }
}
