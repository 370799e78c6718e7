use crate::error::DetectError;
use crate::models::Grid;

/// Colour input image held as three equally sized channel planes
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRaster {
    width: u32,
    height: u32,
    red: Grid<u8>,
    green: Grid<u8>,
    blue: Grid<u8>,
}

impl ColorRaster {
    /// Build a raster from separate row-major channel planes
    ///
    /// Fails fast on zero area or when any plane is not `width * height` long.
    pub fn new(
        width: u32,
        height: u32,
        red: Vec<u8>,
        green: Vec<u8>,
        blue: Vec<u8>,
    ) -> Result<Self, DetectError> {
        if width == 0 || height == 0 {
            return Err(DetectError::ZeroDimension { width, height });
        }
        let (w, h) = (width as usize, height as usize);
        let expected = w * h;

        let plane = |channel: &'static str, data: Vec<u8>| {
            let actual = data.len();
            Grid::from_vec(w, h, data).ok_or(DetectError::ChannelSizeMismatch {
                channel,
                expected,
                actual,
            })
        };

        Ok(Self {
            width,
            height,
            red: plane("red", red)?,
            green: plane("green", green)?,
            blue: plane("blue", blue)?,
        })
    }

    /// Split an interleaved `RGBRGB...` buffer into planes
    pub fn from_interleaved(rgb: &[u8], width: u32, height: u32) -> Result<Self, DetectError> {
        if width == 0 || height == 0 {
            return Err(DetectError::ZeroDimension { width, height });
        }
        let pixel_count = width as usize * height as usize;
        if rgb.len() != pixel_count * 3 {
            return Err(DetectError::BufferSizeMismatch {
                expected: pixel_count * 3,
                actual: rgb.len(),
            });
        }

        let mut red = Vec::with_capacity(pixel_count);
        let mut green = Vec::with_capacity(pixel_count);
        let mut blue = Vec::with_capacity(pixel_count);
        for px in rgb.chunks_exact(3) {
            red.push(px[0]);
            green.push(px[1]);
            blue.push(px[2]);
        }
        Self::new(width, height, red, green, blue)
    }

    /// Raster where every pixel has the same colour
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, DetectError> {
        let n = width as usize * height as usize;
        Self::new(width, height, vec![rgb[0]; n], vec![rgb[1]; n], vec![rgb[2]; n])
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Red plane
    pub fn red(&self) -> &Grid<u8> {
        &self.red
    }

    /// Green plane
    pub fn green(&self) -> &Grid<u8> {
        &self.green
    }

    /// Blue plane
    pub fn blue(&self) -> &Grid<u8> {
        &self.blue
    }

    /// `[r, g, b]` at `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        [self.red.get(x, y), self.green.get(x, y), self.blue.get(x, y)]
    }

    /// Overwrite the pixel at `(x, y)`; writes outside the image are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        self.red.set(x, y, rgb[0]);
        self.green.set(x, y, rgb[1]);
        self.blue.set(x, y, rgb[2]);
    }

    /// Re-interleave the planes into `RGBRGB...`
    pub fn to_interleaved(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.red.len() * 3);
        for ((&r, &g), &b) in self
            .red
            .as_slice()
            .iter()
            .zip(self.green.as_slice())
            .zip(self.blue.as_slice())
        {
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }
}
