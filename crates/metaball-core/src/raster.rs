/// Straight-alpha RGBA8 pixel.
pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Row-major RGBA8 image, laid out the way `ImageData` expects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reallocate only when the size changed; contents are cleared either way.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width != self.width || height != self.height {
            *self = Self::new(width, height);
        } else {
            self.clear(TRANSPARENT);
        }
    }

    pub fn clear(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Fill `[x0, x1) × [y0, y1)`, clipped to the image.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let stride = self.width as usize * 4;
        for y in y0..y1 {
            let row = y as usize * stride;
            let start = row + x0 as usize * 4;
            let end = row + x1 as usize * 4;
            for px in self.data[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }
}

/// Pixel span `[start, end)` covered by cell `i` of `cells` across `size`
/// pixels. Cells tile the whole extent without gaps.
#[inline]
pub fn cell_span(i: u32, cells: u32, size: u32) -> (u32, u32) {
    let step = size as f32 / cells.max(1) as f32;
    let start = (i as f32 * step).floor() as u32;
    let end = if i + 1 >= cells {
        size
    } else {
        (((i + 1) as f32 * step).floor() as u32).min(size)
    };
    (start.min(size), end)
}
