use crate::error::StegoError;

/// The capability set the core needs from a raster: width, height, and
/// per-pixel RGB get/put. Anything satisfying this — a decoded file, an
/// in-memory test grid, a test-mode overlay — can be hidden in or extracted
/// from (`spec.md` §9, "polymorphism over image backing").
pub trait Image {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn get_pixel(&self, x: u32, y: u32) -> (u8, u8, u8);
    fn put_pixel(&mut self, x: u32, y: u32, rgb: (u8, u8, u8));
}

/// A plain `Vec`-backed RGB grid. No codec involved; used by tests and by
/// any caller that already has pixels in memory.
#[derive(Clone, Debug)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<(u8, u8, u8)>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, fill: (u8, u8, u8)) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Image for PixelGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get_pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        self.pixels[self.index(x, y)]
    }

    fn put_pixel(&mut self, x: u32, y: u32, rgb: (u8, u8, u8)) {
        let idx = self.index(x, y);
        self.pixels[idx] = rgb;
    }
}

/// Adapts a decoded `image::DynamicImage` to the `Image` trait for the CLI.
/// Alpha, when present, is preserved untouched — only the RGB channels ever
/// carry data.
#[derive(Debug)]
pub struct RasterImage {
    width: u32,
    height: u32,
    has_alpha: bool,
    rgb: Vec<(u8, u8, u8)>,
    alpha: Vec<u8>,
}

impl RasterImage {
    pub fn from_dynamic(img: image::DynamicImage) -> Result<Self, StegoError> {
        use image::GenericImageView;

        match &img {
            image::DynamicImage::ImageRgb8(_) | image::DynamicImage::ImageRgba8(_) => {}
            other => {
                return Err(StegoError::UnsupportedPixelFormat {
                    reason: format!(
                        "expected 8-bit RGB or RGBA, got {:?}",
                        other.color()
                    ),
                });
            }
        }

        let (width, height) = img.dimensions();
        let has_alpha = img.color().has_alpha();
        let mut rgb = Vec::with_capacity((width * height) as usize);
        let mut alpha = Vec::with_capacity(if has_alpha { (width * height) as usize } else { 0 });

        for y in 0..height {
            for x in 0..width {
                let p = img.get_pixel(x, y);
                rgb.push((p[0], p[1], p[2]));
                if has_alpha {
                    alpha.push(p[3]);
                }
            }
        }

        Ok(Self {
            width,
            height,
            has_alpha,
            rgb,
            alpha,
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Rebuild an `image::DynamicImage` for encoding back to disk.
    pub fn into_dynamic(self) -> image::DynamicImage {
        if self.has_alpha {
            let mut buf = image::RgbaImage::new(self.width, self.height);
            for y in 0..self.height {
                for x in 0..self.width {
                    let idx = self.index(x, y);
                    let (r, g, b) = self.rgb[idx];
                    let a = self.alpha[idx];
                    buf.put_pixel(x, y, image::Rgba([r, g, b, a]));
                }
            }
            image::DynamicImage::ImageRgba8(buf)
        } else {
            let mut buf = image::RgbImage::new(self.width, self.height);
            for y in 0..self.height {
                for x in 0..self.width {
                    let idx = self.index(x, y);
                    let (r, g, b) = self.rgb[idx];
                    buf.put_pixel(x, y, image::Rgb([r, g, b]));
                }
            }
            image::DynamicImage::ImageRgb8(buf)
        }
    }
}

impl Image for RasterImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get_pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        self.rgb[self.index(x, y)]
    }

    fn put_pixel(&mut self, x: u32, y: u32, rgb: (u8, u8, u8)) {
        let idx = self.index(x, y);
        self.rgb[idx] = rgb;
    }
}
