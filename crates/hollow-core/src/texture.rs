//! Procedural pixel-art textures.
//!
//! Every generator is stateless apart from the random source it is handed.
//! Canvases are RGBA8 and always sampled with nearest filtering.

use crate::constants::{STATIC_CELL, STATIC_REFRESH_FRACTION};
use crate::error::SceneError;
use glam::Vec2;
use rand::Rng;

/// Largest edge accepted for a generated canvas.
pub const MAX_CANVAS_EDGE: u32 = 256;

pub type Rgba = [u8; 4];

#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    [r, g, b, 255]
}

#[inline]
pub const fn hex(v: u32) -> Rgba {
    rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

/// A small bitmap owned by the scene. `version` increases on every write so
/// the renderer can tell when to re-upload.
#[derive(Clone, Debug)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    /// UV repeat applied when sampling (1.0 = stretch once across the face).
    pub repeat: Vec2,
    version: u64,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::EmptyCanvas { width, height });
        }
        if width > MAX_CANVAS_EDGE || height > MAX_CANVAS_EDGE {
            return Err(SceneError::CanvasTooLarge {
                width,
                height,
                max: MAX_CANVAS_EDGE,
            });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; (width * height) as usize],
            repeat: Vec2::ONE,
            version: 0,
        })
    }

    pub fn with_repeat(mut self, x: f32, y: f32) -> Self {
        self.repeat = Vec2::new(x, y);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Fill a rectangle, clipped to the canvas like a 2D context would.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for py in y.min(y1)..y1 {
            let row = (py * self.width) as usize;
            for px in x.min(x1)..x1 {
                self.pixels[row + px as usize] = color;
            }
        }
        self.version += 1;
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
        self.version += 1;
    }

    /// Redraw roughly `STATIC_REFRESH_FRACTION` of the static cells with new
    /// grey levels and mark the canvas dirty.
    pub fn refresh_static(&mut self, rng: &mut impl Rng) {
        let cell = STATIC_CELL;
        for x in (0..self.width).step_by(cell as usize) {
            for y in (0..self.height).step_by(cell as usize) {
                if rng.gen::<f32>() > 1.0 - STATIC_REFRESH_FRACTION {
                    let g = rng.gen_range(0..255u8);
                    self.fill_rect(x, y, cell, cell, rgb(g, g, g));
                }
            }
        }
        self.version += 1;
    }
}

/// Orange ember checker used on the tumbling cubes.
pub fn embers(rng: &mut impl Rng) -> Result<PixelCanvas, SceneError> {
    let mut c = PixelCanvas::new(32, 32)?;
    for x in (0..32).step_by(4) {
        for y in (0..32).step_by(4) {
            let color = if rng.gen::<f32>() > 0.5 {
                hex(0xff6e4a)
            } else {
                hex(0x7a1f00)
            };
            c.fill_rect(x, y, 4, 4, color);
        }
    }
    Ok(c)
}

/// Grass with the odd flower or dark patch, tiled across the terrain.
pub fn grass(rng: &mut impl Rng) -> Result<PixelCanvas, SceneError> {
    let mut c = PixelCanvas::new(64, 64)?.with_repeat(10.0, 10.0);
    for x in (0..64).step_by(4) {
        for y in (0..64).step_by(4) {
            let green = 100 + rng.gen_range(0..100u8);
            c.fill_rect(x, y, 4, 4, rgb(30, green, 40));
            if rng.gen::<f32>() > 0.95 {
                let color = if rng.gen::<f32>() > 0.5 {
                    hex(0xcc44ff)
                } else {
                    hex(0x20401a)
                };
                c.fill_rect(x, y, 4, 4, color);
            }
        }
    }
    Ok(c)
}

/// Grey TV static on 2px cells.
pub fn static_noise(
    width: u32,
    height: u32,
    rng: &mut impl Rng,
) -> Result<PixelCanvas, SceneError> {
    let mut c = PixelCanvas::new(width, height)?;
    for x in (0..width).step_by(STATIC_CELL as usize) {
        for y in (0..height).step_by(STATIC_CELL as usize) {
            let g = rng.gen_range(0..255u8);
            c.fill_rect(x, y, STATIC_CELL, STATIC_CELL, rgb(g, g, g));
        }
    }
    Ok(c)
}

/// Running-bond brick with sparse mortar specks.
pub fn brick(rng: &mut impl Rng) -> Result<PixelCanvas, SceneError> {
    let mut c = PixelCanvas::new(32, 32)?.with_repeat(4.0, 2.0);
    for x in (0..32).step_by(4) {
        for y in (0..32).step_by(2) {
            let offset = if y % 4 == 0 { 0 } else { 2 };
            let r = 120 + rng.gen_range(0..30u8);
            let g = 60 + rng.gen_range(0..20u8);
            let b = 50 + rng.gen_range(0..20u8);
            c.fill_rect(x + offset, y, 4, 2, rgb(r, g, b));
            if rng.gen::<f32>() > 0.8 {
                c.fill_rect(x + offset, y, 1, 1, hex(0x999999));
            }
        }
    }
    Ok(c)
}

pub fn roof_tiles(rng: &mut impl Rng) -> Result<PixelCanvas, SceneError> {
    let mut c = PixelCanvas::new(32, 32)?;
    for x in (0..32).step_by(4) {
        for y in (0..32).step_by(4) {
            let dark = rng.gen_range(0..40u8);
            c.fill_rect(x, y, 4, 4, rgb(100 - dark, 50 - dark, 50 - dark));
        }
    }
    Ok(c)
}

/// Plank rows with occasional grain marks.
pub fn wood(rng: &mut impl Rng) -> Result<PixelCanvas, SceneError> {
    let mut c = PixelCanvas::new(32, 32)?.with_repeat(5.0, 5.0);
    for y in (0..32).step_by(4) {
        let w = 180 + rng.gen_range(0..30u8);
        let plank = rgb(w, w - 60, w - 100);
        let grain = rgb(w - 20, w - 80, w - 120);
        for x in (0..32).step_by(2) {
            if rng.gen::<f32>() > 0.9 {
                c.fill_rect(x, y, 2, 1, grain);
            } else {
                c.fill_rect(x, y, 2, 4, plank);
            }
        }
    }
    Ok(c)
}

/// Two recessed panels and a brass handle. Deterministic.
pub fn door_panels() -> Result<PixelCanvas, SceneError> {
    let mut c = PixelCanvas::new(32, 32)?;
    c.fill(hex(0x8b4513));
    c.fill_rect(4, 4, 24, 10, hex(0x6b3100));
    c.fill_rect(4, 18, 24, 10, hex(0x6b3100));
    c.fill_rect(22, 16, 4, 2, hex(0xffd700));
    Ok(c)
}

pub fn sofa_fabric(rng: &mut impl Rng) -> Result<PixelCanvas, SceneError> {
    let mut c = PixelCanvas::new(32, 32)?;
    c.fill(hex(0x663399));
    for x in (0..32).step_by(4) {
        for y in (0..32).step_by(4) {
            if rng.gen::<f32>() > 0.8 {
                c.fill_rect(x, y, 4, 4, hex(0x7a4eb5));
            }
        }
    }
    Ok(c)
}
