//! Lays out every cel of a view on one RGBA image: one row of cels per loop,
//! loops stacked top to bottom. Source pixels are drawn two wide.

use image::{Rgba, RgbaImage};

use crate::agigfx::{palette, rle, view::{Loop, View}};
use crate::agires::{error::FormatError, source::ByteSource};

/// Horizontal scale of a source pixel.
pub const PIXEL_WIDTH: u32 = 2;

/// Unscaled (width, height) of a loop: its cels side by side.
pub fn loop_extent(lop: &Loop) -> (u32, u32) {
    let width = lop.cels.iter().map(|c| c.width as u32).sum();
    let height = lop.cels.iter().map(|c| c.height as u32).max().unwrap_or(0);
    (width, height)
}

pub fn canvas_size(view: &View) -> (u32, u32) {
    let mut width = 0u32;
    let mut height = 0u32;
    for lop in &view.loops {
        let (w, h) = loop_extent(lop);
        width = width.max(w);
        height += h;
    }
    (width * PIXEL_WIDTH, height)
}

struct Pen<'a> {
    img: &'a mut RgbaImage,
    x: i64,
    y: u32,
    step: i64,
    clipped: usize,
}

impl Pen<'_> {
    fn plot(&mut self, colour: Rgba<u8>) {
        let (width, height) = self.img.dimensions();
        if self.x >= 0 && (self.x as u64) < width as u64 && self.y < height {
            self.img.put_pixel(self.x as u32, self.y, colour);
        } else {
            self.clipped += 1;
        }
        self.x += self.step;
    }
}

/// Renders all cels of `view`, reading pixel data from `rdr` at each cel's
/// data offset.
pub fn compose<R: ByteSource + ?Sized>(view: &View, rdr: &mut R) -> Result<RgbaImage, FormatError> {
    let (width, height) = canvas_size(view);
    log::debug!("canvas {}x{}", width, height);
    let mut img = RgbaImage::new(width, height);

    let mut cel_y = 0u32;
    for (loop_num, lop) in view.loops.iter().enumerate() {
        let mut cel_x = 0u32;
        for (cel_num, cel) in lop.cels.iter().enumerate() {
            rdr.seek_absolute(cel.data_offset)?;
            let flipped = cel.is_flipped_in(loop_num);
            let cel_width = cel.width as u32 * PIXEL_WIDTH;

            let mut clipped = 0;
            for y in 0..cel.height as u32 {
                let (x, step) = if flipped {
                    (cel_x as i64 + cel_width as i64 - 1, -1)
                } else {
                    (cel_x as i64, 1)
                };
                let mut pen = Pen{ img: &mut img, x, y: cel_y + y, step, clipped: 0 };

                for run in rle::decode_row(rdr, cel.transparency_color)? {
                    let colour = if run.transparent {
                        palette::TRANSPARENT
                    } else {
                        palette::ega_colour(run.color)
                    };
                    for _ in 0..run.count as u32 * PIXEL_WIDTH {
                        pen.plot(colour);
                    }
                }
                clipped += pen.clipped;
            }
            if clipped != 0 {
                log::warn!("loop {} cel {}: {} pixels fall outside the image", loop_num, cel_num, clipped);
            }
            cel_x += cel_width;
        }
        cel_y += loop_extent(lop).1;
    }
    Ok(img)
}
