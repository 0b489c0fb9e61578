//! Drawing primitives.
//!
//! Every primitive composites with [`over`] instead of overwriting, so later
//! drawing blends with earlier content. Coordinates are signed and anything
//! outside the buffer is clipped silently. Each primitive returns the number
//! of cells it composited.

use crate::buffer::PixelBuffer;
use crate::composite::over;
use crate::pixel::Pixel;

impl PixelBuffer {
    /// Composite `pixel` over every cell. Returns `width * height`.
    pub fn fill(&mut self, pixel: Pixel) -> u64 {
        for dst in self.pixels_mut() {
            *dst = over(pixel, *dst);
        }
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Composite `pixel` over `[x, x + w) x [y, y + h)`.
    pub fn rect(&mut self, x: i64, y: i64, w: i64, h: i64, pixel: Pixel) -> u64 {
        let Some((x0, x1)) = clip(x, x.saturating_add(w).saturating_sub(1), self.width()) else {
            return 0;
        };
        let Some((y0, y1)) = clip(y, y.saturating_add(h).saturating_sub(1), self.height()) else {
            return 0;
        };
        let mut count = 0;
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                count += self.paint(cx, cy, pixel);
            }
        }
        count
    }

    /// Composite `pixel` over every cell within `radius` of the center,
    /// boundary included.
    pub fn circle(&mut self, center_x: i64, center_y: i64, radius: i64, pixel: Pixel) -> u64 {
        if radius < 0 {
            return 0;
        }
        let Some((x0, x1)) = clip(
            center_x.saturating_sub(radius),
            center_x.saturating_add(radius),
            self.width(),
        ) else {
            return 0;
        };
        let Some((y0, y1)) = clip(
            center_y.saturating_sub(radius),
            center_y.saturating_add(radius),
            self.height(),
        ) else {
            return 0;
        };

        let r2 = i128::from(radius) * i128::from(radius);
        let mut count = 0;
        for y in y0..=y1 {
            let dy = i128::from(y) - i128::from(center_y);
            for x in x0..=x1 {
                let dx = i128::from(x) - i128::from(center_x);
                if dx * dx + dy * dy <= r2 {
                    count += self.paint(x, y, pixel);
                }
            }
        }
        count
    }

    /// Line with round caps: a Bresenham walk that stamps a
    /// [`circle`](Self::circle) of radius `width` at every step.
    ///
    /// The count is the sum of the per-stamp counts, so cells covered by
    /// overlapping stamps are counted (and composited) more than once.
    pub fn line(
        &mut self,
        from_x: i64,
        from_y: i64,
        to_x: i64,
        to_y: i64,
        width: i64,
        pixel: Pixel,
    ) -> u64 {
        let mut count = 0;
        for (x, y) in Bresenham::new(from_x, from_y, to_x, to_y) {
            count += self.circle(x, y, width, pixel);
        }
        count
    }

    /// Composite `pixel` over every cell where `predicate(buffer, x, y)` holds.
    ///
    /// Cells are visited row by row from the top; the predicate sees the
    /// buffer as already modified by earlier cells.
    pub fn draw<F>(&mut self, pixel: Pixel, mut predicate: F) -> u64
    where
        F: FnMut(&PixelBuffer, i64, i64) -> bool,
    {
        let mut count = 0;
        for y in 0..i64::from(self.height()) {
            for x in 0..i64::from(self.width()) {
                if predicate(&*self, x, y) {
                    count += self.paint(x, y, pixel);
                }
            }
        }
        count
    }

    /// Walk from `(x, y)` by calling `step` until it returns `false`.
    ///
    /// `step` receives the buffer, the current position (which it may move)
    /// and the number of steps taken so far. The walk itself draws nothing
    /// and does no bounds checking; returns the number of steps taken.
    pub fn turtle<F>(&mut self, x: i64, y: i64, mut step: F) -> u64
    where
        F: FnMut(&mut PixelBuffer, &mut i64, &mut i64, u64) -> bool,
    {
        let (mut x, mut y) = (x, y);
        let mut steps = 0;
        while step(&mut *self, &mut x, &mut y, steps) {
            steps += 1;
        }
        steps
    }

    /// Composite the `w x h` region of `source` at `(source_x, source_y)`
    /// onto this buffer at `(x, y)`. Cells outside either buffer are skipped.
    #[allow(clippy::too_many_arguments)]
    pub fn copy(
        &mut self,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
        source: &PixelBuffer,
        source_x: i64,
        source_y: i64,
    ) -> u64 {
        let Some((x0, x1)) = clip(x, x.saturating_add(w).saturating_sub(1), self.width()) else {
            return 0;
        };
        let Some((y0, y1)) = clip(y, y.saturating_add(h).saturating_sub(1), self.height()) else {
            return 0;
        };
        let mut count = 0;
        for dy in y0..=y1 {
            for dx in x0..=x1 {
                let sx = dx.checked_sub(x).and_then(|off| off.checked_add(source_x));
                let sy = dy.checked_sub(y).and_then(|off| off.checked_add(source_y));
                let src = sx.zip(sy).and_then(|(sx, sy)| source.get_checked(sx, sy));
                if let Some(src) = src {
                    count += self.paint(dx, dy, src);
                }
            }
        }
        count
    }

    /// Composite one cell if it is in bounds. Returns 1 if painted.
    #[inline]
    fn paint(&mut self, x: i64, y: i64, pixel: Pixel) -> u64 {
        if !self.contains(x, y) {
            return 0;
        }
        let (x, y) = (x as u32, y as u32);
        let back = self.get(x, y);
        self.set(x, y, over(pixel, back));
        1
    }
}

/// Cells of a Bresenham line, endpoints included, walked along the major axis.
///
/// Error terms are kept in `i128` so endpoints anywhere in `i64` are safe.
struct Bresenham {
    x: i64,
    end: i64,
    y: i64,
    step_y: i64,
    dx: i128,
    dy: i128,
    err: i128,
    steep: bool,
    done: bool,
}

impl Bresenham {
    fn new(from_x: i64, from_y: i64, to_x: i64, to_y: i64) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (from_x, from_y, to_x, to_y);

        let steep = y0.abs_diff(y1) > x0.abs_diff(x1);
        if steep {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = i128::from(x1) - i128::from(x0);
        Self {
            x: x0,
            end: x1,
            y: y0,
            step_y: if y0 < y1 { 1 } else { -1 },
            dx,
            dy: (i128::from(y1) - i128::from(y0)).abs(),
            err: dx / 2,
            steep,
            done: false,
        }
    }
}

impl Iterator for Bresenham {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<(i64, i64)> {
        if self.done {
            return None;
        }
        let cell = if self.steep {
            (self.y, self.x)
        } else {
            (self.x, self.y)
        };
        if self.x == self.end {
            self.done = true;
        } else {
            self.x += 1;
            self.err -= self.dy;
            if self.err < 0 {
                self.y += self.step_y;
                self.err += self.dx;
            }
        }
        Some(cell)
    }
}

/// Intersect the inclusive range `[lo, hi]` with `[0, len)`.
fn clip(lo: i64, hi: i64, len: u32) -> Option<(i64, i64)> {
    let lo = lo.max(0);
    let hi = hi.min(i64::from(len) - 1);
    (lo <= hi).then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn bresenham_handles_extreme_endpoints() {
        let cells: Vec<_> = Bresenham::new(i64::MIN, i64::MIN, i64::MAX, i64::MAX)
            .take(3)
            .collect();
        assert_eq!(
            cells,
            [
                (i64::MIN, i64::MIN),
                (i64::MIN + 1, i64::MIN + 1),
                (i64::MIN + 2, i64::MIN + 2)
            ]
        );

        let steep: Vec<_> = Bresenham::new(0, i64::MAX, 0, i64::MIN).take(2).collect();
        assert_eq!(steep, [(0, i64::MIN), (0, i64::MIN + 1)]);
    }

    #[test]
    fn bresenham_single_cell() {
        let cells: Vec<_> = Bresenham::new(7, -3, 7, -3).collect();
        assert_eq!(cells, [(7, -3)]);
    }

    #[test]
    fn far_away_line_paints_nothing() {
        let mut buf = PixelBuffer::new(4, 4, Pixel::WHITE).unwrap();
        let count = buf.line(i64::MAX - 2, i64::MIN, i64::MAX, i64::MIN + 2, 0, Pixel::RED);
        assert_eq!(count, 0);
    }
}
