//! Pixel compositing: linear blend and Porter-Duff "over".

use crate::pixel::Pixel;

/// Linear interpolation between `a` (weight 0) and `b` (weight 1).
///
/// Each channel is `a * (1 - weight) + b * weight`, truncated toward zero.
/// `weight` is clamped to `[0, 1]`.
pub fn blend(a: Pixel, b: Pixel, weight: f64) -> Pixel {
    let weight = if weight.is_nan() { 0.0 } else { weight.clamp(0.0, 1.0) };
    let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - weight) + f64::from(b) * weight) as u8;
    Pixel {
        red: mix(a.red, b.red),
        green: mix(a.green, b.green),
        blue: mix(a.blue, b.blue),
        alpha: mix(a.alpha, b.alpha),
    }
}

/// Porter-Duff "over": `front` composited on top of `back`.
///
/// Evaluated in fixed point with both alphas scaled by 255, so the result is
/// the exact rational value truncated, not a float approximation of it:
///
/// ```text
/// out_a = fa + ba * (1 - fa)
/// c     = (cf * fa + cb * ba * (1 - fa)) / out_a
/// ```
///
/// An opaque `front` yields `front`; a fully transparent `front` yields `back`.
pub fn over(front: Pixel, back: Pixel) -> Pixel {
    let fa = u32::from(front.alpha);
    let ba = u32::from(back.alpha);

    // Both terms carry a factor of 255 * 255 relative to the unit-alpha formula.
    let front_w = fa * 255;
    let back_w = ba * (255 - fa);
    let den = front_w + back_w;
    if den == 0 {
        return Pixel::TRANSPARENT;
    }

    let mix = |f: u8, b: u8| ((u32::from(f) * front_w + u32::from(b) * back_w) / den) as u8;
    Pixel {
        red: mix(front.red, back.red),
        green: mix(front.green, back.green),
        blue: mix(front.blue, back.blue),
        // den / 255 is never exactly half-way, so this is round-to-nearest.
        alpha: ((den + 127) / 255) as u8,
    }
}
