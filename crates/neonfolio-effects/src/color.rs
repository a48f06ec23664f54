//! Color utility functions for the effects.

/// Convert HSL (hue in degrees, saturation and lightness in `0.0..=1.0`) to
/// RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Convert RGB to HSL (hue in degrees).
pub fn rgb_to_hsl((r, g, b): (u8, u8, u8)) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h * 60.0, s, l)
}

/// Rotate a color's hue by `degrees`.
pub fn hue_rotate(rgb: (u8, u8, u8), degrees: f32) -> (u8, u8, u8) {
    let (h, s, l) = rgb_to_hsl(rgb);
    hsl_to_rgb(h + degrees, s, l)
}

/// Linear blend from `a` to `b`; `t` is clamped to `0.0..=1.0`.
pub fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_rotation_is_identity() {
        let cyan = (6, 182, 212);
        let rotated = hue_rotate(cyan, 360.0);
        assert!((rotated.0 as i16 - cyan.0 as i16).abs() <= 1);
        assert!((rotated.1 as i16 - cyan.1 as i16).abs() <= 1);
        assert!((rotated.2 as i16 - cyan.2 as i16).abs() <= 1);
    }

    #[test]
    fn half_rotation_of_red_is_cyan() {
        assert_eq!(hue_rotate((255, 0, 0), 180.0), (0, 255, 255));
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp_rgb((0, 0, 0), (200, 100, 50), 0.0), (0, 0, 0));
        assert_eq!(lerp_rgb((0, 0, 0), (200, 100, 50), 1.0), (200, 100, 50));
        assert_eq!(lerp_rgb((0, 0, 0), (200, 100, 50), 2.0), (200, 100, 50));
        assert_eq!(lerp_rgb((0, 0, 0), (200, 100, 50), 0.5), (100, 50, 25));
    }
}
