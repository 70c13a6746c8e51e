/*
 * Color Module
 *
 * HSV conversion and the vivid-color generator used to paint boids at
 * construction time.
 */

use nannou::color::{rgb, Rgb};

use crate::error::DistributionError;
use crate::random::RandomSource;

// Sector-based HSV to RGB conversion; h, s and v are all in [0, 1].
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let i = (h * 6.0) as i32;
    let f = h * 6.0 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    match i.rem_euclid(6) {
        0 => rgb(v, t, p),
        1 => rgb(q, v, p),
        2 => rgb(p, v, t),
        3 => rgb(p, q, v),
        4 => rgb(t, p, v),
        _ => rgb(v, p, q),
    }
}

// Random hue at high saturation and value.
pub fn vivid_color(rng: &mut RandomSource) -> Result<Rgb, DistributionError> {
    let h = rng.discrete_uniform(0, 360)? as f32 / 360.0;
    Ok(hsv_to_rgb(h, 0.7, 0.9))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn primary_hues_convert() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert_relative_eq!(red.red, 1.0);
        assert_relative_eq!(red.green, 0.0);
        assert_relative_eq!(red.blue, 0.0);

        let green = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
        assert_relative_eq!(green.green, 1.0);
        assert!(green.red < 1e-5);

        let blue = hsv_to_rgb(2.0 / 3.0, 1.0, 1.0);
        assert_relative_eq!(blue.blue, 1.0);
        assert!(blue.green < 1e-5);
    }

    #[test]
    fn zero_saturation_is_grey() {
        let grey = hsv_to_rgb(0.42, 0.0, 0.6);
        assert_relative_eq!(grey.red, 0.6);
        assert_relative_eq!(grey.green, 0.6);
        assert_relative_eq!(grey.blue, 0.6);
    }

    #[test]
    fn vivid_colors_stay_in_gamut() {
        let mut rng = RandomSource::with_seed(13);
        for _ in 0..500 {
            let c = vivid_color(&mut rng).unwrap();
            for channel in [c.red, c.green, c.blue] {
                assert!((0.0..=0.9 + 1e-6).contains(&channel));
            }
        }
    }
}
