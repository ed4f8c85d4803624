use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 8-bit RGB color. Rendered as `#rrggbb`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniform over all 24-bit colors.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen_range(0..=u8::MAX),
            g: rng.gen_range(0..=u8::MAX),
            b: rng.gen_range(0..=u8::MAX),
        }
    }

    /// Per-channel mean, truncated toward zero: 255 and 0 average to 127.
    /// Returns None for an empty input.
    pub fn average<I>(colors: I) -> Option<Color>
    where
        I: IntoIterator<Item = Color>,
    {
        let mut n: u32 = 0;
        let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
        for c in colors {
            r += u32::from(c.r);
            g += u32::from(c.g);
            b += u32::from(c.b);
            n += 1;
        }
        if n == 0 {
            return None;
        }
        // A mean of u8 values always fits back into u8.
        Some(Color { r: (r / n) as u8, g: (g / n) as u8, b: (b / n) as u8 })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_average_truncates() {
        let mixed = Color::average([Color::new(255, 0, 0), Color::new(0, 0, 0)]).unwrap();
        assert_eq!(mixed, Color::new(127, 0, 0));
    }

    #[test]
    fn test_average_three_truncates() {
        // 383 / 3 = 127.67
        let mixed = Color::average([
            Color::new(255, 10, 1),
            Color::new(128, 20, 1),
            Color::new(0, 30, 2),
        ])
        .unwrap();
        assert_eq!(mixed, Color::new(127, 20, 1));
    }

    #[test]
    fn test_average_empty() {
        assert!(Color::average(std::iter::empty()).is_none());
    }

    #[test]
    fn test_hex_padding() {
        assert_eq!(Color::new(7, 0, 255).to_hex(), "#0700ff");
        assert_eq!(Color::new(0xa0, 0xb0, 0xc0).to_string(), "#a0b0c0");
    }

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let a = Color::random(&mut StdRng::seed_from_u64(7));
        let b = Color::random(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
