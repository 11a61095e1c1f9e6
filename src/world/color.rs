use std::ops::{Div, DivAssign, Mul, MulAssign};

use crate::renderer::Rgba;

/// 8-bit RGBA colour. `a == 255` is fully opaque, `a == 0` fully clear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Frame-buffer pixel (`0xAARRGGBB`).
    #[inline]
    pub fn to_rgba(self) -> Rgba {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// Brightness scale; channels saturate at 255, alpha is untouched.
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, factor: f32) -> Color {
        let scale = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Color::rgba(scale(self.r), scale(self.g), scale(self.b), self.a)
    }
}

impl Div<f32> for Color {
    type Output = Color;

    fn div(self, factor: f32) -> Color {
        self * factor.recip()
    }
}

impl MulAssign<f32> for Color {
    fn mul_assign(&mut self, factor: f32) {
        *self = *self * factor;
    }
}

impl DivAssign<f32> for Color {
    fn div_assign(&mut self, factor: f32) {
        *self = *self / factor;
    }
}

/// Composite `fg` over `bg` ("over" operator, non-premultiplied).
///
/// An opaque `fg` always comes back unchanged and a fully clear `fg` hands
/// back `bg`, so walking a ray front to back can start from
/// [`Color::TRANSPARENT`].
pub fn blend(fg: Color, bg: Color) -> Color {
    let fa = fg.a as u32;
    let ba = bg.a as u32;
    let behind = ba * (255 - fa); // bg weight, scaled by 255
    let out_a = fa * 255 + behind; // scaled by 255
    if out_a == 0 {
        return Color::TRANSPARENT;
    }
    let mix = |f: u8, b: u8| ((f as u32 * fa * 255 + b as u32 * behind + out_a / 2) / out_a) as u8;
    Color::rgba(
        mix(fg.r, bg.r),
        mix(fg.g, bg.g),
        mix(fg.b, bg.b),
        ((out_a + 127) / 255) as u8,
    )
}
