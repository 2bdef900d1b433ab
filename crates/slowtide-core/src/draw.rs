//! Display lists handed from views to the canvas renderer.
//!
//! Views never touch a drawing context. They push [`DrawCmd`]s into a
//! [`DisplayList`] and the web front-end replays them on a Canvas2D context.

use glam::Vec2;
use smallvec::SmallVec;
use std::fmt::Write as _;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgba { r: u8, g: u8, b: u8, a: f32 },
    /// Hue in degrees, saturation and lightness in percent, alpha in [0, 1].
    Hsla { h: f32, s: f32, l: f32, a: f32 },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgba { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Color::Rgba { r, g, b, a }
    }

    pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        Color::Hsla {
            h: h.rem_euclid(360.0),
            s,
            l,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::hsla(h, s, l, 1.0)
    }

    /// Parse `#rrggbb`.
    pub fn hex(code: &str) -> Option<Self> {
        let digits = code.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn alpha(&self) -> f32 {
        match *self {
            Color::Rgba { a, .. } | Color::Hsla { a, .. } => a,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        match self {
            Color::Rgba { r, g, b, .. } => Color::Rgba { r, g, b, a: alpha },
            Color::Hsla { h, s, l, .. } => Color::Hsla { h, s, l, a: alpha },
        }
    }

    /// CSS color string accepted by `fillStyle` / `strokeStyle`.
    pub fn css(&self) -> String {
        let mut out = String::with_capacity(28);
        match *self {
            Color::Rgba { r, g, b, a } => {
                let _ = write!(out, "rgba({},{},{},{:.3})", r, g, b, a);
            }
            Color::Hsla { h, s, l, a } => {
                let _ = write!(out, "hsla({:.1},{:.0}%,{:.0}%,{:.3})", h, s, l, a);
            }
        }
        out
    }
}

pub type Stops = SmallVec<[(f32, Color); 4]>;

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear { from: Vec2, to: Vec2, stops: Stops },
    Radial { center: Vec2, r0: f32, r1: f32, stops: Stops },
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

/// Soft shadow drawn behind a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Transparent clear of the whole surface.
    Clear,
    /// Full-surface fill; low alpha leaves motion trails.
    Fade(Color),
    FillRect { origin: Vec2, size: Vec2, paint: Paint },
    FillCircle { center: Vec2, radius: f32, paint: Paint, glow: Option<Glow> },
    StrokeCircle { center: Vec2, radius: f32, color: Color, width: f32 },
    Line { from: Vec2, to: Vec2, color: Color, width: f32 },
    Polygon { points: Vec<Vec2>, paint: Paint, glow: Option<Glow> },
    Ellipse { center: Vec2, radii: Vec2, rotation: f32, paint: Paint },
    /// Quadratic curve stroke, used for grass blades and wave crests.
    Curve { from: Vec2, control: Vec2, to: Vec2, color: Color, width: f32 },
    /// Rounded, rotated block with a drop shadow and a top highlight.
    Block {
        center: Vec2,
        size: Vec2,
        angle: f32,
        scale: f32,
        color: Color,
        glow: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    pub cmds: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            cmds: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCmd> {
        self.cmds.iter()
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCmd::FillCircle {
            center,
            radius: radius.max(0.0),
            paint: Paint::Solid(color),
            glow: None,
        });
    }

    pub fn glowing_circle(&mut self, center: Vec2, radius: f32, color: Color, blur: f32) {
        self.push(DrawCmd::FillCircle {
            center,
            radius: radius.max(0.0),
            paint: Paint::Solid(color),
            glow: Some(Glow { blur, color }),
        });
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: impl Into<Paint>) {
        self.push(DrawCmd::FillRect {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
            paint: paint.into(),
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.push(DrawCmd::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn polygon(&mut self, points: Vec<Vec2>, paint: impl Into<Paint>) {
        self.push(DrawCmd::Polygon {
            points,
            paint: paint.into(),
            glow: None,
        });
    }

    pub fn extend(&mut self, other: DisplayList) {
        self.cmds.extend(other.cmds);
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DrawCmd;
    type IntoIter = std::slice::Iter<'a, DrawCmd>;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.iter()
    }
}

/// Vertical gradient from `top` to `bottom` covering `y0..y1`.
pub fn vertical_gradient(y0: f32, y1: f32, stops: &[(f32, Color)]) -> Paint {
    Paint::Linear {
        from: Vec2::new(0.0, y0),
        to: Vec2::new(0.0, y1),
        stops: stops.iter().copied().collect(),
    }
}

pub fn radial_gradient(center: Vec2, r0: f32, r1: f32, stops: &[(f32, Color)]) -> Paint {
    Paint::Radial {
        center,
        r0,
        r1,
        stops: stops.iter().copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_strings() {
        assert_eq!(Color::rgba(5, 5, 5, 0.2).css(), "rgba(5,5,5,0.200)");
        assert_eq!(Color::hsla(400.0, 70.0, 60.0, 1.0).css(), "hsla(40.0,70%,60%,1.000)");
    }

    #[test]
    fn hex_parses_six_digits() {
        assert_eq!(Color::hex("#A9DFBF"), Some(Color::rgb(0xA9, 0xDF, 0xBF)));
        assert_eq!(Color::hex("A9DFBF"), None);
        assert_eq!(Color::hex("#fff"), None);
    }
}
