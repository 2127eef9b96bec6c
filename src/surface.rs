//! 2D drawing surfaces.
//!
//! Every effect in this crate draws through the [`Surface`] trait, which
//! exposes the handful of canvas primitives the effects need: filled and
//! stroked paths, radial gradients and text labels.
//!
//! Two implementations ship with the crate:
//!
//! - [`Canvas`] - a software RGBA rasterizer with per-pixel readback. The
//!   disintegration sampler draws its source image into one, and the viewer
//!   composites every scene canvas into a frame canvas before presenting it.
//! - [`DrawList`] - records draw commands instead of rasterizing them, so
//!   tests can assert on geometry rather than on pixels.
//!
//! Curves are flattened into polygons up front; a [`Path`] is just a point
//! list plus a closed flag, and transforms are applied with
//! [`Path::transformed`] before drawing.

use std::fmt;
use std::sync::OnceLock;

use fontdue::{Font, FontSettings};
use glam::{Affine2, Vec2};
use image::RgbaImage;

use crate::error::SurfaceError;

/// Largest width or height a single surface may have.
pub const MAX_SURFACE_DIMENSION: u32 = 8192;

/// Segments used to flatten ellipses and circles.
const CURVE_SEGMENTS: usize = 48;

/// Pixel height of labels drawn by [`Canvas`].
pub const LABEL_SIZE: f32 = 12.0;

static LABEL_FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// The embedded label font, parsed on first use.
fn label_font() -> Option<&'static Font> {
    static FONT: OnceLock<Option<Font>> = OnceLock::new();
    FONT.get_or_init(|| match Font::from_bytes(LABEL_FONT_DATA, FontSettings::default()) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("label font unavailable, text will not be drawn: {}", e);
            None
        }
    })
    .as_ref()
}

/// An sRGB colour with straight (non-premultiplied) alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// White at the given opacity. Every holographic element is drawn in
    /// translucent white.
    pub fn white(alpha: f32) -> Self {
        Self::new(255, 255, 255, alpha.clamp(0.0, 1.0))
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear interpolation of every channel.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, (self.a.clamp(0.0, 1.0) * 255.0).round() as u8]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3] as f32 / 255.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Axis-aligned rectangle, used for surface bounds and layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_size(size: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Whether `point` lies inside the rectangle (right/bottom edges excluded).
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.origin.x && point.y >= self.origin.y && point.x < max.x && point.y < max.y
    }

    /// Convert a point from the enclosing frame into rectangle-local coordinates.
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        point - self.origin
    }
}

/// A flattened path: a list of points, optionally closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Vec2>,
    closed: bool,
}

impl Path {
    /// A closed polygon.
    pub fn polygon(points: impl Into<Vec<Vec2>>) -> Self {
        Self {
            points: points.into(),
            closed: true,
        }
    }

    /// An open polyline.
    pub fn polyline(points: impl Into<Vec<Vec2>>) -> Self {
        Self {
            points: points.into(),
            closed: false,
        }
    }

    pub fn line(from: Vec2, to: Vec2) -> Self {
        Self::polyline(vec![from, to])
    }

    pub fn rect(min: Vec2, size: Vec2) -> Self {
        Self::polygon(vec![
            min,
            Vec2::new(min.x + size.x, min.y),
            min + size,
            Vec2::new(min.x, min.y + size.y),
        ])
    }

    pub fn ellipse(center: Vec2, radii: Vec2) -> Self {
        let points = (0..CURVE_SEGMENTS)
            .map(|i| {
                let angle = i as f32 / CURVE_SEGMENTS as f32 * std::f32::consts::TAU;
                center + Vec2::from_angle(angle) * radii
            })
            .collect::<Vec<_>>();
        Self::polygon(points)
    }

    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self::ellipse(center, Vec2::splat(radius))
    }

    pub fn transformed(&self, transform: &Affine2) -> Self {
        Self {
            points: self.points.iter().map(|p| transform.transform_point2(*p)).collect(),
            closed: self.closed,
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Line segments of the path, including the closing edge of a polygon.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        let count = match (n, self.closed) {
            (0 | 1, _) => 0,
            (2, _) | (_, false) => n - 1,
            (_, true) => n,
        };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    pub fn bounds(&self) -> Option<Rect> {
        let first = *self.points.first()?;
        let (min, max) = self
            .points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Rect {
            origin: min,
            size: max - min,
        })
    }
}

/// A two-stop radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    pub inner: Rgba,
    pub outer: Rgba,
}

impl RadialGradient {
    pub fn new(center: Vec2, radius: f32, inner: Rgba, outer: Rgba) -> Self {
        Self {
            center,
            radius,
            inner,
            outer,
        }
    }

    /// Colour at `point`; points beyond the radius take the outer stop.
    pub fn color_at(&self, point: Vec2) -> Rgba {
        if self.radius <= 0.0 {
            return self.outer;
        }
        let t = point.distance(self.center) / self.radius;
        self.inner.lerp(self.outer, t)
    }

    /// Move the gradient centre. Only rigid transforms are supported, so the
    /// radius is left untouched.
    pub fn transformed(&self, transform: &Affine2) -> Self {
        Self {
            center: transform.transform_point2(self.center),
            ..*self
        }
    }
}

/// A 2D drawing surface, the canvas-equivalent every effect renders into.
pub trait Surface {
    /// Drawable size in surface units (pixels for [`Canvas`]).
    fn size(&self) -> Vec2;

    /// Reallocate the surface for a new size.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError>;

    /// Reset the whole surface to its background.
    fn clear(&mut self);

    fn fill_path(&mut self, path: &Path, color: Rgba);

    fn stroke_path(&mut self, path: &Path, color: Rgba, width: f32);

    /// Fill `path` with a radial gradient.
    fn fill_gradient(&mut self, path: &Path, gradient: &RadialGradient);

    /// Draw a single-line label centred on `at`.
    fn fill_text(&mut self, text: &str, at: Vec2, color: Rgba);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius > 0.0 {
            self.fill_path(&Path::circle(center, radius), color);
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.stroke_path(&Path::line(from, to), color, width);
    }
}

fn validate_size(width: u32, height: u32) -> Result<(), SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::ZeroSize { width, height });
    }
    if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
        return Err(SurfaceError::TooLarge { width, height });
    }
    Ok(())
}

/// A recorded draw operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fill { path: Path, color: Rgba },
    Stroke { path: Path, color: Rgba, width: f32 },
    Gradient { path: Path, gradient: RadialGradient },
    Text { text: String, at: Vec2, color: Rgba },
}

/// Surface that records commands instead of rasterizing them.
///
/// `clear` drops everything recorded so far, so after a frame the list holds
/// exactly that frame's commands.
#[derive(Debug, Clone)]
pub struct DrawList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        validate_size(width, height)?;
        Ok(Self {
            width,
            height,
            commands: Vec::new(),
        })
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn fills(&self) -> impl Iterator<Item = (&Path, Rgba)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { path, color } => Some((path, *color)),
            _ => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&Path, Rgba, f32)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { path, color, width } => Some((path, *color, *width)),
            _ => None,
        })
    }

    pub fn gradients(&self) -> impl Iterator<Item = &RadialGradient> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Gradient { gradient, .. } => Some(gradient),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Vec2)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, at, .. } => Some((text.as_str(), *at)),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        validate_size(width, height)?;
        self.width = width;
        self.height = height;
        self.commands.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_path(&mut self, path: &Path, color: Rgba) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &Path, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            color,
            width,
        });
    }

    fn fill_gradient(&mut self, path: &Path, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::Gradient {
            path: path.clone(),
            gradient: *gradient,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            color,
        });
    }
}

/// Software RGBA canvas with straight-alpha "source over" compositing.
///
/// Pixels are sampled at their centres; polygons are filled with an
/// even-odd scanline pass. Antialiasing is not attempted.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    background: [u8; 4],
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        validate_size(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![[0; 4]; (width * height) as usize],
            background: [0; 4],
        })
    }

    /// Set the colour `clear` resets to, and clear.
    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = color.to_bytes();
        self.clear();
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read back one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixel_bytes(x, y).map(Rgba::from_bytes)
    }

    pub fn pixel_bytes(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Tightly packed RGBA8 rows, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.pixels[(y * self.width + x) as usize])
        })
    }

    /// Draw `image` stretched over the whole canvas.
    pub fn draw_image(&mut self, image: &RgbaImage) {
        let resized;
        let source = if image.dimensions() == (self.width, self.height) {
            image
        } else {
            resized = image::imageops::resize(
                image,
                self.width,
                self.height,
                image::imageops::FilterType::Triangle,
            );
            &resized
        };
        for (x, y, px) in source.enumerate_pixels() {
            self.blend(x as i32, y as i32, Rgba::from_bytes(px.0));
        }
    }

    /// Composite another canvas with its top-left corner at `origin`.
    pub fn blit(&mut self, source: &Canvas, origin: Vec2) {
        let ox = origin.x.floor() as i32;
        let oy = origin.y.floor() as i32;
        for y in 0..source.height {
            for x in 0..source.width {
                let px = source.pixels[(y * source.width + x) as usize];
                if px[3] == 0 {
                    continue;
                }
                self.blend(ox + x as i32, oy + y as i32, Rgba::from_bytes(px));
            }
        }
    }

    fn blend(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        self.pixels[idx] = blend_over(self.pixels[idx], color);
    }

    fn fill_spans(&mut self, points: &[Vec2], mut color_at: impl FnMut(Vec2) -> Rgba) {
        for (y, x0, x1) in scanline_spans(points, self.width, self.height) {
            for x in x0..x1 {
                let color = color_at(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                self.blend(x as i32, y as i32, color);
            }
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        validate_size(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels = vec![self.background; (width * height) as usize];
        Ok(())
    }

    fn clear(&mut self) {
        let background = self.background;
        self.pixels.iter_mut().for_each(|px| *px = background);
    }

    fn fill_path(&mut self, path: &Path, color: Rgba) {
        self.fill_spans(path.points(), |_| color);
    }

    fn stroke_path(&mut self, path: &Path, color: Rgba, width: f32) {
        // Hairlines are widened to one pixel and faded by their coverage.
        let (width, color) = if width < 1.0 {
            (1.0, color.with_alpha(color.a * width.max(0.0)))
        } else {
            (width, color)
        };
        let half = width * 0.5;
        let segments: Vec<_> = path.segments().collect();
        for (a, b) in segments {
            let d = b - a;
            let len = d.length();
            if len <= f32::EPSILON {
                continue;
            }
            let n = d.perp() / len * half;
            self.fill_spans(&[a + n, b + n, b - n, a - n], |_| color);
        }
    }

    fn fill_gradient(&mut self, path: &Path, gradient: &RadialGradient) {
        self.fill_spans(path.points(), |p| gradient.color_at(p));
    }

    fn fill_text(&mut self, text: &str, at: Vec2, color: Rgba) {
        let Some(font) = label_font() else {
            return;
        };
        let glyphs: Vec<_> = text.chars().map(|c| font.rasterize(c, LABEL_SIZE)).collect();
        let width: f32 = glyphs.iter().map(|(metrics, _)| metrics.advance_width).sum();
        // Centre the ascent-to-descent band on `at`; descent is negative.
        let (ascent, descent) = font
            .horizontal_line_metrics(LABEL_SIZE)
            .map_or((LABEL_SIZE * 0.8, -LABEL_SIZE * 0.2), |m| (m.ascent, m.descent));
        let baseline = at.y + (ascent + descent) * 0.5;

        let mut pen = at.x - width * 0.5;
        for (metrics, coverage) in &glyphs {
            let left = (pen + metrics.xmin as f32).round() as i32;
            let top = (baseline - metrics.ymin as f32 - metrics.height as f32).round() as i32;
            for (i, &cover) in coverage.iter().enumerate() {
                if cover == 0 {
                    continue;
                }
                let (x, y) = (i % metrics.width, i / metrics.width);
                let alpha = color.a * cover as f32 / 255.0;
                self.blend(left + x as i32, top + y as i32, color.with_alpha(alpha));
            }
            pen += metrics.advance_width;
        }
    }
}

fn blend_over(dst: [u8; 4], src: Rgba) -> [u8; 4] {
    let sa = src.a.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mix = |s: u8, d: u8| {
        ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    [
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]
}

/// Even-odd scanline spans `(y, x_start, x_end)` covering the polygon,
/// clipped to the surface. `x_end` is exclusive.
fn scanline_spans(points: &[Vec2], width: u32, height: u32) -> Vec<(u32, u32, u32)> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let (min_y, max_y) = points
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    if !min_y.is_finite() || !max_y.is_finite() {
        return Vec::new();
    }

    let y_start = (min_y - 0.5).ceil().max(0.0) as u32;
    let y_end = (max_y - 0.5).ceil().clamp(0.0, height as f32) as u32;

    let mut spans = Vec::new();
    let mut crossings = Vec::with_capacity(8);
    for y in y_start..y_end {
        let yc = y as f32 + 0.5;
        crossings.clear();
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            if (a.y <= yc) != (b.y <= yc) {
                crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for pair in crossings.chunks_exact(2) {
            let x0 = (pair[0] - 0.5).ceil().max(0.0);
            let x1 = (pair[1] - 0.5).ceil().min(width as f32);
            if x1 > x0 {
                spans.push((y, x0 as u32, x1 as u32));
            }
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_display_matches_css() {
        assert_eq!(Rgba::white(0.5).to_string(), "rgba(255, 255, 255, 0.5)");
        assert_eq!(Rgba::rgb(10, 20, 30).to_string(), "rgb(10, 20, 30)");
    }

    #[test]
    fn test_zero_size_surface_is_rejected() {
        assert_eq!(
            Canvas::new(0, 10).unwrap_err(),
            SurfaceError::ZeroSize { width: 0, height: 10 }
        );
        assert!(DrawList::new(10, 0).is_err());
        assert!(Canvas::new(MAX_SURFACE_DIMENSION + 1, 1).is_err());
    }

    #[test]
    fn test_polygon_segments_close() {
        let path = Path::rect(Vec2::ZERO, Vec2::new(2.0, 1.0));
        assert_eq!(path.segments().count(), 4);
        let open = Path::polyline(vec![Vec2::ZERO, Vec2::X, Vec2::ONE]);
        assert_eq!(open.segments().count(), 2);
    }

    #[test]
    fn test_fill_rect_covers_pixel_centres() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.fill_path(&Path::rect(Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0)), Rgba::rgb(255, 0, 0));

        assert_eq!(canvas.pixel_bytes(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel_bytes(4, 4), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel_bytes(5, 5), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel_bytes(1, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_translucent_fill_over_transparent_keeps_colour() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.fill_path(&Path::rect(Vec2::ZERO, Vec2::splat(4.0)), Rgba::white(0.5));
        let px = canvas.pixel_bytes(1, 1).unwrap();
        assert_eq!(&px[..3], &[255, 255, 255]);
        assert_eq!(px[3], 128);
    }

    #[test]
    fn test_gradient_fades_outward() {
        let mut canvas = Canvas::new(21, 21).unwrap();
        let center = Vec2::splat(10.5);
        let gradient = RadialGradient::new(center, 10.0, Rgba::white(1.0), Rgba::white(0.0));
        canvas.fill_gradient(&Path::circle(center, 10.0), &gradient);

        let inner = canvas.pixel(10, 10).unwrap();
        let outer = canvas.pixel(10, 18).unwrap();
        assert!(inner.a > outer.a);
    }

    #[test]
    fn test_hairline_stroke_is_visible() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.stroke_line(Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0), Rgba::white(1.0), 0.5);
        // Widened to the row whose centre sits at y = 4.5, at half coverage.
        let px = canvas.pixel(4, 4).unwrap();
        assert!(px.a > 0.45 && px.a < 0.55);
        assert_eq!(canvas.pixel(4, 6).unwrap().a, 0.0);
    }

    #[test]
    fn test_draw_image_scales_to_canvas() {
        let image = RgbaImage::from_pixel(2, 2, image::Rgba([0, 200, 0, 255]));
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.draw_image(&image);
        assert_eq!(canvas.pixel_bytes(7, 7), Some([0, 200, 0, 255]));
    }

    #[test]
    fn test_blit_offsets_source() {
        let mut frame = Canvas::new(8, 8).unwrap().with_background(Rgba::BLACK);
        let mut tile = Canvas::new(2, 2).unwrap();
        tile.fill_path(&Path::rect(Vec2::ZERO, Vec2::splat(2.0)), Rgba::rgb(0, 0, 255));
        frame.blit(&tile, Vec2::new(4.0, 4.0));

        assert_eq!(frame.pixel_bytes(4, 4), Some([0, 0, 255, 255]));
        assert_eq!(frame.pixel_bytes(3, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_draw_list_clear_resets_frame() {
        let mut list = DrawList::new(100, 100).unwrap();
        list.fill_circle(Vec2::splat(50.0), 4.0, Rgba::white(1.0));
        list.clear();
        assert_eq!(list.commands(), &[DrawCommand::Clear]);
        list.fill_text("1", Vec2::ZERO, Rgba::BLACK);
        assert_eq!(list.texts().count(), 1);
    }

    #[test]
    fn test_canvas_text_paints_centred_label() {
        let mut canvas = Canvas::new(100, 40).unwrap();
        canvas.fill_text("Projection Unit", Vec2::new(50.0, 20.0), Rgba::white(1.0));

        let painted: Vec<(u32, u32)> = (0..40)
            .flat_map(|y| (0..100).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel_bytes(x, y).is_some_and(|px| px[3] > 0))
            .collect();
        assert!(painted.len() > 50);

        let left = painted.iter().filter(|&&(x, _)| x < 50).count();
        let right = painted.len() - left;
        assert!(left > 0 && right > 0);
        assert!(painted.iter().all(|&(_, y)| (10..30).contains(&y)));
    }

    #[test]
    fn test_empty_label_draws_nothing() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.fill_text("", Vec2::splat(5.0), Rgba::white(1.0));
        canvas.fill_text(" ", Vec2::splat(5.0), Rgba::white(1.0));
        assert!((0..10).all(|y| (0..10).all(|x| canvas.pixel_bytes(x, y) == Some([0, 0, 0, 0]))));
    }

    #[test]
    fn test_rect_local_coordinates() {
        let rect = Rect::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(rect.to_local(Vec2::new(150.0, 75.0)), Vec2::new(50.0, 25.0));
        assert!(rect.contains(Vec2::new(100.0, 50.0)));
        assert!(!rect.contains(Vec2::new(300.0, 75.0)));
    }
}
