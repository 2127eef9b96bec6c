//! Procedural hologram overlay.
//!
//! Draws the rotating "product cube" that floats over the hero particle
//! field. The renderer keeps no per-frame state: every frame is a pure
//! function of the wall-clock time `t` (seconds) and the canvas centre, so
//! the geometry can be computed with [`HologramRenderer::frame`] and
//! inspected without drawing anything.
//!
//! Layers, back to front:
//!
//! - an elliptical base platform below the cube,
//! - a radial glow centred on the display,
//! - the cube, rotated by `t * 0.5` radians, built from a front, top and
//!   right face; the top and right faces are skewed by a fixed fraction of
//!   the edge length to fake perspective,
//! - horizontal scan lines across the front face whose offset oscillates as
//!   `sin(t * 3) * 20` and whose opacity oscillates per line.

use glam::{Affine2, Vec2};

use crate::surface::{Path, RadialGradient, Rgba, Surface};

/// Radians of cube rotation per second.
pub const ROTATION_SPEED: f32 = 0.5;
/// Fraction of the edge length used for the fake perspective skew.
pub const PERSPECTIVE_SKEW: f32 = 0.3;
/// Angular frequency of the scan-line oscillation.
pub const SCAN_FREQUENCY: f32 = 3.0;
/// Amplitude of the scan-line offset.
pub const SCAN_AMPLITUDE: f32 = 20.0;
/// Spacing between scan lines.
pub const SCAN_SPACING: f32 = 5.0;

/// One quadrilateral face of the cube, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeFace {
    pub corners: [Vec2; 4],
    pub stroke: Rgba,
    pub fill: Rgba,
}

/// One horizontal scan line, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanLine {
    pub from: Vec2,
    pub to: Vec2,
    /// Local vertical position inside the face, before rotation.
    pub offset: f32,
    pub alpha: f32,
}

/// Geometry of one hologram frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HologramFrame {
    pub platform_center: Vec2,
    pub platform_radii: Vec2,
    pub glow: RadialGradient,
    /// Cube rotation in radians.
    pub rotation: f32,
    /// Front, top and right faces, in drawing order.
    pub faces: [CubeFace; 3],
    pub scan_lines: Vec<ScanLine>,
}

/// Renderer for the hero hologram overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HologramRenderer {
    /// Cube edge length.
    pub edge: f32,
    /// Radius of the glow.
    pub glow_radius: f32,
    /// Offset of the platform below the display centre.
    pub platform_offset: f32,
    pub platform_radii: Vec2,
}

impl Default for HologramRenderer {
    fn default() -> Self {
        Self {
            edge: 60.0,
            glow_radius: 150.0,
            platform_offset: 80.0,
            platform_radii: Vec2::new(100.0, 30.0),
        }
    }
}

impl HologramRenderer {
    pub fn new(edge: f32) -> Self {
        Self {
            edge,
            ..Self::default()
        }
    }

    pub fn rotation(t: f32) -> f32 {
        t * ROTATION_SPEED
    }

    /// Shared vertical displacement of all scan lines at time `t`.
    pub fn scan_offset(t: f32) -> f32 {
        (t * SCAN_FREQUENCY).sin() * SCAN_AMPLITUDE
    }

    /// Opacity of the scan line seeded at local row `row`.
    pub fn scan_alpha(t: f32, row: f32) -> f32 {
        0.2 + (t * SCAN_FREQUENCY + row * 0.1).sin() * 0.1
    }

    /// Compute the geometry drawn at time `t` around `center`.
    pub fn frame(&self, center: Vec2, t: f32) -> HologramFrame {
        let rotation = Self::rotation(t);
        let transform = Affine2::from_angle_translation(rotation, center);
        let s = self.edge;
        let h = s / 2.0;
        let p = s * PERSPECTIVE_SKEW;

        let local_faces = [
            (
                [Vec2::new(-h, -h), Vec2::new(h, -h), Vec2::new(h, h), Vec2::new(-h, h)],
                Rgba::white(0.8),
                Rgba::white(0.1),
            ),
            (
                [
                    Vec2::new(-h, -h),
                    Vec2::new(-h + p, -h - p),
                    Vec2::new(h + p, -h - p),
                    Vec2::new(h, -h),
                ],
                Rgba::white(0.6),
                Rgba::white(0.1),
            ),
            (
                [
                    Vec2::new(h, -h),
                    Vec2::new(h + p, -h - p),
                    Vec2::new(h + p, h - p),
                    Vec2::new(h, h),
                ],
                Rgba::white(0.4),
                Rgba::white(0.05),
            ),
        ];
        let faces = local_faces.map(|(corners, stroke, fill)| CubeFace {
            corners: corners.map(|c| transform.transform_point2(c)),
            stroke,
            fill,
        });

        let shift = Self::scan_offset(t);
        let mut scan_lines = Vec::new();
        let mut row = -h;
        while row < h {
            let y = row + shift;
            if y > -h && y < h {
                scan_lines.push(ScanLine {
                    from: transform.transform_point2(Vec2::new(-h, y)),
                    to: transform.transform_point2(Vec2::new(h, y)),
                    offset: y,
                    alpha: Self::scan_alpha(t, row),
                });
            }
            row += SCAN_SPACING;
        }

        HologramFrame {
            platform_center: center + Vec2::new(0.0, self.platform_offset),
            platform_radii: self.platform_radii,
            glow: RadialGradient::new(center, self.glow_radius, Rgba::white(0.3), Rgba::white(0.0)),
            rotation,
            faces,
            scan_lines,
        }
    }

    /// Draw the hologram centred on the surface at time `t`.
    pub fn render(&self, surface: &mut dyn Surface, t: f32) {
        let center = surface.size() * 0.5;
        self.render_at(surface, center, t);
    }

    /// Draw the hologram around `center` at time `t`.
    pub fn render_at(&self, surface: &mut dyn Surface, center: Vec2, t: f32) {
        let frame = self.frame(center, t);

        surface.fill_path(
            &Path::ellipse(frame.platform_center, frame.platform_radii),
            Rgba::white(0.2),
        );
        surface.fill_gradient(&Path::circle(center, frame.glow.radius), &frame.glow);

        for face in &frame.faces {
            let path = Path::polygon(face.corners.to_vec());
            surface.stroke_path(&path, face.stroke, 1.0);
            surface.fill_path(&path, face.fill);
        }

        for line in &frame.scan_lines {
            surface.stroke_line(line.from, line.to, Rgba::white(line.alpha), 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawList;

    #[test]
    fn test_rotation_follows_time() {
        let r = HologramRenderer::default();
        let frame = r.frame(Vec2::ZERO, 2.0);
        assert_eq!(frame.rotation, 1.0);
    }

    #[test]
    fn test_unrotated_front_face() {
        let r = HologramRenderer::default();
        let frame = r.frame(Vec2::new(400.0, 300.0), 0.0);
        let front = frame.faces[0];
        assert_eq!(front.corners[0], Vec2::new(370.0, 270.0));
        assert_eq!(front.corners[2], Vec2::new(430.0, 330.0));
    }

    #[test]
    fn test_perspective_skew() {
        let r = HologramRenderer::default();
        let frame = r.frame(Vec2::ZERO, 0.0);
        let top = frame.faces[1];
        // Back edge is shifted right and up by 0.3 of the 60 unit edge.
        assert!((top.corners[1] - Vec2::new(-12.0, -48.0)).length() < 1e-4);
        assert!((top.corners[2] - Vec2::new(48.0, -48.0)).length() < 1e-4);
    }

    #[test]
    fn test_rotation_preserves_face_size() {
        let r = HologramRenderer::default();
        for t in [0.0, 0.7, 3.1, 10.0] {
            let front = r.frame(Vec2::new(50.0, 50.0), t).faces[0];
            let edge = front.corners[0].distance(front.corners[1]);
            assert!((edge - 60.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_scan_lines_stay_inside_face() {
        let r = HologramRenderer::default();
        for t in [0.0, 0.3, 1.0, 2.5] {
            let frame = r.frame(Vec2::ZERO, t);
            assert!(!frame.scan_lines.is_empty());
            for line in &frame.scan_lines {
                assert!(line.offset > -30.0 && line.offset < 30.0);
                assert!((0.1..=0.3).contains(&line.alpha));
            }
        }
    }

    #[test]
    fn test_scan_offset_at_zero() {
        assert_eq!(HologramRenderer::scan_offset(0.0), 0.0);
        let frame = HologramRenderer::default().frame(Vec2::ZERO, 0.0);
        // Rows -30..30 step 5, with -30 excluded by the strict bound.
        assert_eq!(frame.scan_lines.len(), 11);
    }

    #[test]
    fn test_render_order() {
        let mut surface = DrawList::new(800, 600).unwrap();
        HologramRenderer::default().render(&mut surface, 1.0);
        let glow = surface.gradients().next().unwrap();
        assert_eq!(glow.center, Vec2::new(400.0, 300.0));
        assert_eq!(glow.radius, 150.0);
        // Platform + three faces.
        assert_eq!(surface.fills().count(), 4);
    }
}
