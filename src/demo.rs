//! Interactive hologram demo.
//!
//! A display cabinet with a rotating product silhouette that the user can
//! spin, zoom and inspect. Three numbered hotspot markers sit on top of the
//! model; clicking one selects it and clicking it again, or clicking empty
//! space, clears the selection.
//!
//! All state changes clamp at the mutation site: zoom always stays inside
//! the configured range and rotation wraps to `[0, 360)` degrees.

use glam::{Affine2, Vec2};

use crate::config::DemoConfig;
use crate::hologram::ROTATION_SPEED;
use crate::surface::{Path, RadialGradient, Rgba, Surface};

/// Display size as a fraction of the shorter canvas side, at zoom 1.
const DISPLAY_SCALE: f32 = 0.4;
/// Maps hotspot percentages (offset from 50) into display units.
const HOTSPOT_SPREAD: f32 = 0.02;
const HOTSPOT_RADIUS: f32 = 8.0;
const HOTSPOT_ACTIVE_RADIUS: f32 = 12.0;
/// Cube frame skew, as a multiple of the half edge.
const FRAME_SKEW: f32 = 0.3;

/// A labelled marker on the demo model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hotspot {
    pub id: u32,
    /// Position in percent of the display (50, 50 is the centre).
    pub anchor: Vec2,
    pub title: &'static str,
    pub description: &'static str,
}

/// The markers shown on the demo model.
pub const HOTSPOTS: [Hotspot; 3] = [
    Hotspot {
        id: 1,
        anchor: Vec2::new(35.0, 30.0),
        title: "Projection Unit",
        description: "Advanced laser projection system with 4K resolution and 1000 nits brightness.",
    },
    Hotspot {
        id: 2,
        anchor: Vec2::new(65.0, 40.0),
        title: "Motion Sensors",
        description: "Infrared sensors detect customer presence and track movement for interactive displays.",
    },
    Hotspot {
        id: 3,
        anchor: Vec2::new(50.0, 70.0),
        title: "Control Module",
        description: "Central processing unit with wireless connectivity and cloud integration.",
    },
];

/// State of the interactive demo.
#[derive(Debug, Clone)]
pub struct DemoState {
    /// Rotation in degrees, in `[0, 360)`.
    rotation: f32,
    zoom: f32,
    playing: bool,
    active: Option<u32>,
    config: DemoConfig,
}

impl Default for DemoState {
    fn default() -> Self {
        Self::new(DemoConfig::default())
    }
}

impl DemoState {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            rotation: 0.0,
            zoom: 1.0,
            playing: false,
            active: None,
            config,
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + self.config.zoom_step).min(self.config.zoom_max);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - self.config.zoom_step).max(self.config.zoom_min);
    }

    /// Stop, face front, zoom 1, nothing selected.
    pub fn reset(&mut self) {
        self.playing = false;
        self.rotation = 0.0;
        self.zoom = 1.0;
        self.active = None;
    }

    /// Advance one frame; rotates only while playing.
    pub fn tick(&mut self) {
        if self.playing {
            self.rotation = (self.rotation + self.config.rotation_step).rem_euclid(360.0);
        }
    }

    pub fn active_id(&self) -> Option<u32> {
        self.active
    }

    pub fn active_hotspot(&self) -> Option<&'static Hotspot> {
        let id = self.active?;
        HOTSPOTS.iter().find(|h| h.id == id)
    }

    /// Edge length of the display cube on a canvas of `canvas` size.
    pub fn display_size(&self, canvas: Vec2) -> f32 {
        canvas.x.min(canvas.y) * DISPLAY_SCALE * self.zoom
    }

    /// Screen position of a hotspot marker.
    pub fn hotspot_position(&self, hotspot: &Hotspot, canvas: Vec2) -> Vec2 {
        let center = canvas * 0.5;
        center + (hotspot.anchor - Vec2::splat(50.0)) * self.display_size(canvas) * HOTSPOT_SPREAD
    }

    /// Hotspot whose marker is within the hit radius of `at`.
    pub fn hit_test(&self, at: Vec2, canvas: Vec2) -> Option<&'static Hotspot> {
        HOTSPOTS
            .iter()
            .find(|h| self.hotspot_position(h, canvas).distance(at) <= self.config.hit_radius)
    }

    /// Handle a click at canvas-local `at`: toggle the hit marker, or clear
    /// the selection when nothing is hit. Returns the new selection.
    pub fn click(&mut self, at: Vec2, canvas: Vec2) -> Option<u32> {
        self.active = match self.hit_test(at, canvas) {
            Some(h) if self.active == Some(h.id) => None,
            Some(h) => Some(h.id),
            None => None,
        };
        self.active
    }

    /// Draw the demo at time `t` seconds.
    pub fn render(&self, surface: &mut dyn Surface, t: f32) {
        let canvas = surface.size();
        let center = canvas * 0.5;
        let size = self.display_size(canvas);
        let transform = Affine2::from_angle_translation(self.rotation.to_radians(), center);

        draw_stand(surface, &transform, size);
        draw_cube(surface, &transform, size);
        draw_projection(surface, &transform, size * 0.8, t);
        self.draw_hotspots(surface, canvas, t);
    }

    fn draw_hotspots(&self, surface: &mut dyn Surface, canvas: Vec2, t: f32) {
        for hotspot in &HOTSPOTS {
            let at = self.hotspot_position(hotspot, canvas);
            let active = self.active == Some(hotspot.id);

            let (radius, alpha) = if active {
                (HOTSPOT_ACTIVE_RADIUS, 0.8)
            } else {
                (HOTSPOT_RADIUS, 0.5)
            };
            surface.fill_circle(at, radius, Rgba::white(alpha));

            if active {
                let pulse = 8.0 + (t * 3.0).sin() * 4.0;
                surface.stroke_path(&Path::circle(at, pulse), Rgba::white(0.6), 2.0);
            }

            surface.fill_text(&hotspot.id.to_string(), at, Rgba::BLACK);
        }
    }
}

fn draw_stand(surface: &mut dyn Surface, transform: &Affine2, size: f32) {
    let base = Path::ellipse(Vec2::new(0.0, size * 0.6), Vec2::new(size * 0.5, size * 0.2))
        .transformed(transform);
    surface.fill_path(&base, Rgba::white(0.2));
    surface.stroke_path(&base, Rgba::white(0.5), 1.0);

    let stand = Path::line(Vec2::new(0.0, size * 0.6), Vec2::ZERO).transformed(transform);
    surface.stroke_path(&stand, Rgba::white(0.7), 3.0);
}

fn draw_cube(surface: &mut dyn Surface, transform: &Affine2, size: f32) {
    let h = size / 2.0;
    let near = 1.0 - FRAME_SKEW;
    let far = 1.0 + FRAME_SKEW;
    let frame_color = Rgba::white(0.8);

    let front = Path::rect(Vec2::splat(-h), Vec2::splat(size)).transformed(transform);
    surface.stroke_path(&front, frame_color, 2.0);

    let top = Path::polyline(vec![
        Vec2::new(-h, -h),
        Vec2::new(-h * near, -h * far),
        Vec2::new(h * far, -h * far),
        Vec2::new(h, -h),
    ]);
    surface.stroke_path(&top.transformed(transform), frame_color, 2.0);

    let right = Path::polyline(vec![
        Vec2::new(h, -h),
        Vec2::new(h * far, -h * far),
        Vec2::new(h * far, h * near),
        Vec2::new(h, h),
    ]);
    surface.stroke_path(&right.transformed(transform), frame_color, 2.0);

    // Glass
    surface.fill_path(&front, Rgba::white(0.1));
}

/// The projected product: glow, a spinning silhouette and scan lines.
fn draw_projection(surface: &mut dyn Surface, transform: &Affine2, size: f32, t: f32) {
    let h = size / 2.0;

    let glow = RadialGradient::new(Vec2::ZERO, size, Rgba::white(0.4), Rgba::white(0.0));
    surface.fill_gradient(
        &Path::circle(Vec2::ZERO, size).transformed(transform),
        &glow.transformed(transform),
    );

    let spin = *transform * Affine2::from_angle(t * ROTATION_SPEED);

    let base = Path::ellipse(Vec2::new(0.0, h * 0.3), Vec2::new(h * 0.4, h * 0.2)).transformed(&spin);
    surface.fill_path(&base, Rgba::white(0.3));
    surface.stroke_path(&base, Rgba::white(0.8), 1.0);

    let body = Path::polygon(vec![
        Vec2::new(-h * 0.2, h * 0.3),
        Vec2::new(-h * 0.3, -h * 0.4),
        Vec2::new(h * 0.3, -h * 0.4),
        Vec2::new(h * 0.2, h * 0.3),
    ])
    .transformed(&spin);
    surface.fill_path(&body, Rgba::white(0.2));
    surface.stroke_path(&body, Rgba::white(0.6), 1.0);

    let top = Path::ellipse(Vec2::new(0.0, -h * 0.4), Vec2::new(h * 0.3, h * 0.15)).transformed(&spin);
    surface.fill_path(&top, Rgba::white(0.3));
    surface.stroke_path(&top, Rgba::white(0.8), 1.0);

    let shift = (t * 2.0).sin() * 10.0;
    let mut row = -h;
    while row < h {
        let y = row + shift;
        let alpha = 0.1 + (t * 2.0 + row * 0.1).sin() * 0.1;
        let line = Path::line(Vec2::new(-h * 0.5, y), Vec2::new(h * 0.5, y)).transformed(&spin);
        surface.stroke_path(&line, Rgba::white(alpha), 1.0);
        row += 10.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawList;

    const CANVAS: Vec2 = Vec2::new(500.0, 500.0);

    #[test]
    fn test_zoom_saturates() {
        let mut demo = DemoState::default();
        for _ in 0..10 {
            demo.zoom_in();
        }
        assert_eq!(demo.zoom(), 1.5);
        for _ in 0..20 {
            demo.zoom_out();
        }
        assert_eq!(demo.zoom(), 0.5);
    }

    #[test]
    fn test_rotation_only_while_playing() {
        let mut demo = DemoState::default();
        demo.tick();
        assert_eq!(demo.rotation(), 0.0);

        demo.toggle_play();
        for _ in 0..4 {
            demo.tick();
        }
        assert_eq!(demo.rotation(), 2.0);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut demo = DemoState::default();
        demo.toggle_play();
        for _ in 0..721 {
            demo.tick();
        }
        assert!((demo.rotation() - 0.5).abs() < 1e-2);
        assert!(demo.rotation() < 360.0);
    }

    #[test]
    fn test_hotspot_positions() {
        let demo = DemoState::default();
        // Display size 200; (35, 30) maps to centre + (-15, -20) * 4.
        let p = demo.hotspot_position(&HOTSPOTS[0], CANVAS);
        assert!((p - Vec2::new(190.0, 170.0)).length() < 1e-4);
    }

    #[test]
    fn test_click_toggles_and_clears() {
        let mut demo = DemoState::default();
        let first = demo.hotspot_position(&HOTSPOTS[0], CANVAS);
        let second = demo.hotspot_position(&HOTSPOTS[1], CANVAS);

        assert_eq!(demo.click(first, CANVAS), Some(1));
        assert_eq!(demo.active_hotspot().map(|h| h.title), Some("Projection Unit"));
        assert_eq!(demo.click(second, CANVAS), Some(2));
        assert_eq!(demo.click(second, CANVAS), None);

        demo.click(first, CANVAS);
        assert_eq!(demo.click(Vec2::new(5.0, 5.0), CANVAS), None);
    }

    #[test]
    fn test_hit_radius_boundary() {
        let mut demo = DemoState::default();
        let at = demo.hotspot_position(&HOTSPOTS[2], CANVAS);
        assert_eq!(demo.click(at + Vec2::new(12.0, 0.0), CANVAS), Some(3));
        demo.reset();
        assert_eq!(demo.click(at + Vec2::new(13.0, 0.0), CANVAS), None);
    }

    #[test]
    fn test_zoom_moves_hotspots() {
        let mut demo = DemoState::default();
        let before = demo.hotspot_position(&HOTSPOTS[0], CANVAS);
        demo.zoom_in();
        let after = demo.hotspot_position(&HOTSPOTS[0], CANVAS);
        assert!(after.distance(CANVAS * 0.5) > before.distance(CANVAS * 0.5));
    }

    #[test]
    fn test_reset() {
        let mut demo = DemoState::default();
        demo.toggle_play();
        demo.tick();
        demo.zoom_out();
        demo.click(demo.hotspot_position(&HOTSPOTS[0], CANVAS), CANVAS);
        demo.reset();
        assert!(!demo.is_playing());
        assert_eq!(demo.rotation(), 0.0);
        assert_eq!(demo.zoom(), 1.0);
        assert_eq!(demo.active_id(), None);
    }

    #[test]
    fn test_render_labels_every_hotspot() {
        let mut demo = DemoState::default();
        demo.click(demo.hotspot_position(&HOTSPOTS[1], CANVAS), CANVAS);
        let mut surface = DrawList::new(500, 500).unwrap();
        demo.render(&mut surface, 0.0);

        let labels: Vec<_> = surface.texts().map(|(t, _)| t.to_string()).collect();
        assert_eq!(labels, vec!["1", "2", "3"]);
        assert_eq!(surface.gradients().count(), 1);
    }
}
