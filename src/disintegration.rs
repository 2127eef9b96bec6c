//! Image disintegration field.
//!
//! A source image is drawn onto an offscreen canvas and sampled on a fixed
//! grid. Every sample opaque enough to keep becomes an [`ImageParticle`]
//! with the sample's colour, a random explosion angle and a random maximum
//! distance. Scroll progress then drives every particle outward from its
//! sample point:
//!
//! ```text
//! progress <= dead_zone : position = origin
//! progress >  dead_zone : m = clamp((progress - dead_zone) / (1 - dead_zone), 0, 1)
//!                         position = origin + (cos a, sin a) * max_distance * m
//! ```
//!
//! Rendered size shrinks linearly from `max_size` to 0; see [`SizeDecay`]
//! for how it relates to the dead zone.

use std::path::Path;

use glam::Vec2;
use image::RgbaImage;
use log::{debug, warn};

use crate::config::{DisintegrationConfig, SizeDecay};
use crate::error::ImageLoadError;
use crate::spawn::SpawnContext;
use crate::surface::{Canvas, Rgba, Surface};

/// One particle sampled from the source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageParticle {
    origin: Vec2,
    pub position: Vec2,
    color: Rgba,
    angle: f32,
    max_distance: f32,
    pub size: f32,
}

impl ImageParticle {
    pub fn new(origin: Vec2, color: Rgba, angle: f32, max_distance: f32, size: f32) -> Self {
        Self {
            origin,
            position: origin,
            color,
            angle,
            max_distance,
            size,
        }
    }

    /// Sample point on the source canvas. Never changes.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Explosion direction in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Unit vector along the explosion angle.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }
}

/// Particles sampled from one image, animated by scroll progress.
#[derive(Debug, Clone)]
pub struct DisintegrationField {
    particles: Vec<ImageParticle>,
    config: DisintegrationConfig,
    progress: f32,
}

impl Default for DisintegrationField {
    fn default() -> Self {
        Self::new(DisintegrationConfig::default())
    }
}

impl DisintegrationField {
    /// An empty, inert field.
    pub fn new(config: DisintegrationConfig) -> Self {
        Self {
            particles: Vec::new(),
            config,
            progress: 0.0,
        }
    }

    /// Sample `image` into particles.
    ///
    /// The image is first stretched over a `canvas_width` x `canvas_height`
    /// canvas, then every `stride`-th pixel on both axes with alpha at or
    /// above the threshold yields one particle.
    pub fn from_image(image: &RgbaImage, config: DisintegrationConfig) -> Result<Self, ImageLoadError> {
        let mut canvas = Canvas::new(config.canvas_width, config.canvas_height)?;
        canvas.draw_image(image);

        let mut ctx = SpawnContext::new(config.seed);
        let stride = config.stride.max(1) as usize;
        let mut particles = Vec::new();

        for y in (0..canvas.height()).step_by(stride) {
            for x in (0..canvas.width()).step_by(stride) {
                let Some([r, g, b, a]) = canvas.pixel_bytes(x, y) else {
                    continue;
                };
                if a < config.alpha_threshold {
                    continue;
                }
                particles.push(ImageParticle::new(
                    Vec2::new(x as f32, y as f32),
                    Rgba::rgb(r, g, b),
                    ctx.random_angle(),
                    ctx.random_range(config.min_distance, config.max_distance),
                    config.max_size,
                ));
            }
        }

        debug!(
            "disintegration field sampled {} particles from a {}x{} image",
            particles.len(),
            image.width(),
            image.height()
        );

        Ok(Self {
            particles,
            config,
            progress: 0.0,
        })
    }

    /// Load and sample the image at `path`.
    pub fn try_load(path: impl AsRef<Path>, config: DisintegrationConfig) -> Result<Self, ImageLoadError> {
        let image = image::open(path.as_ref())?.to_rgba8();
        Self::from_image(&image, config)
    }

    /// Load and sample the image at `path`, falling back to an empty field
    /// when the image cannot be loaded.
    pub fn load(path: impl AsRef<Path>, config: DisintegrationConfig) -> Self {
        let path = path.as_ref();
        match Self::try_load(path, config.clone()) {
            Ok(field) => field,
            Err(e) => {
                warn!("{}: {}; disintegration field left empty", path.display(), e);
                Self::new(config)
            }
        }
    }

    /// Progress past the dead zone, rescaled to `[0, 1]`.
    pub fn normalized(&self, progress: f32) -> f32 {
        let dead_zone = self.config.dead_zone;
        if !self.is_moving(progress) {
            return 0.0;
        }
        ((progress - dead_zone) / (1.0 - dead_zone)).clamp(0.0, 1.0)
    }

    /// Whether `progress` is past the dead zone. NaN counts as inside it.
    fn is_moving(&self, progress: f32) -> bool {
        progress > self.config.dead_zone
    }

    /// Rendered particle size at `progress`.
    pub fn size_at(&self, progress: f32) -> f32 {
        let decay = match self.config.size_decay {
            SizeDecay::Gated => self.normalized(progress),
            SizeDecay::Ungated => progress,
        };
        (self.config.max_size * (1.0 - decay)).max(0.0)
    }

    /// Move every particle to its place at scroll `progress`.
    pub fn tick(&mut self, progress: f32) {
        self.progress = progress;
        let size = self.size_at(progress);

        if !self.is_moving(progress) {
            for particle in &mut self.particles {
                particle.position = particle.origin;
                particle.size = size;
            }
            return;
        }

        let m = self.normalized(progress);
        for particle in &mut self.particles {
            particle.position = particle.origin + particle.direction() * particle.max_distance * m;
            particle.size = size;
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.render_at(surface, Vec2::ZERO);
    }

    /// Draw with the sampling canvas's top-left corner at `origin`.
    pub fn render_at(&self, surface: &mut dyn Surface, origin: Vec2) {
        for particle in &self.particles {
            surface.fill_circle(origin + particle.position, particle.size, particle.color);
        }
    }

    pub fn particles(&self) -> &[ImageParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Progress passed to the last [`tick`](Self::tick).
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn config(&self) -> &DisintegrationConfig {
        &self.config
    }
}

/// Stand-in product image: a rounded glass panel with a bright core on a
/// transparent background.
pub fn placeholder(width: u32, height: u32) -> RgbaImage {
    let center = Vec2::new(width as f32, height as f32) * 0.5;
    let radius = center.min_element() * 0.8;

    RgbaImage::from_fn(width, height, |x, y| {
        let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
        let d = p.distance(center) / radius.max(1.0);
        if d > 1.0 {
            return image::Rgba([0, 0, 0, 0]);
        }
        let shade = (255.0 * (1.0 - 0.6 * d)) as u8;
        let ring = ((d * 12.0).sin().abs() * 40.0) as u8;
        image::Rgba([shade.saturating_sub(ring), shade, 255, 255])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawList;

    fn config() -> DisintegrationConfig {
        DisintegrationConfig::default()
            .with_canvas_size(60, 60)
            .with_seed(3)
    }

    fn opaque(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255]))
    }

    #[test]
    fn test_sampling_grid() {
        let field = DisintegrationField::from_image(&opaque(60, 60), config()).unwrap();
        // 0, 6, ..., 54 on both axes.
        assert_eq!(field.len(), 100);
        assert_eq!(field.particles()[1].origin(), Vec2::new(6.0, 0.0));
        assert_eq!(field.particles()[0].color(), Rgba::rgb(200, 100, 50));
    }

    #[test]
    fn test_transparent_samples_are_dropped() {
        let mut image = opaque(60, 60);
        for (x, _, px) in image.enumerate_pixels_mut() {
            if x >= 30 {
                px.0[3] = 127;
            }
        }
        let field = DisintegrationField::from_image(&image, config()).unwrap();
        assert_eq!(field.len(), 50);
        assert!(field.particles().iter().all(|p| p.origin().x < 30.0));
    }

    #[test]
    fn test_attributes_in_range() {
        let field = DisintegrationField::from_image(&opaque(60, 60), config()).unwrap();
        for p in field.particles() {
            assert!((0.0..std::f32::consts::TAU).contains(&p.angle()));
            assert!((50.0..150.0).contains(&p.max_distance()));
        }
    }

    #[test]
    fn test_dead_zone_keeps_origin() {
        let mut field = DisintegrationField::from_image(&opaque(60, 60), config()).unwrap();
        field.tick(0.9);
        for p in [0.0, 0.1, 0.2] {
            field.tick(p);
            assert!(field.particles().iter().all(|q| q.position == q.origin()));
        }
    }

    #[test]
    fn test_full_progress_reaches_max_distance() {
        let mut field = DisintegrationField::from_image(&opaque(60, 60), config()).unwrap();
        field.tick(1.0);
        for p in field.particles() {
            let expected = p.origin() + p.direction() * p.max_distance();
            assert!(p.position.distance(expected) < 1e-3);
            assert_eq!(p.size, 0.0);
        }
    }

    #[test]
    fn test_gated_size_holds_in_dead_zone() {
        let field = DisintegrationField::new(config());
        assert_eq!(field.size_at(0.0), 3.0);
        assert_eq!(field.size_at(0.2), 3.0);
        assert!((field.size_at(0.6) - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_ungated_size_shrinks_from_zero() {
        let field = DisintegrationField::new(config().with_size_decay(SizeDecay::Ungated));
        assert!((field.size_at(0.1) - 2.7).abs() < 1e-5);
        assert_eq!(field.size_at(1.5), 0.0);
    }

    #[test]
    fn test_missing_image_leaves_field_empty() {
        let field = DisintegrationField::load("/nonexistent/product.png", config());
        assert!(field.is_empty());
        assert!(matches!(
            DisintegrationField::try_load("/nonexistent/product.png", config()),
            Err(ImageLoadError::Io(_))
        ));

        let mut surface = DrawList::new(60, 60).unwrap();
        let mut field = field;
        field.tick(0.5);
        field.render(&mut surface);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_placeholder_has_opaque_core() {
        let image = placeholder(40, 40);
        assert_eq!(image.get_pixel(20, 20).0[3], 255);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }
}
