//! Mouse-reactive particle field.
//!
//! A fixed population of particles is scattered over the canvas. Each
//! particle is anchored to the spot it was created at and, every tick:
//!
//! 1. is pushed away from the pointer when it is inside the influence radius,
//!    with an impulse of `-(pointer - position) * (R - d) / R * repulsion`;
//! 2. is pulled back toward its home position by `(home - position) * restoring`;
//! 3. loses velocity to friction;
//! 4. integrates `position += velocity`.
//!
//! With the pointer out of range this is a damped spring, so every particle
//! settles exponentially onto its home position.
//!
//! Links are drawn between every pair of particles closer than the link
//! distance. That pass is O(n²); the population is small and fixed (80 by
//! default), so the cost is bounded.

use glam::Vec2;

use crate::config::FieldConfig;
use crate::error::SurfaceError;
use crate::spawn::SpawnContext;
use crate::surface::{Rgba, Surface};

/// Alpha of the connective lines.
const LINK_ALPHA: f32 = 0.1;
const LINK_WIDTH: f32 = 0.5;

/// A single particle of the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    home: Vec2,
    depth: f32,
    size: f32,
    color: Rgba,
}

impl Particle {
    /// Particle resting at `home`.
    pub fn new(home: Vec2, depth: f32, size: f32, color: Rgba) -> Self {
        Self {
            position: home,
            velocity: Vec2::ZERO,
            home,
            depth,
            size,
            color,
        }
    }

    fn spawn(ctx: &mut SpawnContext, canvas: Vec2) -> Self {
        let home = ctx.random_in_rect(canvas);
        let depth = ctx.random_range(0.0, 2.0);
        let size = ctx.random_range(0.5, 2.5);
        let alpha = ctx.random_range(0.3, 0.8);
        Self::new(home, depth, size, Rgba::white(alpha))
    }

    /// Anchor the particle was created at. Never changes.
    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Rendered radius: base size scaled by depth.
    pub fn radius(&self) -> f32 {
        self.size * self.depth
    }

    /// Advance one tick against the current pointer position.
    pub fn update(&mut self, pointer: Vec2, config: &FieldConfig) {
        let to_pointer = pointer - self.position;
        let distance = to_pointer.length();
        if distance < config.influence_radius {
            let force = (config.influence_radius - distance) / config.influence_radius;
            self.velocity -= to_pointer * force * config.repulsion;
        }

        self.velocity += (self.home - self.position) * config.restoring;
        self.velocity *= config.friction;
        self.position += self.velocity;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.position, self.radius(), self.color);
    }
}

/// The particle field owned by one canvas.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    size: Vec2,
    config: FieldConfig,
}

impl ParticleField {
    /// Create `count` particles over a `width` x `height` canvas with the
    /// default field settings.
    pub fn initialize(width: f32, height: f32, count: usize) -> Result<Self, SurfaceError> {
        Self::with_config(
            Vec2::new(width, height),
            FieldConfig::default().with_count(count),
        )
    }

    /// Create a field from a full config.
    ///
    /// Fails when the canvas has no area, leaving the caller to skip this
    /// component.
    pub fn with_config(size: Vec2, config: FieldConfig) -> Result<Self, SurfaceError> {
        check_size(size)?;
        let mut field = Self {
            particles: Vec::new(),
            size,
            config,
        };
        field.populate();
        Ok(field)
    }

    fn populate(&mut self) {
        let mut ctx = SpawnContext::new(self.config.seed);
        self.particles = (0..self.config.count)
            .map(|_| Particle::spawn(&mut ctx, self.size))
            .collect();
        log::debug!(
            "particle field initialized: {} particles over {}x{}",
            self.particles.len(),
            self.size.x,
            self.size.y
        );
    }

    /// Re-create the particles for a resized canvas.
    pub fn resize(&mut self, size: Vec2) -> Result<(), SurfaceError> {
        check_size(size)?;
        self.size = size;
        self.populate();
        Ok(())
    }

    /// Advance every particle one step.
    pub fn tick(&mut self, pointer: Vec2) {
        for particle in &mut self.particles {
            particle.update(pointer, &self.config);
        }
    }

    /// Index pairs `(i, j)` with `i < j` whose particles are closer than the
    /// link distance.
    pub fn links(&self) -> Vec<(usize, usize)> {
        let max = self.config.link_distance;
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                if a.position.distance(b.position) < max {
                    links.push((i, j));
                }
            }
        }
        links
    }

    fn draw_links(&self, surface: &mut dyn Surface) {
        let color = Rgba::white(LINK_ALPHA);
        for (i, j) in self.links() {
            surface.stroke_line(
                self.particles[i].position,
                self.particles[j].position,
                color,
                LINK_WIDTH,
            );
        }
    }

    /// Draw links and particles at their current positions.
    pub fn render(&self, surface: &mut dyn Surface) {
        self.draw_links(surface);
        for particle in &self.particles {
            particle.draw(surface);
        }
    }

    /// One animation frame: links from the previous positions, then each
    /// particle is updated and drawn in turn.
    pub fn frame(&mut self, pointer: Vec2, surface: &mut dyn Surface) {
        self.draw_links(surface);
        for particle in &mut self.particles {
            particle.update(pointer, &self.config);
            particle.draw(surface);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

fn check_size(size: Vec2) -> Result<(), SurfaceError> {
    if size.x >= 1.0 && size.y >= 1.0 && size.is_finite() {
        return Ok(());
    }
    Err(SurfaceError::ZeroSize {
        width: size.x.max(0.0) as u32,
        height: size.y.max(0.0) as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawList;

    fn seeded(count: usize) -> ParticleField {
        ParticleField::with_config(
            Vec2::new(800.0, 600.0),
            FieldConfig::default().with_count(count).with_seed(11),
        )
        .unwrap()
    }

    #[test]
    fn test_initial_attributes_in_range() {
        let field = seeded(80);
        assert_eq!(field.len(), 80);
        for p in field.particles() {
            assert_eq!(p.position, p.home());
            assert_eq!(p.velocity, Vec2::ZERO);
            assert!((0.0..2.0).contains(&p.depth()));
            assert!((0.5..2.5).contains(&p.size()));
            assert!((0.3..0.8).contains(&p.color().a));
            assert!(p.home().x < 800.0 && p.home().y < 600.0);
        }
    }

    #[test]
    fn test_zero_area_is_rejected() {
        assert!(ParticleField::initialize(0.0, 600.0, 80).is_err());
        assert!(ParticleField::initialize(800.0, f32::NAN, 80).is_err());
    }

    #[test]
    fn test_pointer_pushes_particle_away() {
        let config = FieldConfig::default();
        let mut p = Particle::new(Vec2::new(100.0, 100.0), 1.0, 1.0, Rgba::white(0.5));
        p.update(Vec2::new(150.0, 100.0), &config);
        assert!(p.velocity.x < 0.0);
        assert!(p.position.x < 100.0);
        assert_eq!(p.velocity.y, 0.0);
    }

    #[test]
    fn test_pointer_outside_radius_has_no_effect() {
        let config = FieldConfig::default();
        let mut p = Particle::new(Vec2::new(100.0, 100.0), 1.0, 1.0, Rgba::white(0.5));
        p.update(Vec2::new(250.0, 100.0), &config);
        assert_eq!(p.position, p.home());
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_velocity_decays_toward_rest() {
        let config = FieldConfig::default();
        let mut p = Particle::new(Vec2::new(100.0, 100.0), 1.0, 1.0, Rgba::white(0.5));
        p.velocity = Vec2::new(10.0, -5.0);
        let far = Vec2::splat(-10_000.0);
        for _ in 0..500 {
            p.update(far, &config);
        }
        assert!(p.velocity.length() < 1e-3);
        assert!(p.position.distance(p.home()) < 1e-3);
    }

    #[test]
    fn test_links_respect_distance() {
        let field = seeded(80);
        let links = field.links();
        for (i, j) in &links {
            assert!(i < j);
            let d = field.particles()[*i].position.distance(field.particles()[*j].position);
            assert!(d < 100.0);
        }
    }

    #[test]
    fn test_frame_draws_links_then_particles() {
        let mut field = seeded(20);
        let links = field.links().len();
        let mut surface = DrawList::new(800, 600).unwrap();
        field.frame(Vec2::splat(-1000.0), &mut surface);

        assert_eq!(surface.strokes().count(), links);
        let drawn = field.particles().iter().filter(|p| p.radius() > 0.0).count();
        assert_eq!(surface.fills().count(), drawn);
    }

    #[test]
    fn test_resize_reinitializes() {
        let mut field = seeded(10);
        field.resize(Vec2::new(200.0, 100.0)).unwrap();
        assert_eq!(field.len(), 10);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.home().x < 200.0 && p.home().y < 100.0));
        assert!(field.resize(Vec2::ZERO).is_err());
    }
}
