//! The page's animated sections as [`Scene`]s.
//!
//! Each scene wraps one effect and translates input events into the
//! "latest known" state the effect reads on its next frame.

use glam::Vec2;

use crate::carousel::Carousel;
use crate::config::{DemoConfig, FieldConfig};
use crate::demo::DemoState;
use crate::disintegration::DisintegrationField;
use crate::driver::{FrameContext, Scene};
use crate::error::{ParseDirectionError, SurfaceError};
use crate::hologram::HologramRenderer;
use crate::input::{Command, EventKind, InputEvent, PointerTracker};
use crate::particle_field::ParticleField;
use crate::scroll::{
    parallax_offset, visible_fraction, Container, ScrollAnimated, ScrollEngine,
    DEFAULT_PARALLAX_SPEED,
};
use crate::surface::{Path, Rgba, Surface};

/// Particle field with the hologram overlay on top.
pub struct HeroScene {
    field: ParticleField,
    hologram: HologramRenderer,
    pointer: Vec2,
    scroll_y: f32,
    parallax_speed: f32,
}

impl HeroScene {
    pub fn new(size: Vec2, config: FieldConfig) -> Result<Self, SurfaceError> {
        Ok(Self {
            field: ParticleField::with_config(size, config)?,
            hologram: HologramRenderer::default(),
            pointer: size * 0.5,
            scroll_y: 0.0,
            parallax_speed: DEFAULT_PARALLAX_SPEED,
        })
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Vertical parallax shift of the overlay.
    pub fn parallax(&self) -> f32 {
        parallax_offset(self.scroll_y, self.parallax_speed)
    }
}

impl Scene for HeroScene {
    fn name(&self) -> &str {
        "hero"
    }

    fn listens(&self) -> &[EventKind] {
        &[EventKind::PointerMove, EventKind::TouchMove, EventKind::Scroll]
    }

    fn handle_input(&mut self, event: &InputEvent, pointer: &PointerTracker) {
        match event {
            InputEvent::PointerMoved(_) | InputEvent::TouchMoved(_) => {
                self.pointer = pointer.position();
            }
            InputEvent::Scroll(viewport) => self.scroll_y = viewport.scroll_y,
            _ => {}
        }
    }

    fn frame(&mut self, surface: &mut dyn Surface, ctx: &FrameContext) {
        self.field.frame(self.pointer, surface);
        let center = surface.size() * 0.5 + Vec2::new(0.0, self.parallax());
        self.hologram.render_at(surface, center, ctx.time);
    }

    fn resize(&mut self, size: Vec2) -> Result<(), SurfaceError> {
        self.field.resize(size)?;
        self.pointer = size * 0.5;
        Ok(())
    }
}

/// Interactive product demo driven by clicks and keyboard commands.
pub struct DemoScene {
    state: DemoState,
    size: Vec2,
}

impl DemoScene {
    pub fn new(size: Vec2, config: DemoConfig) -> Self {
        Self {
            state: DemoState::new(config),
            size,
        }
    }

    pub fn state(&self) -> &DemoState {
        &self.state
    }
}

impl Scene for DemoScene {
    fn name(&self) -> &str {
        "demo"
    }

    fn listens(&self) -> &[EventKind] {
        &[EventKind::Click, EventKind::Command]
    }

    fn handle_input(&mut self, event: &InputEvent, _pointer: &PointerTracker) {
        match *event {
            InputEvent::Click(at) => {
                self.state.click(at, self.size);
            }
            InputEvent::Command(Command::TogglePlay) => self.state.toggle_play(),
            InputEvent::Command(Command::ZoomIn) => self.state.zoom_in(),
            InputEvent::Command(Command::ZoomOut) => self.state.zoom_out(),
            InputEvent::Command(Command::Reset) => self.state.reset(),
            _ => {}
        }
    }

    fn frame(&mut self, surface: &mut dyn Surface, ctx: &FrameContext) {
        self.state.tick();
        self.state.render(surface, ctx.time);

        if let Some(hotspot) = self.state.active_hotspot() {
            let at = Vec2::new(12.0, surface.size().y - 24.0);
            surface.fill_text(hotspot.title, at, Rgba::white(1.0));
            surface.fill_text(hotspot.description, at + Vec2::new(0.0, 14.0), Rgba::white(0.7));
        }
    }

    fn resize(&mut self, size: Vec2) -> Result<(), SurfaceError> {
        self.size = size;
        Ok(())
    }
}

/// Image particles that scatter as their page section scrolls into view.
pub struct DisintegrationScene {
    field: DisintegrationField,
    section: Container,
    progress: f32,
}

impl DisintegrationScene {
    /// `section` is where the effect sits on the scrolling page.
    pub fn new(field: DisintegrationField, section: Container) -> Self {
        Self {
            field,
            section,
            progress: 0.0,
        }
    }

    pub fn field(&self) -> &DisintegrationField {
        &self.field
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }
}

impl Scene for DisintegrationScene {
    fn name(&self) -> &str {
        "disintegration"
    }

    fn listens(&self) -> &[EventKind] {
        &[EventKind::Scroll]
    }

    fn handle_input(&mut self, event: &InputEvent, _pointer: &PointerTracker) {
        if let InputEvent::Scroll(viewport) = *event {
            self.progress = visible_fraction(viewport, self.section);
        }
    }

    fn frame(&mut self, surface: &mut dyn Surface, _ctx: &FrameContext) {
        self.field.tick(self.progress);
        let config = self.field.config();
        let sampled = Vec2::new(config.canvas_width as f32, config.canvas_height as f32);
        let origin = (surface.size() - sampled) * 0.5;
        self.field.render_at(surface, origin);
    }
}

/// Feature panels revealed on scroll, above the product carousel.
pub struct RevealScene {
    engine: ScrollEngine,
    labels: Vec<&'static str>,
    carousel: Carousel,
    products: Vec<&'static str>,
}

/// Panel label and its `direction`, `intensity` and `delay` attributes.
const PANELS: [(&str, &str, &str, &str); 4] = [
    ("Projection", "up", "100", "0.1"),
    ("Sensing", "down", "80", "0.2"),
    ("Control", "left", "120", "0.3"),
    ("Cloud", "right", "90", "0.4"),
];

const PRODUCTS: [&str; 4] = [
    "Glasscape Pro",
    "Glasscape Mini",
    "Glasscape Wall",
    "Glasscape Connect",
];

/// Perspective distance for the carousel's depth offsets.
const PERSPECTIVE: f32 = 1000.0;

impl RevealScene {
    pub fn new(section: Container) -> Result<Self, ParseDirectionError> {
        let elements = PANELS
            .iter()
            .map(|(_, direction, intensity, delay)| {
                ScrollAnimated::from_attributes(Some(*direction), Some(*intensity), Some(*delay))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            engine: ScrollEngine::new(section, elements),
            labels: PANELS.iter().map(|(label, ..)| *label).collect(),
            carousel: Carousel::new(PRODUCTS.len()),
            products: PRODUCTS.to_vec(),
        })
    }

    pub fn engine(&self) -> &ScrollEngine {
        &self.engine
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    fn draw_panels(&self, surface: &mut dyn Surface) {
        let size = surface.size();
        let cell = Vec2::new(size.x / 2.0, size.y * 0.3);
        let panel = cell * 0.8;

        for (i, (transform, label)) in self.engine.transforms().iter().zip(&self.labels).enumerate() {
            if transform.opacity <= 0.0 {
                continue;
            }
            let slot = Vec2::new((i % 2) as f32, (i / 2) as f32);
            let min = slot * cell + (cell - panel) * 0.5 + transform.translate;
            let path = Path::rect(min, panel);
            surface.fill_path(&path, Rgba::white(0.1 * transform.opacity));
            surface.stroke_path(&path, Rgba::white(0.5 * transform.opacity), 1.0);
            surface.fill_text(label, min + Vec2::splat(8.0), Rgba::white(transform.opacity));
        }
    }

    fn draw_carousel(&self, surface: &mut dyn Surface) {
        let size = surface.size();
        let card = Vec2::new(size.x * 0.3, size.y * 0.3);
        let center = Vec2::new(size.x * 0.5, size.y * 0.78);

        let mut slots: Vec<_> = self.carousel.transforms().into_iter().enumerate().collect();
        slots.sort_by_key(|(_, t)| t.z_index);

        for (i, slot) in slots {
            let depth = PERSPECTIVE / (PERSPECTIVE - slot.translate_z);
            let extent = card * slot.scale * depth;
            let at = center + Vec2::new(slot.translate_x / 100.0 * card.x * depth, 0.0);
            let path = Path::rect(at - extent * 0.5, extent);
            surface.fill_path(&path, Rgba::new(10, 10, 14, slot.opacity));
            surface.stroke_path(&path, Rgba::white(0.6 * slot.opacity), 1.0);
            surface.fill_text(self.products[i], at, Rgba::white(slot.opacity));
        }
    }
}

impl Scene for RevealScene {
    fn name(&self) -> &str {
        "reveal"
    }

    fn listens(&self) -> &[EventKind] {
        &[EventKind::Scroll, EventKind::Command]
    }

    fn handle_input(&mut self, event: &InputEvent, _pointer: &PointerTracker) {
        match *event {
            InputEvent::Scroll(viewport) => self.engine.on_scroll(viewport),
            InputEvent::Command(Command::NextSlide) => self.carousel.next(),
            InputEvent::Command(Command::PrevSlide) => self.carousel.prev(),
            _ => {}
        }
    }

    fn frame(&mut self, surface: &mut dyn Surface, _ctx: &FrameContext) {
        self.engine.update();
        self.draw_panels(surface);
        self.draw_carousel(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisintegrationConfig;
    use crate::disintegration::placeholder;
    use crate::scroll::Viewport;
    use crate::surface::{DrawList, Rect};

    fn ctx() -> FrameContext {
        FrameContext {
            time: 0.0,
            delta: 0.0,
            frame: 1,
        }
    }

    #[test]
    fn test_hero_tracks_pointer_and_parallax() {
        let size = Vec2::new(400.0, 300.0);
        let mut hero = HeroScene::new(size, FieldConfig::default().with_seed(1)).unwrap();
        assert_eq!(hero.pointer(), Vec2::new(200.0, 150.0));

        let mut tracker = PointerTracker::new(Rect::from_size(size));
        let event = InputEvent::PointerMoved(Vec2::new(10.0, 20.0)).localized(&mut tracker);
        hero.handle_input(&event, &tracker);
        assert_eq!(hero.pointer(), Vec2::new(10.0, 20.0));

        hero.handle_input(
            &InputEvent::Scroll(Viewport {
                scroll_y: 200.0,
                height: 300.0,
            }),
            &tracker,
        );
        assert!((hero.parallax() + 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_hero_draws_hologram_last() {
        let size = Vec2::new(400.0, 300.0);
        let mut hero = HeroScene::new(size, FieldConfig::default().with_seed(1)).unwrap();
        let mut surface = DrawList::new(400, 300).unwrap();
        hero.frame(&mut surface, &ctx());
        assert_eq!(surface.gradients().count(), 1);
        assert!(hero.resize(Vec2::ZERO).is_err());
    }

    #[test]
    fn test_demo_scene_commands() {
        let mut demo = DemoScene::new(Vec2::new(500.0, 500.0), DemoConfig::default());
        let tracker = PointerTracker::new(Rect::from_size(Vec2::new(500.0, 500.0)));
        demo.handle_input(&InputEvent::Command(Command::ZoomIn), &tracker);
        demo.handle_input(&InputEvent::Command(Command::TogglePlay), &tracker);
        demo.handle_input(&InputEvent::Command(Command::NextSlide), &tracker);
        assert!(demo.state().is_playing());
        assert!((demo.state().zoom() - 1.1).abs() < 1e-5);

        let mut surface = DrawList::new(500, 500).unwrap();
        demo.frame(&mut surface, &ctx());
        assert_eq!(demo.state().rotation(), 0.5);
    }

    #[test]
    fn test_disintegration_scene_reads_section_visibility() {
        let config = DisintegrationConfig::default()
            .with_canvas_size(40, 40)
            .with_seed(2);
        let field = DisintegrationField::from_image(&placeholder(40, 40), config).unwrap();
        let mut scene = DisintegrationScene::new(field, Container::new(600.0, 300.0));
        let tracker = PointerTracker::new(Rect::from_size(Vec2::splat(40.0)));

        scene.handle_input(
            &InputEvent::Scroll(Viewport {
                scroll_y: 0.0,
                height: 600.0,
            }),
            &tracker,
        );
        assert_eq!(scene.progress(), 0.0);

        scene.handle_input(
            &InputEvent::Scroll(Viewport {
                scroll_y: 150.0,
                height: 600.0,
            }),
            &tracker,
        );
        assert_eq!(scene.progress(), 0.5);

        let mut surface = DrawList::new(40, 40).unwrap();
        scene.frame(&mut surface, &ctx());
        assert!(!scene.field().is_empty());
        assert_eq!(surface.fills().count(), scene.field().len());
        assert!(scene
            .field()
            .particles()
            .iter()
            .all(|p| p.position != p.origin()));
    }

    #[test]
    fn test_reveal_scene() {
        let mut scene = RevealScene::new(Container::new(0.0, 600.0)).unwrap();
        let tracker = PointerTracker::new(Rect::from_size(Vec2::new(600.0, 600.0)));
        scene.handle_input(
            &InputEvent::Scroll(Viewport {
                scroll_y: 1200.0,
                height: 600.0,
            }),
            &tracker,
        );
        scene.handle_input(&InputEvent::Command(Command::PrevSlide), &tracker);
        assert_eq!(scene.carousel().active(), 3);

        let mut surface = DrawList::new(600, 600).unwrap();
        scene.frame(&mut surface, &ctx());
        let transforms = scene.engine().transforms();
        assert_eq!(transforms[0].opacity, 1.0);
        assert!((transforms[3].opacity - 0.9).abs() < 1e-5);
        // Four panels and four carousel cards.
        assert_eq!(surface.texts().count(), 8);
    }
}
