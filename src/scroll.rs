//! Scroll-progress transform engine.
//!
//! Window scroll position is reduced to a normalized progress value per
//! tracked container, and every scroll-animated element inside the container
//! derives a translate/opacity transform from it:
//!
//! ```text
//! adjusted = clamp((progress - delay) * 1.5, 0, 1)
//! offset   = (1 - adjusted) * intensity      // along the element's axis
//! opacity  = adjusted
//! ```
//!
//! Elements with larger delays start later, which staggers the reveal.
//! The module also holds the two simpler scroll mappings used on the page:
//! hero parallax and section visibility.

use std::str::FromStr;

use glam::Vec2;

use crate::error::ParseDirectionError;

/// Speed-up applied to progress past an element's delay.
pub const STAGGER_RATE: f32 = 1.5;

/// Default parallax speed for hero layers.
pub const DEFAULT_PARALLAX_SPEED: f32 = 0.1;

/// The visible window onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Vertical scroll offset of the page.
    pub scroll_y: f32,
    /// Height of the visible area.
    pub height: f32,
}

/// Vertical placement of a tracked container on the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Container {
    /// Offset of the container's top edge from the top of the page.
    pub top: f32,
    pub height: f32,
}

impl Container {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

/// Fraction of the container's scroll span that has passed through the
/// viewport, in `[0, 1]`.
///
/// The span starts when the container's top edge enters at the bottom of the
/// viewport and ends when its bottom edge leaves at the top. Before the span
/// the result is 0 and after it 1.
pub fn container_progress(viewport: Viewport, container: Container) -> f32 {
    let start = container.top - viewport.height;
    let span = container.height + viewport.height;
    if span <= 0.0 {
        return if viewport.scroll_y >= container.top { 1.0 } else { 0.0 };
    }
    clamp_unit((viewport.scroll_y - start) / span)
}

/// Share of the container that is currently on screen, relative to the
/// container's own height. 0 when the container is off screen.
pub fn visible_fraction(viewport: Viewport, container: Container) -> f32 {
    if container.height <= 0.0 {
        return 0.0;
    }
    let top = container.top - viewport.scroll_y;
    let bottom = top + container.height;
    if top > viewport.height || bottom < 0.0 {
        return 0.0;
    }
    let visible = bottom.min(viewport.height) - top.max(0.0);
    clamp_unit(visible / container.height)
}

/// Vertical parallax offset for a layer moving at `speed` relative to the
/// page.
pub fn parallax_offset(scroll_y: f32, speed: f32) -> f32 {
    -scroll_y * speed
}

/// Progress past `delay`, sped up by [`STAGGER_RATE`] and clamped to
/// `[0, 1]`. NaN input maps to 0.
pub fn adjusted_progress(progress: f32, delay: f32) -> f32 {
    clamp_unit((progress - delay) * STAGGER_RATE)
}

// f32::max/min discard NaN, so NaN lands on 0.
fn clamp_unit(value: f32) -> f32 {
    value.max(0.0).min(1.0)
}

/// Direction an element travels while it is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Rises into place from below.
    #[default]
    Up,
    /// Drops into place from above.
    Down,
    /// Slides in from the right.
    Left,
    /// Slides in from the left.
    Right,
}

impl Direction {
    /// Translation for an element that still has `remaining` pixels to go.
    pub fn offset(self, remaining: f32) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, remaining),
            Direction::Down => Vec2::new(0.0, -remaining),
            Direction::Left => Vec2::new(remaining, 0.0),
            Direction::Right => Vec2::new(-remaining, 0.0),
        }
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError {
                input: s.to_string(),
            }),
        }
    }
}

/// Per-element reveal settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimated {
    pub direction: Direction,
    /// Distance in pixels the element travels.
    pub intensity: f32,
    /// Progress reserved before the element starts moving.
    pub delay: f32,
}

impl Default for ScrollAnimated {
    fn default() -> Self {
        Self {
            direction: Direction::Up,
            intensity: 100.0,
            delay: 0.0,
        }
    }
}

impl ScrollAnimated {
    pub fn new(direction: Direction, intensity: f32, delay: f32) -> Self {
        Self {
            direction,
            intensity,
            delay,
        }
    }

    /// Build from optional string attributes, falling back to the defaults
    /// for missing or unparsable numbers. An unknown direction is an error.
    pub fn from_attributes(
        direction: Option<&str>,
        intensity: Option<&str>,
        delay: Option<&str>,
    ) -> Result<Self, ParseDirectionError> {
        let defaults = Self::default();
        let direction = match direction {
            Some(d) => d.parse()?,
            None => defaults.direction,
        };
        let number = |v: Option<&str>, fallback: f32| {
            v.and_then(|s| s.trim().parse::<f32>().ok())
                .filter(|n| n.is_finite())
                .unwrap_or(fallback)
        };
        Ok(Self {
            direction,
            intensity: number(intensity, defaults.intensity),
            delay: number(delay, defaults.delay),
        })
    }

    pub fn transform(&self, progress: f32) -> ElementTransform {
        let adjusted = adjusted_progress(progress, self.delay);
        ElementTransform {
            translate: self.direction.offset((1.0 - adjusted) * self.intensity),
            opacity: adjusted,
        }
    }
}

/// Resolved transform for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementTransform {
    pub translate: Vec2,
    pub opacity: f32,
}

/// Tracks one container and the scroll-animated elements inside it.
///
/// [`ScrollEngine::on_scroll`] is the input handler: it only records the
/// new progress. [`ScrollEngine::update`] recomputes the element transforms
/// and runs once per frame.
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    container: Container,
    elements: Vec<ScrollAnimated>,
    transforms: Vec<ElementTransform>,
    progress: f32,
}

impl ScrollEngine {
    pub fn new(container: Container, elements: Vec<ScrollAnimated>) -> Self {
        let transforms = elements.iter().map(|e| e.transform(0.0)).collect();
        Self {
            container,
            elements,
            transforms,
            progress: 0.0,
        }
    }

    pub fn set_container(&mut self, container: Container) {
        self.container = container;
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn on_scroll(&mut self, viewport: Viewport) {
        self.progress = container_progress(viewport, self.container);
    }

    pub fn update(&mut self) {
        let progress = self.progress;
        self.transforms.clear();
        self.transforms
            .extend(self.elements.iter().map(|e| e.transform(progress)));
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn elements(&self) -> &[ScrollAnimated] {
        &self.elements
    }

    pub fn transforms(&self) -> &[ElementTransform] {
        &self.transforms
    }
}

/// A virtual page scrolled by the mouse wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageScroll {
    scroll_y: f32,
    viewport_height: f32,
    page_height: f32,
}

impl PageScroll {
    pub fn new(viewport_height: f32, page_height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            viewport_height,
            page_height,
        }
    }

    pub fn max_scroll(&self) -> f32 {
        (self.page_height - self.viewport_height).max(0.0)
    }

    /// Scroll by `delta` pixels, clamped to the page.
    pub fn scroll_by(&mut self, delta: f32) -> Viewport {
        if delta.is_finite() {
            self.scroll_y = (self.scroll_y + delta).clamp(0.0, self.max_scroll());
        }
        self.viewport()
    }

    pub fn set_viewport_height(&mut self, height: f32, page_height: f32) {
        self.viewport_height = height;
        self.page_height = page_height;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            scroll_y: self.scroll_y,
            height: self.viewport_height,
        }
    }
}
