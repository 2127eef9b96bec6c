//! # Glasscape - holographic display effects
//!
//! The canvas animation core behind the Glasscape product pages: a
//! mouse-reactive particle field, a procedural hologram overlay, an
//! interactive product demo, an image that disintegrates into particles as
//! it scrolls into view, and scroll-driven reveal transforms.
//!
//! Every effect draws through the [`Surface`] trait, so the same code runs
//! against the software [`Canvas`] used by the viewer and the recording
//! [`DrawList`] used in tests.
//!
//! ## Quick Start
//!
//! ```ignore
//! use glasscape::prelude::*;
//!
//! let mut field = ParticleField::initialize(800.0, 600.0, 80)?;
//! let hologram = HologramRenderer::default();
//! let mut canvas = Canvas::new(800, 600)?;
//!
//! let pointer = Vec2::new(400.0, 300.0);
//! canvas.clear();
//! field.frame(pointer, &mut canvas);
//! hologram.render(&mut canvas, 0.0);
//! ```
//!
//! ## Core Concepts
//!
//! ### Effects
//!
//! - [`ParticleField`]: anchored particles pushed away by the pointer and
//!   sprung back home, joined by faint links.
//! - [`HologramRenderer`]: a rotating wireframe cube with glow and scan
//!   lines, a pure function of time.
//! - [`DemoState`]: the interactive demo with play/pause, zoom, rotation and
//!   clickable hotspots.
//! - [`DisintegrationField`]: particles sampled from an image, scattered by
//!   scroll progress.
//! - [`ScrollEngine`]: staggered translate/opacity reveals from a
//!   container's scroll progress.
//!
//! ### Driving frames
//!
//! Effects are wrapped in [`Scene`]s and mounted on a [`RenderLoop`], which
//! owns one surface per scene, routes input to the scenes that listen for it
//! and draws every scene once per [`RenderLoop::step`]. The loop stops when
//! its [`FrameHandle`] is cancelled or [`RenderLoop::teardown`] is called.
//!
//! ### Input
//!
//! Input handlers only record the latest pointer position, scroll viewport
//! or click. All physics runs inside the frame, in a fixed order.
//!
//! ## Viewer
//!
//! [`viewer::run`] opens a window showing every effect, presented with wgpu.

pub mod carousel;
pub mod config;
pub mod demo;
pub mod disintegration;
pub mod driver;
pub mod error;
pub mod gpu;
pub mod hologram;
pub mod input;
pub mod particle_field;
pub mod scenes;
pub mod scroll;
mod spawn;
pub mod surface;
pub mod time;
pub mod viewer;

pub use carousel::{slot_transform, Carousel, SlotTransform};
pub use config::{DemoConfig, DisintegrationConfig, FieldConfig, SizeDecay, ViewerConfig};
pub use demo::{DemoState, Hotspot, HOTSPOTS};
pub use disintegration::{DisintegrationField, ImageParticle};
pub use driver::{FrameContext, FrameHandle, RenderLoop, Scene, StepOutcome};
pub use error::{GpuError, ImageLoadError, ParseDirectionError, SurfaceError, ViewerError};
pub use glam::Vec2;
pub use hologram::HologramRenderer;
pub use input::{Command, EventKind, InputEvent, PointerTracker};
pub use particle_field::{Particle, ParticleField};
pub use scroll::{Direction, ScrollAnimated, ScrollEngine, Viewport};
pub use spawn::SpawnContext;
pub use surface::{Canvas, DrawList, Rgba, Surface};
pub use time::Time;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use glasscape::prelude::*;
/// ```
pub mod prelude {
    pub use crate::carousel::Carousel;
    pub use crate::config::{DemoConfig, DisintegrationConfig, FieldConfig, SizeDecay, ViewerConfig};
    pub use crate::demo::DemoState;
    pub use crate::disintegration::DisintegrationField;
    pub use crate::driver::{FrameContext, FrameHandle, RenderLoop, Scene, StepOutcome};
    pub use crate::hologram::HologramRenderer;
    pub use crate::input::{Command, EventKind, InputEvent, PointerTracker};
    pub use crate::particle_field::ParticleField;
    pub use crate::scroll::{Container, Direction, ScrollAnimated, ScrollEngine, Viewport};
    pub use crate::surface::{Canvas, DrawList, Rect, Rgba, Surface};
    pub use crate::time::Time;
    pub use crate::Vec2;
}
