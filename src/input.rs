//! Input handling.
//!
//! Raw winit window events are translated by [`InputMapper`] into
//! [`InputEvent`]s in window coordinates. The render loop then routes each
//! event to the scenes that listen for its [`EventKind`], converting pointer
//! coordinates into the scene's canvas-local frame with a [`PointerTracker`].
//!
//! Input handlers only record the latest known values (pointer position,
//! scroll progress, clicks). Physics always runs inside the frame callback.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::scroll::Viewport;
use crate::surface::Rect;

/// Pixels scrolled per wheel "line".
pub const LINE_SCROLL_PIXELS: f32 = 40.0;

/// Keyboard commands for the interactive demo and the product carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePlay,
    ZoomIn,
    ZoomOut,
    Reset,
    NextSlide,
    PrevSlide,
}

/// Category of an input event, used for listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    TouchMove,
    Click,
    Wheel,
    Scroll,
    Resize,
    Command,
}

/// A host input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    TouchMoved(Vec2),
    Click(Vec2),
    /// Raw wheel movement in pixels, positive scrolling down the page.
    Wheel(f32),
    /// The page viewport after a scroll.
    Scroll(Viewport),
    Resized(Vec2),
    Command(Command),
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::PointerMoved(_) => EventKind::PointerMove,
            InputEvent::TouchMoved(_) => EventKind::TouchMove,
            InputEvent::Click(_) => EventKind::Click,
            InputEvent::Wheel(_) => EventKind::Wheel,
            InputEvent::Scroll(_) => EventKind::Scroll,
            InputEvent::Resized(_) => EventKind::Resize,
            InputEvent::Command(_) => EventKind::Command,
        }
    }

    /// Window coordinates carried by pointer, touch and click events.
    pub fn position(&self) -> Option<Vec2> {
        match *self {
            InputEvent::PointerMoved(p) | InputEvent::TouchMoved(p) | InputEvent::Click(p) => {
                Some(p)
            }
            _ => None,
        }
    }

    /// Same event with its pointer coordinates mapped through `tracker`.
    /// Events without coordinates are returned unchanged.
    pub fn localized(self, tracker: &mut PointerTracker) -> Self {
        match self {
            InputEvent::PointerMoved(p) => InputEvent::PointerMoved(tracker.pointer_moved(p)),
            InputEvent::TouchMoved(p) => {
                InputEvent::TouchMoved(tracker.touch_moved(&[p]).unwrap_or(tracker.position()))
            }
            InputEvent::Click(p) => InputEvent::Click(tracker.to_local(p)),
            other => other,
        }
    }
}

/// Latest known pointer position in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
}

/// Maps pointer and touch input into one canvas's local frame.
///
/// The pointer starts at the centre of the canvas, matching a cursor that
/// has not moved yet.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    bounds: Rect,
    state: PointerState,
}

impl PointerTracker {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            state: PointerState {
                position: bounds.size * 0.5,
            },
        }
    }

    /// Update the canvas bounding rectangle after a layout change.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn to_local(&self, client: Vec2) -> Vec2 {
        self.bounds.to_local(client)
    }

    /// Record a pointer move given in window coordinates.
    pub fn pointer_moved(&mut self, client: Vec2) -> Vec2 {
        self.state.position = self.to_local(client);
        self.state.position
    }

    /// Record a touch move. Only the first touch point is tracked; an empty
    /// touch list leaves the pointer where it was.
    pub fn touch_moved(&mut self, touches: &[Vec2]) -> Option<Vec2> {
        let first = *touches.first()?;
        Some(self.pointer_moved(first))
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }
}

/// Translates winit window events into [`InputEvent`]s.
#[derive(Debug, Default)]
pub struct InputMapper {
    cursor: Vec2,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position seen, in window pixels.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn map(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                Some(InputEvent::PointerMoved(self.cursor))
            }

            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started | TouchPhase::Moved => Some(InputEvent::TouchMoved(Vec2::new(
                    touch.location.x as f32,
                    touch.location.y as f32,
                ))),
                _ => None,
            },

            // A click is a completed press, so it fires on release.
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => Some(InputEvent::Click(self.cursor)),

            WindowEvent::MouseWheel { delta, .. } => {
                let pixels = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_SCROLL_PIXELS,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                Some(InputEvent::Wheel(pixels))
            }

            WindowEvent::Resized(size) => Some(InputEvent::Resized(Vec2::new(
                size.width as f32,
                size.height as f32,
            ))),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return None;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                command_for_key(code).map(InputEvent::Command)
            }

            _ => None,
        }
    }
}

fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Space => Some(Command::TogglePlay),
        KeyCode::Equal | KeyCode::NumpadAdd => Some(Command::ZoomIn),
        KeyCode::Minus | KeyCode::NumpadSubtract => Some(Command::ZoomOut),
        KeyCode::KeyR => Some(Command::Reset),
        KeyCode::ArrowRight => Some(Command::NextSlide),
        KeyCode::ArrowLeft => Some(Command::PrevSlide),
        _ => None,
    }
}
