//! Render loop driver.
//!
//! A [`RenderLoop`] owns a set of mounted [`Scene`]s, each with its own
//! exclusively owned drawing surface and pointer tracker. The host calls
//! [`RenderLoop::step`] once per display refresh; every step advances the
//! clock, clears each surface and lets each scene update and draw itself.
//! There is no fixed timestep and no frame skipping.
//!
//! The loop runs while its [`FrameHandle`] is live. Cancelling the handle,
//! or calling [`RenderLoop::teardown`], stops it; teardown also removes every
//! registered input listener so nothing keeps reacting after the view is
//! gone. Because `step` is an ordinary call, tests single-step frames
//! deterministically with a manual clock.
//!
//! # Example
//!
//! ```ignore
//! let mut driver = RenderLoop::new(Time::manual(1.0 / 60.0));
//! let id = driver.mount(Box::new(scene), DrawList::new(800, 600)?, bounds);
//! let handle = driver.start();
//! driver.step();
//! handle.cancel();
//! assert_eq!(driver.step(), StepOutcome::Cancelled);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use log::{debug, info, warn};

use crate::error::SurfaceError;
use crate::input::{EventKind, InputEvent, PointerTracker};
use crate::surface::{Rect, Surface};
use crate::time::Time;

/// Timing of the frame being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the loop started.
    pub time: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    pub frame: u64,
}

/// An animated component bound to one surface.
///
/// Input handlers only record state. All simulation happens in
/// [`frame`](Scene::frame).
pub trait Scene {
    fn name(&self) -> &str;

    /// Input kinds this scene wants delivered.
    fn listens(&self) -> &[EventKind];

    /// Record an input event. Pointer coordinates are canvas-local.
    fn handle_input(&mut self, event: &InputEvent, pointer: &PointerTracker);

    /// Update and draw one frame. The surface has already been cleared.
    fn frame(&mut self, surface: &mut dyn Surface, ctx: &FrameContext);

    /// React to a new canvas size.
    fn resize(&mut self, size: Vec2) -> Result<(), SurfaceError> {
        let _ = size;
        Ok(())
    }
}

/// Cancellable handle to a running render loop.
#[derive(Debug, Clone, Default)]
pub struct FrameHandle {
    cancelled: Rc<Cell<bool>>,
}

impl FrameHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop requesting frames. The next [`RenderLoop::step`] does nothing.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Result of a single [`RenderLoop::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A frame was drawn; the next one should be requested.
    Rendered,
    /// The loop is not running.
    Cancelled,
}

/// Identifies a mounted scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(usize);

/// Identifies one registered input listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy)]
struct Listener {
    id: ListenerId,
    scene: SceneId,
    kind: EventKind,
}

struct Mount<S> {
    scene: Box<dyn Scene>,
    surface: S,
    tracker: PointerTracker,
}

/// Owns mounted scenes and drives them frame by frame.
pub struct RenderLoop<S: Surface> {
    mounts: Vec<Option<Mount<S>>>,
    listeners: Vec<Listener>,
    next_listener: u64,
    time: Time,
    handle: Option<FrameHandle>,
}

impl<S: Surface> RenderLoop<S> {
    pub fn new(time: Time) -> Self {
        Self {
            mounts: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
            time,
            handle: None,
        }
    }

    /// Mount `scene` on `surface`, placed at `bounds` in window coordinates,
    /// and register its input listeners.
    pub fn mount(&mut self, scene: Box<dyn Scene>, surface: S, bounds: Rect) -> SceneId {
        let id = SceneId(self.mounts.len());
        for &kind in scene.listens() {
            self.listen(id, kind);
        }
        debug!("mounted scene '{}' at {:?}", scene.name(), bounds);
        self.mounts.push(Some(Mount {
            scene,
            surface,
            tracker: PointerTracker::new(bounds),
        }));
        id
    }

    /// Remove a scene and its listeners, handing back its surface.
    pub fn unmount(&mut self, id: SceneId) -> Option<(Box<dyn Scene>, S)> {
        let mount = self.mounts.get_mut(id.0)?.take()?;
        self.listeners.retain(|l| l.scene != id);
        debug!("unmounted scene '{}'", mount.scene.name());
        Some((mount.scene, mount.surface))
    }

    fn listen(&mut self, scene: SceneId, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener { id, scene, kind });
        id
    }

    /// Listeners registered for `scene`.
    pub fn listeners_of(&self, scene: SceneId) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|l| l.scene == scene)
            .map(|l| l.id)
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Start the loop, returning its handle. Restarting replaces (and
    /// cancels) any previous handle.
    pub fn start(&mut self) -> FrameHandle {
        if let Some(old) = self.handle.take() {
            old.cancel();
        }
        let handle = FrameHandle::new();
        self.handle = Some(handle.clone());
        handle
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_cancelled())
    }

    /// Deliver an input event to every scene listening for its kind.
    /// Pointer, touch and click events only reach scenes whose canvas
    /// contains them. Returns the number of scenes it reached.
    pub fn dispatch(&mut self, event: InputEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<SceneId> = self
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| l.scene)
            .collect();

        let mut delivered = 0;
        for id in targets {
            let Some(Some(mount)) = self.mounts.get_mut(id.0) else {
                continue;
            };
            if event
                .position()
                .is_some_and(|p| !mount.tracker.bounds().contains(p))
            {
                continue;
            }
            let local = event.localized(&mut mount.tracker);
            mount.scene.handle_input(&local, &mount.tracker);
            delivered += 1;
        }
        delivered
    }

    /// Move and resize a scene's canvas.
    ///
    /// If the new size cannot back a surface the scene is unmounted and the
    /// error returned; other scenes are unaffected.
    pub fn relayout(&mut self, id: SceneId, bounds: Rect) -> Result<(), SurfaceError> {
        let Some(Some(mount)) = self.mounts.get_mut(id.0) else {
            return Ok(());
        };
        let resized = mount
            .surface
            .resize(bounds.size.x as u32, bounds.size.y as u32)
            .and_then(|()| mount.scene.resize(bounds.size));

        match resized {
            Ok(()) => {
                mount.tracker.set_bounds(bounds);
                Ok(())
            }
            Err(e) => {
                warn!("scene '{}' dropped after resize: {}", mount.scene.name(), e);
                self.unmount(id);
                Err(e)
            }
        }
    }

    /// Draw one frame of every mounted scene.
    pub fn step(&mut self) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Cancelled;
        }

        let (time, delta) = self.time.update();
        let ctx = FrameContext {
            time,
            delta,
            frame: self.time.frame(),
        };

        for mount in self.mounts.iter_mut().flatten() {
            mount.surface.clear();
            mount.scene.frame(&mut mount.surface, &ctx);
        }
        StepOutcome::Rendered
    }

    /// Stop the loop and remove every listener. Scenes stay mounted so
    /// their last frame can still be read.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
        let removed = self.listeners.len();
        self.listeners.clear();
        info!("render loop torn down, {} listeners removed", removed);
    }

    /// Mounted scenes with their surfaces and window placement.
    pub fn surfaces(&self) -> impl Iterator<Item = (SceneId, &S, Rect)> {
        self.mounts.iter().enumerate().filter_map(|(i, m)| {
            m.as_ref()
                .map(|m| (SceneId(i), &m.surface, m.tracker.bounds()))
        })
    }

    pub fn scene(&self, id: SceneId) -> Option<&dyn Scene> {
        self.mounts
            .get(id.0)?
            .as_ref()
            .map(|m| m.scene.as_ref())
    }

    pub fn surface(&self, id: SceneId) -> Option<&S> {
        self.mounts.get(id.0)?.as_ref().map(|m| &m.surface)
    }

    pub fn pointer(&self, id: SceneId) -> Option<Vec2> {
        self.mounts
            .get(id.0)?
            .as_ref()
            .map(|m| m.tracker.position())
    }

    pub fn time(&self) -> &Time {
        &self.time
    }
}
