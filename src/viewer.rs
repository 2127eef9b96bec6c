//! Windowed showcase.
//!
//! Opens a window split into four panels: the hero particle field with its
//! hologram overlay, the interactive demo, the image disintegration field
//! and the scroll-reveal section with the product carousel. The mouse wheel
//! scrolls a virtual page a few screens tall; its viewport drives the
//! scroll-linked effects.
//!
//! Controls: Space play/pause, `+`/`-` zoom, R reset, arrow keys switch
//! carousel slides, click a numbered marker to inspect it.

use std::sync::Arc;

use glam::Vec2;
use log::{info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::ViewerConfig;
use crate::disintegration::{placeholder, DisintegrationField};
use crate::driver::{RenderLoop, SceneId, StepOutcome};
use crate::error::ViewerError;
use crate::gpu::Presenter;
use crate::input::{InputEvent, InputMapper};
use crate::scenes::{DemoScene, DisintegrationScene, HeroScene, RevealScene};
use crate::scroll::{Container, PageScroll};
use crate::surface::{Canvas, Rect, Rgba, Surface};
use crate::time::Time;

const BACKGROUND: Rgba = Rgba::rgb(6, 6, 10);

/// Panel rectangles for a window of `size`: hero, demo, disintegration,
/// reveal, in reading order.
pub fn layout(size: Vec2) -> [Rect; 4] {
    let cell = (size * 0.5).floor().max(Vec2::ONE);
    [
        Rect::new(0.0, 0.0, cell.x, cell.y),
        Rect::new(cell.x, 0.0, cell.x, cell.y),
        Rect::new(0.0, cell.y, cell.x, cell.y),
        Rect::new(cell.x, cell.y, cell.x, cell.y),
    ]
}

/// Where the disintegration and reveal sections sit on the virtual page.
pub fn sections(viewport_height: f32) -> (Container, Container) {
    (
        Container::new(viewport_height, viewport_height),
        Container::new(viewport_height * 1.5, viewport_height),
    )
}

struct Panel {
    id: SceneId,
    slot: usize,
}

/// winit application hosting the render loop.
pub struct App {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    driver: RenderLoop<Canvas>,
    panels: Vec<Panel>,
    frame: Option<Canvas>,
    mapper: InputMapper,
    page: PageScroll,
    error: Option<ViewerError>,
}

impl App {
    pub fn new(config: ViewerConfig) -> Self {
        let height = config.height as f32;
        let page = PageScroll::new(height, height * config.page_screens);
        Self {
            config,
            window: None,
            presenter: None,
            driver: RenderLoop::new(Time::new()),
            panels: Vec::new(),
            frame: None,
            mapper: InputMapper::new(),
            page,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();
        let window_size = Vec2::new(size.width.max(1) as f32, size.height.max(1) as f32);

        let presenter = pollster::block_on(Presenter::new(window.clone()))?;
        self.frame = Some(
            Canvas::new(window_size.x as u32, window_size.y as u32)?.with_background(BACKGROUND),
        );
        self.page
            .set_viewport_height(window_size.y, window_size.y * self.config.page_screens);

        self.mount_scenes(window_size);
        self.driver.start();
        info!(
            "viewer started: {}x{}, {} scenes mounted",
            size.width,
            size.height,
            self.panels.len()
        );

        self.presenter = Some(presenter);
        self.window = Some(window);
        Ok(())
    }

    fn mount_scenes(&mut self, window_size: Vec2) {
        let cells = layout(window_size);
        let (disintegration_section, reveal_section) = sections(window_size.y);

        // A panel whose canvas cannot be created is skipped; the rest still run.
        let canvas = |rect: &Rect| Canvas::new(rect.size.x as u32, rect.size.y as u32);

        match HeroScene::new(cells[0].size, self.config.field.clone())
            .and_then(|scene| Ok((scene, canvas(&cells[0])?)))
        {
            Ok((scene, surface)) => {
                let id = self.driver.mount(Box::new(scene), surface, cells[0]);
                self.panels.push(Panel { id, slot: 0 });
            }
            Err(e) => warn!("hero panel disabled: {}", e),
        }

        match canvas(&cells[1]) {
            Ok(surface) => {
                let scene = DemoScene::new(cells[1].size, self.config.demo.clone());
                let id = self.driver.mount(Box::new(scene), surface, cells[1]);
                self.panels.push(Panel { id, slot: 1 });
            }
            Err(e) => warn!("demo panel disabled: {}", e),
        }

        match canvas(&cells[2]) {
            Ok(surface) => {
                let field = self.disintegration_field(cells[2].size);
                let scene = DisintegrationScene::new(field, disintegration_section);
                let id = self.driver.mount(Box::new(scene), surface, cells[2]);
                self.panels.push(Panel { id, slot: 2 });
            }
            Err(e) => warn!("disintegration panel disabled: {}", e),
        }

        match RevealScene::new(reveal_section) {
            Ok(scene) => match canvas(&cells[3]) {
                Ok(surface) => {
                    let id = self.driver.mount(Box::new(scene), surface, cells[3]);
                    self.panels.push(Panel { id, slot: 3 });
                }
                Err(e) => warn!("reveal panel disabled: {}", e),
            },
            Err(e) => warn!("reveal panel disabled: {}", e),
        }
    }

    fn disintegration_field(&self, cell: Vec2) -> DisintegrationField {
        let side = (cell.min_element() * 0.8).max(1.0) as u32;
        let config = self.config.disintegration.clone().with_canvas_size(side, side);

        match &self.config.image_path {
            Some(path) => DisintegrationField::load(path, config),
            None => DisintegrationField::from_image(&placeholder(side, side), config.clone())
                .unwrap_or_else(|e| {
                    warn!("placeholder sampling failed: {}", e);
                    DisintegrationField::new(config)
                }),
        }
    }

    fn resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(presenter) = &mut self.presenter {
            presenter.resize(width, height);
        }
        if let Some(frame) = &mut self.frame {
            if let Err(e) = frame.resize(width, height) {
                warn!("frame canvas not resized: {}", e);
            }
        }

        let window_size = Vec2::new(width as f32, height as f32);
        let cells = layout(window_size);
        let mut dropped = Vec::new();
        for panel in &self.panels {
            if self.driver.relayout(panel.id, cells[panel.slot]).is_err() {
                dropped.push(panel.id);
            }
        }
        self.panels.retain(|p| !dropped.contains(&p.id));

        self.page
            .set_viewport_height(window_size.y, window_size.y * self.config.page_screens);
        self.driver.dispatch(InputEvent::Scroll(self.page.viewport()));
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.driver.step() == StepOutcome::Cancelled {
            return;
        }

        let Some(frame) = &mut self.frame else {
            return;
        };
        frame.clear();
        for (_, surface, bounds) in self.driver.surfaces() {
            frame.blit(surface, bounds.origin);
        }

        if let Some(presenter) = &mut self.presenter {
            if !presenter.present_or_recover(frame) {
                warn!("GPU out of memory, closing viewer");
                self.shutdown(event_loop);
                return;
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.driver.teardown();
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::Resized(size) => self.resized(size.width, size.height),
            other => match self.mapper.map(&other) {
                Some(InputEvent::Wheel(delta)) => {
                    let viewport = self.page.scroll_by(delta);
                    self.driver.dispatch(InputEvent::Scroll(viewport));
                }
                Some(input) => {
                    self.driver.dispatch(input);
                }
                None => {}
            },
        }
    }
}

/// Open the showcase window and run until it is closed.
pub fn run(config: ViewerConfig) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
