//! Error types for Glasscape.
//!
//! Surface acquisition, image loading, GPU presentation and the windowed
//! viewer each get their own error enum so a failure can be confined to the
//! component that hit it.

use std::fmt;

/// Errors raised when a drawing surface cannot be acquired.
///
/// A component that receives one of these skips its own initialization;
/// the rest of the page keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    /// The requested surface has no drawable area.
    ZeroSize { width: u32, height: u32 },
    /// The requested surface is larger than a single canvas may be.
    TooLarge { width: u32, height: u32 },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::ZeroSize { width, height } => {
                write!(f, "No drawing surface available for a {}x{} area", width, height)
            }
            SurfaceError::TooLarge { width, height } => {
                write!(f, "Drawing surface of {}x{} exceeds the canvas limit", width, height)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Errors that can occur while loading a source image for disintegration.
#[derive(Debug)]
pub enum ImageLoadError {
    /// The image could not be decoded.
    Decode(image::ImageError),
    /// The image file could not be read.
    Io(std::io::Error),
    /// The sampling canvas could not be created.
    Surface(SurfaceError),
}

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageLoadError::Decode(e) => write!(f, "Failed to decode image: {}", e),
            ImageLoadError::Io(e) => write!(f, "Failed to read image file: {}", e),
            ImageLoadError::Surface(e) => write!(f, "Failed to create sampling canvas: {}", e),
        }
    }
}

impl std::error::Error for ImageLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageLoadError::Decode(e) => Some(e),
            ImageLoadError::Io(e) => Some(e),
            ImageLoadError::Surface(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for ImageLoadError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => ImageLoadError::Io(io),
            other => ImageLoadError::Decode(other),
        }
    }
}

impl From<std::io::Error> for ImageLoadError {
    fn from(e: std::io::Error) -> Self {
        ImageLoadError::Io(e)
    }
}

impl From<SurfaceError> for ImageLoadError {
    fn from(e: SurfaceError) -> Self {
        ImageLoadError::Surface(e)
    }
}

/// Error returned when a scroll direction string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    pub input: String,
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown scroll direction '{}', expected one of up, down, left, right",
            self.input
        )
    }
}

impl std::error::Error for ParseDirectionError {}

/// Errors that can occur while setting up GPU presentation.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The window surface reports no usable texture format.
    NoSurfaceFormat,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::NoSurfaceFormat => write!(f, "Window surface exposes no texture format"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the windowed showcase.
#[derive(Debug)]
pub enum ViewerError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The frame canvas could not be created.
    Surface(SurfaceError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            ViewerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ViewerError::Gpu(e) => write!(f, "GPU error: {}", e),
            ViewerError::Surface(e) => write!(f, "Surface error: {}", e),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::EventLoop(e) => Some(e),
            ViewerError::Window(e) => Some(e),
            ViewerError::Gpu(e) => Some(e),
            ViewerError::Surface(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ViewerError {
    fn from(e: winit::error::OsError) -> Self {
        ViewerError::Window(e)
    }
}

impl From<GpuError> for ViewerError {
    fn from(e: GpuError) -> Self {
        ViewerError::Gpu(e)
    }
}

impl From<SurfaceError> for ViewerError {
    fn from(e: SurfaceError) -> Self {
        ViewerError::Surface(e)
    }
}
