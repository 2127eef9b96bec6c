//! Configuration for each effect.
//!
//! Every config is plain data with a [`Default`] matching the look of the
//! Glasscape site, plus `with_*` builder methods:
//!
//! ```ignore
//! let field = FieldConfig::default()
//!     .with_count(120)
//!     .with_seed(42);
//! ```

use std::path::PathBuf;

/// Settings for the mouse-reactive particle field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Number of particles created at initialization.
    pub count: usize,
    /// Pointer distance under which particles are pushed away.
    pub influence_radius: f32,
    /// Scale of the pointer repulsion impulse.
    pub repulsion: f32,
    /// Scale of the pull back toward each particle's home position.
    pub restoring: f32,
    /// Per-tick velocity multiplier.
    pub friction: f32,
    /// Pairs of particles closer than this are linked by a faint line.
    pub link_distance: f32,
    /// Seed for reproducible layouts. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 80,
            influence_radius: 150.0,
            repulsion: 0.02,
            restoring: 0.01,
            friction: 0.9,
            link_distance: 100.0,
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_influence_radius(mut self, radius: f32) -> Self {
        self.influence_radius = radius.max(0.0);
        self
    }

    /// Friction is kept in `0.0..=1.0`; anything above 1 would make the
    /// field diverge.
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction.clamp(0.0, 1.0);
        self
    }

    pub fn with_link_distance(mut self, distance: f32) -> Self {
        self.link_distance = distance.max(0.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// How the rendered size of a disintegration particle relates to the
/// dead zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeDecay {
    /// Size holds while progress is inside the dead zone and shrinks
    /// together with the explosion.
    #[default]
    Gated,
    /// Size shrinks with raw progress from 0, before particles move.
    Ungated,
}

/// Settings for the image disintegration field.
#[derive(Debug, Clone, PartialEq)]
pub struct DisintegrationConfig {
    /// Size of the canvas the source image is drawn into before sampling.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Grid stride in pixels between samples, on both axes.
    pub stride: u32,
    /// Samples with alpha below this are discarded.
    pub alpha_threshold: u8,
    /// Progress at or below which particles stay on their source pixel.
    pub dead_zone: f32,
    /// Range of each particle's explosion distance.
    pub min_distance: f32,
    pub max_distance: f32,
    /// Rendered radius before any decay.
    pub max_size: f32,
    pub size_decay: SizeDecay,
    pub seed: Option<u64>,
}

impl Default for DisintegrationConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600,
            canvas_height: 600,
            stride: 6,
            alpha_threshold: 128,
            dead_zone: 0.2,
            min_distance: 50.0,
            max_distance: 150.0,
            max_size: 3.0,
            size_decay: SizeDecay::Gated,
            seed: None,
        }
    }
}

impl DisintegrationConfig {
    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// A stride of 0 is bumped to 1.
    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride.max(1);
        self
    }

    pub fn with_size_decay(mut self, decay: SizeDecay) -> Self {
        self.size_decay = decay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Limits for the interactive hologram demo.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_step: f32,
    /// Degrees added per tick while playing.
    pub rotation_step: f32,
    /// Click distance (inclusive) that hits a hotspot marker.
    pub hit_radius: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.5,
            zoom_max: 1.5,
            zoom_step: 0.1,
            rotation_step: 0.5,
            hit_radius: 12.0,
        }
    }
}

/// Settings for the windowed showcase.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Height of the virtual page, in multiples of the window height.
    pub page_screens: f32,
    /// Source image for the disintegration panel. A generated placeholder
    /// is used when unset.
    pub image_path: Option<PathBuf>,
    pub field: FieldConfig,
    pub disintegration: DisintegrationConfig,
    pub demo: DemoConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Glasscape - Holographic Display".to_string(),
            width: 1280,
            height: 720,
            page_screens: 3.0,
            image_path: None,
            field: FieldConfig::default(),
            disintegration: DisintegrationConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn with_image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_defaults() {
        let config = FieldConfig::default();
        assert_eq!(config.count, 80);
        assert_eq!(config.influence_radius, 150.0);
        assert_eq!(config.friction, 0.9);
        assert_eq!(config.link_distance, 100.0);
    }

    #[test]
    fn test_builders_clamp() {
        let config = FieldConfig::default().with_friction(1.5).with_influence_radius(-3.0);
        assert_eq!(config.friction, 1.0);
        assert_eq!(config.influence_radius, 0.0);

        let config = DisintegrationConfig::default().with_stride(0);
        assert_eq!(config.stride, 1);
    }

    #[test]
    fn test_size_decay_defaults_to_gated() {
        assert_eq!(DisintegrationConfig::default().size_decay, SizeDecay::Gated);
    }
}
