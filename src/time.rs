//! Frame timing.
//!
//! The hologram renderers are pure functions of a timestamp in seconds. In
//! the viewer that timestamp comes from the wall clock; in tests it comes
//! from a manual clock that advances by a fixed step per frame, so frames
//! can be single-stepped deterministically.
//!
//! # Example
//!
//! ```ignore
//! use glasscape::time::Time;
//!
//! let mut time = Time::manual(1.0 / 60.0);
//! time.update();
//! assert_eq!(time.frame(), 1);
//! ```

use std::time::Instant;

#[derive(Debug)]
enum ClockSource {
    Wall {
        start: Instant,
        last_frame: Instant,
    },
    Manual {
        step: f32,
    },
}

/// Time tracking for the render loop.
#[derive(Debug)]
pub struct Time {
    source: ClockSource,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
}

impl Time {
    /// Wall-clock timer starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self::with_source(ClockSource::Wall {
            start: now,
            last_frame: now,
        })
    }

    /// Timer that advances by exactly `step` seconds per update.
    pub fn manual(step: f32) -> Self {
        Self::with_source(ClockSource::Manual { step: step.max(0.0) })
    }

    fn with_source(source: ClockSource) -> Self {
        Self {
            source,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
        }
    }

    /// Advance one frame. Returns `(elapsed, delta)` in seconds.
    pub fn update(&mut self) -> (f32, f32) {
        match &mut self.source {
            ClockSource::Wall { start, last_frame } => {
                let now = Instant::now();
                self.delta_secs = now.duration_since(*last_frame).as_secs_f32();
                *last_frame = now;
                self.elapsed_secs = now.duration_since(*start).as_secs_f32();
            }
            ClockSource::Manual { step } => {
                self.delta_secs = *step;
                self.elapsed_secs += *step;
            }
        }

        self.frame_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    /// Seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames advanced so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
