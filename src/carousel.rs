//! Product carousel slot transforms.
//!
//! Slides are laid out on a ring around the active one: the active slide
//! sits front and centre, its two neighbours are pushed back and to the
//! sides, and the rest wait further back.

/// Placement of one slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotTransform {
    /// Horizontal offset in percent of the slide width.
    pub translate_x: f32,
    /// Depth offset in pixels; negative is further away.
    pub translate_z: f32,
    pub opacity: f32,
    pub scale: f32,
    pub z_index: i32,
}

impl SlotTransform {
    const ACTIVE: SlotTransform = SlotTransform {
        translate_x: 0.0,
        translate_z: 0.0,
        opacity: 1.0,
        scale: 1.0,
        z_index: 10,
    };
}

/// Transform of slide `index` in a ring of `len` slides when `active` is in
/// front.
pub fn slot_transform(index: usize, active: usize, len: usize) -> SlotTransform {
    if len == 0 {
        return SlotTransform::ACTIVE;
    }
    let diff = (index % len + len - active % len) % len;

    if diff == 0 {
        return SlotTransform::ACTIVE;
    }

    if diff == 1 || diff == len - 1 {
        return SlotTransform {
            translate_x: if diff == 1 { 75.0 } else { -75.0 },
            translate_z: -100.0,
            opacity: 0.7,
            scale: 0.8,
            z_index: 5,
        };
    }

    SlotTransform {
        translate_x: if 2 * diff < len { 150.0 } else { -150.0 },
        translate_z: -200.0,
        opacity: 0.4,
        scale: 0.6,
        z_index: 1,
    }
}

/// Active-slide index over a fixed number of slides, wrapping at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    active: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, active: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.active = (self.active + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.active = (self.active + self.len - 1) % self.len;
        }
    }

    /// Jump to `index`. Returns `false` when it is out of range or already
    /// active.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len || index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    /// Transforms for every slide, in slide order.
    pub fn transforms(&self) -> Vec<SlotTransform> {
        (0..self.len)
            .map(|i| slot_transform(i, self.active, self.len))
            .collect()
    }
}
