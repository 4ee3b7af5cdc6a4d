pub mod generate;

use crate::color::{generate_random_color, Swatch, SwatchId};

pub use generate::generate_palette;

/// Counts offered by the count control.
pub const ALLOWED_SIZES: [usize; 5] = [3, 4, 5, 6, 8];
pub const DEFAULT_SIZE: usize = 5;

/// The live, ordered set of swatches being edited.
#[derive(Debug, Clone)]
pub struct PaletteState {
    swatches: Vec<Swatch>,
    requested_size: usize,
}

impl Default for PaletteState {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteState {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_SIZE)
    }

    pub fn with_size(size: usize) -> Self {
        Self {
            swatches: generate_palette(size),
            requested_size: size,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_values(values: &[&str]) -> Self {
        Self {
            swatches: values.iter().map(|v| Swatch::new(*v)).collect(),
            requested_size: values.len(),
        }
    }

    /// Replace everything with `size` fresh swatches. Locks are dropped.
    pub fn generate_new(&mut self, size: usize) {
        self.swatches = generate_palette(size);
    }

    /// New color for every unlocked swatch; ids, order and locked entries stay.
    pub fn regenerate_unlocked(&mut self) {
        for swatch in self.swatches.iter_mut().filter(|s| !s.locked) {
            swatch.value = generate_random_color();
        }
    }

    /// Flip the lock of `id`. Unknown ids are ignored.
    pub fn toggle_lock(&mut self, id: SwatchId) {
        if let Some(swatch) = self.swatches.iter_mut().find(|s| s.id == id) {
            swatch.locked = !swatch.locked;
        }
    }

    /// Change the count control.
    ///
    /// When the palette length differs from `size` the whole palette is
    /// regenerated, so every lock is lost. Equal length leaves it untouched.
    pub fn set_requested_size(&mut self, size: usize) {
        self.requested_size = size;
        if self.swatches.len() != size {
            self.generate_new(size);
        }
    }

    pub fn requested_size(&self) -> usize {
        self.requested_size
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn get(&self, index: usize) -> Option<&Swatch> {
        self.swatches.get(index)
    }

    /// Color values in palette order.
    pub fn values(&self) -> Vec<String> {
        self.swatches.iter().map(|s| s.value.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn locked_count(&self) -> usize {
        self.swatches.iter().filter(|s| s.locked).count()
    }
}

/// Next allowed count after `size`, wrapping around.
pub fn next_size(size: usize) -> usize {
    match ALLOWED_SIZES.iter().position(|&s| s == size) {
        Some(i) => ALLOWED_SIZES[(i + 1) % ALLOWED_SIZES.len()],
        None => DEFAULT_SIZE,
    }
}

/// Previous allowed count before `size`, wrapping around.
pub fn prev_size(size: usize) -> usize {
    match ALLOWED_SIZES.iter().position(|&s| s == size) {
        Some(0) => ALLOWED_SIZES[ALLOWED_SIZES.len() - 1],
        Some(i) => ALLOWED_SIZES[i - 1],
        None => DEFAULT_SIZE,
    }
}
