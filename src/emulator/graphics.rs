//! The monochrome 64x32 framebuffer.
//!
//! The framebuffer only tracks cell state; presenting it on an actual
//! screen is the frontend's job.

/// Width of the screen in pixels.
pub const SCREEN_WIDTH: usize = 64;

/// Height of the screen in pixels.
pub const SCREEN_HEIGHT: usize = 32;

/// The pixel grid, stored as one flat row-major array of 0/1 cells.
pub struct Graphics {
    pixels: [u8; SCREEN_WIDTH * SCREEN_HEIGHT],
}

impl Graphics {
    pub fn new() -> Graphics {
        Graphics {
            pixels: [0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.pixels = [0; SCREEN_WIDTH * SCREEN_HEIGHT];
    }

    /// Flip the pixel at `(x, y)` and report whether it was on beforehand.
    ///
    /// Coordinates wrap around the screen edges, so any `usize` is a valid
    /// input no matter how far past the edge it points.
    pub fn set_pixel(&mut self, x: usize, y: usize) -> bool {
        let x = x % SCREEN_WIDTH;
        let y = y % SCREEN_HEIGHT;
        let cell = &mut self.pixels[y * SCREEN_WIDTH + x];
        let collision = *cell == 1;
        *cell ^= 1;
        collision
    }

    /// The pixel at `(x, y)`, with the same wrap-around as [`set_pixel`].
    ///
    /// [`set_pixel`]: Graphics::set_pixel
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[(y % SCREEN_HEIGHT) * SCREEN_WIDTH + (x % SCREEN_WIDTH)]
    }

    /// A read-only view of the whole buffer for presentation.
    pub fn snapshot(&self) -> &[u8] {
        &self.pixels
    }
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn set_pixel_turns_a_pixel_on_without_collision() {
        let mut graphics = Graphics::new();
        assert!(!graphics.set_pixel(3, 4));
        assert_eq!(graphics.pixel(3, 4), 1);
    }

    #[test]
    fn setting_a_pixel_twice_restores_it_and_collides() {
        let mut graphics = Graphics::new();
        assert!(!graphics.set_pixel(10, 20));
        assert!(graphics.set_pixel(10, 20));
        assert_eq!(graphics.pixel(10, 20), 0);
    }

    #[test]
    fn coordinates_wrap_around_the_edges() {
        let mut graphics = Graphics::new();
        graphics.set_pixel(SCREEN_WIDTH, 0);
        assert_eq!(graphics.pixel(0, 0), 1);

        graphics.set_pixel(5, SCREEN_HEIGHT);
        assert_eq!(graphics.pixel(5, 0), 1);

        // More than one screen past the edge still wraps
        graphics.set_pixel(2 * SCREEN_WIDTH + 7, 3 * SCREEN_HEIGHT + 9);
        assert_eq!(graphics.pixel(7, 9), 1);
    }

    #[test]
    fn clear_turns_everything_off() {
        let mut graphics = Graphics::new();
        graphics.set_pixel(0, 0);
        graphics.set_pixel(63, 31);
        graphics.clear();
        assert!(graphics.snapshot().iter().all(|cell| *cell == 0));
    }

    #[test]
    fn snapshot_is_row_major() {
        let mut graphics = Graphics::new();
        graphics.set_pixel(1, 2);
        assert_eq!(graphics.snapshot()[2 * SCREEN_WIDTH + 1], 1);
    }
}
