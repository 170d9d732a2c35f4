//! Frame pacing
//!
//! The loop runs one game tick per frame, so capping the frame rate is
//! what sets the game speed.

use macroquad::prelude::get_time;

/// Spin instead of sleeping for the last bit of a frame (seconds)
const SPIN_MARGIN: f64 = 0.002;

/// Caps the loop at a target number of frames per second
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    frame_start: f64,
}

impl FramePacer {
    pub fn new() -> Self {
        Self { frame_start: get_time() }
    }

    /// Mark the start of a frame
    pub fn begin(&mut self) {
        self.frame_start = get_time();
    }

    /// Block until the frame has lasted `1 / fps` seconds. Returns the
    /// elapsed frame time in seconds.
    pub fn wait(&self, fps: u32) -> f64 {
        let Some(target) = frame_time(fps) else {
            return get_time() - self.frame_start;
        };

        // Native: use sleep for bulk, then spin-wait for precision
        #[cfg(not(target_arch = "wasm32"))]
        {
            while get_time() - self.frame_start + SPIN_MARGIN < target {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            while get_time() - self.frame_start < target {
                std::hint::spin_loop();
            }
        }
        // WASM: no thread::sleep available
        #[cfg(target_arch = "wasm32")]
        {
            while get_time() - self.frame_start < target {
                std::hint::spin_loop();
            }
        }

        get_time() - self.frame_start
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

/// Target frame time in seconds (None = unlimited)
pub fn frame_time(fps: u32) -> Option<f64> {
    if fps == 0 {
        None
    } else {
        Some(1.0 / fps as f64)
    }
}
