//! Gamepad support
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: No gamepad; every query reports nothing pressed

// Standard gamepad button indices (matches Web Gamepad API standard mapping)
pub mod button {
    pub const A: u32 = 0;           // South
    pub const START: u32 = 9;
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

// ============================================================================
// WASM Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_button_down(&self, _button: u32) -> bool {
            false
        }

        pub fn pressed_mask(&mut self) -> u32 {
            0
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use gilrs::{Button as GilrsButton, Gilrs};

    pub struct Gamepad {
        /// None when gilrs could not start (no gamepad support on this machine)
        gilrs: Option<Gilrs>,
        last_buttons: u32,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => Some(gilrs),
                Err(e) => {
                    log::warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self { gilrs, last_buttons: 0 }
        }

        pub fn poll(&mut self) {
            let Some(gilrs) = self.gilrs.as_mut() else { return };
            // Process gilrs events to update internal state
            while let Some(event) = gilrs.next_event() {
                if let gilrs::EventType::Connected = event.event {
                    log::info!("Gamepad connected: {}", gilrs.gamepad(event.id).name());
                }
            }
        }

        pub fn has_gamepad(&self) -> bool {
            self.gilrs.as_ref().is_some_and(|g| g.gamepads().next().is_some())
        }

        fn button_mask(&self) -> u32 {
            let Some(gp) = self.gilrs.as_ref().and_then(|g| g.gamepads().next().map(|(_, gp)| gp)) else {
                return 0;
            };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << super::button::A; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << super::button::START; }
            if gp.is_pressed(GilrsButton::DPadUp) { mask |= 1 << super::button::DPAD_UP; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << super::button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << super::button::DPAD_RIGHT; }

            mask
        }

        pub fn is_button_down(&self, button: u32) -> bool {
            (self.button_mask() & (1 << button)) != 0
        }

        /// Buttons that went down since the last call
        pub fn pressed_mask(&mut self) -> u32 {
            let current = self.button_mask();
            let pressed = super::rising_edges(self.last_buttons, current);
            self.last_buttons = current;
            pressed
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Bits set in `current` but not in `last`
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn rising_edges(last: u32, current: u32) -> u32 {
    current & !last
}

// Re-export the platform-specific implementation
pub use platform::Gamepad;
