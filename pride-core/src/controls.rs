//! Edge-triggered, debounced buttons.
//!
//! The render loop samples each button once per frame. A press is reported
//! exactly once, on the frame where the button goes down, and level changes
//! within [`DEBOUNCE_MS`] of the last accepted change are treated as bounce.

/// Lockout after an accepted level change.
pub const DEBOUNCE_MS: u64 = 20;

/// Press detector for one button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    down: bool,
    changed_at: Option<u64>,
}

impl Button {
    pub const fn new() -> Self {
        Self {
            down: false,
            changed_at: None,
        }
    }

    /// Feed the current level; returns `true` once per physical press.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> bool {
        if pressed == self.down {
            return false;
        }
        if let Some(at) = self.changed_at {
            if now_ms.saturating_sub(at) < DEBOUNCE_MS {
                return false;
            }
        }
        self.down = pressed;
        self.changed_at = Some(now_ms);
        pressed
    }
}

/// Raw button levels sampled this frame, `true` while held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLevels {
    pub run: bool,
    pub step: bool,
    pub next_flag: bool,
    pub prev_flag: bool,
    pub qr: bool,
    pub fps: bool,
}

/// Actions triggered this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Controls {
    pub toggle_run: bool,
    pub step: bool,
    pub next_flag: bool,
    pub prev_flag: bool,
    pub toggle_qr: bool,
    pub toggle_fps: bool,
}

/// Press detectors for every control.
#[derive(Debug, Clone, Default)]
pub struct ControlPad {
    run: Button,
    step: Button,
    next_flag: Button,
    prev_flag: Button,
    qr: Button,
    fps: Button,
}

impl ControlPad {
    pub const fn new() -> Self {
        Self {
            run: Button::new(),
            step: Button::new(),
            next_flag: Button::new(),
            prev_flag: Button::new(),
            qr: Button::new(),
            fps: Button::new(),
        }
    }

    pub fn poll(&mut self, levels: ButtonLevels, now_ms: u64) -> Controls {
        Controls {
            toggle_run: self.run.update(levels.run, now_ms),
            step: self.step.update(levels.step, now_ms),
            next_flag: self.next_flag.update(levels.next_flag, now_ms),
            prev_flag: self.prev_flag.update(levels.prev_flag, now_ms),
            toggle_qr: self.qr.update(levels.qr, now_ms),
            toggle_fps: self.fps.update(levels.fps, now_ms),
        }
    }
}
