//! Badge buttons used by the flag.
//!
//! All of them are active low with internal pull-ups. They are sampled once
//! per frame; press detection and debouncing happen in
//! [`pride_core::controls`].

use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};
use pride_core::controls::ButtonLevels;

use crate::ButtonResources;

/// The six buttons the flag reacts to.
pub struct Buttons {
    /// Next flag
    pub up: Input<'static>,
    /// Previous flag
    pub down: Input<'static>,
    /// Single step while paused
    pub right: Input<'static>,
    /// Run / pause
    pub a: Input<'static>,
    /// QR code overlay
    pub b: Input<'static>,
    /// Frame-rate overlay
    pub start: Input<'static>,
}

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            up: Input::new(res.up, pull_up),
            down: Input::new(res.down, pull_up),
            right: Input::new(res.right, pull_up),
            a: Input::new(res.a, pull_up),
            b: Input::new(res.b, pull_up),
            start: Input::new(res.start, pull_up),
        }
    }
}

impl Buttons {
    /// Current level of every control, `true` while held.
    pub fn levels(&self) -> ButtonLevels {
        ButtonLevels {
            run: self.a.is_low(),
            step: self.right.is_low(),
            next_flag: self.up.is_low(),
            prev_flag: self.down.is_low(),
            qr: self.b.is_low(),
            fps: self.start.is_low(),
        }
    }
}
