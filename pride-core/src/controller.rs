//! Animation mode and button handling.
//!
//! The animation is either running or paused. While running, the tick
//! follows wall-clock time; while paused it only moves when stepped by hand.

use crate::{
    controls::Controls,
    wave::TICK_PERIOD,
};

/// Ticks added by one manual step, one nominal frame.
pub const FRAME_TICKS: f32 = 33.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Running,
    Paused,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Running => Mode::Paused,
            Mode::Paused => Mode::Running,
        }
    }
}

/// Animation clock.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationState {
    pub tick: f32,
    pub mode: Mode,
}

impl AnimationState {
    pub const fn new() -> Self {
        Self {
            tick: 0.0,
            mode: Mode::Running,
        }
    }

    /// Move the tick forward, wrapping at the wave period so it keeps its
    /// precision however long the badge runs.
    pub fn advance(&mut self, ticks: f32) {
        self.tick = (self.tick + ticks) % TICK_PERIOD;
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

/// What changed in response to this frame's controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Changes {
    pub mode: bool,
    pub flag: bool,
}

/// Mode state machine plus the overlay and flag selection it drives.
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    pub animation: AnimationState,
    pub flag_index: usize,
    pub show_qr: bool,
    pub show_fps: bool,
    flag_count: usize,
}

impl Controller {
    pub fn new(flag_index: usize, flag_count: usize) -> Self {
        let flag_count = flag_count.max(1);
        Self {
            animation: AnimationState::new(),
            flag_index: flag_index % flag_count,
            show_qr: false,
            show_fps: false,
            flag_count,
        }
    }

    pub fn mode(&self) -> Mode {
        self.animation.mode
    }

    pub fn tick(&self) -> f32 {
        self.animation.tick
    }

    /// Apply this frame's controls, then advance the animation by
    /// `elapsed_ms` if it is running.
    pub fn apply(&mut self, controls: &Controls, elapsed_ms: u32) -> Changes {
        let mut changes = Changes::default();

        if controls.toggle_run {
            self.animation.mode = self.animation.mode.toggled();
            changes.mode = true;
        }
        if controls.next_flag {
            self.next_flag();
            changes.flag = true;
        }
        if controls.prev_flag {
            self.prev_flag();
            changes.flag = true;
        }
        if controls.toggle_qr {
            self.show_qr = !self.show_qr;
        }
        if controls.toggle_fps {
            self.show_fps = !self.show_fps;
        }

        match self.animation.mode {
            Mode::Running => self.animation.advance(elapsed_ms as f32),
            Mode::Paused if controls.step => self.animation.advance(FRAME_TICKS),
            Mode::Paused => {}
        }
        changes
    }

    pub fn next_flag(&mut self) {
        self.flag_index = if self.flag_index + 1 >= self.flag_count {
            0
        } else {
            self.flag_index + 1
        };
    }

    pub fn prev_flag(&mut self) {
        self.flag_index = if self.flag_index == 0 {
            self.flag_count - 1
        } else {
            self.flag_index - 1
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::{
        COLS,
        fill_offsets,
    };

    fn press(f: impl FnOnce(&mut Controls)) -> Controls {
        let mut controls = Controls::default();
        f(&mut controls);
        controls
    }

    #[test]
    fn test_toggle_run_pause() {
        let mut controller = Controller::new(0, 2);
        assert_eq!(controller.mode(), Mode::Running);

        let changes = controller.apply(&press(|c| c.toggle_run = true), 0);
        assert!(changes.mode);
        assert_eq!(controller.mode(), Mode::Paused);

        controller.apply(&press(|c| c.toggle_run = true), 0);
        assert_eq!(controller.mode(), Mode::Running);
    }

    #[test]
    fn test_tick_only_advances_while_running() {
        let mut controller = Controller::new(0, 2);
        controller.apply(&Controls::default(), 40);
        assert_eq!(controller.tick(), 40.0);

        controller.apply(&press(|c| c.toggle_run = true), 40);
        assert_eq!(controller.tick(), 40.0);
        controller.apply(&Controls::default(), 500);
        assert_eq!(controller.tick(), 40.0);
    }

    #[test]
    fn test_step_while_paused() {
        let mut controller = Controller::new(0, 2);
        controller.apply(&press(|c| c.toggle_run = true), 0);

        controller.apply(&press(|c| c.step = true), 500);
        assert_eq!(controller.tick(), FRAME_TICKS);
        assert_eq!(controller.mode(), Mode::Paused);

        controller.apply(&press(|c| c.step = true), 500);
        assert_eq!(controller.tick(), 2.0 * FRAME_TICKS);
    }

    #[test]
    fn test_step_ignored_while_running() {
        let mut controller = Controller::new(0, 2);
        controller.apply(&press(|c| c.step = true), 10);
        assert_eq!(controller.tick(), 10.0);
    }

    #[test]
    fn test_flag_cycling_wraps() {
        let mut controller = Controller::new(1, 2);
        let changes = controller.apply(&press(|c| c.next_flag = true), 0);
        assert!(changes.flag);
        assert_eq!(controller.flag_index, 0);

        controller.apply(&press(|c| c.prev_flag = true), 0);
        assert_eq!(controller.flag_index, 1);

        controller.prev_flag();
        assert_eq!(controller.flag_index, 0);
        controller.prev_flag();
        assert_eq!(controller.flag_index, 1);
    }

    #[test]
    fn test_overlay_toggles() {
        let mut controller = Controller::new(0, 3);
        controller.apply(&press(|c| c.toggle_qr = true), 0);
        assert!(controller.show_qr);
        assert!(!controller.show_fps);
        controller.apply(&press(|c| c.toggle_fps = true), 0);
        assert!(controller.show_fps);
        controller.apply(&press(|c| c.toggle_qr = true), 0);
        assert!(!controller.show_qr);
    }

    #[test]
    fn test_out_of_range_index() {
        let controller = Controller::new(5, 3);
        assert_eq!(controller.flag_index, 2);
    }

    #[test]
    fn test_tick_wraps_at_period() {
        let mut animation = AnimationState::new();
        animation.advance(TICK_PERIOD - 1.0);
        animation.advance(3.0);
        assert!((animation.tick - 2.0).abs() < 1e-2);
    }

    #[test]
    fn test_wrap_keeps_wave_within_a_pixel() {
        let mut controller = Controller::new(0, 2);
        let mut elapsed = 0.0f32;
        let mut wrapped = [0i32; COLS + 1];
        let mut unwrapped = [0i32; COLS + 1];
        for _ in 0..400 {
            controller.apply(&Controls::default(), 33);
            elapsed += 33.0;
            fill_offsets(controller.tick(), &mut wrapped);
            fill_offsets(elapsed, &mut unwrapped);
            for (a, b) in wrapped.iter().zip(unwrapped.iter()) {
                assert!((a - b).abs() <= 1);
            }
        }
        assert!(controller.tick() < TICK_PERIOD);
    }
}
