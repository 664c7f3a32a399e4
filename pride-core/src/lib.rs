//! Board-agnostic logic for the wavy pride flag badge
//!
//! Everything here runs on the host as well as on the badge:
//!
//! - Flag variants and their palettes
//! - Wave offsets and the flag renderer
//! - Text, QR code and frame-rate overlays
//! - Button edge detection and the run/pause controller
//! - Ambient light to backlight mapping
//! - Configuration loading
//! - The application context tying it together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod app;
pub mod backlight;
pub mod clock;
pub mod config;
pub mod controller;
pub mod controls;
pub mod flag;
pub mod framebuffer;
pub mod overlay;
pub mod qr;
pub mod variant;
pub mod wave;

pub use app::{
    App,
    StartupError,
};
pub use config::{
    Config,
    ConfigError,
    ConfigSource,
};
pub use framebuffer::Framebuffer;
