//! Demo Blueline panel
//!
//! Recreates the classic remote-LED demo: the app shows a power switch, a
//! brightness slider and a blink-speed slider, and the device blinks a
//! PWM-dimmed LED accordingly. No app-side programming is involved; the
//! panel ships its own layout.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod blinker;
pub mod pwm;

pub use blinker::BlinkPanel;
pub use pwm::PwmOutput;
