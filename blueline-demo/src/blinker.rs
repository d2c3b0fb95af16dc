//! App-controlled LED blinker.
//!
//! The panel exposes three controls: a power switch, a brightness slider
//! and a blink-speed slider. The host application owns the timer and calls
//! [`BlinkPanel::tick`] every [`BlinkPanel::blink_interval_ms`] to advance
//! the blink cycle.

use blueline_core::{ControlEvent, Panel, Responder};

use crate::pwm::PwmOutput;

// Control ids, matching the layout below.
const SWITCH_POWER: i32 = 1;
const SLIDER_BRIGHTNESS: i32 = 3;
const SLIDER_SPEED: i32 = 5;

/// Layout rendered by the app: a switch and two labelled sliders.
const LAYOUT: &str = concat!(
    "<layout orientation='portrait' name='Blueline Demo'>",
    "<switch id='1' size='20' width='parent' place='hcenter;top'>LED on/off</switch>",
    "<label id='2' size='20' place='left;below:1'>LED brightness</label>",
    "<slider id='3' width='parent' max='255' place='hcenter;below:2'/>",
    "<label id='4' size='20' place='left;below:3'>Blink speed</label>",
    "<slider id='5' width='parent' place='hcenter;below:4'/>",
    "</layout>"
);

/// Demo panel driving one PWM-dimmed LED.
pub struct BlinkPanel<P: PwmOutput> {
    pwm: P,
    on: bool,
    brightness: u8,
    /// Blink speed in percent, 0 (slow) to 100 (fast).
    speed: u8,
    /// Current half of the blink cycle (true = lit).
    lit: bool,
}

impl<P: PwmOutput> BlinkPanel<P> {
    /// Create the demo panel with its power-on defaults.
    pub fn new(pwm: P) -> Self {
        let mut panel = Self {
            pwm,
            on: true,
            brightness: 128,
            speed: 50,
            lit: true,
        };
        panel.apply();
        panel
    }

    /// Milliseconds between blink phase flips at the current speed.
    pub fn blink_interval_ms(&self) -> u32 {
        50 + 10 * (100 - u32::from(self.speed))
    }

    /// Advance the blink cycle by one half-period.
    pub fn tick(&mut self) {
        self.lit = !self.lit;
        self.apply();
    }

    /// Whether the LED is switched on.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Configured brightness.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Configured blink speed in percent.
    pub fn speed(&self) -> u8 {
        self.speed
    }

    fn set_on(&mut self, on: bool) {
        self.on = on;
        self.apply();
    }

    fn set_brightness(&mut self, value: u8) {
        self.brightness = value;
        self.apply();
    }

    fn set_speed(&mut self, value: u8) {
        self.speed = value.min(100);
    }

    fn apply(&mut self) {
        let duty = if self.on && self.lit { self.brightness } else { 0 };
        self.pwm.set_duty(duty);
    }
}

impl<P: PwmOutput> Panel for BlinkPanel<P> {
    fn layout(&self) -> &str {
        LAYOUT
    }

    fn state(&mut self, out: &mut Responder<'_>) {
        out.send(&ControlEvent::Switch {
            id: SWITCH_POWER,
            state: if self.on { "ON" } else { "OFF" },
        });
        out.send(&ControlEvent::Slider {
            id: SLIDER_BRIGHTNESS,
            value: i32::from(self.brightness),
        });
        out.send(&ControlEvent::Slider {
            id: SLIDER_SPEED,
            value: i32::from(self.speed),
        });
    }

    fn event(&mut self, event: &ControlEvent<'_>) {
        match *event {
            ControlEvent::Switch {
                id: SWITCH_POWER,
                state,
            } => self.set_on(state == "ON"),
            ControlEvent::Slider {
                id: SLIDER_BRIGHTNESS,
                value,
            } => self.set_brightness(value.clamp(0, 255) as u8),
            ControlEvent::Slider {
                id: SLIDER_SPEED,
                value,
            } => self.set_speed(value.clamp(0, 100) as u8),
            _ => {
                // labels carry no state; anything else is a layout mismatch
                #[cfg(feature = "defmt")]
                defmt::warn!("unhandled control update: {}", event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::vec::Vec as StdVec;

    use blueline_core::{Session, Transport};

    /// PWM output that records every duty written to it.
    struct MockPwm {
        duty: u8,
        history: StdVec<u8>,
    }

    impl MockPwm {
        fn new() -> Self {
            Self {
                duty: 0,
                history: StdVec::new(),
            }
        }
    }

    impl PwmOutput for MockPwm {
        fn set_duty(&mut self, duty: u8) {
            self.duty = duty;
            self.history.push(duty);
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: StdVec<u8>,
    }

    impl Transport for RecordingTransport {
        fn send(&mut self, bytes: &[u8]) {
            self.sent.extend_from_slice(bytes);
        }
    }

    fn demo_session() -> Session<RecordingTransport, BlinkPanel<MockPwm>> {
        Session::new(
            RecordingTransport::default(),
            BlinkPanel::new(MockPwm::new()),
        )
    }

    #[test]
    fn test_power_on_defaults() {
        let panel = BlinkPanel::new(MockPwm::new());
        assert!(panel.is_on());
        assert_eq!(panel.brightness(), 128);
        assert_eq!(panel.speed(), 50);
        assert_eq!(panel.pwm.duty, 128);
        assert_eq!(panel.blink_interval_ms(), 550);
    }

    #[test]
    fn test_tick_toggles_between_brightness_and_off() {
        let mut panel = BlinkPanel::new(MockPwm::new());
        panel.tick();
        assert_eq!(panel.pwm.duty, 0);
        panel.tick();
        assert_eq!(panel.pwm.duty, 128);
    }

    #[test]
    fn test_switched_off_led_stays_dark_across_ticks() {
        let mut panel = BlinkPanel::new(MockPwm::new());
        panel.event(&ControlEvent::Switch { id: 1, state: "OFF" });
        assert_eq!(panel.pwm.duty, 0);
        panel.tick();
        panel.tick();
        assert!(panel.pwm.history.iter().rev().take(3).all(|&d| d == 0));
    }

    #[test]
    fn test_speed_changes_blink_interval() {
        let mut panel = BlinkPanel::new(MockPwm::new());
        panel.event(&ControlEvent::Slider { id: 5, value: 100 });
        assert_eq!(panel.blink_interval_ms(), 50);
        panel.event(&ControlEvent::Slider { id: 5, value: 0 });
        assert_eq!(panel.blink_interval_ms(), 1050);
    }

    #[test]
    fn test_out_of_range_slider_values_are_clamped() {
        let mut panel = BlinkPanel::new(MockPwm::new());
        panel.event(&ControlEvent::Slider { id: 3, value: 400 });
        assert_eq!(panel.brightness(), 255);
        panel.event(&ControlEvent::Slider { id: 5, value: -7 });
        assert_eq!(panel.speed(), 0);
    }

    #[test]
    fn test_updates_for_unknown_controls_are_ignored() {
        let mut panel = BlinkPanel::new(MockPwm::new());
        panel.event(&ControlEvent::Slider { id: 9, value: 1 });
        panel.event(&ControlEvent::Joystick { id: 1, x: 2, y: 3 });
        assert_eq!(panel.brightness(), 128);
        assert_eq!(panel.speed(), 50);
    }

    #[test]
    fn test_state_query_reports_every_control() {
        let mut s = demo_session();
        s.rx(b"STATE\n");
        assert_eq!(
            s.transport().sent,
            b"SWITCH 1 ON:e0\nSLIDER 3 128:d1\nSLIDER 5 50:9d\n"
        );
    }

    #[test]
    fn test_app_slider_drives_the_led() {
        let mut s = demo_session();
        s.rx(b"SLIDER 3 200:c8\n");
        assert_eq!(s.panel().brightness(), 200);
        assert_eq!(s.panel().pwm.duty, 200);
    }

    #[test]
    fn test_corrupted_frame_leaves_the_led_alone() {
        let mut s = demo_session();
        s.rx(b"SLIDER 3 200:00\n");
        assert_eq!(s.panel().brightness(), 128);
        assert!(s.transport().sent.is_empty());
    }

    #[test]
    fn test_app_handshake() {
        let mut s = demo_session();
        // the app flushes with a bare terminator, then queries version
        s.rx(b"\nVERSION:26\n");
        assert_eq!(s.transport().sent, b"VERSION 1.0.0:33\n");
        // the app requests the layout once the version is accepted
        let mut s2 = demo_session();
        s2.rx(b"LAYOUT:de\n");
        assert!(s2.transport().sent.starts_with(b"LAYOUT <layout"));
        assert!(s2.transport().sent.ends_with(b"\n"));
    }
}
