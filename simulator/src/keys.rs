//! Keyboard controls.
//!
//! Setting keys are translated into the same key/value messages the companion
//! app would send, so they travel the full decode, apply, and persist path.
//!
//! ```text
//! H  hour24        A  showAmPm      N  lunarMonth    P  datePrefix
//! F  formalDigits  D  showDate      M  showMonth     U  datePosition
//! C  color preset  G  unknown key   K  bad color
//! O  log overlay   T  next minute   R  replay        Esc quit
//! ```

use embedded_graphics_simulator::sdl2::Keycode;
use heapless::Vec;
use klk_common::config::DatePosition;
use klk_common::{Message, Settings};

/// Largest batch one key produces.
pub const MAX_BATCH: usize = 4;

/// Color presets cycled by `C`: background, particle, time, date.
const PRESETS: [[&str; 4]; 4] = [
    ["#000000", "#FFFFFF", "#FFFFFF", "#FFFFFF"],
    ["#000055", "#FFFF00", "#FFFFFF", "#00AAFF"],
    ["0x550000", "0xFFAA00", "0xFFFFAA", "0xFF5555"],
    ["#FFFFFF", "#000000", "#000000", "#555555"],
];

const COLOR_KEYS: [&str; 4] = ["backgroundColor", "particleColor", "timeColor", "dateColor"];

/// What a key press asks the simulator to do.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    Apply(Vec<Message<'static>, MAX_BATCH>),
    ToggleOverlay,
    AdvanceMinute,
    Replay,
    Quit,
}

/// Map a key press to an action. `preset` is the color preset cursor.
pub fn action_for(
    keycode: Keycode,
    settings: &Settings,
    preset: &mut usize,
) -> Option<KeyAction> {
    let flags = &settings.flags;
    let single = |key: &'static str, on: bool| {
        let mut batch = Vec::new();
        batch.push(Message::int(key, i32::from(on))).ok();
        Some(KeyAction::Apply(batch))
    };

    match keycode {
        Keycode::H => single("hour24", !flags.hour_24),
        Keycode::A => single("showAmPm", !flags.show_am_pm),
        Keycode::N => single("lunarMonth", !flags.lunar_month),
        Keycode::P => single("datePrefix", !flags.date_prefix),
        Keycode::F => single("formalDigits", !flags.formal_digits),
        Keycode::D => single("showDate", !flags.show_date),
        Keycode::M => single("showMonth", !flags.show_month),
        Keycode::U => single("datePosition", flags.date_position == DatePosition::Below),
        Keycode::G => single("vibrate", true),
        Keycode::K => {
            let mut batch = Vec::new();
            batch.push(Message::text("timeColor", "#12345")).ok();
            Some(KeyAction::Apply(batch))
        }
        Keycode::C => {
            *preset = (*preset + 1) % PRESETS.len();
            let batch = COLOR_KEYS
                .iter()
                .zip(PRESETS[*preset])
                .map(|(&key, value)| Message::text(key, value))
                .collect();
            Some(KeyAction::Apply(batch))
        }
        Keycode::O => Some(KeyAction::ToggleOverlay),
        Keycode::T => Some(KeyAction::AdvanceMinute),
        Keycode::R => Some(KeyAction::Replay),
        Keycode::Escape => Some(KeyAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use klk_common::MessageValue;

    use super::*;

    fn batch(action: Option<KeyAction>) -> Vec<Message<'static>, MAX_BATCH> {
        match action {
            Some(KeyAction::Apply(batch)) => batch,
            other => panic!("expected a batch, got {other:?}"),
        }
    }

    #[test]
    fn test_toggle_sends_inverse_of_current_flag() {
        let mut preset = 0;
        let mut settings = Settings::default();
        let off = batch(action_for(Keycode::D, &settings, &mut preset));
        assert_eq!(off[0], Message::int("showDate", 1));

        settings.flags.show_date = true;
        let on = batch(action_for(Keycode::D, &settings, &mut preset));
        assert_eq!(on[0].value, MessageValue::Int(0));
    }

    #[test]
    fn test_date_position_flips() {
        let mut preset = 0;
        let settings = Settings::default();
        let msg = batch(action_for(Keycode::U, &settings, &mut preset));
        assert_eq!(msg[0], Message::int("datePosition", 1));
    }

    #[test]
    fn test_color_preset_cycles() {
        let mut preset = 0;
        let settings = Settings::default();
        let first = batch(action_for(Keycode::C, &settings, &mut preset));
        assert_eq!(first.len(), 4);
        assert_eq!(first[0], Message::text("backgroundColor", "#000055"));
        for _ in 0..3 {
            action_for(Keycode::C, &settings, &mut preset);
        }
        assert_eq!(preset, 1, "wraps after the last preset");
    }

    #[test]
    fn test_control_keys() {
        let mut preset = 0;
        let settings = Settings::default();
        assert_eq!(action_for(Keycode::Escape, &settings, &mut preset), Some(KeyAction::Quit));
        assert_eq!(action_for(Keycode::O, &settings, &mut preset), Some(KeyAction::ToggleOverlay));
        assert_eq!(action_for(Keycode::Z, &settings, &mut preset), None);
    }
}
