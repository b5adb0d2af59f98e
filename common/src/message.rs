//! Remote configuration messages.
//!
//! The companion app sends settings as a batch of key/value pairs. Values are
//! either integers or short strings:
//!
//! | key               | value                                  |
//! |-------------------|----------------------------------------|
//! | `backgroundColor` | hex text `#RRGGBB` / `0xRRGGBB`, or int |
//! | `particleColor`   | same                                   |
//! | `timeColor`       | same                                   |
//! | `dateColor`       | same                                   |
//! | `hour24`          | 0 / 1                                  |
//! | `showAmPm`        | 0 / 1                                  |
//! | `lunarMonth`      | 0 / 1                                  |
//! | `datePrefix`      | 0 / 1                                  |
//! | `formalDigits`    | 0 / 1                                  |
//! | `showDate`        | 0 / 1                                  |
//! | `showMonth`       | 0 / 1                                  |
//! | `datePosition`    | 0 = below, 1 = above                   |
//!
//! Decoding never fails the batch: bad colors become black, unknown keys are
//! logged and skipped.

use thiserror::Error;

use crate::colors::HEX_BLACK;
use crate::config::DatePosition;
use crate::log_buffer::LogBuffer;
use crate::settings::Settings;
use crate::{log_debug, log_warn};

/// Value half of a message pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageValue<'a> {
    Int(i32),
    Text(&'a str),
}

/// One key/value pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Message<'a> {
    pub key: &'a str,
    pub value: MessageValue<'a>,
}

impl<'a> Message<'a> {
    pub const fn int(
        key: &'a str,
        value: i32,
    ) -> Self {
        Self {
            key,
            value: MessageValue::Int(value),
        }
    }

    pub const fn text(
        key: &'a str,
        value: &'a str,
    ) -> Self {
        Self {
            key,
            value: MessageValue::Text(value),
        }
    }
}

/// Settings field addressed by a message key.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageKey {
    BackgroundColor,
    ParticleColor,
    TimeColor,
    DateColor,
    Hour24,
    ShowAmPm,
    LunarMonth,
    DatePrefix,
    FormalDigits,
    ShowDate,
    ShowMonth,
    DatePosition,
}

impl MessageKey {
    /// Every key with its wire name.
    pub const ALL: [(&'static str, Self); 12] = [
        ("backgroundColor", Self::BackgroundColor),
        ("particleColor", Self::ParticleColor),
        ("timeColor", Self::TimeColor),
        ("dateColor", Self::DateColor),
        ("hour24", Self::Hour24),
        ("showAmPm", Self::ShowAmPm),
        ("lunarMonth", Self::LunarMonth),
        ("datePrefix", Self::DatePrefix),
        ("formalDigits", Self::FormalDigits),
        ("showDate", Self::ShowDate),
        ("showMonth", Self::ShowMonth),
        ("datePosition", Self::DatePosition),
    ];

    /// Look up a wire name. Matching is exact.
    pub fn parse(key: &str) -> Result<Self, MessageError> {
        Self::ALL
            .iter()
            .find(|(name, _)| *name == key)
            .map(|&(_, k)| k)
            .ok_or(MessageError::UnknownKey)
    }

    /// Wire name of this key.
    pub fn name(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(_, k)| *k == self)
            .map_or("", |&(name, _)| name)
    }

    const fn is_color(self) -> bool {
        matches!(
            self,
            Self::BackgroundColor | Self::ParticleColor | Self::TimeColor | Self::DateColor
        )
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Why a color string could not be parsed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum ColorParseError {
    #[error("missing '#' or '0x' prefix")]
    MissingPrefix,
    #[error("expected 6 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digit")]
    InvalidDigit,
}

/// Why a single message was not applied as sent.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum MessageError {
    #[error("unknown key")]
    UnknownKey,
    #[error("bad color: {0}")]
    Color(#[from] ColorParseError),
}

// =============================================================================
// Decoding
// =============================================================================

/// Parse `#RRGGBB` or `0xRRGGBB` (prefix case-insensitive) into `0xRRGGBB`.
pub fn parse_hex_color(text: &str) -> Result<u32, ColorParseError> {
    let text = text.trim();
    let digits = text
        .strip_prefix('#')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))
        .ok_or(ColorParseError::MissingPrefix)?;
    if digits.len() != 6 {
        return Err(ColorParseError::BadLength(digits.len()));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidDigit);
    }
    u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::InvalidDigit)
}

/// Integer view of a flag value. Text that is not a number reads as 0.
fn int_value(value: MessageValue<'_>) -> i32 {
    match value {
        MessageValue::Int(v) => v,
        MessageValue::Text(text) => text.trim().parse().unwrap_or(0),
    }
}

/// Color view of a value. Integers are taken as `0xRRGGBB` verbatim.
fn color_value(value: MessageValue<'_>) -> Result<u32, ColorParseError> {
    match value {
        MessageValue::Int(v) => Ok(v as u32 & 0xFF_FFFF),
        MessageValue::Text(text) => parse_hex_color(text),
    }
}

/// Store one value into `settings`.
///
/// A malformed color still writes black; the error is returned so the caller
/// can log it.
pub fn apply_value(
    settings: &mut Settings,
    key: MessageKey,
    value: MessageValue<'_>,
) -> Result<(), MessageError> {
    if key.is_color() {
        let (color, result) = match color_value(value) {
            Ok(color) => (color, Ok(())),
            Err(err) => (HEX_BLACK, Err(MessageError::Color(err))),
        };
        let colors = &mut settings.colors;
        match key {
            MessageKey::BackgroundColor => colors.background = color,
            MessageKey::ParticleColor => colors.particle = color,
            MessageKey::TimeColor => colors.time = color,
            _ => colors.date = color,
        }
        return result;
    }

    let raw = int_value(value);
    let on = raw != 0;
    let flags = &mut settings.flags;
    match key {
        MessageKey::Hour24 => flags.hour_24 = on,
        MessageKey::ShowAmPm => flags.show_am_pm = on,
        MessageKey::LunarMonth => flags.lunar_month = on,
        MessageKey::DatePrefix => flags.date_prefix = on,
        MessageKey::FormalDigits => flags.formal_digits = on,
        MessageKey::ShowDate => flags.show_date = on,
        MessageKey::ShowMonth => flags.show_month = on,
        MessageKey::DatePosition => flags.date_position = DatePosition::from_u8(u8::try_from(raw).unwrap_or(0)),
        _ => {}
    }
    Ok(())
}

/// Summary of one decoded batch.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BatchReport {
    /// Messages written into the settings (including colors that fell back to black).
    pub applied: u8,
    /// Messages skipped because of an unknown key.
    pub ignored: u8,
}

impl BatchReport {
    /// Whether anything in the settings may have changed.
    #[inline]
    pub const fn changed(&self) -> bool { self.applied > 0 }
}

/// Decode `batch` into `settings`, logging every problem to `log`.
pub fn apply_batch(
    settings: &mut Settings,
    batch: &[Message<'_>],
    log: &mut LogBuffer,
) -> BatchReport {
    let mut report = BatchReport::default();
    for message in batch {
        let key = match MessageKey::parse(message.key) {
            Ok(key) => key,
            Err(_) => {
                log_warn!(log, "unknown key {}", message.key);
                report.ignored = report.ignored.saturating_add(1);
                continue;
            }
        };
        if let Err(err) = apply_value(settings, key, message.value) {
            log_warn!(log, "{}: {}", key.name(), err);
        } else {
            log_debug!(log, "set {}", key.name());
        }
        report.applied = report.applied.saturating_add(1);
    }
    report
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_buffer::LogLevel;

    #[test]
    fn test_parse_hex_both_prefixes() {
        assert_eq!(parse_hex_color("#FF8000"), Ok(0xFF_8000));
        assert_eq!(parse_hex_color("0xff8000"), Ok(0xFF_8000));
        assert_eq!(parse_hex_color("0X00aa55"), Ok(0x00_AA55));
    }

    #[test]
    fn test_parse_hex_malformed() {
        assert_eq!(parse_hex_color("FF8000"), Err(ColorParseError::MissingPrefix));
        assert_eq!(parse_hex_color("#FFF"), Err(ColorParseError::BadLength(3)));
        assert_eq!(parse_hex_color("#GG0000"), Err(ColorParseError::InvalidDigit));
        assert_eq!(parse_hex_color("#+12345"), Err(ColorParseError::InvalidDigit));
        assert_eq!(parse_hex_color(""), Err(ColorParseError::MissingPrefix));
    }

    #[test]
    fn test_key_names_round_trip() {
        for (name, key) in MessageKey::ALL {
            assert_eq!(MessageKey::parse(name), Ok(key));
            assert_eq!(key.name(), name);
        }
        assert_eq!(MessageKey::parse("HOUR24"), Err(MessageError::UnknownKey));
    }

    #[test]
    fn test_batch_applies_flags_and_colors() {
        let mut settings = Settings::default();
        let mut log = LogBuffer::new();
        let batch = [
            Message::int("hour24", 0),
            Message::int("showAmPm", 1),
            Message::int("datePosition", 1),
            Message::text("timeColor", "#00FF00"),
            Message::int("particleColor", 0x12_3456),
        ];
        let report = apply_batch(&mut settings, &batch, &mut log);

        assert_eq!(report, BatchReport { applied: 5, ignored: 0 });
        assert!(!settings.flags.hour_24);
        assert!(settings.flags.show_am_pm);
        assert_eq!(settings.flags.date_position, DatePosition::Above);
        assert_eq!(settings.colors.time, 0x00_FF00);
        assert_eq!(settings.colors.particle, 0x12_3456);
    }

    #[test]
    fn test_malformed_color_resolves_to_black() {
        let mut settings = Settings::default();
        let mut log = LogBuffer::new();
        let report = apply_batch(&mut settings, &[Message::text("dateColor", "white")], &mut log);
        assert!(report.changed());
        assert_eq!(settings.colors.date, HEX_BLACK);
        assert_eq!(log.last().map(|e| e.level), Some(LogLevel::Warn));
    }

    #[test]
    fn test_unknown_key_ignored_and_logged() {
        let mut settings = Settings::default();
        let mut log = LogBuffer::new();
        let report = apply_batch(&mut settings, &[Message::int("vibrate", 1)], &mut log);
        assert_eq!(report, BatchReport { applied: 0, ignored: 1 });
        assert!(!report.changed());
        assert_eq!(settings, Settings::default(), "unknown keys must not touch settings");
        assert_eq!(log.last().unwrap().message.as_str(), "unknown key vibrate");
    }

    #[test]
    fn test_text_flag_values() {
        let mut settings = Settings::default();
        let mut log = LogBuffer::new();
        apply_batch(
            &mut settings,
            &[Message::text("showDate", "1"), Message::text("showMonth", "yes")],
            &mut log,
        );
        assert!(settings.flags.show_date);
        assert!(!settings.flags.show_month, "non-numeric text reads as 0");
    }

    #[test]
    fn test_out_of_range_date_position_is_below() {
        let mut settings = Settings::default();
        let mut log = LogBuffer::new();
        apply_batch(&mut settings, &[Message::int("datePosition", 1)], &mut log);
        apply_batch(&mut settings, &[Message::int("datePosition", -3)], &mut log);
        assert_eq!(settings.flags.date_position, DatePosition::Below);
    }
}
