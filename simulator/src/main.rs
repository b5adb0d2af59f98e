//! KLK clock face simulator for desktop.
//!
//! Runs the clock face against the local wall clock in an
//! embedded-graphics-simulator window. See [`keys`] for the controls.
//!
//! ```text
//! simulator [--mono | --round]
//! KLK_STORE_DIR=<dir>   where settings are persisted (default: temp dir)
//! ```

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod keys;
mod labels;
mod store;
mod timing;

use std::path::PathBuf;
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use chrono::{Datelike, Local, TimeDelta, Timelike};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use klk_common::colors::BLACK;
use klk_common::config::{RECT_COLOR, RECT_MONO, ROUND_COLOR};
use klk_common::overlay::draw_log_overlay;
use klk_common::{ClockFace, DisplayProfile, TimeFields};

use crate::keys::KeyAction;
use crate::labels::LabelAtlases;
use crate::store::FileStore;
use crate::timing::{FRAME_TIME, Playback};

/// Height of the log overlay strip at the bottom of the screen.
const OVERLAY_HEIGHT: u32 = 64;

fn main() {
    let profile = profile_from_args(std::env::args().skip(1));
    let store_dir = std::env::var_os("KLK_STORE_DIR")
        .map_or_else(|| std::env::temp_dir().join("klk-simulator"), PathBuf::from);
    let mut store = match FileStore::open(&store_dir) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("cannot open settings store {}: {err}", store_dir.display());
            return;
        }
    };

    println!("settings in {}", store.dir().display());

    let mut face = ClockFace::load(profile, &store, seed());
    let atlases = LabelAtlases::build(&profile);
    let atlas = atlases.atlas();

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(profile.canvas);
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("KLK Clock Face Sim", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    let overlay_area = Rectangle::new(
        Point::new(0, profile.height() - OVERLAY_HEIGHT as i32),
        Size::new(profile.canvas.width, OVERLAY_HEIGHT),
    );

    let mut minute_offset = 0i64;
    let mut shown = wall_time(minute_offset);
    face.start(shown);

    let mut playback: Option<Playback> = None;
    let mut show_overlay = false;
    let mut preset = 0usize;
    let mut printed_seq = 0u32;

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keys::action_for(keycode, face.settings(), &mut preset) {
                        Some(KeyAction::Apply(batch)) => {
                            face.apply_messages(&batch, &mut store);
                            if face.transition().is_running() {
                                playback = Some(Playback::start());
                            }
                        }
                        Some(KeyAction::ToggleOverlay) => {
                            show_overlay = !show_overlay;
                            face.request_redraw();
                        }
                        Some(KeyAction::AdvanceMinute) => minute_offset += 1,
                        Some(KeyAction::Replay) => {
                            face.restart_transition();
                            playback = Some(Playback::start());
                        }
                        Some(KeyAction::Quit) => return,
                        None => {}
                    }
                }
                _ => {}
            }
        }

        // Minute tick
        let now = wall_time(minute_offset);
        if now != shown {
            shown = now;
            face.on_tick(now);
            playback = Some(Playback::start());
        }

        if let Some(run) = playback {
            let t = Instant::now();
            face.advance(run.progress_at(t));
            if run.is_finished_at(t) {
                face.end_transition();
                playback = None;
            }
        }

        if face.needs_redraw() {
            face.draw(&mut display, &atlas);
        }
        if show_overlay {
            draw_log_overlay(&mut display, face.log(), overlay_area);
        }
        echo_log(&face, &mut printed_seq);

        window.update(&display);

        if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

/// Pick the display profile from the command line.
fn profile_from_args(args: impl Iterator<Item = String>) -> DisplayProfile {
    let mut profile = RECT_COLOR;
    for arg in args {
        match arg.as_str() {
            "--mono" => profile = RECT_MONO,
            "--round" => profile = ROUND_COLOR,
            "--color" => profile = RECT_COLOR,
            other => eprintln!("ignoring unknown argument {other}"),
        }
    }
    profile
}

/// Star placement seed, from the OS when available.
fn seed() -> u64 {
    getrandom::u64().unwrap_or_else(|_| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0x5EED, |d| d.as_nanos() as u64)
    })
}

/// Local wall-clock time, shifted by `minute_offset` minutes.
fn wall_time(minute_offset: i64) -> TimeFields {
    let now = Local::now() + TimeDelta::minutes(minute_offset);
    TimeFields::new(now.hour() as u8, now.minute() as u8, now.day() as u8, now.month0() as u8)
}

/// Print log entries newer than `printed_seq` to stdout.
fn echo_log(
    face: &ClockFace,
    printed_seq: &mut u32,
) {
    for entry in face.log().iter().filter(|e| e.seq >= *printed_seq) {
        println!("{} {}", entry.level.prefix(), entry.message);
    }
    *printed_seq = face.log().next_seq();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| (*s).to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_profile_from_args() {
        assert_eq!(profile_from_args(args(&[])), RECT_COLOR);
        assert_eq!(profile_from_args(args(&["--mono"])), RECT_MONO);
        assert_eq!(profile_from_args(args(&["--round", "--bogus"])), ROUND_COLOR);
    }

    #[test]
    fn test_wall_time_fields_in_range() {
        let t = wall_time(0);
        assert!(t.hour < 24);
        assert!(t.minute < 60);
        assert!((1..=31).contains(&t.day));
        assert!(t.month < 12);
    }
}
