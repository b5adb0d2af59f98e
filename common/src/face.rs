//! Clock face controller.
//!
//! [`ClockFace`] is the single context object a host drives. It owns every
//! piece of mutable state: settings, resolved theme, the cached time, the
//! pending layout, the render surface, the star transition, the particle RNG,
//! and the log.
//!
//! # Host Contract
//!
//! ```text
//! start(now)                      once, shows the time immediately
//! on_tick(now)                    once per minute, restarts the transition
//! advance(progress) each frame    while the host animation runs (0.0..=1.0)
//! end_transition()                when the host animation finishes
//! apply_messages(batch, store)    when the companion app sends settings
//! draw(target, atlas)             whenever RenderCommands::redraw is set
//! ```
//!
//! A new layout is computed as soon as the time (or a setting) changes but is
//! held back until the transition reaches its refresh point, so the glyphs
//! change while the screen is covered in stars.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;
use rand_xoshiro::Xoroshiro128StarStar;
use rand_xoshiro::rand_core::SeedableRng;

use crate::animation::StarTransition;
use crate::atlas::GlyphAtlas;
use crate::colors::Theme;
use crate::config::DisplayProfile;
use crate::decompose::TimeFields;
use crate::layout::{LayoutResult, compute_layout};
use crate::log_buffer::LogBuffer;
use crate::message::{BatchReport, Message, apply_batch};
use crate::settings::{Settings, SettingsStore};
use crate::surface::RenderSurface;
use crate::{log_debug, log_error, log_info, log_warn};

/// What the host should do after an [`ClockFace::advance`] call.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RenderCommands {
    /// The face must be redrawn.
    pub redraw: bool,
    /// The pending layout was applied during this call.
    pub layout_applied: bool,
    /// Stars currently on screen.
    pub active_particles: usize,
}

/// The whole clock face.
pub struct ClockFace {
    profile: DisplayProfile,
    settings: Settings,
    theme: Theme,
    time: Option<TimeFields>,
    pending: LayoutResult,
    surface: RenderSurface,
    transition: StarTransition,
    rng: Xoroshiro128StarStar,
    log: LogBuffer,
}

impl ClockFace {
    /// Create a face with explicit settings. `seed` seeds the star placement.
    pub fn new(
        profile: DisplayProfile,
        settings: Settings,
        seed: u64,
    ) -> Self {
        let mut log = LogBuffer::new();
        log_info!(log, "face {}x{}", profile.canvas.width, profile.canvas.height);
        Self {
            theme: Theme::resolve(&settings.colors, profile.color_depth),
            profile,
            settings,
            time: None,
            pending: LayoutResult::default(),
            surface: RenderSurface::new(),
            transition: StarTransition::new(),
            rng: Xoroshiro128StarStar::seed_from_u64(seed),
            log,
        }
    }

    /// Create a face with settings read from `store`, falling back to the
    /// defaults when nothing usable is stored.
    pub fn load<S: SettingsStore + ?Sized>(
        profile: DisplayProfile,
        store: &S,
        seed: u64,
    ) -> Self {
        let (settings, problem) = match Settings::load(store) {
            Ok(settings) => (settings, None),
            Err(err) => (Settings::default(), Some(err)),
        };
        let mut face = Self::new(profile, settings, seed);
        if let Some(err) = problem {
            log_warn!(face.log, "settings reset: {}", err);
        }
        face
    }

    // =========================================================================
    // Time Source
    // =========================================================================

    /// Show `time` right away, without a transition.
    pub fn start(
        &mut self,
        time: TimeFields,
    ) {
        self.time = Some(time);
        self.recompute_pending();
        self.surface.apply_layout(&self.pending);
    }

    /// Minute tick.
    ///
    /// Always restarts the transition. A changed time additionally stages a
    /// new layout for the transition to apply. The first tick behaves like
    /// [`start`](Self::start).
    pub fn on_tick(
        &mut self,
        time: TimeFields,
    ) {
        let cached = self.time;
        match cached {
            None => {
                self.start(time);
                return;
            }
            Some(cached) if cached != time => {
                self.time = Some(time);
                self.recompute_pending();
                self.transition.request_layout_refresh();
                log_debug!(self.log, "tick {:02}:{:02}", time.hour, time.minute);
            }
            Some(_) => {}
        }
        self.transition.restart();
    }

    // =========================================================================
    // Transition
    // =========================================================================

    /// Advance the running transition to `progress` (0.0..=1.0).
    pub fn advance(
        &mut self,
        progress: f32,
    ) -> RenderCommands {
        let outcome = self.transition.update(progress, self.profile.canvas, &mut self.rng);

        if outcome.refresh_layout {
            self.surface.apply_layout(&self.pending);
        }
        if outcome.dropped > 0 {
            log_debug!(self.log, "pool full, {} spawn dropped", outcome.dropped);
        }
        if self.transition.take_dirty() {
            self.surface.mark_dirty();
        }

        RenderCommands {
            redraw: self.surface.is_dirty(),
            layout_applied: outcome.refresh_layout,
            active_particles: self.transition.pool().active_count(),
        }
    }

    /// Start the transition over from zero progress.
    pub fn restart_transition(&mut self) { self.transition.restart(); }

    /// The host animation finished or was cancelled.
    ///
    /// A layout still pending (the run ended before its refresh point) is
    /// applied now so the face never shows a stale time.
    pub fn end_transition(&mut self) {
        self.transition.teardown();
        self.transition.take_dirty();
        if self.transition.take_layout_refresh() {
            self.surface.apply_layout(&self.pending);
        }
        self.surface.mark_dirty();
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Apply a batch of remote settings and persist them.
    ///
    /// When anything was applied the theme is re-resolved, the layout is
    /// restaged, and the transition restarts so the change animates in.
    pub fn apply_messages<S: SettingsStore + ?Sized>(
        &mut self,
        batch: &[Message<'_>],
        store: &mut S,
    ) -> BatchReport {
        let report = apply_batch(&mut self.settings, batch, &mut self.log);
        if !report.changed() {
            return report;
        }

        self.theme = Theme::resolve(&self.settings.colors, self.profile.color_depth);
        if self.time.is_some() {
            self.recompute_pending();
            self.transition.request_layout_refresh();
        }
        self.transition.restart();
        self.surface.mark_dirty();

        match self.settings.save(store) {
            Ok(()) => log_info!(self.log, "saved {} settings", report.applied),
            Err(err) => log_error!(self.log, "save failed: {}", err),
        }
        report
    }

    fn recompute_pending(&mut self) {
        if let Some(time) = self.time {
            self.pending = compute_layout(&time, &self.settings.flags, &self.profile);
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Paint the face onto `target`.
    pub fn draw<D, A>(
        &mut self,
        target: &mut D,
        atlas: &A,
    ) where
        D: DrawTarget<Color = Rgb565>,
        A: GlyphAtlas,
    {
        self.surface.draw(target, atlas, &self.theme, self.transition.pool());
    }

    #[inline]
    pub const fn needs_redraw(&self) -> bool { self.surface.is_dirty() }

    /// Force a full repaint on the next [`draw`](Self::draw), e.g. after the
    /// host painted over the face.
    #[inline]
    pub fn request_redraw(&mut self) { self.surface.mark_dirty(); }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn profile(&self) -> &DisplayProfile { &self.profile }

    #[inline]
    pub const fn settings(&self) -> &Settings { &self.settings }

    #[inline]
    pub const fn theme(&self) -> &Theme { &self.theme }

    /// Last time delivered by the host.
    #[inline]
    pub const fn time(&self) -> Option<TimeFields> { self.time }

    /// Layout waiting to be applied (or already applied, if not stale).
    #[inline]
    pub const fn pending_layout(&self) -> &LayoutResult { &self.pending }

    #[inline]
    pub const fn surface(&self) -> &RenderSurface { &self.surface }

    #[inline]
    pub const fn transition(&self) -> &StarTransition { &self.transition }

    #[inline]
    pub const fn log(&self) -> &LogBuffer { &self.log }

    #[inline]
    pub fn log_mut(&mut self) -> &mut LogBuffer { &mut self.log }
}

// =============================================================================
// Unit Tests
// =============================================================================
