#![forbid(unsafe_code)]

//! Enter/exit transition phases and the phase → style lookup table.
//!
//! The phase source is a black box to the panel engine: it is told whether
//! the panel should be visible and reports which phase it is in. Phases only
//! drive opacity/scale multipliers; they never gate gesture logic.
//!
//! ```text
//! Exited ──set_visible(true)──▶ Entering ──enter elapsed──▶ Entered
//!    ▲                                                          │
//!    └────exit elapsed──── Exiting ◀──set_visible(false)────────┘
//! ```
//!
//! Rapid toggling can skip phases (Entering → Exiting directly).

use web_time::{Duration, Instant};

/// Enter duration used when none is configured.
pub const DEFAULT_ENTER_DURATION: Duration = Duration::from_millis(0);
/// Exit duration used when none is configured.
pub const DEFAULT_EXIT_DURATION: Duration = Duration::from_millis(200);

/// Visibility phase of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionPhase {
    Entering,
    Entered,
    Exiting,
    Exited,
    /// Never shown, or removed after exiting.
    #[default]
    Unmounted,
}

impl TransitionPhase {
    /// Panel content is rendered while entering, entered, or exiting.
    #[inline]
    pub const fn is_rendered(self) -> bool {
        matches!(self, Self::Entering | Self::Entered | Self::Exiting)
    }

    /// Opacity/scale multipliers for this phase, `None` when hidden.
    #[inline]
    pub const fn style(self) -> Option<PhaseStyle> {
        match self {
            Self::Entering | Self::Exiting => Some(PhaseStyle::TRANSITIONING),
            Self::Entered => Some(PhaseStyle::SETTLED),
            Self::Exited | Self::Unmounted => None,
        }
    }
}

/// Multipliers applied to a rendered panel and its backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseStyle {
    pub panel_opacity: f64,
    pub panel_scale: f64,
    pub backdrop_opacity: f64,
}

impl PhaseStyle {
    /// Entering/exiting: shrunken, translucent, backdrop faded out.
    pub const TRANSITIONING: Self = Self {
        panel_opacity: 0.6,
        panel_scale: 0.8,
        backdrop_opacity: 0.0,
    };

    /// Fully entered.
    pub const SETTLED: Self = Self {
        panel_opacity: 1.0,
        panel_scale: 1.0,
        backdrop_opacity: 1.0,
    };
}

/// Enter/exit durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    pub enter: Duration,
    pub exit: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            enter: DEFAULT_ENTER_DURATION,
            exit: DEFAULT_EXIT_DURATION,
        }
    }
}

/// Consumed interface of an external transition-phase producer.
pub trait TransitionSource {
    /// Current phase.
    fn phase(&self) -> TransitionPhase;

    /// Request the panel to become visible or hidden.
    fn set_visible(&mut self, visible: bool, now: Instant);

    /// Advance time; returns the new phase if it changed.
    fn poll(&mut self, now: Instant) -> Option<TransitionPhase>;
}

/// Timer-driven [`TransitionSource`].
#[derive(Debug, Clone)]
pub struct TimedTransition {
    timings: TransitionTimings,
    phase: TransitionPhase,
    phase_started: Option<Instant>,
}

impl TimedTransition {
    /// Create a source. An initially visible panel starts settled, without
    /// an appear animation.
    #[must_use]
    pub fn new(timings: TransitionTimings, visible: bool) -> Self {
        Self {
            timings,
            phase: if visible {
                TransitionPhase::Entered
            } else {
                TransitionPhase::Unmounted
            },
            phase_started: None,
        }
    }

    #[inline]
    pub fn timings(&self) -> TransitionTimings {
        self.timings
    }

    fn enter_phase(&mut self, phase: TransitionPhase, now: Instant) {
        self.phase = phase;
        self.phase_started = Some(now);
    }
}

impl TransitionSource for TimedTransition {
    fn phase(&self) -> TransitionPhase {
        self.phase
    }

    fn set_visible(&mut self, visible: bool, now: Instant) {
        match (visible, self.phase) {
            (
                true,
                TransitionPhase::Exiting | TransitionPhase::Exited | TransitionPhase::Unmounted,
            ) => self.enter_phase(TransitionPhase::Entering, now),
            (false, TransitionPhase::Entering | TransitionPhase::Entered) => {
                self.enter_phase(TransitionPhase::Exiting, now);
            }
            _ => {}
        }
    }

    fn poll(&mut self, now: Instant) -> Option<TransitionPhase> {
        let started = self.phase_started?;
        let elapsed = now.saturating_duration_since(started);
        let next = match self.phase {
            TransitionPhase::Entering if elapsed >= self.timings.enter => TransitionPhase::Entered,
            TransitionPhase::Exiting if elapsed >= self.timings.exit => TransitionPhase::Exited,
            _ => return None,
        };
        self.enter_phase(next, now);
        Some(next)
    }
}
