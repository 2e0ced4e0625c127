//! Timing rules for the loading overlay, kept free of DOM access.

/// Принудительное скрытие оверлея
pub const MAX_OVERLAY_MS: u32 = 10_000;
pub const FADE_OUT_MS: u32 = 500;
pub const RESOURCE_CHECK_DELAY_MS: u32 = 100;
pub const DEFAULT_MIN_DISPLAY_MS: f64 = 1_000.0;

/// What is known about the connection.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionProfile {
    /// `navigator.connection.effectiveType`
    EffectiveType(String),
    /// Duration of the image probe.
    Probe { duration_ms: f64 },
    ProbeFailed,
}

impl ConnectionProfile {
    /// Minimum time the overlay stays up on this connection.
    pub fn min_display_ms(&self) -> f64 {
        match self {
            ConnectionProfile::EffectiveType(kind) => match kind.as_str() {
                "4g" => 800.0,
                "3g" => 1_200.0,
                "2g" => 2_500.0,
                "slow-2g" => 4_000.0,
                _ => DEFAULT_MIN_DISPLAY_MS,
            },
            ConnectionProfile::Probe { duration_ms } if *duration_ms < 200.0 => 800.0,
            ConnectionProfile::Probe { duration_ms } if *duration_ms < 500.0 => 1_200.0,
            ConnectionProfile::Probe { .. } => 2_500.0,
            ConnectionProfile::ProbeFailed => 3_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Hide,
    /// Check again after this many milliseconds.
    RecheckAfter(u32),
    AlreadyHidden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySchedule {
    started_ms: f64,
    min_display_ms: f64,
    content_loaded: bool,
    hidden: bool,
    /// Bumped by every `reopen`, so a forced hide armed for an earlier
    /// showing does not cut a later one short.
    showing: u32,
}

impl OverlaySchedule {
    pub fn new(started_ms: f64) -> Self {
        Self {
            started_ms,
            min_display_ms: DEFAULT_MIN_DISPLAY_MS,
            content_loaded: false,
            hidden: false,
            showing: 0,
        }
    }

    pub fn set_profile(&mut self, profile: &ConnectionProfile) {
        self.min_display_ms = profile.min_display_ms();
    }

    pub fn min_display_ms(&self) -> f64 {
        self.min_display_ms
    }

    pub fn mark_loaded(&mut self) {
        self.content_loaded = true;
    }

    pub fn content_loaded(&self) -> bool {
        self.content_loaded
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn elapsed(&self, now_ms: f64) -> f64 {
        (now_ms - self.started_ms).max(0.0)
    }

    /// Hide once content is loaded and the minimum time has passed;
    /// otherwise recheck when the minimum runs out.
    pub fn check(&self, now_ms: f64) -> Readiness {
        if self.hidden {
            return Readiness::AlreadyHidden;
        }
        let elapsed = self.elapsed(now_ms);
        if self.content_loaded && elapsed >= self.min_display_ms {
            Readiness::Hide
        } else {
            let remaining = (self.min_display_ms - elapsed).max(0.0);
            Readiness::RecheckAfter(remaining.ceil() as u32)
        }
    }

    /// Second chance after [`Readiness::RecheckAfter`]: hide if content is
    /// loaded or twice the minimum has elapsed.
    pub fn recheck(&self, now_ms: f64) -> bool {
        !self.hidden
            && (self.content_loaded || self.elapsed(now_ms) >= self.min_display_ms * 2.0)
    }

    /// Mark hidden. Returns `false` if it already was.
    pub fn dismiss(&mut self) -> bool {
        !std::mem::replace(&mut self.hidden, true)
    }

    /// Show again (manual `showLoader`), restarting the clock.
    pub fn reopen(&mut self, now_ms: f64) {
        self.hidden = false;
        self.started_ms = now_ms;
        self.showing = self.showing.wrapping_add(1);
    }

    pub fn showing(&self) -> u32 {
        self.showing
    }

    /// Whether the forced hide armed during `showing` should still fire.
    pub fn force_hide_due(&self, showing: u32) -> bool {
        !self.hidden && self.showing == showing
    }
}
