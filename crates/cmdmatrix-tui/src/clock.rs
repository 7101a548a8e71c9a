/// Frame counter wraps at this value.
pub const FRAME_PERIOD: u64 = 1 << 32;

/// A tick-based timer that counts down to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown(u16);

impl Countdown {
    pub fn new(ticks: u16) -> Self {
        Self(ticks)
    }

    pub fn is_active(self) -> bool {
        self.0 > 0
    }

    pub fn remaining(self) -> u16 {
        self.0
    }

    /// Decrement once. Returns true when the countdown has reached zero.
    pub fn tick(&mut self) -> bool {
        self.0 = self.0.saturating_sub(1);
        self.0 == 0
    }
}

/// Fixed-interval tick source.
///
/// Advances the frame counter used by animations and, when configured,
/// reports when a periodic refresh is due.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    frame: u64,
    refresh_every: Option<u64>,
    since_refresh: u64,
}

impl Clock {
    pub fn new(refresh_every: Option<u64>) -> Self {
        Self {
            frame: 0,
            refresh_every: refresh_every.filter(|&n| n > 0),
            since_refresh: 0,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one tick. Returns true when a refresh should start now.
    ///
    /// A due refresh is skipped while `busy`; the window restarts either way
    /// so at most one request is issued per window.
    pub fn advance(&mut self, busy: bool) -> bool {
        self.frame = (self.frame + 1) % FRAME_PERIOD;

        let Some(every) = self.refresh_every else {
            return false;
        };
        self.since_refresh += 1;
        if self.since_refresh < every {
            return false;
        }
        self.since_refresh = 0;
        !busy
    }

    /// Restart the refresh window, e.g. after a manual refresh.
    pub fn restart_refresh(&mut self) {
        self.since_refresh = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Countdown ---

    #[test]
    fn countdown_expires_after_n_ticks() {
        let mut c = Countdown::new(2);
        assert!(c.is_active());
        assert!(!c.tick());
        assert!(c.tick());
        assert!(!c.is_active());
    }

    #[test]
    fn idle_countdown_stays_at_zero() {
        let mut c = Countdown::default();
        assert!(c.tick());
        assert_eq!(c.remaining(), 0);
    }

    // --- Clock ---

    #[test]
    fn frame_advances_each_tick() {
        let mut clock = Clock::new(None);
        clock.advance(false);
        clock.advance(false);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn frame_wraps_at_period() {
        let mut clock = Clock {
            frame: FRAME_PERIOD - 1,
            ..Clock::default()
        };
        clock.advance(false);
        assert_eq!(clock.frame(), 0);
    }

    #[test]
    fn no_refresh_without_cadence() {
        let mut clock = Clock::new(None);
        assert!((0..1000).all(|_| !clock.advance(false)));
    }

    #[test]
    fn refresh_due_every_n_ticks() {
        let mut clock = Clock::new(Some(3));
        let due: Vec<bool> = (0..6).map(|_| clock.advance(false)).collect();
        assert_eq!(due, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn busy_window_is_skipped() {
        let mut clock = Clock::new(Some(2));
        assert!(!clock.advance(true));
        assert!(!clock.advance(true));
        assert!(!clock.advance(false));
        assert!(clock.advance(false));
    }

    #[test]
    fn restart_delays_next_refresh() {
        let mut clock = Clock::new(Some(2));
        clock.advance(false);
        clock.restart_refresh();
        assert!(!clock.advance(false));
        assert!(clock.advance(false));
    }
}
