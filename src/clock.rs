// Countdown timers for the two periodic triggers, advanced once per poll.

use std::time::Duration;

use crate::config::TimingConfig;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Due {
    pub tick: bool,
    pub spawn: bool,
}

struct Countdown {
    period: Duration,
    remaining: Duration,
}

impl Countdown {
    fn new(period_ms: u64) -> Self {
        let period = Duration::from_millis(period_ms);
        Countdown { period, remaining: period }
    }

    // Fires at most once per call. Time past the deadline counts towards the
    // next period, capped so the next deadline is still in the future.
    fn elapse(&mut self, elapsed: Duration) -> bool {
        if elapsed >= self.remaining {
            let overshoot = (elapsed - self.remaining).min(self.period - Duration::from_nanos(1));
            self.remaining = self.period - overshoot;
            true
        } else {
            self.remaining -= elapsed;
            false
        }
    }
}

pub struct Clock {
    tick: Countdown,
    spawn: Countdown,
}

impl Clock {
    pub fn new(timing: &TimingConfig) -> Self {
        Clock {
            tick: Countdown::new(timing.tick_interval_ms),
            spawn: Countdown::new(timing.spawn_interval_ms),
        }
    }

    pub fn advance(&mut self, elapsed: Duration) -> Due {
        Due { tick: self.tick.elapse(elapsed), spawn: self.spawn.elapse(elapsed) }
    }
}
