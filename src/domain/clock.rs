/// Outcome of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Decremented { minutes: u32, seconds: u32 },
    Finished,
}

/// Remaining time of the countdown clock. Seconds stay within [0, 59].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    minutes: u32,
    seconds: u32,
}

impl Countdown {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self {
            minutes,
            seconds: seconds.min(59),
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn total_seconds(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }

    pub fn is_elapsed(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }

    pub fn reset(&mut self, minutes: u32, seconds: u32) {
        self.minutes = minutes;
        self.seconds = seconds.min(59);
    }

    /// Advances by one second. A call at 0:00 does not decrement; it reports
    /// the countdown as finished instead.
    pub fn tick(&mut self) -> TickOutcome {
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        } else {
            return TickOutcome::Finished;
        }
        TickOutcome::Decremented {
            minutes: self.minutes,
            seconds: self.seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tick_borrows_a_minute_when_seconds_run_out() {
        let mut countdown = Countdown::new(1, 0);
        assert_eq!(
            countdown.tick(),
            TickOutcome::Decremented {
                minutes: 0,
                seconds: 59
            }
        );
    }

    #[test]
    fn tick_at_zero_reports_finished_and_stays_at_zero() {
        let mut countdown = Countdown::new(0, 0);
        assert_eq!(countdown.tick(), TickOutcome::Finished);
        assert_eq!(countdown.tick(), TickOutcome::Finished);
        assert!(countdown.is_elapsed());
    }

    #[test]
    fn new_clamps_seconds_into_range() {
        let countdown = Countdown::new(5, 120);
        assert_eq!(countdown.seconds(), 59);
    }

    #[test]
    fn reset_overwrites_remaining_time() {
        let mut countdown = Countdown::new(25, 0);
        let _ = countdown.tick();
        countdown.reset(10, 30);
        assert_eq!(countdown.minutes(), 10);
        assert_eq!(countdown.seconds(), 30);
        assert_eq!(countdown.total_seconds(), 630);
    }

    proptest! {
        #[test]
        fn ticking_drains_exactly_one_second_until_finished(
            minutes in 0u32..=60u32,
            seconds in 0u32..60u32
        ) {
            let mut countdown = Countdown::new(minutes, seconds);
            let total = countdown.total_seconds();

            for expected_remaining in (0..total).rev() {
                match countdown.tick() {
                    TickOutcome::Decremented { minutes, seconds } => {
                        prop_assert_eq!(minutes * 60 + seconds, expected_remaining);
                        prop_assert!(seconds < 60);
                    }
                    TickOutcome::Finished => prop_assert!(false, "finished early"),
                }
            }

            prop_assert_eq!(countdown.tick(), TickOutcome::Finished);
            prop_assert!(countdown.is_elapsed());
        }
    }
}
