use crate::domain::models::Phase;

/// Focus sessions per cycle; a long break replaces the short one after the
/// fourth completion.
pub const LONG_BREAK_INTERVAL: u32 = 4;

/// Pure transition policy applied when the countdown for `current` finishes.
/// Returns the phase to enter and the updated completed-focus count. Break
/// phases always hand back to focus without touching the counter.
pub fn next_phase(current: Phase, completed_focus_sessions: u32) -> (Phase, u32) {
    match current {
        Phase::Focus => {
            let completed = completed_focus_sessions + 1;
            let next = if completed % LONG_BREAK_INTERVAL == 0 {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            };
            (next, completed)
        }
        Phase::ShortBreak | Phase::LongBreak => (Phase::Focus, completed_focus_sessions),
    }
}

pub fn sessions_until_long_break(completed_focus_sessions: u32) -> u32 {
    let completed_in_cycle = completed_focus_sessions % LONG_BREAK_INTERVAL;
    if completed_in_cycle == 0 {
        LONG_BREAK_INTERVAL
    } else {
        LONG_BREAK_INTERVAL - completed_in_cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fourth_focus_completion_earns_a_long_break() {
        assert_eq!(next_phase(Phase::Focus, 0), (Phase::ShortBreak, 1));
        assert_eq!(next_phase(Phase::Focus, 1), (Phase::ShortBreak, 2));
        assert_eq!(next_phase(Phase::Focus, 2), (Phase::ShortBreak, 3));
        assert_eq!(next_phase(Phase::Focus, 3), (Phase::LongBreak, 4));
        assert_eq!(next_phase(Phase::Focus, 4), (Phase::ShortBreak, 5));
    }

    #[test]
    fn breaks_always_return_to_focus_without_counting() {
        assert_eq!(next_phase(Phase::ShortBreak, 2), (Phase::Focus, 2));
        assert_eq!(next_phase(Phase::LongBreak, 4), (Phase::Focus, 4));
    }

    #[test]
    fn countdown_to_long_break_cycles_through_four() {
        let observed = (0u32..9).map(sessions_until_long_break).collect::<Vec<_>>();
        assert_eq!(observed, vec![4, 3, 2, 1, 4, 3, 2, 1, 4]);
    }

    proptest! {
        #[test]
        fn long_break_selected_exactly_at_positive_multiples_of_four(
            completed in 0u32..10_000u32
        ) {
            let (next, incremented) = next_phase(Phase::Focus, completed);
            prop_assert_eq!(incremented, completed + 1);
            if incremented % LONG_BREAK_INTERVAL == 0 {
                prop_assert_eq!(next, Phase::LongBreak);
            } else {
                prop_assert_eq!(next, Phase::ShortBreak);
            }
        }

        #[test]
        fn sessions_until_long_break_stays_in_range(completed in 0u32..10_000u32) {
            let remaining = sessions_until_long_break(completed);
            prop_assert!((1..=LONG_BREAK_INTERVAL).contains(&remaining));
            // Completing one more focus session decreases the countdown by
            // one, except at the boundary where it wraps back to 4.
            let after_next = sessions_until_long_break(completed + 1);
            if remaining == 1 {
                prop_assert_eq!(after_next, LONG_BREAK_INTERVAL);
            } else {
                prop_assert_eq!(after_next, remaining - 1);
            }
        }
    }
}
