use chess::Color;

/// What a single clock tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A second was taken from the side to move.
    Running,
    /// The clock is stopped for good; nothing was decremented.
    Stopped,
    /// This side's counter just reached zero. The clock is now stopped.
    Flagged(Color),
}

/// Two countdown counters in whole seconds.
///
/// Once stopped the clock never runs again, and undo never credits time back.
#[derive(Debug, Clone)]
pub struct Clock {
    white: u32,
    black: u32,
    stopped: bool,
}

impl Clock {
    pub fn new(seconds: u32) -> Self {
        Clock {
            white: seconds,
            black: seconds,
            stopped: false,
        }
    }

    pub fn remaining(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn tick(&mut self, to_move: Color, game_over: bool) -> Tick {
        if self.stopped {
            return Tick::Stopped;
        }
        if game_over {
            self.stopped = true;
            return Tick::Stopped;
        }

        let counter = match to_move {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        *counter = counter.saturating_sub(1);

        if *counter == 0 {
            self.stopped = true;
            Tick::Flagged(to_move)
        } else {
            Tick::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_side_to_move_loses_time() {
        for n in [0u32, 1, 17, 299] {
            let mut clock = Clock::new(300);
            for _ in 0..n {
                assert_eq!(clock.tick(Color::Black, false), Tick::Running);
            }
            assert_eq!(clock.remaining(Color::Black), 300 - n);
            assert_eq!(clock.remaining(Color::White), 300);
        }
    }

    #[test]
    fn flag_fall_stops_both_counters() {
        let mut clock = Clock::new(3);
        assert_eq!(clock.tick(Color::White, false), Tick::Running);
        assert_eq!(clock.tick(Color::White, false), Tick::Running);
        assert_eq!(clock.tick(Color::White, false), Tick::Flagged(Color::White));
        assert!(clock.is_stopped());

        for _ in 0..10 {
            assert_eq!(clock.tick(Color::Black, false), Tick::Stopped);
        }
        assert_eq!(clock.remaining(Color::White), 0);
        assert_eq!(clock.remaining(Color::Black), 3);
    }

    #[test]
    fn many_ticks_clamp_at_zero() {
        let mut clock = Clock::new(300);
        for _ in 0..400 {
            clock.tick(Color::White, false);
        }
        assert_eq!(clock.remaining(Color::White), 0);
        assert_eq!(clock.remaining(Color::Black), 300);
    }

    #[test]
    fn game_over_stops_without_decrementing() {
        let mut clock = Clock::new(300);
        assert_eq!(clock.tick(Color::White, true), Tick::Stopped);
        assert_eq!(clock.tick(Color::White, false), Tick::Stopped);
        assert_eq!(clock.remaining(Color::White), 300);
    }
}
