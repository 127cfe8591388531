//! Race session flags: lap target, pause gate and the terminal end state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub max_laps: u32,
    pub paused: bool,
    pub ended: bool,
}

impl Session {
    pub fn new(max_laps: u32) -> Self {
        Self {
            max_laps,
            paused: false,
            ended: false,
        }
    }

    /// Ticks only run while neither paused nor ended.
    pub fn is_running(&self) -> bool {
        !self.paused && !self.ended
    }

    /// True once `lap` is past the final lap.
    pub fn is_complete(&self, lap: u32) -> bool {
        lap > self.max_laps
    }

    /// Enter the terminal state.  Also pauses, so nothing resumes the race.
    pub fn end(&mut self) {
        self.ended = true;
        self.paused = true;
    }

    /// Flip the pause flag; an ended session stays paused.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.ended {
            self.paused = !self.paused;
        }
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lap_four_of_three_completes() {
        let session = Session::new(3);
        assert!(!session.is_complete(3));
        assert!(session.is_complete(4));
    }

    #[test]
    fn ended_session_cannot_be_unpaused() {
        let mut session = Session::new(3);
        session.end();
        assert!(session.toggle_pause());
        assert!(!session.is_running());
    }

    #[test]
    fn pause_toggles_running() {
        let mut session = Session::new(3);
        assert!(session.toggle_pause());
        assert!(!session.is_running());
        assert!(!session.toggle_pause());
        assert!(session.is_running());
    }
}
