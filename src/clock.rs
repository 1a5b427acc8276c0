/// Manually advanced millisecond clock. Never runs backwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VirtualClock {
    now_ms: f64,
}

impl VirtualClock {
    pub fn starting_at(now_ms: f64) -> Self {
        Self { now_ms }
    }

    pub fn now(&self) -> f64 {
        self.now_ms
    }

    pub fn advance_to(&mut self, at: f64) {
        if at > self.now_ms {
            self.now_ms = at;
        }
    }

    pub fn advance_by(&mut self, ms: f64) {
        self.advance_to(self.now_ms + ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_monotonic() {
        let mut clock = VirtualClock::starting_at(100.0);
        clock.advance_to(50.0);
        assert_eq!(clock.now(), 100.0);
        clock.advance_by(25.0);
        assert_eq!(clock.now(), 125.0);
    }
}
