/// Triangle-wave animation of one color channel.
///
/// The direction flips once the value has overshot `[0, 1]`, so the value
/// briefly leaves the range by at most one step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorPulse {
    value: f32,
    step: f32,
}

impl ColorPulse {
    pub const STEP: f32 = 0.05;

    pub const fn new() -> Self {
        Self {
            value: 0.0,
            step: Self::STEP,
        }
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advances one frame and returns the new value.
    pub fn advance(&mut self) -> f32 {
        if self.value > 1.0 {
            self.step = -Self::STEP;
        } else if self.value < 0.0 {
            self.step = Self::STEP;
        }

        self.value += self.step;
        self.value
    }
}

impl Default for ColorPulse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_rises() {
        let mut pulse = ColorPulse::new();
        assert_eq!(pulse.value(), 0.0);
        assert!((pulse.advance() - 0.05).abs() < 1e-6);
        assert!((pulse.advance() - 0.10).abs() < 1e-6);
    }

    #[test]
    fn turns_around_after_exceeding_one() {
        let mut pulse = ColorPulse::new();
        let mut peak = 0.0f32;
        for _ in 0..30 {
            peak = peak.max(pulse.advance());
        }
        assert!(peak > 1.0 && peak <= 1.0 + ColorPulse::STEP + 1e-4);
        assert!(pulse.value() < peak);
    }

    #[test]
    fn stays_within_one_step_of_unit_range() {
        let mut pulse = ColorPulse::new();
        for _ in 0..500 {
            let v = pulse.advance();
            assert!(v >= -ColorPulse::STEP - 1e-4);
            assert!(v <= 1.0 + ColorPulse::STEP + 1e-4);
        }
    }
}
