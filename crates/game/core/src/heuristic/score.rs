/// Bounded AI preference for a skill (0-100).
///
/// Higher is better. [`Score::VETO`] suppresses a skill entirely;
/// [`Score::NEUTRAL`] is reported for skills with no heuristic so "no
/// opinion" never suppresses anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score(u32);

impl Score {
    pub const VETO: Self = Self(0);
    pub const NEUTRAL: Self = Self(50);
    pub const MAX: Self = Self(100);

    /// Creates a score, clamping to `MAX`.
    pub const fn new(value: u32) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Linear interpolation between `VETO` (t = 0) and `MAX` (t = 1).
    pub fn ratio(t: f32) -> Self {
        Self::new((t.clamp(0.0, 1.0) * Self::MAX.0 as f32).round() as u32)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn is_veto(self) -> bool {
        self.0 == 0
    }

    /// Additive stacking, saturating at `MAX`.
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_and_saturates() {
        assert_eq!(Score::new(250), Score::MAX);
        assert_eq!(Score::new(70).saturating_add(Score::new(70)), Score::MAX);
        assert_eq!(Score::ratio(0.5), Score::NEUTRAL);
        assert!(Score::VETO.is_veto());
    }
}
