use std::collections::{BTreeMap, HashMap};

use crate::error::ConfigError;

/// Hand-authored level to HP table.
///
/// Entries must strictly increase with level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BTreeMap<u8, u32>"))]
pub struct HpCurve {
    entries: BTreeMap<u8, u32>,
}

impl HpCurve {
    /// Validates and builds a curve.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyHpCurve`] or [`ConfigError::NonIncreasingHpCurve`].
    pub fn new(entries: impl IntoIterator<Item = (u8, u32)>) -> Result<Self, ConfigError> {
        let entries: BTreeMap<u8, u32> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(ConfigError::EmptyHpCurve);
        }

        let mut previous: Option<u32> = None;
        for (&level, &hp) in &entries {
            if let Some(previous) = previous
                && hp <= previous
            {
                return Err(ConfigError::NonIncreasingHpCurve {
                    level,
                    hp,
                    previous,
                });
            }
            previous = Some(hp);
        }
        Ok(Self { entries })
    }

    /// HP for `level`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingHpEntry`] if the level has no entry.
    pub fn hp(&self, level: u8) -> Result<u32, ConfigError> {
        self.entries
            .get(&level)
            .copied()
            .ok_or(ConfigError::MissingHpEntry(level))
    }

    /// Levels covered by the curve, ascending.
    pub fn levels(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.keys().copied()
    }
}

impl TryFrom<BTreeMap<u8, u32>> for HpCurve {
    type Error = ConfigError;

    fn try_from(entries: BTreeMap<u8, u32>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

/// Model reference of a monster family.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LookRef {
    pub model: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variant: u8,
}

impl LookRef {
    pub fn new(model: impl Into<String>, variant: u8) -> Self {
        Self {
            model: model.into(),
            variant,
        }
    }
}

/// Known models and how many variants each has.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LookTable {
    variants: HashMap<String, u8>,
}

impl LookTable {
    pub fn new(models: impl IntoIterator<Item = (String, u8)>) -> Self {
        Self {
            variants: models.into_iter().collect(),
        }
    }

    pub fn contains(&self, look: &LookRef) -> bool {
        self.variants
            .get(&look.model)
            .is_some_and(|count| look.variant < *count)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_increasing_curves() {
        assert_eq!(HpCurve::new([]), Err(ConfigError::EmptyHpCurve));
        assert_eq!(
            HpCurve::new([(1, 50), (2, 80), (3, 80)]),
            Err(ConfigError::NonIncreasingHpCurve {
                level: 3,
                hp: 80,
                previous: 80
            })
        );
    }

    #[test]
    fn missing_level_is_an_error() {
        let curve = HpCurve::new([(1, 50), (3, 90)]).unwrap();
        assert_eq!(curve.hp(3), Ok(90));
        assert_eq!(curve.hp(2), Err(ConfigError::MissingHpEntry(2)));
    }

    #[test]
    fn look_variants_are_bounded() {
        let looks = LookTable::new([("bomb".to_string(), 2)]);
        assert!(looks.contains(&LookRef::new("bomb", 1)));
        assert!(!looks.contains(&LookRef::new("bomb", 2)));
        assert!(!looks.contains(&LookRef::new("crab", 0)));
    }
}
