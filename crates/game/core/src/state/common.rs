use std::fmt;

/// Unique identifier for any actor taking part in combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Planar position in world units (yalms).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two positions.
    pub fn distance(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Heading (radians) pointing from `self` towards `other`.
    pub fn heading_to(self, other: Position) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Moves `distance` units along `heading`.
    pub fn offset(self, heading: f32, distance: f32) -> Position {
        Position {
            x: self.x + heading.cos() * distance,
            y: self.y + heading.sin() * distance,
        }
    }
}

/// Smallest absolute difference between two headings, in degrees (0-180).
pub fn angle_between(a: f32, b: f32) -> f32 {
    let diff = (a - b).to_degrees().rem_euclid(360.0);
    if diff > 180.0 { 360.0 - diff } else { diff }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_wraps_around() {
        let a = 170f32.to_radians();
        let b = (-170f32).to_radians();
        assert!((angle_between(a, b) - 20.0).abs() < 0.01);
    }

    #[test]
    fn heading_and_offset_agree() {
        let from = Position::new(1.0, 1.0);
        let to = Position::new(4.0, 5.0);
        let moved = from.offset(from.heading_to(to), from.distance(to));

        assert!((moved.x - to.x).abs() < 0.001);
        assert!((moved.y - to.y).abs() < 0.001);
    }
}
