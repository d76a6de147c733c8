use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::LaymentError;

/// One of the four orientations a contour can take on the layment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Exact rotation for an angle in `{0, 90, 180, 270}`, `None` for anything else.
    pub fn from_degrees(angle: f32) -> Option<Rotation> {
        Rotation::ALL
            .into_iter()
            .find(|r| r.degrees() as f32 == angle)
    }

    /// Maps any multiple of 90 degrees, negative ones included, onto its equivalent in `[0, 360)`.
    /// E.g. -90 becomes 270 and 450 becomes 90. Other angles yield `None`.
    pub fn normalize(angle: f32) -> Option<Rotation> {
        if !angle.is_finite() || angle % 90.0 != 0.0 {
            return None;
        }
        Rotation::from_degrees(angle.rem_euclid(360.0))
    }

    /// Snaps an arbitrary observed angle onto the closest of the `allowed` rotations.
    ///
    /// Distances are measured around the circle (350 is 10 away from 0).
    /// Ties resolve towards the lower rotation. Falls back to [`Rotation::Deg0`] if nothing is allowed.
    pub fn snap(angle: f32, allowed: &[Rotation]) -> Rotation {
        if !angle.is_finite() {
            return allowed.iter().copied().min().unwrap_or_default();
        }
        let a = angle.rem_euclid(360.0);
        let circular_distance = |r: &Rotation| {
            let d = (r.degrees() as f32 - a).abs();
            f32::min(d, 360.0 - d)
        };
        let mut best: Option<(Rotation, f32)> = None;
        for r in allowed.iter().copied() {
            let d = circular_distance(&r);
            best = match best {
                Some((b, bd)) if bd < d || (bd == d && b < r) => Some((b, bd)),
                _ => Some((r, d)),
            };
        }
        best.map(|(r, _)| r).unwrap_or_default()
    }

    /// The next allowed rotation clockwise (+90 degrees steps), wrapping around.
    pub fn next_allowed(self, allowed: &[Rotation]) -> Rotation {
        (1..=4)
            .map(|step| Rotation::ALL[(self as usize + step) % 4])
            .find(|r| allowed.contains(r))
            .unwrap_or(self)
    }

    /// Exact `(sin, cos)` of the rotation.
    pub fn sin_cos(self) -> (f32, f32) {
        match self {
            Rotation::Deg0 => (0.0, 1.0),
            Rotation::Deg90 => (1.0, 0.0),
            Rotation::Deg180 => (0.0, -1.0),
            Rotation::Deg270 => (-1.0, 0.0),
        }
    }

    /// True if the rotation swaps the width and height of a shape.
    pub fn is_sideways(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl TryFrom<f32> for Rotation {
    type Error = LaymentError;

    fn try_from(angle: f32) -> Result<Self, Self::Error> {
        Rotation::normalize(angle).ok_or(LaymentError::UnsupportedAngle(angle))
    }
}

impl From<Rotation> for f32 {
    fn from(r: Rotation) -> Self {
        r.degrees() as f32
    }
}

impl Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, Rotation::Deg0)]
    #[test_case(44.0, Rotation::Deg0)]
    #[test_case(45.0, Rotation::Deg0; "tie resolves to lower")]
    #[test_case(46.0, Rotation::Deg90)]
    #[test_case(135.0, Rotation::Deg90; "tie between 90 and 180")]
    #[test_case(181.0, Rotation::Deg180)]
    #[test_case(315.0, Rotation::Deg0; "tie across the wrap")]
    #[test_case(350.0, Rotation::Deg0)]
    #[test_case(-100.0, Rotation::Deg270)]
    #[test_case(719.0, Rotation::Deg0)]
    fn snap_to_nearest(angle: f32, expected: Rotation) {
        assert_eq!(Rotation::snap(angle, &Rotation::ALL), expected);
    }

    #[test]
    fn snap_respects_allowed_subset() {
        let allowed = [Rotation::Deg0, Rotation::Deg180];
        assert_eq!(Rotation::snap(80.0, &allowed), Rotation::Deg0);
        assert_eq!(Rotation::snap(100.0, &allowed), Rotation::Deg180);
        assert_eq!(Rotation::snap(90.0, &allowed), Rotation::Deg0);
    }

    #[test_case(-90.0, Some(Rotation::Deg270))]
    #[test_case(-180.0, Some(Rotation::Deg180))]
    #[test_case(-270.0, Some(Rotation::Deg90))]
    #[test_case(360.0, Some(Rotation::Deg0))]
    #[test_case(45.0, None)]
    #[test_case(f32::NAN, None)]
    fn normalize(angle: f32, expected: Option<Rotation>) {
        assert_eq!(Rotation::normalize(angle), expected);
    }

    #[test]
    fn conversion_rejects_oblique_angles() {
        assert_eq!(Rotation::try_from(-90.0), Ok(Rotation::Deg270));
        assert_eq!(
            Rotation::try_from(30.0),
            Err(LaymentError::UnsupportedAngle(30.0))
        );
    }

    #[test]
    fn next_allowed_wraps() {
        assert_eq!(Rotation::Deg270.next_allowed(&Rotation::ALL), Rotation::Deg0);
        let allowed = [Rotation::Deg0, Rotation::Deg180];
        assert_eq!(Rotation::Deg0.next_allowed(&allowed), Rotation::Deg180);
    }
}
