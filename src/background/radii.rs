use std::hash::{Hash, Hasher};

use crate::error::RegionError;
use crate::geometry::hash_f64;

/// Radii of the four corners of a rounded rectangle. Each corner has a
/// horizontal and a vertical radius, and each of the eight radii is either
/// an absolute length or a fraction of the box dimension along its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerRadii {
    top_left_horizontal: f64,
    top_left_vertical: f64,
    top_right_vertical: f64,
    top_right_horizontal: f64,
    bottom_right_horizontal: f64,
    bottom_right_vertical: f64,
    bottom_left_vertical: f64,
    bottom_left_horizontal: f64,

    top_left_horizontal_percent: bool,
    top_left_vertical_percent: bool,
    top_right_vertical_percent: bool,
    top_right_horizontal_percent: bool,
    bottom_right_horizontal_percent: bool,
    bottom_right_vertical_percent: bool,
    bottom_left_vertical_percent: bool,
    bottom_left_horizontal_percent: bool,
}

/// A single corner radius pair as used by the full constructor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Radius {
    pub value: f64,
    pub percent: bool,
}

impl Radius {
    pub const fn abs(value: f64) -> Self {
        Self {
            value,
            percent: false,
        }
    }

    pub const fn percent(value: f64) -> Self {
        Self {
            value,
            percent: true,
        }
    }

    /// Resolve against the box dimension along this radius' axis.
    pub fn resolve(&self, extent: f64) -> f64 {
        if self.percent {
            self.value * extent
        } else {
            self.value
        }
    }
}

impl CornerRadii {
    pub const EMPTY: CornerRadii = CornerRadii::uniform_const(0.0, false);

    const fn uniform_const(radius: f64, percent: bool) -> Self {
        Self {
            top_left_horizontal: radius,
            top_left_vertical: radius,
            top_right_vertical: radius,
            top_right_horizontal: radius,
            bottom_right_horizontal: radius,
            bottom_right_vertical: radius,
            bottom_left_vertical: radius,
            bottom_left_horizontal: radius,
            top_left_horizontal_percent: percent,
            top_left_vertical_percent: percent,
            top_right_vertical_percent: percent,
            top_right_horizontal_percent: percent,
            bottom_right_horizontal_percent: percent,
            bottom_right_vertical_percent: percent,
            bottom_left_vertical_percent: percent,
            bottom_left_horizontal_percent: percent,
        }
    }

    /// The same absolute radius on every corner and axis.
    pub fn uniform(radius: f64) -> Result<Self, RegionError> {
        Self::uniform_percent(radius, false)
    }

    pub fn uniform_percent(radius: f64, percent: bool) -> Result<Self, RegionError> {
        check_radius(radius)?;
        Ok(Self::uniform_const(radius, percent))
    }

    /// Per-corner circular radii (horizontal == vertical).
    pub fn corners(
        top_left: f64,
        top_right: f64,
        bottom_right: f64,
        bottom_left: f64,
        percent: bool,
    ) -> Result<Self, RegionError> {
        Self::new(
            [
                Radius { value: top_left, percent },
                Radius { value: top_left, percent },
                Radius { value: top_right, percent },
                Radius { value: top_right, percent },
                Radius { value: bottom_right, percent },
                Radius { value: bottom_right, percent },
                Radius { value: bottom_left, percent },
                Radius { value: bottom_left, percent },
            ],
        )
    }

    /// Full constructor. Radii are given in the order top-left horizontal,
    /// top-left vertical, top-right vertical, top-right horizontal,
    /// bottom-right horizontal, bottom-right vertical, bottom-left vertical,
    /// bottom-left horizontal (clockwise around the box).
    pub fn new(radii: [Radius; 8]) -> Result<Self, RegionError> {
        for r in &radii {
            check_radius(r.value)?;
        }
        let [tlh, tlv, trv, trh, brh, brv, blv, blh] = radii;
        Ok(Self {
            top_left_horizontal: tlh.value,
            top_left_vertical: tlv.value,
            top_right_vertical: trv.value,
            top_right_horizontal: trh.value,
            bottom_right_horizontal: brh.value,
            bottom_right_vertical: brv.value,
            bottom_left_vertical: blv.value,
            bottom_left_horizontal: blh.value,
            top_left_horizontal_percent: tlh.percent,
            top_left_vertical_percent: tlv.percent,
            top_right_vertical_percent: trv.percent,
            top_right_horizontal_percent: trh.percent,
            bottom_right_horizontal_percent: brh.percent,
            bottom_right_vertical_percent: brv.percent,
            bottom_left_vertical_percent: blv.percent,
            bottom_left_horizontal_percent: blh.percent,
        })
    }

    pub fn top_left_horizontal(&self) -> Radius {
        Radius { value: self.top_left_horizontal, percent: self.top_left_horizontal_percent }
    }

    pub fn top_left_vertical(&self) -> Radius {
        Radius { value: self.top_left_vertical, percent: self.top_left_vertical_percent }
    }

    pub fn top_right_vertical(&self) -> Radius {
        Radius { value: self.top_right_vertical, percent: self.top_right_vertical_percent }
    }

    pub fn top_right_horizontal(&self) -> Radius {
        Radius { value: self.top_right_horizontal, percent: self.top_right_horizontal_percent }
    }

    pub fn bottom_right_horizontal(&self) -> Radius {
        Radius {
            value: self.bottom_right_horizontal,
            percent: self.bottom_right_horizontal_percent,
        }
    }

    pub fn bottom_right_vertical(&self) -> Radius {
        Radius { value: self.bottom_right_vertical, percent: self.bottom_right_vertical_percent }
    }

    pub fn bottom_left_vertical(&self) -> Radius {
        Radius { value: self.bottom_left_vertical, percent: self.bottom_left_vertical_percent }
    }

    pub fn bottom_left_horizontal(&self) -> Radius {
        Radius {
            value: self.bottom_left_horizontal,
            percent: self.bottom_left_horizontal_percent,
        }
    }

    fn all(&self) -> [Radius; 8] {
        [
            self.top_left_horizontal(),
            self.top_left_vertical(),
            self.top_right_vertical(),
            self.top_right_horizontal(),
            self.bottom_right_horizontal(),
            self.bottom_right_vertical(),
            self.bottom_left_vertical(),
            self.bottom_left_horizontal(),
        ]
    }

    pub fn has_percent_based_radii(&self) -> bool {
        self.all().iter().any(|r| r.percent)
    }

    pub fn is_uniform(&self) -> bool {
        let all = self.all();
        all.iter().all(|r| *r == all[0])
    }

    pub fn is_empty(&self) -> bool {
        self.all().iter().all(|r| r.value == 0.0)
    }
}

impl Default for CornerRadii {
    fn default() -> Self {
        CornerRadii::EMPTY
    }
}

impl Hash for CornerRadii {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for r in self.all() {
            hash_f64(r.value, state);
            r.percent.hash(state);
        }
    }
}

fn check_radius(radius: f64) -> Result<(), RegionError> {
    if radius < 0.0 || radius.is_nan() {
        return Err(RegionError::invalid(format!(
            "corner radius must be >= 0, got {}",
            radius
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_radii_are_uniform() {
        let r = CornerRadii::uniform(3.0).unwrap();
        assert!(r.is_uniform());
        assert!(!r.has_percent_based_radii());
        assert_eq!(r.bottom_left_vertical().value, 3.0);
    }

    #[test]
    fn negative_radius_is_rejected() {
        assert!(CornerRadii::uniform(-1.0).is_err());
        assert!(CornerRadii::corners(1.0, 2.0, -3.0, 4.0, false).is_err());
    }

    #[test]
    fn percent_radius_resolves_against_extent() {
        let r = CornerRadii::uniform_percent(0.25, true).unwrap();
        assert!(r.has_percent_based_radii());
        assert_eq!(r.top_right_horizontal().resolve(200.0), 50.0);
    }

    #[test]
    fn empty_is_default() {
        assert_eq!(CornerRadii::default(), CornerRadii::EMPTY);
        assert!(CornerRadii::EMPTY.is_empty());
    }

    #[test]
    fn full_constructor_validates_every_radius() {
        let mut radii = [Radius::abs(1.0); 8];
        radii[5] = Radius::abs(-0.5);
        assert!(CornerRadii::new(radii).is_err());
        radii[5] = Radius::abs(f64::NAN);
        assert!(CornerRadii::new(radii).is_err());
        radii[5] = Radius::percent(0.5);
        let r = CornerRadii::new(radii).unwrap();
        assert_eq!(r.bottom_right_vertical(), Radius::percent(0.5));
        assert_eq!(r.bottom_left_vertical(), Radius::abs(1.0));
    }
}
