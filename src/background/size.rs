use std::hash::{Hash, Hasher};

use crate::error::RegionError;
use crate::geometry::hash_f64;

/// How large a background image is drawn. `cover` and `contain` override
/// the explicit width/height; an `AUTO` dimension keeps the image's aspect
/// ratio (or its intrinsic size when both are auto).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundSize {
    width: f64,
    height: f64,
    width_percent: bool,
    height_percent: bool,
    contain: bool,
    cover: bool,
}

impl BackgroundSize {
    /// Sentinel magnitude meaning "derive this dimension".
    pub const AUTO: f64 = -1.0;

    pub const DEFAULT: BackgroundSize = BackgroundSize {
        width: Self::AUTO,
        height: Self::AUTO,
        width_percent: true,
        height_percent: true,
        contain: false,
        cover: false,
    };

    pub fn new(
        width: f64,
        height: f64,
        width_percent: bool,
        height_percent: bool,
        contain: bool,
        cover: bool,
    ) -> Result<Self, RegionError> {
        for (name, v) in [("width", width), ("height", height)] {
            if v.is_nan() || (v < 0.0 && v != Self::AUTO) {
                return Err(RegionError::invalid(format!(
                    "background size {} must be >= 0 or AUTO, got {}",
                    name, v
                )));
            }
        }
        Ok(Self {
            width,
            height,
            width_percent,
            height_percent,
            contain,
            cover,
        })
    }

    pub fn cover() -> Self {
        Self {
            cover: true,
            ..Self::DEFAULT
        }
    }

    pub fn contain() -> Self {
        Self {
            contain: true,
            ..Self::DEFAULT
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_width_percent(&self) -> bool {
        self.width_percent
    }

    pub fn is_height_percent(&self) -> bool {
        self.height_percent
    }

    pub fn is_contain(&self) -> bool {
        self.contain
    }

    pub fn is_cover(&self) -> bool {
        self.cover
    }

    /// Drawn size of an image with `intrinsic` size inside `area`.
    pub fn resolve(&self, area: (f64, f64), intrinsic: (f64, f64)) -> (f64, f64) {
        let (iw, ih) = intrinsic;
        if iw <= 0.0 || ih <= 0.0 {
            return (0.0, 0.0);
        }
        if self.cover || self.contain {
            let sx = area.0 / iw;
            let sy = area.1 / ih;
            let scale = if self.cover { sx.max(sy) } else { sx.min(sy) };
            return (iw * scale, ih * scale);
        }
        let resolve = |v: f64, percent: bool, extent: f64| {
            if v == Self::AUTO {
                None
            } else if percent {
                Some(v * extent)
            } else {
                Some(v)
            }
        };
        match (
            resolve(self.width, self.width_percent, area.0),
            resolve(self.height, self.height_percent, area.1),
        ) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, ih * w / iw),
            (None, Some(h)) => (iw * h / ih, h),
            (None, None) => (iw, ih),
        }
    }
}

impl Default for BackgroundSize {
    fn default() -> Self {
        BackgroundSize::DEFAULT
    }
}

impl Hash for BackgroundSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.width, state);
        hash_f64(self.height, state);
        self.width_percent.hash(state);
        self.height_percent.hash(state);
        self.contain.hash(state);
        self.cover.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_sizes_other_than_auto_are_rejected() {
        assert!(BackgroundSize::new(-2.0, 10.0, false, false, false, false).is_err());
        assert!(BackgroundSize::new(BackgroundSize::AUTO, BackgroundSize::AUTO, false, false, false, false).is_ok());
    }

    #[test]
    fn auto_keeps_aspect_ratio() {
        let size = BackgroundSize::new(50.0, BackgroundSize::AUTO, false, false, false, false).unwrap();
        assert_eq!(size.resolve((200.0, 200.0), (100.0, 40.0)), (50.0, 20.0));
        assert_eq!(BackgroundSize::DEFAULT.resolve((200.0, 200.0), (100.0, 40.0)), (100.0, 40.0));
    }

    #[test]
    fn cover_and_contain_scale_to_area() {
        assert_eq!(BackgroundSize::cover().resolve((200.0, 100.0), (50.0, 50.0)), (200.0, 200.0));
        assert_eq!(BackgroundSize::contain().resolve((200.0, 100.0), (50.0, 50.0)), (100.0, 100.0));
    }

    #[test]
    fn percent_sizes_scale_with_area() {
        let size = BackgroundSize::new(0.5, 0.25, true, true, false, false).unwrap();
        assert_eq!(size.resolve((200.0, 100.0), (10.0, 10.0)), (100.0, 25.0));
    }
}
