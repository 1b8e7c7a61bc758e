use crate::background::CornerRadii;
use crate::geometry::Insets;
use crate::paint::Paint;

/// A filled, possibly rounded rectangle inset from the region's border box.
/// Negative insets let the fill bleed outside the box.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct BackgroundFill {
    fill: Paint,
    radii: CornerRadii,
    insets: Insets,
}

impl BackgroundFill {
    /// Missing radii or insets normalize to their `EMPTY` values.
    pub fn new(fill: impl Into<Paint>, radii: Option<CornerRadii>, insets: Option<Insets>) -> Self {
        Self {
            fill: fill.into(),
            radii: radii.unwrap_or(CornerRadii::EMPTY),
            insets: insets.unwrap_or(Insets::EMPTY),
        }
    }

    pub fn fill(&self) -> &Paint {
        &self.fill
    }

    pub fn radii(&self) -> &CornerRadii {
        &self.radii
    }

    pub fn insets(&self) -> &Insets {
        &self.insets
    }

    /// How far this fill extends past each edge of the border box.
    pub fn outsets(&self) -> Insets {
        self.insets.map(|v| (-v).max(0.0))
    }

    /// Insets of the largest rectangle this fill is guaranteed to cover
    /// opaquely in a `width` x `height` box, or `None` if its paint is not
    /// fully opaque. Each edge is pulled in by half the larger radius of
    /// the two corners that touch it.
    pub(crate) fn opaque_region(&self, width: f64, height: f64) -> Option<Insets> {
        if !self.fill.is_opaque() {
            return None;
        }
        let r = &self.radii;
        let tlh = r.top_left_horizontal().resolve(width);
        let tlv = r.top_left_vertical().resolve(height);
        let trv = r.top_right_vertical().resolve(height);
        let trh = r.top_right_horizontal().resolve(width);
        let brh = r.bottom_right_horizontal().resolve(width);
        let brv = r.bottom_right_vertical().resolve(height);
        let blv = r.bottom_left_vertical().resolve(height);
        let blh = r.bottom_left_horizontal().resolve(width);

        Some(Insets::new(
            self.insets.top + tlv.max(trv) / 2.0,
            self.insets.right + trh.max(brh) / 2.0,
            self.insets.bottom + blv.max(brv) / 2.0,
            self.insets.left + tlh.max(blh) / 2.0,
        ))
    }
}
