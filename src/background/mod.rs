//! # Backgrounds
//!
//! A [`Background`] is an ordered stack of fill layers followed by an ordered
//! stack of image layers, painted bottom to top. It is immutable once built:
//! the constructors copy whatever they are given, and the layer accessors
//! hand out read-only slices.
//!
//! Two derived quantities are computed by folding over the fills:
//!
//! - **outsets**: how far any fill bleeds past the border box, per edge.
//! - **opaque insets**: the largest rectangle inside the border box that is
//!   guaranteed to be painted fully opaque, which lets a renderer skip
//!   whatever lies underneath.

mod fill;
mod image;
mod position;
mod radii;
mod size;

pub use fill::BackgroundFill;
pub use image::{BackgroundImage, BackgroundRepeat};
pub use position::BackgroundPosition;
pub use radii::{CornerRadii, Radius};
pub use size::BackgroundSize;

use crate::geometry::Insets;
use crate::paint::Paint;

/// The fill and image layers painted behind a region's content.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct Background {
    fills: Vec<BackgroundFill>,
    images: Vec<BackgroundImage>,
    outsets: Insets,
}

impl Background {
    /// A background with no layers at all.
    pub const EMPTY: Background = Background {
        fills: Vec::new(),
        images: Vec::new(),
        outsets: Insets::EMPTY,
    };

    pub fn new(
        fills: impl IntoIterator<Item = BackgroundFill>,
        images: impl IntoIterator<Item = BackgroundImage>,
    ) -> Self {
        let fills: Vec<BackgroundFill> = fills.into_iter().collect();
        let images: Vec<BackgroundImage> = images.into_iter().collect();
        let outsets = fills
            .iter()
            .fold(Insets::EMPTY, |acc, f| acc.edge_max(f.outsets()));
        Self {
            fills,
            images,
            outsets,
        }
    }

    /// Build from optional slices with optional entries. Missing slices
    /// mean "no layers" and missing entries are skipped; the relative order
    /// of the remaining layers is kept. The slices are copied, so later
    /// changes to the caller's storage are not observed.
    pub fn from_optional(
        fills: Option<&[Option<BackgroundFill>]>,
        images: Option<&[Option<BackgroundImage>]>,
    ) -> Self {
        Self::new(
            fills.unwrap_or_default().iter().flatten().cloned(),
            images.unwrap_or_default().iter().flatten().cloned(),
        )
    }

    pub fn with_fills(fills: &[BackgroundFill]) -> Self {
        Self::new(fills.iter().cloned(), [])
    }

    pub fn with_images(images: &[BackgroundImage]) -> Self {
        Self::new([], images.iter().cloned())
    }

    /// A single fill covering the whole border box.
    pub fn fill(paint: impl Into<Paint>) -> Self {
        Self::with_fills(&[BackgroundFill::new(paint, None, None)])
    }

    pub fn fills(&self) -> &[BackgroundFill] {
        &self.fills
    }

    pub fn images(&self) -> &[BackgroundImage] {
        &self.images
    }

    /// Per-edge maximum bleed of the fills past the border box.
    pub fn outsets(&self) -> Insets {
        self.outsets
    }

    pub fn is_empty(&self) -> bool {
        self.fills.is_empty() && self.images.is_empty()
    }

    /// True when some fill's geometry depends on the region size.
    pub fn is_fill_percentage_based(&self) -> bool {
        self.fills.iter().any(|f| f.radii().has_percent_based_radii())
    }

    /// Write the opaque insets for a `width` x `height` box into `trbl`
    /// (top, right, bottom, left). All four are NaN when no fill is fully
    /// opaque.
    ///
    /// Fills are folded in paint order. A fill whose opaque rectangle lies
    /// inside the current one changes nothing; one that contains the current
    /// rectangle replaces it; a partially overlapping one shrinks the result
    /// to the per-edge maximum.
    pub fn compute_opaque_insets(&self, width: f64, height: f64, trbl: &mut [f64; 4]) {
        *trbl = match self.opaque_insets(width, height) {
            Some(insets) => insets.to_array(),
            None => [f64::NAN; 4],
        };
    }

    /// The opaque insets as a value, `None` when nothing is opaque.
    pub fn opaque_insets(&self, width: f64, height: f64) -> Option<Insets> {
        let mut acc: Option<Insets> = None;
        for fill in &self.fills {
            let Some(next) = fill.opaque_region(width, height) else {
                continue;
            };
            acc = Some(match acc {
                None => next,
                Some(cur) => fold_opaque(cur, next),
            });
        }
        acc
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::EMPTY
    }
}

fn fold_opaque(cur: Insets, next: Insets) -> Insets {
    let inside = next.top >= cur.top
        && next.right >= cur.right
        && next.bottom >= cur.bottom
        && next.left >= cur.left;
    if inside {
        return cur;
    }
    let covers = next.top <= cur.top
        && next.right <= cur.right
        && next.bottom <= cur.bottom
        && next.left <= cur.left;
    if covers {
        return next;
    }
    cur.edge_max(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Image;
    use crate::paint::Color;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn fill_with(insets: Insets) -> BackgroundFill {
        BackgroundFill::new(Color::rgb(1.0, 0.0, 0.0), None, Some(insets))
    }

    fn hash_of(bg: &Background) -> u64 {
        let mut h = DefaultHasher::new();
        bg.hash(&mut h);
        h.finish()
    }

    #[test]
    fn outsets_take_the_largest_bleed_per_edge() {
        let fills: Vec<BackgroundFill> = [
            Insets::new(-1.0, 5.0, 5.0, 5.0),
            Insets::new(8.0, 8.0, 8.0, 8.0),
            Insets::new(2.0, -1.0, 3.0, 5.0),
            Insets::new(-7.0, -2.0, 4.0, 4.0),
            Insets::new(0.0, 0.0, -8.0, 0.0),
            Insets::new(4.0, -1.0, 3.0, 5.0),
            Insets::new(0.0, 0.0, 0.0, -8.0),
        ]
        .into_iter()
        .map(fill_with)
        .collect();
        let bg = Background::with_fills(&fills);
        assert_eq!(bg.outsets(), Insets::new(7.0, 2.0, 8.0, 8.0));
    }

    #[test]
    fn images_do_not_contribute_outsets() {
        let img = BackgroundImage::new(Image::unresolved("a.png"), None, None, None, None);
        let bg = Background::with_images(&[img]);
        assert_eq!(bg.outsets(), Insets::EMPTY);
    }

    #[test]
    fn optional_entries_are_filtered_in_order() {
        let a = fill_with(Insets::uniform(1.0));
        let b = fill_with(Insets::uniform(2.0));
        let bg = Background::from_optional(
            Some(&[None, Some(a.clone()), None, Some(b.clone())][..]),
            None,
        );
        assert_eq!(bg.fills(), &[a, b]);
        assert!(bg.images().is_empty());
    }

    #[test]
    fn missing_slices_give_an_empty_background() {
        let bg = Background::from_optional(None, None);
        assert!(bg.is_empty());
        assert_eq!(bg, Background::EMPTY);
    }

    #[test]
    fn caller_storage_is_copied() {
        let mut fills = vec![Some(fill_with(Insets::uniform(1.0)))];
        let bg = Background::from_optional(Some(fills.as_slice()), None);
        fills[0] = Some(fill_with(Insets::uniform(9.0)));
        fills.push(None);
        assert_eq!(bg.fills().len(), 1);
        assert_eq!(*bg.fills()[0].insets(), Insets::uniform(1.0));
    }

    #[test]
    fn slice_and_iterator_constructors_agree() {
        let fills = [fill_with(Insets::uniform(1.0)), fill_with(Insets::uniform(2.0))];
        let a = Background::with_fills(&fills);
        let b = Background::new(fills.to_vec(), Vec::new());
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn no_fills_means_no_opaque_insets() {
        let mut trbl = [0.0; 4];
        Background::EMPTY.compute_opaque_insets(100.0, 50.0, &mut trbl);
        assert!(trbl.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn transparent_fills_mean_no_opaque_insets() {
        let bg = Background::with_fills(&[
            BackgroundFill::new(Color::TRANSPARENT, None, None),
            BackgroundFill::new(Color::rgba(0.2, 0.4, 0.6, 0.0), None, None),
        ]);
        let mut trbl = [0.0; 4];
        bg.compute_opaque_insets(100.0, 50.0, &mut trbl);
        assert!(trbl.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn transparent_layers_are_skipped() {
        let bg = Background::with_fills(&[
            BackgroundFill::new(Color::TRANSPARENT, None, None),
            fill_with(Insets::uniform(1.0)),
        ]);
        let mut trbl = [0.0; 4];
        bg.compute_opaque_insets(100.0, 50.0, &mut trbl);
        assert_eq!(trbl, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn largest_nested_fill_wins() {
        let bg = Background::with_fills(&[
            fill_with(Insets::uniform(0.0)),
            fill_with(Insets::uniform(1.0)),
            fill_with(Insets::uniform(2.0)),
        ]);
        assert_eq!(bg.opaque_insets(100.0, 50.0), Some(Insets::EMPTY));

        let reversed = Background::with_fills(&[
            fill_with(Insets::uniform(2.0)),
            fill_with(Insets::uniform(1.0)),
            fill_with(Insets::uniform(0.0)),
        ]);
        assert_eq!(reversed.opaque_insets(100.0, 50.0), Some(Insets::EMPTY));
    }

    #[test]
    fn edge_nibbles_inside_a_full_fill_are_ignored() {
        let bg = Background::with_fills(&[
            fill_with(Insets::EMPTY),
            fill_with(Insets::new(10.0, 0.0, 0.0, 0.0)),
            fill_with(Insets::new(0.0, 10.0, 0.0, 0.0)),
            fill_with(Insets::new(0.0, 0.0, 10.0, 0.0)),
            fill_with(Insets::new(0.0, 0.0, 0.0, 10.0)),
        ]);
        assert_eq!(bg.opaque_insets(100.0, 50.0), Some(Insets::EMPTY));
    }

    #[test]
    fn offset_fills_shrink_to_the_common_rectangle() {
        let bg = Background::with_fills(&[
            fill_with(Insets::new(10.0, 0.0, 0.0, 0.0)),
            fill_with(Insets::new(0.0, 0.0, 0.0, 10.0)),
        ]);
        assert_eq!(bg.opaque_insets(100.0, 50.0), Some(Insets::new(10.0, 0.0, 0.0, 10.0)));
    }

    #[test]
    fn uniform_radius_pulls_edges_in_by_half() {
        let radii = CornerRadii::uniform(3.0).unwrap();
        let bg = Background::with_fills(&[BackgroundFill::new(Color::BLACK, Some(radii), None)]);
        let mut trbl = [0.0; 4];
        bg.compute_opaque_insets(100.0, 50.0, &mut trbl);
        assert_eq!(trbl, [1.5, 1.5, 1.5, 1.5]);
    }

    #[test]
    fn single_corner_radius_bounds_both_touching_edges() {
        let radii = CornerRadii::corners(0.0, 8.0, 0.0, 0.0, false).unwrap();
        let bg = Background::with_fills(&[BackgroundFill::new(Color::BLACK, Some(radii), None)]);
        assert_eq!(bg.opaque_insets(100.0, 50.0), Some(Insets::new(4.0, 4.0, 0.0, 0.0)));
    }

    #[test]
    fn percentage_radii_are_reported() {
        let radii = CornerRadii::uniform_percent(0.5, true).unwrap();
        let bg = Background::with_fills(&[BackgroundFill::new(Color::BLACK, Some(radii), None)]);
        assert!(bg.is_fill_percentage_based());
        assert!(!Background::fill(Color::BLACK).is_fill_percentage_based());
    }
}
