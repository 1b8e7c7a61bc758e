//! Conversions from component values to typed values.
//!
//! Every function here returns `None` on input it does not understand; the
//! callers decide on the fallback and log it.

use crate::background::{CornerRadii, Radius};
use crate::css::tokens::Component;
use crate::geometry::Insets;
use crate::paint::{Color, LinearGradient, Paint, Stop};

/// A length that is either absolute (in px) or a fraction of some extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Size {
    pub value: f64,
    pub percent: bool,
}

impl Size {
    pub(crate) fn abs(value: f64) -> Self {
        Self {
            value,
            percent: false,
        }
    }

    fn radius(self) -> Radius {
        Radius {
            value: self.value,
            percent: self.percent,
        }
    }
}

/// Pixels per unit for absolute units.
fn unit_scale(unit: &str, font_size: f64) -> Option<f64> {
    match unit {
        "px" => Some(1.0),
        "em" => Some(font_size),
        "pt" => Some(4.0 / 3.0),
        "pc" => Some(16.0),
        "in" => Some(96.0),
        "cm" => Some(96.0 / 2.54),
        "mm" => Some(96.0 / 25.4),
        _ => None,
    }
}

pub(crate) fn size(c: &Component, font_size: f64) -> Option<Size> {
    match c {
        Component::Number(v) => Some(Size::abs(*v)),
        Component::Percentage(f) => Some(Size {
            value: *f,
            percent: true,
        }),
        Component::Dimension(v, unit) => unit_scale(unit, font_size).map(|s| Size::abs(v * s)),
        _ => None,
    }
}

/// An absolute length; percentages are rejected.
pub(crate) fn length(c: &Component, font_size: f64) -> Option<f64> {
    size(c, font_size).filter(|s| !s.percent).map(|s| s.value)
}

/// A border width: a size or one of `thin`, `medium`, `thick`.
pub(crate) fn border_width(c: &Component, font_size: f64) -> Option<Size> {
    match c.ident() {
        Some("thin") => Some(Size::abs(1.0)),
        Some("medium") => Some(Size::abs(3.0)),
        Some("thick") => Some(Size::abs(5.0)),
        _ => size(c, font_size),
    }
}

/// Expand one to four values into top, right, bottom, left. Values past the
/// fourth are ignored.
pub(crate) fn expand_sides<T: Copy>(values: &[T]) -> Option<[T; 4]> {
    match *values {
        [] => None,
        [a] => Some([a, a, a, a]),
        [a, b] => Some([a, b, a, b]),
        [a, b, c] => Some([a, b, c, b]),
        [a, b, c, d, ..] => Some([a, b, c, d]),
    }
}

/// Map every component with `f`, failing if any component fails.
pub(crate) fn all<T>(layer: &[Component], f: impl Fn(&Component) -> Option<T>) -> Option<Vec<T>> {
    layer.iter().map(f).collect()
}

pub(crate) fn insets(layer: &[Component], font_size: f64) -> Option<Insets> {
    let values = all(layer, |c| length(c, font_size))?;
    let [top, right, bottom, left] = expand_sides(&values)?;
    Some(Insets::new(top, right, bottom, left))
}

/// Corner radii: `h [h h h] [/ v [v v v]]`, each side of the slash
/// expanded to top-left, top-right, bottom-right, bottom-left.
pub(crate) fn radii(layer: &[Component], font_size: f64) -> Option<CornerRadii> {
    let mut parts = layer.split(|c| *c == Component::Slash);
    let horizontal = all(parts.next()?, |c| size(c, font_size))?;
    let horizontal = expand_sides(&horizontal)?;
    let vertical = match parts.next() {
        Some(v) => expand_sides(&all(v, |c| size(c, font_size))?)?,
        None => horizontal,
    };
    if parts.next().is_some() {
        return None;
    }
    let [tlh, trh, brh, blh] = horizontal.map(Size::radius);
    let [tlv, trv, brv, blv] = vertical.map(Size::radius);
    CornerRadii::new([tlh, tlv, trv, trh, brh, brv, blv, blh]).ok()
}

/// A paint layer value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PaintValue {
    Paint(Paint),
    /// `null` or `none`.
    None,
}

pub(crate) fn paint(layer: &[Component]) -> Option<PaintValue> {
    match layer {
        [single] => single_paint(single),
        _ => None,
    }
}

fn single_paint(c: &Component) -> Option<PaintValue> {
    match c {
        Component::Ident(name) if name == "null" || name == "none" => Some(PaintValue::None),
        Component::Function { name, args, .. } if name == "linear-gradient" => {
            linear_gradient(args).map(|g| PaintValue::Paint(Paint::LinearGradient(g)))
        }
        _ => color(c).map(|c| PaintValue::Paint(Paint::Color(c))),
    }
}

pub(crate) fn color(c: &Component) -> Option<Color> {
    match c {
        Component::Ident(name) => Color::parse(name),
        Component::Hash(hex) => Color::parse(&format!("#{}", hex)),
        Component::Function { name, raw, .. }
            if matches!(name.as_str(), "rgb" | "rgba" | "hsl" | "hsla" | "hwb") =>
        {
            Color::parse(raw)
        }
        _ => None,
    }
}

/// `linear-gradient([to <side> [<side>] | <angle>,] <color> [<percentage>], ...)`
fn linear_gradient(args: &[Component]) -> Option<LinearGradient> {
    let parts: Vec<&[Component]> = args.split(|c| *c == Component::Comma).collect();
    let (direction, stop_parts) = match parts.first()? {
        [Component::Ident(to), rest @ ..] if to == "to" => (side_direction(rest)?, &parts[1..]),
        [Component::Dimension(v, unit)] if angle_unit(unit).is_some() => {
            (angle_direction(v * angle_unit(unit)?), &parts[1..])
        }
        _ => (((0.0, 0.0), (0.0, 1.0)), &parts[..]),
    };

    if stop_parts.len() < 2 {
        return None;
    }
    let last = (stop_parts.len() - 1) as f64;
    let stops = stop_parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let (first, rest) = part.split_first()?;
            let color = color(first)?;
            let offset = match rest {
                [] => i as f64 / last,
                [Component::Percentage(f)] => *f,
                _ => return None,
            };
            Some(Stop { offset, color })
        })
        .collect::<Option<Vec<Stop>>>()?;

    Some(LinearGradient::new(direction.0, direction.1, true, stops))
}

type Direction = ((f64, f64), (f64, f64));

fn side_direction(sides: &[Component]) -> Option<Direction> {
    let (mut x, mut y) = ((0.0, 0.0), (0.0, 0.0));
    if sides.is_empty() || sides.len() > 2 {
        return None;
    }
    for side in sides {
        match side.ident()? {
            "left" => x = (1.0, 0.0),
            "right" => x = (0.0, 1.0),
            "top" => y = (1.0, 0.0),
            "bottom" => y = (0.0, 1.0),
            _ => return None,
        }
    }
    Some(((x.0, y.0), (x.1, y.1)))
}

/// Radians per unit.
fn angle_unit(unit: &str) -> Option<f64> {
    match unit {
        "deg" => Some(std::f64::consts::PI / 180.0),
        "rad" => Some(1.0),
        "grad" => Some(std::f64::consts::PI / 200.0),
        "turn" => Some(2.0 * std::f64::consts::PI),
        _ => None,
    }
}

/// Zero points up, angles grow clockwise.
fn angle_direction(radians: f64) -> Direction {
    let dx = radians.sin() / 2.0;
    let dy = -radians.cos() / 2.0;
    ((0.5 - dx, 0.5 - dy), (0.5 + dx, 0.5 + dy))
}

/// The URL of an image reference (`url(...)` or a bare string).
pub(crate) fn url(layer: &[Component]) -> Option<&str> {
    match layer {
        [Component::Url(u)] | [Component::Str(u)] => Some(u.as_str()),
        _ => None,
    }
}

/// True for a layer consisting of only `null` or `none`.
pub(crate) fn is_none(layer: &[Component]) -> bool {
    matches!(layer, [c] if c.is_ident("null") || c.is_ident("none"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::tokens::components;

    #[test]
    fn units_convert_to_pixels() {
        let c = components("2em 3pt 1in 2.54cm 10%");
        assert_eq!(length(&c[0], 12.0), Some(24.0));
        assert!((length(&c[1], 12.0).unwrap() - 4.0).abs() < 1e-9);
        assert_eq!(length(&c[2], 12.0), Some(96.0));
        assert!((length(&c[3], 12.0).unwrap() - 96.0).abs() < 1e-9);
        assert_eq!(length(&c[4], 12.0), None);
        assert_eq!(size(&c[4], 12.0), Some(Size { value: 0.1, percent: true }));
    }

    #[test]
    fn side_expansion() {
        assert_eq!(expand_sides(&[1]), Some([1, 1, 1, 1]));
        assert_eq!(expand_sides(&[1, 2]), Some([1, 2, 1, 2]));
        assert_eq!(expand_sides(&[1, 2, 3]), Some([1, 2, 3, 2]));
        assert_eq!(expand_sides(&[1, 2, 3, 4, 5]), Some([1, 2, 3, 4]));
        assert_eq!(expand_sides::<i32>(&[]), None);
    }

    #[test]
    fn slash_separates_horizontal_and_vertical_radii() {
        let r = radii(&components("2px 1px 4px / 0.5px 3px"), 12.0).unwrap();
        assert_eq!(r.top_left_horizontal().value, 2.0);
        assert_eq!(r.top_right_horizontal().value, 1.0);
        assert_eq!(r.bottom_right_horizontal().value, 4.0);
        assert_eq!(r.bottom_left_horizontal().value, 1.0);
        assert_eq!(r.top_left_vertical().value, 0.5);
        assert_eq!(r.top_right_vertical().value, 3.0);
        assert_eq!(r.bottom_right_vertical().value, 0.5);
        assert_eq!(r.bottom_left_vertical().value, 3.0);
    }

    #[test]
    fn percentage_radii_keep_their_flag() {
        let r = radii(&components("50%"), 12.0).unwrap();
        assert!(r.has_percent_based_radii());
        assert_eq!(r.top_left_horizontal().value, 0.5);
    }

    #[test]
    fn paints() {
        assert_eq!(
            paint(&components("red")),
            Some(PaintValue::Paint(Color::rgb(1.0, 0.0, 0.0).into()))
        );
        assert_eq!(paint(&components("#00ff00")), Some(PaintValue::Paint(Color::rgb(0.0, 1.0, 0.0).into())));
        assert_eq!(paint(&components("none")), Some(PaintValue::None));
        assert_eq!(paint(&components("not-a-color")), None);
        match paint(&components("rgba(0, 0, 255, 0)")) {
            Some(PaintValue::Paint(p)) => assert!(p.is_transparent()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn gradient_direction_and_stops() {
        let c = components("linear-gradient(to right, red, blue 80%, white)");
        let Some(PaintValue::Paint(Paint::LinearGradient(g))) = paint(&c) else {
            panic!("expected gradient");
        };
        assert_eq!((g.start_x, g.start_y, g.end_x, g.end_y), (0.0, 0.0, 1.0, 0.0));
        let offsets: Vec<f64> = g.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.8, 1.0]);
        assert!(Paint::LinearGradient(g).is_opaque());
    }

    #[test]
    fn angle_gradient_points_along_the_angle() {
        let c = components("linear-gradient(90deg, black, white)");
        let Some(PaintValue::Paint(Paint::LinearGradient(g))) = paint(&c) else {
            panic!("expected gradient");
        };
        assert!((g.start_x - 0.0).abs() < 1e-9);
        assert!((g.end_x - 1.0).abs() < 1e-9);
        assert!((g.start_y - 0.5).abs() < 1e-9);
    }
}
