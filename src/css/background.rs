//! `-fx-background-*` properties to a [`Background`].

use log::debug;

use crate::background::{
    Background, BackgroundFill, BackgroundImage, BackgroundPosition, BackgroundRepeat,
    BackgroundSize,
};
use crate::css::tokens::Component;
use crate::css::values::{self, PaintValue, Size};
use crate::css::{cycled, layer_list, parsed, reused, Aggregate, Declarations};
use crate::geometry::Side;
use crate::image::ImageLoader;

pub(crate) fn resolve(
    decls: &Declarations,
    font_size: f64,
    loader: &dyn ImageLoader,
) -> Aggregate<Background> {
    let colors = layer_list(decls, "-fx-background-color");
    let sources = layer_list(decls, "-fx-background-image");
    if colors.is_none() && sources.is_none() {
        return Aggregate::Unset;
    }

    let fills = colors.map(|c| fills(decls, &c, font_size)).unwrap_or_default();
    let images = sources
        .map(|s| images(decls, &s, font_size, loader))
        .unwrap_or_default();
    if fills.is_empty() && images.is_empty() {
        return Aggregate::Cleared;
    }
    Aggregate::Set(Background::new(fills, images))
}

fn fills(decls: &Declarations, colors: &[Vec<Component>], font_size: f64) -> Vec<BackgroundFill> {
    let insets = parsed(decls, "-fx-background-insets", |l| values::insets(l, font_size));
    let radii = parsed(decls, "-fx-background-radius", |l| values::radii(l, font_size));

    let mut fills = Vec::new();
    for (i, layer) in colors.iter().enumerate() {
        let paint = match values::paint(layer) {
            Some(PaintValue::Paint(p)) => p,
            Some(PaintValue::None) => continue,
            None => {
                debug!("-fx-background-color layer {} is not a paint, skipped", i);
                continue;
            }
        };
        fills.push(BackgroundFill::new(
            paint,
            reused(&radii, i).flatten(),
            reused(&insets, i).flatten(),
        ));
    }
    fills
}

fn images(
    decls: &Declarations,
    sources: &[Vec<Component>],
    font_size: f64,
    loader: &dyn ImageLoader,
) -> Vec<BackgroundImage> {
    let repeats = parsed(decls, "-fx-background-repeat", repeat);
    let positions = parsed(decls, "-fx-background-position", |l| position(l, font_size));
    let sizes = parsed(decls, "-fx-background-size", |l| size(l, font_size));

    let mut images = Vec::new();
    for (i, layer) in sources.iter().enumerate() {
        if values::is_none(layer) {
            continue;
        }
        let Some(url) = values::url(layer) else {
            debug!("-fx-background-image layer {} is not a url, skipped", i);
            continue;
        };
        let (repeat_x, repeat_y) = match cycled(&repeats, i).flatten() {
            Some((x, y)) => (Some(x), Some(y)),
            None => (None, None),
        };
        images.push(BackgroundImage::new(
            loader.load_or_unresolved(url),
            repeat_x,
            repeat_y,
            cycled(&positions, i).flatten(),
            cycled(&sizes, i).flatten(),
        ));
    }
    images
}

fn repeat_keyword(name: &str) -> Option<BackgroundRepeat> {
    match name {
        "repeat" => Some(BackgroundRepeat::Repeat),
        "space" => Some(BackgroundRepeat::Space),
        "round" => Some(BackgroundRepeat::Round),
        "no-repeat" => Some(BackgroundRepeat::NoRepeat),
        _ => None,
    }
}

fn repeat(layer: &[Component]) -> Option<(BackgroundRepeat, BackgroundRepeat)> {
    match layer {
        [single] => match single.ident()? {
            "repeat-x" => Some((BackgroundRepeat::Repeat, BackgroundRepeat::NoRepeat)),
            "repeat-y" => Some((BackgroundRepeat::NoRepeat, BackgroundRepeat::Repeat)),
            other => repeat_keyword(other).map(|r| (r, r)),
        },
        [x, y] => Some((repeat_keyword(x.ident()?)?, repeat_keyword(y.ident()?)?)),
        _ => None,
    }
}

/// One element of a `background-position` value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PosItem {
    Side(Side),
    Center,
    Offset(Size),
}

fn pos_item(c: &Component, font_size: f64) -> Option<PosItem> {
    match c.ident() {
        Some("left") => Some(PosItem::Side(Side::Left)),
        Some("right") => Some(PosItem::Side(Side::Right)),
        Some("top") => Some(PosItem::Side(Side::Top)),
        Some("bottom") => Some(PosItem::Side(Side::Bottom)),
        Some("center") => Some(PosItem::Center),
        Some(_) => None,
        None => values::size(c, font_size).map(PosItem::Offset),
    }
}

/// Anchor side and offset along one axis.
type Anchor = (Side, Size);

const CENTER_OFFSET: Size = Size {
    value: 0.5,
    percent: true,
};
const ZERO_OFFSET: Size = Size {
    value: 0.0,
    percent: true,
};

/// CSS `background-position` with one to four components.
fn position(layer: &[Component], font_size: f64) -> Option<BackgroundPosition> {
    let items = values::all(layer, |c| pos_item(c, font_size))?;
    let (h, v) = match items.as_slice() {
        [single] => one_value_position(*single),
        [a, b] => two_value_position(*a, *b)?,
        [_, _, _] | [_, _, _, _] => keyword_offset_position(&items)?,
        _ => return None,
    };
    BackgroundPosition::new(
        Some(h.0),
        h.1.value,
        h.1.percent,
        Some(v.0),
        v.1.value,
        v.1.percent,
    )
    .ok()
}

fn one_value_position(item: PosItem) -> (Anchor, Anchor) {
    let center_h = (Side::Left, CENTER_OFFSET);
    let center_v = (Side::Top, CENTER_OFFSET);
    match item {
        PosItem::Side(side) if side.is_horizontal_anchor() => ((side, ZERO_OFFSET), center_v),
        PosItem::Side(side) => (center_h, (side, ZERO_OFFSET)),
        PosItem::Center => (center_h, center_v),
        PosItem::Offset(size) => ((Side::Left, size), center_v),
    }
}

fn two_value_position(a: PosItem, b: PosItem) -> Option<(Anchor, Anchor)> {
    let vertical_first = matches!(a, PosItem::Side(s) if s.is_vertical_anchor())
        || matches!(b, PosItem::Side(s) if s.is_horizontal_anchor());
    let (h, v) = if vertical_first { (b, a) } else { (a, b) };
    let axis = |item: PosItem, origin: Side, horizontal: bool| -> Option<Anchor> {
        match item {
            PosItem::Side(side) if side.is_horizontal_anchor() == horizontal => {
                Some((side, ZERO_OFFSET))
            }
            PosItem::Side(_) => None,
            PosItem::Center => Some((origin, CENTER_OFFSET)),
            PosItem::Offset(size) => Some((origin, size)),
        }
    };
    Some((axis(h, Side::Left, true)?, axis(v, Side::Top, false)?))
}

/// Three and four value forms: each side keyword may be followed by an
/// offset from that side.
fn keyword_offset_position(items: &[PosItem]) -> Option<(Anchor, Anchor)> {
    let mut h: Option<Anchor> = None;
    let mut v: Option<Anchor> = None;
    let mut centers = 0;
    let mut i = 0;
    while i < items.len() {
        match items[i] {
            PosItem::Side(side) => {
                let offset = match items.get(i + 1) {
                    Some(PosItem::Offset(size)) => {
                        i += 1;
                        *size
                    }
                    _ => ZERO_OFFSET,
                };
                let slot = if side.is_horizontal_anchor() { &mut h } else { &mut v };
                if slot.replace((side, offset)).is_some() {
                    return None;
                }
            }
            PosItem::Center => centers += 1,
            PosItem::Offset(_) => return None,
        }
        i += 1;
    }
    let missing = usize::from(h.is_none()) + usize::from(v.is_none());
    if centers > missing {
        return None;
    }
    Some((
        h.unwrap_or((Side::Left, CENTER_OFFSET)),
        v.unwrap_or((Side::Top, CENTER_OFFSET)),
    ))
}

const AUTO_SIZE: Size = Size {
    value: BackgroundSize::AUTO,
    percent: true,
};

fn size_dimension(c: &Component, font_size: f64) -> Option<Size> {
    if c.is_ident("auto") {
        return Some(AUTO_SIZE);
    }
    values::size(c, font_size)
}

fn size(layer: &[Component], font_size: f64) -> Option<BackgroundSize> {
    let (w, h) = match layer {
        [single] if single.is_ident("cover") => return Some(BackgroundSize::cover()),
        [single] if single.is_ident("contain") => return Some(BackgroundSize::contain()),
        [w] => (size_dimension(w, font_size)?, AUTO_SIZE),
        [w, h] => (size_dimension(w, font_size)?, size_dimension(h, font_size)?),
        _ => return None,
    };
    BackgroundSize::new(w.value, h.value, w.percent, h.percent, false, false).ok()
}
