//! `-fx-border-*` properties to a [`Border`].

use log::debug;

use crate::border::{
    Border, BorderImage, BorderRepeat, BorderStroke, BorderStrokeStyle, BorderWidths,
    StrokeLineCap, StrokeLineJoin, StrokeType,
};
use crate::css::tokens::Component;
use crate::css::values::{self, PaintValue, Size};
use crate::css::{cycled, layer_list, parsed, reused, Aggregate, Declarations};
use crate::image::ImageLoader;
use crate::paint::Paint;

pub(crate) fn resolve(
    decls: &Declarations,
    font_size: f64,
    loader: &dyn ImageLoader,
) -> Aggregate<Border> {
    let colors = layer_list(decls, "-fx-border-color");
    let sources = layer_list(decls, "-fx-border-image-source");
    if colors.is_none() && sources.is_none() {
        return Aggregate::Unset;
    }

    let strokes = colors
        .map(|c| strokes(decls, &c, font_size))
        .unwrap_or_default();
    let images = sources
        .map(|s| images(decls, &s, font_size, loader))
        .unwrap_or_default();
    if strokes.is_empty() && images.is_empty() {
        return Aggregate::Cleared;
    }
    Aggregate::Set(Border::new(strokes, images))
}

fn strokes(decls: &Declarations, colors: &[Vec<Component>], font_size: f64) -> Vec<BorderStroke> {
    let styles = parsed(decls, "-fx-border-style", stroke_styles);
    let widths = parsed(decls, "-fx-border-width", |l| widths(l, font_size));
    let radii = parsed(decls, "-fx-border-radius", |l| values::radii(l, font_size));
    let insets = parsed(decls, "-fx-border-insets", |l| values::insets(l, font_size));

    let mut strokes = Vec::new();
    for (i, layer) in colors.iter().enumerate() {
        let Some(paints) = side_paints(layer) else {
            debug!("-fx-border-color layer {} is not a paint list, skipped", i);
            continue;
        };
        let Some(paints) = paints else {
            continue;
        };
        let styles = reused(&styles, i).flatten().unwrap_or_else(|| {
            let solid = BorderStrokeStyle::SOLID;
            [solid.clone(), solid.clone(), solid.clone(), solid]
        });
        strokes.push(BorderStroke::with_sides(
            paints,
            styles,
            reused(&radii, i).flatten(),
            reused(&widths, i).flatten(),
            reused(&insets, i).flatten(),
        ));
    }
    strokes
}

/// One to four paints for the sides of a layer. `Some(None)` for `none`.
fn side_paints(layer: &[Component]) -> Option<Option<[Paint; 4]>> {
    if values::is_none(layer) {
        return Some(None);
    }
    let paints = values::all(layer, |c| match values::paint(std::slice::from_ref(c)) {
        Some(PaintValue::Paint(p)) => Some(p),
        _ => None,
    })?;
    let [top, right, bottom, left] = expand_indices(paints.len())?;
    Some(Some([
        paints[top].clone(),
        paints[right].clone(),
        paints[bottom].clone(),
        paints[left].clone(),
    ]))
}

/// Side expansion for values that are not `Copy`.
fn expand_indices(len: usize) -> Option<[usize; 4]> {
    let indices: Vec<usize> = (0..len).collect();
    values::expand_sides(&indices)
}

fn widths(layer: &[Component], font_size: f64) -> Option<BorderWidths> {
    let sizes = values::all(layer, |c| values::border_width(c, font_size))?;
    let [t, r, b, l] = values::expand_sides(&sizes)?;
    side_widths([t, r, b, l])
}

fn side_widths(sizes: [Size; 4]) -> Option<BorderWidths> {
    BorderWidths::new(sizes.map(|s| s.value), sizes.map(|s| s.percent)).ok()
}

fn dash_style(c: &Component) -> Option<BorderStrokeStyle> {
    match c {
        Component::Ident(name) => match name.as_str() {
            "none" | "hidden" => Some(BorderStrokeStyle::NONE),
            "solid" => Some(BorderStrokeStyle::SOLID),
            "dotted" => Some(BorderStrokeStyle::dotted()),
            "dashed" => Some(BorderStrokeStyle::dashed()),
            _ => None,
        },
        Component::Function { name, args, .. } if name == "segments" => {
            let dashes = args
                .iter()
                .filter(|a| **a != Component::Comma)
                .map(|a| values::length(a, 0.0))
                .collect::<Option<Vec<f64>>>()?;
            Some(BorderStrokeStyle::new(
                StrokeType::Inside,
                StrokeLineJoin::Miter,
                StrokeLineCap::Butt,
                10.0,
                0.0,
                dashes,
            ))
        }
        _ => None,
    }
}

/// `<dash-style>{1,4} [phase <n>] [centered|inside|outside]
/// [line-join miter <n> | bevel | round] [line-cap square|butt|round]`
fn stroke_styles(layer: &[Component]) -> Option<[BorderStrokeStyle; 4]> {
    let mut dashes = Vec::new();
    let mut rest = layer;
    while let Some((first, tail)) = rest.split_first() {
        match dash_style(first) {
            Some(style) => {
                dashes.push(style);
                rest = tail;
            }
            None => break,
        }
    }
    if dashes.is_empty() {
        return None;
    }

    let mut stroke_type = StrokeType::Inside;
    let mut line_join = StrokeLineJoin::Miter;
    let mut line_cap = None;
    let mut miter_limit = 10.0;
    let mut phase = 0.0;
    while let Some((first, tail)) = rest.split_first() {
        rest = tail;
        match first.ident()? {
            "phase" => {
                let (value, tail) = rest.split_first()?;
                phase = values::length(value, 0.0)?;
                rest = tail;
            }
            "centered" => stroke_type = StrokeType::Centered,
            "inside" => stroke_type = StrokeType::Inside,
            "outside" => stroke_type = StrokeType::Outside,
            "line-join" => {
                let (join, tail) = rest.split_first()?;
                rest = tail;
                line_join = match join.ident()? {
                    "miter" => {
                        if let Some((limit, tail)) = rest.split_first() {
                            if let Some(v) = values::length(limit, 0.0) {
                                miter_limit = v;
                                rest = tail;
                            }
                        }
                        StrokeLineJoin::Miter
                    }
                    "bevel" => StrokeLineJoin::Bevel,
                    "round" => StrokeLineJoin::Round,
                    _ => return None,
                };
            }
            "line-cap" => {
                let (cap, tail) = rest.split_first()?;
                rest = tail;
                line_cap = Some(match cap.ident()? {
                    "square" => StrokeLineCap::Square,
                    "butt" => StrokeLineCap::Butt,
                    "round" => StrokeLineCap::Round,
                    _ => return None,
                });
            }
            _ => return None,
        }
    }

    let apply = |dash: &BorderStrokeStyle| {
        if dash.is_none() {
            return BorderStrokeStyle::NONE;
        }
        BorderStrokeStyle::new(
            stroke_type,
            line_join,
            line_cap.unwrap_or(dash.line_cap()),
            miter_limit,
            phase,
            dash.dash_array().to_vec(),
        )
    };
    let [t, r, b, l] = expand_indices(dashes.len())?;
    Some([
        apply(&dashes[t]),
        apply(&dashes[r]),
        apply(&dashes[b]),
        apply(&dashes[l]),
    ])
}

fn images(
    decls: &Declarations,
    sources: &[Vec<Component>],
    font_size: f64,
    loader: &dyn ImageLoader,
) -> Vec<BorderImage> {
    let slices = parsed(decls, "-fx-border-image-slice", slices);
    let widths = parsed(decls, "-fx-border-image-width", |l| image_widths(l, font_size));
    let insets = parsed(decls, "-fx-border-image-insets", |l| values::insets(l, font_size));
    let repeats = parsed(decls, "-fx-border-image-repeat", repeat);

    let mut images = Vec::new();
    for (i, layer) in sources.iter().enumerate() {
        if values::is_none(layer) {
            continue;
        }
        let Some(url) = values::url(layer) else {
            debug!("-fx-border-image-source layer {} is not a url, skipped", i);
            continue;
        };
        let (slices, filled) = match cycled(&slices, i).flatten() {
            Some((s, f)) => (Some(s), f),
            None => (None, false),
        };
        let (repeat_x, repeat_y) = match cycled(&repeats, i).flatten() {
            Some((x, y)) => (Some(x), Some(y)),
            None => (None, None),
        };
        images.push(BorderImage::new(
            loader.load_or_unresolved(url),
            cycled(&widths, i).flatten(),
            cycled(&insets, i).flatten(),
            slices,
            filled,
            repeat_x,
            repeat_y,
        ));
    }
    images
}

/// One to four numbers or percentages, optionally with `fill` before or after.
fn slices(layer: &[Component]) -> Option<(BorderWidths, bool)> {
    let filled = layer.iter().any(|c| c.is_ident("fill"));
    let sizes = values::all(
        &layer
            .iter()
            .filter(|c| !c.is_ident("fill"))
            .cloned()
            .collect::<Vec<_>>(),
        |c| match c {
            Component::Number(_) | Component::Percentage(_) => values::size(c, 0.0),
            _ => None,
        },
    )?;
    let widths = side_widths(values::expand_sides(&sizes)?)?;
    Some((widths, filled))
}

fn image_widths(layer: &[Component], font_size: f64) -> Option<BorderWidths> {
    let sizes = values::all(layer, |c| {
        if c.is_ident("auto") {
            Some(Size::abs(BorderWidths::AUTO))
        } else {
            values::size(c, font_size)
        }
    })?;
    side_widths(values::expand_sides(&sizes)?)
}

fn repeat_keyword(c: &Component) -> Option<BorderRepeat> {
    match c.ident()? {
        "stretch" => Some(BorderRepeat::Stretch),
        "repeat" => Some(BorderRepeat::Repeat),
        "round" => Some(BorderRepeat::Round),
        "space" => Some(BorderRepeat::Space),
        _ => None,
    }
}

fn repeat(layer: &[Component]) -> Option<(BorderRepeat, BorderRepeat)> {
    match layer {
        [both] => repeat_keyword(both).map(|r| (r, r)),
        [x, y] => Some((repeat_keyword(x)?, repeat_keyword(y)?)),
        _ => None,
    }
}
