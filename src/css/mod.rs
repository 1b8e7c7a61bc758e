//! # Style Resolution
//!
//! Turns `-fx-*` declaration text into the typed values a region carries:
//! a [`Background`], a [`Border`], padding and size overrides.
//!
//! This is not a cascade. A [`Declarations`] block is a flat map from
//! property name to value text (the last declaration of a property wins)
//! and [`StyleResolver::resolve`] reads the properties it knows from it.
//!
//! Multi-layer properties follow the backgrounds-and-borders conventions:
//!
//! - The color (or image source) property decides how many layers exist.
//! - Geometry properties of paint layers (insets, radii, border style and
//!   width) reuse their last value when they have fewer entries than there
//!   are layers. Image layer properties (repeat, position, size and the
//!   border-image family) cycle.
//! - Entries past the number of layers are ignored.
//! - A color property that is just `null` or `none` builds nothing, and the
//!   dependent properties are inert. The region's aggregate is cleared.
//!
//! Nothing here fails. Values that do not parse fall back to their defaults
//! and are reported at debug level.

mod background;
mod border;
mod tokens;
mod values;

use cssparser::{Parser, ParserInput, Token};
use log::debug;

use crate::background::Background;
use crate::border::Border;
use crate::geometry::Insets;
use crate::image::{ImageLoader, SourceLoader};
use crate::layout::SizeOverride;

use tokens::Component;

/// A parsed declaration block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    entries: Vec<(String, String)>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `name: value; name: value`. Malformed declarations are skipped;
    /// a trailing `!important` is dropped.
    pub fn parse(text: &str) -> Self {
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        let mut decls = Declarations::new();

        loop {
            parser.skip_whitespace();
            if parser.is_exhausted() {
                break;
            }

            let name = match parser.try_parse(|p| p.expect_ident().map(|n| n.to_ascii_lowercase())) {
                Ok(name) => name,
                Err(_) => {
                    skip_to_semicolon(&mut parser);
                    continue;
                }
            };
            if parser.try_parse(|p| p.expect_colon()).is_err() {
                debug!("declaration '{}' has no colon, skipped", name);
                skip_to_semicolon(&mut parser);
                continue;
            }

            let start = parser.position();
            let mut end = start;
            loop {
                let before = parser.position();
                match parser.next_including_whitespace() {
                    Ok(Token::Semicolon) => {
                        end = before;
                        break;
                    }
                    Ok(_) => end = parser.position(),
                    Err(_) => break,
                }
            }
            let value = strip_important(parser.slice(start..end).trim());
            if value.is_empty() {
                debug!("declaration '{}' has no value, skipped", name);
                continue;
            }
            decls.set(&name, value);
        }
        decls
    }

    /// Set a property, replacing an earlier value.
    pub fn set(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        self.entries.retain(|(n, _)| *n != name);
        self.entries.push((name, value.trim().to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Properties in the order they were first set.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

fn skip_to_semicolon(parser: &mut Parser<'_, '_>) {
    while let Ok(token) = parser.next() {
        if matches!(token, Token::Semicolon) {
            break;
        }
    }
}

fn strip_important(value: &str) -> &str {
    if let Some(idx) = value.rfind('!') {
        if value[idx + 1..].trim().eq_ignore_ascii_case("important") {
            return value[..idx].trim_end();
        }
    }
    value
}

/// What a declaration block says about a background or border.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate<T> {
    /// The governing property was not given; the region keeps its value.
    Unset,
    /// The governing property was given but built no layers (`null`,
    /// `none`, or nothing that parsed); the region drops its value.
    Cleared,
    Set(T),
}

impl<T> Aggregate<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Aggregate::Unset)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Aggregate::Set(value) => Some(value),
            _ => None,
        }
    }

    /// The value to store on a region, `None` for [`Aggregate::Unset`].
    pub fn to_update(&self) -> Option<Option<T>>
    where
        T: Clone,
    {
        match self {
            Aggregate::Unset => None,
            Aggregate::Cleared => Some(None),
            Aggregate::Set(value) => Some(Some(value.clone())),
        }
    }
}

impl<T> Default for Aggregate<T> {
    fn default() -> Self {
        Aggregate::Unset
    }
}

/// Everything a declaration block can say about a region. `None` means the
/// property was not given (or did not parse) and the region keeps its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionStyle {
    pub background: Aggregate<Background>,
    pub border: Aggregate<Border>,
    pub padding: Option<Insets>,
    pub min_width: Option<SizeOverride>,
    pub pref_width: Option<SizeOverride>,
    pub max_width: Option<SizeOverride>,
    pub min_height: Option<SizeOverride>,
    pub pref_height: Option<SizeOverride>,
    pub max_height: Option<SizeOverride>,
    pub snap_to_pixel: Option<bool>,
}

/// Resolves declaration blocks against a font size and an image loader.
pub struct StyleResolver {
    font_size: f64,
    loader: Box<dyn ImageLoader>,
}

impl StyleResolver {
    pub const DEFAULT_FONT_SIZE: f64 = 12.0;

    pub fn new() -> Self {
        Self {
            font_size: Self::DEFAULT_FONT_SIZE,
            loader: Box::new(SourceLoader::new()),
        }
    }

    pub fn with_image_loader(mut self, loader: impl ImageLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Font size in px used for `em` lengths.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn resolve(&self, decls: &Declarations) -> RegionStyle {
        let size = |name: &str| {
            let value = decls.get(name)?;
            let parsed = size_override(&tokens::components(value), self.font_size);
            if parsed.is_none() {
                debug!("{}: '{}' is not a size, ignored", name, value);
            }
            parsed
        };
        RegionStyle {
            background: self.background(decls),
            border: self.border(decls),
            padding: decls.get("-fx-padding").and_then(|v| {
                let parsed = values::insets(&tokens::components(v), self.font_size);
                if parsed.is_none() {
                    debug!("-fx-padding: '{}' is not a list of lengths, ignored", v);
                }
                parsed
            }),
            min_width: size("-fx-min-width"),
            pref_width: size("-fx-pref-width"),
            max_width: size("-fx-max-width"),
            min_height: size("-fx-min-height"),
            pref_height: size("-fx-pref-height"),
            max_height: size("-fx-max-height"),
            snap_to_pixel: decls
                .get("-fx-snap-to-pixel")
                .and_then(|v| match v.to_ascii_lowercase().as_str() {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                }),
        }
    }

    /// Parse and resolve declaration text in one step.
    pub fn resolve_text(&self, text: &str) -> RegionStyle {
        self.resolve(&Declarations::parse(text))
    }

    pub fn background(&self, decls: &Declarations) -> Aggregate<Background> {
        background::resolve(decls, self.font_size, self.loader.as_ref())
    }

    pub fn border(&self, decls: &Declarations) -> Aggregate<Border> {
        border::resolve(decls, self.font_size, self.loader.as_ref())
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StyleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleResolver")
            .field("font_size", &self.font_size)
            .finish_non_exhaustive()
    }
}

fn size_override(components: &[Component], font_size: f64) -> Option<SizeOverride> {
    match components {
        [c] if c.is_ident("-fx-use-computed-size") => Some(SizeOverride::Computed),
        [c] if c.is_ident("-fx-use-pref-size") => Some(SizeOverride::UsePref),
        [c] => values::length(c, font_size).map(SizeOverride::Value),
        _ => None,
    }
}

/// The comma separated layers of a property, `None` when it is not set.
pub(crate) fn layer_list(decls: &Declarations, property: &str) -> Option<Vec<Vec<Component>>> {
    let value = decls.get(property)?;
    Some(tokens::layers(&tokens::components(value)))
}

/// Parse every layer of a property, logging the layers that fail.
pub(crate) fn parsed<T>(
    decls: &Declarations,
    property: &str,
    parse: impl Fn(&[Component]) -> Option<T>,
) -> Vec<Option<T>> {
    layer_list(decls, property)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let value = parse(layer);
            if value.is_none() {
                debug!("{} layer {} could not be parsed, using the default", property, i);
            }
            value
        })
        .collect()
}

/// Entry `i`, reusing the last entry past the end.
pub(crate) fn reused<T: Clone>(list: &[T], i: usize) -> Option<T> {
    list.get(i).or_else(|| list.last()).cloned()
}

/// Entry `i`, cycling through the list.
pub(crate) fn cycled<T: Clone>(list: &[T], i: usize) -> Option<T> {
    if list.is_empty() {
        return None;
    }
    list.get(i % list.len()).cloned()
}
