//! Owned component values produced from a declaration's value text.
//!
//! `cssparser` tokens borrow from the input; the resolver works on small
//! owned lists instead, split into comma separated layers.

use cssparser::{ParseError, Parser, ParserInput, Token};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Component {
    Number(f64),
    /// Stored as a fraction: `50%` is `0.5`.
    Percentage(f64),
    /// Value and lowercase unit.
    Dimension(f64, String),
    /// Lowercase identifier.
    Ident(String),
    Hash(String),
    Str(String),
    Url(String),
    Function {
        name: String,
        raw: String,
        args: Vec<Component>,
    },
    Comma,
    Slash,
    Other(String),
}

impl Component {
    pub(crate) fn ident(&self) -> Option<&str> {
        match self {
            Component::Ident(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn is_ident(&self, name: &str) -> bool {
        self.ident() == Some(name)
    }
}

/// Tokenize a value into components.
pub(crate) fn components(text: &str) -> Vec<Component> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut out = Vec::new();
    collect(&mut parser, &mut out);
    out
}

/// Split components into comma separated layers. Empty layers are kept so
/// that layer indices line up with what was written.
pub(crate) fn layers(components: &[Component]) -> Vec<Vec<Component>> {
    if components.is_empty() {
        return Vec::new();
    }
    components
        .split(|c| *c == Component::Comma)
        .map(|layer| layer.to_vec())
        .collect()
}

fn collect<'i>(parser: &mut Parser<'i, '_>, out: &mut Vec<Component>) {
    loop {
        let start = parser.position();
        let token = match parser.next() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };
        let text = parser.slice_from(start).trim().to_string();
        let component = match token {
            Token::Number { value, .. } => Component::Number(precise(&text, value)),
            Token::Percentage { unit_value, .. } => {
                let number = text.strip_suffix('%').unwrap_or(&text);
                Component::Percentage(precise(number, unit_value * 100.0) / 100.0)
            }
            Token::Dimension { value, unit, .. } => {
                let unit = unit.to_ascii_lowercase();
                let number = text
                    .get(..text.len().saturating_sub(unit.len()))
                    .unwrap_or_default();
                Component::Dimension(precise(number, value), unit)
            }
            Token::Ident(name) => Component::Ident(name.to_ascii_lowercase()),
            Token::Hash(h) | Token::IDHash(h) => Component::Hash(h.to_string()),
            Token::QuotedString(s) => Component::Str(s.to_string()),
            Token::UnquotedUrl(u) => Component::Url(u.to_string()),
            Token::Comma => Component::Comma,
            Token::Delim('/') => Component::Slash,
            Token::Function(name) => {
                let mut args = Vec::new();
                let _ = parser.parse_nested_block(|p| {
                    collect(p, &mut args);
                    Ok::<_, ParseError<'i, ()>>(())
                });
                let name = name.to_ascii_lowercase();
                let raw = parser.slice_from(start).trim().to_string();
                if name == "url" {
                    match args.first() {
                        Some(Component::Str(s)) => Component::Url(s.clone()),
                        _ => Component::Other(raw),
                    }
                } else {
                    Component::Function { name, raw, args }
                }
            }
            _ => Component::Other(text),
        };
        out.push(component);
    }
}

/// Re-read a number from its source text in full precision; the token only
/// carries an `f32`.
fn precise(text: &str, fallback: f32) -> f64 {
    text.trim().parse::<f64>().unwrap_or(fallback as f64)
}
