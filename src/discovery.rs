//! Declarative configuration from element attributes.
//!
//! Elements opt in with the [`MARKER_ATTR`] attribute and configure the
//! animation through sibling `data-typewriter-*` attributes:
//!
//! ```html
//! <span data-typewriter
//!       data-typewriter-texts="Fast|Reliable|Small"
//!       data-typewriter-speed="80"
//!       data-typewriter-loop="false"></span>
//! ```

use tracing::{debug, info, warn};

use crate::config::{
    DEFAULT_CURSOR_CHAR, DEFAULT_DELETE_SPEED, DEFAULT_PAUSE_TIME, DEFAULT_TEXT, DEFAULT_TYPE_SPEED,
};
use crate::surface::TextSurface;
use crate::{LoopMode, Typewriter, TypewriterError, TypewriterOptions};

pub const MARKER_ATTR: &str = "data-typewriter";
pub const TEXTS_ATTR: &str = "data-typewriter-texts";
pub const SPEED_ATTR: &str = "data-typewriter-speed";
pub const DELETE_SPEED_ATTR: &str = "data-typewriter-delete-speed";
pub const PAUSE_ATTR: &str = "data-typewriter-pause";
pub const LOOP_ATTR: &str = "data-typewriter-loop";
pub const CURSOR_ATTR: &str = "data-typewriter-cursor";
pub const CURSOR_CHAR_ATTR: &str = "data-typewriter-cursor-char";
pub const DELAY_ATTR: &str = "data-typewriter-delay";

/// Separator between texts in [`TEXTS_ATTR`].
pub const TEXT_SEPARATOR: char = '|';

/// Read access to an element's attributes.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;
}

/// A document that can be scanned for marked elements.
pub trait DiscoveryHost {
    type Element: AttributeSource;
    type Surface: TextSurface;

    /// Every element carrying [`MARKER_ATTR`], in document order.
    fn marked_elements(&self) -> Vec<Self::Element>;

    /// Turn a marked element into a surface.
    fn surface(&self, element: &Self::Element) -> Result<Self::Surface, TypewriterError>;
}

/// Parse a leading integer the way browsers parse integer attributes.
///
/// Leading whitespace and a `+` sign are accepted and trailing characters
/// ignored, so `"150ms"` is 150. Anything without leading digits, negative
/// values and overflows yield `None`.
pub fn parse_int(value: &str) -> Option<u32> {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

/// Any value other than the literal `"false"` enables the flag.
pub fn parse_flag(value: Option<&str>) -> bool {
    value != Some("false")
}

/// Split a pipe-delimited text list.
///
/// A missing or empty attribute yields the placeholder text.
pub fn parse_texts(value: Option<&str>) -> Vec<String> {
    match value {
        Some(list) if !list.is_empty() => list.split(TEXT_SEPARATOR).map(str::to_string).collect(),
        _ => vec![DEFAULT_TEXT.to_string()],
    }
}

fn int_attr<E: AttributeSource>(element: &E, name: &str, default: u32) -> u32 {
    match element.attribute(name) {
        Some(raw) => parse_int(&raw).unwrap_or_else(|| {
            debug!(attribute = name, value = %raw, default, "non-numeric attribute, using default");
            default
        }),
        None => default,
    }
}

/// Build options from an element's attributes.
///
/// Missing or malformed values fall back to their defaults; this never fails.
pub fn options_from_attributes<E: AttributeSource>(element: &E) -> TypewriterOptions {
    let cursor_char = element
        .attribute(CURSOR_CHAR_ATTR)
        .filter(|glyph| !glyph.is_empty())
        .unwrap_or_else(|| DEFAULT_CURSOR_CHAR.to_string());

    TypewriterOptions {
        texts: parse_texts(element.attribute(TEXTS_ATTR).as_deref()),
        type_speed: int_attr(element, SPEED_ATTR, DEFAULT_TYPE_SPEED),
        delete_speed: int_attr(element, DELETE_SPEED_ATTR, DEFAULT_DELETE_SPEED),
        pause_time: int_attr(element, PAUSE_ATTR, DEFAULT_PAUSE_TIME),
        loop_mode: LoopMode::from(parse_flag(element.attribute(LOOP_ATTR).as_deref())),
        cursor: parse_flag(element.attribute(CURSOR_ATTR).as_deref()),
        cursor_char,
        start_delay: int_attr(element, DELAY_ATTR, 0),
        ..TypewriterOptions::default()
    }
}

/// Create one typewriter per marked element, in document order.
///
/// Elements whose surface cannot be built are logged and skipped. The
/// returned typewriters are not initialized yet.
pub fn discover<H: DiscoveryHost>(host: &H) -> Vec<Typewriter<H::Surface>> {
    let elements = host.marked_elements();
    let mut typewriters = Vec::with_capacity(elements.len());

    for (index, element) in elements.iter().enumerate() {
        let options = options_from_attributes(element);
        match host.surface(element) {
            Ok(surface) => {
                debug!(index, texts = options.texts.len(), "typewriter element discovered");
                typewriters.push(Typewriter::new(surface, options));
            }
            Err(err) => warn!(index, error = %err, "skipping typewriter element"),
        }
    }

    info!(found = elements.len(), created = typewriters.len(), "typewriter discovery finished");
    typewriters
}
