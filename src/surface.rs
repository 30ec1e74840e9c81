//! Display surfaces a typewriter renders into.

use std::cell::RefCell;
use std::rc::Rc;

use crate::TypewriterError;

/// Class applied to a surface while the cursor is shown.
pub const CURSOR_CLASS: &str = "typewriter-cursor";
/// Custom property carrying the quoted cursor glyph.
pub const CURSOR_CHAR_PROPERTY: &str = "--cursor-char";

/// A single display target owned by one typewriter.
///
/// The cursor is a styling concern: it must never become part of the text
/// content written through [`TextSurface::set_text`].
pub trait TextSurface {
    /// Replace the displayed text.
    fn set_text(&mut self, text: &str);

    /// Tag the surface so the cursor glyph renders after its text.
    fn show_cursor(&mut self, glyph: &str);

    /// Remove cursor styling.
    fn hide_cursor(&mut self);
}

/// Resolves a lookup key (e.g. a CSS selector) to a surface.
pub trait TargetResolver {
    type Surface: TextSurface;

    fn resolve(&self, key: &str) -> Option<Self::Surface>;
}

/// Value written to [`CURSOR_CHAR_PROPERTY`] for a glyph.
pub fn cursor_char_value(glyph: &str) -> String {
    format!("\"{}\"", glyph.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Generates the CSS that renders and blinks the cursor.
///
/// Hosts inject this once; every surface tagged with [`CURSOR_CLASS`] picks
/// its glyph from [`CURSOR_CHAR_PROPERTY`].
pub fn cursor_stylesheet() -> String {
    format!(
        r#"
.{class}::after {{
    content: var({property}, "|");
    display: inline-block;
    margin-left: 0.05em;
    animation: {class}-blink 1s step-end infinite;
}}
@keyframes {class}-blink {{
    0%, 100% {{ opacity: 1; }}
    50% {{ opacity: 0; }}
}}
"#,
        class = CURSOR_CLASS,
        property = CURSOR_CHAR_PROPERTY,
    )
}

/// Observable state of a [`MemorySurface`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySurfaceState {
    /// Currently displayed text
    pub text: String,
    /// Cursor glyph while cursor styling is applied
    pub cursor: Option<String>,
    /// Every text written, in order
    pub history: Vec<String>,
}

/// In-memory surface for native hosts and tests.
///
/// Clones share the same state, so a handle kept by the host observes what
/// the owning typewriter writes.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    state: Rc<RefCell<MemorySurfaceState>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed text.
    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    /// Cursor glyph, if cursor styling is applied.
    pub fn cursor(&self) -> Option<String> {
        self.state.borrow().cursor.clone()
    }

    /// All texts written so far.
    pub fn history(&self) -> Vec<String> {
        self.state.borrow().history.clone()
    }

    /// Snapshot of the whole state.
    pub fn snapshot(&self) -> MemorySurfaceState {
        self.state.borrow().clone()
    }
}

impl TextSurface for MemorySurface {
    fn set_text(&mut self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.text = text.to_string();
        state.history.push(text.to_string());
    }

    fn show_cursor(&mut self, glyph: &str) {
        self.state.borrow_mut().cursor = Some(glyph.to_string());
    }

    fn hide_cursor(&mut self) {
        self.state.borrow_mut().cursor = None;
    }
}

/// Named in-memory surfaces, resolvable by key.
#[derive(Clone, Debug, Default)]
pub struct MemoryResolver {
    surfaces: Vec<(String, MemorySurface)>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface under `key` and return a handle to it.
    pub fn insert(&mut self, key: impl Into<String>) -> MemorySurface {
        let surface = MemorySurface::new();
        self.surfaces.push((key.into(), surface.clone()));
        surface
    }
}

impl TargetResolver for MemoryResolver {
    type Surface = MemorySurface;

    fn resolve(&self, key: &str) -> Option<MemorySurface> {
        self.surfaces
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, s)| s.clone())
    }
}

/// Resolve `key`, turning a miss into [`TypewriterError::TargetNotFound`].
pub fn resolve_target<R: TargetResolver>(
    resolver: &R,
    key: &str,
) -> Result<R::Surface, TypewriterError> {
    resolver
        .resolve(key)
        .ok_or_else(|| TypewriterError::TargetNotFound(key.to_string()))
}

/// DOM element surfaces.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlElement};

    /// A DOM element used as a typewriter surface.
    #[derive(Clone, Debug)]
    pub struct ElementSurface {
        element: HtmlElement,
    }

    impl ElementSurface {
        pub fn new(element: HtmlElement) -> Self {
            Self { element }
        }

        /// Wrap a generic element; only HTML elements carry inline style.
        pub fn from_element(element: Element) -> Result<Self, TypewriterError> {
            element
                .dyn_into::<HtmlElement>()
                .map(Self::new)
                .map_err(|_| TypewriterError::Surface("target is not an HTML element".to_string()))
        }

        pub fn element(&self) -> &HtmlElement {
            &self.element
        }
    }

    impl TextSurface for ElementSurface {
        fn set_text(&mut self, text: &str) {
            self.element.set_text_content(Some(text));
        }

        fn show_cursor(&mut self, glyph: &str) {
            if self.element.class_list().add_1(CURSOR_CLASS).is_err() {
                tracing::warn!("failed to add cursor class");
            }
            if self
                .element
                .style()
                .set_property(CURSOR_CHAR_PROPERTY, &cursor_char_value(glyph))
                .is_err()
            {
                tracing::warn!("failed to set cursor glyph property");
            }
        }

        fn hide_cursor(&mut self) {
            if self.element.class_list().remove_1(CURSOR_CLASS).is_err() {
                tracing::warn!("failed to remove cursor class");
            }
        }
    }

    /// Resolves CSS selectors against a document.
    #[derive(Clone, Debug)]
    pub struct SelectorResolver {
        document: Document,
    }

    impl SelectorResolver {
        pub fn new(document: Document) -> Self {
            Self { document }
        }
    }

    impl TargetResolver for SelectorResolver {
        type Surface = ElementSurface;

        fn resolve(&self, key: &str) -> Option<ElementSurface> {
            // An invalid selector is treated like a selector with no match.
            let element = self.document.query_selector(key).ok().flatten()?;
            ElementSurface::from_element(element).ok()
        }
    }
}
