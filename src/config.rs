//! Typewriter configuration.

/// Placeholder text used when no texts are configured.
pub const DEFAULT_TEXT: &str = "Hello World!";
/// Default delay between typed characters (ms).
pub const DEFAULT_TYPE_SPEED: u32 = 100;
/// Default delay between deleted characters (ms).
pub const DEFAULT_DELETE_SPEED: u32 = 50;
/// Default pause once a text is fully typed (ms).
pub const DEFAULT_PAUSE_TIME: u32 = 2000;
/// Default pause after a text is fully deleted, before the next one (ms).
pub const DEFAULT_INTER_TEXT_PAUSE: u32 = 500;
/// Default cursor glyph.
pub const DEFAULT_CURSOR_CHAR: &str = "|";

/// Loop mode for the text cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "bool", into = "bool")
)]
pub enum LoopMode {
    /// Stop after the last text is fully typed
    Once,
    /// Delete the last text and wrap back to the first
    #[default]
    Loop,
}

impl From<bool> for LoopMode {
    fn from(looping: bool) -> Self {
        if looping {
            LoopMode::Loop
        } else {
            LoopMode::Once
        }
    }
}

impl From<LoopMode> for bool {
    fn from(mode: LoopMode) -> Self {
        mode == LoopMode::Loop
    }
}

/// Options recognized by a typewriter instance.
///
/// All durations are milliseconds. Missing keys take their defaults when
/// deserialized, so a partial document is enough:
///
/// ```rust
/// use typewriter_core::{LoopMode, TypewriterOptions};
///
/// let options = TypewriterOptions::new(["Fast", "Faster"])
///     .with_type_speed(40)
///     .with_loop_mode(LoopMode::Once);
///
/// assert_eq!(options.texts.len(), 2);
/// assert_eq!(options.delete_speed, 50);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct TypewriterOptions {
    /// Texts to cycle through, in order
    pub texts: Vec<String>,
    /// Delay between typed characters
    pub type_speed: u32,
    /// Delay between deleted characters
    pub delete_speed: u32,
    /// Pause once a text is fully typed
    pub pause_time: u32,
    /// Pause once a text is fully deleted
    pub inter_text_pause: u32,
    /// Whether to restart after the last text
    #[cfg_attr(feature = "serde", serde(rename = "loop"))]
    pub loop_mode: LoopMode,
    /// Whether the cursor glyph is shown
    pub cursor: bool,
    /// Cursor glyph
    pub cursor_char: String,
    /// Delay before the first character
    pub start_delay: u32,
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self {
            texts: vec![DEFAULT_TEXT.to_string()],
            type_speed: DEFAULT_TYPE_SPEED,
            delete_speed: DEFAULT_DELETE_SPEED,
            pause_time: DEFAULT_PAUSE_TIME,
            inter_text_pause: DEFAULT_INTER_TEXT_PAUSE,
            loop_mode: LoopMode::Loop,
            cursor: true,
            cursor_char: DEFAULT_CURSOR_CHAR.to_string(),
            start_delay: 0,
        }
    }
}

impl TypewriterOptions {
    /// Create options with the given texts and defaults for everything else.
    pub fn new<I, T>(texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse a TOML document into `TypewriterOptions`.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, crate::TypewriterError> {
        toml::from_str(s).map_err(|e| crate::TypewriterError::InvalidOptions(e.to_string()))
    }

    /// Set the delay between typed characters.
    pub fn with_type_speed(mut self, ms: u32) -> Self {
        self.type_speed = ms;
        self
    }

    /// Set the delay between deleted characters.
    pub fn with_delete_speed(mut self, ms: u32) -> Self {
        self.delete_speed = ms;
        self
    }

    /// Set the pause once a text is fully typed.
    pub fn with_pause_time(mut self, ms: u32) -> Self {
        self.pause_time = ms;
        self
    }

    /// Set the pause before the next text starts.
    pub fn with_inter_text_pause(mut self, ms: u32) -> Self {
        self.inter_text_pause = ms;
        self
    }

    /// Set the loop mode.
    pub fn with_loop_mode(mut self, mode: LoopMode) -> Self {
        self.loop_mode = mode;
        self
    }

    /// Show or hide the cursor.
    pub fn with_cursor(mut self, enabled: bool) -> Self {
        self.cursor = enabled;
        self
    }

    /// Set the cursor glyph.
    pub fn with_cursor_char(mut self, glyph: impl Into<String>) -> Self {
        self.cursor_char = glyph.into();
        self
    }

    /// Set the delay before the first character.
    pub fn with_start_delay(mut self, ms: u32) -> Self {
        self.start_delay = ms;
        self
    }

    /// Replace an empty text list with the placeholder text.
    ///
    /// Returns `true` when a replacement happened.
    pub(crate) fn normalize(&mut self) -> bool {
        if self.texts.is_empty() {
            self.texts.push(DEFAULT_TEXT.to_string());
            true
        } else {
            false
        }
    }

    /// Check if the cycle restarts after the last text.
    #[inline]
    pub fn is_looping(&self) -> bool {
        self.loop_mode == LoopMode::Loop
    }
}
