//! Typewriter state machine.

use std::fmt;

use tracing::{debug, error, trace, warn};

use crate::jitter::{default_jitter, Jitter};
use crate::surface::{TargetResolver, TextSurface};
use crate::{TypewriterError, TypewriterOptions};

/// What the host should schedule next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Call [`Typewriter::start`] after the delay
    Start { after_ms: u32 },
    /// Call [`Typewriter::tick`] after the delay
    Tick { after_ms: u32 },
    /// Nothing left to schedule
    Idle,
}

/// Optional callbacks fired by the typing loop.
#[derive(Default)]
pub struct TypewriterHooks {
    /// Called with the new text after each typed character
    pub on_type: Option<Box<dyn FnMut(&str)>>,
    /// Called with the new text after each deleted character
    pub on_delete: Option<Box<dyn FnMut(&str)>>,
    /// Called once the last text is typed and looping is off
    pub on_complete: Option<Box<dyn FnMut()>>,
}

impl TypewriterHooks {
    /// Hooks that do nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the callback fired after each typed character.
    pub fn on_type(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_type = Some(Box::new(f));
        self
    }

    /// Set the callback fired after each deleted character.
    pub fn on_delete(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_delete = Some(Box::new(f));
        self
    }

    /// Set the callback fired when a non-looping cycle finishes.
    pub fn on_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for TypewriterHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypewriterHooks")
            .field("on_type", &self.on_type.is_some())
            .field("on_delete", &self.on_delete.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Typing/deleting animation for one surface.
///
/// The typewriter does not own a timer. Each call returns a [`Schedule`]
/// telling the host when to call back, which keeps the loop deterministic
/// under test. See [`TypewriterDriver`](crate::TypewriterDriver) for a
/// ready-made host.
///
/// ## Example
///
/// ```rust
/// use typewriter_core::{
///     LoopMode, MemorySurface, NoJitter, Schedule, Typewriter, TypewriterOptions,
/// };
///
/// let surface = MemorySurface::new();
/// let options = TypewriterOptions::new(["Hi"]).with_loop_mode(LoopMode::Once);
/// let mut typewriter = Typewriter::new(surface.clone(), options).with_jitter(NoJitter);
///
/// assert_eq!(typewriter.start(), Schedule::Tick { after_ms: 0 });
/// assert_eq!(typewriter.tick(), Schedule::Tick { after_ms: 100 });
/// assert_eq!(surface.text(), "H");
/// assert_eq!(typewriter.tick(), Schedule::Idle);
/// assert_eq!(surface.text(), "Hi");
/// assert!(!typewriter.is_running());
/// ```
pub struct Typewriter<S: TextSurface> {
    /// Owned display target; `None` when unresolved or destroyed
    target: Option<S>,
    options: TypewriterOptions,
    hooks: TypewriterHooks,
    jitter: Box<dyn Jitter>,
    /// Index into `options.texts`
    text_index: usize,
    /// Characters of the current text on display
    char_index: usize,
    is_deleting: bool,
    is_running: bool,
    /// Last text fully typed with looping off
    completed: bool,
    destroyed: bool,
    current_text: String,
}

impl<S: TextSurface> Typewriter<S> {
    /// Create a typewriter for an already resolved surface.
    pub fn new(surface: S, options: TypewriterOptions) -> Self {
        Self::with_target(Some(surface), options)
    }

    /// Resolve `key` and create a typewriter for it.
    ///
    /// An unresolved key logs an error and yields an inert typewriter that
    /// never starts.
    pub fn resolve<R>(resolver: &R, key: &str, options: TypewriterOptions) -> Self
    where
        R: TargetResolver<Surface = S>,
    {
        match resolver.resolve(key) {
            Some(surface) => Self::new(surface, options),
            None => {
                error!(key, "typewriter: element not found");
                Self::inert(options)
            }
        }
    }

    /// A typewriter without a target. It never starts.
    pub fn inert(options: TypewriterOptions) -> Self {
        Self::with_target(None, options)
    }

    /// Like [`Typewriter::resolve`], but reports an unresolved key as an error.
    pub fn try_resolve<R>(
        resolver: &R,
        key: &str,
        options: TypewriterOptions,
    ) -> Result<Self, TypewriterError>
    where
        R: TargetResolver<Surface = S>,
    {
        let surface = crate::surface::resolve_target(resolver, key)?;
        Ok(Self::new(surface, options))
    }

    fn with_target(target: Option<S>, mut options: TypewriterOptions) -> Self {
        if options.normalize() {
            warn!("typewriter: empty text list, using placeholder");
        }
        Self {
            target,
            options,
            hooks: TypewriterHooks::default(),
            jitter: default_jitter(),
            text_index: 0,
            char_index: 0,
            is_deleting: false,
            is_running: false,
            completed: false,
            destroyed: false,
            current_text: String::new(),
        }
    }

    /// Set the callbacks.
    pub fn with_hooks(mut self, hooks: TypewriterHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Set the jitter source added to typing and deleting delays.
    pub fn with_jitter(mut self, jitter: impl Jitter + 'static) -> Self {
        self.jitter = Box::new(jitter);
        self
    }

    /// Apply cursor styling and report when the loop should start.
    pub fn init(&mut self) -> Schedule {
        let Some(target) = self.target.as_mut() else {
            return Schedule::Idle;
        };
        if self.options.cursor {
            target.show_cursor(&self.options.cursor_char);
        }
        Schedule::Start {
            after_ms: self.options.start_delay,
        }
    }

    /// Start or resume the loop.
    ///
    /// Returns [`Schedule::Idle`] when already running, inert or destroyed.
    /// Otherwise the first tick is due immediately. Starting again after a
    /// non-looping cycle completed restarts from the first text.
    pub fn start(&mut self) -> Schedule {
        if self.target.is_none() {
            if !self.destroyed {
                warn!("typewriter: start ignored, no target element");
            }
            return Schedule::Idle;
        }
        if self.is_running {
            return Schedule::Idle;
        }
        if self.completed {
            debug!("typewriter restarted after completion");
            self.reset_cycle();
        }
        self.is_running = true;
        Schedule::Tick { after_ms: 0 }
    }

    /// Stop the loop, keeping the displayed text and progress.
    pub fn stop(&mut self) {
        if self.is_running {
            debug!(
                text_index = self.text_index,
                char_index = self.char_index,
                "typewriter stopped"
            );
        }
        self.is_running = false;
    }

    /// Advance the animation by one character.
    pub fn tick(&mut self) -> Schedule {
        if !self.is_running || self.target.is_none() {
            return Schedule::Idle;
        }

        let full = &self.options.texts[self.text_index];
        let full_len = full.chars().count();

        if self.is_deleting {
            self.char_index = self.char_index.saturating_sub(1);
            self.current_text = prefix(full, self.char_index).to_string();
            if let Some(on_delete) = self.hooks.on_delete.as_mut() {
                on_delete(&self.current_text);
            }
        } else {
            self.char_index = (self.char_index + 1).min(full_len);
            self.current_text = prefix(full, self.char_index).to_string();
            if let Some(on_type) = self.hooks.on_type.as_mut() {
                on_type(&self.current_text);
            }
        }

        if let Some(target) = self.target.as_mut() {
            target.set_text(&self.current_text);
        }
        trace!(text = %self.current_text, deleting = self.is_deleting, "typewriter tick");

        let speed = if self.is_deleting {
            self.options.delete_speed
        } else {
            self.options.type_speed
        };
        let mut delay = speed.saturating_add(self.jitter.jitter_ms());

        if !self.is_deleting && self.char_index == full_len {
            delay = self.options.pause_time;

            let is_last = self.text_index == self.options.texts.len() - 1;
            if is_last && !self.options.is_looping() {
                debug!(text_index = self.text_index, "typewriter complete");
                if let Some(on_complete) = self.hooks.on_complete.as_mut() {
                    on_complete();
                }
                self.is_running = false;
                self.completed = true;
                return Schedule::Idle;
            }

            debug!(text_index = self.text_index, "text typed");
            self.is_deleting = true;
        } else if self.is_deleting && self.char_index == 0 {
            self.is_deleting = false;
            self.text_index = (self.text_index + 1) % self.options.texts.len();
            delay = self.options.inter_text_pause;
            debug!(next = self.text_index, "text deleted");
        }

        Schedule::Tick { after_ms: delay }
    }

    /// Replace the texts and restart the cycle from the first one.
    ///
    /// Running state is left untouched.
    pub fn update_texts<I, T>(&mut self, texts: I) -> Result<(), TypewriterError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        if texts.is_empty() {
            warn!("typewriter: update_texts ignored, empty text list");
            return Err(TypewriterError::EmptyTexts);
        }
        self.options.texts = texts;
        self.reset_cycle();
        Ok(())
    }

    fn reset_cycle(&mut self) {
        self.text_index = 0;
        self.char_index = 0;
        self.is_deleting = false;
        self.completed = false;
    }

    /// Stop the loop, clear the text and remove the cursor.
    ///
    /// The surface is released; every later call is a no-op.
    pub fn destroy(&mut self) {
        self.stop();
        if let Some(mut target) = self.target.take() {
            target.set_text("");
            target.hide_cursor();
            debug!("typewriter destroyed");
        }
        self.current_text.clear();
        self.destroyed = true;
    }

    /// Index of the text being typed or deleted.
    #[inline]
    pub fn text_index(&self) -> usize {
        self.text_index
    }

    /// Characters of the current text on display.
    #[inline]
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// Check if the loop is in its deleting phase.
    #[inline]
    pub fn is_deleting(&self) -> bool {
        self.is_deleting
    }

    /// Check if the loop is running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// `true` when construction could not resolve a target.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.target.is_none() && !self.destroyed
    }

    /// Check if [`Typewriter::destroy`] has run.
    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Text currently on display.
    #[inline]
    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    /// Get the text list.
    pub fn texts(&self) -> &[String] {
        &self.options.texts
    }

    /// Get the options.
    pub fn options(&self) -> &TypewriterOptions {
        &self.options
    }

    /// Get the surface, if any.
    pub fn surface(&self) -> Option<&S> {
        self.target.as_ref()
    }
}

impl<S: TextSurface + fmt::Debug> fmt::Debug for Typewriter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typewriter")
            .field("target", &self.target)
            .field("options", &self.options)
            .field("hooks", &self.hooks)
            .field("text_index", &self.text_index)
            .field("char_index", &self.char_index)
            .field("is_deleting", &self.is_deleting)
            .field("is_running", &self.is_running)
            .field("completed", &self.completed)
            .field("destroyed", &self.destroyed)
            .field("current_text", &self.current_text)
            .finish_non_exhaustive()
    }
}

/// First `chars` characters of `text`.
fn prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::{FixedJitter, NoJitter};
    use crate::surface::{MemoryResolver, MemorySurface};
    use crate::LoopMode;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn typewriter(texts: &[&str], mode: LoopMode) -> (Typewriter<MemorySurface>, MemorySurface) {
        let surface = MemorySurface::new();
        let options = TypewriterOptions::new(texts.iter().copied()).with_loop_mode(mode);
        let tw = Typewriter::new(surface.clone(), options).with_jitter(NoJitter);
        (tw, surface)
    }

    #[test]
    fn types_once_then_completes() {
        let completed = Rc::new(RefCell::new(0));
        let counter = completed.clone();
        let surface = MemorySurface::new();
        let options = TypewriterOptions::new(["Hi"])
            .with_loop_mode(LoopMode::Once)
            .with_type_speed(10);
        let mut tw = Typewriter::new(surface.clone(), options)
            .with_jitter(NoJitter)
            .with_hooks(TypewriterHooks::new().on_complete(move || *counter.borrow_mut() += 1));

        assert_eq!(tw.start(), Schedule::Tick { after_ms: 0 });
        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 10 });
        assert_eq!(tw.tick(), Schedule::Idle);

        assert_eq!(surface.history(), vec!["H".to_string(), "Hi".to_string()]);
        assert_eq!(*completed.borrow(), 1);
        assert!(!tw.is_running());
        assert!(!tw.is_deleting());

        // Further ticks do nothing.
        assert_eq!(tw.tick(), Schedule::Idle);
        assert_eq!(surface.history().len(), 2);
        assert_eq!(*completed.borrow(), 1);
    }

    #[test]
    fn start_after_completion_restarts_cycle() {
        let completed = Rc::new(RefCell::new(0));
        let counter = completed.clone();
        let surface = MemorySurface::new();
        let options = TypewriterOptions::new(["a", "b"]).with_loop_mode(LoopMode::Once);
        let mut tw = Typewriter::new(surface.clone(), options)
            .with_jitter(NoJitter)
            .with_hooks(TypewriterHooks::new().on_complete(move || *counter.borrow_mut() += 1));
        tw.start();
        while tw.tick() != Schedule::Idle {}
        assert_eq!(*completed.borrow(), 1);

        assert_eq!(tw.start(), Schedule::Tick { after_ms: 0 });
        assert_eq!(tw.text_index(), 0);
        assert_eq!(tw.char_index(), 0);
        assert!(!tw.is_deleting());

        // The first text is typed again instead of completing on the spot.
        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 2000 });
        assert_eq!(surface.text(), "a");
        assert_eq!(*completed.borrow(), 1);

        while tw.tick() != Schedule::Idle {}
        assert_eq!(*completed.borrow(), 2);
        assert_eq!(surface.text(), "b");
    }

    #[test]
    fn start_after_stop_does_not_restart() {
        let (mut tw, _) = typewriter(&["abc", "d"], LoopMode::Once);
        tw.start();
        tw.tick();
        tw.stop();
        tw.start();

        assert_eq!(tw.char_index(), 1);
    }

    #[test]
    fn loop_cycle_with_pauses() {
        let (mut tw, surface) = typewriter(&["Ab"], LoopMode::Loop);
        tw.start();

        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 100 });
        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 2000 });
        assert!(tw.is_deleting());
        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 50 });
        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 500 });
        assert!(!tw.is_deleting());
        assert_eq!(tw.text_index(), 0);
        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 100 });

        assert_eq!(
            surface.history(),
            vec!["A", "Ab", "A", "", "A"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn jitter_is_added_to_speed_only() {
        let surface = MemorySurface::new();
        let mut tw =
            Typewriter::new(surface, TypewriterOptions::new(["ab"])).with_jitter(FixedJitter(7));
        tw.start();

        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 107 });
        // Pause and inter-text delays override the jittered speed.
        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 2000 });
        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 57 });
        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 500 });
    }

    #[test]
    fn cycles_through_texts_in_order() {
        let (mut tw, surface) = typewriter(&["a", "bc", "d"], LoopMode::Loop);
        tw.start();

        let mut fully_typed = Vec::new();
        for _ in 0..40 {
            let was_deleting = tw.is_deleting();
            tw.tick();
            if !was_deleting && tw.is_deleting() {
                fully_typed.push(surface.text());
            }
        }

        assert_eq!(
            &fully_typed[..5],
            &["a", "bc", "d", "a", "bc"].map(String::from)[..]
        );
    }

    #[test]
    fn once_mode_deletes_all_but_last() {
        let (mut tw, surface) = typewriter(&["x", "y"], LoopMode::Once);
        tw.start();
        while tw.tick() != Schedule::Idle {}

        assert_eq!(
            surface.history(),
            vec!["x", "", "y"].into_iter().map(String::from).collect::<Vec<_>>()
        );
        assert_eq!(tw.text_index(), 1);
    }

    #[test]
    fn type_and_delete_hooks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let typed = log.clone();
        let deleted = log.clone();
        let hooks = TypewriterHooks::new()
            .on_type(move |t| typed.borrow_mut().push(format!("+{t}")))
            .on_delete(move |t| deleted.borrow_mut().push(format!("-{t}")));
        let mut tw = Typewriter::new(MemorySurface::new(), TypewriterOptions::new(["ok"]))
            .with_jitter(NoJitter)
            .with_hooks(hooks);
        tw.start();
        for _ in 0..4 {
            tw.tick();
        }

        assert_eq!(*log.borrow(), vec!["+o", "+ok", "-o", "-"]);
    }

    #[test]
    fn start_is_idempotent() {
        let (mut tw, _) = typewriter(&["abc"], LoopMode::Loop);
        assert_eq!(tw.start(), Schedule::Tick { after_ms: 0 });
        assert_eq!(tw.start(), Schedule::Idle);
        assert!(tw.is_running());
    }

    #[test]
    fn stop_then_start_resumes_exactly() {
        let (mut tw, surface) = typewriter(&["abcd"], LoopMode::Loop);
        tw.start();
        tw.tick();
        tw.tick();
        tw.stop();

        assert_eq!(tw.tick(), Schedule::Idle);
        assert_eq!(surface.text(), "ab");
        assert_eq!(tw.char_index(), 2);

        tw.start();
        tw.tick();
        assert_eq!(surface.text(), "abc");
        assert_eq!(
            surface.history(),
            vec!["a", "ab", "abc"].into_iter().map(String::from).collect::<Vec<_>>()
        );
    }

    #[test]
    fn update_texts_restarts_cycle() {
        let (mut tw, surface) = typewriter(&["hello", "world"], LoopMode::Loop);
        tw.start();
        for _ in 0..7 {
            tw.tick();
        }
        assert!(tw.is_deleting());

        tw.update_texts(["A", "B"]).unwrap();
        assert_eq!(tw.text_index(), 0);
        assert_eq!(tw.char_index(), 0);
        assert!(!tw.is_deleting());
        assert!(tw.is_running());

        tw.tick();
        assert_eq!(surface.text(), "A");
    }

    #[test]
    fn update_texts_rejects_empty() {
        let (mut tw, _) = typewriter(&["keep"], LoopMode::Loop);
        assert_eq!(tw.update_texts(Vec::<String>::new()), Err(TypewriterError::EmptyTexts));
        assert_eq!(tw.texts(), &["keep".to_string()]);
    }

    #[test]
    fn init_applies_cursor_and_start_delay() {
        let surface = MemorySurface::new();
        let options = TypewriterOptions::new(["a"]).with_cursor_char("_").with_start_delay(300);
        let mut tw = Typewriter::new(surface.clone(), options);

        assert_eq!(tw.init(), Schedule::Start { after_ms: 300 });
        assert_eq!(surface.cursor(), Some("_".to_string()));
        // The cursor never leaks into the text content.
        assert_eq!(surface.text(), "");
    }

    #[test]
    fn init_without_cursor() {
        let surface = MemorySurface::new();
        let options = TypewriterOptions::new(["a"]).with_cursor(false);
        let mut tw = Typewriter::new(surface.clone(), options);

        assert_eq!(tw.init(), Schedule::Start { after_ms: 0 });
        assert_eq!(surface.cursor(), None);
    }

    #[test]
    fn destroy_clears_and_releases() {
        let (mut tw, surface) = typewriter(&["abc"], LoopMode::Loop);
        tw.init();
        tw.start();
        tw.tick();
        tw.destroy();

        assert_eq!(surface.text(), "");
        assert_eq!(surface.cursor(), None);
        assert!(!tw.is_running());
        assert!(tw.is_destroyed());
        assert!(!tw.is_inert());
        assert!(tw.surface().is_none());

        assert_eq!(tw.start(), Schedule::Idle);
        assert_eq!(tw.tick(), Schedule::Idle);
    }

    #[test]
    fn unresolved_target_is_inert() {
        let resolver = MemoryResolver::new();
        let mut tw = Typewriter::resolve(&resolver, "#nope", TypewriterOptions::default());

        assert!(tw.is_inert());
        assert_eq!(tw.init(), Schedule::Idle);
        assert_eq!(tw.start(), Schedule::Idle);
        assert!(!tw.is_running());
        assert_eq!(tw.tick(), Schedule::Idle);
    }

    #[test]
    fn try_resolve_reports_missing_target() {
        let mut resolver = MemoryResolver::new();
        resolver.insert("#ok");

        assert!(Typewriter::try_resolve(&resolver, "#ok", TypewriterOptions::default()).is_ok());
        let err = Typewriter::try_resolve(&resolver, "#missing", TypewriterOptions::default())
            .unwrap_err();
        assert_eq!(err, TypewriterError::TargetNotFound("#missing".into()));
    }

    #[test]
    fn empty_text_list_uses_placeholder() {
        let options = TypewriterOptions::new(Vec::<String>::new());
        let tw = Typewriter::new(MemorySurface::new(), options);
        assert_eq!(tw.texts(), &["Hello World!".to_string()]);
    }

    #[test]
    fn empty_text_does_not_overrun() {
        let (mut tw, surface) = typewriter(&["", "z"], LoopMode::Loop);
        tw.start();

        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 2000 });
        assert_eq!(tw.char_index(), 0);
        assert_eq!(tw.tick(), Schedule::Tick { after_ms: 500 });
        assert_eq!(tw.text_index(), 1);
        tw.tick();
        assert_eq!(surface.text(), "z");
    }

    #[test]
    fn multibyte_characters_are_typed_whole() {
        let (mut tw, surface) = typewriter(&["héllo✓"], LoopMode::Loop);
        tw.start();
        for _ in 0..6 {
            tw.tick();
        }
        assert_eq!(
            surface.history(),
            vec!["h", "hé", "hél", "héll", "héllo", "héllo✓"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_prefix() {
        assert_eq!(prefix("abc", 0), "");
        assert_eq!(prefix("abc", 2), "ab");
        assert_eq!(prefix("abc", 9), "abc");
        assert_eq!(prefix("✓✓", 1), "✓");
    }

    proptest! {
        #[test]
        fn current_text_is_prefix_of_length_char_index(
            texts in prop::collection::vec("[a-zA-Z é✓]{0,8}", 1..4),
            ticks in 0usize..80,
        ) {
            let surface = MemorySurface::new();
            let mut tw = Typewriter::new(surface, TypewriterOptions::new(texts.clone()))
                .with_jitter(NoJitter);
            tw.start();
            for _ in 0..ticks {
                tw.tick();
                let full = &texts[tw.text_index()];
                let shown = tw.current_text();
                prop_assert!(tw.text_index() < texts.len());
                prop_assert!(tw.char_index() <= full.chars().count());
                // Right after an advance the previous text's empty prefix is shown.
                prop_assert!(shown.is_empty() || full.starts_with(shown));
                if !shown.is_empty() {
                    prop_assert_eq!(shown.chars().count(), tw.char_index());
                }
            }
        }

        #[test]
        fn typing_and_deleting_take_n_ticks(text in "[a-z✓]{1,12}") {
            let n = text.chars().count();
            let surface = MemorySurface::new();
            let mut tw = Typewriter::new(surface.clone(), TypewriterOptions::new([text.clone()]))
                .with_jitter(NoJitter);
            tw.start();

            for _ in 0..n {
                tw.tick();
            }
            prop_assert_eq!(surface.text(), text.clone());
            prop_assert!(tw.is_deleting());

            for _ in 0..n {
                tw.tick();
            }
            prop_assert_eq!(surface.text(), String::new());
            prop_assert!(!tw.is_deleting());
            prop_assert_eq!(surface.history().len(), 2 * n);
        }
    }
}
