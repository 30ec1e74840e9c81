//! # typewriter-core
//!
//! Typewriter text animation: cycles through a list of texts, typing and
//! deleting them one character at a time with a blinking cursor.
//!
//! This crate provides platform-agnostic logic for:
//! - Driving the typing/deleting state machine one tick at a time
//! - Configuring speeds, pauses, looping and the cursor glyph
//! - Reading declarative `data-typewriter-*` attributes
//! - Scheduling on a host-driven clock (with optional browser bindings)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for options
//! - `toml` - Load options from TOML documents
//! - `web` - Enable web/WASM DOM bindings
//!
//! ## Example
//!
//! ```rust
//! use typewriter_core::{MemorySurface, NoJitter, Typewriter, TypewriterDriver, TypewriterOptions};
//!
//! let surface = MemorySurface::new();
//! let options = TypewriterOptions::new(["Hello", "World"]).with_type_speed(50);
//! let typewriter = Typewriter::new(surface.clone(), options).with_jitter(NoJitter);
//!
//! let mut driver = TypewriterDriver::new(typewriter);
//! driver.init();
//! driver.advance(200);
//! assert_eq!(surface.text(), "Hello");
//! ```

mod animation;
mod config;
pub mod discovery;
mod driver;
mod error;
mod jitter;
pub mod surface;

#[cfg(feature = "web")]
pub mod web;

pub use animation::{Schedule, Typewriter, TypewriterHooks};
pub use config::{LoopMode, TypewriterOptions, DEFAULT_TEXT};
pub use discovery::{discover, options_from_attributes, AttributeSource, DiscoveryHost};
pub use driver::{Pending, PendingKind, TypewriterDriver};
pub use error::TypewriterError;
pub use jitter::{default_jitter, FixedJitter, Jitter, NoJitter, MAX_JITTER_MS};
#[cfg(not(target_arch = "wasm32"))]
pub use jitter::{RandomJitter, SeededJitter};
pub use surface::{MemoryResolver, MemorySurface, TargetResolver, TextSurface};

#[cfg(feature = "web")]
pub use web::WebTypewriter;
