//! Host-driven scheduling for a single typewriter.

use tracing::{debug, warn};

use crate::animation::{Schedule, Typewriter};
use crate::surface::TextSurface;
use crate::TypewriterError;

/// Bound on tasks fired by one `advance`, so an all-zero-delay loop
/// cannot spin forever.
const MAX_FIRES_PER_ADVANCE: usize = 100_000;

/// Kind of task waiting on the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingKind {
    /// Delayed start after `start_delay`
    Start,
    /// Next character step
    Tick,
}

/// The single scheduled task of a driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pending {
    pub kind: PendingKind,
    /// Virtual time at which the task fires
    pub due_ms: u64,
}

/// Owns a [`Typewriter`] and its one pending timer.
///
/// Time is virtual: the host advances it explicitly, which makes the whole
/// animation reproducible. A browser host maps the same contract onto
/// `setTimeout`.
///
/// ## Example
///
/// ```rust
/// use typewriter_core::{MemorySurface, NoJitter, Typewriter, TypewriterDriver, TypewriterOptions};
///
/// let surface = MemorySurface::new();
/// let options = TypewriterOptions::new(["Hey"]).with_start_delay(200);
/// let typewriter = Typewriter::new(surface.clone(), options).with_jitter(NoJitter);
///
/// let mut driver = TypewriterDriver::new(typewriter);
/// driver.init();
/// assert_eq!(surface.text(), "");
///
/// driver.advance(200); // start fires, first character is typed
/// assert_eq!(surface.text(), "H");
///
/// driver.advance(200); // two more characters at 100ms each
/// assert_eq!(surface.text(), "Hey");
/// ```
#[derive(Debug)]
pub struct TypewriterDriver<S: TextSurface> {
    typewriter: Typewriter<S>,
    now_ms: u64,
    pending: Option<Pending>,
}

impl<S: TextSurface> TypewriterDriver<S> {
    /// Wrap a typewriter; the clock starts at zero.
    pub fn new(typewriter: Typewriter<S>) -> Self {
        Self {
            typewriter,
            now_ms: 0,
            pending: None,
        }
    }

    /// Apply cursor styling and start now or after the configured delay.
    pub fn init(&mut self) {
        match self.typewriter.init() {
            Schedule::Start { after_ms: 0 } => self.start(),
            schedule => self.apply(schedule),
        }
    }

    /// Start or resume; the first character is typed immediately.
    pub fn start(&mut self) {
        match self.typewriter.start() {
            Schedule::Tick { after_ms: 0 } => self.fire(PendingKind::Tick),
            // Already running: keep the pending tick.
            Schedule::Idle => {}
            schedule => self.apply(schedule),
        }
    }

    /// Stop and cancel whatever is pending.
    pub fn stop(&mut self) {
        self.typewriter.stop();
        self.pending = None;
    }

    /// Replace the texts; the cycle restarts on the next pending tick.
    pub fn update_texts<I, T>(&mut self, texts: I) -> Result<(), TypewriterError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.typewriter.update_texts(texts)
    }

    /// Tear down the typewriter and cancel whatever is pending.
    pub fn destroy(&mut self) {
        self.pending = None;
        self.typewriter.destroy();
    }

    /// Advance the clock by `dt_ms`, firing every task that falls due.
    ///
    /// Returns the number of tasks fired.
    pub fn advance(&mut self, dt_ms: u64) -> usize {
        let until = self.now_ms.saturating_add(dt_ms);
        let mut fired = 0;
        while let Some(pending) = self.pending {
            if pending.due_ms > until {
                break;
            }
            if fired == MAX_FIRES_PER_ADVANCE {
                warn!(now_ms = self.now_ms, "typewriter advance stopped early, zero-delay loop");
                break;
            }
            self.now_ms = pending.due_ms;
            self.pending = None;
            self.fire(pending.kind);
            fired += 1;
        }
        self.now_ms = until;
        fired
    }

    /// Jump to the next pending task and fire it.
    ///
    /// Returns `false` when nothing is pending.
    pub fn step(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.now_ms = self.now_ms.max(pending.due_ms);
        self.fire(pending.kind);
        true
    }

    fn fire(&mut self, kind: PendingKind) {
        match kind {
            PendingKind::Start => self.start(),
            PendingKind::Tick => {
                let schedule = self.typewriter.tick();
                self.apply(schedule);
            }
        }
    }

    fn apply(&mut self, schedule: Schedule) {
        self.pending = match schedule {
            Schedule::Start { after_ms } => Some(Pending {
                kind: PendingKind::Start,
                due_ms: self.now_ms + u64::from(after_ms),
            }),
            Schedule::Tick { after_ms } => Some(Pending {
                kind: PendingKind::Tick,
                due_ms: self.now_ms + u64::from(after_ms),
            }),
            Schedule::Idle => {
                debug!(now_ms = self.now_ms, "nothing left to schedule");
                None
            }
        };
    }

    /// Current virtual time.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Get the scheduled task, if any.
    #[inline]
    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Get the driven typewriter.
    pub fn typewriter(&self) -> &Typewriter<S> {
        &self.typewriter
    }

    /// Get the driven typewriter mutably.
    pub fn typewriter_mut(&mut self) -> &mut Typewriter<S> {
        &mut self.typewriter
    }

    /// Unwrap the typewriter, dropping anything pending.
    pub fn into_inner(self) -> Typewriter<S> {
        self.typewriter
    }
}
