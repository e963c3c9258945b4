//! Per-script execution context and configuration.
//!
//! A [`Context`] is created when a script instance starts and dropped at
//! teardown. It owns every piece of mutable state the intrinsics need, so
//! independent interpreter instances never share random streams or output.

use std::fmt;
use std::io::Write;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio_util::sync::CancellationToken;

use crate::random::SeedRegistry;

/// Size and range limits applied by the intrinsics.
#[derive(Clone, Debug)]
pub struct Limits {
    /// Largest list or map `shuffle` accepts.
    pub max_shuffle_len: usize,
    /// Longest `join` separator, in characters.
    pub max_separator_len: usize,
    /// Shortest `wait`, in seconds.
    pub wait_min_secs: f64,
    /// Longest `wait`, in seconds.
    pub wait_max_secs: f64,
    /// Default recursion depth for `hash`.
    pub hash_depth: i32,
    /// Most values a single `range` call may produce.
    pub max_range_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_shuffle_len: 10_000,
            max_separator_len: 128,
            wait_min_secs: 0.01,
            wait_max_secs: 300.0,
            hash_depth: glint_foundation::DEFAULT_HASH_DEPTH,
            max_range_len: 16_777_216,
        }
    }
}

impl Limits {
    /// Builder method to set the shuffle ceiling.
    #[must_use]
    pub fn with_max_shuffle_len(mut self, len: usize) -> Self {
        self.max_shuffle_len = len;
        self
    }

    /// Builder method to set the separator ceiling.
    #[must_use]
    pub fn with_max_separator_len(mut self, len: usize) -> Self {
        self.max_separator_len = len;
        self
    }

    /// Builder method to set the accepted `wait` window.
    #[must_use]
    pub fn with_wait_window(mut self, min_secs: f64, max_secs: f64) -> Self {
        self.wait_min_secs = min_secs;
        self.wait_max_secs = max_secs;
        self
    }

    /// Builder method to set the range ceiling.
    #[must_use]
    pub fn with_max_range_len(mut self, len: usize) -> Self {
        self.max_range_len = len;
        self
    }
}

/// Sink for `print`.
pub trait OutputHandler {
    /// Writes one line of script output.
    fn print(&mut self, text: &str);
}

/// Writes script output to stdout.
#[derive(Debug, Default)]
pub struct StdoutHandler;

impl OutputHandler for StdoutHandler {
    fn print(&mut self, text: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout is not the script's problem.
        let _ = writeln!(out, "{text}");
    }
}

/// Collects script output in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferHandler {
    lines: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

impl BufferHandler {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lines printed so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl OutputHandler for BufferHandler {
    fn print(&mut self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }
}

/// Mutable state threaded through every intrinsic call.
pub struct Context {
    seeds: SeedRegistry,
    rng: ChaCha8Rng,
    output: Box<dyn OutputHandler>,
    exit: CancellationToken,
    limits: Limits,
}

impl Context {
    /// Creates a context with an entropy-seeded random source and stdout output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seeds: SeedRegistry::new(),
            rng: ChaCha8Rng::from_entropy(),
            output: Box::new(StdoutHandler),
            exit: CancellationToken::new(),
            limits: Limits::default(),
        }
    }

    /// Builder method to make the unseeded random source reproducible.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Builder method to set the output handler.
    #[must_use]
    pub fn with_output(mut self, output: impl OutputHandler + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    /// Builder method to share the host's exit signal.
    #[must_use]
    pub fn with_exit_token(mut self, token: CancellationToken) -> Self {
        self.exit = token;
        self
    }

    /// Builder method to set limits.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the configured limits.
    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Returns the seeded stream registry.
    pub fn seeds_mut(&mut self) -> &mut SeedRegistry {
        &mut self.seeds
    }

    /// Returns the unseeded random source.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Returns the output handler.
    pub fn output_mut(&mut self) -> &mut dyn OutputHandler {
        self.output.as_mut()
    }

    /// Returns the exit signal that cancels pending `wait` calls.
    #[must_use]
    pub fn exit_token(&self) -> &CancellationToken {
        &self.exit
    }

    /// Signals early termination; pending and future `wait` calls resolve at once.
    pub fn request_exit(&self) {
        self.exit.cancel();
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("seeds", &self.seeds.len())
            .field("exit_requested", &self.exit.is_cancelled())
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}
