//! crates/logging/src/scoped.rs
//! RAII guard that installs a logger for the duration of a scope.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::logger::{IntoLogger, Logger};
use crate::state::set_logger;

/// Installs a logger on construction and restores the previous one on drop.
///
/// The previous logger is restored on every exit path, including early
/// returns, `?` and unwinding panics.
///
/// # Caller obligations
///
/// - Nested guards must be dropped in reverse order of construction. Dropping
///   an outer guard first restores its captured logger, and the inner guard
///   later reinstates a logger that should already be gone.
/// - The guard restores unconditionally. A [`set_logger`] call made by another
///   thread while the guard is alive is silently overwritten on drop, so the
///   holder must own the right to change the active logger for the guard's
///   lifetime.
///
/// The guard is neither `Clone` nor `Send`, which keeps the restore obligation
/// with a single owner on the constructing thread.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use logging::{ScopedLogger, get_logger, null_logger};
///
/// let before = get_logger();
/// {
///     let _scoped = ScopedLogger::new(null_logger());
///     assert!(Arc::ptr_eq(&get_logger(), &null_logger()));
/// }
/// assert!(Arc::ptr_eq(&get_logger(), &before));
/// ```
#[must_use = "dropping the guard immediately restores the previous logger"]
pub struct ScopedLogger {
    previous: Arc<dyn Logger>,
    _not_send: PhantomData<*const ()>,
}

impl ScopedLogger {
    /// Installs `logger` and remembers the logger it replaced.
    ///
    /// `None` installs the [`null_logger`](crate::null_logger), which silences
    /// all output for the scope.
    pub fn new<L: IntoLogger>(logger: L) -> Self {
        Self {
            previous: set_logger(logger),
            _not_send: PhantomData,
        }
    }

    /// Returns the logger that will be restored when the guard is dropped.
    #[must_use]
    pub fn previous(&self) -> &Arc<dyn Logger> {
        &self.previous
    }
}

impl Drop for ScopedLogger {
    fn drop(&mut self) {
        set_logger(Arc::clone(&self.previous));
    }
}

impl fmt::Debug for ScopedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedLogger").finish_non_exhaustive()
    }
}
