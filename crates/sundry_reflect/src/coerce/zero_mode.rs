use core::sync::atomic::{AtomicBool, Ordering};

/// Whether nil sources convert to the zero value of the target.
static ZERO_MODE: AtomicBool = AtomicBool::new(true);

/// Returns the current zero-mode, `true` by default.
///
/// When enabled, converting nil yields the target's zero value: `false`, `0`,
/// `""`, the zero timestamp or an empty container. When disabled, it fails
/// with [`ConvertError::Nil`](super::ConvertError::Nil).
#[inline]
pub fn zero_mode() -> bool {
    ZERO_MODE.load(Ordering::Relaxed)
}

/// Sets zero-mode for the whole process, returning the previous value.
#[inline]
pub fn set_zero_mode(enabled: bool) -> bool {
    ZERO_MODE.swap(enabled, Ordering::Relaxed)
}

/// Sets zero-mode and restores the previous value when dropped.
///
/// # Examples
///
/// ```
/// use sundry_reflect::coerce::{ZeroModeGuard, to_int, zero_mode};
/// use sundry_reflect::value::Value;
///
/// {
///     let _guard = ZeroModeGuard::new(false);
///     assert!(to_int(&Value::Nil).is_err());
/// }
/// assert!(zero_mode());
/// ```
#[must_use = "zero-mode is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ZeroModeGuard {
    previous: bool,
}

impl ZeroModeGuard {
    #[inline]
    pub fn new(enabled: bool) -> Self {
        Self {
            previous: set_zero_mode(enabled),
        }
    }
}

impl Drop for ZeroModeGuard {
    #[inline]
    fn drop(&mut self) {
        set_zero_mode(self.previous);
    }
}

// -----------------------------------------------------------------------------
// Test support

/// Serializes tests whose outcome depends on zero-mode.
#[cfg(test)]
static ZERO_MODE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Holds the test lock with zero-mode set to `enabled`.
///
/// Fields drop in order: the mode is restored before the lock is released.
#[cfg(test)]
pub(crate) struct ZeroModeScope {
    _mode: ZeroModeGuard,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ZeroModeScope {
    pub(crate) fn new(enabled: bool) -> Self {
        let lock = ZERO_MODE_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Self {
            _mode: ZeroModeGuard::new(enabled),
            _lock: lock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ZeroModeGuard, ZeroModeScope, zero_mode};

    #[test]
    fn guard_restores() {
        let _scope = ZeroModeScope::new(true);
        {
            let _off = ZeroModeGuard::new(false);
            assert!(!zero_mode());
        }
        assert!(zero_mode());
    }
}
