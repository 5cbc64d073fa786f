//! Lock utils.

/// Alias to `($id).try_lock_for(envar::MUTEX_TIMEOUT()).unwrap()`.
#[macro_export]
macro_rules! flock {
  ($id:expr) => {
    ($id).try_lock_for($crate::envar::MUTEX_TIMEOUT()).unwrap()
  };
}
