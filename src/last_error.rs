//! Per-thread record of the most recently raised error.
//!
//! Errors are returned by value everywhere in this crate; this slot only
//! exists for callers that want to ask "what went wrong last" after the
//! fact. Each thread sees only its own errors.

use crate::errors::Error;

use std::cell::Cell;

thread_local! {
    static LAST_ERROR: Cell<Option<Error>> = Cell::new(None);
}

pub(crate) fn record(err: Error) {
    LAST_ERROR.with(|slot| slot.set(Some(err)));
}

/// The last error raised on this thread, if any since the last [`reset`].
pub fn last_error() -> Option<Error> {
    LAST_ERROR.with(|slot| slot.get())
}

/// Clears this thread's slot.
pub fn reset() {
    LAST_ERROR.with(|slot| slot.set(None));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorCode, ProtocolError, UsageError};

    use std::thread;

    #[test]
    fn keeps_most_recent_error() {
        reset();
        assert!(last_error().is_none());

        let _ = Error::new(ProtocolError::BadMessage);
        let second = Error::new(UsageError::NoAlert);
        assert_eq!(last_error(), Some(second));

        reset();
        assert!(last_error().is_none());
    }

    #[test]
    fn threads_do_not_share_errors() {
        reset();
        let _ = Error::new(ErrorCode::Alert);

        let other = thread::spawn(|| {
            let before = last_error();
            let _ = Error::new(ErrorCode::Io);
            (before, last_error().map(|e| e.code()))
        })
        .join()
        .expect("thread panicked");

        assert_eq!(other, (None, Some(ErrorCode::Io)));
        assert_eq!(last_error().map(|e| e.code()), Some(ErrorCode::Alert));
    }
}
