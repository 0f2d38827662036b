//! Run-at-most-once continuations.

/// Holds a continuation until it is fired. Firing again does nothing.
pub struct OneShot<F> {
    action: Option<F>,
}

impl<F: FnOnce()> OneShot<F> {
    pub fn new(action: F) -> Self {
        Self { action: Some(action) }
    }

    /// Runs the continuation if it is still armed. Returns whether it ran.
    pub fn fire(&mut self) -> bool {
        match self.action.take() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}

impl<F> std::fmt::Debug for OneShot<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneShot").field("armed", &self.action.is_some()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn fires_once() {
        let runs = Cell::new(0);
        let mut once = OneShot::new(|| runs.set(runs.get() + 1));
        assert!(once.fire());
        assert!(!once.fire());
        assert!(!once.fire());
        assert_eq!(runs.get(), 1);
    }
}
