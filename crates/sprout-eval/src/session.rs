//! An evaluation session: the owner of one global environment.
//!
//! Hosts create a session once and run any number of programs against it
//! (a file runner uses one program, an interactive host one per input
//! line). There is deliberately no process-wide singleton — independent
//! sessions coexist, which the tests rely on.

use crate::env::Environment;
use crate::stdlib::install_stdlib;
use std::rc::Rc;

/// One persistent evaluation session.
pub struct Session {
    globals: Rc<Environment>,
}

impl Session {
    /// Create a session with a fresh global environment, seeded with the
    /// standard library.
    pub fn new() -> Self {
        let globals = Rc::new(Environment::new());
        install_stdlib(&globals);
        Self { globals }
    }

    /// The session's global environment.
    pub fn globals(&self) -> &Rc<Environment> {
        &self.globals
    }

    /// Clear every user binding and re-seed the standard library.
    ///
    /// The environment object keeps its identity: function values that
    /// captured it observe the reset instead of holding a stale copy.
    pub fn reset(&self) {
        self.globals.clear();
        install_stdlib(&self.globals);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
