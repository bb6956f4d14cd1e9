//! Standard library installer.

use crate::env::Environment;
use crate::value::Value;

/// Seed an environment with the built-in bindings.
///
/// Runs before first use and again after every session reset; `define`
/// overwrites, so installing onto a freshly cleared environment is
/// idempotent.
pub fn install_stdlib(env: &Environment) {
    env.define("PI", Value::Number(std::f64::consts::PI));
}
