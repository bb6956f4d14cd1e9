//! Sprout tree-walking evaluator.
//!
//! Executes a parsed [`Program`] against a [`Session`]'s environment chain,
//! routing output and `ask` input through a [`Host`]. [`execute`] and
//! [`execute_in_session`] wrap evaluation into the serializable
//! [`ExecutionResult`] shape shared with alternate execution backends;
//! interactive hosts drive [`Evaluator`] directly with their own [`Host`].

pub mod env;
pub mod evaluator;
pub mod host;
pub mod session;
pub mod stdlib;
pub mod value;

pub use env::Environment;
pub use evaluator::{Evaluator, Flow};
pub use host::{CapturingHost, Host, StdioHost};
pub use session::Session;
pub use stdlib::install_stdlib;
pub use value::{FunctionValue, Value};

use serde::Serialize;
use sprout_types::ast::Program;
use sprout_types::WireError;

/// The structured result of one program execution.
#[derive(Debug, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    /// Lines printed by `show`, in order. Output emitted before an error
    /// is preserved.
    pub output: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<WireError>,
}

/// Execute a program in a fresh session, capturing output.
pub fn execute(program: &Program) -> ExecutionResult {
    let session = Session::new();
    execute_in_session(program, &session)
}

/// Execute a program against a persistent session, capturing output.
///
/// `ask` has no input source here and reads empty lines; hosts that need
/// real input drive [`Evaluator`] with their own [`Host`] instead.
pub fn execute_in_session(program: &Program, session: &Session) -> ExecutionResult {
    let mut host = CapturingHost::new();
    let outcome = Evaluator::new(&mut host).eval_program(program, session.globals());
    match outcome {
        Ok(value) => ExecutionResult {
            success: true,
            output: host.output,
            return_value: Some(value),
            error: None,
        },
        Err(err) => ExecutionResult {
            success: false,
            output: host.output,
            return_value: None,
            error: Some(err.to_wire()),
        },
    }
}
