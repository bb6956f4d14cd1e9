//! Scoped variable environments.
//!
//! An environment maps names to values and optionally links to a parent.
//! Ownership is shared (`Rc`) with interior mutability (`RefCell`): a
//! function value keeps its defining environment alive after the scope's
//! control flow has exited, and sees later mutations of it.

use crate::value::Value;
use sprout_types::SproutError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One scope record in the environment chain.
///
/// The four operations here are the complete scoping contract: every
/// statement and expression form is defined purely in terms of them.
#[derive(Debug, Default)]
pub struct Environment {
    vars: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Create a root environment with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child environment enclosed by `parent`.
    pub fn new_enclosed(parent: Rc<Environment>) -> Self {
        Self {
            vars: RefCell::new(HashMap::new()),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this environment, overwriting any existing binding
    /// here. Never touches a parent.
    pub fn define(&self, name: &str, value: Value) {
        self.vars.borrow_mut().insert(name.to_string(), value);
    }

    /// Mutate the nearest existing binding of `name`, searching this
    /// environment first and then walking parents. Never creates a binding.
    pub fn assign(&self, name: &str, value: Value) -> sprout_types::Result<()> {
        if self.vars.borrow().contains_key(name) {
            self.vars.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.assign(name, value);
        }
        Err(SproutError::UnknownVariable {
            name: name.to_string(),
            span: None,
        })
    }

    /// Look up `name`, searching outward through the chain.
    pub fn get(&self, name: &str) -> sprout_types::Result<Value> {
        if let Some(value) = self.vars.borrow().get(name) {
            return Ok(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.get(name);
        }
        Err(SproutError::UnknownVariable {
            name: name.to_string(),
            span: None,
        })
    }

    /// Whether `name` is bound anywhere in the chain. Never errors.
    pub fn has(&self, name: &str) -> bool {
        if self.vars.borrow().contains_key(name) {
            return true;
        }
        match &self.parent {
            Some(parent) => parent.has(name),
            None => false,
        }
    }

    /// Remove every binding from this environment (parents untouched),
    /// keeping the environment object itself — and every shared reference
    /// to it — intact. Used for session reset.
    pub fn clear(&self) {
        self.vars.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_then_get() {
        let env = Environment::new();
        env.define("x", Value::Number(1.0));
        assert_eq!(env.get("x").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_get_unknown_fails() {
        let env = Environment::new();
        match env.get("missing") {
            Err(SproutError::UnknownVariable { name, .. }) => assert_eq!(name, "missing"),
            other => panic!("expected UnknownVariable, got {other:?}"),
        }
    }

    #[test]
    fn test_get_walks_parents() {
        let root = Rc::new(Environment::new());
        root.define("x", Value::Number(1.0));
        let child = Environment::new_enclosed(Rc::clone(&root));
        assert_eq!(child.get("x").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_define_shadows_parent() {
        let root = Rc::new(Environment::new());
        root.define("x", Value::Number(1.0));
        let child = Environment::new_enclosed(Rc::clone(&root));
        child.define("x", Value::Number(2.0));
        assert_eq!(child.get("x").unwrap(), Value::Number(2.0));
        assert_eq!(root.get("x").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_assign_mutates_nearest_binding() {
        let root = Rc::new(Environment::new());
        root.define("x", Value::Number(1.0));
        let child = Environment::new_enclosed(Rc::clone(&root));
        child.assign("x", Value::Number(5.0)).unwrap();
        // No binding was created in the child; the root's was mutated.
        assert_eq!(root.get("x").unwrap(), Value::Number(5.0));
    }

    #[test]
    fn test_assign_never_creates_bindings() {
        let env = Environment::new();
        let err = env.assign("ghost", Value::Null).unwrap_err();
        assert!(matches!(err, SproutError::UnknownVariable { .. }));
        assert!(!env.has("ghost"));
    }

    #[test]
    fn test_has_searches_chain_without_erroring() {
        let root = Rc::new(Environment::new());
        root.define("x", Value::Null);
        let child = Environment::new_enclosed(Rc::clone(&root));
        assert!(child.has("x"));
        assert!(!child.has("y"));
    }

    #[test]
    fn test_clear_keeps_identity() {
        let env = Rc::new(Environment::new());
        env.define("x", Value::Number(1.0));
        let alias = Rc::clone(&env);
        env.clear();
        assert!(!alias.has("x"));
        assert!(Rc::ptr_eq(&env, &alias));
    }
}
