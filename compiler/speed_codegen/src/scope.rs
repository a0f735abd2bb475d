//! Lexical scopes for local variables.
//!
//! `Scope` uses `im::HashMap`, so `child()` is an O(1) structural-sharing
//! clone. A block generates into a child and drops it afterwards; the
//! parent never sees the block's bindings. Each function starts from an
//! empty scope, so locals never leak between function bodies.

use im::HashMap;

use crate::ir::{IrType, Value};

/// Storage for a local: a stack slot and what lives in it.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    /// Pointer to the slot (`ty*`).
    pub ptr: Value,
    pub ty: IrType,
    /// `false` for `const`.
    pub mutable: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, Binding>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope that inherits every binding of `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        self.clone()
    }

    /// Bind `name`, shadowing any binding it had.
    pub fn bind(&mut self, name: impl Into<String>, binding: Binding) {
        self.bindings.insert(name.into(), binding);
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }
}
