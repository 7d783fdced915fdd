//! The environment chain: a parent-linked sequence of scopes, each a
//! mutable map from name to value.
//!
//! Grounded on the original `Env{values, parent}` (`environment.go`):
//! `Get`/`Set`/`Assign` walk the parent chain exactly as there. `GetAt`/
//! `AssignAt`/`ancestor` are kept as free functions taking an `EnvRef`
//! rather than methods, since Rust has no stable `self: &Rc<Self>`
//! receiver — the shape is otherwise unchanged.
//!
//! Ownership uses a plain `Rc` rather than the original's arena
//! allocator or garbage collector: this interpreter is single-instance
//! and single-threaded, and the only cycle a closure can form (a
//! recursive function referencing the scope it was declared in) is
//! broken when the instance itself is torn down, per Design Note
//! "Cyclic ownership of environments", option (a)'s simplicity without
//! needing (a)'s pooled-index bookkeeping.

use std::cell::RefCell;
use std::rc::Rc;

use glint_util::Symbol;
use rustc_hash::FxHashMap;

use crate::value::Value;

pub struct Environment {
    values: RefCell<FxHashMap<Symbol, Value>>,
    parent: Option<EnvRef>,
}

pub type EnvRef = Rc<Environment>;

impl Environment {
    pub fn global() -> EnvRef {
        Rc::new(Self {
            values: RefCell::new(FxHashMap::default()),
            parent: None,
        })
    }

    pub fn child(parent: &EnvRef) -> EnvRef {
        tracing::trace!("push environment");
        Rc::new(Self {
            values: RefCell::new(FxHashMap::default()),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Declares or overwrites `name` in this scope. Used for `dec`/
    /// short-declaration statements and for parameter binding — never
    /// requires the name to already exist.
    pub fn define(&self, name: Symbol, value: Value) {
        self.values.borrow_mut().insert(name, value);
    }

    /// Looks up `name` in this scope, then recursively in parents.
    pub fn get(&self, name: Symbol) -> Option<Value> {
        if let Some(value) = self.values.borrow().get(&name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Assigns to an already-declared `name`, searching this scope then
    /// parents. Returns `false` if `name` is declared nowhere in the
    /// chain — the caller turns that into a runtime error.
    pub fn assign(&self, name: Symbol, value: Value) -> bool {
        if self.values.borrow().contains_key(&name) {
            self.values.borrow_mut().insert(name, value);
            return true;
        }
        match &self.parent {
            Some(parent) => parent.assign(name, value),
            None => false,
        }
    }
}

/// Walks `depth` parent links up from `env`.
pub fn ancestor(env: &EnvRef, depth: u32) -> EnvRef {
    let mut current = Rc::clone(env);
    for _ in 0..depth {
        let parent = current
            .parent
            .clone()
            .expect("resolver-reported depth exceeds the live scope chain");
        current = parent;
    }
    current
}

pub fn get_at(env: &EnvRef, depth: u32, name: Symbol) -> Option<Value> {
    ancestor(env, depth).values.borrow().get(&name).cloned()
}

pub fn assign_at(env: &EnvRef, depth: u32, name: Symbol, value: Value) {
    ancestor(env, depth).values.borrow_mut().insert(name, value);
}
