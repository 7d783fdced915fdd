//! glint-util - shared foundation types
//!
//! Holds the two concerns every later pipeline stage needs but none of them
//! owns outright: interned identifier strings (`Symbol`) and stable AST node
//! identity (`NodeId`). Kept deliberately small — this crate has no notion
//! of tokens, syntax, or values.

use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// A compact, `Copy` handle to an interned string.
///
/// Two identifiers with the same text always intern to the same `Symbol`,
/// so comparing symbols is an integer comparison rather than a string
/// comparison. The backing table is process-global: a host embedding
/// multiple interpreter instances (see the core's concurrency model) can
/// share one table across threads, guarded by a [`parking_lot::RwLock`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

struct Interner {
    strings: Vec<&'static str>,
    lookup: FxHashMap<&'static str, u32>,
}

impl Interner {
    fn new() -> Self {
        Self {
            strings: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }
}

fn table() -> &'static RwLock<Interner> {
    static TABLE: OnceLock<RwLock<Interner>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(Interner::new()))
}

impl Symbol {
    /// Intern `text`, returning the symbol for it. Interning the same text
    /// twice (even from different threads) returns the same symbol.
    pub fn intern(text: &str) -> Self {
        if let Some(&id) = table().read().lookup.get(text) {
            return Symbol(id);
        }

        let mut table = table().write();
        // Another writer may have interned `text` while we waited for the lock.
        if let Some(&id) = table.lookup.get(text) {
            return Symbol(id);
        }

        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        let id = table.strings.len() as u32;
        table.strings.push(leaked);
        table.lookup.insert(leaked, id);
        Symbol(id)
    }

    /// The interned string this symbol refers to.
    pub fn as_str(&self) -> &'static str {
        table().read().strings[self.0 as usize]
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stable integer identity assigned to an AST node at parse time.
///
/// The resolver keys its scope-depth map by `NodeId` rather than by AST
/// pointer identity, so the map survives moves/clones of the tree and is
/// trivial to test in isolation (see Design Notes: "Node identity for the
/// resolver map").
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Hands out fresh, sequential [`NodeId`]s. One `NodeIdGen` lives for the
/// duration of a single parse; node IDs are not meaningful across parses.
#[derive(Default)]
pub struct NodeIdGen {
    next: u32,
}

impl NodeIdGen {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// 1-based source line, as produced by the scanner and threaded through
/// every diagnostic.
pub type Line = u32;
