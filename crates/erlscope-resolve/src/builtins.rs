//! Language-provided vocabularies: predefined macros, built-in types and
//! built-in functions.
//!
//! These are data tables, not syntax nodes. Resolution falls back to them
//! after project declarations are exhausted, and completion mixes them in at
//! a lower priority than user code.

use fxhash::FxHashSet;
use std::sync::LazyLock;

/// Macros the preprocessor predefines for every module.
pub static KNOWN_MACROS: &[&str] = &["MODULE", "MODULE_NAME", "FILE", "LINE", "MACHINE"];

/// Type names the language defines without a declaration.
pub static BUILT_IN_TYPES: &[&str] = &[
    "term",
    "boolean",
    "byte",
    "char",
    "non_neg_integer",
    "pos_integer",
    "neg_integer",
    "number",
    "integer",
    "float",
    "list",
    "any",
    "maybe_improper_list",
    "string",
    "nonempty_string",
    "iolist",
    "module",
    "atom",
    "mfa",
    "node",
    "timeout",
    "no_return",
    "none",
];

static KNOWN_MACRO_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| KNOWN_MACROS.iter().copied().collect());

static BUILT_IN_TYPE_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| BUILT_IN_TYPES.iter().copied().collect());

pub fn known_macro(name: &str) -> Option<&'static str> {
    KNOWN_MACRO_SET.get(name).copied()
}

pub fn built_in_type(name: &str) -> Option<&'static str> {
    BUILT_IN_TYPE_SET.get(name).copied()
}

/// A built-in function, keyed by the module it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BifDescriptor {
    pub module: &'static str,
    pub name: &'static str,
    pub arity: u32,
}

macro_rules! bifs {
    ($($module:literal : $name:literal / $arity:literal),* $(,)?) => {
        &[$(BifDescriptor { module: $module, name: $name, arity: $arity }),*]
    };
}

static BIFS: &[BifDescriptor] = bifs![
    "erlang": "abs" / 1,
    "erlang": "apply" / 2,
    "erlang": "apply" / 3,
    "erlang": "atom_to_list" / 1,
    "erlang": "binary_to_list" / 1,
    "erlang": "binary_to_term" / 1,
    "erlang": "bit_size" / 1,
    "erlang": "byte_size" / 1,
    "erlang": "date" / 0,
    "erlang": "demonitor" / 1,
    "erlang": "element" / 2,
    "erlang": "error" / 1,
    "erlang": "error" / 2,
    "erlang": "exit" / 1,
    "erlang": "exit" / 2,
    "erlang": "get" / 1,
    "erlang": "halt" / 0,
    "erlang": "halt" / 1,
    "erlang": "hd" / 1,
    "erlang": "integer_to_list" / 1,
    "erlang": "is_alive" / 0,
    "erlang": "is_atom" / 1,
    "erlang": "is_binary" / 1,
    "erlang": "is_function" / 1,
    "erlang": "is_integer" / 1,
    "erlang": "is_list" / 1,
    "erlang": "is_pid" / 1,
    "erlang": "is_tuple" / 1,
    "erlang": "length" / 1,
    "erlang": "link" / 1,
    "erlang": "list_to_atom" / 1,
    "erlang": "list_to_binary" / 1,
    "erlang": "list_to_integer" / 1,
    "erlang": "make_ref" / 0,
    "erlang": "monitor" / 2,
    "erlang": "node" / 0,
    "erlang": "nodes" / 0,
    "erlang": "now" / 0,
    "erlang": "process_flag" / 2,
    "erlang": "put" / 2,
    "erlang": "register" / 2,
    "erlang": "round" / 1,
    "erlang": "self" / 0,
    "erlang": "send" / 2,
    "erlang": "setelement" / 3,
    "erlang": "size" / 1,
    "erlang": "spawn" / 1,
    "erlang": "spawn" / 3,
    "erlang": "spawn_link" / 1,
    "erlang": "spawn_link" / 3,
    "erlang": "split_binary" / 2,
    "erlang": "term_to_binary" / 1,
    "erlang": "throw" / 1,
    "erlang": "time" / 0,
    "erlang": "tl" / 1,
    "erlang": "trunc" / 1,
    "erlang": "tuple_size" / 1,
    "erlang": "tuple_to_list" / 1,
    "erlang": "unlink" / 1,
    "erlang": "unregister" / 1,
    "erlang": "whereis" / 1,
    "lists": "append" / 2,
    "lists": "filter" / 2,
    "lists": "foldl" / 3,
    "lists": "foldr" / 3,
    "lists": "keyfind" / 3,
    "lists": "keymember" / 3,
    "lists": "keysearch" / 3,
    "lists": "map" / 2,
    "lists": "member" / 2,
    "lists": "reverse" / 1,
    "lists": "sort" / 1,
];

/// All built-in functions of one module.
pub fn module_bifs(module: &str) -> impl Iterator<Item = &'static BifDescriptor> + '_ {
    BIFS.iter().filter(move |bif| bif.module == module)
}

/// Looks up a built-in function. With `arity` of `None` any arity matches
/// and the first entry wins.
pub fn bif(module: &str, name: &str, arity: Option<u32>) -> Option<&'static BifDescriptor> {
    BIFS.iter()
        .find(|bif| bif.module == module && bif.name == name && arity.map_or(true, |a| a == bif.arity))
}
