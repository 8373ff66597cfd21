//! Syntax-tree model for Erlang sources.
//!
//! This crate owns the in-memory representation the resolution engine works
//! over:
//! - An owned arena of nodes (`SyntaxTree`), addressed by `NodeId`, with
//!   computed child lists and parent links so traversals never rely on the
//!   call stack.
//! - A `TreeBuilder` for constructing trees programmatically. Parsing text
//!   into trees is an external collaborator and deliberately not part of
//!   this crate.
//! - An `ElementFactory` that validates and creates replacement name tokens,
//!   used by the rename operations.
//! - A `DeclarationIndex` enumerating the declarations of one file
//!   (functions, records, macros, types, the module attribute, exports and
//!   include directives) in insertion order.

pub mod builder;
pub mod error;
pub mod factory;
pub mod index;
pub mod tree;

pub use builder::TreeBuilder;
pub use error::SyntaxError;
pub use factory::ElementFactory;
pub use index::{DeclarationIndex, FunctionDecl, MacroDecl, RecordDecl, TypeDecl};
pub use tree::{Node, NodeId, NodeKind, SyntaxTree};
