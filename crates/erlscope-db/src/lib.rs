//! The erlscope engine facade: a single salsa database implementing every
//! query group, plus snapshot-assembly helpers.
//!
//! Embedders construct an [`Engine`], register parsed files, group them into
//! a [`Project`](erlscope_source::Project) snapshot and resolve references
//! through [`Engine::resolver`].

mod database;
mod error;

pub use database::Engine;
pub use error::EngineError;
