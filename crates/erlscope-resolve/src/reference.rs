//! The reference model: which node is asking, and for what kind of name.
//!
//! A [`Reference`] is the input to [`Resolver::resolve`](crate::Resolver::resolve).
//! Callers with syntactic context build one directly; callers holding only a
//! node id use [`Reference::classify`], which inspects the node and its
//! parent to decide what kind of name it stands for.

use erlscope_source::SourceFile;
use erlscope_syntax::{NodeId, NodeKind, SyntaxTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Variable,
    Function,
    Record,
    RecordField,
    Macro,
    Type,
    Module,
    Include,
}

/// A name occurrence to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub file: SourceFile,
    pub node: NodeId,
    pub kind: RefKind,
    /// The referenced name. For includes, the path literal.
    pub name: String,
    /// Arity, where the occurrence pins one (calls, fun expressions,
    /// export entries).
    pub arity: Option<u32>,
    /// Module qualifier on remote calls and remote type references.
    pub module: Option<String>,
}

impl Reference {
    pub fn new(file: SourceFile, node: NodeId, kind: RefKind, name: impl Into<String>) -> Reference {
        Reference {
            file,
            node,
            kind,
            name: name.into(),
            arity: None,
            module: None,
        }
    }

    pub fn with_arity(mut self, arity: u32) -> Reference {
        self.arity = Some(arity);
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Reference {
        self.module = Some(module.into());
        self
    }

    /// Classifies a node as a reference, or `None` for nodes that do not
    /// stand for a name (literals, declarations, structural nodes).
    pub fn classify(db: &dyn salsa::Database, file: SourceFile, node: NodeId) -> Option<Reference> {
        let tree = file.tree(db);
        match tree.kind(node) {
            NodeKind::Var { name } => {
                Some(Reference::new(file, node, RefKind::Variable, name.clone()))
            }
            NodeKind::Call { module, name, args } => {
                let name = tree.atom_name(*name)?.to_string();
                let mut reference = Reference::new(file, node, RefKind::Function, name)
                    .with_arity(args.len() as u32);
                if let Some(qualifier) = module.and_then(|m| tree.atom_name(m)) {
                    reference = reference.with_module(qualifier);
                }
                Some(reference)
            }
            NodeKind::FunWithArity { module, name, arity } => {
                let name = tree.atom_name(*name)?.to_string();
                let mut reference =
                    Reference::new(file, node, RefKind::Function, name).with_arity(*arity);
                if let Some(qualifier) = module.and_then(|m| tree.atom_name(m)) {
                    reference = reference.with_module(qualifier);
                }
                Some(reference)
            }
            NodeKind::ExportEntry { name, arity } => Some(
                Reference::new(file, node, RefKind::Function, name.clone()).with_arity(*arity),
            ),
            NodeKind::MacroUse { name, .. } => {
                let name = tree.macro_name(*name)?.to_string();
                Some(Reference::new(file, node, RefKind::Macro, name))
            }
            NodeKind::RecordExpression { name, .. } => {
                let name = tree.atom_name(*name)?.to_string();
                Some(Reference::new(file, node, RefKind::Record, name))
            }
            NodeKind::RecordFieldUse { name, .. } => {
                let name = tree.atom_name(*name)?.to_string();
                Some(Reference::new(file, node, RefKind::RecordField, name))
            }
            NodeKind::TypeRef { module, name, .. } => {
                let name = tree.atom_name(*name)?.to_string();
                let mut reference = Reference::new(file, node, RefKind::Type, name);
                if let Some(qualifier) = module.and_then(|m| tree.atom_name(m)) {
                    reference = reference.with_module(qualifier);
                }
                Some(reference)
            }
            NodeKind::Include { string, .. } => {
                let path = tree.string_value(*string)?.to_string();
                Some(Reference::new(file, node, RefKind::Include, path))
            }
            NodeKind::Atom { name } => Self::classify_atom(tree, file, node, name),
            NodeKind::StringLit { value } => {
                let parent = tree.parent(node)?;
                matches!(tree.kind(parent), NodeKind::Include { .. })
                    .then(|| Reference::new(file, node, RefKind::Include, value.clone()))
            }
            _ => None,
        }
    }

    /// Atoms are classified by the role they play in their parent.
    fn classify_atom(
        tree: &SyntaxTree,
        file: SourceFile,
        node: NodeId,
        text: &str,
    ) -> Option<Reference> {
        let parent = tree.parent(node)?;
        match tree.kind(parent) {
            NodeKind::Call { module, name, args } => {
                if *module == Some(node) {
                    return Some(Reference::new(file, node, RefKind::Module, text));
                }
                if *name == node {
                    let mut reference = Reference::new(file, node, RefKind::Function, text)
                        .with_arity(args.len() as u32);
                    if let Some(qualifier) = module.and_then(|m| tree.atom_name(m)) {
                        reference = reference.with_module(qualifier);
                    }
                    return Some(reference);
                }
                None
            }
            NodeKind::FunWithArity { module, name, arity } => {
                if *module == Some(node) {
                    return Some(Reference::new(file, node, RefKind::Module, text));
                }
                if *name == node {
                    let mut reference =
                        Reference::new(file, node, RefKind::Function, text).with_arity(*arity);
                    if let Some(qualifier) = module.and_then(|m| tree.atom_name(m)) {
                        reference = reference.with_module(qualifier);
                    }
                    return Some(reference);
                }
                None
            }
            NodeKind::RecordExpression { name, .. } => {
                (*name == node).then(|| Reference::new(file, node, RefKind::Record, text))
            }
            NodeKind::RecordFieldUse { name, .. } => {
                (*name == node).then(|| Reference::new(file, node, RefKind::RecordField, text))
            }
            NodeKind::TypeRef { module, name, .. } => {
                if *module == Some(node) {
                    return Some(Reference::new(file, node, RefKind::Module, text));
                }
                if *name == node {
                    let mut reference = Reference::new(file, node, RefKind::Type, text);
                    if let Some(qualifier) = module.and_then(|m| tree.atom_name(m)) {
                        reference = reference.with_module(qualifier);
                    }
                    return Some(reference);
                }
                None
            }
            _ => None,
        }
    }
}
