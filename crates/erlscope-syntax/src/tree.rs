use miette::SourceSpan;

/// Index of a node inside its owning [`SyntaxTree`] arena.
///
/// Ids are only meaningful together with the tree they were created by and
/// stay stable across rename edits (renames replace token text in place,
/// they never restructure the arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> NodeId {
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node in the arena: its kind (with child ids embedded in the
/// payload), a link to its parent and a source span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub span: SourceSpan,
}

/// The tagged union of node shapes the resolution engine distinguishes.
///
/// This is a pragmatic subset of the Erlang grammar: everything a reference
/// or a declaration can structurally involve. Child nodes are stored as ids
/// inside the payloads; [`SyntaxTree::children`] enumerates them uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The file's form list.
    Root { forms: Vec<NodeId> },

    // -- Forms ------------------------------------------------------------
    /// `-module(name).`
    ModuleAttribute { name: NodeId },
    /// `-export([f/1, g/2]).`
    ExportAttribute { entries: Vec<NodeId> },
    /// `-include("path")` / `-include_lib("path")`.
    Include { string: NodeId, lib: bool },
    /// `-record(name, {field, ...}).`
    RecordDefinition { name: NodeId, fields: Vec<NodeId> },
    /// `-define(NAME, body).` The body is an expression list.
    MacroDefinition { name: NodeId, body: Vec<NodeId> },
    /// `-type name(Args) :: body().`
    TypeDefinition {
        name: NodeId,
        params: Vec<NodeId>,
        body: Option<NodeId>,
    },
    /// A function: one or more clauses sharing name and arity.
    Function { clauses: Vec<NodeId> },

    // -- Function structure -------------------------------------------------
    /// One clause: `name(Params) -> Body.` The name is an `Atom`, or a
    /// `MacroUse` when the function head is macro-generated.
    Clause {
        name: NodeId,
        params: Vec<NodeId>,
        body: Vec<NodeId>,
    },
    /// One `f/1` entry of an export attribute.
    ExportEntry { name: String, arity: u32 },
    /// A record field declaration; `name` is an `Atom`, or a `MacroUse` for
    /// macro-named fields (one level of indirection).
    FieldDeclaration {
        name: NodeId,
        default: Option<NodeId>,
    },

    // -- Tokens and leaves --------------------------------------------------
    Atom { name: String },
    Var { name: String },
    MacroName { name: String },
    StringLit { value: String },
    IntegerLit { value: i64 },

    // -- Expressions ----------------------------------------------------------
    /// `?NAME` / `?NAME(Args)`.
    MacroUse { name: NodeId, args: Vec<NodeId> },
    /// `name(Args)` or `module:name(Args)` when `module` is present.
    Call {
        module: Option<NodeId>,
        name: NodeId,
        args: Vec<NodeId>,
    },
    /// `fun name/arity` or `fun module:name/arity`.
    FunWithArity {
        module: Option<NodeId>,
        name: NodeId,
        arity: u32,
    },
    /// `Left = Right`.
    Assignment { left: NodeId, right: NodeId },
    /// `[Template || Qualifiers]`.
    ListComprehension {
        template: NodeId,
        qualifiers: Vec<NodeId>,
    },
    /// `Pattern <- Source` inside a comprehension.
    Generator { pattern: NodeId, source: NodeId },
    /// `#name{fields}` (optionally updating a base expression).
    RecordExpression {
        base: Option<NodeId>,
        name: NodeId,
        fields: Vec<NodeId>,
    },
    /// `field = Value` inside a record expression, or a bare `#r.field`
    /// access; the field-name occurrence is what gets resolved.
    RecordFieldUse {
        name: NodeId,
        value: Option<NodeId>,
    },
    /// A type occurrence `name()` / `module:name()` inside a type context.
    TypeRef {
        module: Option<NodeId>,
        name: NodeId,
        args: Vec<NodeId>,
    },
    Tuple { elements: Vec<NodeId> },
    List { elements: Vec<NodeId> },
}

/// An immutable-by-convention arena of nodes for one source file.
///
/// The only supported mutation is replacing the text of a name token through
/// the `set_*` methods below; that is the rename path and nothing else may
/// write to a tree once it is part of a project snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> SyntaxTree {
        SyntaxTree { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// The node behind `id`. Ids always come from this tree, so indexing is
    /// infallible; a foreign id is a caller bug.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn span(&self, id: NodeId) -> SourceSpan {
        self.node(id).span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.nodes[id.index()].parent = Some(parent);
    }

    /// Walks from `id` towards the root, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&cur| self.parent(cur))
    }

    /// The nearest strict ancestor whose kind satisfies `pred`.
    pub fn ancestor_where(
        &self,
        id: NodeId,
        pred: impl Fn(&NodeKind) -> bool,
    ) -> Option<NodeId> {
        self.ancestors(id).find(|&a| pred(self.kind(a)))
    }

    /// Structurally-typed children of a node, in source order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.kind(id) {
            NodeKind::Root { forms } => forms.clone(),
            NodeKind::ModuleAttribute { name } => vec![*name],
            NodeKind::ExportAttribute { entries } => entries.clone(),
            NodeKind::Include { string, .. } => vec![*string],
            NodeKind::RecordDefinition { name, fields } => {
                let mut out = vec![*name];
                out.extend(fields.iter().copied());
                out
            }
            NodeKind::MacroDefinition { name, body } => {
                let mut out = vec![*name];
                out.extend(body.iter().copied());
                out
            }
            NodeKind::TypeDefinition { name, params, body } => {
                let mut out = vec![*name];
                out.extend(params.iter().copied());
                out.extend(body.iter().copied());
                out
            }
            NodeKind::Function { clauses } => clauses.clone(),
            NodeKind::Clause { name, params, body } => {
                let mut out = vec![*name];
                out.extend(params.iter().copied());
                out.extend(body.iter().copied());
                out
            }
            NodeKind::FieldDeclaration { name, default } => {
                let mut out = vec![*name];
                out.extend(default.iter().copied());
                out
            }
            NodeKind::MacroUse { name, args } => {
                let mut out = vec![*name];
                out.extend(args.iter().copied());
                out
            }
            NodeKind::Call { module, name, args } => {
                let mut out: Vec<NodeId> = module.iter().copied().collect();
                out.push(*name);
                out.extend(args.iter().copied());
                out
            }
            NodeKind::FunWithArity { module, name, .. } => {
                let mut out: Vec<NodeId> = module.iter().copied().collect();
                out.push(*name);
                out
            }
            NodeKind::Assignment { left, right } => vec![*left, *right],
            NodeKind::ListComprehension {
                template,
                qualifiers,
            } => {
                let mut out = vec![*template];
                out.extend(qualifiers.iter().copied());
                out
            }
            NodeKind::Generator { pattern, source } => vec![*pattern, *source],
            NodeKind::RecordExpression { base, name, fields } => {
                let mut out: Vec<NodeId> = base.iter().copied().collect();
                out.push(*name);
                out.extend(fields.iter().copied());
                out
            }
            NodeKind::RecordFieldUse { name, value } => {
                let mut out = vec![*name];
                out.extend(value.iter().copied());
                out
            }
            NodeKind::TypeRef { module, name, args } => {
                let mut out: Vec<NodeId> = module.iter().copied().collect();
                out.push(*name);
                out.extend(args.iter().copied());
                out
            }
            NodeKind::Tuple { elements } | NodeKind::List { elements } => elements.clone(),
            NodeKind::ExportEntry { .. }
            | NodeKind::Atom { .. }
            | NodeKind::Var { .. }
            | NodeKind::MacroName { .. }
            | NodeKind::StringLit { .. }
            | NodeKind::IntegerLit { .. } => Vec::new(),
        }
    }

    // -- Token text accessors ----------------------------------------------

    pub fn atom_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Atom { name } => Some(name),
            _ => None,
        }
    }

    pub fn var_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Var { name } => Some(name),
            _ => None,
        }
    }

    pub fn macro_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::MacroName { name } => Some(name),
            _ => None,
        }
    }

    pub fn string_value(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::StringLit { value } => Some(value),
            _ => None,
        }
    }

    /// Token text of any name-bearing leaf, or of the macro name behind a
    /// `MacroUse` (the one indirection record fields are allowed).
    pub fn name_text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Atom { name }
            | NodeKind::Var { name }
            | NodeKind::MacroName { name } => Some(name),
            NodeKind::MacroUse { name, .. } => self.macro_name(*name),
            _ => None,
        }
    }

    // -- Rename mutation path ------------------------------------------------
    // These are the only writers; callers hold exclusive access to the tree
    // while using them.

    pub fn set_atom_name(&mut self, id: NodeId, new_name: String) -> bool {
        match &mut self.nodes[id.index()].kind {
            NodeKind::Atom { name } => {
                *name = new_name;
                true
            }
            _ => false,
        }
    }

    pub fn set_var_name(&mut self, id: NodeId, new_name: String) -> bool {
        match &mut self.nodes[id.index()].kind {
            NodeKind::Var { name } => {
                *name = new_name;
                true
            }
            _ => false,
        }
    }

    pub fn set_macro_name(&mut self, id: NodeId, new_name: String) -> bool {
        match &mut self.nodes[id.index()].kind {
            NodeKind::MacroName { name } => {
                *name = new_name;
                true
            }
            _ => false,
        }
    }

    pub fn set_string_value(&mut self, id: NodeId, new_value: String) -> bool {
        match &mut self.nodes[id.index()].kind {
            NodeKind::StringLit { value } => {
                *value = new_value;
                true
            }
            _ => false,
        }
    }
}
