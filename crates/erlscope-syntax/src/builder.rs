use miette::SourceSpan;

use crate::tree::{Node, NodeId, NodeKind, SyntaxTree};

/// Constructs a [`SyntaxTree`] bottom-up: allocate leaves first, compose them
/// into forms, then seal the arena with [`TreeBuilder::build`], which creates
/// the root node and wires every parent link.
///
/// Trees come from an external parser in production; this builder is the
/// programmatic construction path used by collaborators and tests.
#[derive(Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> TreeBuilder {
        TreeBuilder::default()
    }

    pub fn push(&mut self, kind: NodeKind) -> NodeId {
        self.push_spanned(kind, SourceSpan::from((0, 0)))
    }

    pub fn push_spanned(&mut self, kind: NodeKind, span: SourceSpan) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            span,
        });
        id
    }

    // -- Tokens -------------------------------------------------------------

    pub fn atom(&mut self, name: &str) -> NodeId {
        self.push(NodeKind::Atom {
            name: name.to_string(),
        })
    }

    pub fn var(&mut self, name: &str) -> NodeId {
        self.push(NodeKind::Var {
            name: name.to_string(),
        })
    }

    pub fn macro_name(&mut self, name: &str) -> NodeId {
        self.push(NodeKind::MacroName {
            name: name.to_string(),
        })
    }

    pub fn string(&mut self, value: &str) -> NodeId {
        self.push(NodeKind::StringLit {
            value: value.to_string(),
        })
    }

    pub fn integer(&mut self, value: i64) -> NodeId {
        self.push(NodeKind::IntegerLit { value })
    }

    // -- Forms --------------------------------------------------------------

    pub fn module_attribute(&mut self, name: &str) -> NodeId {
        let name = self.atom(name);
        self.push(NodeKind::ModuleAttribute { name })
    }

    pub fn include(&mut self, path: &str) -> NodeId {
        let string = self.string(path);
        self.push(NodeKind::Include { string, lib: false })
    }

    pub fn include_lib(&mut self, path: &str) -> NodeId {
        let string = self.string(path);
        self.push(NodeKind::Include { string, lib: true })
    }

    pub fn export(&mut self, entries: &[(&str, u32)]) -> NodeId {
        let entries = entries
            .iter()
            .map(|(name, arity)| {
                self.push(NodeKind::ExportEntry {
                    name: name.to_string(),
                    arity: *arity,
                })
            })
            .collect();
        self.push(NodeKind::ExportAttribute { entries })
    }

    pub fn record_definition(&mut self, name: &str, fields: Vec<NodeId>) -> NodeId {
        let name = self.atom(name);
        self.push(NodeKind::RecordDefinition { name, fields })
    }

    pub fn field(&mut self, name: &str) -> NodeId {
        let name = self.atom(name);
        self.push(NodeKind::FieldDeclaration {
            name,
            default: None,
        })
    }

    pub fn field_with_default(&mut self, name: &str, default: NodeId) -> NodeId {
        let name = self.atom(name);
        self.push(NodeKind::FieldDeclaration {
            name,
            default: Some(default),
        })
    }

    /// A record field whose name is written through a macro use, e.g.
    /// `-record(r, {?FIELD_NAME}).`
    pub fn field_via_macro(&mut self, macro_name: &str) -> NodeId {
        let name = self.macro_use(macro_name, vec![]);
        self.push(NodeKind::FieldDeclaration {
            name,
            default: None,
        })
    }

    pub fn macro_definition(&mut self, name: &str, body: Vec<NodeId>) -> NodeId {
        let name = self.macro_name(name);
        self.push(NodeKind::MacroDefinition { name, body })
    }

    pub fn type_definition(&mut self, name: &str, params: Vec<NodeId>) -> NodeId {
        let name = self.atom(name);
        self.push(NodeKind::TypeDefinition {
            name,
            params,
            body: None,
        })
    }

    pub fn clause(&mut self, name: &str, params: Vec<NodeId>, body: Vec<NodeId>) -> NodeId {
        let name = self.atom(name);
        self.push(NodeKind::Clause { name, params, body })
    }

    pub fn function_with_clauses(&mut self, clauses: Vec<NodeId>) -> NodeId {
        self.push(NodeKind::Function { clauses })
    }

    /// Single-clause function, the common case in tests.
    pub fn function(&mut self, name: &str, params: Vec<NodeId>, body: Vec<NodeId>) -> NodeId {
        let clause = self.clause(name, params, body);
        self.function_with_clauses(vec![clause])
    }

    // -- Expressions ---------------------------------------------------------

    pub fn macro_use(&mut self, name: &str, args: Vec<NodeId>) -> NodeId {
        let name = self.macro_name(name);
        self.push(NodeKind::MacroUse { name, args })
    }

    pub fn call(&mut self, name: &str, args: Vec<NodeId>) -> NodeId {
        let name = self.atom(name);
        self.push(NodeKind::Call {
            module: None,
            name,
            args,
        })
    }

    pub fn remote_call(&mut self, module: &str, name: &str, args: Vec<NodeId>) -> NodeId {
        let module = self.atom(module);
        let name = self.atom(name);
        self.push(NodeKind::Call {
            module: Some(module),
            name,
            args,
        })
    }

    pub fn fun_with_arity(&mut self, module: Option<&str>, name: &str, arity: u32) -> NodeId {
        let module = module.map(|m| self.atom(m));
        let name = self.atom(name);
        self.push(NodeKind::FunWithArity {
            module,
            name,
            arity,
        })
    }

    pub fn assignment(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.push(NodeKind::Assignment { left, right })
    }

    pub fn list_comprehension(&mut self, template: NodeId, qualifiers: Vec<NodeId>) -> NodeId {
        self.push(NodeKind::ListComprehension {
            template,
            qualifiers,
        })
    }

    pub fn generator(&mut self, pattern: NodeId, source: NodeId) -> NodeId {
        self.push(NodeKind::Generator { pattern, source })
    }

    pub fn record_expression(&mut self, name: &str, fields: Vec<NodeId>) -> NodeId {
        let name = self.atom(name);
        self.push(NodeKind::RecordExpression {
            base: None,
            name,
            fields,
        })
    }

    pub fn record_field_use(&mut self, name: &str, value: Option<NodeId>) -> NodeId {
        let name = self.atom(name);
        self.push(NodeKind::RecordFieldUse { name, value })
    }

    pub fn type_ref(&mut self, module: Option<&str>, name: &str, args: Vec<NodeId>) -> NodeId {
        let module = module.map(|m| self.atom(m));
        let name = self.atom(name);
        self.push(NodeKind::TypeRef { module, name, args })
    }

    pub fn tuple(&mut self, elements: Vec<NodeId>) -> NodeId {
        self.push(NodeKind::Tuple { elements })
    }

    pub fn list(&mut self, elements: Vec<NodeId>) -> NodeId {
        self.push(NodeKind::List { elements })
    }

    /// Seals the arena: creates the root form list and computes every parent
    /// link from the structural children.
    pub fn build(mut self, forms: Vec<NodeId>) -> SyntaxTree {
        let root = self.push(NodeKind::Root { forms });
        let mut tree = SyntaxTree::from_parts(self.nodes, root);
        wire_parents(&mut tree);
        tree
    }
}

fn wire_parents(tree: &mut SyntaxTree) {
    let ids: Vec<NodeId> = (0..tree.len()).map(NodeId::from_index).collect();
    let mut links: Vec<(NodeId, NodeId)> = Vec::new();
    for &id in &ids {
        for child in tree.children(id) {
            links.push((child, id));
        }
    }
    for (child, parent) in links {
        tree.set_parent(child, parent);
    }
}
