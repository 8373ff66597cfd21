use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// A function declaration: name and arity taken from the first clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub arity: u32,
    pub node: NodeId,
    /// Whether an `-export` attribute lists this name/arity.
    pub exported: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecl {
    pub name: String,
    pub node: NodeId,
    /// `FieldDeclaration` nodes, in declaration order.
    pub fields: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDecl {
    pub name: String,
    pub node: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub arity: u32,
    pub node: NodeId,
}

/// Per-file enumeration of local declarations, insertion-order preserved.
///
/// Built once per file from the form list; the resolution engine consults it
/// through a memoized query and never mutates it. Duplicate names are kept
/// as-is: lookup returns the first match, which is the documented (if not
/// necessarily intentional) disambiguation order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeclarationIndex {
    /// `-module(name)` attribute: the name and the attribute's node.
    pub module: Option<(String, NodeId)>,
    pub functions: Vec<FunctionDecl>,
    pub records: Vec<RecordDecl>,
    pub macros: Vec<MacroDecl>,
    pub types: Vec<TypeDecl>,
    /// `Include` form nodes, in source order.
    pub includes: Vec<NodeId>,
    /// `-export` entries as (name, arity) pairs.
    pub exports: Vec<(String, u32)>,
}

impl DeclarationIndex {
    pub fn build(tree: &SyntaxTree) -> DeclarationIndex {
        let mut index = DeclarationIndex::default();

        for form in tree.children(tree.root()) {
            match tree.kind(form) {
                NodeKind::ModuleAttribute { name } => {
                    if index.module.is_none() {
                        if let Some(text) = tree.atom_name(*name) {
                            index.module = Some((text.to_string(), form));
                        }
                    }
                }
                NodeKind::ExportAttribute { entries } => {
                    for &entry in entries {
                        if let NodeKind::ExportEntry { name, arity } = tree.kind(entry) {
                            index.exports.push((name.clone(), *arity));
                        }
                    }
                }
                NodeKind::Include { .. } => index.includes.push(form),
                NodeKind::RecordDefinition { name, fields } => {
                    if let Some(text) = tree.atom_name(*name) {
                        index.records.push(RecordDecl {
                            name: text.to_string(),
                            node: form,
                            fields: fields.clone(),
                        });
                    }
                }
                NodeKind::MacroDefinition { name, .. } => {
                    if let Some(text) = tree.macro_name(*name) {
                        index.macros.push(MacroDecl {
                            name: text.to_string(),
                            node: form,
                        });
                    }
                }
                NodeKind::TypeDefinition { name, params, .. } => {
                    if let Some(text) = tree.atom_name(*name) {
                        index.types.push(TypeDecl {
                            name: text.to_string(),
                            arity: params.len() as u32,
                            node: form,
                        });
                    }
                }
                NodeKind::Function { clauses } => {
                    if let Some(decl) = function_decl(tree, form, clauses) {
                        index.functions.push(decl);
                    }
                }
                _ => {}
            }
        }

        for function in &mut index.functions {
            function.exported = index
                .exports
                .iter()
                .any(|(name, arity)| *name == function.name && *arity == function.arity);
        }

        index
    }

    pub fn module_name(&self) -> Option<&str> {
        self.module.as_ref().map(|(name, _)| name.as_str())
    }

    /// First function matching `name`; when `arity` is known it must match
    /// exactly, otherwise the first name match wins.
    pub fn function(&self, name: &str, arity: Option<u32>) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| {
            f.name == name && arity.map_or(true, |a| f.arity == a)
        })
    }

    pub fn exported_function(&self, name: &str, arity: Option<u32>) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| {
            f.exported && f.name == name && arity.map_or(true, |a| f.arity == a)
        })
    }

    pub fn exported_functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.functions.iter().filter(|f| f.exported)
    }

    pub fn record(&self, name: &str) -> Option<&RecordDecl> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn macro_def(&self, name: &str) -> Option<&MacroDecl> {
        self.macros.iter().find(|m| m.name == name)
    }

    pub fn type_def(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// Name from the first clause head (an atom, or the macro's name when the
/// head is macro-generated); arity is the first clause's parameter count.
fn function_decl(tree: &SyntaxTree, form: NodeId, clauses: &[NodeId]) -> Option<FunctionDecl> {
    let first = *clauses.first()?;
    let NodeKind::Clause { name, params, .. } = tree.kind(first) else {
        return None;
    };
    let text = tree.name_text(*name)?;
    Some(FunctionDecl {
        name: text.to_string(),
        arity: params.len() as u32,
        node: form,
        exported: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeBuilder;

    fn sample() -> SyntaxTree {
        let mut b = TreeBuilder::new();
        let module = b.module_attribute("sample");
        let export = b.export(&[("start", 1)]);
        let include = b.include("records.hrl");
        let f1 = {
            let x = b.var("X");
            b.function("start", vec![x], vec![])
        };
        let f2 = b.function("start", vec![], vec![]);
        let rec = {
            let field = b.field("id");
            b.record_definition("person", vec![field])
        };
        let mac = {
            let body = b.atom("value");
            b.macro_definition("DEFAULT", vec![body])
        };
        let ty = {
            let param = b.var("T");
            b.type_definition("maybe", vec![param])
        };
        b.build(vec![module, export, include, f1, f2, rec, mac, ty])
    }

    #[test]
    fn collects_all_declaration_kinds_in_order() {
        let tree = sample();
        let index = DeclarationIndex::build(&tree);

        assert_eq!(index.module_name(), Some("sample"));
        assert_eq!(index.functions.len(), 2);
        assert_eq!(index.records.len(), 1);
        assert_eq!(index.macros.len(), 1);
        assert_eq!(index.types.len(), 1);
        assert_eq!(index.includes.len(), 1);
        assert_eq!(index.exports, vec![("start".to_string(), 1)]);
    }

    #[test]
    fn arity_comes_from_the_first_clause() {
        let tree = sample();
        let index = DeclarationIndex::build(&tree);

        assert_eq!(index.functions[0].arity, 1);
        assert_eq!(index.functions[1].arity, 0);
    }

    #[test]
    fn export_marks_only_matching_arity() {
        let tree = sample();
        let index = DeclarationIndex::build(&tree);

        assert!(index.functions[0].exported);
        assert!(!index.functions[1].exported);
        assert!(index.exported_function("start", Some(0)).is_none());
        assert!(index.exported_function("start", None).is_some());
    }

    #[test]
    fn arity_lookup_is_exact_when_known() {
        let tree = sample();
        let index = DeclarationIndex::build(&tree);

        assert_eq!(index.function("start", Some(0)).map(|f| f.arity), Some(0));
        assert_eq!(index.function("start", None).map(|f| f.arity), Some(1));
        assert!(index.function("start", Some(2)).is_none());
        assert!(index.function("stop", None).is_none());
    }

    #[test]
    fn type_arity_counts_declared_parameters() {
        let tree = sample();
        let index = DeclarationIndex::build(&tree);
        assert_eq!(index.type_def("maybe").map(|t| t.arity), Some(1));
    }
}
