//! The resolver: one request against one project snapshot.
//!
//! A [`Resolver`] borrows the database, pins the project and carries the
//! cancellation token of its request. Resolution never mutates anything, so
//! any number of resolvers can run concurrently over the same snapshot;
//! given equal inputs, [`Resolver::resolve`] always returns the same target.

use crate::builtins;
use crate::cancel::CancelToken;
use crate::declaration_index_query;
use crate::error::ResolverWarning;
use crate::includes;
use crate::reference::{RefKind, Reference};
use crate::types::{Builtin, ResolvedTarget};
use crate::walker::{walk_scope, ScopeVisitor, Visit};
use crate::ResolveDatabase;
use erlscope_source::{FileKind, Project, SourceFile, MODULE_SUFFIX};
use erlscope_syntax::{DeclarationIndex, NodeId, NodeKind, SyntaxTree};
use fxhash::FxHashMap;

/// Module unqualified calls implicitly search for built-ins.
const IMPLICIT_BIF_MODULE: &str = "erlang";

pub struct Resolver<'db> {
    db: &'db dyn ResolveDatabase,
    project: Project,
    cancel: CancelToken,
}

impl<'db> Resolver<'db> {
    pub fn new(db: &'db dyn ResolveDatabase, project: Project) -> Resolver<'db> {
        Resolver::with_cancel_token(db, project, CancelToken::new())
    }

    pub fn with_cancel_token(
        db: &'db dyn ResolveDatabase,
        project: Project,
        cancel: CancelToken,
    ) -> Resolver<'db> {
        Resolver {
            db,
            project,
            cancel,
        }
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn project(&self) -> Project {
        self.project
    }

    /// Resolves a reference to its target. `None` means unresolved; a
    /// cancelled token also surfaces as `None`.
    pub fn resolve(&self, reference: &Reference) -> Option<ResolvedTarget> {
        match reference.kind {
            RefKind::Variable => self.resolve_variable(reference),
            RefKind::Function => self.resolve_function(reference),
            RefKind::Record => self.resolve_record(reference),
            RefKind::RecordField => self.resolve_record_field(reference),
            RefKind::Macro => self.resolve_macro(reference),
            RefKind::Type => self.resolve_type(reference),
            RefKind::Module => self.resolve_module(&reference.name),
            RefKind::Include => self.resolve_include_target(reference),
        }
    }

    /// The include closure of `file`: the file itself plus everything
    /// transitively reachable over include edges, in discovery order.
    pub fn closure_of(&self, file: SourceFile) -> Vec<SourceFile> {
        includes::include_closure(self.db, self.project, file, &self.cancel)
    }

    /// Duplicate-declaration warnings for one file.
    pub fn duplicate_definitions(&self, file: SourceFile) -> Vec<ResolverWarning> {
        duplicate_definitions_in(file.tree(self.db), self.index(file))
    }

    pub(crate) fn index(&self, file: SourceFile) -> &'db DeclarationIndex {
        declaration_index_query(self.db, file)
    }

    /// Module files matching a module name, in project order.
    pub(crate) fn module_files(&self, module: &str) -> Vec<SourceFile> {
        self.project.files_by_name(
            self.db,
            &format!("{module}{MODULE_SUFFIX}"),
            &[FileKind::Module],
        )
    }

    // -- Variables ----------------------------------------------------------

    /// Nearest binding occurrence of the name: enclosing comprehension
    /// scopes innermost-first, then the enclosing clause. Variables never
    /// escape their clause; only references outside any clause search the
    /// module body.
    fn resolve_variable(&self, reference: &Reference) -> Option<ResolvedTarget> {
        let tree = reference.file.tree(self.db);
        let mut scopes = Vec::new();
        let mut in_clause = false;
        for ancestor in tree.ancestors(reference.node) {
            match tree.kind(ancestor) {
                NodeKind::ListComprehension { .. } => scopes.push(ancestor),
                NodeKind::Clause { .. } => {
                    scopes.push(ancestor);
                    in_clause = true;
                    break;
                }
                _ => {}
            }
        }
        if !in_clause {
            scopes.push(tree.root());
        }
        for scope in scopes {
            let mut finder = BindingFinder {
                name: &reference.name,
                skip: reference.node,
                found: None,
            };
            walk_scope(tree, scope, &self.cancel, &mut finder);
            if self.cancel.is_cancelled() {
                return None;
            }
            if let Some(node) = finder.found {
                return Some(ResolvedTarget::Declaration {
                    file: reference.file,
                    node,
                });
            }
        }
        None
    }

    // -- Functions ----------------------------------------------------------

    fn resolve_function(&self, reference: &Reference) -> Option<ResolvedTarget> {
        if let Some(module) = &reference.module {
            return self.resolve_qualified_function(module, &reference.name, reference.arity);
        }
        if let Some(decl) = self.index(reference.file).function(&reference.name, reference.arity) {
            return Some(ResolvedTarget::Declaration {
                file: reference.file,
                node: decl.node,
            });
        }
        // Local declarations shadow the auto-imported built-ins.
        builtins::bif(IMPLICIT_BIF_MODULE, &reference.name, reference.arity)
            .map(|bif| ResolvedTarget::Builtin(Builtin::Function(bif)))
    }

    /// Remote references see only the target module's exported functions.
    fn resolve_qualified_function(
        &self,
        module: &str,
        name: &str,
        arity: Option<u32>,
    ) -> Option<ResolvedTarget> {
        for file in self.module_files(module) {
            if let Some(decl) = self.index(file).exported_function(name, arity) {
                return Some(ResolvedTarget::Declaration {
                    file,
                    node: decl.node,
                });
            }
        }
        builtins::bif(module, name, arity).map(|bif| ResolvedTarget::Builtin(Builtin::Function(bif)))
    }

    // -- Records, macros, types ----------------------------------------------

    fn resolve_record(&self, reference: &Reference) -> Option<ResolvedTarget> {
        self.find_through_includes(reference.file, |index| {
            index.record(&reference.name).map(|decl| decl.node)
        })
    }

    fn resolve_macro(&self, reference: &Reference) -> Option<ResolvedTarget> {
        self.find_through_includes(reference.file, |index| {
            index.macro_def(&reference.name).map(|decl| decl.node)
        })
        .or_else(|| {
            builtins::known_macro(&reference.name)
                .map(|name| ResolvedTarget::Builtin(Builtin::Macro(name)))
        })
    }

    fn resolve_type(&self, reference: &Reference) -> Option<ResolvedTarget> {
        if let Some(module) = &reference.module {
            for file in self.module_files(module) {
                if let Some(decl) = self.index(file).type_def(&reference.name) {
                    return Some(ResolvedTarget::Declaration {
                        file,
                        node: decl.node,
                    });
                }
            }
            return None;
        }
        self.find_through_includes(reference.file, |index| {
            index.type_def(&reference.name).map(|decl| decl.node)
        })
        .or_else(|| {
            builtins::built_in_type(&reference.name)
                .map(|name| ResolvedTarget::Builtin(Builtin::Type(name)))
        })
    }

    /// Searches the declaring file, then its include closure in discovery
    /// order. The first file with a match wins.
    fn find_through_includes(
        &self,
        file: SourceFile,
        pick: impl Fn(&DeclarationIndex) -> Option<NodeId>,
    ) -> Option<ResolvedTarget> {
        if let Some(node) = pick(self.index(file)) {
            return Some(ResolvedTarget::Declaration { file, node });
        }
        // Closure starts with `file` itself, which was just searched.
        for candidate in self.closure_of(file).into_iter().skip(1) {
            if let Some(node) = pick(self.index(candidate)) {
                return Some(ResolvedTarget::Declaration {
                    file: candidate,
                    node,
                });
            }
        }
        None
    }

    // -- Record fields --------------------------------------------------------

    /// A field occurrence resolves against the record named by its enclosing
    /// record expression: a matching plain-atom field wins, otherwise each
    /// macro-named field is followed one hop into the macro body.
    fn resolve_record_field(&self, reference: &Reference) -> Option<ResolvedTarget> {
        let tree = reference.file.tree(self.db);
        let record_expr = match tree.kind(reference.node) {
            NodeKind::RecordExpression { .. } => reference.node,
            _ => tree.ancestor_where(reference.node, |kind| {
                matches!(kind, NodeKind::RecordExpression { .. })
            })?,
        };
        let NodeKind::RecordExpression { name, .. } = tree.kind(record_expr) else {
            return None;
        };
        let record_name = tree.atom_name(*name)?;

        let record_ref = Reference::new(reference.file, *name, RefKind::Record, record_name);
        let (record_file, record_node) = self.resolve_record(&record_ref)?.declaration()?;
        let record_tree = record_file.tree(self.db);
        let NodeKind::RecordDefinition { fields, .. } = record_tree.kind(record_node) else {
            return None;
        };

        for &field in fields {
            let NodeKind::FieldDeclaration { name, .. } = record_tree.kind(field) else {
                continue;
            };
            match record_tree.kind(*name) {
                NodeKind::Atom { name: text } => {
                    if text == &reference.name {
                        return Some(ResolvedTarget::Declaration {
                            file: record_file,
                            node: field,
                        });
                    }
                }
                NodeKind::MacroUse { name: macro_name, .. } => {
                    let Some(macro_text) = record_tree.macro_name(*macro_name) else {
                        continue;
                    };
                    if let Some(target) =
                        self.field_atom_behind_macro(record_file, *name, macro_text, &reference.name)
                    {
                        return Some(target);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// One hop of macro indirection: the macro is resolved relative to the
    /// record's declaring file, and its body is scanned for a plain atom or
    /// an assignment whose left side is a plain atom.
    fn field_atom_behind_macro(
        &self,
        record_file: SourceFile,
        use_node: NodeId,
        macro_name: &str,
        wanted: &str,
    ) -> Option<ResolvedTarget> {
        let macro_ref = Reference::new(record_file, use_node, RefKind::Macro, macro_name);
        let (macro_file, macro_node) = self.resolve_macro(&macro_ref)?.declaration()?;
        let macro_tree = macro_file.tree(self.db);
        let NodeKind::MacroDefinition { body, .. } = macro_tree.kind(macro_node) else {
            return None;
        };
        for &expr in body {
            let atom = match macro_tree.kind(expr) {
                NodeKind::Atom { .. } => Some(expr),
                NodeKind::Assignment { left, .. } => {
                    matches!(macro_tree.kind(*left), NodeKind::Atom { .. }).then_some(*left)
                }
                _ => None,
            };
            if let Some(atom) = atom {
                if macro_tree.atom_name(atom) == Some(wanted) {
                    return Some(ResolvedTarget::Declaration {
                        file: macro_file,
                        node: atom,
                    });
                }
            }
        }
        None
    }

    // -- Modules and includes ---------------------------------------------------

    /// A module name resolves to the first module file named `name.erl`; the
    /// target node is its module attribute, or the file root without one.
    pub fn resolve_module(&self, name: &str) -> Option<ResolvedTarget> {
        let file = self.module_files(name).into_iter().next()?;
        let node = match &self.index(file).module {
            Some((_, node)) => *node,
            None => file.tree(self.db).root(),
        };
        Some(ResolvedTarget::Declaration { file, node })
    }

    fn resolve_include_target(&self, reference: &Reference) -> Option<ResolvedTarget> {
        let file = includes::resolve_direct(self.db, self.project, reference.file, &reference.name)
            .or_else(|| {
                includes::resolve_wildcard(self.db, self.project, &reference.name)
                    .into_iter()
                    .next()
            })?;
        Some(ResolvedTarget::Declaration {
            file,
            node: file.tree(self.db).root(),
        })
    }
}

/// Scans an indexed file for declarations made unreachable by an earlier
/// declaration of the same name (and arity, for functions and types).
pub(crate) fn duplicate_definitions_in(
    tree: &SyntaxTree,
    index: &DeclarationIndex,
) -> Vec<ResolverWarning> {
    let mut warnings = Vec::new();

    let mut functions: FxHashMap<(&str, u32), NodeId> = FxHashMap::default();
    for decl in &index.functions {
        check_duplicate(
            tree,
            &mut functions,
            (decl.name.as_str(), decl.arity),
            &decl.name,
            decl.node,
            &mut warnings,
        );
    }
    let mut types: FxHashMap<(&str, u32), NodeId> = FxHashMap::default();
    for decl in &index.types {
        check_duplicate(
            tree,
            &mut types,
            (decl.name.as_str(), decl.arity),
            &decl.name,
            decl.node,
            &mut warnings,
        );
    }
    let mut records: FxHashMap<&str, NodeId> = FxHashMap::default();
    for decl in &index.records {
        check_duplicate(
            tree,
            &mut records,
            decl.name.as_str(),
            &decl.name,
            decl.node,
            &mut warnings,
        );
    }
    let mut macros: FxHashMap<&str, NodeId> = FxHashMap::default();
    for decl in &index.macros {
        check_duplicate(
            tree,
            &mut macros,
            decl.name.as_str(),
            &decl.name,
            decl.node,
            &mut warnings,
        );
    }

    warnings
}

fn check_duplicate<K: std::hash::Hash + Eq>(
    tree: &SyntaxTree,
    seen: &mut FxHashMap<K, NodeId>,
    key: K,
    name: &str,
    node: NodeId,
    warnings: &mut Vec<ResolverWarning>,
) {
    match seen.get(&key) {
        Some(&first) => warnings.push(ResolverWarning::DuplicateDefinition {
            name: name.to_string(),
            first: tree.span(first),
            duplicate: tree.span(node),
        }),
        None => {
            seen.insert(key, node);
        }
    }
}

/// Finds the first binding occurrence of a variable name in scope order.
struct BindingFinder<'a> {
    name: &'a str,
    skip: NodeId,
    found: Option<NodeId>,
}

impl ScopeVisitor for BindingFinder<'_> {
    fn visit(&mut self, tree: &SyntaxTree, node: NodeId) -> Visit {
        if node != self.skip {
            if let NodeKind::Var { name } = tree.kind(node) {
                if name == self.name && is_binding_position(tree, node) {
                    self.found = Some(node);
                    return Visit::Stop;
                }
            }
        }
        Visit::Continue
    }
}

/// Whether a variable occurrence binds its name: a clause parameter, a
/// generator pattern, or (part of) the left side of an assignment.
fn is_binding_position(tree: &SyntaxTree, node: NodeId) -> bool {
    let mut child = node;
    for parent in tree.ancestors(node) {
        match tree.kind(parent) {
            NodeKind::Assignment { left, .. } => {
                if *left == child {
                    return true;
                }
                child = parent;
            }
            NodeKind::Generator { pattern, .. } => return *pattern == child,
            NodeKind::Clause { params, .. } => return params.contains(&child),
            _ => child = parent,
        }
    }
    false
}
