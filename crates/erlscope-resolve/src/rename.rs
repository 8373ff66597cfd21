//! In-place rename edits.
//!
//! Rename operates on a tree the caller owns exclusively (typically a clone
//! of the snapshot's tree, committed back through the salsa setter once no
//! readers remain). Every entry point is a no-op on failure: an invalid new
//! name, a node that is not a renameable declaration, or a failed file
//! rename all leave the tree exactly as it was. Each returns the node id of
//! the edited name token, which is the same id that went in; renames never
//! restructure the arena.

use crate::error::RenameError;
use erlscope_syntax::{ElementFactory, NodeId, NodeKind, SyntaxTree};

/// Renames the target's backing file when a module is renamed. The engine
/// has no filesystem of its own; the embedding editor supplies this.
pub trait FileRenamer {
    fn rename_file(&self, from_location: &str, to_file_name: &str) -> std::io::Result<()>;
}

/// Renames a declaration or name occurrence in place. Handles functions
/// (every clause head), variables, records, record fields, macros, types
/// and bare name tokens. Modules and includes need collaborators; see
/// [`rename_module`] and [`rename_include`].
pub fn rename(tree: &mut SyntaxTree, target: NodeId, new_name: &str) -> NodeId {
    if let Err(err) = try_rename(tree, target, new_name) {
        log::debug!("rename of node {target:?} to `{new_name}` refused: {err}");
    }
    target
}

fn try_rename(tree: &mut SyntaxTree, target: NodeId, new_name: &str) -> Result<(), RenameError> {
    match tree.kind(target) {
        NodeKind::Function { clauses } => {
            let name = ElementFactory::atom(new_name)?;
            // Every clause head carries the name; rename them all.
            let heads: Vec<NodeId> = clauses
                .iter()
                .filter_map(|&clause| match tree.kind(clause) {
                    NodeKind::Clause { name, .. } => Some(*name),
                    _ => None,
                })
                .collect();
            for head in heads {
                tree.set_atom_name(head, name.clone());
            }
            Ok(())
        }
        NodeKind::Clause { name, .. } => {
            let head = *name;
            let name = ElementFactory::atom(new_name)?;
            set_atom(tree, head, name)
        }
        NodeKind::Var { .. } => {
            let name = ElementFactory::variable(new_name)?;
            tree.set_var_name(target, name);
            Ok(())
        }
        NodeKind::RecordDefinition { name, .. } | NodeKind::TypeDefinition { name, .. } => {
            let token = *name;
            let name = ElementFactory::atom(new_name)?;
            set_atom(tree, token, name)
        }
        NodeKind::MacroDefinition { name, .. } => {
            let token = *name;
            let name = ElementFactory::macro_name(new_name)?;
            if tree.set_macro_name(token, name) {
                Ok(())
            } else {
                Err(RenameError::NotRenameable)
            }
        }
        NodeKind::FieldDeclaration { name, .. } => {
            let token = *name;
            let name = ElementFactory::atom(new_name)?;
            // Macro-named fields are renamed at their macro definition, not
            // through the field.
            set_atom(tree, token, name)
        }
        NodeKind::Atom { .. } => {
            let name = ElementFactory::atom(new_name)?;
            tree.set_atom_name(target, name);
            Ok(())
        }
        NodeKind::MacroName { .. } => {
            let name = ElementFactory::macro_name(new_name)?;
            tree.set_macro_name(target, name);
            Ok(())
        }
        _ => Err(RenameError::NotRenameable),
    }
}

fn set_atom(tree: &mut SyntaxTree, token: NodeId, name: String) -> Result<(), RenameError> {
    if tree.set_atom_name(token, name) {
        Ok(())
    } else {
        Err(RenameError::NotRenameable)
    }
}

/// Renames a module: the backing file first, then the attribute's atom. A
/// failed file rename leaves the tree untouched.
pub fn rename_module(
    tree: &mut SyntaxTree,
    module_attribute: NodeId,
    new_name: &str,
    file_location: &str,
    renamer: &dyn FileRenamer,
) -> NodeId {
    if let Err(err) =
        try_rename_module(tree, module_attribute, new_name, file_location, renamer)
    {
        log::debug!("module rename of `{file_location}` to `{new_name}` refused: {err}");
    }
    module_attribute
}

fn try_rename_module(
    tree: &mut SyntaxTree,
    module_attribute: NodeId,
    new_name: &str,
    file_location: &str,
    renamer: &dyn FileRenamer,
) -> Result<(), RenameError> {
    let NodeKind::ModuleAttribute { name } = tree.kind(module_attribute) else {
        return Err(RenameError::NotRenameable);
    };
    let token = *name;
    let name = ElementFactory::atom(new_name)?;

    let extension = file_location.rsplit('.').next().unwrap_or("erl");
    let to_file_name = format!("{name}.{extension}");
    renamer
        .rename_file(file_location, &to_file_name)
        .map_err(RenameError::FileRename)?;

    set_atom(tree, token, name)
}

/// Rewrites an include path after its target file was renamed: the target's
/// old file name is substituted with the new one inside the path literal.
pub fn rename_include(
    tree: &mut SyntaxTree,
    include: NodeId,
    old_file_name: &str,
    new_file_name: &str,
) -> NodeId {
    if let Err(err) = try_rename_include(tree, include, old_file_name, new_file_name) {
        log::debug!("include path rename to `{new_file_name}` refused: {err}");
    }
    include
}

fn try_rename_include(
    tree: &mut SyntaxTree,
    include: NodeId,
    old_file_name: &str,
    new_file_name: &str,
) -> Result<(), RenameError> {
    let NodeKind::Include { string, .. } = tree.kind(include) else {
        return Err(RenameError::NotRenameable);
    };
    let token = *string;
    let Some(path) = tree.string_value(token) else {
        return Err(RenameError::NotRenameable);
    };
    let new_path = ElementFactory::string(&path.replace(old_file_name, new_file_name))?;
    tree.set_string_value(token, new_path);
    Ok(())
}
