use crate::builtins::BifDescriptor;
use erlscope_source::SourceFile;
use erlscope_syntax::NodeId;

/// What a reference resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A declaration node in a project file. For record fields this is the
    /// field declaration (or, behind a macro, the atom inside the macro
    /// body); for modules it is the module attribute, or the file root when
    /// the module file carries no attribute.
    Declaration { file: SourceFile, node: NodeId },
    /// A language-provided target with no declaring node.
    Builtin(Builtin),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Function(&'static BifDescriptor),
    Macro(&'static str),
    Type(&'static str),
}

impl ResolvedTarget {
    /// The declaring file and node, if the target lives in the project.
    pub fn declaration(self) -> Option<(SourceFile, NodeId)> {
        match self {
            ResolvedTarget::Declaration { file, node } => Some((file, node)),
            ResolvedTarget::Builtin(_) => None,
        }
    }

    pub fn is_builtin(self) -> bool {
        matches!(self, ResolvedTarget::Builtin(_))
    }
}
