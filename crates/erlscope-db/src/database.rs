use erlscope_resolve::{CancelToken, ResolveDatabase, Resolver};
use erlscope_source::{FileKind, Project, SourceDatabase, SourceFile};
use erlscope_syntax::SyntaxTree;
use salsa::Setter;

use crate::error::EngineError;
use erlscope_source::ProjectError;

/// The central database: one storage implementing every query group.
///
/// `Engine` is the single writer. Readers clone it (salsa storage is a
/// shared handle) or borrow it through [`Engine::resolver`]; tree
/// replacement after a rename goes through [`Engine::commit_tree`], which
/// needs `&mut self` and therefore waits until no reader holds the engine.
#[salsa::db]
#[derive(Default, Clone)]
pub struct Engine {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for Engine {
    fn salsa_event(&self, event: &dyn Fn() -> salsa::Event) {
        log::trace!("salsa event: {:?}", event());
    }
}

macro_rules! impl_query_groups {
    ($($db:ident),*) => {
        $(
            #[salsa::db]
            impl $db for Engine {}
        )*
    };
}

impl_query_groups!(SourceDatabase, ResolveDatabase);

impl Engine {
    pub fn new() -> Engine {
        Engine::default()
    }

    /// Registers a source file, deriving its kind from the location suffix.
    pub fn add_file(
        &self,
        location: impl Into<String>,
        tree: SyntaxTree,
    ) -> Result<SourceFile, EngineError> {
        let location = location.into();
        let kind = FileKind::of_location(&location)
            .ok_or_else(|| ProjectError::UnrecognizedKind(location.clone()))?;
        Ok(SourceFile::new(self, location, kind, tree))
    }

    /// Assembles a project snapshot, rejecting duplicate locations.
    pub fn add_project(
        &self,
        name: impl Into<String>,
        files: Vec<SourceFile>,
    ) -> Result<Project, EngineError> {
        let project = Project::new(self, name.into(), files);
        project.check_locations(self)?;
        Ok(project)
    }

    /// A resolver over `project` with a fresh cancellation token.
    pub fn resolver(&self, project: Project) -> Resolver<'_> {
        Resolver::new(self, project)
    }

    /// A resolver wired to a caller-held token, so the request can be
    /// abandoned from another thread.
    pub fn resolver_with_token(&self, project: Project, cancel: CancelToken) -> Resolver<'_> {
        Resolver::with_cancel_token(self, project, cancel)
    }

    /// Replaces a file's tree, typically after a rename edit on a detached
    /// clone. Requires exclusive access; dependent queries recompute lazily.
    pub fn commit_tree(&mut self, file: SourceFile, tree: SyntaxTree) {
        file.set_tree(self).to(tree);
    }
}
