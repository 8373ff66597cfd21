//! Shared fixtures: a database implementing every query group, plus file and
//! project constructors.

use erlscope_resolve::ResolveDatabase;
use erlscope_source::{FileKind, Project, SourceDatabase, SourceFile};
use erlscope_syntax::SyntaxTree;

#[salsa::db]
#[derive(Default, Clone)]
pub struct TestDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for TestDatabase {
    fn salsa_event(&self, event: &dyn Fn() -> salsa::Event) {
        event();
    }
}

#[salsa::db]
impl SourceDatabase for TestDatabase {}

#[salsa::db]
impl ResolveDatabase for TestDatabase {}

#[allow(dead_code)]
pub fn file(db: &TestDatabase, location: &str, tree: SyntaxTree) -> SourceFile {
    let kind = FileKind::of_location(location).expect("test locations carry a known suffix");
    SourceFile::new(db, location.to_string(), kind, tree)
}

#[allow(dead_code)]
pub fn project(db: &TestDatabase, files: Vec<SourceFile>) -> Project {
    Project::new(db, "fixture".to_string(), files)
}
