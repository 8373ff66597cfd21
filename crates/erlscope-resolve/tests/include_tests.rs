mod common;

use common::{file, project, TestDatabase};
use erlscope_resolve::{includes, CancelToken, RefKind, Reference, ResolvedTarget, Resolver};
use erlscope_syntax::TreeBuilder;

#[test]
fn direct_includes_resolve_relative_to_the_including_file() {
    let db = TestDatabase::default();

    let header = file(&db, "src/defs.hrl", TreeBuilder::new().build(vec![]));
    let mut b = TreeBuilder::new();
    let inc = b.include("defs.hrl");
    let module = file(&db, "src/m.erl", b.build(vec![inc]));

    let p = project(&db, vec![module, header]);
    assert_eq!(
        includes::resolve_direct(&db, p, module, "defs.hrl"),
        Some(header)
    );
}

#[test]
fn dot_segments_are_normalized() {
    let db = TestDatabase::default();

    let header = file(&db, "include/defs.hrl", TreeBuilder::new().build(vec![]));
    let module = file(&db, "src/sub/m.erl", TreeBuilder::new().build(vec![]));
    let p = project(&db, vec![module, header]);

    assert_eq!(
        includes::resolve_direct(&db, p, module, "../../include/./defs.hrl"),
        Some(header)
    );
    // Walking above the project root resolves nothing.
    assert_eq!(
        includes::resolve_direct(&db, p, module, "../../../defs.hrl"),
        None
    );
}

#[test]
fn empty_paths_resolve_nothing() {
    let db = TestDatabase::default();
    let module = file(&db, "src/m.erl", TreeBuilder::new().build(vec![]));
    let p = project(&db, vec![module]);

    assert_eq!(includes::resolve_direct(&db, p, module, ""), None);
    assert!(includes::resolve_wildcard(&db, p, "").is_empty());
}

#[test]
fn wildcard_resolution_sees_through_versioned_directories() {
    let db = TestDatabase::default();

    let versioned = file(
        &db,
        "deps/foo-1.2.3/include/bar.hrl",
        TreeBuilder::new().build(vec![]),
    );
    let unrelated = file(&db, "deps/baz/include/bar.hrl", TreeBuilder::new().build(vec![]));
    let p = project(&db, vec![versioned, unrelated]);

    assert_eq!(
        includes::resolve_wildcard(&db, p, "foo/include/bar.hrl"),
        vec![versioned]
    );
    // A bare file name matches both, in project order.
    assert_eq!(
        includes::resolve_wildcard(&db, p, "bar.hrl"),
        vec![versioned, unrelated]
    );
}

#[test]
fn include_lib_references_resolve_via_wildcard_fallback() {
    let db = TestDatabase::default();

    let header = file(
        &db,
        "deps/stdlib-1.17.5/include/ms.hrl",
        TreeBuilder::new().build(vec![]),
    );
    let mut b = TreeBuilder::new();
    let inc = b.include_lib("stdlib/include/ms.hrl");
    let module = file(&db, "src/m.erl", b.build(vec![inc]));

    let resolver = Resolver::new(&db, project(&db, vec![module, header]));
    let reference = Reference::classify(&db, module, inc).unwrap();
    assert_eq!(reference.kind, RefKind::Include);

    let target = resolver.resolve(&reference).expect("include resolves");
    let tree = header.tree(&db);
    assert_eq!(
        target,
        ResolvedTarget::Declaration {
            file: header,
            node: tree.root()
        }
    );
}

#[test]
fn closure_starts_with_the_file_itself() {
    let db = TestDatabase::default();
    let module = file(&db, "src/m.erl", TreeBuilder::new().build(vec![]));
    let resolver = Resolver::new(&db, project(&db, vec![module]));

    assert_eq!(resolver.closure_of(module), vec![module]);
}

#[test]
fn closure_follows_transitive_includes_in_discovery_order() {
    let db = TestDatabase::default();

    let deep = file(&db, "include/deep.hrl", TreeBuilder::new().build(vec![]));
    let mut b = TreeBuilder::new();
    let inc = b.include("deep.hrl");
    let mid = file(&db, "include/mid.hrl", b.build(vec![inc]));

    let mut b = TreeBuilder::new();
    let inc = b.include("../include/mid.hrl");
    let module = file(&db, "src/m.erl", b.build(vec![inc]));

    let resolver = Resolver::new(&db, project(&db, vec![module, mid, deep]));
    assert_eq!(resolver.closure_of(module), vec![module, mid, deep]);
}

#[test]
fn include_cycles_terminate() {
    let db = TestDatabase::default();

    let mut b = TreeBuilder::new();
    let inc = b.include("b.hrl");
    let a = file(&db, "include/a.hrl", b.build(vec![inc]));

    let mut b = TreeBuilder::new();
    let inc = b.include("a.hrl");
    let bf = file(&db, "include/b.hrl", b.build(vec![inc]));

    let resolver = Resolver::new(&db, project(&db, vec![a, bf]));
    assert_eq!(resolver.closure_of(a), vec![a, bf]);
    assert_eq!(resolver.closure_of(bf), vec![bf, a]);
}

#[test]
fn self_includes_are_harmless() {
    let db = TestDatabase::default();
    let mut b = TreeBuilder::new();
    let inc = b.include("a.hrl");
    let a = file(&db, "include/a.hrl", b.build(vec![inc]));

    let resolver = Resolver::new(&db, project(&db, vec![a]));
    assert_eq!(resolver.closure_of(a), vec![a]);
}

#[test]
fn cancelled_closure_is_empty() {
    let db = TestDatabase::default();
    let header = file(&db, "src/defs.hrl", TreeBuilder::new().build(vec![]));
    let mut b = TreeBuilder::new();
    let inc = b.include("defs.hrl");
    let module = file(&db, "src/m.erl", b.build(vec![inc]));

    let token = CancelToken::new();
    token.cancel();
    let resolver =
        Resolver::with_cancel_token(&db, project(&db, vec![module, header]), token.clone());
    assert!(resolver.closure_of(module).is_empty());
    assert!(includes::include_closure(&db, resolver.project(), module, &token).is_empty());
}

#[test]
fn direct_target_outranks_wildcard_matches() {
    let db = TestDatabase::default();

    let near = file(&db, "src/util.hrl", TreeBuilder::new().build(vec![]));
    let far = file(&db, "deps/x-0.1/src/util.hrl", TreeBuilder::new().build(vec![]));
    let mut b = TreeBuilder::new();
    let inc = b.include("util.hrl");
    let module = file(&db, "src/m.erl", b.build(vec![inc]));

    let p = project(&db, vec![module, far, near]);
    let all = includes::resolve_include(&db, p, module, "util.hrl");
    assert_eq!(all.first(), Some(&near));
    assert!(all.contains(&far));
}
