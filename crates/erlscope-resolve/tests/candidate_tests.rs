mod common;

use common::{file, project, TestDatabase};
use erlscope_resolve::candidates::{BIF_PRIORITY, MODULE_FUNCTIONS_PRIORITY};
use erlscope_resolve::{Candidate, CandidateKind, CancelToken, InsertBehavior, Resolver};
use erlscope_syntax::TreeBuilder;
use expect_test::expect;

fn render(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("{} ({})\n", c.label(), c.priority))
        .collect()
}

#[test]
fn local_functions_outrank_built_ins() {
    let db = TestDatabase::default();
    let mut b = TreeBuilder::new();
    let f = b.function("f", vec![], vec![]);
    let x = b.var("X");
    let y = b.var("Y");
    let g = b.function("g", vec![x, y], vec![]);
    let m = file(&db, "src/m.erl", b.build(vec![f, g]));

    let resolver = Resolver::new(&db, project(&db, vec![m]));
    let candidates = resolver.candidates(m, CandidateKind::Function { with_arity: false }, None);

    // Stable sort: the two locals first, in declaration order.
    assert_eq!(candidates[0].label(), "f/0");
    assert_eq!(candidates[1].label(), "g/2");
    assert_eq!(candidates[0].priority, MODULE_FUNCTIONS_PRIORITY);
    assert!(candidates[2..]
        .iter()
        .all(|c| c.priority == BIF_PRIORITY));
    assert!(candidates.iter().any(|c| c.label() == "spawn/3"));

    assert_eq!(
        candidates[0].insert,
        InsertBehavior::Parentheses { caret_inside: false }
    );
    assert_eq!(
        candidates[1].insert,
        InsertBehavior::Parentheses { caret_inside: true }
    );
}

#[test]
fn arity_positions_skip_built_ins_and_insert_the_suffix() {
    let db = TestDatabase::default();
    let mut b = TreeBuilder::new();
    let x = b.var("X");
    let f = b.function("f", vec![x], vec![]);
    let m = file(&db, "src/m.erl", b.build(vec![f]));

    let resolver = Resolver::new(&db, project(&db, vec![m]));
    let candidates = resolver.candidates(m, CandidateKind::Function { with_arity: true }, None);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].label(), "f/1");
    assert_eq!(candidates[0].insert, InsertBehavior::AritySuffix(1));
}

#[test]
fn qualified_completion_lists_exports_and_module_built_ins() {
    let db = TestDatabase::default();

    let mut b = TreeBuilder::new();
    let module = b.module_attribute("other");
    let export = b.export(&[("visible", 0)]);
    let visible = b.function("visible", vec![], vec![]);
    let hidden = b.function("hidden", vec![], vec![]);
    let other = file(&db, "src/other.erl", b.build(vec![module, export, visible, hidden]));

    let caller = file(&db, "src/caller.erl", TreeBuilder::new().build(vec![]));
    let resolver = Resolver::new(&db, project(&db, vec![other, caller]));

    let candidates = resolver.candidates(
        caller,
        CandidateKind::Function { with_arity: false },
        Some("other"),
    );
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].label(), "visible/0");

    // A module without a project file still completes its built-ins.
    let candidates = resolver.candidates(
        caller,
        CandidateKind::Function { with_arity: false },
        Some("lists"),
    );
    expect![[r#"
        append/2 (20)
        filter/2 (20)
        foldl/3 (20)
        foldr/3 (20)
        keyfind/3 (20)
        keymember/3 (20)
        keysearch/3 (20)
        map/2 (20)
        member/2 (20)
        reverse/1 (20)
        sort/1 (20)
    "#]]
    .assert_eq(&render(&candidates));
}

#[test]
fn macro_completion_spans_the_closure_and_known_macros() {
    let db = TestDatabase::default();

    let mut b = TreeBuilder::new();
    let one = b.integer(1);
    let def = b.macro_definition("LIMIT", vec![one]);
    let header = file(&db, "src/defs.hrl", b.build(vec![def]));

    let mut b = TreeBuilder::new();
    let inc = b.include("defs.hrl");
    let two = b.integer(2);
    let local = b.macro_definition("LOCAL", vec![two]);
    let m = file(&db, "src/m.erl", b.build(vec![inc, local]));

    let resolver = Resolver::new(&db, project(&db, vec![m, header]));
    let candidates = resolver.candidates(m, CandidateKind::Macro, None);

    let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"LOCAL"));
    assert!(names.contains(&"LIMIT"));
    assert!(names.contains(&"MODULE"));

    let known = candidates.iter().find(|c| c.name == "MODULE").unwrap();
    assert_eq!(known.priority, BIF_PRIORITY);
    assert_eq!(known.insert, InsertBehavior::None);
}

#[test]
fn record_completion_spans_the_closure() {
    let db = TestDatabase::default();

    let mut b = TreeBuilder::new();
    let id = b.field("id");
    let rec = b.record_definition("person", vec![id]);
    let header = file(&db, "src/defs.hrl", b.build(vec![rec]));

    let mut b = TreeBuilder::new();
    let inc = b.include("defs.hrl");
    let m = file(&db, "src/m.erl", b.build(vec![inc]));

    let resolver = Resolver::new(&db, project(&db, vec![m, header]));
    let candidates = resolver.candidates(m, CandidateKind::Record, None);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "person");
}

#[test]
fn cancelled_requests_yield_no_candidates_at_all() {
    let db = TestDatabase::default();
    let mut b = TreeBuilder::new();
    let f = b.function("f", vec![], vec![]);
    let m = file(&db, "src/m.erl", b.build(vec![f]));

    let token = CancelToken::new();
    token.cancel();
    let resolver = Resolver::with_cancel_token(&db, project(&db, vec![m]), token);

    // Not even the built-in vocabularies leak out of an abandoned request.
    for kind in [
        CandidateKind::Function { with_arity: false },
        CandidateKind::Macro,
        CandidateKind::Record,
        CandidateKind::Type { with_built_in: true },
    ] {
        assert!(resolver.candidates(m, kind, None).is_empty());
    }
    assert!(resolver
        .candidates(m, CandidateKind::Function { with_arity: false }, Some("lists"))
        .is_empty());
}

#[test]
fn type_completion_can_mix_in_the_built_in_vocabulary() {
    let db = TestDatabase::default();
    let mut b = TreeBuilder::new();
    let param = b.var("T");
    let decl = b.type_definition("maybe", vec![param]);
    let m = file(&db, "src/m.erl", b.build(vec![decl]));

    let resolver = Resolver::new(&db, project(&db, vec![m]));

    let without = resolver.candidates(m, CandidateKind::Type { with_built_in: false }, None);
    assert_eq!(without.len(), 1);
    assert_eq!(without[0].label(), "maybe/1");
    assert_eq!(
        without[0].insert,
        InsertBehavior::Parentheses { caret_inside: true }
    );

    let with = resolver.candidates(m, CandidateKind::Type { with_built_in: true }, None);
    assert_eq!(with[0].label(), "maybe/1");
    assert!(with.iter().any(|c| c.name == "integer"));
    assert!(with
        .iter()
        .filter(|c| c.priority == BIF_PRIORITY)
        .all(|c| c.insert == InsertBehavior::Parentheses { caret_inside: false }));
}
