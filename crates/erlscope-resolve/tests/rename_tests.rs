use erlscope_resolve::rename::{rename, rename_include, rename_module, FileRenamer};
use erlscope_syntax::{NodeKind, TreeBuilder};
use std::cell::RefCell;
use std::io;

struct RecordingRenamer {
    calls: RefCell<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingRenamer {
    fn new(fail: bool) -> RecordingRenamer {
        RecordingRenamer {
            calls: RefCell::new(Vec::new()),
            fail,
        }
    }
}

impl FileRenamer for RecordingRenamer {
    fn rename_file(&self, from: &str, to: &str) -> io::Result<()> {
        self.calls
            .borrow_mut()
            .push((from.to_string(), to.to_string()));
        if self.fail {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
        } else {
            Ok(())
        }
    }
}

#[test]
fn function_rename_touches_every_clause_head() {
    let mut b = TreeBuilder::new();
    let c1 = {
        let x = b.atom("a");
        b.clause("f", vec![x], vec![])
    };
    let c2 = {
        let x = b.atom("b");
        b.clause("f", vec![x], vec![])
    };
    let f = b.function_with_clauses(vec![c1, c2]);
    let mut tree = b.build(vec![f]);

    rename(&mut tree, f, "g");

    for clause in [c1, c2] {
        let NodeKind::Clause { name, .. } = tree.kind(clause) else {
            panic!("expected a clause");
        };
        assert_eq!(tree.atom_name(*name), Some("g"));
    }
}

#[test]
fn invalid_new_names_leave_the_tree_untouched() {
    let mut b = TreeBuilder::new();
    let f = b.function("f", vec![], vec![]);
    let mut tree = b.build(vec![f]);
    let before = tree.clone();

    rename(&mut tree, f, "NotAnAtom");
    assert_eq!(tree, before);

    rename(&mut tree, f, "");
    assert_eq!(tree, before);
}

#[test]
fn variable_rename_validates_the_spelling() {
    let mut b = TreeBuilder::new();
    let x = b.var("X");
    let f = b.function("f", vec![x], vec![]);
    let mut tree = b.build(vec![f]);

    rename(&mut tree, x, "Count");
    assert_eq!(tree.var_name(x), Some("Count"));

    // Lowercase is not a variable; the edit is refused.
    rename(&mut tree, x, "count");
    assert_eq!(tree.var_name(x), Some("Count"));
}

#[test]
fn record_and_type_and_macro_renames_edit_the_name_token() {
    let mut b = TreeBuilder::new();
    let id = b.field("id");
    let rec = b.record_definition("person", vec![id]);
    let param = b.var("T");
    let ty = b.type_definition("maybe", vec![param]);
    let one = b.integer(1);
    let mac = b.macro_definition("LIMIT", vec![one]);
    let mut tree = b.build(vec![rec, ty, mac]);

    rename(&mut tree, rec, "human");
    rename(&mut tree, ty, "option");
    rename(&mut tree, mac, "MAX");
    rename(&mut tree, id, "key");

    let NodeKind::RecordDefinition { name, .. } = tree.kind(rec) else {
        panic!()
    };
    assert_eq!(tree.atom_name(*name), Some("human"));
    let NodeKind::TypeDefinition { name, .. } = tree.kind(ty) else {
        panic!()
    };
    assert_eq!(tree.atom_name(*name), Some("option"));
    let NodeKind::MacroDefinition { name, .. } = tree.kind(mac) else {
        panic!()
    };
    assert_eq!(tree.macro_name(*name), Some("MAX"));
    let NodeKind::FieldDeclaration { name, .. } = tree.kind(id) else {
        panic!()
    };
    assert_eq!(tree.atom_name(*name), Some("key"));
}

#[test]
fn module_rename_renames_the_file_then_the_attribute() {
    let mut b = TreeBuilder::new();
    let attr = b.module_attribute("old");
    let mut tree = b.build(vec![attr]);

    let renamer = RecordingRenamer::new(false);
    rename_module(&mut tree, attr, "shiny", "src/old.erl", &renamer);

    assert_eq!(
        renamer.calls.borrow().as_slice(),
        &[("src/old.erl".to_string(), "shiny.erl".to_string())]
    );
    let NodeKind::ModuleAttribute { name } = tree.kind(attr) else {
        panic!()
    };
    assert_eq!(tree.atom_name(*name), Some("shiny"));
}

#[test]
fn failed_file_rename_is_a_no_op_on_the_tree() {
    let mut b = TreeBuilder::new();
    let attr = b.module_attribute("old");
    let mut tree = b.build(vec![attr]);
    let before = tree.clone();

    let renamer = RecordingRenamer::new(true);
    rename_module(&mut tree, attr, "shiny", "src/old.erl", &renamer);

    assert_eq!(renamer.calls.borrow().len(), 1);
    assert_eq!(tree, before);
}

#[test]
fn invalid_module_names_never_reach_the_file_renamer() {
    let mut b = TreeBuilder::new();
    let attr = b.module_attribute("old");
    let mut tree = b.build(vec![attr]);

    let renamer = RecordingRenamer::new(false);
    rename_module(&mut tree, attr, "Bad Name", "src/old.erl", &renamer);
    assert!(renamer.calls.borrow().is_empty());
}

#[test]
fn include_paths_substitute_the_target_file_name() {
    let mut b = TreeBuilder::new();
    let inc = b.include("../include/rec.hrl");
    let mut tree = b.build(vec![inc]);

    rename_include(&mut tree, inc, "rec.hrl", "records.hrl");

    let NodeKind::Include { string, .. } = tree.kind(inc) else {
        panic!()
    };
    assert_eq!(tree.string_value(*string), Some("../include/records.hrl"));
}

#[test]
fn rename_refuses_structural_nodes() {
    let mut b = TreeBuilder::new();
    let one = b.integer(1);
    let two = b.integer(2);
    let t = b.tuple(vec![one, two]);
    let mut tree = b.build(vec![t]);
    let before = tree.clone();

    rename(&mut tree, t, "name");
    assert_eq!(tree, before);
}
