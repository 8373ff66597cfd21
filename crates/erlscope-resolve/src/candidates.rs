//! Completion-candidate collection.
//!
//! Candidates carry a priority and an insert behavior instead of any editor
//! types; the embedding editor maps them onto its own lookup items. User
//! declarations outrank built-ins, and the returned list is sorted by
//! priority (stable, so source order breaks ties).

use crate::builtins;
use crate::core::Resolver;
use erlscope_source::SourceFile;

/// Priority of functions declared in the file (or module) under completion.
pub const MODULE_FUNCTIONS_PRIORITY: u32 = 20;

/// Priority of built-in fallbacks.
pub const BIF_PRIORITY: u32 = 10;

/// What inserting a candidate should append after its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertBehavior {
    /// Append `()`, placing the caret inside for functions with parameters.
    Parentheses { caret_inside: bool },
    /// Append `/arity` (export lists, fun expressions).
    AritySuffix(u32),
    /// Insert the bare name.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub arity: Option<u32>,
    pub priority: u32,
    pub insert: InsertBehavior,
}

impl Candidate {
    /// Display label: `name/arity` where an arity is known.
    pub fn label(&self) -> String {
        match self.arity {
            Some(arity) => format!("{}/{}", self.name, arity),
            None => self.name.clone(),
        }
    }
}

/// Which vocabulary to complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// Functions; `with_arity` selects `name/arity` completion (export
    /// lists, fun expressions) over call completion.
    Function { with_arity: bool },
    Macro,
    Record,
    /// Types, optionally mixing in the built-in type vocabulary.
    Type { with_built_in: bool },
}

impl Resolver<'_> {
    /// Candidates visible at a position in `file`. A `qualifier` restricts
    /// function completion to another module's exported functions and that
    /// module's built-ins.
    pub fn candidates(
        &self,
        file: SourceFile,
        kind: CandidateKind,
        qualifier: Option<&str>,
    ) -> Vec<Candidate> {
        // An abandoned request yields nothing, never a partial list.
        if self.cancel_token().is_cancelled() {
            return Vec::new();
        }
        let mut out = Vec::new();
        match kind {
            CandidateKind::Function { with_arity } => {
                self.function_candidates(file, with_arity, qualifier, &mut out)
            }
            CandidateKind::Macro => self.macro_candidates(file, &mut out),
            CandidateKind::Record => self.record_candidates(file, &mut out),
            CandidateKind::Type { with_built_in } => {
                self.type_candidates(file, with_built_in, &mut out)
            }
        }
        // A token tripped mid-collection also empties the result.
        if self.cancel_token().is_cancelled() {
            return Vec::new();
        }
        out.sort_by(|a, b| b.priority.cmp(&a.priority));
        out
    }

    fn function_candidates(
        &self,
        file: SourceFile,
        with_arity: bool,
        qualifier: Option<&str>,
        out: &mut Vec<Candidate>,
    ) {
        let insert = |arity: u32| {
            if with_arity {
                InsertBehavior::AritySuffix(arity)
            } else {
                InsertBehavior::Parentheses {
                    caret_inside: arity > 0,
                }
            }
        };

        if let Some(module) = qualifier {
            // Remote completion: the target module's exports plus its
            // built-ins, both at module priority.
            for module_file in self.module_files(module) {
                for decl in self.index(module_file).exported_functions() {
                    out.push(Candidate {
                        name: decl.name.clone(),
                        arity: Some(decl.arity),
                        priority: MODULE_FUNCTIONS_PRIORITY,
                        insert: insert(decl.arity),
                    });
                }
            }
            for bif in builtins::module_bifs(module) {
                out.push(Candidate {
                    name: bif.name.to_string(),
                    arity: Some(bif.arity),
                    priority: MODULE_FUNCTIONS_PRIORITY,
                    insert: insert(bif.arity),
                });
            }
            return;
        }

        for decl in &self.index(file).functions {
            out.push(Candidate {
                name: decl.name.clone(),
                arity: Some(decl.arity),
                priority: MODULE_FUNCTIONS_PRIORITY,
                insert: insert(decl.arity),
            });
        }
        // `name/arity` positions never offer the auto-imported built-ins.
        if !with_arity {
            for bif in builtins::module_bifs("erlang") {
                out.push(Candidate {
                    name: bif.name.to_string(),
                    arity: Some(bif.arity),
                    priority: BIF_PRIORITY,
                    insert: insert(bif.arity),
                });
            }
        }
    }

    fn macro_candidates(&self, file: SourceFile, out: &mut Vec<Candidate>) {
        for candidate_file in self.closure_of(file) {
            for decl in &self.index(candidate_file).macros {
                out.push(Candidate {
                    name: decl.name.clone(),
                    arity: None,
                    priority: MODULE_FUNCTIONS_PRIORITY,
                    insert: InsertBehavior::None,
                });
            }
        }
        for name in builtins::KNOWN_MACROS {
            out.push(Candidate {
                name: name.to_string(),
                arity: None,
                priority: BIF_PRIORITY,
                insert: InsertBehavior::None,
            });
        }
    }

    fn record_candidates(&self, file: SourceFile, out: &mut Vec<Candidate>) {
        for candidate_file in self.closure_of(file) {
            for decl in &self.index(candidate_file).records {
                out.push(Candidate {
                    name: decl.name.clone(),
                    arity: None,
                    priority: MODULE_FUNCTIONS_PRIORITY,
                    insert: InsertBehavior::None,
                });
            }
        }
    }

    fn type_candidates(&self, file: SourceFile, with_built_in: bool, out: &mut Vec<Candidate>) {
        for candidate_file in self.closure_of(file) {
            for decl in &self.index(candidate_file).types {
                out.push(Candidate {
                    name: decl.name.clone(),
                    arity: Some(decl.arity),
                    priority: MODULE_FUNCTIONS_PRIORITY,
                    insert: InsertBehavior::Parentheses {
                        caret_inside: decl.arity > 0,
                    },
                });
            }
        }
        if with_built_in {
            for name in builtins::BUILT_IN_TYPES {
                out.push(Candidate {
                    name: name.to_string(),
                    arity: None,
                    priority: BIF_PRIORITY,
                    insert: InsertBehavior::Parentheses { caret_inside: false },
                });
            }
        }
    }
}
