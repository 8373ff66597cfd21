//! Include resolution and the include closure.
//!
//! A `-include` (or `-include_lib`) path is tried two ways:
//! 1. direct: the path joined onto the including file's directory,
//!    lexically normalized, looked up in the project snapshot;
//! 2. wildcard: every project file whose name matches the path's last
//!    segment, kept when its location still ends with the include path once
//!    versioned directory segments (`foo-1.2.3/` -> `foo/`) are stripped.
//!
//! The closure query walks these edges breadth-first with a visited set, so
//! include cycles terminate and the discovery order is the tie-break order
//! resolution uses.

use crate::cancel::CancelToken;
use crate::{declaration_index_query, ResolveDatabase};
use erlscope_source::{FileKind, Project, SourceFile};
use erlscope_syntax::NodeKind;
use fxhash::FxHashSet;
use regex::Regex;
use std::borrow::Cow;
use std::collections::VecDeque;
use std::sync::LazyLock;

static VERSIONED_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-[\w.-]+/").expect("valid pattern"));

/// Rewrites versioned directory segments to their bare name, so that
/// `deps/stdlib-1.17.5/include/ms.hrl` matches the path `stdlib/include/ms.hrl`.
pub fn strip_version_segments(location: &str) -> Cow<'_, str> {
    VERSIONED_DIR.replace_all(location, "/")
}

/// Joins `path` onto the including file's directory and normalizes `.` and
/// `..` segments. `None` when the path walks above the project root.
fn normalize_relative(base_dir: &str, path: &str) -> Option<String> {
    let mut segments: Vec<&str> = if base_dir.is_empty() {
        Vec::new()
    } else {
        base_dir.split('/').collect()
    };
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

/// Direct resolution: the include path relative to the including file.
pub fn resolve_direct(
    db: &dyn ResolveDatabase,
    project: Project,
    file: SourceFile,
    path: &str,
) -> Option<SourceFile> {
    if path.is_empty() {
        return None;
    }
    let location = normalize_relative(file.parent_dir(db), path)?;
    project.file_at(db, &location)
}

/// Wildcard resolution: name-based lookup filtered by the stripped-location
/// suffix check. Project iteration order is preserved.
pub fn resolve_wildcard(
    db: &dyn ResolveDatabase,
    project: Project,
    path: &str,
) -> Vec<SourceFile> {
    if path.is_empty() {
        return Vec::new();
    }
    let file_name = match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => return Vec::new(),
    };
    project
        .files_by_name(db, file_name, &FileKind::ALL)
        .into_iter()
        .filter(|candidate| strip_version_segments(candidate.location(db)).ends_with(path))
        .collect()
}

/// All files an include path can refer to: the direct target first, then the
/// wildcard matches, deduplicated.
pub fn resolve_include(
    db: &dyn ResolveDatabase,
    project: Project,
    file: SourceFile,
    path: &str,
) -> Vec<SourceFile> {
    let mut targets = Vec::new();
    if let Some(direct) = resolve_direct(db, project, file, path) {
        targets.push(direct);
    }
    for candidate in resolve_wildcard(db, project, path) {
        if !targets.contains(&candidate) {
            targets.push(candidate);
        }
    }
    targets
}

/// The include path literal of an include form, if it has one.
pub(crate) fn include_path(db: &dyn ResolveDatabase, file: SourceFile, node: erlscope_syntax::NodeId) -> Option<String> {
    let tree = file.tree(db);
    match tree.kind(node) {
        NodeKind::Include { string, .. } => tree.string_value(*string).map(str::to_string),
        _ => None,
    }
}

/// The set of files transitively reachable over include edges, starting file
/// included, in breadth-first discovery order. Cancellation empties the
/// result rather than returning a partial closure.
pub fn include_closure(
    db: &dyn ResolveDatabase,
    project: Project,
    file: SourceFile,
    cancel: &CancelToken,
) -> Vec<SourceFile> {
    let mut order = vec![file];
    let mut visited: FxHashSet<SourceFile> = FxHashSet::default();
    visited.insert(file);
    let mut queue = VecDeque::from([file]);
    while let Some(current) = queue.pop_front() {
        if cancel.is_cancelled() {
            log::trace!("include closure cancelled at {}", current.location(db));
            return Vec::new();
        }
        let index = declaration_index_query(db, current);
        for &include in &index.includes {
            let Some(path) = include_path(db, current, include) else {
                continue;
            };
            for target in resolve_include(db, project, current, &path) {
                if visited.insert(target) {
                    order.push(target);
                    queue.push_back(target);
                }
            }
        }
    }
    order
}
