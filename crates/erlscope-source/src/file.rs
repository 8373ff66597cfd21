use erlscope_syntax::SyntaxTree;

/// File-name suffix of module files; qualified references resolve their
/// module qualifier to a file by appending this suffix.
pub const MODULE_SUFFIX: &str = ".erl";

/// File-name suffix of textually-included header files.
pub const HEADER_SUFFIX: &str = ".hrl";

/// The two recognized source-file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Module,
    Header,
}

impl FileKind {
    /// Both kinds, the filter wildcard include search uses.
    pub const ALL: [FileKind; 2] = [FileKind::Module, FileKind::Header];

    /// Recognizes a kind from a location's suffix.
    pub fn of_location(location: &str) -> Option<FileKind> {
        if location.ends_with(MODULE_SUFFIX) {
            Some(FileKind::Module)
        } else if location.ends_with(HEADER_SUFFIX) {
            Some(FileKind::Header)
        } else {
            None
        }
    }
}

/// A source file in the project snapshot.
///
/// This is a salsa input: the caller constructs the snapshot (location, kind
/// and the externally-parsed syntax tree) before querying, and replaces the
/// tree through the generated setter after a rename. Everything derived from
/// a file, notably its declaration index, is recomputed incrementally when
/// the tree changes.
#[salsa::input]
pub struct SourceFile {
    /// Project-relative location, `/`-separated (e.g. `src/app.erl`).
    #[return_ref]
    pub location: String,

    pub kind: FileKind,

    /// The parsed syntax tree. Parsing is an external collaborator; the
    /// engine never derives trees from text itself.
    #[return_ref]
    pub tree: SyntaxTree,
}

impl SourceFile {
    /// The last segment of the location, e.g. `app.erl`.
    pub fn file_name<'db>(self, db: &'db dyn salsa::Database) -> &'db str {
        let location = self.location(db);
        location.rsplit('/').next().unwrap_or(location)
    }

    /// The file name without its kind suffix, e.g. `app`.
    pub fn stem<'db>(self, db: &'db dyn salsa::Database) -> &'db str {
        let name = self.file_name(db);
        name.strip_suffix(MODULE_SUFFIX)
            .or_else(|| name.strip_suffix(HEADER_SUFFIX))
            .unwrap_or(name)
    }

    /// The parent directory of the location, without a trailing `/`.
    pub fn parent_dir<'db>(self, db: &'db dyn salsa::Database) -> &'db str {
        let location = self.location(db);
        match location.rfind('/') {
            Some(split) => &location[..split],
            None => "",
        }
    }
}
