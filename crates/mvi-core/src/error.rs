use crate::sharable::Sharable;

/// Alias for `Result<T, GroupError>`.
pub type GroupResult<T> = Result<T, GroupError>;

/// Alias for `Result<T, DeserializationError>`.
pub type DeserializeResult<T> = Result<T, DeserializationError>;

/// Fatal errors raised while turning a document node or an encoded string
/// back into a typed value. Fatal only for the node being parsed: loaders
/// skip that node and carry on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeserializationError {
    /// The group node has no `worlds` entry.
    #[error("no worlds specified for world group: {group}")]
    MissingWorlds {
        /// Name of the rejected group.
        group: String,
    },

    /// The group's `worlds` entry is not a list.
    #[error("world list formatted incorrectly for world group: {group}")]
    MalformedWorlds {
        /// Name of the rejected group.
        group: String,
    },

    /// The group's `worlds` list holds no world.
    #[error("world list is empty for world group: {group}")]
    EmptyWorlds {
        /// Name of the rejected group.
        group: String,
    },

    /// Another group with the same name, ignoring case, was already loaded.
    #[error("world group {group} duplicates the name of world group {existing}")]
    DuplicateGroup {
        /// Name of the rejected group.
        group: String,
        /// Name of the group that was kept.
        existing: String,
    },

    /// A group entry in the document is not a key-value map.
    #[error("world group {group} is not a key-value map")]
    MalformedGroup {
        /// Name of the rejected group.
        group: String,
    },

    /// One segment of an encoded string could not be decoded.
    #[error("segment {segment}: {reason}")]
    MalformedSegment {
        /// Zero-based index of the failing segment.
        segment: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A value node had the wrong shape for the serializer reading it.
    #[error("expected {expected}, found {found}")]
    UnexpectedNode {
        /// The node shape the serializer wanted.
        expected: &'static str,
        /// The node that was found instead.
        found: String,
    },
}

impl DeserializationError {
    pub(crate) fn segment(segment: usize, reason: impl Into<String>) -> Self {
        Self::MalformedSegment {
            segment,
            reason: reason.into(),
        }
    }
}

/// Errors raised by the group manager.
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    /// No group with this name exists.
    #[error("group not found: \"{0}\"")]
    NotFound(String),

    /// A group with this name already exists.
    #[error("group already exists: \"{0}\"")]
    AlreadyExists(String),

    /// Group names must be one non-empty word with no path separators.
    #[error("invalid group name: \"{0}\"")]
    InvalidName(String),

    /// A group must always contain at least one world.
    #[error("group \"{0}\" must contain at least one world")]
    EmptyWorlds(String),

    /// The persistence callback failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while reading or writing persisted documents.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// The file being read or written.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("invalid document {path}: {source}")]
    Json {
        /// The file being parsed.
        path: String,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// The file parsed, but the top level is not a key-value map.
    #[error("document {0} must contain a key-value map at the top level")]
    NotAMap(String),

    /// A group or player name cannot be used as a single file name.
    #[error("not a valid file name: \"{0}\"")]
    InvalidName(String),

    /// A stored profile could not be decoded.
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Errors raised when reading or writing player profile values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    /// The value variant does not match what the sharable stores.
    #[error("{sharable} expects a {expected} value, got {found}")]
    KindMismatch {
        /// The attribute being written.
        sharable: Sharable,
        /// The value kind the attribute stores.
        expected: &'static str,
        /// The value kind that was supplied.
        found: &'static str,
    },

    /// A stored value failed to decode.
    #[error("cannot read {sharable}: {source}")]
    Value {
        /// The attribute being read.
        sharable: Sharable,
        /// The decoding failure.
        source: DeserializationError,
    },

    /// The profile node itself has the wrong shape.
    #[error("profile for {0} is not a key-value map")]
    NotAMap(String),
}

/// Errors raised while loading application settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("cannot read settings {path}: {source}")]
    Io {
        /// The settings file.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The settings file is not valid.
    #[error("invalid settings {path}: {source}")]
    Parse {
        /// The settings file.
        path: String,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// The settings parsed but failed validation.
    #[error("invalid settings: {0}")]
    Validation(String),
}
