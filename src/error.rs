use thiserror::Error;

/// Errors signalled by the linear and linked containers.
///
/// These are ordinary values: callers inspect them before acting, the same way the
/// visualizer pages inspect the `"Underflow"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// `pop`/`dequeue` on an empty container.
    #[error("Underflow")]
    Underflow,

    /// `peek`/`front`/`rear` on an empty container. Carries the container's name.
    #[error("{0} is empty")]
    Empty(&'static str),
}

/// Errors returned by [`HashTable`](crate::hash_table::HashTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashTableError {
    /// A table needs at least one bucket.
    #[error("capacity must be at least 1")]
    InvalidCapacity,

    /// Linear probing walked every slot without finding the key or a free slot.
    #[error("hash table is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    /// `resize` to fewer slots than there are entries under linear probing.
    #[error("cannot shrink to {requested} slots while holding {count} entries")]
    ShrinkBelowCount { requested: usize, count: usize },
}

/// Errors produced while parsing a command line for the interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Anything a session command can fail with.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    HashTable(#[from] HashTableError),

    #[error("nothing has been recorded yet")]
    NothingRecorded,

    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),
}
