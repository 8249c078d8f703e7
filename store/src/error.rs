use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Query execution error: {0}")]
    Query(String),
}

/// Catalog mutations have their own failure modes on top of storage ones.
#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Deck name is empty")]
    EmptyName,

    #[error("Deck already exists: {0}")]
    DuplicateName(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
