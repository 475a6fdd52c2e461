//! Error types for the lexicon vocabulary registry.

use thiserror::Error;

/// Main error type for lexicon operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    /// A closed vocabulary was asked to resolve a name it never declared.
    #[error("vocabulary `{vocabulary}` is closed and does not declare `{name}`")]
    ClosedVocabulary {
        /// Base identifier of the vocabulary that refused the lookup.
        vocabulary: String,
        /// The undeclared name that was requested.
        name: String,
    },

    /// The vocabulary has an empty base identifier, so no name can
    /// resolve under it. Construction accepts an empty base; resolution
    /// is where it is rejected.
    #[error("vocabulary has an empty base identifier")]
    EmptyBase,
}

/// Result type alias for lexicon operations.
pub type Result<T> = std::result::Result<T, LexiconError>;
