use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeneratorError {
    /// Requested string length was below zero.
    #[error("String length must not be negative, got {0}")]
    NegativeLength(i64),
    #[error("Cannot draw characters from an empty alphabet")]
    EmptyAlphabet,
    /// The missing id search gave up instead of looping forever.
    #[error("Failed to find an id missing from {existing} existing ids after {attempts} attempts")]
    Exhausted { existing: usize, attempts: usize },
}
