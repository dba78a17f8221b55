use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("sampler returned {got} templates, expected {expected}")]
    SampleSize { expected: usize, got: usize },

    #[error("sampler picked template {index} out of {population}")]
    OutOfRange { index: usize, population: usize },

    #[error("sampler picked template {0} twice")]
    Duplicate(usize),

    #[error("generation panicked")]
    Panicked,
}
