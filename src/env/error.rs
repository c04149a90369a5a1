use derive_more::{Display, Error, IsVariant};

/// Reasons that an [`Environment`](super::Environment) lookup or update can fail.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum EnvError {
    #[display("environment variable does not exist")]
    VariableDoesNotExist,
    #[display("environment variable names must be non-empty and can't contain '=' or NUL")]
    InvalidKey,
    #[display("environment variable values can't contain NUL")]
    InvalidValue,
}
