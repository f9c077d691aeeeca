use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymtabError {
    #[error("Invalid identifier `{name}`: {reason}")]
    InvalidIdentifier { name: String, reason: String },

    #[error("Invalid array size {size}: must be a positive integer")]
    InvalidArraySize { size: i64 },

    #[error("Invalid array size {size}: larger than {max}")]
    ArraySizeTooLarge { size: i64, max: u32 },

    #[error("Invalid array type: element type is missing")]
    MissingElementType,

    #[error("Cannot declare `{name}`: no block has been entered")]
    NoCurrentScope { name: String },

    #[error("`{name}` is not a function or procedure")]
    NotARoutine { name: String },

    #[error("`{name}` is already declared")]
    AlreadyDeclared { name: String },

    #[error("Program already defined as `{name}`")]
    ProgramAlreadyDefined { name: String },

    #[error("{kind} `{name}` has no {attribute}")]
    AttributeMismatch {
        name: String,
        kind: &'static str,
        attribute: &'static str,
    },

    #[error("Internal error: unknown object #{index}")]
    UnknownObject { index: u32 },

    #[error("Internal error: unknown scope #{index}")]
    UnknownScope { index: u32 },
}

impl SymtabError {
    /// Whether the error comes from bad input (as opposed to a misuse of the
    /// table's ids by the caller).
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            SymtabError::UnknownObject { .. } | SymtabError::UnknownScope { .. }
        )
    }
}
