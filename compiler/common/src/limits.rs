use crate::error::SymtabError;

/// Identifier buffer width: names must be strictly shorter than this.
pub const MAX_IDENT_LEN: usize = 15;

/// Tunables the parser must respect before calling any constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_ident_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_ident_len: MAX_IDENT_LEN,
        }
    }
}

impl Limits {
    pub fn new(max_ident_len: usize) -> Self {
        Self { max_ident_len }
    }

    pub fn validate_name(&self, name: &str) -> Result<(), SymtabError> {
        if name.is_empty() {
            return Err(SymtabError::InvalidIdentifier {
                name: name.to_string(),
                reason: "name is empty".into(),
            });
        }
        let len = name.chars().count();
        if len >= self.max_ident_len {
            return Err(SymtabError::InvalidIdentifier {
                name: name.to_string(),
                reason: format!(
                    "{len} characters, must be fewer than {}",
                    self.max_ident_len
                ),
            });
        }
        Ok(())
    }
}
