use crate::error::SymtabError;

/// The type system for KPL.
///
/// Types form plain ownership trees: an array owns its element type and
/// there are no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Char,
    Array(ArrayType),
}

/// A fixed-size array. Only [`make_array_type`] builds one, so `size` is
/// always positive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayType {
    size: u32,
    element: Box<Type>,
}

impl ArrayType {
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn element(&self) -> &Type {
        &self.element
    }

    pub fn into_element(self) -> Type {
        *self.element
    }
}

impl Type {
    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    /// Nesting depth: 0 for primitives, 1 + element depth for arrays.
    pub fn depth(&self) -> usize {
        match self {
            Type::Int | Type::Char => 0,
            Type::Array(arr) => 1 + arr.element.depth(),
        }
    }
}

pub fn make_int_type() -> Type {
    Type::Int
}

pub fn make_char_type() -> Type {
    Type::Char
}

/// Build `Arr(size, element)`, taking ownership of `element`.
///
/// An absent element usually means the caller failed to resolve it earlier;
/// it is reported rather than papered over.
pub fn make_array_type(size: i64, element: Option<Type>) -> Result<Type, SymtabError> {
    if size <= 0 {
        return Err(SymtabError::InvalidArraySize { size });
    }
    let size = u32::try_from(size).map_err(|_| SymtabError::ArraySizeTooLarge {
        size,
        max: u32::MAX,
    })?;
    let element = element.ok_or(SymtabError::MissingElementType)?;
    Ok(Type::Array(ArrayType {
        size,
        element: Box::new(element),
    }))
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "Int"),
            Type::Char => write!(f, "Char"),
            Type::Array(arr) => write!(f, "Arr({},{})", arr.size, arr.element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives() {
        assert_eq!(make_int_type(), Type::Int);
        assert_eq!(make_char_type(), Type::Char);
        assert!(!make_int_type().is_array());
    }

    #[test]
    fn array_keeps_size_and_element() {
        let ty = make_array_type(10, Some(make_char_type())).unwrap();
        let Type::Array(arr) = &ty else {
            panic!("expected array, got {ty}");
        };
        assert_eq!(arr.size(), 10);
        assert_eq!(arr.element(), &Type::Char);
    }

    #[test]
    fn nested_arrays() {
        let inner = make_array_type(3, Some(make_int_type())).unwrap();
        let outer = make_array_type(2, Some(inner.clone())).unwrap();
        assert_eq!(outer.depth(), 2);
        assert_eq!(outer.to_string(), "Arr(2,Arr(3,Int))");
        let Type::Array(arr) = outer else {
            panic!("expected array");
        };
        assert_eq!(arr.into_element(), inner);
    }

    #[test]
    fn non_positive_size_rejected() {
        for size in [0, -1, i64::MIN] {
            let err = make_array_type(size, Some(make_int_type())).unwrap_err();
            assert!(matches!(err, SymtabError::InvalidArraySize { size: s } if s == size));
        }
    }

    #[test]
    fn oversized_rejected() {
        let size = i64::from(u32::MAX) + 1;
        let err = make_array_type(size, Some(make_int_type())).unwrap_err();
        assert_eq!(
            err,
            SymtabError::ArraySizeTooLarge {
                size,
                max: u32::MAX
            }
        );
        assert!(err.to_string().contains("larger than"));
        assert!(make_array_type(i64::from(u32::MAX), Some(make_int_type())).is_ok());
    }

    #[test]
    fn missing_element_rejected() {
        let err = make_array_type(4, None).unwrap_err();
        assert!(matches!(err, SymtabError::MissingElementType));
    }
}
