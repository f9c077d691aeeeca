use std::fmt;

/// A typed literal attached to a constant declaration.
///
/// Values are plain data: copying one never shares anything with the
/// original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantValue {
    Int(i32),
    Char(char),
}

impl ConstantValue {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            ConstantValue::Int(v) => Some(*v),
            ConstantValue::Char(_) => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            ConstantValue::Char(c) => Some(*c),
            ConstantValue::Int(_) => None,
        }
    }
}

pub fn make_int_constant(value: i32) -> ConstantValue {
    ConstantValue::Int(value)
}

pub fn make_char_constant(value: char) -> ConstantValue {
    ConstantValue::Char(value)
}

/// Independent copy of an optional constant, e.g. when `CONST B = A` needs
/// its own value.
pub fn duplicate_constant_value(value: Option<&ConstantValue>) -> Option<ConstantValue> {
    value.copied()
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Int(v) => write!(f, "{v}"),
            ConstantValue::Char(c) => write!(f, "'{c}'"),
        }
    }
}
