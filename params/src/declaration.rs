use std::fmt;
use std::str::FromStr;

use crate::error::ParamsError;

/// Evaluation tables in the order the tuner numbers their parameters.
const DEFAULT_DECLARATIONS: &[(&str, &[usize])] = &[
    ("BishopPair", &[]),
    ("PawnStructureValues", &[4]),
    ("PcTypeValues", &[5]),
    ("AttackUnitValues", &[64]),
    ("PcSq", &[2, 6, 64]),
];

/// A named C array that takes the next `value_count()` entries of the vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayDeclaration {
    pub name: String,
    pub dims: Vec<usize>,
}

impl ArrayDeclaration {
    pub fn new(name: impl Into<String>, dims: &[usize]) -> Self {
        Self {
            name: name.into(),
            dims: dims.to_vec(),
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, &[])
    }

    pub fn defaults() -> Vec<Self> {
        DEFAULT_DECLARATIONS
            .iter()
            .map(|(name, dims)| Self::new(*name, dims))
            .collect()
    }

    /// Number of vector entries this declaration consumes (1 for a scalar),
    /// or `None` if the count does not fit in a `usize`.
    #[inline]
    pub fn value_count(&self) -> Option<usize> {
        self.dims
            .iter()
            .try_fold(1usize, |count, &dim| count.checked_mul(dim))
    }
}

pub fn total_values(declarations: &[ArrayDeclaration]) -> Option<usize> {
    declarations
        .iter()
        .try_fold(0usize, |total, declaration| {
            total.checked_add(declaration.value_count()?)
        })
}

/// Parses `Name`, `Name:64` or `Name:2x6x64`.
impl FromStr for ArrayDeclaration {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, shape) = match s.split_once(':') {
            Some((name, shape)) => (name.trim(), Some(shape.trim())),
            None => (s.trim(), None),
        };

        if !is_identifier(name) {
            return Err(ParamsError::InvalidDeclaration(format!(
                "'{}' is not a valid array name",
                name
            )));
        }

        let dims = match shape {
            Some(shape) => shape
                .split('x')
                .map(|dim| parse_dim(dim, s))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let declaration = Self {
            name: name.to_string(),
            dims,
        };
        if declaration.value_count().is_none() {
            return Err(ParamsError::InvalidDeclaration(format!(
                "'{}' has too many values",
                s
            )));
        }

        Ok(declaration)
    }
}

impl fmt::Display for ArrayDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, dim) in self.dims.iter().enumerate() {
            let sep = if i == 0 { ':' } else { 'x' };
            write!(f, "{}{}", sep, dim)?;
        }
        Ok(())
    }
}

fn parse_dim(dim: &str, declaration: &str) -> Result<usize, ParamsError> {
    match dim.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(ParamsError::InvalidDeclaration(format!(
            "'{}' in '{}' is not a positive size",
            dim, declaration
        ))),
        Ok(size) => Ok(size),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
