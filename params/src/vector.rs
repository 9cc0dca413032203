use std::fmt;

/// Flat, zero-indexed parameter values reconstructed from a tuning log.
///
/// The vector never has gaps: writing or selecting index `k` zero-fills every
/// index below it that has not been written yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterVector {
    values: Vec<i32>,
}

impl ParameterVector {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<i32> {
        self.values.get(index).copied()
    }

    /// Grows the vector with zeros until it holds at least `len` entries.
    pub fn grow_to(&mut self, len: usize) {
        if self.values.len() < len {
            self.values.resize(len, 0);
        }
    }

    /// Writes `value` at `index`, zero-filling up to it.
    ///
    /// # Panics
    ///
    /// If the vector cannot be grown to `index + 1` entries.
    pub fn set(&mut self, index: usize, value: i32) {
        self.grow_to(index.saturating_add(1));
        self.values[index] = value;
    }

    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }
}

impl From<Vec<i32>> for ParameterVector {
    fn from(values: Vec<i32>) -> Self {
        Self { values }
    }
}

/// Flat form: every value as a decimal integer, separated by single spaces.
impl fmt::Display for ParameterVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_zero_fills_gap() {
        let mut vector = ParameterVector::new();
        vector.set(3, 12);
        assert_eq!(vector.as_slice(), &[0, 0, 0, 12]);
    }

    #[test]
    fn test_grow_never_shrinks() {
        let mut vector = ParameterVector::from(vec![1, 2, 3]);
        vector.grow_to(2);
        assert_eq!(vector.len(), 3);
        vector.grow_to(5);
        assert_eq!(vector.as_slice(), &[1, 2, 3, 0, 0]);
    }

    #[test]
    fn test_overwrite_keeps_length() {
        let mut vector = ParameterVector::from(vec![4, 5]);
        vector.set(0, -9);
        assert_eq!(vector.as_slice(), &[-9, 5]);
    }

    #[test]
    fn test_flat_form() {
        assert_eq!(ParameterVector::from(vec![3, -9, 0]).to_string(), "3 -9 0");
        assert_eq!(ParameterVector::from(vec![7]).to_string(), "7");
        assert_eq!(ParameterVector::new().to_string(), "");
    }

    #[test]
    fn test_get_out_of_range() {
        let vector = ParameterVector::from(vec![1]);
        assert_eq!(vector.get(0), Some(1));
        assert_eq!(vector.get(1), None);
    }
}
