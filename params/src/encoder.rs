use std::fmt::Write;

use log::{debug, warn};

use crate::declaration::ArrayDeclaration;
use crate::error::{ParamsError, ParamsResult};
use crate::vector::ParameterVector;

const VALUES_PER_LINE: usize = 8;
const VALUE_WIDTH: usize = 4;
const INDENT: usize = 4;

/// What to do when declarations ask for more values than the vector holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingValues {
    /// Refuse to render the declaration.
    #[default]
    Fail,
    /// Render the missing entries as 0.
    ZeroFill,
}

enum Shape {
    Scalar,
    Row(usize),
    Cube(usize, usize, usize),
}

impl Shape {
    fn of(declaration: &ArrayDeclaration) -> ParamsResult<Self> {
        match *declaration.dims.as_slice() {
            [] => Ok(Shape::Scalar),
            [n] => Ok(Shape::Row(n)),
            [d0, d1, d2] => Ok(Shape::Cube(d0, d1, d2)),
            _ => Err(ParamsError::UnsupportedDimensionality {
                name: declaration.name.clone(),
                dims: declaration.dims.clone(),
            }),
        }
    }
}

/// Writes consecutive runs of a parameter vector as C array initializers.
///
/// Every declaration reads from where the previous one stopped; the cursor
/// is never rewound.
pub struct ArrayRenderer<'a> {
    values: &'a [i32],
    cursor: usize,
    missing: MissingValues,
}

impl<'a> ArrayRenderer<'a> {
    pub fn new(vector: &'a ParameterVector) -> Self {
        Self {
            values: vector.as_slice(),
            cursor: 0,
            missing: MissingValues::default(),
        }
    }

    pub fn with_missing_values(mut self, missing: MissingValues) -> Self {
        self.missing = missing;
        self
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Vector entries not yet consumed by any declaration.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.cursor)
    }

    /// Renders all declarations, preceded by a blank line.
    pub fn render(&mut self, declarations: &[ArrayDeclaration]) -> ParamsResult<String> {
        let mut out = String::from("\n");
        for declaration in declarations {
            self.render_declaration(declaration, &mut out)?;
        }
        Ok(out)
    }

    /// Appends one declaration to `out`. On error nothing is appended and
    /// the cursor does not move.
    pub fn render_declaration(
        &mut self,
        declaration: &ArrayDeclaration,
        out: &mut String,
    ) -> ParamsResult<()> {
        let shape = Shape::of(declaration)?;
        let needed = self.check_available(declaration)?;

        debug!(
            "Rendering {} ({} values at offset {})",
            declaration, needed, self.cursor
        );

        let name = &declaration.name;
        match shape {
            Shape::Scalar => {
                writeln!(out, "int {} = {};", name, self.next_value())?;
            }
            Shape::Row(n) => {
                write!(out, "int {}[{}] = \n{{", name, n)?;
                self.write_values(out, n, INDENT)?;
                writeln!(out, "\n}};")?;
            }
            Shape::Cube(d0, d1, d2) => {
                write!(out, "int {}[{}][{}][{}] = \n{{", name, d0, d1, d2)?;
                for _ in 0..d0 {
                    write!(out, "\n{:indent$}{{", "", indent = INDENT)?;
                    for _ in 0..d1 {
                        write!(out, "\n{:indent$}{{", "", indent = 2 * INDENT)?;
                        self.write_values(out, d2, 3 * INDENT)?;
                        write!(out, "\n{:indent$}}},", "", indent = 2 * INDENT)?;
                    }
                    write!(out, "\n{:indent$}}},", "", indent = INDENT)?;
                }
                writeln!(out, "\n}};")?;
            }
        }
        writeln!(out)?;

        Ok(())
    }

    /// Returns how many values the declaration consumes.
    fn check_available(&self, declaration: &ArrayDeclaration) -> ParamsResult<usize> {
        let needed = declaration.value_count().ok_or_else(|| {
            ParamsError::InvalidDeclaration(format!("'{}' has too many values", declaration))
        })?;
        let available = self.remaining();
        if needed <= available {
            return Ok(needed);
        }

        let missing = needed - available;
        match self.missing {
            MissingValues::Fail => Err(ParamsError::IndexOutOfRange {
                name: declaration.name.clone(),
                offset: self.cursor,
                missing,
            }),
            MissingValues::ZeroFill => {
                warn!("{} is {} value(s) short, filling with 0", declaration.name, missing);
                Ok(needed)
            }
        }
    }

    fn write_values(&mut self, out: &mut String, count: usize, indent: usize) -> ParamsResult<()> {
        for i in 0..count {
            if i % VALUES_PER_LINE == 0 {
                write!(out, "\n{:indent$}", "", indent = indent)?;
            }
            write!(out, "{:width$}, ", self.next_value(), width = VALUE_WIDTH)?;
        }
        Ok(())
    }

    fn next_value(&mut self) -> i32 {
        let value = self.values.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        value
    }
}

/// Renders `declarations` from the start of `vector`, failing on missing values.
pub fn render(vector: &ParameterVector, declarations: &[ArrayDeclaration]) -> ParamsResult<String> {
    ArrayRenderer::new(vector).render(declarations)
}
