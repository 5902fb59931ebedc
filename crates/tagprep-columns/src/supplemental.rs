//! Named supplemental variables attached to the jet input.
//!
//! Tagging engines take supplemental per-jet variables as float columns
//! only. Integer sources are converted on attach; flag columns have no
//! defined conversion and are rejected.

use std::collections::BTreeMap;

use tagprep_core::{Error, Result};

use crate::view::ColumnView;

/// A raw supplemental column in one of the source representations callers
/// hand us.
#[derive(Debug, Clone, Copy)]
pub enum ScalarColumn<'a> {
    /// Float values, attached without copying
    F32(&'a [f32]),
    /// Integer values, converted element-wise to floats
    I32(&'a [i32]),
    /// Flag values; no defined float conversion
    Bool(&'a [bool]),
}

impl<'a> ScalarColumn<'a> {
    /// Normalize to the engine's float contract.
    pub fn to_f32(&self, name: &str, expected: usize) -> Result<ColumnView<'a, f32>> {
        match self {
            ScalarColumn::F32(src) => {
                check_len(name, src.len(), expected)?;
                Ok(ColumnView::Borrowed(&src[..expected]))
            }
            ScalarColumn::I32(src) => {
                check_len(name, src.len(), expected)?;
                let mut out = Vec::with_capacity(expected);
                for &v in &src[..expected] {
                    out.push(v as f32);
                }
                Ok(ColumnView::Owned(out))
            }
            ScalarColumn::Bool(_) => Err(Error::TypeMismatch(format!(
                "supplemental variable '{}' is a flag column; expected float or integer values",
                name
            ))),
        }
    }
}

fn check_len(name: &str, have: usize, expected: usize) -> Result<()> {
    if have < expected {
        return Err(Error::Shape(format!(
            "supplemental variable '{}' holds {} values, expected {}",
            name, have, expected
        )));
    }
    Ok(())
}

/// Named supplemental columns, normalized to floats and length-checked
/// against the owning collection.
#[derive(Debug, Clone, Default)]
pub struct ExtraColumns<'a> {
    columns: BTreeMap<String, ColumnView<'a, f32>>,
    n_rows: usize,
}

impl<'a> ExtraColumns<'a> {
    /// Create an empty container for a collection of `n_rows` objects.
    pub fn new(n_rows: usize) -> Self {
        Self { columns: BTreeMap::new(), n_rows }
    }

    /// Attach a column under `name`, replacing any previous column with the
    /// same name.
    ///
    /// Names must be non-empty and free of NUL bytes; anything else is a
    /// key error. Length and representation problems surface as shape and
    /// type errors from the conversion.
    pub fn insert(&mut self, name: impl Into<String>, column: ScalarColumn<'a>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Key(
                "supplemental variable names must be non-empty strings".into(),
            ));
        }
        if name.contains('\0') {
            return Err(Error::Key(format!(
                "supplemental variable name {:?} contains a NUL byte",
                name
            )));
        }
        let converted = column.to_f32(&name, self.n_rows)?;
        self.columns.insert(name, converted);
        Ok(())
    }

    /// Column registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&ColumnView<'a, f32>> {
        self.columns.get(name)
    }

    /// Number of rows every column matches.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of attached columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when no columns are attached.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over `(name, column)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnView<'a, f32>)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}
