//! Typed access to the fields of one data row.

use crate::error::ImportError;
use crate::split::split_fields;

/// The split fields of one line, with the context needed for error reports.
pub(crate) struct Fields<'a> {
    values: Vec<&'a str>,
    line: usize,
    source_name: &'a str,
}

impl<'a> Fields<'a> {
    pub(crate) fn split(line: &'a str, delimiter: char, line_no: usize, source_name: &'a str) -> Self {
        Self {
            values: split_fields(line, delimiter),
            line: line_no,
            source_name,
        }
    }

    pub(crate) fn text(&self, index: usize, field: &'static str) -> Result<&'a str, ImportError> {
        self.values
            .get(index)
            .copied()
            .ok_or_else(|| ImportError::MissingField {
                source_name: self.source_name.to_string(),
                line: self.line,
                field,
            })
    }

    pub(crate) fn int(&self, index: usize, field: &'static str) -> Result<i64, ImportError> {
        let value = self.text(index, field)?;
        value.parse().map_err(|source| ImportError::InvalidInteger {
            source_name: self.source_name.to_string(),
            line: self.line,
            field,
            value: value.to_string(),
            source,
        })
    }

    pub(crate) fn float(&self, index: usize, field: &'static str) -> Result<f64, ImportError> {
        let value = self.text(index, field)?;
        value.parse().map_err(|source| ImportError::InvalidFloat {
            source_name: self.source_name.to_string(),
            line: self.line,
            field,
            value: value.to_string(),
            source,
        })
    }
}
