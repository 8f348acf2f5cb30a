//! Import configuration.

use crate::error::ImportError;

/// Configuration shared by the movie and rating importers.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// Field delimiter (default: ',')
    pub delimiter: char,

    /// Rows per backend transaction.
    ///
    /// `None` sends every statement on its own, in its own implicit
    /// transaction. `Some(n)` groups the statements of `n` consecutive rows
    /// into one transaction, keeping their order.
    pub batch_size: Option<usize>,

    /// Whether the first line is a header to discard (default: true)
    pub skip_header: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            batch_size: None,
            skip_header: true,
        }
    }
}

impl ImportConfig {
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.batch_size == Some(0) {
            return Err(ImportError::Config(
                "batch size must be at least 1".to_string(),
            ));
        }
        if self.delimiter == '"' {
            return Err(ImportError::Config(
                "the double quote is reserved for quoting and cannot be the delimiter".to_string(),
            ));
        }
        if self.delimiter == crate::GENRE_DELIMITER {
            return Err(ImportError::Config(format!(
                "'{}' separates genres and cannot be the field delimiter",
                crate::GENRE_DELIMITER
            )));
        }
        Ok(())
    }
}
