use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("Age range {min_age}..={max_age} does not fit the calendar")]
    InvalidAgeRange { min_age: u32, max_age: u32 },
}

impl SeedError {
    /// True when the failure came from the underlying file or sink rather than
    /// from factory construction.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        match self {
            SeedError::CsvError(e) => e.is_io_error(),
            SeedError::IoError(_) => true,
            SeedError::InvalidAgeRange { .. } => false,
        }
    }
}
