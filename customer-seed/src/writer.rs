use std::fs::File;
use std::io;
use std::path::Path;

use csv::WriterBuilder;
use log::{debug, info, trace};
use rand::Rng;

use crate::customer::{Customer, HEADER};
use crate::error::SeedError;
use crate::factory::CustomerFactory;

/// CSV sink for [`Customer`] rows.
/// The header is written explicitly so that an empty run still produces it.
#[derive(Debug)]
pub struct CustomerWriter<W: io::Write> {
    writer: csv::Writer<W>,
    rows_written: u32,
}

impl CustomerWriter<File> {
    /// Creates the file at `path`, truncating any existing content.
    ///
    /// # Errors
    /// Errors when the file cannot be created
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        debug!("Creating {}", path.as_ref().display());
        let writer = WriterBuilder::new().has_headers(false).from_path(path)?;
        Ok(CustomerWriter {
            writer,
            rows_written: 0,
        })
    }
}

impl<W: io::Write> CustomerWriter<W> {
    #[must_use]
    pub fn from_writer(inner: W) -> Self {
        CustomerWriter {
            writer: WriterBuilder::new().has_headers(false).from_writer(inner),
            rows_written: 0,
        }
    }

    /// # Errors
    /// Errors when the underlying writer fails
    pub fn write_header(&mut self) -> Result<(), SeedError> {
        self.writer.write_record(HEADER)?;
        Ok(())
    }

    /// # Errors
    /// Errors when the underlying writer fails
    pub fn write_customer(&mut self, customer: &Customer) -> Result<(), SeedError> {
        trace!("Writing customer {}", customer.customer_id);
        self.writer.serialize(customer)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of customer rows written so far, not counting the header
    #[must_use]
    pub fn rows_written(&self) -> u32 {
        self.rows_written
    }

    /// Flushes buffered rows and returns the inner writer.
    ///
    /// # Errors
    /// Errors when the final flush fails
    pub fn finish(self) -> Result<W, SeedError> {
        self.writer
            .into_inner()
            .map_err(|e| SeedError::IoError(e.into_error()))
    }
}

/// Writes the header followed by customers `1..=count`, in order.
///
/// # Errors
/// Errors on the first failed write; rows already handed to `writer` are not rolled back
pub fn write_customers<W, R>(
    mut writer: CustomerWriter<W>,
    count: u32,
    factory: &CustomerFactory,
    rng: &mut R,
) -> Result<W, SeedError>
where
    W: io::Write,
    R: Rng,
{
    writer.write_header()?;
    for customer_id in 1..=count {
        let customer = factory.build(customer_id, rng);
        writer.write_customer(&customer)?;
    }
    info!("Wrote {} customers", writer.rows_written());
    writer.finish()
}

/// Overwrites `path` with a header and `count` generated customers.
/// The file is closed before this returns, whether or not writing succeeded.
///
/// # Errors
/// Errors when `path` cannot be created or any write to it fails
pub fn seed_file<P, R>(
    path: P,
    count: u32,
    factory: &CustomerFactory,
    rng: &mut R,
) -> Result<(), SeedError>
where
    P: AsRef<Path>,
    R: Rng,
{
    let writer = CustomerWriter::from_path(path)?;
    write_customers(writer, count, factory, rng)?;
    Ok(())
}
