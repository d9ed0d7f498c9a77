/**
 * Persistence for the expense records.
 *
 * The whole record set is read into memory at startup and written back in
 * full after every mutation. The file is plain CSV with a fixed header, so
 * it stays editable by hand and by spreadsheet tools.
 */
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::record::Record;

const HEADERS: [&str; 4] = ["Id", "CreatedAt", "Amount", "Description"];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Deserialization error: `{0}`.")]
    De(csv::Error),
    #[error("Serialization error: `{0}`.")]
    Ser(csv::Error),
    #[error("Unexpected header: `{0}`.")]
    Header(String),
    #[error("IO error: `{0}`.")]
    Io(std::io::Error),
}

pub trait Storage {
    fn read_all(&self) -> Result<Vec<Record>, Error>;
    fn save(&mut self, records: &[Record]) -> Result<(), Error>;
}

pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> CsvStorage {
        CsvStorage {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Storage for CsvStorage {
    /// Reads every record from the file, creating the file when it doesn't
    /// exist yet. Any malformed row fails the whole read; rows are never
    /// silently skipped.
    fn read_all(&self) -> Result<Vec<Record>, Error> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)
            .map_err(Error::Io)?;

        let mut reader = csv::Reader::from_reader(file);
        // An empty header means an empty file, which is fine. Anything else
        // has to be the exact header `save` writes.
        let headers = reader.headers().map_err(Error::De)?.clone();
        if !headers.is_empty() && headers != HEADERS.to_vec() {
            return Err(Error::Header(headers.iter().collect::<Vec<_>>().join(",")));
        }

        let mut records = Vec::new();
        for row in reader.into_deserialize::<Record>() {
            records.push(row.map_err(Error::De)?);
        }
        debug!("read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Truncates the file and writes the header plus one row per record.
    fn save(&mut self, records: &[Record]) -> Result<(), Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(Error::Ser)?;

        // Written explicitly so an empty record set still produces the header.
        writer.write_record(HEADERS).map_err(Error::Ser)?;
        for record in records {
            writer.serialize(record).map_err(Error::Ser)?;
        }
        writer.flush().map_err(Error::Io)?;
        debug!("wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
