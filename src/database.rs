use log::info;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use crate::error::ConvoFixError;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens the conversations database in read/write mode. The file must
    /// already exist; a schema fix has nothing to do on a database it would
    /// have to create first.
    pub fn connect(db_path: &Path) -> Result<Self, ConvoFixError> {
        if !db_path.is_file() {
            return Err(ConvoFixError::Error(format!(
                "Database file '{}' does not exist",
                db_path.display()
            )));
        }

        let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        info!("Database opened at: {}", db_path.display());

        Ok(Self { conn })
    }

    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
