use std::collections::HashSet;

use log::info;
use rusqlite::Connection;

use crate::error::ConvoFixError;

/// A column the target table must contain after the fix.
///
/// `ddl` is the full column definition as it appears after
/// `ALTER TABLE <table> ADD COLUMN`, so it repeats the name.
pub struct DesiredColumn {
    pub name: &'static str,
    pub ddl: &'static str,
}

pub const CONVERSATIONS_TABLE: &str = "conversations";
pub const CONVERSATION_ITEMS_TABLE: &str = "conversation_items";

pub const CONVERSATIONS_COLUMNS: &[DesiredColumn] = &[
    DesiredColumn {
        name: "agent_name",
        ddl: "agent_name TEXT",
    },
    DesiredColumn {
        name: "status",
        ddl: "status TEXT DEFAULT 'active'",
    },
];

pub const CONVERSATION_ITEMS_COLUMNS: &[DesiredColumn] = &[
    DesiredColumn {
        name: "agent_name",
        ddl: "agent_name TEXT",
    },
    DesiredColumn {
        name: "metadata",
        ddl: "metadata TEXT",
    },
];

/// Returns the names of the columns currently present on `table`.
///
/// `PRAGMA table_info` reports zero rows for a table that doesn't exist,
/// so an empty result is treated as a missing table.
fn table_columns(conn: &Connection, table: &str) -> Result<HashSet<String>, ConvoFixError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<HashSet<_>, _>>()?;

    if columns.is_empty() {
        return Err(ConvoFixError::Error(format!(
            "Table '{}' does not exist",
            table
        )));
    }

    Ok(columns)
}

/// Adds each desired column that `table` doesn't already have. Columns that
/// are already present are left untouched, so running this twice is a no-op
/// the second time. Returns the number of columns added.
pub fn ensure_columns(
    conn: &Connection,
    table: &str,
    columns: &[DesiredColumn],
) -> Result<usize, ConvoFixError> {
    let existing = table_columns(conn, table)?;

    let mut added = 0;
    for column in columns {
        if !existing.contains(column.name) {
            conn.execute(
                &format!("ALTER TABLE {} ADD COLUMN {}", table, column.ddl),
                [],
            )?;
            info!("Added column '{}' to table '{}'", column.name, table);
            added += 1;
        }
    }

    Ok(added)
}

/// Brings both conversation tables up to the desired column sets in a single
/// transaction. The commit happens only after both tables have been processed;
/// any earlier error drops the transaction and rolls back pending additions.
pub fn fix_schema(conn: &mut Connection) -> Result<usize, ConvoFixError> {
    let tx = conn.transaction()?;

    let mut added = ensure_columns(&tx, CONVERSATIONS_TABLE, CONVERSATIONS_COLUMNS)?;
    added += ensure_columns(&tx, CONVERSATION_ITEMS_TABLE, CONVERSATION_ITEMS_COLUMNS)?;

    tx.commit()?;
    Ok(added)
}
