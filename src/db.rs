//! Database initialization for the application.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{auth::create_user_table, record::create_daily_record_table};

/// Create the application's tables if they do not already exist.
///
/// # Errors
///
/// Returns an error if any of the table creation queries fail. The database is
/// left unchanged if an error occurs.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    // Record rows reference users, so the user table must be created first.
    create_user_table(&transaction)?;
    create_daily_record_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
