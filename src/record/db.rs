//! Database operations for daily records.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    auth::UserID,
    record::{DailyRecord, RecordFormData, RecordId},
};

/// Create a daily record owned by `user_id` and return it with its generated ID.
///
/// # Errors
///
/// Returns:
/// - [Error::DuplicateRecordDate] if the user already has a record for the date.
/// - [Error::NegativeAmount] if an amount violates the non-negative check.
/// - [Error::SqlError] if any other SQL related error occurred.
pub fn create_record(
    user_id: UserID,
    form: &RecordFormData,
    connection: &Connection,
) -> Result<DailyRecord, Error> {
    let record = connection
        .prepare(
            "INSERT INTO daily_record
                (user_id, date, transfer_amount, afternoon_shift_amount,
                 night_shift_amount, system_amount)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, date, transfer_amount, afternoon_shift_amount,
                 night_shift_amount, system_amount",
        )?
        .query_row(
            (
                user_id.as_i64(),
                form.date,
                form.transfer_amount,
                form.afternoon_shift_amount,
                form.night_shift_amount,
                form.system_amount,
            ),
            map_record_row,
        )
        .map_err(map_constraint_error)?;

    Ok(record)
}

/// Retrieve a single record by ID, scoped to its owner.
///
/// A record belonging to another user is reported as [Error::NotFound] rather
/// than revealing that the ID exists.
pub fn get_record(
    record_id: RecordId,
    user_id: UserID,
    connection: &Connection,
) -> Result<DailyRecord, Error> {
    connection
        .prepare(
            "SELECT id, date, transfer_amount, afternoon_shift_amount,
                 night_shift_amount, system_amount
             FROM daily_record
             WHERE id = :id AND user_id = :user_id;",
        )?
        .query_row(
            &[(":id", &record_id), (":user_id", &user_id.as_i64())],
            map_record_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve all of a user's records, most recent date first.
pub fn get_all_records(user_id: UserID, connection: &Connection) -> Result<Vec<DailyRecord>, Error> {
    connection
        .prepare(
            "SELECT id, date, transfer_amount, afternoon_shift_amount,
                 night_shift_amount, system_amount
             FROM daily_record
             WHERE user_id = :user_id
             ORDER BY date DESC;",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_record_row)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

/// Update a record's date and amounts, scoped to its owner.
///
/// # Errors
///
/// Returns:
/// - [Error::UpdateMissingRecord] if the record doesn't exist or belongs to another user.
/// - [Error::DuplicateRecordDate] if the new date collides with another of the user's records.
pub fn update_record(
    record_id: RecordId,
    user_id: UserID,
    form: &RecordFormData,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE daily_record
             SET date = ?1, transfer_amount = ?2, afternoon_shift_amount = ?3,
                 night_shift_amount = ?4, system_amount = ?5,
                 updated_at = CURRENT_TIMESTAMP
             WHERE id = ?6 AND user_id = ?7",
            (
                form.date,
                form.transfer_amount,
                form.afternoon_shift_amount,
                form.night_shift_amount,
                form.system_amount,
                record_id,
                user_id.as_i64(),
            ),
        )
        .map_err(map_constraint_error)?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingRecord);
    }

    Ok(())
}

/// Delete a record by ID, scoped to its owner.
///
/// # Errors
///
/// Returns an [Error::DeleteMissingRecord] if the record doesn't exist or
/// belongs to another user.
pub fn delete_record(
    record_id: RecordId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM daily_record WHERE id = ?1 AND user_id = ?2",
        (record_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingRecord);
    }

    Ok(())
}

/// Initialize the daily record table and indexes.
pub fn create_daily_record_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS daily_record (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            transfer_amount INTEGER NOT NULL CHECK(transfer_amount >= 0),
            afternoon_shift_amount INTEGER NOT NULL CHECK(afternoon_shift_amount >= 0),
            night_shift_amount INTEGER NOT NULL CHECK(night_shift_amount >= 0),
            system_amount INTEGER NOT NULL CHECK(system_amount >= 0),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(user_id, date),
            FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_daily_record_owner_date
            ON daily_record(user_id, date DESC);",
    )?;

    Ok(())
}

fn map_constraint_error(error: rusqlite::Error) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
            },
            _,
        ) => Error::DuplicateRecordDate,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_CHECK,
            },
            _,
        ) => Error::NegativeAmount,
        error => error.into(),
    }
}

fn map_record_row(row: &Row) -> Result<DailyRecord, rusqlite::Error> {
    Ok(DailyRecord {
        id: row.get(0)?,
        date: row.get(1)?,
        transfer_amount: row.get(2)?,
        afternoon_shift_amount: row.get(3)?,
        night_shift_amount: row.get(4)?,
        system_amount: row.get(5)?,
    })
}
