//! Record deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    auth::UserID,
    record::{db::delete_record, domain::RecordId},
};

/// The state needed for deleting a record.
#[derive(Debug, Clone)]
pub struct DeleteRecordEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteRecordEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle record deletion. Returns success alert or error.
pub async fn delete_record_endpoint(
    Path(record_id): Path<RecordId>,
    Extension(user_id): Extension<UserID>,
    State(state): State<DeleteRecordEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_record(record_id, user_id, &connection) {
        Ok(_) => Alert::SuccessSimple {
            message: "Record deleted successfully".to_owned(),
        }
        .into_response(),
        Err(Error::DeleteMissingRecord) => Error::DeleteMissingRecord.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting record {record_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
