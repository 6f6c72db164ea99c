//! Daily takings records and their CRUD pages and endpoints.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{create_record_endpoint, get_new_record_page};
pub use db::{
    create_daily_record_table, create_record, delete_record, get_all_records, get_record,
    update_record,
};
pub use delete::delete_record_endpoint;
pub use domain::{DailyRecord, RecordFormData, RecordId};
pub use edit::{get_edit_record_page, update_record_endpoint};
pub use list::get_dashboard_page;
