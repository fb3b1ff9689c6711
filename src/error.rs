use crate::table::RowId;
use thiserror::Error;

/// paydash 統一エラー型
#[derive(Debug, Error)]
pub enum PaydashError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {message} (status: {status})")]
    Api { status: u16, message: String },

    #[error("Unknown endpoint: {0}. Expected one of api/payments, api/chargebacks, api/dashboard, api/returns")]
    UnknownEndpoint(String),

    #[error("Unexpected payload for {endpoint}: {message}")]
    UnexpectedPayload { endpoint: String, message: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column '{0}' is not filterable")]
    ColumnNotFilterable(String),

    #[error("Invalid filter expression: {0}. Expected FIELD=TEXT")]
    InvalidFilter(String),

    #[error("Row {0} has been deleted")]
    RowDeleted(RowId),

    #[error("No action at position {0}")]
    UnknownAction(usize),

    #[error("Export is disabled for this table")]
    ExportDisabled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Fetch of {0} ended without a result")]
    FetchAborted(String),
}

pub type Result<T> = std::result::Result<T, PaydashError>;
