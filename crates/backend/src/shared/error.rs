use contracts::shared::filter::FilterQueryError;
use thiserror::Error;

/// Ошибки загрузки и разбора данных дашборда
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Filter query error: {0}")]
    Query(#[from] FilterQueryError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
