use contracts::domain::a002_geo_boundary::BoundaryCollection;
use std::path::Path;

use crate::shared::error::Result;
use crate::usecases::u501_import_sales::{import_sales_csv, NormalizedSales};

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read and normalize the sales CSV.
pub async fn load_sales(path: &Path) -> Result<NormalizedSales> {
    tracing::info!("Loading sales data from: {}", path.display());
    let text = tokio::fs::read_to_string(path).await?;
    import_sales_csv(&text)
}

/// Country-border GeoJSON from a local file or an http(s) URL.
pub async fn load_boundaries(source: &str) -> Result<BoundaryCollection> {
    let boundaries: BoundaryCollection = if is_remote(source) {
        tracing::info!("Downloading boundaries from: {}", source);
        reqwest::get(source)
            .await?
            .error_for_status()?
            .json()
            .await?
    } else {
        tracing::info!("Loading boundaries from: {}", source);
        let text = tokio::fs::read_to_string(source).await?;
        serde_json::from_str(&text)?
    };

    tracing::info!("Loaded {} boundary features", boundaries.features.len());
    Ok(boundaries)
}
