use serde::{Deserialize, Serialize};

/// Revenue of one calendar year after provider / country filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyAggregate {
    pub year: i32,
    pub revenue: f64,
}
