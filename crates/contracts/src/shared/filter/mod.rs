mod query;
mod state;

pub use query::FilterQueryError;
pub use state::{FilterState, Selection, YearFilter, ALL_SELECTION, ALL_YEARS};
