pub mod loader;
pub mod series;

pub use loader::{load_csv, parse_timestamp};
pub use series::{PricePoint, PriceSeries};
