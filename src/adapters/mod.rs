// Adapters layer: concrete data sources for the waitlist document.

pub mod file;
pub mod http;

use crate::domain::ports::DataSource;
use crate::utils::validation::is_remote_location;

pub use file::FileDataSource;
pub use http::HttpDataSource;

/// Well-known location of the static waitlist document.
pub const DEFAULT_SOURCE: &str = "waitlistData.json";

/// HTTP(S) 位址使用 HttpDataSource，其餘視為本機檔案
pub fn source_for(location: &str) -> Box<dyn DataSource> {
    if is_remote_location(location) {
        Box::new(HttpDataSource::new(location.trim()))
    } else {
        Box::new(FileDataSource::new(location))
    }
}
