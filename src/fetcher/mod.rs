//! Upstream calendar access: HTTP client, URL building, season derivation
//! and page-to-row extraction.

pub mod http_client;
pub mod page;
pub mod season;
pub mod urls;

pub use http_client::create_http_client;
pub use page::{extract_data_rows, fetch_calendar_page};
pub use season::current_season_encoded;
pub use urls::build_calendar_url;
