//! Calendar page fetching and row extraction.

use crate::constants::{calendar, retry};
use crate::error::AppError;
use crate::scrape::row::RawRow;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{info, warn};

/// Fetches one roster's calendar page, retrying transient failures with
/// bounded exponential backoff.
pub async fn fetch_calendar_page(client: &Client, url: &str) -> Result<String, AppError> {
    info!("Fetching calendar page: {url}");

    let mut attempt = 0u32;
    let mut backoff = Duration::from_millis(retry::BASE_DELAY_MS);
    let response = loop {
        match client.get(url).send().await {
            Ok(resp) => {
                let status = resp.status();
                if (status.as_u16() == 429 || status.is_server_error())
                    && attempt < retry::MAX_ATTEMPTS
                {
                    warn!(
                        "Transient {} from {}. Retrying in {:?} (attempt {}/{})",
                        status,
                        url,
                        backoff,
                        attempt + 1,
                        retry::MAX_ATTEMPTS
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                    backoff = backoff.saturating_mul(2);
                    continue;
                }
                break resp;
            }
            Err(e) => {
                if (e.is_timeout() || e.is_connect()) && attempt < retry::MAX_ATTEMPTS {
                    warn!(
                        "Request error {} for {}. Retrying in {:?} (attempt {}/{})",
                        e,
                        url,
                        backoff,
                        attempt + 1,
                        retry::MAX_ATTEMPTS
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                    backoff = backoff.saturating_mul(2);
                    continue;
                }
                return Err(AppError::from(e));
            }
        }
    };

    let status = response.status();
    if status.as_u16() == 404 {
        return Err(AppError::page_not_found(url));
    }
    if status.is_server_error() {
        return Err(AppError::page_server_error(status.as_u16(), url));
    }
    if status.is_client_error() {
        return Err(AppError::page_client_error(status.as_u16(), url));
    }

    Ok(response.text().await?)
}

/// Extracts the data rows of the calendar table.
///
/// Every other row of the table carries match data; the alternating rows
/// are visual separators and are skipped here.
pub fn extract_data_rows(html: &str) -> Result<Vec<RawRow>, AppError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(calendar::ROW_SELECTOR)
        .map_err(|e| AppError::selector_error(e.to_string()))?;

    let rows = document
        .select(&selector)
        .enumerate()
        .filter(|(i, _)| i % 2 == 1)
        .map(|(_, row)| RawRow::from_element(row))
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar_page(rows: &str) -> String {
        // The calendar table must be the sixth child of <body>
        format!(
            "<html><body>\
             <div></div><div></div><div></div><div></div><div></div>\
             <table><tbody>{rows}</tbody></table>\
             </body></html>"
        )
    }

    #[test]
    fn test_extract_skips_separator_rows() {
        let page = calendar_page(
            "<tr><td>header</td></tr>\
             <tr><td>FMA042</td><td>01-09-24</td></tr>\
             <tr><td>separator</td></tr>\
             <tr><td>FMA043</td><td>17-01-25</td></tr>",
        );
        let rows = extract_data_rows(&page).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cell_text(0), Some("FMA042"));
        assert_eq!(rows[1].cell_text(0), Some("FMA043"));
    }

    #[test]
    fn test_extract_ignores_other_tables() {
        let page = "<html><body>\
             <table><tbody><tr><td>nav</td></tr></tbody></table>\
             <div></div><div></div><div></div><div></div>\
             <table><tbody>\
             <tr><td>header</td></tr>\
             <tr><td>FMA042</td></tr>\
             </tbody></table>\
             </body></html>";
        let rows = extract_data_rows(page).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cell_text(0), Some("FMA042"));
    }

    #[test]
    fn test_extract_empty_document() {
        let rows = extract_data_rows("<html><body></body></html>").unwrap();
        assert!(rows.is_empty());
    }
}
