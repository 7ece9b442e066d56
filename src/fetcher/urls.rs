//! URL building for the federation's calendar pages

/// Builds the calendar URL for one roster.
///
/// # Arguments
/// * `domain` - The base domain hosting the calendar pages
/// * `encoded_season` - Season string already encoded for URL embedding
/// * `competition_code` - Competition entity code
/// * `pool` - Pool code within the competition
/// * `team_index` - Index of the team within the pool's page
///
/// # Example
/// ```
/// use matchup_sync::fetcher::urls::build_calendar_url;
///
/// let url = build_calendar_url("https://www.ffvbbeach.org", "2024%2F2025", "ABCCS", "2MD", 2);
/// assert_eq!(
///     url,
///     "https://www.ffvbbeach.org/ffvbapp/resu/vbspo_calendrier.php?saison=2024%2F2025&codent=ABCCS&poule=2MD&calend=COMPLET&equipe=2"
/// );
/// ```
pub fn build_calendar_url(
    domain: &str,
    encoded_season: &str,
    competition_code: &str,
    pool: &str,
    team_index: u32,
) -> String {
    format!(
        "{domain}/ffvbapp/resu/vbspo_calendrier.php?saison={encoded_season}&codent={competition_code}&poule={pool}&calend=COMPLET&equipe={team_index}"
    )
}
