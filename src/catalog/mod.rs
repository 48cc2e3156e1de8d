/// Flat-table podcast catalog
///
/// Two read-only CSV tables loaded once at startup: the identity table
/// (keyed by `id`) and the advertising-stats table (keyed by `clientId`).
/// Lookups never fail; a missing file, malformed row, or absent key falls
/// back to a placeholder record and the condition is logged.
use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::models::{PodcastDetails, PodcastStats};

#[derive(Debug, Default)]
pub struct PodcastCatalog {
    details: HashMap<String, PodcastDetails>,
    stats: HashMap<String, PodcastStats>,
}

/// Identity-table row. Numeric-looking cells stay strings here; only the
/// key column is split off before storage.
#[derive(Debug, Deserialize)]
struct DetailsRow {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    categories: String,
    #[serde(default, rename = "youtubeID")]
    youtube_id: String,
    #[serde(default, rename = "spotifyId")]
    spotify_id: String,
    #[serde(default, rename = "websiteName")]
    website_name: String,
    #[serde(default, rename = "rssFeed")]
    rss_feed: String,
}

/// Stats-table row. Metric cells are optional because exported tables leave
/// unknown values blank.
#[derive(Debug, Deserialize)]
struct StatsRow {
    #[serde(rename = "clientId")]
    client_id: String,
    min_impressions: Option<f64>,
    max_impressions: Option<f64>,
    youtube_subscribers: Option<f64>,
    instagram_followers: Option<f64>,
    episode_avg_views: Option<f64>,
    estimated_ad_price: Option<String>,
}

impl PodcastCatalog {
    /// Loads both tables. Load failures leave the affected table empty so
    /// every lookup resolves to a placeholder, matching the per-request
    /// fallback behavior.
    pub fn load(pods_path: impl AsRef<Path>, stats_path: impl AsRef<Path>) -> Self {
        let details = match Self::load_details(pods_path.as_ref()) {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(
                    path = %pods_path.as_ref().display(),
                    error = %e,
                    "Failed to load podcast identity table; lookups will return placeholders"
                );
                HashMap::new()
            }
        };

        let stats = match Self::load_stats(stats_path.as_ref()) {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(
                    path = %stats_path.as_ref().display(),
                    error = %e,
                    "Failed to load podcast stats table; lookups will return placeholders"
                );
                HashMap::new()
            }
        };

        tracing::info!(
            details_count = details.len(),
            stats_count = stats.len(),
            "Podcast catalog loaded"
        );

        Self { details, stats }
    }

    fn load_details(path: &Path) -> anyhow::Result<HashMap<String, PodcastDetails>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut details = HashMap::new();

        for result in reader.deserialize::<DetailsRow>() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed identity row");
                    continue;
                }
            };
            // Last row wins on duplicate keys
            details.insert(
                row.id,
                PodcastDetails {
                    name: row.name,
                    image: row.image,
                    summary: row.summary,
                    categories: row.categories,
                    youtube_id: row.youtube_id,
                    spotify_id: row.spotify_id,
                    website_name: row.website_name,
                    rss_feed: row.rss_feed,
                },
            );
        }

        Ok(details)
    }

    fn load_stats(path: &Path) -> anyhow::Result<HashMap<String, PodcastStats>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut stats = HashMap::new();

        for result in reader.deserialize::<StatsRow>() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed stats row");
                    continue;
                }
            };
            stats.insert(
                row.client_id,
                PodcastStats {
                    min_impressions: row.min_impressions.unwrap_or(0.0),
                    max_impressions: row.max_impressions.unwrap_or(0.0),
                    youtube_subscribers: row.youtube_subscribers.unwrap_or(0.0),
                    instagram_followers: row.instagram_followers.unwrap_or(0.0),
                    episode_avg_views: row.episode_avg_views.unwrap_or(0.0),
                    estimated_ad_price: row
                        .estimated_ad_price
                        .filter(|p| !p.trim().is_empty())
                        .unwrap_or_else(|| "N/A".to_string()),
                },
            );
        }

        Ok(stats)
    }

    /// Identity fields for `pod_id`, or the documented placeholder
    pub fn details(&self, pod_id: &str) -> PodcastDetails {
        match self.details.get(pod_id) {
            Some(details) => details.clone(),
            None => {
                tracing::debug!(pod_id = %pod_id, "No identity row for podcast");
                PodcastDetails::placeholder(pod_id)
            }
        }
    }

    /// Advertising metrics for `pod_id`, or zeroed defaults
    pub fn stats(&self, pod_id: &str) -> PodcastStats {
        match self.stats.get(pod_id) {
            Some(stats) => stats.clone(),
            None => {
                tracing::debug!(pod_id = %pod_id, "No stats row for podcast");
                PodcastStats::default()
            }
        }
    }

    #[cfg(test)]
    pub fn from_maps(
        details: HashMap<String, PodcastDetails>,
        stats: HashMap<String, PodcastStats>,
    ) -> Self {
        Self { details, stats }
    }
}

/// Parses a category cell into individual category names.
///
/// Cells hold either a plain string ("health&fitness") or a bracketed list
/// literal ("['health&fitness', 'education']") depending on how the table
/// was exported.
pub fn parse_categories(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let inner = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    inner
        .split(',')
        .map(|part| part.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn sample_catalog(dir: &tempfile::TempDir) -> PodcastCatalog {
        let pods = write_fixture(
            dir,
            "pods.csv",
            "id,name,image,summary,categories,youtubeID,spotifyId,websiteName,rssFeed\n\
             pod1,Wellness Weekly,https://img.example.com/ww.jpg,Holistic health talk,\"['health&fitness', 'education']\",UCww,3abc,wellnessweekly.fm,https://ww.fm/rss\n",
        );
        let stats = write_fixture(
            dir,
            "pods_stats.csv",
            "clientId,min_impressions,max_impressions,youtube_subscribers,instagram_followers,episode_avg_views,estimated_ad_price\n\
             pod1,10000,50000,120000,45000,30000,\"$500 (30s) / $900 (60s)\"\n",
        );
        PodcastCatalog::load(pods, stats)
    }

    #[test]
    fn test_lookup_known_podcast() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = sample_catalog(&dir);

        let details = catalog.details("pod1");
        assert_eq!(details.name, "Wellness Weekly");
        assert_eq!(details.youtube_id, "UCww");

        let stats = catalog.stats("pod1");
        assert_eq!(stats.min_impressions, 10000.0);
        assert_eq!(stats.estimated_ad_price, "$500 (30s) / $900 (60s)");
    }

    #[test]
    fn test_missing_key_yields_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = sample_catalog(&dir);

        let details = catalog.details("nope");
        assert_eq!(details.name, "Podcast nope");
        assert_eq!(details.summary, "No details available");

        let stats = catalog.stats("nope");
        assert_eq!(stats, PodcastStats::default());
    }

    #[test]
    fn test_missing_files_yield_empty_catalog() {
        let catalog = PodcastCatalog::load("/no/such/pods.csv", "/no/such/stats.csv");
        assert_eq!(catalog.details("x").name, "Podcast x");
        assert_eq!(catalog.stats("x"), PodcastStats::default());
    }

    #[test]
    fn test_blank_metric_cells_default_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let pods = write_fixture(
            &dir,
            "pods.csv",
            "id,name,image,summary,categories,youtubeID,spotifyId,websiteName,rssFeed\n",
        );
        let stats = write_fixture(
            &dir,
            "pods_stats.csv",
            "clientId,min_impressions,max_impressions,youtube_subscribers,instagram_followers,episode_avg_views,estimated_ad_price\n\
             pod2,,,,,,\n",
        );
        let catalog = PodcastCatalog::load(pods, stats);

        let stats = catalog.stats("pod2");
        assert_eq!(stats.youtube_subscribers, 0.0);
        assert_eq!(stats.estimated_ad_price, "N/A");
    }

    #[test]
    fn test_duplicate_keys_last_row_wins() {
        let dir = tempfile::tempdir().unwrap();
        let pods = write_fixture(
            &dir,
            "pods.csv",
            "id,name,image,summary,categories,youtubeID,spotifyId,websiteName,rssFeed\n\
             pod1,First,,,,,,,\n\
             pod1,Second,,,,,,,\n",
        );
        let stats = write_fixture(
            &dir,
            "pods_stats.csv",
            "clientId,min_impressions,max_impressions,youtube_subscribers,instagram_followers,episode_avg_views,estimated_ad_price\n",
        );
        let catalog = PodcastCatalog::load(pods, stats);

        assert_eq!(catalog.details("pod1").name, "Second");
    }

    #[test]
    fn test_parse_categories_bracketed_list() {
        let parsed = parse_categories("['health&fitness', 'education', \"science\"]");
        assert_eq!(parsed, vec!["health&fitness", "education", "science"]);
    }

    #[test]
    fn test_parse_categories_plain_string() {
        assert_eq!(parse_categories("comedy"), vec!["comedy"]);
        assert_eq!(parse_categories("comedy, arts"), vec!["comedy", "arts"]);
    }

    #[test]
    fn test_parse_categories_empty() {
        assert!(parse_categories("").is_empty());
        assert!(parse_categories("  ").is_empty());
        assert!(parse_categories("[]").is_empty());
    }
}
