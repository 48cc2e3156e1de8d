use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Brand profile assembled from the advertiser's form input.
///
/// Ephemeral: built per request, rendered into the profile prompt, then
/// discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandDetails {
    /// Normalized website URL (always carries a scheme)
    pub website: String,
    /// Total campaign budget in USD
    pub budget: u32,
    /// Average order value in USD
    pub aov: u32,
    /// Expected click-through rate, percent
    pub ctr: f32,
    /// Target gender mix, e.g. "90% female"
    pub target_gender: String,
    /// Target household-income bracket, e.g. "$100k+"
    pub target_hhi: String,
    /// Free-text brand interests/categories
    pub interests: Vec<String>,
}

impl Display for BrandDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Website: {}", self.website)?;
        writeln!(f, "Budget: ${}", self.budget)?;
        writeln!(f, "AOV: ${}", self.aov)?;
        writeln!(f, "CTR: {}%", self.ctr)?;
        writeln!(f, "Target Gender: {}", self.target_gender)?;
        writeln!(f, "Target HHI: {}", self.target_hhi)?;
        write!(f, "Interests: {}", self.interests.join(", "))
    }
}

// ============================================================================
// Catalog Records
// ============================================================================

/// Identity row from the podcast table, keyed by `id`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PodcastDetails {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub categories: String,
    #[serde(default, rename = "youtubeID")]
    pub youtube_id: String,
    #[serde(default, rename = "spotifyId")]
    pub spotify_id: String,
    #[serde(default, rename = "websiteName")]
    pub website_name: String,
    #[serde(default, rename = "rssFeed")]
    pub rss_feed: String,
}

impl PodcastDetails {
    /// Placeholder returned when the identity table has no row for `pod_id`
    pub fn placeholder(pod_id: &str) -> Self {
        Self {
            name: format!("Podcast {}", pod_id),
            summary: "No details available".to_string(),
            ..Self::default()
        }
    }
}

/// Advertising-metrics row from the stats table, keyed by `clientId`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PodcastStats {
    #[serde(default)]
    pub min_impressions: f64,
    #[serde(default)]
    pub max_impressions: f64,
    #[serde(default)]
    pub youtube_subscribers: f64,
    #[serde(default)]
    pub instagram_followers: f64,
    #[serde(default)]
    pub episode_avg_views: f64,
    #[serde(default = "default_ad_price")]
    pub estimated_ad_price: String,
}

fn default_ad_price() -> String {
    "N/A".to_string()
}

impl Default for PodcastStats {
    fn default() -> Self {
        Self {
            min_impressions: 0.0,
            max_impressions: 0.0,
            youtube_subscribers: 0.0,
            instagram_followers: 0.0,
            episode_avg_views: 0.0,
            estimated_ad_price: default_ad_price(),
        }
    }
}

// ============================================================================
// Search Results
// ============================================================================

/// One recommendation: a vector-index hit joined with both catalog tables.
///
/// Transient, constructed per query and discarded after render.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PodcastMatch {
    pub pod_id: String,
    /// Cosine distance to the query; lower is a closer match
    pub similarity_score: f32,
    /// Document text the index matched on
    pub content: String,
    /// Raw metadata stored alongside the embedding
    pub metadata: serde_json::Value,
    pub details: PodcastDetails,
    pub stats: PodcastStats,
}
