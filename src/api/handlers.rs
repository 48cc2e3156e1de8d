use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::parse_categories;
use crate::error::{AppError, AppResult};
use crate::models::{BrandDetails, PodcastMatch};
use crate::services::search_podcasts;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub website: String,
    /// Campaign budget in USD
    pub budget: u32,
    /// Average order value in USD
    pub aov: u32,
    /// Expected click-through rate, percent
    pub ctr: f32,
    /// Share of the target audience that is female, 0-100
    pub target_gender_female_pct: u8,
    /// Household-income bracket, e.g. "$100k+"
    pub target_hhi: String,
    /// Comma-separated brand interests/categories
    #[serde(default)]
    pub interests: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// The generated ideal-podcast profile the matches were ranked against
    pub ideal_profile: String,
    pub results: Vec<MatchResponse>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub rank: usize,
    pub pod_id: String,
    /// Cosine distance; lower is closer
    pub similarity_score: f32,
    /// Display-friendly match quality, `(1 - distance) * 100`
    pub similarity_pct: f32,
    pub name: String,
    pub image: String,
    pub summary: String,
    pub categories: Vec<String>,
    pub youtube_id: String,
    pub spotify_id: String,
    pub website_name: String,
    pub rss_feed: String,
    pub youtube_subscribers: u64,
    pub instagram_followers: u64,
    pub episode_avg_views: u64,
    /// Formatted range like "10.0K-50.0K", absent when unknown
    pub impressions_range: Option<String>,
    pub estimated_ad_price: String,
    /// Document text the vector index matched on
    pub content: String,
    pub metadata: serde_json::Value,
}

impl MatchResponse {
    fn from_match(rank: usize, m: PodcastMatch) -> Self {
        let impressions_range = if m.stats.min_impressions > 0.0 && m.stats.max_impressions > 0.0 {
            Some(format!(
                "{}-{}",
                format_count(m.stats.min_impressions),
                format_count(m.stats.max_impressions)
            ))
        } else {
            None
        };

        Self {
            rank,
            pod_id: m.pod_id,
            similarity_score: m.similarity_score,
            similarity_pct: (1.0 - m.similarity_score) * 100.0,
            name: m.details.name,
            image: m.details.image,
            summary: m.details.summary,
            categories: parse_categories(&m.details.categories),
            youtube_id: m.details.youtube_id,
            spotify_id: m.details.spotify_id,
            website_name: m.details.website_name,
            rss_feed: m.details.rss_feed,
            youtube_subscribers: m.stats.youtube_subscribers as u64,
            instagram_followers: m.stats.instagram_followers as u64,
            episode_avg_views: m.stats.episode_avg_views as u64,
            impressions_range,
            estimated_ad_price: m.stats.estimated_ad_price,
            content: m.content,
            metadata: m.metadata,
        }
    }
}

/// Formats audience counts the way the result list displays them
pub fn format_count(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        format!("{}", num as u64)
    }
}

/// Validates the form input and assembles the brand profile.
///
/// The website is normalized to carry an `https://` scheme when none was
/// entered; interests split on commas with blanks dropped.
pub fn build_brand_details(request: &RecommendationRequest) -> AppResult<BrandDetails> {
    let website = request.website.trim();
    if website.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter a website URL".to_string(),
        ));
    }
    if request.budget == 0 {
        return Err(AppError::InvalidInput(
            "Please enter a valid budget".to_string(),
        ));
    }
    if request.aov == 0 {
        return Err(AppError::InvalidInput(
            "Please enter a valid AOV".to_string(),
        ));
    }

    let website = if website.starts_with("http://") || website.starts_with("https://") {
        website.to_string()
    } else {
        format!("https://{}", website)
    };

    let interests: Vec<String> = request
        .interests
        .split(',')
        .map(|interest| interest.trim().to_string())
        .filter(|interest| !interest.is_empty())
        .collect();

    Ok(BrandDetails {
        website,
        budget: request.budget,
        aov: request.aov,
        ctr: request.ctr,
        target_gender: format!("{}% female", request.target_gender_female_pct),
        target_hhi: request.target_hhi.clone(),
        interests,
    })
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Serves the brand-details form page
pub async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

/// Runs the recommendation pipeline for one brand submission
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let brand = build_brand_details(&request)?;

    let outcome = search_podcasts(
        state.provider.as_ref(),
        &state.index,
        &state.catalog,
        &brand,
        state.top_k,
    )
    .await?;

    let results: Vec<MatchResponse> = outcome
        .matches
        .into_iter()
        .enumerate()
        .map(|(i, m)| MatchResponse::from_match(i + 1, m))
        .collect();

    Ok(Json(RecommendationResponse {
        ideal_profile: outcome.ideal_profile,
        results,
    }))
}
