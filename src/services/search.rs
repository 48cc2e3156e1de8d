/// Recommendation pipeline
///
/// The call sequence is linear: generate the ideal-podcast profile, embed
/// it, query the vector index, then join each hit with the two catalog
/// tables.
use crate::{
    catalog::PodcastCatalog,
    error::AppResult,
    models::{BrandDetails, PodcastMatch},
    services::{profile, providers::ModelProvider},
    vector::{VectorHit, VectorIndex},
};

/// Outcome of one recommendation query
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The generated ideal-podcast profile the matches were ranked against
    pub ideal_profile: String,
    pub matches: Vec<PodcastMatch>,
}

/// Runs the full pipeline for one brand and returns the ranked matches
pub async fn search_podcasts(
    provider: &dyn ModelProvider,
    index: &VectorIndex,
    catalog: &PodcastCatalog,
    brand: &BrandDetails,
    k: usize,
) -> AppResult<SearchOutcome> {
    let ideal_profile = profile::generate_ideal_profile(provider, brand).await?;
    let embedding = provider.embed(&ideal_profile).await?;
    let hits = index.query(&embedding, k);

    let matches: Vec<PodcastMatch> = hits
        .into_iter()
        .map(|hit| enrich_hit(hit, catalog))
        .collect();

    tracing::info!(
        website = %brand.website,
        matches = matches.len(),
        "Podcast recommendations assembled"
    );

    Ok(SearchOutcome {
        ideal_profile,
        matches,
    })
}

/// Joins one index hit with the identity and stats tables
fn enrich_hit(hit: VectorHit, catalog: &PodcastCatalog) -> PodcastMatch {
    let details = catalog.details(&hit.pod_id);
    let stats = catalog.stats(&hit.pod_id);

    PodcastMatch {
        pod_id: hit.pod_id,
        similarity_score: hit.distance,
        content: hit.text,
        metadata: hit.metadata,
        details,
        stats,
    }
}
