/// Ideal-podcast profile generation
///
/// Builds the single templated prompt from the brand details, runs it
/// through the model provider at temperature 0, and parses the JSON reply.
/// A reply that fails to parse degrades to an empty profile; there is no
/// retry.
use serde::Deserialize;

use crate::{error::AppResult, models::BrandDetails, services::providers::ModelProvider};

/// Categories the model is allowed to assign. The prompt embeds this list
/// verbatim so generated profiles stay joinable with the catalog taxonomy.
pub const VALID_CATEGORIES: [&str; 19] = [
    "technology",
    "business",
    "health&fitness",
    "education",
    "true_crime",
    "news&politics",
    "comedy",
    "sports",
    "kids&family",
    "arts",
    "society&culture",
    "history",
    "fiction",
    "religion&spirituality",
    "leisure",
    "government",
    "music",
    "science",
    "tv&film",
];

/// The category list exactly as it appears in the prompt
pub fn category_list_block() -> String {
    let entries: Vec<String> = VALID_CATEGORIES
        .iter()
        .map(|c| format!("    \"{}\"", c))
        .collect();
    format!("[\n{}\n]", entries.join(",\n"))
}

/// Renders the fixed prompt template for one brand
pub fn build_prompt(brand: &BrandDetails) -> String {
    format!(
        r#"You are an expert assistant helping brands find the most suitable podcasts to advertise on.

Objective:
Given a brand's product, goals, and target audience, generate a detailed profile of the *ideal podcast* where this brand should advertise to maximize relevance, engagement, and return on investment (ROI).

This profile will be used to semantically match against real podcasts in a vector database, so your output must be high-quality, structured, and JSON-parsable.

Instructions:
- DO NOT include any actual podcast or brand names.
- DO NOT describe what kind of podcast "would be ideal" - instead, write as if the podcast already exists.
- The podcast summary should be written in the style of a real podcast description, like those found on Spotify or Apple Podcasts.
- Use only the details provided in the brand input - do not assume or hallucinate beyond that.
- Carefully select podcast categories and stats that align with the brand's size, audience, and goals.
- The value of "podcast_details_string" must be a single JSON-safe string: all line breaks must be escaped as \n, and all internal quotes must be escaped if needed.
- Use double quotes for all JSON keys and string values.
- Return JSON only - no markdown, no commentary, no code fences.

Choose only from this list of valid podcast categories:
{categories}

Output Format (strictly follow this format):

{{
  "podcast_details_string": "<natural language summary of ideal podcast - audience, tone, topics>
Main Category: <one from the list above>
Subcategories: <comma-separated values from the list above>

YouTube Subscribers: <integer>
Instagram Followers: <integer>
Average Episode Views: <integer>
Impressions Range: <min>-<max>
Estimated Ad Price for 30s: <integer>$
Estimated Ad Price for 60s: <integer>$
Episodes with Ads: <percentage>%
Average Sponsor Length: <seconds>
Ad Percentage Per Episode: <percentage>%
Average Ads Per Episode: <float>
Brand Repeat Rate: <percentage>%
Top Past Sponsors: [<brand1>, <brand2>, ...]"
}}

Brand Details:
{brand}
"#,
        categories = category_list_block(),
        brand = brand,
    )
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    podcast_details_string: String,
}

/// Parses the model reply into the profile string.
///
/// Strips Markdown code fences the model sometimes adds despite the prompt.
/// Any parse failure yields the empty string.
pub fn parse_profile(raw: &str) -> String {
    let mut output = raw.trim().to_string();
    if output.starts_with("```") {
        output = output.trim_matches('`').to_string();
        output = output.replace("json\n", "").replace("json", "");
    }

    match serde_json::from_str::<ProfileResponse>(&output) {
        Ok(parsed) => parsed.podcast_details_string,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse profile response; using empty profile");
            String::new()
        }
    }
}

/// Generates the ideal-podcast profile for a brand
pub async fn generate_ideal_profile(
    provider: &dyn ModelProvider,
    brand: &BrandDetails,
) -> AppResult<String> {
    let prompt = build_prompt(brand);
    let raw = provider.complete(&prompt).await?;
    let profile = parse_profile(&raw);

    if profile.is_empty() {
        tracing::warn!(website = %brand.website, "Generated profile is empty");
    } else {
        tracing::info!(
            website = %brand.website,
            profile_chars = profile.len(),
            "Ideal-podcast profile generated"
        );
    }

    Ok(profile)
}
