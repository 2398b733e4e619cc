//! Search pages fetched as background text for a profile.

use url::Url;

use profilegraph_shared::{ProfileGraphError, ProfileInput, Result};

const LINKEDIN_SEARCH: &str = "https://www.linkedin.com/search/results/all/";
const REDDIT_SEARCH: &str = "https://www.reddit.com/search/";
const LINKEDIN_LEARNING_SEARCH: &str = "https://www.linkedin.com/learning/search";

/// The four search URLs for a profile, in fetch order:
/// people search, tool discussions, pain-point discussions, courses.
pub fn search_sources(profile: &ProfileInput) -> Result<Vec<Url>> {
    let title = profile.title.trim();
    let company = profile.company.trim();

    [
        (LINKEDIN_SEARCH, "keywords", format!("{title} {company}")),
        (REDDIT_SEARCH, "q", format!("{title} tools")),
        (REDDIT_SEARCH, "q", format!("{title} challenges problems")),
        (LINKEDIN_LEARNING_SEARCH, "keywords", title.to_string()),
    ]
    .into_iter()
    .map(|(base, key, query)| {
        Url::parse_with_params(base, &[(key, query)])
            .map_err(|e| ProfileGraphError::parse(format!("bad search URL {base}: {e}")))
    })
    .collect()
}
