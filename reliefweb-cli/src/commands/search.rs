use anyhow::{bail, Result};
use reliefweb::Client;

/// Options for a collection search.
#[derive(Debug, Default)]
pub struct SearchOpts {
    pub query: Option<String>,
    pub include: Vec<String>,
    pub sort: Vec<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub profile: Option<String>,
    pub preset: Option<String>,
    pub raw: bool,
}

/// Run a search against a resource collection and print the results.
pub async fn run_search(client: &Client, resource: &str, opts: SearchOpts) -> Result<()> {
    let mut query = client.query(resource);

    if let Some(value) = &opts.query {
        query = query.search(value.as_str());
    }
    if !opts.include.is_empty() {
        query = query.fields(&opts.include, &[]);
    }
    for token in &opts.sort {
        let Some((field, direction)) = token.split_once(':') else {
            bail!("Invalid sort token '{}', expected field:direction", token);
        };
        query = query.sort(field, direction);
    }
    if let Some(limit) = opts.limit {
        query = query.limit(limit);
    }
    if let Some(offset) = opts.offset {
        query = query.offset(offset);
    }
    if let Some(profile) = &opts.profile {
        query = query.profile(profile.as_str());
    }
    if let Some(preset) = &opts.preset {
        query = query.preset(preset.as_str());
    }

    if opts.raw {
        let Some(payload) = query.execute_raw().await else {
            bail!("API request failed");
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let results = query.execute().await;
    if results.error() {
        bail!("API request failed");
    }

    tracing::debug!(
        "{} of {} items returned for '{}'",
        results.count(),
        results.total(),
        resource
    );
    println!("Total matches: {}", results.total());
    for item in results.items() {
        println!("{}", serde_json::to_string_pretty(item)?);
    }
    Ok(())
}
