use anyhow::{bail, Result};
use reliefweb::Client;

/// Fetch one item by id and print it.
pub async fn run_get(
    client: &Client,
    resource: &str,
    id: &str,
    include: &[String],
    profile: Option<&str>,
) -> Result<()> {
    let mut query = client.query(resource).id(id);

    if !include.is_empty() {
        query = query.fields(include, &[]);
    }
    if let Some(profile) = profile {
        query = query.profile(profile);
    }

    let results = query.execute().await;
    if results.error() {
        bail!("API request failed");
    }
    let Some(item) = results.item() else {
        bail!("No {} item with id {}", resource, id);
    };
    println!("{}", serde_json::to_string_pretty(item)?);
    Ok(())
}
