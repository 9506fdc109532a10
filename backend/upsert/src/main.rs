use std::env;

use chrono::Utc;
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use upsert::{CollectionClient, base_url, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let port = env::var("PORT").ok();
    let client = CollectionClient::new(Client::new(), base_url(port.as_deref()));

    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let report = run(&client, &today).await?;

    info!(
        "Added {} users and {} posts",
        report.users_added, report.posts_added
    );

    println!("Upserted users: {}", report.campus_users);
    println!("Upserted posts count: {}", report.posts);

    Ok(())
}
