//! # Upsert
//!
//! Adds the CMU and Pitt demo users and posts to a running board server without duplicating anything already there.
//!
//! - Users are matched by email
//! - Posts are matched by title + university, and only written when their author exists
//! - New ids continue from the highest id in the collection
//! - A collection is only written back when something was added
use std::collections::HashSet;

use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, json};
use thiserror::Error;
use tracing::info;

pub mod models;
pub mod seed;

use models::{Post, Profile, User};
use seed::{SeedPost, SeedUser};

pub const DEFAULT_PORT: &str = "3003";

#[derive(Error, Debug)]
pub enum UpsertError {
    #[error("{method} {key} failed: {source}")]
    Request {
        method: &'static str,
        key: String,
        source: reqwest::Error,
    },

    #[error("{method} {key} failed: {status}")]
    Status {
        method: &'static str,
        key: String,
        status: StatusCode,
    },
}

pub fn base_url(port: Option<&str>) -> String {
    format!(
        "http://localhost:{}/api/data",
        port.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_PORT)
    )
}

pub struct CollectionClient {
    client: Client,
    base_url: String,
}

impl CollectionClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, UpsertError> {
        let request_error = |source| UpsertError::Request {
            method: "GET",
            key: key.to_string(),
            source,
        };

        let res = self
            .client
            .get(&self.base_url)
            .query(&[("key", key)])
            .send()
            .await
            .map_err(request_error)?;

        if !res.status().is_success() {
            return Err(UpsertError::Status {
                method: "GET",
                key: key.to_string(),
                status: res.status(),
            });
        }

        res.json().await.map_err(request_error)
    }

    pub async fn set<T: Serialize>(&self, key: &str, data: &T) -> Result<(), UpsertError> {
        let res = self
            .client
            .post(&self.base_url)
            .json(&json!({ "key": key, "data": data }))
            .send()
            .await
            .map_err(|source| UpsertError::Request {
                method: "POST",
                key: key.to_string(),
                source,
            })?;

        if !res.status().is_success() {
            return Err(UpsertError::Status {
                method: "POST",
                key: key.to_string(),
                status: res.status(),
            });
        }

        Ok(())
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

/// Returns the merged users and how many were added.
pub fn upsert_users(existing: Vec<User>, seeds: &[SeedUser]) -> (Vec<User>, usize) {
    let mut users = existing;
    let mut added = 0;

    for seed in seeds {
        if users.iter().any(|u| u.email == seed.email) {
            continue;
        }

        users.push(User {
            id: next_id(users.iter().map(|u| u.id)),
            email: seed.email.to_string(),
            university: Some(seed.campus.name.to_string()),
            lat: Some(seed.campus.lat),
            lng: Some(seed.campus.lng),
            profile: Some(Profile {
                first_name: seed.first.to_string(),
                last_name: seed.last.to_string(),
                bio: seed.bio.to_string(),
                picture: seed.picture.to_string(),
                graduation_year: seed.year.to_string(),
                has_idea: "yes".to_string(),
                is_working_on_idea: "yes".to_string(),
                social: Map::new(),
                extra: Map::new(),
            }),
            extra: Map::new(),
        });
        added += 1;
    }

    (users, added)
}

/// Returns the merged posts and how many were added. `today` lands in `createdAt`.
pub fn upsert_posts(
    existing: Vec<Post>,
    users: &[User],
    seeds: &[SeedPost],
    today: &str,
) -> (Vec<Post>, usize) {
    let mut posts = existing;
    let mut seen: HashSet<String> = posts
        .iter()
        .map(|p| Post::identity(&p.title, &p.university))
        .collect();
    let mut added = 0;

    for seed in seeds {
        let Some(author) = users.iter().find(|u| u.email == seed.email) else {
            continue;
        };

        if !seen.insert(Post::identity(seed.title, seed.university)) {
            continue;
        }

        posts.push(Post {
            id: next_id(posts.iter().map(|p| p.id)),
            user_id: author.id,
            university: seed.university.to_string(),
            title: seed.title.to_string(),
            summary: seed.summary.to_string(),
            looking_for: seed.looking_for.to_string(),
            category: seed.category.to_string(),
            project_link: seed.project_link.to_string(),
            stage: seed.stage.to_string(),
            created_at: today.to_string(),
            comments: Vec::new(),
            extra: Map::new(),
        });
        added += 1;
    }

    (posts, added)
}

#[derive(Debug)]
pub struct UpsertReport {
    pub campus_users: usize,
    pub users_added: usize,
    pub posts: usize,
    pub posts_added: usize,
}

pub async fn run(client: &CollectionClient, today: &str) -> Result<UpsertReport, UpsertError> {
    let (users, posts) = tokio::try_join!(
        client.get::<Vec<User>>("users"),
        client.get::<Vec<Post>>("posts")
    )?;

    info!("Fetched {} users and {} posts", users.len(), posts.len());

    let (users, users_added) = upsert_users(users, &seed::USERS);
    if users_added > 0 {
        client.set("users", &users).await?;
    }

    let (posts, posts_added) = upsert_posts(posts, &users, &seed::POSTS, today);
    if posts_added > 0 {
        client.set("posts", &posts).await?;
    }

    let campus_users = users
        .iter()
        .filter(|u| {
            seed::CAMPUSES
                .iter()
                .any(|c| u.email.ends_with(c.domain))
        })
        .count();

    Ok(UpsertReport {
        campus_users,
        users_added,
        posts: posts.len(),
        posts_added,
    })
}
