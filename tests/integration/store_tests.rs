// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sqlx::SqlitePool;

use extractrs::domain::models::profile::ScrapedProfile;
use extractrs::domain::repositories::profile_repository::ProfileRepository;
use extractrs::infrastructure::database::connection::ensure_schema;
use extractrs::infrastructure::repositories::profile_repo_impl::ProfileRepositoryImpl;
use extractrs::presentation::handlers::profile_handler::lookup_profile;

async fn repo() -> ProfileRepositoryImpl {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    ensure_schema(&pool).await.unwrap();
    ProfileRepositoryImpl::new(pool)
}

fn profile(url: &str, name: &str) -> ScrapedProfile {
    let mut p = ScrapedProfile::new(url);
    p.crawl_status = "success".to_string();
    p.confidence_score = 0.85;
    p.business_profile.name = Some(name.to_string());
    p
}

#[tokio::test]
async fn test_full_record_round_trip() {
    let repo = repo().await;
    let mut record = profile("https://example.com", "Example Co");
    record.contact.email.push("hi@example.com".to_string());
    record.branding.fonts.push("Inter".to_string());
    record.technical_metadata.is_dynamic = true;

    repo.upsert("https://example.com", &record).await.unwrap();
    let found = repo.find_by_url("https://example.com").await.unwrap().unwrap();

    assert_eq!(found.business_profile.name.as_deref(), Some("Example Co"));
    assert_eq!(found.contact.email, vec!["hi@example.com"]);
    assert_eq!(found.branding.fonts, vec!["Inter"]);
    assert!(found.technical_metadata.is_dynamic);
}

#[tokio::test]
async fn test_repeat_extraction_overwrites_previous_record() {
    let repo = repo().await;
    repo.upsert("https://example.com", &profile("https://example.com", "First"))
        .await
        .unwrap();
    repo.upsert("https://example.com", &profile("https://example.com", "Second"))
        .await
        .unwrap();

    let found = repo.find_by_url("https://example.com").await.unwrap().unwrap();
    assert_eq!(found.business_profile.name.as_deref(), Some("Second"));
}

#[tokio::test]
async fn test_lookup_strips_trailing_slash_on_miss() {
    let repo = repo().await;
    repo.upsert("https://example.com", &profile("https://example.com", "Example Co"))
        .await
        .unwrap();

    let found = lookup_profile(&repo, "https://example.com/").await.unwrap();
    assert!(found.is_some());
    assert_eq!(
        found.unwrap().business_profile.name.as_deref(),
        Some("Example Co")
    );
}

#[tokio::test]
async fn test_lookup_missing_profile_returns_none() {
    let repo = repo().await;
    let found = lookup_profile(&repo, "https://nowhere.example").await.unwrap();
    assert!(found.is_none());
}
