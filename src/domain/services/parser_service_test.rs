// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::parser_service::ParserService;

const BASE_URL: &str = "https://example.com";

fn parse(html: &str) -> crate::domain::services::parser_service::ParsedPage {
    ParserService::new().parse(html, BASE_URL)
}

#[test]
fn test_extracts_title_and_meta() {
    let html = r#"
        <html><head>
            <title> Acme Widgets </title>
            <meta name="description" content="We make widgets.">
            <meta property="og:title" content="Acme">
            <link rel="canonical" href="https://example.com/home">
        </head><body><h1>Widgets for everyone</h1></body></html>
    "#;
    let page = parse(html);
    assert_eq!(page.page_title.as_deref(), Some("Acme Widgets"));
    assert_eq!(page.meta_description.as_deref(), Some("We make widgets."));
    assert_eq!(page.og_title.as_deref(), Some("Acme"));
    assert_eq!(page.h1.as_deref(), Some("Widgets for everyone"));
    assert_eq!(page.canonical_url.as_deref(), Some("https://example.com/home"));
}

#[test]
fn test_og_description_fallback() {
    let html = r#"<head><meta property="og:description" content="fallback text"></head>"#;
    let page = parse(html);
    assert_eq!(page.meta_description.as_deref(), Some("fallback text"));
}

#[test]
fn test_visible_text_skips_scripts_and_styles() {
    let html = r#"
        <html><body>
            <script>var secret = "hidden";</script>
            <style>.a { color: red; }</style>
            <p>Visible paragraph</p>
        </body></html>
    "#;
    let page = parse(html);
    assert!(page.visible_text.contains("Visible paragraph"));
    assert!(!page.visible_text.contains("secret"));
    assert!(!page.visible_text.contains("color: red"));
}

#[test]
fn test_about_snippet_is_capped() {
    let body: String = "word ".repeat(600);
    let html = format!("<html><body><p>{}</p></body></html>", body);
    let page = parse(&html);
    let snippet = page.about_snippet.unwrap();
    assert!(snippet.chars().count() <= 1000);
}

#[test]
fn test_contact_extraction_and_dedup() {
    let html = r#"
        <body>
            <a href="mailto:sales@acme.io?subject=hi">Email us</a>
            <a href="tel:+15551234567">Call</a>
            <p>Reach support at sales@acme.io or info@acme.io</p>
        </body>
    "#;
    let page = parse(html);
    assert_eq!(page.emails, vec!["info@acme.io", "sales@acme.io"]);
    assert_eq!(page.phones, vec!["+15551234567"]);
}

#[test]
fn test_social_links() {
    let html = r#"
        <body>
            <a href="https://www.facebook.com/acme">fb</a>
            <a href="https://www.linkedin.com/company/acme">li</a>
            <a href="https://example.com/about">about</a>
        </body>
    "#;
    let page = parse(html);
    assert_eq!(page.links.len(), 3);
    assert_eq!(
        page.social_links.get("facebook").map(String::as_str),
        Some("https://www.facebook.com/acme")
    );
    assert_eq!(
        page.social_links.get("linkedin").map(String::as_str),
        Some("https://www.linkedin.com/company/acme")
    );
    assert_eq!(page.social_links.len(), 2);
}

#[test]
fn test_logo_from_class_name_is_absolutized() {
    let html = r#"<body><img class="site-logo" src="/assets/logo.png"></body>"#;
    let page = parse(html);
    assert_eq!(
        page.logo_url.as_deref(),
        Some("https://example.com/assets/logo.png")
    );
}

#[test]
fn test_logo_from_json_ld() {
    let html = r#"
        <head><script type="application/ld+json">
            {"@type": "Organization", "logo": "https://cdn.example.com/brand.svg"}
        </script></head>
    "#;
    let page = parse(html);
    assert_eq!(
        page.logo_url.as_deref(),
        Some("https://cdn.example.com/brand.svg")
    );
}

#[test]
fn test_logo_from_header_fallback() {
    let html = r#"<body><header><a href="/"><img src="/img/mark.png"></a></header></body>"#;
    let page = parse(html);
    assert_eq!(
        page.logo_url.as_deref(),
        Some("https://example.com/img/mark.png")
    );
}

#[test]
fn test_favicon_extraction() {
    let html = r#"<head><link rel="shortcut icon" href="/favicon.ico"></head>"#;
    let page = parse(html);
    assert_eq!(
        page.favicon_url.as_deref(),
        Some("https://example.com/favicon.ico")
    );
}

#[test]
fn test_empty_page_yields_empty_fields() {
    let page = parse("<html><body></body></html>");
    assert!(page.page_title.is_none());
    assert!(page.about_snippet.is_none());
    assert!(page.emails.is_empty());
    assert!(page.logo_url.is_none());
}
