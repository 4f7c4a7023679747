// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use validator::Validate;

use crate::domain::models::pipeline::PipelineResult;
use crate::domain::models::profile::ScrapedProfile;
use crate::domain::repositories::profile_repository::ProfileRepository;
use crate::domain::services::branding_service::BrandingServiceTrait;
use crate::domain::services::enrichment_service::{EnrichmentInsights, EnrichmentServiceTrait};
use crate::domain::services::parser_service::ParserService;
use crate::domain::services::validation_service::ValidationService;
use crate::engines::detector::detected_framework;
use crate::engines::traits::FetchEngine;

/// 成功抓取记录的基准置信度
const BASE_CONFIDENCE: f64 = 0.85;

/// 提取流水线
///
/// 串联验证、抓取、解析、富化、品牌分析与持久化。
/// 验证、抓取、解析和记录校验失败会中止整条流水线；
/// 富化、品牌分析与持久化失败仅降级，不影响最终结果。
pub struct PipelineService {
    validator: ValidationService,
    static_engine: Arc<dyn FetchEngine>,
    dynamic_engine: Arc<dyn FetchEngine>,
    parser: ParserService,
    enrichment: Arc<dyn EnrichmentServiceTrait>,
    branding: Arc<dyn BrandingServiceTrait>,
    repository: Arc<dyn ProfileRepository>,
}

impl PipelineService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        validator: ValidationService,
        static_engine: Arc<dyn FetchEngine>,
        dynamic_engine: Arc<dyn FetchEngine>,
        enrichment: Arc<dyn EnrichmentServiceTrait>,
        branding: Arc<dyn BrandingServiceTrait>,
        repository: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            validator,
            static_engine,
            dynamic_engine,
            parser: ParserService::new(),
            enrichment,
            branding,
            repository,
        }
    }

    /// 对单个URL执行完整的提取流程
    pub async fn run(&self, raw_url: &str) -> PipelineResult {
        info!(url = %raw_url, "starting extraction pipeline");

        // 1. Validation
        let validation = self.validator.validate_target(raw_url).await;
        let normalized_url = match validation.normalized_url {
            Some(url) if validation.valid => url,
            _ => {
                let reason = validation
                    .reason
                    .unwrap_or_else(|| "validation failed".to_string());
                error!(url = %raw_url, reason = %reason, "validation failed");
                return PipelineResult::failed(reason);
            }
        };

        // 2. Initial fast static pass
        let static_page = match self.static_engine.fetch(&normalized_url).await {
            Ok(page) => page,
            Err(e) => {
                error!(url = %normalized_url, error = %e, "static crawl failed");
                return PipelineResult::failed(format!("Static crawl failed: {}", e));
            }
        };

        // 2.5 Promote to dynamic rendering if a JS framework is detected
        let framework = detected_framework(&static_page.html);
        let is_dynamic = framework.is_some();
        let (html, final_url) = if is_dynamic {
            warn!(
                url = %normalized_url,
                framework = framework.unwrap_or_default(),
                "JS framework detected, upgrading to dynamic rendering"
            );
            match self.dynamic_engine.fetch(&normalized_url).await {
                Ok(page) => (page.html, page.final_url),
                Err(e) => {
                    // Degrade to the static snapshot rather than failing outright
                    error!(url = %normalized_url, error = %e, "dynamic crawl failed, falling back to static HTML");
                    (static_page.html, static_page.final_url)
                }
            }
        } else {
            info!(url = %normalized_url, "static HTML detected, proceeding");
            (static_page.html, static_page.final_url)
        };

        // 3. Parse
        let parsed = self.parser.parse(&html, &final_url);

        // 3.5 Intelligent enrichment (degrades to empty insights)
        let insights = match self
            .enrichment
            .analyze(
                parsed.page_title.as_deref().unwrap_or_default(),
                parsed.meta_description.as_deref().unwrap_or_default(),
                &parsed.visible_text,
            )
            .await
        {
            Ok(insights) => insights,
            Err(e) => {
                warn!(url = %normalized_url, error = %e, "enrichment failed, continuing without insights");
                EnrichmentInsights::default()
            }
        };

        // 3.8 Branding intelligence, seeded with the parsed logo when present
        let brand = self
            .branding
            .analyze(&html, parsed.logo_url.as_deref())
            .await;

        // 4. Assemble the record
        let mut profile = ScrapedProfile::new(normalized_url.clone());
        profile.scraped_at = Utc::now();
        profile.crawl_status = "success".to_string();
        profile.confidence_score = BASE_CONFIDENCE;

        profile.business_profile.name = parsed.page_title.clone().or_else(|| parsed.h1.clone());
        profile.business_profile.industry = insights.industry;
        profile.business_profile.business_type = insights.business_type;
        profile.business_profile.about = insights.about.or_else(|| parsed.about_snippet.clone());
        profile.business_profile.services = insights.services.clone();
        profile.business_profile.keywords = insights.keywords;

        profile.contact.email = parsed.emails;
        profile.contact.phone = parsed.phones;
        profile.contact.social_links = parsed.social_links;

        profile.branding.logo_url = parsed.logo_url;
        profile.branding.favicon_url = parsed.favicon_url;
        profile.branding.primary_color = brand.primary_color;
        profile.branding.color_palette = brand.color_palette;
        profile.branding.fonts = brand.fonts;
        profile.branding.layout_style = brand.layout_style;

        profile.content_sections.homepage_heading = parsed.h1;
        profile.content_sections.about_raw = parsed.about_snippet;
        profile.content_sections.services_raw = insights.services;

        profile.technical_metadata.is_dynamic = is_dynamic;
        profile.technical_metadata.framework_detected = framework.map(String::from);
        profile.technical_metadata.page_title = parsed.page_title;
        profile.technical_metadata.meta_description = parsed.meta_description;
        profile.technical_metadata.canonical_url = parsed.canonical_url;

        // Schema validation gates persistence
        if let Err(e) = profile.validate() {
            error!(url = %normalized_url, error = %e, "record failed schema validation");
            return PipelineResult::failed(e.to_string());
        }

        // 5. Persist (failure does not invalidate the extracted record)
        if let Err(e) = self.repository.upsert(&normalized_url, &profile).await {
            warn!(url = %normalized_url, error = %e, "failed to persist record");
        } else {
            info!(url = %normalized_url, "extraction complete, record persisted");
        }

        PipelineResult::completed(profile)
    }
}

#[cfg(test)]
#[path = "pipeline_service_test.rs"]
mod tests;
