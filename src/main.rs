// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::Extension;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use extractrs::config::settings::Settings;
use extractrs::domain::repositories::profile_repository::ProfileRepository;
use extractrs::domain::services::branding_service::{BrandingService, BrandingServiceTrait};
use extractrs::domain::services::enrichment_service::{EnrichmentService, EnrichmentServiceTrait};
use extractrs::domain::services::pipeline_service::PipelineService;
use extractrs::domain::services::validation_service::ValidationService;
use extractrs::engines::browser_engine::BrowserEngine;
use extractrs::engines::reqwest_engine::ReqwestEngine;
use extractrs::engines::traits::FetchEngine;
use extractrs::infrastructure::database::connection;
use extractrs::infrastructure::repositories::profile_repo_impl::ProfileRepositoryImpl;
use extractrs::presentation::routes;
use extractrs::queue::task_queue::{MemoryTaskQueue, TaskQueue};
use extractrs::utils::robots::RobotsChecker;
use extractrs::utils::telemetry;
use extractrs::workers::manager::WorkerManager;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting extractrs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Connect to database
    let pool = connection::init_pool(&settings.database).await?;
    info!("Database connection established");

    // 4. Initialize components
    let repository: Arc<dyn ProfileRepository> = Arc::new(ProfileRepositoryImpl::new(pool));

    let robots = Arc::new(RobotsChecker::new(settings.crawler.robots_timeout()));
    let validator = ValidationService::new(robots, settings.crawler.user_agent.clone());

    let static_engine: Arc<dyn FetchEngine> =
        Arc::new(ReqwestEngine::new(settings.crawler.clone()));
    let dynamic_engine: Arc<dyn FetchEngine> =
        Arc::new(BrowserEngine::new(settings.crawler.clone()));

    let enrichment: Arc<dyn EnrichmentServiceTrait> =
        Arc::new(EnrichmentService::new(settings.enrichment.clone()));
    let branding: Arc<dyn BrandingServiceTrait> = Arc::new(BrandingService::new());

    let pipeline = Arc::new(PipelineService::new(
        validator,
        static_engine,
        dynamic_engine,
        enrichment,
        branding,
        repository.clone(),
    ));

    // 5. Start task queue and workers
    let queue: Arc<dyn TaskQueue> = Arc::new(MemoryTaskQueue::new(settings.workers.queue_capacity));
    let mut worker_manager = WorkerManager::new(queue.clone(), pipeline);
    worker_manager.start_workers(settings.workers.count);

    // 6. Start HTTP server
    let app = routes::routes()
        .layer(Extension(queue))
        .layer(Extension(repository))
        .layer(Extension(settings.clone()))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    worker_manager.shutdown();
    Ok(())
}
