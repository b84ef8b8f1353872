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

use page_analyzer::config::settings::Settings;
use page_analyzer::engines::reqwest_engine::ReqwestFetcher;
use page_analyzer::infrastructure::database::connection;
use page_analyzer::presentation::flash::FlashSigner;
use page_analyzer::presentation::routes;
use page_analyzer::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load .env before anything reads the environment
    let dotenv = dotenvy::dotenv();

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);

    // 3. Initialize logging
    telemetry::init_telemetry(settings.log.json);
    info!("Starting page-analyzer...");
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "Failed to load .env file");
        }
    }
    if settings.security.secret_key == "change-me" {
        warn!("SECRET_KEY is not set, flash cookies use the built-in default key");
    }

    // 4. Connect to database
    let db = connection::connect_with_retry(&settings.database).await?;
    let db = Arc::new(db);

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 5. Initialize components
    let fetcher = Arc::new(ReqwestFetcher::new(&settings.fetcher)?);
    let signer = Arc::new(FlashSigner::new(&settings.security.secret_key)?);

    // 6. Start HTTP server
    let app = routes::build_app(db.clone(), fetcher, signer);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, closing database connections");
    if let Some(db) = Arc::into_inner(db) {
        db.close().await?;
    }

    Ok(())
}

/// 等待 Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
