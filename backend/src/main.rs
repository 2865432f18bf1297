//! Backend entry-point: loads settings, migrates storage, wires adapters and
//! serves the REST API.

use std::path::Path;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use econsult::domain::{
    KeywordSet, RecordStore, RecordStorePorts, SubmissionWorkflow, TextAnalyzer,
};
use econsult::inbound::http::health::HealthState;
use econsult::inbound::http::session_config::fingerprint::key_fingerprint;
use econsult::inbound::http::session_config::{BuildMode, session_settings};
use econsult::inbound::http::state::HttpState;
use econsult::outbound::inference::HttpModelLoader;
use econsult::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselUserRepository, PoolConfig, run_migrations,
};
use econsult::outbound::security::{Argon2CredentialHasher, RandomPasscodeGenerator};
use econsult::server::{ServerConfig, create_server};
use econsult::settings::AppSettings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let database_path = settings.database_path();
    run_migrations(database_path).map_err(std::io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(database_path))
        .await
        .map_err(std::io::Error::other)?;

    let store = Arc::new(RecordStore::new(RecordStorePorts {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        comments: Arc::new(DieselCommentRepository::new(pool)),
        hasher: Arc::new(Argon2CredentialHasher::new()),
        passcodes: Arc::new(RandomPasscodeGenerator),
        clock: Arc::new(DefaultClock),
    }));

    let keywords = load_keywords(settings.keywords_path.as_deref())?;
    let summary_max_chars = settings.summary_max_chars().map_err(std::io::Error::other)?;
    let analyzer = Arc::new(TextAnalyzer::new(keywords, summary_max_chars));
    if let Some(endpoint) = settings.model_endpoint().map_err(std::io::Error::other)? {
        let timeout = settings.model_timeout().map_err(std::io::Error::other)?;
        let loader = HttpModelLoader::new(endpoint, timeout).map_err(std::io::Error::other)?;
        if !analyzer.enable_heavy_models(&loader).await {
            warn!("heavy models unavailable; serving heuristic analysis only");
        }
    }

    let workflow = Arc::new(SubmissionWorkflow::new(analyzer, store.clone()));
    let http_state = HttpState::new(store, workflow);
    let health_state = web::Data::new(HealthState::new());

    info!(address = %bind_addr, "starting server");
    let server = create_server(health_state, http_state, ServerConfig::new(session, bind_addr))?;
    server.await
}

fn load_keywords(path: Option<&Path>) -> std::io::Result<KeywordSet> {
    let Some(path) = path else {
        return Ok(KeywordSet::default());
    };
    let document = std::fs::read_to_string(path)?;
    let keywords = KeywordSet::from_json(&document).map_err(std::io::Error::other)?;
    info!(
        path = %path.display(),
        negative = keywords.negative().len(),
        positive = keywords.positive().len(),
        "keyword lists loaded"
    );
    Ok(keywords)
}
