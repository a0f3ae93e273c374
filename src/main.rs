use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use patron_sync::adapters::feed::{HttpFeedService, InMemoryFeedService};
use patron_sync::adapters::http::{app_router, AppState, RouterSettings};
use patron_sync::adapters::memory::{InMemoryEntitlementStore, InMemoryPledgeRoster};
use patron_sync::adapters::patreon::{PatreonOAuthClient, PatreonOAuthConfig};
use patron_sync::adapters::postgres::{
    self, PostgresEntitlementStore, PostgresPledgeStore,
};
use patron_sync::application::{
    AuthorizationEndpoint, CreateFeedHandler, FeatureLevelResolver, OAuthLoginFlow,
    WebhookEventProcessor,
};
use patron_sync::config::AppConfig;
use patron_sync::domain::foundation::DomainError;
use patron_sync::domain::patronage::WebhookSignatureVerifier;
use patron_sync::ports::{EntitlementStore, FeedService, PatronRoster, PledgeBookkeeper};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Pledge roster, bookkeeping hook, and entitlement store.
struct Storage {
    roster: Arc<dyn PatronRoster>,
    bookkeeper: Arc<dyn PledgeBookkeeper>,
    entitlements: Arc<dyn EntitlementStore>,
}

async fn build_storage(config: &AppConfig) -> Result<Storage, DomainError> {
    let Some(database) = &config.database else {
        tracing::warn!("No database configured, pledges are kept in memory");
        let roster = Arc::new(InMemoryPledgeRoster::new());
        return Ok(Storage {
            roster: roster.clone(),
            bookkeeper: roster,
            entitlements: Arc::new(InMemoryEntitlementStore::new()),
        });
    };

    let pool = postgres::connect(database).await?;
    if database.run_migrations {
        postgres::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let pledges = Arc::new(PostgresPledgeStore::new(pool.clone()));
    Ok(Storage {
        roster: pledges.clone(),
        bookkeeper: pledges,
        entitlements: Arc::new(PostgresEntitlementStore::new(pool)),
    })
}

fn build_feed_service(config: &AppConfig) -> Result<Arc<dyn FeedService>, DomainError> {
    match &config.feed.base_url {
        Some(base_url) => Ok(Arc::new(HttpFeedService::new(
            base_url.clone(),
            config.feed.timeout(),
        )?)),
        None => {
            tracing::warn!("No feed service configured, using in-process stand-in");
            Ok(Arc::new(InMemoryFeedService::new()))
        }
    }
}

async fn build_state(config: &AppConfig) -> Result<AppState, BoxError> {
    let storage = build_storage(config).await?;

    let mut resolver = FeatureLevelResolver::new(storage.roster, config.tiers.table()?);
    if let Some(creator) = config.tiers.creator() {
        resolver = resolver.with_creator(creator);
    }
    let resolver = Arc::new(resolver);

    let oauth = &config.oauth;
    let provider = PatreonOAuthClient::new(PatreonOAuthConfig {
        client_id: oauth.client_id.clone(),
        client_secret: oauth.client_secret.clone(),
        redirect_url: oauth.redirect_url.clone(),
        token_url: oauth.token_url.clone(),
        identity_url: oauth.identity_url.clone(),
        timeout: oauth.provider_timeout(),
    })?;
    let endpoint = AuthorizationEndpoint {
        authorize_url: oauth.authorize_url.clone(),
        client_id: oauth.client_id.clone(),
        redirect_url: oauth.redirect_url.clone(),
        scopes: oauth.scopes.clone(),
    };

    let login_flow = OAuthLoginFlow::new(Arc::new(provider), resolver.clone(), endpoint);
    let webhook_processor = WebhookEventProcessor::new(
        WebhookSignatureVerifier::new(config.webhook.secret.clone()),
        resolver.clone(),
        storage.bookkeeper,
        storage.entitlements,
    );
    let create_feed = CreateFeedHandler::new(resolver.clone(), build_feed_service(config)?);

    Ok(AppState {
        login_flow: Arc::new(login_flow),
        resolver,
        webhook_processor: Arc::new(webhook_processor),
        create_feed: Arc::new(create_feed),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server");
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        tiers = config.tiers.table()?.thresholds().len(),
        "Starting patron-sync"
    );

    let state = build_state(&config).await?;
    let app = app_router(state, RouterSettings::from_config(&config));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
