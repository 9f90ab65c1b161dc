//! Gram Bazaar - marketplace API for local artisans
//!
//! Connects local sellers with buyers: a product catalog, per-buyer cart
//! with checkout, order management, a job board, notifications, and
//! voice/chat assistance on top of a document store.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use api::AppState;
use config::AppConfig;
use domain::assist::{ChatProvider, SpeechProvider, TranscriptionProvider};
use domain::{Cart, JobPosting, Notification, Order, Product};
use infrastructure::assets::FsAssetStore;
use infrastructure::auth::JwtService;
use infrastructure::cart::CartService;
use infrastructure::catalog::CatalogService;
use infrastructure::chatbot::HostedChatbot;
use infrastructure::job::JobService;
use infrastructure::notification::NotificationService;
use infrastructure::order::OrderService;
use infrastructure::storage::{StorageFactory, collections};
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService, UserServiceTrait,
};
use infrastructure::voice::{HostedSpeechSynthesizer, HostedTranscriber};

/// Wire up every service against the configured backends
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let factory = StorageFactory::new(&config.storage).await?;

    let products = factory
        .open_searchable::<Product>(collections::PRODUCTS, &["name", "description"])
        .await?;
    let carts = factory.open::<Cart>(collections::CARTS).await?;
    let orders = factory.open::<Order>(collections::ORDERS).await?;
    let jobs = factory
        .open_searchable::<JobPosting>(collections::JOBS, &["title", "description"])
        .await?;
    let notifications = factory
        .open::<Notification>(collections::NOTIFICATIONS)
        .await?;

    let hasher = Arc::new(Argon2Hasher::new());
    let user_service: Arc<dyn UserServiceTrait> = match factory.pool() {
        Some(pool) => Arc::new(UserService::new(
            Arc::new(PostgresUserRepository::new(pool.clone()).await?),
            hasher,
        )),
        None => Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            hasher,
        )),
    };

    let assets = Arc::new(FsAssetStore::new(&config.assets));

    let transcriber: Option<Arc<dyn TranscriptionProvider>> = match &config.transcription {
        Some(cfg) => Some(Arc::new(HostedTranscriber::new(cfg.clone())?)),
        None => None,
    };
    let synthesizer: Option<Arc<dyn SpeechProvider>> = match &config.synthesis {
        Some(cfg) => Some(Arc::new(HostedSpeechSynthesizer::new(cfg.clone())?)),
        None => None,
    };
    let chatbot: Option<Arc<dyn ChatProvider>> = match &config.chatbot {
        Some(cfg) => Some(Arc::new(HostedChatbot::new(cfg.clone())?)),
        None => None,
    };

    Ok(AppState {
        user_service,
        catalog_service: Arc::new(CatalogService::new(products.clone(), assets.clone())),
        cart_service: Arc::new(CartService::new(
            carts,
            products,
            orders.clone(),
            notifications.clone(),
        )),
        order_service: Arc::new(OrderService::new(orders)),
        job_service: Arc::new(JobService::new(jobs)),
        notification_service: Arc::new(NotificationService::new(notifications)),
        jwt_service: Arc::new(JwtService::new(&config.jwt)),
        assets,
        transcriber,
        synthesizer,
        chatbot,
    })
}
