//! Shared application state

use std::sync::Arc;

use crate::domain::assist::{ChatProvider, SpeechProvider, TranscriptionProvider};
use crate::infrastructure::assets::AssetStore;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::cart::CartServiceTrait;
use crate::infrastructure::catalog::CatalogServiceTrait;
use crate::infrastructure::job::JobServiceTrait;
use crate::infrastructure::notification::NotificationServiceTrait;
use crate::infrastructure::order::OrderServiceTrait;
use crate::infrastructure::user::UserServiceTrait;

/// Services shared by every request handler
///
/// The voice and chat adapters are optional: they need upstream API keys,
/// and the rest of the marketplace works without them.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub catalog_service: Arc<dyn CatalogServiceTrait>,
    pub cart_service: Arc<dyn CartServiceTrait>,
    pub order_service: Arc<dyn OrderServiceTrait>,
    pub job_service: Arc<dyn JobServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub assets: Arc<dyn AssetStore>,
    pub transcriber: Option<Arc<dyn TranscriptionProvider>>,
    pub synthesizer: Option<Arc<dyn SpeechProvider>>,
    pub chatbot: Option<Arc<dyn ChatProvider>>,
}
