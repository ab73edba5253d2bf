use std::sync::Arc;

use crate::config::Config;
use crate::knowledge::KnowledgeBase;
use crate::repository::{ConnectionRepository, ProfileRepository};
use crate::skills::resolver::SkillResolver;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileRepository>,
    pub connections: Arc<dyn ConnectionRepository>,
    /// Read-only after startup; owns the learned-gap counter.
    pub resolver: Arc<SkillResolver>,
    pub knowledge: Arc<KnowledgeBase>,
    pub config: Config,
}
