//! Application state wiring all services together.
//!
//! Services are generic over repository traits; AppState pins them to the
//! SQLite implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use usergraph_core::service::event::EventService;
use usergraph_core::service::mentorship::MentorshipService;
use usergraph_core::service::premium::PremiumService;
use usergraph_core::service::recommendation::{
    RecommendationRequestService, RecommendationService,
};
use usergraph_core::service::skill::SkillService;
use usergraph_core::service::user::UserService;
use usergraph_infra::sqlite::event::SqliteEventRepository;
use usergraph_infra::sqlite::mentorship::SqliteMentorshipRequestRepository;
use usergraph_infra::sqlite::pool::{DatabasePool, default_database_url};
use usergraph_infra::sqlite::premium::SqlitePremiumRepository;
use usergraph_infra::sqlite::recommendation::{
    SqliteRecommendationRepository, SqliteRecommendationRequestRepository,
};
use usergraph_infra::sqlite::skill::SqliteSkillRepository;
use usergraph_infra::sqlite::skill_offer::SqliteSkillOfferRepository;
use usergraph_infra::sqlite::user::SqliteUserRepository;
use usergraph_types::config::GlobalConfig;

pub type ConcreteUserService = UserService<SqliteUserRepository>;

pub type ConcreteSkillService =
    SkillService<SqliteSkillRepository, SqliteSkillOfferRepository, SqliteUserRepository>;

pub type ConcreteMentorshipService =
    MentorshipService<SqliteMentorshipRequestRepository, SqliteUserRepository>;

pub type ConcreteRecommendationService = RecommendationService<
    SqliteRecommendationRepository,
    SqliteUserRepository,
    SqliteSkillRepository,
>;

pub type ConcreteRecommendationRequestService =
    RecommendationRequestService<SqliteRecommendationRequestRepository, SqliteUserRepository>;

pub type ConcreteEventService =
    EventService<SqliteEventRepository, SqliteUserRepository, SqliteSkillRepository>;

pub type ConcretePremiumService = PremiumService<SqlitePremiumRepository, SqliteUserRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<ConcreteUserService>,
    pub skill_service: Arc<ConcreteSkillService>,
    pub mentorship_service: Arc<ConcreteMentorshipService>,
    pub recommendation_service: Arc<ConcreteRecommendationService>,
    pub recommendation_request_service: Arc<ConcreteRecommendationRequestService>,
    pub event_service: Arc<ConcreteEventService>,
    pub premium_service: Arc<ConcretePremiumService>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Create the data directory, open the database and wire services.
    pub async fn init(data_dir: &Path, config: GlobalConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let db_url = default_database_url(data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;
        tracing::info!(data_dir = %data_dir.display(), "database ready");

        Ok(Self::from_pool(db_pool, config, data_dir.to_path_buf()))
    }

    pub fn from_pool(db_pool: DatabasePool, config: GlobalConfig, data_dir: PathBuf) -> Self {
        let users = || SqliteUserRepository::new(db_pool.clone());
        let skills = || SqliteSkillRepository::new(db_pool.clone());

        let user_service = UserService::new(users());
        let skill_service = SkillService::new(
            skills(),
            SqliteSkillOfferRepository::new(db_pool.clone()),
            users(),
        );
        let mentorship_service = MentorshipService::new(
            SqliteMentorshipRequestRepository::new(db_pool.clone()),
            users(),
        );
        let recommendation_service = RecommendationService::new(
            SqliteRecommendationRepository::new(db_pool.clone()),
            users(),
            skills(),
        );
        let recommendation_request_service = RecommendationRequestService::new(
            SqliteRecommendationRequestRepository::new(db_pool.clone()),
            users(),
        );
        let event_service =
            EventService::new(SqliteEventRepository::new(db_pool.clone()), users(), skills());
        let premium_service =
            PremiumService::new(SqlitePremiumRepository::new(db_pool.clone()), users());

        Self {
            user_service: Arc::new(user_service),
            skill_service: Arc::new(skill_service),
            mentorship_service: Arc::new(mentorship_service),
            recommendation_service: Arc::new(recommendation_service),
            recommendation_request_service: Arc::new(recommendation_request_service),
            event_service: Arc::new(event_service),
            premium_service: Arc::new(premium_service),
            config: Arc::new(config),
            data_dir,
            db_pool,
        }
    }
}
