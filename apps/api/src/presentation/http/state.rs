use crate::{
    application::{
        analysis::{scorer::CommentScorer, use_case::AnalyzeCommentsUseCase},
        comments::use_case::CommentsUseCase,
        metrics::use_case::MetricsUseCase,
        suggest_reply::use_case::SuggestReplyUseCase,
        triage::use_case::TriageUseCase,
    },
    config::Config,
    domain::network::registry::NetworkRegistry,
    infrastructure::{
        llm::traits::LanguageModel,
        repositories::{
            sqlx_comment_repository::SqlxCommentRepository,
            sqlx_metrics_repository::SqlxMetricsRepository,
            sqlx_triage_repository::SqlxTriageRepository,
        },
    },
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub llm_configured: bool,
    pub networks: Arc<NetworkRegistry>,
    pub comments: Arc<CommentsUseCase>,
    pub analysis: Arc<AnalyzeCommentsUseCase>,
    pub triage: Arc<TriageUseCase>,
    pub metrics: Arc<MetricsUseCase>,
    pub suggestions: Arc<SuggestReplyUseCase>,
}

impl AppState {
    /// Wires repositories and use cases over one pool and one language model.
    pub fn new(
        db: PgPool,
        config: Config,
        llm: Arc<dyn LanguageModel>,
        networks: NetworkRegistry,
    ) -> Self {
        let comment_repo = Arc::new(SqlxCommentRepository::new(db.clone()));
        let triage_repo = Arc::new(SqlxTriageRepository::new(db.clone()));
        let metrics_repo = Arc::new(SqlxMetricsRepository::new(db.clone()));
        let networks = Arc::new(networks);

        Self {
            llm_configured: config.openai_api_key.is_some(),
            comments: Arc::new(CommentsUseCase::new(comment_repo.clone())),
            analysis: Arc::new(AnalyzeCommentsUseCase::new(
                comment_repo.clone(),
                CommentScorer::new(llm.clone()),
            )),
            triage: Arc::new(TriageUseCase::new(triage_repo)),
            metrics: Arc::new(MetricsUseCase::new(metrics_repo, networks.clone())),
            suggestions: Arc::new(SuggestReplyUseCase::new(comment_repo, llm)),
            networks,
            db,
            config,
        }
    }
}
