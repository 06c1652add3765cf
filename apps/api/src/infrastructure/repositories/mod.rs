pub mod sqlx_comment_repository;
pub mod sqlx_metrics_repository;
pub mod sqlx_triage_repository;
