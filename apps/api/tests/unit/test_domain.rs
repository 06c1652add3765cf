use chrono::{TimeDelta, TimeZone, Utc};
use social_api::{
    application::analysis::scorer::{fallback_analysis, fallback_score},
    domain::{
        comment::entity::CommentStatus,
        metrics::{
            entity::MetricType,
            schedule::{CollectionRule, CollectionSchedule},
        },
        network::capability::{Capability, SocialPlatform},
        shared::pagination::PaginationRequest,
        triage::entity::SwipeAction,
    },
    infrastructure::networks::default_registry,
};

#[test]
fn short_comment_without_signals_scores_low() {
    assert_eq!(fallback_score("Nice", 0), 10);
}

#[test]
fn plain_comment_keeps_base_score() {
    assert_eq!(fallback_score("Lovely picture, great colours", 3), 30);
}

#[test]
fn popular_question_with_keyword_is_capped_at_100() {
    assert_eq!(fallback_score("How do I get help with this?", 25), 100);
}

#[test]
fn like_bonuses_are_cumulative() {
    let text = "Lovely picture, great colours";
    assert_eq!(fallback_score(text, 6), 45);
    assert_eq!(fallback_score(text, 21), 55);
}

#[test]
fn fallback_analysis_uses_neutral_labels() {
    let analysis = fallback_analysis("Any update?", 0);
    assert_eq!(analysis.category, "other");
    assert_eq!(analysis.sentiment, "neutral");
    assert_eq!(analysis.priority, "medium");
    assert_eq!(analysis.score, 55);
}

#[test]
fn swipes_map_to_comment_statuses() {
    assert_eq!(SwipeAction::SwipeRight.resulting_status(), CommentStatus::Reviewed);
    assert_eq!(SwipeAction::SwipeLeft.resulting_status(), CommentStatus::Ignored);
    assert_eq!(SwipeAction::SwipeUp.resulting_status(), CommentStatus::Archived);
}

#[test]
fn only_right_swipe_with_text_sends_a_reply() {
    assert!(SwipeAction::SwipeRight.sends_reply(Some("Thanks!")));
    assert!(!SwipeAction::SwipeRight.sends_reply(Some("")));
    assert!(!SwipeAction::SwipeRight.sends_reply(None));
    assert!(!SwipeAction::SwipeUp.sends_reply(Some("Thanks!")));
}

#[test]
fn pagination_has_more_until_last_page() {
    let page = PaginationRequest::new(Some(10), Some(0));
    assert!(page.has_more(11));
    assert!(!page.has_more(10));

    let last = PaginationRequest::new(Some(10), Some(10));
    assert!(!last.has_more(20));
}

#[test]
fn pagination_at_the_largest_offset_has_nothing_more() {
    let page = PaginationRequest::new(Some(50), Some(i64::MAX));
    assert!(!page.has_more(0));
    assert!(!page.has_more(i64::MAX));
}

#[test]
fn pagination_defaults_are_safe_and_stable() {
    let p = PaginationRequest::default();
    assert_eq!(p.limit, 50);
    assert_eq!(p.offset, 0);
}

#[test]
fn schedule_rejects_duplicate_thresholds() {
    let rules = vec![
        CollectionRule::new(0, 5, &[MetricType::Likes]),
        CollectionRule::new(0, 10, &[MetricType::Likes]),
    ];
    assert!(CollectionSchedule::new(rules).is_err());
}

#[test]
fn collection_frequency_shrinks_as_posts_age() {
    let registry = default_registry().unwrap();
    let schedule = registry
        .collection_schedule(SocialPlatform::LinkedIn)
        .unwrap();
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    let fresh = now - TimeDelta::minutes(30);
    let decision = schedule
        .should_collect(fresh, Some(now - TimeDelta::minutes(6)), now)
        .unwrap();
    assert!(decision.should_collect);
    assert_eq!(decision.metrics_to_collect.len(), 5);

    let old = now - TimeDelta::days(100);
    let decision = schedule
        .should_collect(old, Some(now - TimeDelta::hours(6)), now)
        .unwrap();
    assert!(!decision.should_collect);
    assert_eq!(decision.metrics_to_collect, vec![MetricType::Likes]);
    assert_eq!(
        decision.next_collection_at,
        Some(now - TimeDelta::hours(6) + TimeDelta::minutes(43200))
    );
}

#[test]
fn future_post_is_rejected() {
    let registry = default_registry().unwrap();
    let schedule = registry
        .collection_schedule(SocialPlatform::LinkedIn)
        .unwrap();
    let now = Utc::now();
    assert!(schedule
        .should_collect(now + TimeDelta::hours(1), None, now)
        .is_err());
}

#[test]
fn linkedin_is_the_only_statistics_network() {
    let registry = default_registry().unwrap();
    assert_eq!(
        registry.supporting(Capability::Statistics),
        vec![SocialPlatform::LinkedIn]
    );
    assert!(registry
        .collection_schedule(SocialPlatform::Tiktok)
        .is_err());
}
