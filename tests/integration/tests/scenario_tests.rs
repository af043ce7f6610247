//! End-to-end tests of the check-in, streak and badge flow
//!
//! Everything runs against the in-memory store; no external services needed.
//!
//! Run with: cargo test -p integration-tests --test scenario_tests

use community_common::AppConfig;
use community_core::{AttendanceRepository, Badge, BadgeRepository, StreakPolicy, MILESTONES};
use community_service::ServiceSettings;
use futures::future::join_all;
use integration_tests::{TestCommunity, WeeklySchedule};

// ============================================================================
// Example Scenario
// ============================================================================

#[tokio::test]
async fn test_three_latest_check_ins_earn_streak_badge() {
    let community = TestCommunity::seeded().await;
    let schedule = WeeklySchedule::started("meetup", 5, community.now);
    community.add_schedule(&schedule).await;
    let member = community.add_member().await;

    // Latest three attended, the two oldest missed
    community
        .record_check_ins(member, &schedule.external_ids()[..3])
        .await;

    let streak = community
        .streaks()
        .calculate_at(member, community.now)
        .await
        .unwrap();
    assert_eq!(streak, 3);

    let report = community
        .badges()
        .award_for_member(member, streak)
        .await
        .unwrap();
    assert_eq!(report.granted_names(), vec!["First Check-in", "3 Week Streak"]);
}

#[tokio::test]
async fn test_check_in_flow_end_to_end() {
    let community = TestCommunity::seeded().await;
    let schedule = WeeklySchedule::started("meetup", 5, community.now);
    community.add_schedule(&schedule).await;
    let member = community.add_member().await;

    // Attend from oldest to latest
    let mut streaks = Vec::new();
    for id in schedule.external_ids().into_iter().rev() {
        let outcome = community
            .check_ins()
            .check_in_at(member, id, community.now)
            .await
            .unwrap();
        assert!(outcome.newly_checked_in);
        streaks.push(outcome.streak);
    }

    // Each check-in fills the next gap only once the latest event is attended
    assert_eq!(streaks, vec![Some(0), Some(0), Some(0), Some(0), Some(5)]);
    assert_eq!(community.stored_streak(member).await, 5);
    assert_eq!(
        community.held_badge_names(member).await,
        vec!["3 Week Streak", "5 Check-ins", "5 Week Streak", "First Check-in"]
    );
}

// ============================================================================
// Streak Properties
// ============================================================================

#[tokio::test]
async fn test_missing_latest_event_breaks_streak() {
    for history in 1..=6 {
        let community = TestCommunity::empty();
        let schedule = WeeklySchedule::started("week", history + 1, community.now);
        community.add_schedule(&schedule).await;
        let member = community.add_member().await;

        // Everything except the latest event
        community
            .record_check_ins(member, &schedule.external_ids()[1..])
            .await;

        let streak = community
            .streaks()
            .calculate_at(member, community.now)
            .await
            .unwrap();
        assert_eq!(streak, 0, "history of {history} events before the gap");
    }
}

#[tokio::test]
async fn test_streak_equals_leading_run() {
    const EVENTS: usize = 6;

    for run in 0..=EVENTS {
        let community = TestCommunity::empty();
        let schedule = WeeklySchedule::started("week", EVENTS, community.now);
        community.add_schedule(&schedule).await;
        let member = community.add_member().await;

        let ids = schedule.external_ids();
        community.record_check_ins(member, &ids[..run]).await;
        // Older attendance after the gap never counts
        if run + 2 <= EVENTS {
            community.record_check_ins(member, &ids[run + 1..]).await;
        }

        let streak = community
            .streaks()
            .calculate_at(member, community.now)
            .await
            .unwrap();
        assert_eq!(streak as usize, run);
    }
}

#[tokio::test]
async fn test_canceled_events_follow_policy() {
    let now = chrono::Utc::now();
    let mut schedule = WeeklySchedule::started("week", 3, now);
    schedule.events[0].canceled = true;

    for (skip_canceled_events, expected) in [(false, 0), (true, 2)] {
        let community = TestCommunity::with_settings(ServiceSettings {
            streak_policy: StreakPolicy {
                skip_canceled_events,
            },
            ..ServiceSettings::default()
        });
        community.add_schedule(&schedule).await;
        let member = community.add_member().await;
        community
            .record_check_ins(member, &[schedule.id(1), schedule.id(2)])
            .await;

        let streak = community.streaks().calculate_at(member, now).await.unwrap();
        assert_eq!(streak, expected, "skip_canceled_events = {skip_canceled_events}");
    }
}

// ============================================================================
// Badge Properties
// ============================================================================

#[tokio::test]
async fn test_award_twice_grants_nothing_new() {
    let community = TestCommunity::seeded().await;
    let member = community.add_member().await;

    let first = community.badges().award_for_stats(member, 12, 4).await.unwrap();
    let held_once = community.held_badge_names(member).await;

    let second = community.badges().award_for_stats(member, 12, 4).await.unwrap();
    assert_eq!(first.granted.len(), 4);
    assert!(second.granted.is_empty());
    assert_eq!(community.held_badge_names(member).await, held_once);
}

#[tokio::test]
async fn test_eligibility_is_cumulative() {
    let community = TestCommunity::seeded().await;
    let member = community.add_member().await;

    let report = community.badges().award_for_stats(member, 10, 0).await.unwrap();
    assert_eq!(
        report.granted_names(),
        vec!["First Check-in", "5 Check-ins", "10 Check-ins"]
    );
}

#[tokio::test]
async fn test_missing_definition_does_not_block_others() {
    let community = TestCommunity::empty();
    for milestone in MILESTONES.iter().filter(|m| m.badge_name != "5 Check-ins") {
        community
            .store
            .create(&Badge::new(milestone.badge_name, milestone.icon, milestone.criteria()))
            .await
            .unwrap();
    }
    let member = community.add_member().await;

    let report = community.badges().award_for_stats(member, 10, 3).await.unwrap();
    assert_eq!(
        report.granted_names(),
        vec!["First Check-in", "10 Check-ins", "3 Week Streak"]
    );
    assert_eq!(report.missing_definitions, vec!["5 Check-ins".to_string()]);
}

#[tokio::test]
async fn test_concurrent_awards_grant_once() {
    let community = TestCommunity::seeded().await;
    let member = community.add_member().await;

    let badges = community.badges();
    let reports = join_all((0..8).map(|_| badges.award_for_stats(member, 5, 3))).await;

    let granted: usize = reports.into_iter().map(|r| r.unwrap().granted.len()).sum();
    assert_eq!(granted, 3);
    assert_eq!(community.store.grant_count(), 3);
}

// ============================================================================
// Attendance Properties
// ============================================================================

#[tokio::test]
async fn test_duplicate_check_in_changes_nothing() {
    let community = TestCommunity::seeded().await;
    let schedule = WeeklySchedule::started("week", 1, community.now);
    community.add_schedule(&schedule).await;
    let member = community.add_member().await;
    let event = schedule.id(0);

    community
        .check_ins()
        .check_in_at(member, event, community.now)
        .await
        .unwrap();
    let before = community.store.find(member, event).await.unwrap().unwrap();

    let later = community.now + chrono::Duration::minutes(5);
    let outcome = community
        .check_ins()
        .check_in_at(member, event, later)
        .await
        .unwrap();
    assert!(!outcome.newly_checked_in);

    let after = community.store.find(member, event).await.unwrap().unwrap();
    assert_eq!(after, before);
    assert_eq!(community.store.attendance_count(), 1);
    assert_eq!(
        community.store.checked_in_count_by_member(member).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_racing_check_ins_record_once() {
    let community = TestCommunity::seeded().await;
    let schedule = WeeklySchedule::started("week", 1, community.now);
    community.add_schedule(&schedule).await;
    let member = community.add_member().await;

    let check_ins = community.check_ins();
    let outcomes = join_all(
        (0..8).map(|_| check_ins.check_in_at(member, schedule.id(0), community.now)),
    )
    .await;

    let newly: usize = outcomes
        .into_iter()
        .map(|o| usize::from(o.unwrap().newly_checked_in))
        .sum();
    assert_eq!(newly, 1);
    assert_eq!(community.store.attendance_count(), 1);
    assert_eq!(
        community.held_badge_names(member).await,
        vec!["First Check-in"]
    );
}

// ============================================================================
// Batch Maintenance
// ============================================================================

#[tokio::test]
async fn test_batch_backfill_with_configured_settings() {
    let config = AppConfig::from_lookup(|name| match name {
        "DATABASE_URL" => Some("postgres://unused".to_string()),
        "BATCH_CONCURRENCY" => Some("2".to_string()),
        _ => None,
    })
    .unwrap();
    let community = TestCommunity::with_settings(ServiceSettings::from(&config));
    community.badges().ensure_milestone_badges().await.unwrap();
    assert_eq!(community.ctx.batch_concurrency(), 2);

    let schedule = WeeklySchedule::started("week", 5, community.now);
    community.add_schedule(&schedule).await;
    let ids = schedule.external_ids();

    let mut members = Vec::new();
    for run in [0, 1, 3, 5] {
        let member = community.add_member().await;
        community.record_check_ins(member, &ids[..run]).await;
        members.push((member, run));
    }

    let streaks = community.streaks().recompute_all().await.unwrap();
    assert_eq!(streaks.processed, 4);
    assert!(streaks.is_clean());

    let awards = community.badges().award_all().await.unwrap();
    assert_eq!(awards.succeeded, 4);

    for (member, run) in members {
        assert_eq!(community.stored_streak(member).await as usize, run);
    }
    // 0, 1, 2 and 4 badges respectively
    assert_eq!(community.store.grant_count(), 7);
}
