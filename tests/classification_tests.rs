use gymdesk::core::membership::classify::{bucket_expirations_on, classify_on, is_active_on};
use gymdesk::core::membership::validity::reconcile_latest_on;
use gymdesk::models::membership_status::MembershipStatus;

mod common;
use common::{membership, membership_ending, record, ymd};

#[test]
fn active_is_valid_date_or_stored_active() {
    let today = ymd(2024, 8, 10);

    let valid_expired_status = membership_ending(1, ymd(2024, 8, 20), Some(MembershipStatus::Expired));
    let stale_active = membership_ending(2, ymd(2024, 8, 1), Some(MembershipStatus::Active));
    let lapsed = membership_ending(3, ymd(2024, 8, 1), Some(MembershipStatus::Expired));

    assert!(is_active_on(Some(&valid_expired_status), today));
    assert!(is_active_on(Some(&stale_active), today));
    assert!(!is_active_on(Some(&lapsed), today));
    assert!(!is_active_on(None, today));
}

#[test]
fn reconciled_stale_client_lands_in_inactive() {
    let today = ymd(2024, 8, 10);
    let mut clients = vec![
        record(1, Some(membership_ending(1, ymd(2024, 8, 9), Some(MembershipStatus::Active)))),
        record(2, Some(membership_ending(2, ymd(2024, 8, 10), Some(MembershipStatus::Active)))),
        record(3, None),
    ];

    reconcile_latest_on(&mut clients, today);
    let c = classify_on(clients, today);

    let active: Vec<i64> = c.active.iter().map(|r| r.client.id).collect();
    let inactive: Vec<i64> = c.inactive.iter().map(|r| r.client.id).collect();
    assert_eq!(active, vec![2]);
    assert_eq!(inactive, vec![1, 3]);
}

#[test]
fn buckets_use_the_seven_day_window() {
    let today = ymd(2024, 8, 10);
    let records = vec![
        record(1, Some(membership_ending(1, ymd(2024, 8, 17), Some(MembershipStatus::Active)))),
        record(2, Some(membership_ending(2, ymd(2024, 8, 18), Some(MembershipStatus::Active)))),
        record(3, Some(membership_ending(3, ymd(2024, 8, 9), Some(MembershipStatus::Expired)))),
        record(4, None),
    ];

    let b = bucket_expirations_on(records, today);

    let soon: Vec<i64> = b.expiring_soon.iter().map(|e| e.client.id).collect();
    let expired: Vec<i64> = b.expired.iter().map(|e| e.client.id).collect();
    assert_eq!(soon, vec![1]);
    assert_eq!(expired, vec![3]);
}

#[test]
fn buckets_are_sorted_soonest_and_most_recent_first() {
    let today = ymd(2024, 8, 10);
    let records = vec![
        record(1, Some(membership_ending(1, ymd(2024, 8, 15), None))),
        record(2, Some(membership_ending(2, ymd(2024, 8, 10), None))),
        record(3, Some(membership_ending(3, ymd(2024, 8, 12), None))),
        record(4, Some(membership_ending(4, ymd(2024, 7, 1), None))),
        record(5, Some(membership_ending(5, ymd(2024, 8, 9), None))),
        record(6, Some(membership(6, "not-a-date", None))),
        record(7, Some(membership_ending(7, ymd(2024, 8, 5), None))),
    ];

    let b = bucket_expirations_on(records, today);

    let soon: Vec<Option<i64>> = b.expiring_soon.iter().map(|e| e.days_remaining).collect();
    assert_eq!(soon, vec![Some(0), Some(2), Some(5)]);

    let expired: Vec<i64> = b.expired.iter().map(|e| e.client.id).collect();
    assert_eq!(expired, vec![5, 7, 4, 6]);

    assert_eq!(b.critical_count(), 1);
    assert_eq!(b.warning_count(), 1);
}

#[test]
fn badges_describe_days() {
    let today = ymd(2024, 8, 10);
    let records = vec![
        record(1, Some(membership_ending(1, ymd(2024, 8, 10), None))),
        record(2, Some(membership_ending(2, ymd(2024, 8, 11), None))),
        record(3, Some(membership_ending(3, ymd(2024, 8, 14), None))),
        record(4, Some(membership_ending(4, ymd(2024, 8, 9), None))),
        record(5, Some(membership_ending(5, ymd(2024, 8, 1), None))),
    ];

    let b = bucket_expirations_on(records, today);
    let soon: Vec<String> = b.expiring_soon.iter().map(|e| e.badge()).collect();
    let expired: Vec<String> = b.expired.iter().map(|e| e.badge()).collect();

    assert_eq!(soon, vec!["expires today", "expires tomorrow", "expires in 4 days"]);
    assert_eq!(expired, vec!["expired yesterday", "expired 9 days ago"]);
}

#[test]
fn cancelled_memberships_are_left_out_of_buckets() {
    let today = ymd(2024, 8, 10);
    let records = vec![record(
        1,
        Some(membership_ending(1, ymd(2024, 8, 12), Some(MembershipStatus::Cancelled))),
    )];

    let b = bucket_expirations_on(records, today);
    assert!(b.expiring_soon.is_empty());
    assert!(b.expired.is_empty());
}

#[test]
fn wall_clock_bucketing_uses_today() {
    use gymdesk::core::membership::calendar::{add_days, today};
    use gymdesk::core::membership::classify::{bucket_expirations, classify};

    let t = today();
    let records = vec![
        record(1, Some(membership_ending(1, add_days(t, 7), Some(MembershipStatus::Active)))),
        record(2, Some(membership_ending(2, add_days(t, 8), Some(MembershipStatus::Active)))),
    ];

    let b = bucket_expirations(records.clone());
    assert_eq!(b.expiring_soon.len(), 1);
    assert!(b.expired.is_empty());

    assert_eq!(classify(records).active.len(), 2);
}
