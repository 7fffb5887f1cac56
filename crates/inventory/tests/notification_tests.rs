mod common;

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::services;
use inventory::{
    abstract_trait::notification::NotificationServiceTrait,
    domain::requests::notification::NotificationQuery,
    model::expiry_alert::{AlertLevel, NotificationStatus},
};
use shared::errors::ServiceError;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

#[tokio::test]
async fn scan_creates_one_alert_per_dated_stock_row() {
    let svc = services();
    let milk = svc.store.seed_product("Milk", "Dairy");
    let rice = svc.store.seed_product("Rice", "Grains");
    let salt = svc.store.seed_product("Salt", "Spices");

    svc.store
        .seed_stock(milk.product_id, 10, 1.5, Some(now() + Duration::days(3)));
    svc.store
        .seed_stock(rice.product_id, 10, 2.0, Some(now() + Duration::days(12)));
    svc.store.seed_stock(salt.product_id, 10, 0.5, None);

    let result = svc.notification.scan_at(now()).await.unwrap();

    assert_eq!(result.message, "Expiry alerts generated successfully");
    assert_eq!(result.new_alerts_count, 2);
    assert_eq!(result.data.len(), 2);

    let levels: Vec<AlertLevel> = result.new_alerts.iter().map(|a| a.alert_level).collect();
    assert_eq!(levels, vec![AlertLevel::Red, AlertLevel::Yellow]);
    assert!(
        result
            .new_alerts
            .iter()
            .all(|a| a.notification_status == NotificationStatus::Pending)
    );
}

#[tokio::test]
async fn rescanning_does_not_duplicate_alerts() {
    let svc = services();
    let milk = svc.store.seed_product("Milk", "Dairy");
    svc.store
        .seed_stock(milk.product_id, 10, 1.5, Some(now() + Duration::days(30)));

    let first = svc.notification.scan_at(now()).await.unwrap();
    let second = svc.notification.scan_at(now()).await.unwrap();

    assert_eq!(first.new_alerts_count, 1);
    assert_eq!(second.new_alerts_count, 0);
    assert_eq!(second.data.len(), 1);
    assert_eq!(second.data[0].alert_id, first.data[0].alert_id);
    assert_eq!(svc.store.alerts().len(), 1);
}

#[tokio::test]
async fn level_change_updates_the_existing_alert() {
    let svc = services();
    let milk = svc.store.seed_product("Milk", "Dairy");
    svc.store
        .seed_stock(milk.product_id, 10, 1.5, Some(now() + Duration::days(10)));

    let first = svc.notification.scan_at(now()).await.unwrap();
    assert_eq!(first.data[0].alert_level, AlertLevel::Yellow);

    let later = svc
        .notification
        .scan_at(now() + Duration::days(5))
        .await
        .unwrap();

    assert_eq!(later.new_alerts_count, 0);
    assert_eq!(later.data[0].alert_id, first.data[0].alert_id);
    assert_eq!(later.data[0].alert_level, AlertLevel::Red);
    assert_eq!(later.data[0].alert_generated_on, now());

    let stored = svc.store.alerts();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].alert_level, AlertLevel::Red);
}

#[tokio::test]
async fn moved_expiry_is_written_even_when_the_level_holds() {
    let svc = services();
    let milk = svc.store.seed_product("Milk", "Dairy");
    let stock = svc
        .store
        .seed_stock(milk.product_id, 10, 1.5, Some(now() + Duration::days(20)));

    let first = svc.notification.scan_at(now()).await.unwrap();
    assert_eq!(first.data[0].alert_level, AlertLevel::Green);

    let restocked = now() + Duration::days(40);
    svc.store.set_expiry(stock.stock_id, restocked);
    let rescan = svc.notification.scan_at(now()).await.unwrap();

    assert_eq!(rescan.new_alerts_count, 0);
    assert_eq!(rescan.data[0].alert_id, first.data[0].alert_id);
    assert_eq!(rescan.data[0].alert_level, AlertLevel::Green);
    assert_eq!(rescan.data[0].expiry_date, restocked);
    assert_eq!(rescan.data[0].alert_generated_on, now());
    assert_eq!(svc.store.alerts()[0].expiry_date, restocked);
}

#[tokio::test]
async fn acknowledged_alert_keeps_its_status_across_scans() {
    let svc = services();
    let milk = svc.store.seed_product("Milk", "Dairy");
    let stock = svc
        .store
        .seed_stock(milk.product_id, 10, 1.5, Some(now() + Duration::days(10)));

    let first = svc.notification.scan_at(now()).await.unwrap();
    svc.notification
        .acknowledge(first.data[0].alert_id)
        .await
        .unwrap();

    svc.store.set_expiry(stock.stock_id, now() + Duration::days(2));
    let rescan = svc.notification.scan_at(now()).await.unwrap();

    assert_eq!(rescan.new_alerts_count, 0);
    assert_eq!(rescan.data[0].alert_level, AlertLevel::Red);
    assert_eq!(
        rescan.data[0].notification_status,
        NotificationStatus::Acknowledged
    );
}

#[tokio::test]
async fn priority_alerts_cap_at_six_reds() {
    let svc = services();
    let milk = svc.store.seed_product("Milk", "Dairy");

    for day in 0..8 {
        svc.store.seed_alert(
            100 + day,
            milk.product_id,
            AlertLevel::Red,
            now() + Duration::hours(i64::from(day)),
        );
    }
    svc.store
        .seed_alert(200, milk.product_id, AlertLevel::Yellow, now());
    svc.store
        .seed_alert(201, milk.product_id, AlertLevel::Green, now());

    let priority = svc.notification.priority_alerts().await.unwrap();

    assert_eq!(priority.data.len(), 6);
    assert_eq!(priority.urgent_count, 6);
    assert!(
        priority
            .data
            .iter()
            .all(|a| a.alert.alert_level == AlertLevel::Red)
    );
    // newest reds first
    assert_eq!(priority.data[0].alert.stock_id, 107);
}

#[tokio::test]
async fn priority_alerts_fill_with_yellow_then_green() {
    let svc = services();
    let milk = svc.store.seed_product("Milk", "Dairy");

    svc.store.seed_alert(1, milk.product_id, AlertLevel::Red, now());
    svc.store.seed_alert(2, milk.product_id, AlertLevel::Red, now());
    for stock_id in 10..13 {
        svc.store
            .seed_alert(stock_id, milk.product_id, AlertLevel::Green, now());
    }
    for stock_id in 20..23 {
        svc.store
            .seed_alert(stock_id, milk.product_id, AlertLevel::Yellow, now());
    }

    let priority = svc.notification.priority_alerts().await.unwrap();
    let levels: Vec<AlertLevel> = priority
        .data
        .iter()
        .map(|a| a.alert.alert_level)
        .collect();

    assert_eq!(priority.urgent_count, 2);
    assert_eq!(
        levels,
        vec![
            AlertLevel::Red,
            AlertLevel::Red,
            AlertLevel::Yellow,
            AlertLevel::Yellow,
            AlertLevel::Yellow,
            AlertLevel::Green,
        ]
    );
    assert!(priority.data.iter().all(|a| a.product.is_some()));
}

#[tokio::test]
async fn priority_alerts_skip_acknowledged() {
    let svc = services();
    let milk = svc.store.seed_product("Milk", "Dairy");
    let red = svc.store.seed_alert(1, milk.product_id, AlertLevel::Red, now());
    svc.store
        .seed_alert(2, milk.product_id, AlertLevel::Yellow, now());

    svc.notification.acknowledge(red.alert_id).await.unwrap();

    let priority = svc.notification.priority_alerts().await.unwrap();
    assert_eq!(priority.urgent_count, 0);
    assert_eq!(priority.data.len(), 1);
    assert_eq!(priority.data[0].alert.alert_level, AlertLevel::Yellow);
}

#[tokio::test]
async fn list_filters_by_level_and_status() {
    let svc = services();
    let milk = svc.store.seed_product("Milk", "Dairy");
    let red = svc.store.seed_alert(1, milk.product_id, AlertLevel::Red, now());
    svc.store
        .seed_alert(2, milk.product_id, AlertLevel::Green, now());
    svc.notification.acknowledge(red.alert_id).await.unwrap();

    let reds = svc
        .notification
        .list_notifications(&NotificationQuery {
            alert_level: Some("red".into()),
            notification_status: None,
        })
        .await
        .unwrap();
    assert_eq!(reds.data.len(), 1);
    assert_eq!(reds.data[0].alert.alert_id, red.alert_id);

    let pending = svc
        .notification
        .list_notifications(&NotificationQuery {
            alert_level: None,
            notification_status: Some("pending".into()),
        })
        .await
        .unwrap();
    assert_eq!(pending.data.len(), 1);
    assert_eq!(pending.data[0].alert.alert_level, AlertLevel::Green);

    let everything = svc
        .notification
        .list_notifications(&NotificationQuery::default())
        .await
        .unwrap();
    assert_eq!(everything.data.len(), 2);
}

#[tokio::test]
async fn unknown_filter_value_is_rejected() {
    let svc = services();

    let err = svc
        .notification
        .list_notifications(&NotificationQuery {
            alert_level: Some("purple".into()),
            notification_status: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn alerts_for_a_deleted_product_carry_no_product() {
    let svc = services();
    svc.store.seed_alert(1, 999, AlertLevel::Red, now());

    let listed = svc.notification.list_by_product(999).await.unwrap();

    assert_eq!(listed.data.len(), 1);
    assert!(listed.data[0].product.is_none());
}

#[tokio::test]
async fn acknowledge_is_idempotent() {
    let svc = services();
    let alert = svc.store.seed_alert(1, 1, AlertLevel::Yellow, now());

    let first = svc.notification.acknowledge(alert.alert_id).await.unwrap();
    let second = svc.notification.acknowledge(alert.alert_id).await.unwrap();

    assert_eq!(first.message, "Notification acknowledged successfully");
    assert_eq!(
        second.data.notification_status,
        NotificationStatus::Acknowledged
    );
}

#[tokio::test]
async fn acknowledge_unknown_alert_is_not_found() {
    let svc = services();

    let err = svc.notification.acknowledge(42).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Notification not found"));
}

#[tokio::test]
async fn delete_removes_the_alert_once() {
    let svc = services();
    let alert = svc.store.seed_alert(1, 1, AlertLevel::Green, now());

    let deleted = svc.notification.delete(alert.alert_id).await.unwrap();
    assert_eq!(deleted.message, "Notification deleted successfully");
    assert!(svc.store.alerts().is_empty());

    let again = svc.notification.delete(alert.alert_id).await.unwrap_err();
    assert!(matches!(again, ServiceError::NotFound(_)));
}
