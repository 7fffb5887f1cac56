use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Green,
    Yellow,
    Red,
}

impl AlertLevel {
    /// `red` at 7 days or fewer (including already expired), `yellow` up to
    /// 15 days, `green` beyond that.
    pub fn from_days(days_until_expiry: i64) -> Self {
        if days_until_expiry <= 7 {
            AlertLevel::Red
        } else if days_until_expiry <= 15 {
            AlertLevel::Yellow
        } else {
            AlertLevel::Green
        }
    }

    pub fn for_expiry(expiry_date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_days(days_until_expiry(expiry_date, now))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Green => "green",
            AlertLevel::Yellow => "yellow",
            AlertLevel::Red => "red",
        }
    }

    pub fn severity(&self) -> u8 {
        match self {
            AlertLevel::Green => 0,
            AlertLevel::Yellow => 1,
            AlertLevel::Red => 2,
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AlertLevel {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for AlertLevel {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "green" => Ok(AlertLevel::Green),
            "yellow" => Ok(AlertLevel::Yellow),
            "red" => Ok(AlertLevel::Red),
            other => Err(UnknownVariant::new("alert level", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Pending,
    Acknowledged,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::Acknowledged => "acknowledged",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for NotificationStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for NotificationStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(NotificationStatus::Pending),
            "acknowledged" => Ok(NotificationStatus::Acknowledged),
            other => Err(UnknownVariant::new("notification status", other)),
        }
    }
}

/// Whole days until expiry, rounded up. Negative once the date has passed.
pub fn days_until_expiry(expiry_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expiry_date - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExpiryAlert {
    pub alert_id: i32,
    pub stock_id: i32,
    pub product_id: i32,
    #[sqlx(try_from = "String")]
    pub alert_level: AlertLevel,
    pub expiry_date: DateTime<Utc>,
    pub alert_generated_on: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub notification_status: NotificationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewExpiryAlert {
    pub stock_id: i32,
    pub product_id: i32,
    pub alert_level: AlertLevel,
    pub expiry_date: DateTime<Utc>,
    pub alert_generated_on: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn jan_first() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn on(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn levels_for_reference_dates() {
        let now = jan_first();
        assert_eq!(AlertLevel::for_expiry(on(1, 5), now), AlertLevel::Red);
        assert_eq!(AlertLevel::for_expiry(on(1, 12), now), AlertLevel::Yellow);
        assert_eq!(AlertLevel::for_expiry(on(2, 1), now), AlertLevel::Green);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(AlertLevel::from_days(7), AlertLevel::Red);
        assert_eq!(AlertLevel::from_days(8), AlertLevel::Yellow);
        assert_eq!(AlertLevel::from_days(15), AlertLevel::Yellow);
        assert_eq!(AlertLevel::from_days(16), AlertLevel::Green);
    }

    #[test]
    fn expired_stock_is_red() {
        let now = jan_first();
        assert_eq!(days_until_expiry(now - Duration::days(3), now), -3);
        assert_eq!(AlertLevel::for_expiry(now - Duration::days(3), now), AlertLevel::Red);
    }

    #[test]
    fn partial_days_round_up() {
        let now = jan_first();
        assert_eq!(days_until_expiry(now + Duration::hours(1), now), 1);
        assert_eq!(days_until_expiry(now + Duration::days(7) + Duration::minutes(1), now), 8);
        assert_eq!(
            AlertLevel::for_expiry(now + Duration::days(7) + Duration::minutes(1), now),
            AlertLevel::Yellow
        );
    }

    #[test]
    fn parses_stored_text_values() {
        assert_eq!("red".parse::<AlertLevel>().unwrap(), AlertLevel::Red);
        assert_eq!(
            NotificationStatus::try_from("acknowledged".to_string()).unwrap(),
            NotificationStatus::Acknowledged
        );
        assert!("purple".parse::<AlertLevel>().is_err());
        assert!("done".parse::<NotificationStatus>().is_err());
    }

    #[test]
    fn severity_orders_red_first() {
        let mut levels = vec![AlertLevel::Green, AlertLevel::Red, AlertLevel::Yellow];
        levels.sort_by_key(|l| std::cmp::Reverse(l.severity()));
        assert_eq!(levels, vec![AlertLevel::Red, AlertLevel::Yellow, AlertLevel::Green]);
    }
}
