//! Local forecasting over a product's sales history: period bucketing, a
//! simple moving average and single exponential smoothing.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, str::FromStr};
use utoipa::ToSchema;

pub const SMA_WINDOW: usize = 4;
pub const ES_ALPHA: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodType {
    Week,
    Month,
}

impl PeriodType {
    /// `{year}-W{week}` with week = ceil((dayOfYear0 + 1) / 7), or
    /// `{year}-{month}` with a 1-based, unpadded month.
    pub fn key(&self, date: DateTime<Utc>) -> String {
        match self {
            PeriodType::Week => {
                let week = date.ordinal0() / 7 + 1;
                format!("{}-W{}", date.year(), week)
            }
            PeriodType::Month => format!("{}-{}", date.year(), date.month()),
        }
    }
}

impl FromStr for PeriodType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "week" => Ok(PeriodType::Week),
            "month" => Ok(PeriodType::Month),
            other => Err(format!("periodType must be 'week' or 'month', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastMethod {
    MovingAverage,
    ExponentialSmoothing,
}

impl ForecastMethod {
    /// `SMA` or `ES`; anything else has no local forecast.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SMA" => Some(ForecastMethod::MovingAverage),
            "ES" => Some(ForecastMethod::ExponentialSmoothing),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    pub period: String,
    pub total_sales: i64,
    pub average_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictedSales {
    pub period: String,
    pub predicted_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SmoothedSales {
    pub period: String,
    pub smoothed_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ForecastPoint {
    Predicted(PredictedSales),
    Smoothed(SmoothedSales),
}

/// Groups `(sale_date, quantity_sold)` pairs into period buckets.
///
/// Buckets come back in the order their period was first seen, not sorted by
/// date.
pub fn aggregate_sales<I>(sales: I, period_type: PeriodType) -> Vec<PeriodBucket>
where
    I: IntoIterator<Item = (DateTime<Utc>, i32)>,
{
    let mut order: Vec<(String, i64, i64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (sale_date, quantity) in sales {
        let key = period_type.key(sale_date);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            order.push((key, 0, 0));
            order.len() - 1
        });
        let (_, total, count) = &mut order[slot];
        *total += i64::from(quantity);
        *count += 1;
    }

    order
        .into_iter()
        .map(|(period, total_sales, count)| PeriodBucket {
            period,
            total_sales,
            average_sales: total_sales as f64 / count as f64,
        })
        .collect()
}

/// For each bucket at index `i >= window`, the mean `averageSales` of the
/// `window` buckets before it.
pub fn simple_moving_average(buckets: &[PeriodBucket], window: usize) -> Vec<ForecastPoint> {
    if window == 0 {
        return Vec::new();
    }

    (window..buckets.len())
        .map(|i| {
            let sum: f64 = buckets[i - window..i].iter().map(|b| b.average_sales).sum();
            ForecastPoint::Predicted(PredictedSales {
                period: buckets[i].period.clone(),
                predicted_sales: sum / window as f64,
            })
        })
        .collect()
}

pub fn exponential_smoothing(buckets: &[PeriodBucket], alpha: f64) -> Vec<ForecastPoint> {
    let Some(first) = buckets.first() else {
        return Vec::new();
    };

    let mut smoothed = first.average_sales;
    buckets
        .iter()
        .map(|bucket| {
            smoothed = alpha * bucket.average_sales + (1.0 - alpha) * smoothed;
            ForecastPoint::Smoothed(SmoothedSales {
                period: bucket.period.clone(),
                smoothed_value: smoothed,
            })
        })
        .collect()
}

pub fn forecast(buckets: &[PeriodBucket], method: Option<ForecastMethod>) -> Vec<ForecastPoint> {
    match method {
        Some(ForecastMethod::MovingAverage) => simple_moving_average(buckets, SMA_WINDOW),
        Some(ForecastMethod::ExponentialSmoothing) => exponential_smoothing(buckets, ES_ALPHA),
        None => Vec::new(),
    }
}
