//! Beeminder datapoints and request ids.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::daystamp::Daystamp;
use super::metric::MetricId;

/// A datapoint as Beeminder reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    #[serde(default)]
    pub id: Option<String>,
    pub value: f64,
    /// `YYYYMMDD`
    pub daystamp: String,
    /// Unix seconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub requestid: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Datapoint {
    /// Newest of `points`, ordered by daystamp then timestamp.
    ///
    /// The API's own ordering is not relied upon.
    pub fn latest(points: Vec<Self>) -> Option<Self> {
        points
            .into_iter()
            .max_by(|a, b| a.sort_key().cmp(&b.sort_key()))
    }

    fn sort_key(&self) -> (Option<Daystamp>, i64) {
        (
            Daystamp::parse_api(&self.daystamp),
            self.timestamp.unwrap_or(i64::MIN),
        )
    }
}

/// Idempotency key Beeminder uses to deduplicate retried posts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// `<metric>-<daystamp>-<disambiguator>`
    pub fn new(metric: MetricId, day: Daystamp, disambiguator: i64) -> Self {
        Self(format!("{}-{}-{}", metric.as_str(), day.api_form(), disambiguator))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a datapoint post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDatapoint {
    pub daystamp: String,
    pub value: f64,
    pub comment: String,
    pub requestid: RequestId,
}

impl NewDatapoint {
    pub fn new(day: Daystamp, value: f64, source: &str, request_id: RequestId) -> Self {
        Self {
            daystamp: day.api_form(),
            value,
            comment: format!("via {source} integration"),
            requestid: request_id,
        }
    }
}

/// `GET /users/{user}.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeeminderUser {
    pub username: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(value: f64, daystamp: &str, timestamp: Option<i64>) -> Datapoint {
        Datapoint {
            id: None,
            value,
            daystamp: daystamp.to_string(),
            timestamp,
            requestid: None,
            comment: None,
        }
    }

    #[test]
    fn test_latest_sorts_by_daystamp_then_timestamp() {
        let points = vec![
            point(1.0, "20261014", Some(300)),
            point(2.0, "20261015", Some(100)),
            point(3.0, "20261015", Some(200)),
            point(4.0, "20261013", Some(900)),
        ];
        assert_eq!(Datapoint::latest(points).unwrap().value, 3.0);
    }

    #[test]
    fn test_latest_of_empty_is_none() {
        assert!(Datapoint::latest(vec![]).is_none());
    }

    #[test]
    fn test_request_id_format() {
        let day = Daystamp::new(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
        let id = RequestId::new(MetricId::ReviewCount, day, 1_760_000_000_000);
        assert_eq!(id.as_str(), "reviewCount-20261015-1760000000000");
    }

    #[test]
    fn test_new_datapoint_comment() {
        let day = Daystamp::new(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
        let request_id = RequestId::new(MetricId::EditCount, day, 1);
        let body = NewDatapoint::new(day, 2.0, "RemNote", request_id);
        assert_eq!(body.comment, "via RemNote integration");
        assert_eq!(body.daystamp, "20261015");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["requestid"], "editCount-20261015-1");
    }
}
