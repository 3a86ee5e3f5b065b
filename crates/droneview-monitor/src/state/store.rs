//! In-memory state store using DashMap.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;

use droneview_core::{
    AssessmentFeed, CoreError, FlightAssessment, HazardVerdict, Limits, SafetyAssessor,
    UnknownConditionPolicy, WeatherReport,
};

/// Latest report and assessment for one station.
#[derive(Debug, Clone, Serialize)]
pub struct StationStatus {
    pub station_id: String,
    pub report: WeatherReport,
    pub assessment: FlightAssessment,
    pub assessed_at: DateTime<Utc>,
}

/// Broadcast whenever a station is (re)assessed.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentEvent {
    pub station_id: String,
    /// Overall verdict before this assessment, if the station was known
    pub previous: Option<HazardVerdict>,
    pub assessment: FlightAssessment,
    pub observed_at: Option<DateTime<Utc>>,
    pub assessed_at: DateTime<Utc>,
}

impl AssessmentEvent {
    pub fn verdict_changed(&self) -> bool {
        self.previous != Some(self.assessment.overall)
    }
}

/// Application state - assessor, latest station results and the event feed.
pub struct AppState {
    assessor: RwLock<SafetyAssessor>,
    stations: DashMap<String, StationStatus>,
    tx: broadcast::Sender<AssessmentEvent>,
    feed: AssessmentFeed,
}

impl AppState {
    pub fn new(assessor: SafetyAssessor, feed_capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(feed_capacity.max(1));
        Self {
            assessor: RwLock::new(assessor),
            stations: DashMap::new(),
            tx,
            feed: AssessmentFeed::new(),
        }
    }

    /// Receive every assessment event from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<AssessmentEvent> {
        self.tx.subscribe()
    }

    /// In-process observers, called synchronously on each assessment.
    pub fn feed(&self) -> &AssessmentFeed {
        &self.feed
    }

    pub fn limits(&self) -> Limits {
        *self
            .assessor
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .limits()
    }

    pub fn unknown_condition_policy(&self) -> UnknownConditionPolicy {
        self.assessor
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .unknown_condition_policy()
    }

    /// Replace the limits and re-assess every known station against them.
    pub fn set_limits(&self, limits: Limits) -> Result<(), CoreError> {
        limits.validate()?;
        self.assessor
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_limits(limits);
        tracing::info!(
            "Flight limits updated, re-assessing {} station(s)",
            self.stations.len()
        );
        self.reassess_all();
        Ok(())
    }

    /// Change how blank sky conditions are scored and re-assess every known station.
    pub fn set_unknown_condition_policy(&self, policy: UnknownConditionPolicy) {
        self.assessor
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_unknown_condition_policy(policy);
        tracing::info!(?policy, "Unknown-condition policy updated");
        self.reassess_all();
    }

    /// Assess a report, store it as the station's latest and publish the result.
    pub fn ingest(&self, report: WeatherReport) -> FlightAssessment {
        let assessment = self.current_assessor().assess(&report.snapshot());

        let station_id = report.station_id.clone();
        let assessed_at = Utc::now();
        let observed_at = report.observed_at;

        let previous = self
            .stations
            .insert(
                station_id.clone(),
                StationStatus {
                    station_id: station_id.clone(),
                    report,
                    assessment: assessment.clone(),
                    assessed_at,
                },
            )
            .map(|old| old.assessment.overall);

        self.publish(AssessmentEvent {
            station_id,
            previous,
            assessment: assessment.clone(),
            observed_at,
            assessed_at,
        });

        assessment
    }

    /// Re-assess each stored report where it sits. A report ingested while
    /// this runs is never replaced by an older one.
    fn reassess_all(&self) {
        let assessor = self.current_assessor();
        let station_ids: Vec<String> = self
            .stations
            .iter()
            .map(|entry| entry.key().clone())
            .collect();

        for station_id in station_ids {
            let Some(mut entry) = self.stations.get_mut(&station_id) else {
                continue;
            };
            let status = entry.value_mut();
            let previous = status.assessment.overall;
            status.assessment = assessor.assess(&status.report.snapshot());
            status.assessed_at = Utc::now();
            let event = AssessmentEvent {
                station_id: status.station_id.clone(),
                previous: Some(previous),
                assessment: status.assessment.clone(),
                observed_at: status.report.observed_at,
                assessed_at: status.assessed_at,
            };
            // Observers may ingest from the callback; the shard lock must be free.
            drop(entry);
            self.publish(event);
        }
    }

    fn current_assessor(&self) -> SafetyAssessor {
        self.assessor
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, event: AssessmentEvent) {
        self.feed.publish(&event.station_id, &event.assessment);
        // No receivers is fine; nobody is listening yet.
        let _ = self.tx.send(event);
    }

    pub fn get_station(&self, station_id: &str) -> Option<StationStatus> {
        self.stations
            .get(&station_id.trim().to_ascii_uppercase())
            .map(|entry| entry.value().clone())
    }

    pub fn get_all_stations(&self) -> Vec<StationStatus> {
        let mut stations: Vec<StationStatus> =
            self.stations.iter().map(|r| r.value().clone()).collect();
        stations.sort_by(|a, b| a.station_id.cmp(&b.station_id));
        stations
    }

    /// Stations whose latest overall verdict is at least `threshold`.
    pub fn stations_at_or_above(&self, threshold: HazardVerdict) -> Vec<String> {
        self.get_all_stations()
            .into_iter()
            .filter(|status| status.assessment.overall >= threshold)
            .map(|status| status.station_id)
            .collect()
    }
}
