//! Observer registration for assessment updates.
//!
//! The assessor only returns results; hosts publish them here so displays
//! and alerting can subscribe without the assessor knowing about them.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::assessment::FlightAssessment;

/// Receives every published assessment.
pub trait AssessmentObserver: Send + Sync {
    fn on_assessment(&self, station: &str, assessment: &FlightAssessment);
}

impl<F> AssessmentObserver for F
where
    F: Fn(&str, &FlightAssessment) + Send + Sync,
{
    fn on_assessment(&self, station: &str, assessment: &FlightAssessment) {
        self(station, assessment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Fan-out of assessments to registered observers, in subscription order.
#[derive(Default)]
pub struct AssessmentFeed {
    next_id: AtomicU64,
    observers: RwLock<BTreeMap<SubscriptionId, Arc<dyn AssessmentObserver>>>,
}

impl AssessmentFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: impl AssessmentObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        if let Ok(mut observers) = self.observers.write() {
            observers.insert(id, Arc::new(observer));
        }
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers
            .write()
            .map(|mut observers| observers.remove(&id).is_some())
            .unwrap_or(false)
    }

    /// Deliver an assessment to every observer. Returns the number notified.
    pub fn publish(&self, station: &str, assessment: &FlightAssessment) -> usize {
        // Snapshot the list so observers may (un)subscribe from the callback.
        let observers: Vec<Arc<dyn AssessmentObserver>> = match self.observers.read() {
            Ok(observers) => observers.values().cloned().collect(),
            Err(_) => return 0,
        };
        for observer in &observers {
            observer.on_assessment(station, assessment);
        }
        observers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.read().map(|o| o.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::SafetyAssessor;
    use crate::models::WeatherSnapshot;
    use std::sync::Mutex;

    #[test]
    fn test_publish_reaches_subscribers_until_unsubscribed() {
        let feed = AssessmentFeed::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let id = feed.subscribe(move |station: &str, assessment: &FlightAssessment| {
            sink.lock().unwrap().push((station.to_string(), assessment.overall));
        });
        assert_eq!(feed.subscriber_count(), 1);

        let assessment = SafetyAssessor::default()
            .assess(&WeatherSnapshot::new(5.0, 10.0, 20.0).with_condition("Clear"));
        assert_eq!(feed.publish("KDFW", &assessment), 1);

        assert!(feed.unsubscribe(id));
        assert!(!feed.unsubscribe(id));
        assert_eq!(feed.publish("KDFW", &assessment), 0);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "KDFW");
    }
}
