use super::domain::{PassengerRecord, RiskAssessment, RiskLevel};
use super::engine::RiskEngine;
use serde::Serialize;
use tracing::info;

/// Default bucket count for the score histogram.
pub const DEFAULT_HISTOGRAM_BINS: usize = 12;

/// A passenger paired with its assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenedPassenger {
    pub record: PassengerRecord,
    pub assessment: RiskAssessment,
}

/// Scored batch in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreeningBatch {
    passengers: Vec<ScreenedPassenger>,
}

impl ScreeningBatch {
    /// Scores each record exactly once, preserving input order.
    pub fn assess(records: Vec<PassengerRecord>, engine: &RiskEngine) -> Self {
        let passengers: Vec<ScreenedPassenger> = records
            .into_iter()
            .map(|record| {
                let assessment = engine.assess(&record);
                ScreenedPassenger { record, assessment }
            })
            .collect();

        let batch = Self { passengers };
        let distribution = batch.tier_distribution();
        info!(
            passengers = batch.len(),
            low = distribution.low,
            medium = distribution.medium,
            high = distribution.high,
            "passenger batch scored"
        );
        batch
    }

    pub fn passengers(&self) -> &[ScreenedPassenger] {
        &self.passengers
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// HIGH-tier passengers, in their original relative order.
    pub fn high_risk(&self) -> Vec<&ScreenedPassenger> {
        self.passengers
            .iter()
            .filter(|passenger| passenger.assessment.level == RiskLevel::High)
            .collect()
    }

    /// First passenger with the given id.
    pub fn find(&self, passenger_id: &str) -> Option<&ScreenedPassenger> {
        self.passengers
            .iter()
            .find(|passenger| passenger.record.passenger_id == passenger_id)
    }

    pub fn tier_distribution(&self) -> TierDistribution {
        let mut distribution = TierDistribution::default();
        for passenger in &self.passengers {
            match passenger.assessment.level {
                RiskLevel::Low => distribution.low += 1,
                RiskLevel::Medium => distribution.medium += 1,
                RiskLevel::High => distribution.high += 1,
            }
        }
        distribution
    }

    /// Equal-width buckets spanning the observed score range; the last bucket is closed.
    pub fn score_histogram(&self, bins: usize) -> Vec<HistogramBin> {
        let scores: Vec<u32> = self
            .passengers
            .iter()
            .map(|passenger| passenger.assessment.score)
            .collect();

        let (Some(&min), Some(&max)) = (scores.iter().min(), scores.iter().max()) else {
            return Vec::new();
        };
        if bins == 0 {
            return Vec::new();
        }

        let (lower, upper) = if min == max {
            (f64::from(min) - 0.5, f64::from(max) + 0.5)
        } else {
            (f64::from(min), f64::from(max))
        };
        let width = (upper - lower) / bins as f64;

        let mut histogram: Vec<HistogramBin> = (0..bins)
            .map(|index| HistogramBin {
                lower: lower + width * index as f64,
                upper: lower + width * (index + 1) as f64,
                count: 0,
            })
            .collect();

        for score in scores {
            let offset = ((f64::from(score) - lower) / width).floor() as usize;
            let index = offset.min(bins - 1);
            histogram[index].count += 1;
        }

        histogram
    }
}

/// Passenger counts per risk tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl TierDistribution {
    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::screening::domain::{
        BaggageScanResult, BehaviorState, ChemicalTrace, TravelAnomalyLevel,
    };

    fn passenger(id: &str, high: bool) -> PassengerRecord {
        let (scan, chemical, flag) = if high {
            ("pistol", "potassium_nitrate", true)
        } else {
            ("clear", "none", false)
        };
        PassengerRecord {
            passenger_id: id.to_string(),
            passenger_name: format!("Passenger {id}"),
            flight_no: "LH400".to_string(),
            behavior_state: BehaviorState::from_token(if high { "nervous" } else { "calm" }),
            bag_tampering: flag,
            no_fly_match: flag,
            chemical_trace: ChemicalTrace::from_token(chemical),
            baggage_scan_result: BaggageScanResult::from_token(scan),
            travel_anomaly_level: TravelAnomalyLevel::from_token(if high { "high" } else { "low" }),
            travel_pattern_risk: "low".to_string(),
            duplicate_bag_tag: flag,
            unattended_baggage: flag,
            multiple_boarding_passes: flag,
            extra_weight_kg: 1.0,
        }
    }

    #[test]
    fn high_risk_subset_preserves_relative_order() {
        let records = vec![
            passenger("A", true),
            passenger("B", false),
            passenger("C", true),
            passenger("D", false),
        ];
        let batch = ScreeningBatch::assess(records, &RiskEngine::default());

        let ids: Vec<&str> = batch
            .passengers()
            .iter()
            .map(|p| p.record.passenger_id.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);

        let high: Vec<&str> = batch
            .high_risk()
            .iter()
            .map(|p| p.record.passenger_id.as_str())
            .collect();
        assert_eq!(high, vec!["A", "C"]);
        assert!(batch
            .passengers()
            .iter()
            .filter(|p| !high.contains(&p.record.passenger_id.as_str()))
            .all(|p| p.assessment.level != RiskLevel::High));
    }

    #[test]
    fn distribution_counts_each_tier() {
        let records = vec![passenger("A", true), passenger("B", false), passenger("C", false)];
        let batch = ScreeningBatch::assess(records, &RiskEngine::default());
        let distribution = batch.tier_distribution();
        assert_eq!(distribution.count(RiskLevel::High), 1);
        assert_eq!(distribution.count(RiskLevel::Low), 2);
        assert_eq!(distribution.count(RiskLevel::Medium), 0);
    }

    #[test]
    fn find_returns_first_matching_passenger() {
        let mut duplicate = passenger("A", false);
        duplicate.passenger_name = "Second".to_string();
        let batch = ScreeningBatch::assess(
            vec![passenger("A", true), duplicate],
            &RiskEngine::default(),
        );
        let found = batch.find("A").expect("passenger present");
        assert_eq!(found.record.passenger_name, "Passenger A");
        assert!(batch.find("Z").is_none());
    }

    #[test]
    fn histogram_covers_every_score() {
        let records = vec![passenger("A", true), passenger("B", false), passenger("C", false)];
        let batch = ScreeningBatch::assess(records, &RiskEngine::default());
        let histogram = batch.score_histogram(DEFAULT_HISTOGRAM_BINS);

        assert_eq!(histogram.len(), DEFAULT_HISTOGRAM_BINS);
        assert_eq!(histogram.iter().map(|bin| bin.count).sum::<usize>(), 3);
        assert_eq!(histogram[0].count, 2);
        assert_eq!(histogram[DEFAULT_HISTOGRAM_BINS - 1].count, 1);
    }

    #[test]
    fn histogram_of_uniform_scores_uses_unit_span() {
        let batch = ScreeningBatch::assess(
            vec![passenger("A", false), passenger("B", false)],
            &RiskEngine::default(),
        );
        let histogram = batch.score_histogram(4);
        assert_eq!(histogram.iter().map(|bin| bin.count).sum::<usize>(), 2);
        assert_eq!(histogram[0].lower, -0.5);
        assert_eq!(histogram[3].upper, 0.5);
    }

    #[test]
    fn empty_batch_has_no_histogram() {
        let batch = ScreeningBatch::assess(Vec::new(), &RiskEngine::default());
        assert!(batch.is_empty());
        assert!(batch.score_histogram(DEFAULT_HISTOGRAM_BINS).is_empty());
        assert!(batch.high_risk().is_empty());
    }
}
