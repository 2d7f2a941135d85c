use serde::{Deserialize, Serialize};
use std::fmt;

/// Observed passenger demeanour as recorded by screening staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorState {
    Nervous,
    Aggressive,
    Other(String),
}

impl BehaviorState {
    pub fn from_token(token: &str) -> Self {
        match token {
            "nervous" => Self::Nervous,
            "aggressive" => Self::Aggressive,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_suspicious(&self) -> bool {
        matches!(self, Self::Nervous | Self::Aggressive)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Nervous => "nervous",
            Self::Aggressive => "aggressive",
            Self::Other(value) => value,
        }
    }
}

/// How seriously a detected item or trace is treated by the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatSeverity {
    Dangerous,
    Suspicious,
}

/// Item reported by the baggage scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaggageScanResult {
    Knife,
    Pistol,
    Lighter,
    Scissors,
    Blade,
    Other(String),
}

impl BaggageScanResult {
    pub fn from_token(token: &str) -> Self {
        match token {
            "knife" => Self::Knife,
            "pistol" => Self::Pistol,
            "lighter" => Self::Lighter,
            "scissors" => Self::Scissors,
            "blade" => Self::Blade,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn severity(&self) -> Option<ThreatSeverity> {
        match self {
            Self::Knife | Self::Pistol => Some(ThreatSeverity::Dangerous),
            Self::Lighter | Self::Scissors | Self::Blade => Some(ThreatSeverity::Suspicious),
            Self::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Knife => "knife",
            Self::Pistol => "pistol",
            Self::Lighter => "lighter",
            Self::Scissors => "scissors",
            Self::Blade => "blade",
            Self::Other(value) => value,
        }
    }
}

/// Substance reported by the trace detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChemicalTrace {
    PotassiumNitrate,
    NitrateBasedExplosives,
    Glycerin,
    Cocaine,
    Heroine,
    Marijuana,
    Other(String),
}

impl ChemicalTrace {
    pub fn from_token(token: &str) -> Self {
        match token {
            "potassium_nitrate" => Self::PotassiumNitrate,
            "nitrate based explosives" => Self::NitrateBasedExplosives,
            "glycerin" => Self::Glycerin,
            "cocaine" => Self::Cocaine,
            "heroine" => Self::Heroine,
            "marijuana" => Self::Marijuana,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn severity(&self) -> Option<ThreatSeverity> {
        match self {
            Self::PotassiumNitrate | Self::NitrateBasedExplosives => {
                Some(ThreatSeverity::Dangerous)
            }
            Self::Glycerin | Self::Cocaine | Self::Heroine | Self::Marijuana => {
                Some(ThreatSeverity::Suspicious)
            }
            Self::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PotassiumNitrate => "potassium_nitrate",
            Self::NitrateBasedExplosives => "nitrate based explosives",
            Self::Glycerin => "glycerin",
            Self::Cocaine => "cocaine",
            Self::Heroine => "heroine",
            Self::Marijuana => "marijuana",
            Self::Other(value) => value,
        }
    }
}

/// Travel anomaly rating; only `high` participates in scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelAnomalyLevel {
    High,
    Other(String),
}

impl TravelAnomalyLevel {
    pub fn from_token(token: &str) -> Self {
        match token {
            "high" => Self::High,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Self::High)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "high",
            Self::Other(value) => value,
        }
    }
}

/// Canonical passenger record produced by intake. Every field is well formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerRecord {
    pub passenger_id: String,
    pub passenger_name: String,
    pub flight_no: String,
    pub behavior_state: BehaviorState,
    pub bag_tampering: bool,
    pub no_fly_match: bool,
    pub chemical_trace: ChemicalTrace,
    pub baggage_scan_result: BaggageScanResult,
    pub travel_anomaly_level: TravelAnomalyLevel,
    /// Carried through intake but not consulted by any rule.
    pub travel_pattern_risk: String,
    pub duplicate_bag_tag: bool,
    pub unattended_baggage: bool,
    pub multiple_boarding_passes: bool,
    pub extra_weight_kg: f64,
}

/// Named rule outcomes, declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    NoFlyListMatch,
    DangerousWeapon,
    SuspiciousWeapon,
    DangerousChemical,
    SuspiciousChemical,
    HighTravelAnomaly,
    DuplicateBagTag,
    MultipleBoardingPasses,
    UnattendedBaggage,
    BagTampering,
    SuspiciousBehavior,
    ExcessBaggageWeight,
}

impl RiskFactor {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::NoFlyListMatch,
            Self::DangerousWeapon,
            Self::SuspiciousWeapon,
            Self::DangerousChemical,
            Self::SuspiciousChemical,
            Self::HighTravelAnomaly,
            Self::DuplicateBagTag,
            Self::MultipleBoardingPasses,
            Self::UnattendedBaggage,
            Self::BagTampering,
            Self::SuspiciousBehavior,
            Self::ExcessBaggageWeight,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NoFlyListMatch => "No-Fly List Match",
            Self::DangerousWeapon => "Dangerous Weapon Detected",
            Self::SuspiciousWeapon => "Suspicious Weapon Detected",
            Self::DangerousChemical => "Dangerous Chemical Trace",
            Self::SuspiciousChemical => "Suspicious Chemical Trace",
            Self::HighTravelAnomaly => "High Travel Anomaly",
            Self::DuplicateBagTag => "Duplicate Bag Tag",
            Self::MultipleBoardingPasses => "Multiple Boarding Passes",
            Self::UnattendedBaggage => "Unattended Baggage",
            Self::BagTampering => "Bag Tampering",
            Self::SuspiciousBehavior => "Suspicious Behavior",
            Self::ExcessBaggageWeight => "Excess Baggage Weight",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk tier assigned from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single triggered rule with the weight it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub factor: RiskFactor,
    pub reason: &'static str,
    pub weight: u32,
}

impl RuleHit {
    pub(crate) fn new(factor: RiskFactor, weight: u32) -> Self {
        Self {
            factor,
            reason: factor.label(),
            weight,
        }
    }
}

/// Score, reason trail, and tier for one passenger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub level: RiskLevel,
    pub hits: Vec<RuleHit>,
}

impl RiskAssessment {
    /// Human-readable reasons in rule-evaluation order.
    pub fn reasons(&self) -> Vec<&'static str> {
        self.hits.iter().map(|hit| hit.reason).collect()
    }

    pub fn is_high_risk(&self) -> bool {
        self.level == RiskLevel::High
    }
}
