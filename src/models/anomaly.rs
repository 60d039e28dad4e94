use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyType {
    TemperatureAnomaly,
    HumidityAnomaly,
    WindSpeedAnomaly,
}

impl AnomalyType {
    pub fn display_name(&self) -> &'static str {
        match self {
            AnomalyType::TemperatureAnomaly => "Temperature Anomaly",
            AnomalyType::HumidityAnomaly => "Humidity Anomaly",
            AnomalyType::WindSpeedAnomaly => "Wind Speed Anomaly",
        }
    }
}

impl std::fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyType,
    pub severity: Severity,
    pub description: String,
}

impl Anomaly {
    pub fn new(kind: AnomalyType, severity: Severity, description: String) -> Self {
        Self {
            kind,
            severity,
            description,
        }
    }

    pub fn is_high(&self) -> bool {
        self.severity == Severity::High
    }
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} Risk] {}: {}",
            self.severity, self.kind, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_display_and_serialization() {
        let anomaly = Anomaly::new(
            AnomalyType::HumidityAnomaly,
            Severity::Medium,
            "Humidity 95% is 30.0% above historical average (65.0%)".to_string(),
        );

        assert_eq!(
            anomaly.to_string(),
            "[Medium Risk] Humidity Anomaly: Humidity 95% is 30.0% above historical average (65.0%)"
        );

        let json = serde_json::to_value(&anomaly).unwrap();
        assert_eq!(json["type"], "HumidityAnomaly");
        assert_eq!(json["severity"], "Medium");
        assert!(!anomaly.is_high());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
    }
}
