use std::fmt;
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Weight category derived from BMI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum WeightStatus {
    /// BMI below 18.5
    #[serde(rename = "Underweight")]
    Underweight,

    /// BMI 18.5 to 24.9
    #[serde(rename = "Normal Weight")]
    NormalWeight,

    /// BMI 25 to 29.9
    #[serde(rename = "Overweight")]
    Overweight,

    /// BMI 30 and above
    #[serde(rename = "Obesity")]
    Obesity,

    /// No band matched
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl WeightStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WeightStatus::Underweight => "Underweight",
            WeightStatus::NormalWeight => "Normal Weight",
            WeightStatus::Overweight => "Overweight",
            WeightStatus::Obesity => "Obesity",
            WeightStatus::NotAvailable => "N/A",
        }
    }
}

/// Blood pressure category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum BloodPressureStatus {
    /// Systolic < 120 and diastolic < 80
    #[serde(rename = "Normal")]
    Normal,

    /// Systolic 120-129 and diastolic < 80
    #[serde(rename = "Elevated")]
    Elevated,

    /// Systolic 130-139 or diastolic 80-89
    #[serde(rename = "Stage 1 Hypertension")]
    Stage1Hypertension,

    /// Systolic ≥ 140 or diastolic ≥ 90
    #[serde(rename = "Stage 2 Hypertension")]
    Stage2Hypertension,

    /// No band matched
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl BloodPressureStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BloodPressureStatus::Normal => "Normal",
            BloodPressureStatus::Elevated => "Elevated",
            BloodPressureStatus::Stage1Hypertension => "Stage 1 Hypertension",
            BloodPressureStatus::Stage2Hypertension => "Stage 2 Hypertension",
            BloodPressureStatus::NotAvailable => "N/A",
        }
    }

    /// Either hypertension stage
    pub fn is_hypertension(&self) -> bool {
        matches!(
            self,
            BloodPressureStatus::Stage1Hypertension | BloodPressureStatus::Stage2Hypertension
        )
    }
}

/// Resting heart rate category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum HeartRateStatus {
    /// Below 60 BPM
    #[serde(rename = "Low (Bradycardia)")]
    Low,

    /// 60 to 100 BPM
    #[serde(rename = "Normal")]
    Normal,

    /// Above 100 BPM
    #[serde(rename = "High (Tachycardia)")]
    High,

    /// No band matched
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl HeartRateStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HeartRateStatus::Low => "Low (Bradycardia)",
            HeartRateStatus::Normal => "Normal",
            HeartRateStatus::High => "High (Tachycardia)",
            HeartRateStatus::NotAvailable => "N/A",
        }
    }
}

/// Total cholesterol category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum CholesterolStatus {
    /// Below 200 mg/dL
    #[serde(rename = "Desirable")]
    Desirable,

    /// 200 to 239 mg/dL
    #[serde(rename = "Borderline High")]
    BorderlineHigh,

    /// 240 mg/dL and above
    #[serde(rename = "High Risk")]
    HighRisk,

    /// No band matched
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl CholesterolStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CholesterolStatus::Desirable => "Desirable",
            CholesterolStatus::BorderlineHigh => "Borderline High",
            CholesterolStatus::HighRisk => "High Risk",
            CholesterolStatus::NotAvailable => "N/A",
        }
    }

    /// Borderline high or high risk
    pub fn is_high(&self) -> bool {
        matches!(self, CholesterolStatus::BorderlineHigh | CholesterolStatus::HighRisk)
    }
}

/// Blood sugar category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum SugarStatus {
    /// Below 100 mg/dL
    #[serde(rename = "Normal")]
    Normal,

    /// 100 to 125 mg/dL
    #[serde(rename = "Pre-diabetic")]
    PreDiabetic,

    /// Above 125 mg/dL
    #[serde(rename = "Diabetic Range")]
    DiabeticRange,

    /// No band matched
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl SugarStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SugarStatus::Normal => "Normal",
            SugarStatus::PreDiabetic => "Pre-diabetic",
            SugarStatus::DiabeticRange => "Diabetic Range",
            SugarStatus::NotAvailable => "N/A",
        }
    }
}

macro_rules! display_via_label {
    ($($status:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $status {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

display_via_label!(WeightStatus, BloodPressureStatus, HeartRateStatus, CholesterolStatus, SugarStatus);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_serialize_as_display_text() {
        assert_eq!(
            serde_json::to_string(&WeightStatus::NormalWeight).unwrap(),
            "\"Normal Weight\""
        );
        assert_eq!(
            serde_json::to_string(&HeartRateStatus::Low).unwrap(),
            "\"Low (Bradycardia)\""
        );
        assert_eq!(SugarStatus::PreDiabetic.to_string(), "Pre-diabetic");
        assert_eq!(BloodPressureStatus::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn test_cholesterol_high_matches_label_text() {
        for status in [
            CholesterolStatus::Desirable,
            CholesterolStatus::BorderlineHigh,
            CholesterolStatus::HighRisk,
            CholesterolStatus::NotAvailable,
        ] {
            assert_eq!(status.is_high(), status.label().contains("High"));
        }
    }

    #[test]
    fn test_hypertension_matches_label_text() {
        for status in [
            BloodPressureStatus::Normal,
            BloodPressureStatus::Elevated,
            BloodPressureStatus::Stage1Hypertension,
            BloodPressureStatus::Stage2Hypertension,
            BloodPressureStatus::NotAvailable,
        ] {
            assert_eq!(status.is_hypertension(), status.label().contains("Hypertension"));
        }
    }
}
