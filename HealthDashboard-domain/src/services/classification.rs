//! Threshold classifiers for each biometric.
//!
//! Every classifier is total: values that fall between the published bands
//! (for example a BMI of 24.95) or NaN map to the `NotAvailable` variant.

use crate::entities::status::{
    BloodPressureStatus, CholesterolStatus, HeartRateStatus, SugarStatus, WeightStatus,
};

/// Categorize weight from a BMI value
pub fn classify_weight(bmi: f64) -> WeightStatus {
    if bmi < 18.5 {
        WeightStatus::Underweight
    } else if (18.5..=24.9).contains(&bmi) {
        WeightStatus::NormalWeight
    } else if (25.0..=29.9).contains(&bmi) {
        WeightStatus::Overweight
    } else if bmi >= 30.0 {
        WeightStatus::Obesity
    } else {
        WeightStatus::NotAvailable
    }
}

/// Categorize blood pressure. Bands are checked in order and the first match wins.
pub fn classify_blood_pressure(systolic: f64, diastolic: f64) -> BloodPressureStatus {
    if systolic < 120.0 && diastolic < 80.0 {
        BloodPressureStatus::Normal
    } else if (120.0..=129.0).contains(&systolic) && diastolic < 80.0 {
        BloodPressureStatus::Elevated
    } else if (130.0..=139.0).contains(&systolic) || (80.0..=89.0).contains(&diastolic) {
        BloodPressureStatus::Stage1Hypertension
    } else if systolic >= 140.0 || diastolic >= 90.0 {
        BloodPressureStatus::Stage2Hypertension
    } else {
        BloodPressureStatus::NotAvailable
    }
}

/// Categorize resting heart rate
pub fn classify_heart_rate(heart_rate: f64) -> HeartRateStatus {
    if heart_rate < 60.0 {
        HeartRateStatus::Low
    } else if (60.0..=100.0).contains(&heart_rate) {
        HeartRateStatus::Normal
    } else if heart_rate > 100.0 {
        HeartRateStatus::High
    } else {
        HeartRateStatus::NotAvailable
    }
}

/// Categorize total cholesterol
pub fn classify_cholesterol(cholesterol: f64) -> CholesterolStatus {
    if cholesterol < 200.0 {
        CholesterolStatus::Desirable
    } else if (200.0..=239.0).contains(&cholesterol) {
        CholesterolStatus::BorderlineHigh
    } else if cholesterol >= 240.0 {
        CholesterolStatus::HighRisk
    } else {
        CholesterolStatus::NotAvailable
    }
}

/// Categorize blood sugar
pub fn classify_sugar(sugar: f64) -> SugarStatus {
    if sugar < 100.0 {
        SugarStatus::Normal
    } else if (100.0..=125.0).contains(&sugar) {
        SugarStatus::PreDiabetic
    } else if sugar > 125.0 {
        SugarStatus::DiabeticRange
    } else {
        SugarStatus::NotAvailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_bands() {
        assert_eq!(classify_weight(15.0), WeightStatus::Underweight);
        assert_eq!(classify_weight(18.49), WeightStatus::Underweight);
        assert_eq!(classify_weight(18.5), WeightStatus::NormalWeight);
        assert_eq!(classify_weight(22.86), WeightStatus::NormalWeight);
        assert_eq!(classify_weight(24.9), WeightStatus::NormalWeight);
        assert_eq!(classify_weight(25.0), WeightStatus::Overweight);
        assert_eq!(classify_weight(29.9), WeightStatus::Overweight);
        assert_eq!(classify_weight(30.0), WeightStatus::Obesity);
        assert_eq!(classify_weight(45.0), WeightStatus::Obesity);
    }

    #[test]
    fn test_weight_gaps_are_not_available() {
        assert_eq!(classify_weight(24.95), WeightStatus::NotAvailable);
        assert_eq!(classify_weight(29.95), WeightStatus::NotAvailable);
        assert_eq!(classify_weight(f64::NAN), WeightStatus::NotAvailable);
    }

    #[test]
    fn test_bp_category_normal() {
        assert_eq!(classify_blood_pressure(119.0, 79.0), BloodPressureStatus::Normal);
    }

    #[test]
    fn test_bp_category_elevated() {
        assert_eq!(classify_blood_pressure(125.0, 79.0), BloodPressureStatus::Elevated);
        assert_eq!(classify_blood_pressure(120.0, 60.0), BloodPressureStatus::Elevated);
    }

    #[test]
    fn test_bp_category_stage1() {
        // Diastolic in range
        assert_eq!(classify_blood_pressure(125.0, 85.0), BloodPressureStatus::Stage1Hypertension);

        // Systolic in range
        assert_eq!(classify_blood_pressure(135.0, 70.0), BloodPressureStatus::Stage1Hypertension);

        // Diastolic of exactly 80 never counts as elevated
        assert_eq!(classify_blood_pressure(125.0, 80.0), BloodPressureStatus::Stage1Hypertension);
        assert_eq!(classify_blood_pressure(100.0, 80.0), BloodPressureStatus::Stage1Hypertension);
    }

    #[test]
    fn test_bp_category_stage2() {
        assert_eq!(classify_blood_pressure(145.0, 70.0), BloodPressureStatus::Stage2Hypertension);
        assert_eq!(classify_blood_pressure(110.0, 95.0), BloodPressureStatus::Stage2Hypertension);
        assert_eq!(classify_blood_pressure(300.0, 200.0), BloodPressureStatus::Stage2Hypertension);
    }

    #[test]
    fn test_bp_stage1_wins_over_stage2_when_listed_first() {
        // Systolic 135 matches stage 1 before diastolic 95 is considered for stage 2
        assert_eq!(classify_blood_pressure(135.0, 95.0), BloodPressureStatus::Stage1Hypertension);
    }

    #[test]
    fn test_bp_gap_is_not_available() {
        assert_eq!(classify_blood_pressure(129.5, 70.0), BloodPressureStatus::NotAvailable);
        assert_eq!(classify_blood_pressure(f64::NAN, f64::NAN), BloodPressureStatus::NotAvailable);
    }

    #[test]
    fn test_heart_rate_bands() {
        assert_eq!(classify_heart_rate(59.0), HeartRateStatus::Low);
        assert_eq!(classify_heart_rate(60.0), HeartRateStatus::Normal);
        assert_eq!(classify_heart_rate(80.0), HeartRateStatus::Normal);
        assert_eq!(classify_heart_rate(100.0), HeartRateStatus::Normal);
        assert_eq!(classify_heart_rate(101.0), HeartRateStatus::High);
        assert_eq!(classify_heart_rate(f64::NAN), HeartRateStatus::NotAvailable);
    }

    #[test]
    fn test_cholesterol_bands() {
        assert_eq!(classify_cholesterol(199.0), CholesterolStatus::Desirable);
        assert_eq!(classify_cholesterol(200.0), CholesterolStatus::BorderlineHigh);
        assert_eq!(classify_cholesterol(210.0), CholesterolStatus::BorderlineHigh);
        assert_eq!(classify_cholesterol(239.0), CholesterolStatus::BorderlineHigh);
        assert_eq!(classify_cholesterol(240.0), CholesterolStatus::HighRisk);
        assert_eq!(classify_cholesterol(239.5), CholesterolStatus::NotAvailable);
    }

    #[test]
    fn test_sugar_bands() {
        assert_eq!(classify_sugar(99.0), SugarStatus::Normal);
        assert_eq!(classify_sugar(100.0), SugarStatus::PreDiabetic);
        assert_eq!(classify_sugar(110.0), SugarStatus::PreDiabetic);
        assert_eq!(classify_sugar(125.0), SugarStatus::PreDiabetic);
        assert_eq!(classify_sugar(125.5), SugarStatus::DiabeticRange);
        assert_eq!(classify_sugar(130.0), SugarStatus::DiabeticRange);
    }
}
