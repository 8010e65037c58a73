//! Anomaly class palette and confidence severity bands.

use bevy_egui::egui::Color32;

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnomalyClass {
    Faulty,
    PotentiallyFaulty,
    Normal,
    Warning,
    Critical,
    /// Any label outside the palette
    Unknown,
}

impl AnomalyClass {
    /// Case-insensitive; spaces and hyphens fold to underscores.
    pub fn from_label(label: &str) -> Self {
        let folded: String = label
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match folded.as_str() {
            "faulty" => AnomalyClass::Faulty,
            "potentially_faulty" => AnomalyClass::PotentiallyFaulty,
            "normal" => AnomalyClass::Normal,
            "warning" => AnomalyClass::Warning,
            "critical" => AnomalyClass::Critical,
            _ => AnomalyClass::Unknown,
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            AnomalyClass::Faulty => theme::class::FAULTY,
            AnomalyClass::PotentiallyFaulty => theme::class::POTENTIALLY_FAULTY,
            AnomalyClass::Normal => theme::class::NORMAL,
            AnomalyClass::Warning => theme::class::WARNING,
            AnomalyClass::Critical => theme::class::CRITICAL,
            AnomalyClass::Unknown => theme::class::FALLBACK,
        }
    }

    /// Canonical label, used by the class picker of the new-box form.
    pub fn label(&self) -> &'static str {
        match self {
            AnomalyClass::Faulty => "faulty",
            AnomalyClass::PotentiallyFaulty => "potentially_faulty",
            AnomalyClass::Normal => "normal",
            AnomalyClass::Warning => "warning",
            AnomalyClass::Critical => "critical",
            AnomalyClass::Unknown => "unknown",
        }
    }

    /// Classes offered when labeling a new box.
    pub fn known() -> &'static [AnomalyClass] {
        &[
            AnomalyClass::Faulty,
            AnomalyClass::PotentiallyFaulty,
            AnomalyClass::Normal,
            AnomalyClass::Warning,
            AnomalyClass::Critical,
        ]
    }
}

/// Color for a free-form class label.
pub fn class_color(label: &str) -> Color32 {
    AnomalyClass::from_label(label).color()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= 0.8 {
            Severity::Critical
        } else if confidence >= 0.6 {
            Severity::High
        } else if confidence >= 0.4 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            Severity::Low => theme::severity::LOW,
            Severity::Medium => theme::severity::MEDIUM,
            Severity::High => theme::severity::HIGH,
            Severity::Critical => theme::severity::CRITICAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_folds_case_and_separators() {
        assert_eq!(AnomalyClass::from_label("Faulty"), AnomalyClass::Faulty);
        assert_eq!(
            AnomalyClass::from_label("Potentially Faulty"),
            AnomalyClass::PotentiallyFaulty
        );
        assert_eq!(
            AnomalyClass::from_label("potentially-faulty"),
            AnomalyClass::PotentiallyFaulty
        );
        assert_eq!(AnomalyClass::from_label("  NORMAL "), AnomalyClass::Normal);
    }

    #[test]
    fn test_unknown_label_uses_fallback_color() {
        assert_eq!(class_color("loose_joint"), theme::class::FALLBACK);
        assert_eq!(class_color(""), theme::class::FALLBACK);
        assert_eq!(class_color("critical"), theme::class::CRITICAL);
    }

    #[test]
    fn test_known_labels_round_trip() {
        for class in AnomalyClass::known() {
            assert_eq!(AnomalyClass::from_label(class.label()), *class);
        }
    }

    #[test]
    fn test_severity_bands() {
        assert_eq!(Severity::from_confidence(0.95), Severity::Critical);
        assert_eq!(Severity::from_confidence(0.8), Severity::Critical);
        assert_eq!(Severity::from_confidence(0.79), Severity::High);
        assert_eq!(Severity::from_confidence(0.6), Severity::High);
        assert_eq!(Severity::from_confidence(0.4), Severity::Medium);
        assert_eq!(Severity::from_confidence(0.39), Severity::Low);
        assert_eq!(Severity::from_confidence(0.0), Severity::Low);
    }
}
