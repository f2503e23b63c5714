//! AI-derived task metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Task difficulty on a 1 (very easy) to 5 (very hard) scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validates a raw difficulty value.
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PlannerError::invalid_input("difficulty").with_reason(format!(
                "Difficulty must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Human readable label for the difficulty level.
    ///
    /// ```rust
    /// use waypoint_core::models::Difficulty;
    ///
    /// assert_eq!(Difficulty::new(1)?.label(), "Very Easy");
    /// assert_eq!(Difficulty::new(5)?.label(), "Very Hard");
    /// # Ok::<(), waypoint_core::PlannerError>(())
    /// ```
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Very Easy",
            2 => "Easy",
            3 => "Medium",
            4 => "Hard",
            _ => "Very Hard",
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = PlannerError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5 ({})", self.0, self.label())
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for Difficulty {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Difficulty".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "integer",
            "minimum": 1,
            "maximum": 5
        })
    }
}

/// The full set of regenerable metadata for a task.
///
/// Intelligence is replaced wholesale: ordinary task patches never touch it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TaskIntelligence {
    /// Estimated effort in hours
    pub estimated_time_hours: Option<f64>,
    /// Estimated cost in US dollars
    pub estimated_cost_usd: Option<f64>,
    /// Difficulty from 1 to 5
    pub difficulty: Option<Difficulty>,
    /// Tools or materials the task needs
    #[serde(default)]
    pub tools_needed: Vec<String>,
    /// Order values of the tasks that must be completed first
    #[serde(default)]
    pub prerequisites: Vec<u32>,
    /// Free-form labels
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TaskIntelligence {
    /// Rejects negative or non-finite estimates.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("estimated_time_hours", self.estimated_time_hours),
            ("estimated_cost_usd", self.estimated_cost_usd),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(PlannerError::invalid_input(field)
                        .with_reason(format!("Estimate must be a non-negative number, got {v}")));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_bounds() {
        assert!(Difficulty::new(0).is_err());
        assert!(Difficulty::new(6).is_err());
        assert_eq!(Difficulty::new(3).unwrap().label(), "Medium");
    }

    #[test]
    fn test_difficulty_serde_rejects_out_of_range() {
        let parsed: std::result::Result<Difficulty, _> = serde_json::from_str("7");
        assert!(parsed.is_err());
        let parsed: Difficulty = serde_json::from_str("4").unwrap();
        assert_eq!(parsed.value(), 4);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "4");
    }

    #[test]
    fn test_intelligence_validation() {
        let ok = TaskIntelligence {
            estimated_time_hours: Some(2.5),
            estimated_cost_usd: Some(0.0),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let negative = TaskIntelligence {
            estimated_cost_usd: Some(-1.0),
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let nan = TaskIntelligence {
            estimated_time_hours: Some(f64::NAN),
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }
}
