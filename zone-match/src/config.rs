use crate::error::PipelineError;

/// Integer score thresholds driving candidate classification.
///
/// Construction is the validation gate: a `Thresholds` value always holds
/// `0 <= steward_min <= auto_merge <= 100`.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    auto_merge: i32,
    steward_min: i32,
}

impl Thresholds {
    /// Validate and build. Violations are configuration errors surfaced to
    /// the caller, never silently clamped.
    pub fn new(auto_merge: i32, steward_min: i32) -> Result<Self, PipelineError> {
        for (name, value) in [("auto_merge", auto_merge), ("steward_min", steward_min)] {
            if !(0..=100).contains(&value) {
                return Err(PipelineError::Configuration(format!(
                    "{name} threshold {value} is outside [0, 100]"
                )));
            }
        }

        if steward_min > auto_merge {
            return Err(PipelineError::Configuration(format!(
                "steward_min threshold {steward_min} exceeds auto_merge threshold {auto_merge}"
            )));
        }

        Ok(Thresholds {
            auto_merge,
            steward_min,
        })
    }

    /// Scores at or above this are trusted enough to merge automatically.
    pub fn auto_merge(&self) -> i32 {
        self.auto_merge
    }

    /// Scores below this are discarded instead of being routed to a steward.
    pub fn steward_min(&self) -> i32 {
        self.steward_min
    }
}
