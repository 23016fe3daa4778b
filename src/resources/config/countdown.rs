use serde::{Deserialize, Serialize};

/// One text frame of the pre-race countdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownStep {
    pub text: String,
    pub seconds: f64,
}

impl CountdownStep {
    pub fn new(text: &str, seconds: f64) -> Self {
        Self {
            text: text.to_string(),
            seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub steps: Vec<CountdownStep>,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            steps: vec![
                CountdownStep::new("3", 1.0),
                CountdownStep::new("", 0.3),
                CountdownStep::new("2", 1.0),
                CountdownStep::new("", 0.3),
                CountdownStep::new("1", 1.0),
                CountdownStep::new("", 0.3),
                CountdownStep::new("GO!", 1.0),
                CountdownStep::new("", 0.0),
            ],
        }
    }
}

impl CountdownConfig {
    /// A countdown that completes on the first tick.
    pub fn immediate() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn total_seconds(&self) -> f64 {
        self.steps.iter().map(|step| step.seconds).sum()
    }
}
