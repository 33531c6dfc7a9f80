//! Configuration for the extraction agent.

use std::time::Duration;

/// Tunable settings for the extraction workflow.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Model name passed to the client (default: `gpt-4o`).
    pub model: String,
    /// Sampling temperature for every extraction call (default: 0.1).
    pub temperature: f32,
    /// Advisory attempt ceiling recorded in session state (default: 3).
    pub max_iterations: u32,
    /// Deadline for one model invocation (default: 120 seconds).
    pub request_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.1,
            max_iterations: 3,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl AgentConfig {
    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the advisory iteration ceiling.
    #[must_use]
    pub const fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Sets the per-call deadline.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert!((config.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_builders() {
        let config = AgentConfig::default()
            .with_model("gpt-4o-mini")
            .with_temperature(0.0)
            .with_max_iterations(5)
            .with_request_timeout(Duration::from_secs(30));

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
