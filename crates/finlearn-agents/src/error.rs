use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Generation service error: {0}")]
    Service(String),

    #[error("Generation response parse error: {message}")]
    Parse {
        message: String,
        /// The unparsed text returned by the service.
        raw: String,
    },

    #[error("Invalid agent output: {0}")]
    InvalidAgentOutput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{agent} failed: {source}")]
    Stage {
        agent: String,
        #[source]
        source: Box<AgentError>,
    },

    #[error("Pipeline timed out after {0} seconds")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AgentError {
    /// Wrap this error in a stage error attributed to `agent`.
    pub fn in_stage(self, agent: &str) -> Self {
        AgentError::Stage {
            agent: agent.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through stage wrappers.
    pub fn root(&self) -> &AgentError {
        match self {
            AgentError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}
