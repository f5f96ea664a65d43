//! Error types for the visibility graph planner

use std::fmt;

/// Main error type for graph construction and search
#[derive(Debug)]
pub enum PlanningError {
    /// Polygon obstacle violates the input contract
    InvalidPolygon(String),
    /// Search tree handle is stale or belongs to another tree
    InvalidNode(String),
    /// Caller broke an operation's precondition
    PreconditionViolation(String),
    /// Search exhausted without reaching the goal
    NoPathFound(String),
    /// Malformed polygon input text
    ParseError(String),
    /// I/O error
    IoError(std::io::Error),
}

impl fmt::Display for PlanningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanningError::InvalidPolygon(msg) => write!(f, "Invalid polygon: {}", msg),
            PlanningError::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            PlanningError::PreconditionViolation(msg) => {
                write!(f, "Precondition violation: {}", msg)
            }
            PlanningError::NoPathFound(msg) => write!(f, "No path found: {}", msg),
            PlanningError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            PlanningError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for PlanningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanningError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlanningError {
    fn from(e: std::io::Error) -> Self {
        PlanningError::IoError(e)
    }
}

/// Result type alias for planning operations
pub type PlanningResult<T> = Result<T, PlanningError>;
