//! Error types for configuration and scene loading

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors that can occur when loading a cascade configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors that can occur when loading or validating a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to parse scene TOML: {}", .0.message())]
    Parse(#[from] toml::de::Error),

    /// Two nodes share an identifier
    #[error("duplicate node '{id}'")]
    DuplicateNode { id: String },

    /// A node is a direct child of more than one group
    #[error("node '{child}' is contained by both '{first}' and '{second}'")]
    SharedChild {
        child: String,
        first: String,
        second: String,
    },

    /// A group contains itself
    #[error("containment cycle: {}", cycle.join(" -> "))]
    ContainmentCycle { cycle: Vec<String> },

    /// A step names a node the scene does not define
    #[error("step {step} targets undefined node '{name}'")]
    UnknownTarget {
        name: String,
        step: usize,
        suggestions: Vec<String>,
    },

    /// A step is malformed
    #[error("step {step} is invalid: {reason}")]
    InvalidStep { step: usize, reason: String },
}

impl SceneError {
    /// Create a containment cycle error
    pub fn cycle(cycle: Vec<String>) -> Self {
        Self::ContainmentCycle { cycle }
    }

    /// Create an invalid step error
    pub fn invalid_step(step: usize, reason: impl Into<String>) -> Self {
        Self::InvalidStep {
            step,
            reason: reason.into(),
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Parse(e) => e.span(),
            _ => None,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownTarget { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return match self.suggestions() {
                Some(s) if !s.is_empty() => {
                    format!("Error: {}\nDid you mean: {}?", self, s.join(", "))
                }
                _ => format!("Error: {}", self),
            };
        };

        let message = match self {
            Self::Parse(e) => e.message().to_string(),
            _ => self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid scene")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Error: {}", self),
        }
    }
}
