//! Miette diagnostics for configuration files.
//!
//! TOML parse failures carry a byte span; rendering them through miette
//! shows the offending line of the config file with a label under it.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(riftbet::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(message: impl Into<String>, src: impl Into<String>, offset: usize, len: usize) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build a diagnostic from a TOML parse error, when it has a location.
    #[must_use]
    pub fn from_toml(err: &toml::de::Error, src: &str) -> Option<Self> {
        let span = err.span()?;
        Some(
            Self::new(err.message().to_string(), src, span.start, span.len().max(1))
                .with_help("run `riftbet config init` to start from a documented template"),
        )
    }
}

/// Render a diagnostic the way miette's fancy handler prints it.
#[must_use]
pub fn render(diagnostic: &ConfigDiagnostic) -> String {
    let mut out = String::new();
    let handler = miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor());
    if handler.render_report(&mut out, diagnostic).is_err() {
        return diagnostic.message.clone();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_errors_point_at_the_source() {
        let src = "[settlement]\ntie_policy = \n";
        let err = toml::from_str::<toml::Value>(src).unwrap_err();
        let diagnostic = ConfigDiagnostic::from_toml(&err, src).unwrap();

        assert!(diagnostic.span.offset() >= "[settlement]\n".len());
        assert!(diagnostic.help.is_some());
        assert!(render(&diagnostic).contains("tie_policy"));
    }
}
