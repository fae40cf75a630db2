//! Error adapter for converting ArborError to miette diagnostics.
//!
//! This module bridges the library's error types and miette's rich
//! diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When an outline [`ParseError`](arbor_outline::ParseError) contains several
//! diagnostics, each diagnostic is rendered independently.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan,
};

use arbor::ArborError;
use arbor_outline::{Span, error::Diagnostic};

/// Adapter for a single outline diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Outline text the labels point into
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(format!("arbor::outline::{c}")) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        // Any outline diagnostic stops the run.
        Some(MietteSeverity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`ArborError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a ArborError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ArborError::Io(_) => "arbor::io",
            ArborError::Input(_) => "arbor::input",
            ArborError::Outline { .. } => return None,
            ArborError::Render(_) => "arbor::render",
            ArborError::Export(_) => "arbor::export",
            ArborError::Config(_) => "arbor::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An outline diagnostic with source locations.
    Diagnostic(DiagnosticAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert an [`ArborError`] into a list of reportable errors.
///
/// Outline errors yield one [`Reportable`] per diagnostic; every other
/// variant yields a single one.
pub fn to_reportables(err: &ArborError) -> Vec<Reportable<'_>> {
    match err {
        ArborError::Outline {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use arbor::tree::TreeError;
    use arbor_outline::error::{ErrorCode, ParseError};

    use super::*;

    fn code(reportable: &Reportable<'_>) -> Option<String> {
        reportable.code().map(|code| code.to_string())
    }

    #[test]
    fn test_outline_diagnostics_are_separate() {
        let diags = vec![
            Diagnostic::error("content before the first heading")
                .with_code(ErrorCode::E101)
                .with_label(Span::new(0..5), "expected a heading"),
            Diagnostic::error("outline has more than one root heading")
                .with_code(ErrorCode::E102)
                .with_label(Span::new(12..17), "second root")
                .with_help("nest the heading under the first root"),
        ];
        let err = ArborError::new_outline_error(ParseError::from(diags), "stray\n# One\n# Two\n");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "content before the first heading");
        assert_eq!(code(&reportables[1]).as_deref(), Some("arbor::outline::E102"));
        assert_eq!(
            reportables[1].help().map(|help| help.to_string()).as_deref(),
            Some("nest the heading under the first root")
        );
    }

    #[test]
    fn test_plain_errors_get_codes() {
        let err = ArborError::Input(TreeError::DuplicateId {
            id: "1".to_string(),
        });
        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert_eq!(code(&reportables[0]).as_deref(), Some("arbor::input"));
        assert_eq!(
            reportables[0].to_string(),
            "Invalid tree: id `1` is used by more than one node"
        );

        let err = ArborError::Config("bad".to_string());
        assert_eq!(code(&to_reportables(&err)[0]).as_deref(), Some("arbor::config"));
    }

    #[test]
    fn test_labels_keep_primary_flag() {
        let diag = Diagnostic::error("outline has more than one root heading")
            .with_label(Span::new(6..11), "second root")
            .with_secondary_label(Span::new(0..5), "first root here");

        let adapter = DiagnosticAdapter::new(&diag, "# One\n# Two\n");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("second root"));
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_report_renders() {
        let src = "# One\n# Two\n";
        let err = ArborError::new_outline_error(arbor_outline::parse(src).unwrap_err(), src);

        let reporter = miette::GraphicalReportHandler::new();
        for reportable in to_reportables(&err) {
            let mut writer = String::new();
            reporter.render_report(&mut writer, &reportable).unwrap();
            assert!(writer.contains("more than one root heading"));
        }
    }
}
