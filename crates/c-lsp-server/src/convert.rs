//! Conversion between c-lsp-core types and tower_lsp::lsp_types.

use tower_lsp::lsp_types::{
    Diagnostic as LspDiagnostic, DiagnosticSeverity as LspSeverity, NumberOrString,
    Position as LspPosition, Range as LspRange,
};

use c_lsp_core::types::{Diagnostic, DiagnosticSeverity, Position, Range};

/// Convert a c-lsp-core Position to an lsp-types Position.
pub fn position_to_lsp(pos: &Position) -> LspPosition {
    LspPosition {
        line: pos.line,
        character: pos.character,
    }
}

/// Convert a c-lsp-core Range to an lsp-types Range.
pub fn range_to_lsp(range: &Range) -> LspRange {
    LspRange {
        start: position_to_lsp(&range.start),
        end: position_to_lsp(&range.end),
    }
}

/// Convert a c-lsp-core DiagnosticSeverity to an lsp-types DiagnosticSeverity.
pub fn severity_to_lsp(severity: &DiagnosticSeverity) -> LspSeverity {
    match severity {
        DiagnosticSeverity::Error => LspSeverity::ERROR,
        DiagnosticSeverity::Warning => LspSeverity::WARNING,
        DiagnosticSeverity::Information => LspSeverity::INFORMATION,
        DiagnosticSeverity::Hint => LspSeverity::HINT,
    }
}

/// Convert a c-lsp-core Diagnostic to an lsp-types Diagnostic.
pub fn diagnostic_to_lsp(diag: &Diagnostic) -> LspDiagnostic {
    LspDiagnostic {
        range: range_to_lsp(&diag.range),
        severity: Some(severity_to_lsp(&diag.severity)),
        code: diag.code.clone().map(NumberOrString::String),
        code_description: None,
        source: diag.source.clone(),
        message: diag.message.clone(),
        related_information: None,
        tags: None,
        data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_converts_field_by_field() {
        let core_pos = Position::new(10, 5);
        let lsp_pos = position_to_lsp(&core_pos);
        assert_eq!(lsp_pos.line, 10);
        assert_eq!(lsp_pos.character, 5);
    }

    #[test]
    fn range_converts_both_ends() {
        let core_range = Range::new(Position::new(2, 0), Position::new(3, 4));
        let lsp_range = range_to_lsp(&core_range);
        assert_eq!(lsp_range.start, LspPosition::new(2, 0));
        assert_eq!(lsp_range.end, LspPosition::new(3, 4));
    }

    #[test]
    fn every_severity_maps_to_its_lsp_constant() {
        assert_eq!(
            severity_to_lsp(&DiagnosticSeverity::Error),
            LspSeverity::ERROR
        );
        assert_eq!(
            severity_to_lsp(&DiagnosticSeverity::Warning),
            LspSeverity::WARNING
        );
        assert_eq!(
            severity_to_lsp(&DiagnosticSeverity::Information),
            LspSeverity::INFORMATION
        );
        assert_eq!(
            severity_to_lsp(&DiagnosticSeverity::Hint),
            LspSeverity::HINT
        );
    }

    #[test]
    fn diagnostic_keeps_code_source_and_message() {
        let core_diag = Diagnostic::new(
            Range::new(Position::new(0, 9), Position::new(0, 11)),
            DiagnosticSeverity::Error,
            "Failed to parse",
        )
        .with_code("syntax-error");

        let lsp_diag = diagnostic_to_lsp(&core_diag);
        assert_eq!(lsp_diag.message, "Failed to parse");
        assert_eq!(lsp_diag.severity, Some(LspSeverity::ERROR));
        assert_eq!(
            lsp_diag.code,
            Some(NumberOrString::String("syntax-error".into()))
        );
        assert_eq!(lsp_diag.source.as_deref(), Some("c-lsp"));
        assert_eq!(lsp_diag.range.start.character, 9);
    }
}
