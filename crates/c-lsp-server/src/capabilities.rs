//! LSP capability negotiation.

use tower_lsp::lsp_types::{
    InitializeParams, PositionEncodingKind, ServerCapabilities, TextDocumentSyncCapability,
    TextDocumentSyncKind, TextDocumentSyncOptions,
};

use c_lsp_core::PositionEncoding;

/// Pick the position encoding for a session.
///
/// UTF-8 is tree-sitter's native unit, so it wins whenever the client offers
/// it. Otherwise the LSP default, UTF-16, is used.
pub fn negotiate_position_encoding(params: &InitializeParams) -> PositionEncoding {
    let offers_utf8 = params
        .capabilities
        .general
        .as_ref()
        .and_then(|general| general.position_encodings.as_ref())
        .is_some_and(|encodings| encodings.contains(&PositionEncodingKind::UTF8));

    if offers_utf8 {
        PositionEncoding::Utf8
    } else {
        PositionEncoding::Utf16
    }
}

/// Get the server capabilities to report to the client.
pub fn server_capabilities(encoding: PositionEncoding) -> ServerCapabilities {
    ServerCapabilities {
        position_encoding: Some(match encoding {
            PositionEncoding::Utf8 => PositionEncodingKind::UTF8,
            PositionEncoding::Utf16 => PositionEncodingKind::UTF16,
        }),

        // Text document synchronization
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                // We want to know when documents are opened/closed
                open_close: Some(true),
                // Every change is a full reparse, so ask for full text
                change: Some(TextDocumentSyncKind::FULL),
                will_save: None,
                will_save_wait_until: None,
                save: None,
            },
        )),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::{ClientCapabilities, GeneralClientCapabilities};

    fn params_offering(encodings: Option<Vec<PositionEncodingKind>>) -> InitializeParams {
        InitializeParams {
            capabilities: ClientCapabilities {
                general: Some(GeneralClientCapabilities {
                    position_encodings: encodings,
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn capabilities_include_full_document_sync() {
        let caps = server_capabilities(PositionEncoding::Utf16);
        assert_eq!(
            caps.text_document_sync,
            Some(TextDocumentSyncCapability::Options(TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::FULL),
                will_save: None,
                will_save_wait_until: None,
                save: None,
            }))
        );
    }

    #[test]
    fn capabilities_advertise_the_encoding() {
        assert_eq!(
            server_capabilities(PositionEncoding::Utf8).position_encoding,
            Some(PositionEncodingKind::UTF8)
        );
        assert_eq!(
            server_capabilities(PositionEncoding::Utf16).position_encoding,
            Some(PositionEncodingKind::UTF16)
        );
    }

    #[test]
    fn utf8_is_chosen_when_offered() {
        let params = params_offering(Some(vec![
            PositionEncodingKind::UTF16,
            PositionEncodingKind::UTF8,
        ]));
        assert_eq!(negotiate_position_encoding(&params), PositionEncoding::Utf8);
    }

    #[test]
    fn utf16_is_the_fallback() {
        assert_eq!(
            negotiate_position_encoding(&InitializeParams::default()),
            PositionEncoding::Utf16
        );
        assert_eq!(
            negotiate_position_encoding(&params_offering(None)),
            PositionEncoding::Utf16
        );
        assert_eq!(
            negotiate_position_encoding(&params_offering(Some(vec![PositionEncodingKind::UTF32]))),
            PositionEncoding::Utf16
        );
    }
}
