//! LSP server implementation using tower-lsp.

use std::sync::OnceLock;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tower_lsp::jsonrpc::{self, ErrorCode, Result};
use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    InitializeParams, InitializeResult, InitializedParams, MessageType, ServerInfo, Url,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};

use c_lsp_core::{Analyzer, AnalyzerConfig, SnapshotEntry};

use crate::capabilities::{negotiate_position_encoding, server_capabilities};
use crate::config::{ServerConfig, Transport};
use crate::convert;

/// The C language server.
pub struct CLanguageServer {
    /// The LSP client for sending notifications.
    client: Client,
    config: ServerConfig,
    /// Created during `initialize`, once the position encoding is known.
    analyzer: OnceLock<Analyzer>,
}

impl CLanguageServer {
    /// Create a new language server instance.
    pub fn new(client: Client, config: ServerConfig) -> Self {
        Self {
            client,
            config,
            analyzer: OnceLock::new(),
        }
    }

    /// Reparse a document and publish the resulting snapshot.
    async fn analyze(&self, uri: Url, text: String, version: i32) {
        let Some(analyzer) = self.analyzer.get() else {
            tracing::warn!(%uri, "document event before initialize");
            return;
        };
        let snapshot = analyzer.on_document_event(uri.as_str(), text.as_bytes(), version);
        self.publish(snapshot).await;
    }

    /// Publish diagnostics for every document in `snapshot`.
    async fn publish(&self, snapshot: Vec<SnapshotEntry>) {
        for entry in snapshot {
            let uri = match Url::parse(&entry.uri) {
                Ok(uri) => uri,
                Err(err) => {
                    tracing::warn!(uri = %entry.uri, "not publishing diagnostics: {err}");
                    continue;
                }
            };
            let diagnostics = entry
                .diagnostics
                .iter()
                .map(convert::diagnostic_to_lsp)
                .collect();
            self.client
                .publish_diagnostics(uri, diagnostics, Some(entry.version))
                .await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for CLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let encoding = negotiate_position_encoding(&params);
        let analyzer = Analyzer::new(AnalyzerConfig {
            encoding,
            write_policy: self.config.write_policy,
        })
        .map_err(|err| jsonrpc::Error {
            code: ErrorCode::InternalError,
            message: err.to_string().into(),
            data: None,
        })?;
        if self.analyzer.set(analyzer).is_err() {
            tracing::warn!("initialize received twice; keeping the first analyzer");
        }
        tracing::info!(?encoding, write_policy = ?self.config.write_policy, "initialized analyzer");

        Ok(InitializeResult {
            capabilities: server_capabilities(encoding),
            server_info: Some(ServerInfo {
                name: "c-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "c-lsp server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        self.analyze(document.uri, document.text, document.version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // We're using full document sync, so take the last change
        if let Some(change) = params.content_changes.into_iter().last() {
            self.analyze(uri, change.text, version).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        if let Some(analyzer) = self.analyzer.get() {
            analyzer.close(uri.as_str());
        }

        // Clear diagnostics for closed document
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}

/// Serve one client over an arbitrary byte stream pair.
pub async fn serve<I, O>(input: I, output: O, config: ServerConfig)
where
    I: AsyncRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let (service, socket) = LspService::new(move |client| CLanguageServer::new(client, config));
    Server::new(input, output, socket).serve(service).await;
}

/// Run the LSP server on the configured transport until the client exits.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    match config.transport.clone() {
        Transport::Stdio => {
            tracing::info!("serving on stdio");
            serve(tokio::io::stdin(), tokio::io::stdout(), config).await;
        }
        Transport::Tcp(addr) => {
            let listener = TcpListener::bind(addr.as_str())
                .await
                .with_context(|| format!("failed to listen on {addr}"))?;
            tracing::info!(addr = %listener.local_addr()?, "waiting for a client");

            let (stream, peer) = listener
                .accept()
                .await
                .context("failed to accept a client connection")?;
            tracing::info!(%peer, "client connected");

            let (read, write) = tokio::io::split(stream);
            serve(read, write, config).await;
        }
    }
    tracing::info!("client disconnected");
    Ok(())
}
