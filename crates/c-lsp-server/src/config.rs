//! Server configuration.

use c_lsp_core::WritePolicy;

/// Where the server reads requests from and writes responses to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Transport {
    /// JSON-RPC over the process's stdin/stdout.
    #[default]
    Stdio,
    /// JSON-RPC over a single TCP connection accepted on `HOST:PORT`.
    Tcp(String),
}

/// Settings for a server instance.
///
/// The position encoding is not configured here; it is negotiated with the
/// client during `initialize`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerConfig {
    pub transport: Transport,
    pub write_policy: WritePolicy,
}
