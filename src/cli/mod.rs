use clap::Subcommand;

use crate::connector::api::container::DEFAULT_PORT;
use crate::connector::DEFAULT_PROXY_URL;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the proxy that forwards chat requests to Gemini with the server-held key
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the proxy on all network interfaces
        #[arg(long)]
        public: bool,

        /// Abort upstream calls after this many seconds (no timeout by default)
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Open the terminal chat
    Chat {
        /// Base URL of a running proxy
        #[arg(long, default_value = DEFAULT_PROXY_URL)]
        proxy_url: String,

        /// Call Gemini directly with GEMINI_API_KEY instead of going through the proxy
        #[arg(long)]
        direct: bool,

        /// Abort requests after this many seconds (no timeout by default)
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}
