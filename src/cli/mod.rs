use clap::Subcommand;

use crate::connector::adapter::DEFAULT_SERVER_URL;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay HTTP server exposing POST /api/chat
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,

        /// Answer with an offline echo provider instead of calling the completion API
        #[arg(long)]
        mock_provider: bool,
    },

    /// Open the terminal chat client against a running relay
    Chat {
        #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
        server: String,
    },
}
