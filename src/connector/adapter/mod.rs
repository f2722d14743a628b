mod http_relay_client;
mod mock_completion;
mod openai_client;

pub use http_relay_client::*;
pub use mock_completion::*;
pub use openai_client::*;
