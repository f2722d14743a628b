pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{CompletionProvider, ConversationUseCase, RelayChatUseCase, RelayClient};

pub use connector::{
    build_router, serve, Container, ContainerConfig, HttpRelayClient, MockCompletionProvider,
    OpenAiClient,
};

pub use domain::{
    Credential, DomainError, Message, ModelConfig, RelayCall, RelayRequest, RelayResponse,
    RequestId, Role, SessionState, UiMode,
};
