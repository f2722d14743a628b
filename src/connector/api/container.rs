use std::sync::Arc;

use tracing::debug;

use crate::application::{CompletionProvider, RelayChatUseCase};
use crate::domain::ModelConfig;
use crate::{MockCompletionProvider, OpenAiClient};

pub struct ContainerConfig {
    /// Answer with [`MockCompletionProvider`] instead of calling a real API.
    pub mock_provider: bool,
    /// Provider base URL; `None` reads `OPENAI_BASE_URL` or the public default.
    pub provider_base_url: Option<String>,
    pub model: ModelConfig,
}

impl ContainerConfig {
    pub fn from_env(mock_provider: bool) -> Self {
        Self {
            mock_provider,
            provider_base_url: None,
            model: ModelConfig::from_env(),
        }
    }
}

/// Immutable wiring shared by every request handler.
pub struct Container {
    provider: Arc<dyn CompletionProvider>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let provider: Arc<dyn CompletionProvider> = if config.mock_provider {
            debug!("Using mock completion provider");
            Arc::new(MockCompletionProvider::new())
        } else {
            let base_url = config
                .provider_base_url
                .clone()
                .unwrap_or_else(OpenAiClient::configured_base_url);
            debug!("Using OpenAI-compatible provider at {}", base_url);
            Arc::new(OpenAiClient::new(base_url))
        };

        Self { provider, config }
    }

    /// Build a container around an already constructed provider.
    pub fn with_provider(provider: Arc<dyn CompletionProvider>, model: ModelConfig) -> Self {
        Self {
            provider,
            config: ContainerConfig {
                mock_provider: false,
                provider_base_url: None,
                model,
            },
        }
    }

    pub fn relay_use_case(&self) -> RelayChatUseCase {
        RelayChatUseCase::new(self.provider.clone(), self.config.model.clone())
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &ModelConfig {
        &self.config.model
    }
}
