#[cfg(test)]
mod tests;

use std::sync::Arc;

use facade_config::{load_config, FacadeConfig};
use facade_core::{Delayer, ResponseDelayer};
use facade_errors::FacadeError;
use facade_proxy::{HealthProxy, MockProxy};
use facade_service::Service;
use pingora::prelude::Server;
use pingora::proxy::http_proxy_service;

/// Top-level orchestrator: owns the loaded service and runs both the mock
/// server and the liveness endpoint as separate pingora services on their
/// own ports.
pub struct Facade {
    config: FacadeConfig,
    service: Arc<Service>,
}

impl Facade {
    pub fn builder(config: FacadeConfig) -> FacadeBuilder {
        FacadeBuilder::new(config)
    }

    pub fn from_paths(config_paths: &[String]) -> Result<Self, FacadeError> {
        FacadeBuilder::from_paths(config_paths)?.build()
    }

    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }

    pub fn run(&self) -> Result<(), FacadeError> {
        let mut server = Server::new(None)
            .map_err(|err| FacadeError::Other(format!("failed to initialize pingora server: {err}")))?;
        server.bootstrap();

        if !self.config.server.disable_startup_message {
            tracing::info!(
                port = self.config.server.port,
                health_port = self.config.health.port,
                "facade starting"
            );
        }

        let mock_addr = format!("0.0.0.0:{}", self.config.server.port);
        let mut mock_service = http_proxy_service(&server.configuration, MockProxy::new(self.service.clone()));
        mock_service.add_tcp(&mock_addr);
        server.add_service(mock_service);

        let health_addr = format!("0.0.0.0:{}", self.config.health.port);
        let mut health_service = http_proxy_service(&server.configuration, HealthProxy);
        health_service.add_tcp(&health_addr);
        server.add_service(health_service);

        tracing::info!(addr = %mock_addr, health_addr = %health_addr, "listening");

        server.run_forever();
    }
}

pub struct FacadeBuilder {
    config: FacadeConfig,
    delayer: Option<Arc<dyn Delayer>>,
}

impl FacadeBuilder {
    pub fn new(config: FacadeConfig) -> Self {
        Self { config, delayer: None }
    }

    pub fn from_paths(config_paths: &[String]) -> Result<Self, FacadeError> {
        let config = load_config(config_paths)?;
        Ok(Self::new(config))
    }

    /// Overrides the delayer implementation (tests may want a no-op, or a
    /// future cancellation-aware delayer).
    pub fn with_delayer(mut self, delayer: Arc<dyn Delayer>) -> Self {
        self.delayer = Some(delayer);
        self
    }

    pub fn build(self) -> Result<Facade, FacadeError> {
        let load = facade_loader::load(&self.config.loader.path.mapping, &self.config.loader.path.response)?;
        let delayer = self.delayer.unwrap_or_else(|| Arc::new(ResponseDelayer::new()));
        let service = Arc::new(Service::new(load, delayer));

        Ok(Facade {
            config: self.config,
            service,
        })
    }
}
