//! Root wiring: one configuration per application, shared by every service.
//!
//! # Design
//! `ApiModule` is an explicitly passed context rather than a global. It holds
//! at most one root `Configuration`, produced by the factory given to
//! `for_root`; a second root registration fails with
//! `ModuleError::AlreadyLoaded`. Independent modules do not interact, so tests
//! can build as many as they like.

use std::sync::{Arc, OnceLock};

use crate::client::{GradeControllerClient, GradeControllerService};
use crate::configuration::Configuration;
use crate::error::ModuleError;
use crate::http::HttpTransport;

#[derive(Debug, Default)]
pub struct ApiModule {
    configuration: OnceLock<Arc<Configuration>>,
}

impl ApiModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the root configuration. The factory runs only when the module
    /// has no configuration yet.
    pub fn for_root<F>(&self, factory: F) -> Result<Arc<Configuration>, ModuleError>
    where
        F: FnOnce() -> Configuration,
    {
        if self.configuration.get().is_some() {
            return Err(ModuleError::AlreadyLoaded);
        }
        let configuration = Arc::new(factory());
        self.configuration
            .set(Arc::clone(&configuration))
            .map_err(|_| ModuleError::AlreadyLoaded)?;
        log::debug!("root configuration registered: {configuration:?}");
        Ok(configuration)
    }

    pub fn configuration(&self) -> Result<Arc<Configuration>, ModuleError> {
        self.configuration.get().cloned().ok_or(ModuleError::NotLoaded)
    }

    /// Build the grade controller on top of the root configuration.
    pub fn grade_controller<T: HttpTransport>(
        &self,
        transport: Option<T>,
    ) -> Result<GradeControllerService<T>, ModuleError> {
        let transport = transport.ok_or(ModuleError::MissingTransport)?;
        let client = GradeControllerClient::new(self.configuration()?);
        Ok(GradeControllerService::new(client, transport))
    }
}
