//! Host adapter for the panel indicator
//!
//! Maps the host's enable/disable lifecycle hooks onto an explicit
//! [`UpdateController`] instance. The host owns the `PriceIndicator`; there is
//! no process-wide instance.

use crate::{
    controller::{ControllerConfig, UpdateController},
    display::DisplaySurface,
    provider::PriceFetcher,
    types::ControllerStatus,
};
use std::sync::Arc;

/// Panel indicator showing live crypto prices
pub struct PriceIndicator {
    fetcher: Arc<dyn PriceFetcher>,
    display: Arc<dyn DisplaySurface>,
    config: ControllerConfig,
    controller: Option<UpdateController>,
}

impl PriceIndicator {
    pub fn new(fetcher: Arc<dyn PriceFetcher>, display: Arc<dyn DisplaySurface>) -> Self {
        Self::with_config(fetcher, display, ControllerConfig::default())
    }

    pub fn with_config(
        fetcher: Arc<dyn PriceFetcher>,
        display: Arc<dyn DisplaySurface>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            fetcher,
            display,
            config,
            controller: None,
        }
    }

    /// Start hook: begins updating the display
    ///
    /// Does nothing if already enabled.
    pub fn enable(&mut self) {
        if self.controller.is_some() {
            tracing::debug!("Crypto price indicator already enabled");
            return;
        }

        tracing::info!("Enabling crypto price indicator");
        self.controller = Some(UpdateController::start_with_config(
            self.fetcher.clone(),
            self.display.clone(),
            self.config.clone(),
        ));
    }

    /// Stop hook: cancels all timers and any in-flight fetch
    ///
    /// Does nothing if not enabled.
    pub fn disable(&mut self) {
        if let Some(controller) = self.controller.take() {
            tracing::info!("Disabling crypto price indicator");
            controller.shutdown();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.controller.is_some()
    }

    /// Status of the running controller, if enabled
    pub fn status(&self) -> Option<ControllerStatus> {
        self.controller.as_ref().map(UpdateController::status)
    }

    /// Asks the running controller for an immediate cycle
    pub fn refresh_now(&self) {
        if let Some(controller) = &self.controller {
            controller.refresh_now();
        }
    }
}
