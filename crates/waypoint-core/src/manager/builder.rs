//! Builder for creating and configuring PlanManager instances.

use super::PlanManager;
use crate::observer::{LogObserver, PlanObserver};

/// Builder for creating and configuring PlanManager instances.
#[derive(Default)]
pub struct PlanManagerBuilder {
    observer: Option<Box<dyn PlanObserver>>,
}

impl PlanManagerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self { observer: None }
    }

    /// Sets the observer that receives every plan and step state change.
    ///
    /// If not specified, a [`LogObserver`] is used, which emits one
    /// `log::info!` line per event.
    pub fn with_observer(mut self, observer: impl PlanObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Builds the configured manager instance.
    pub fn build(self) -> PlanManager {
        PlanManager {
            current: None,
            history: Vec::new(),
            observer: self.observer.unwrap_or_else(|| Box::new(LogObserver)),
        }
    }
}
