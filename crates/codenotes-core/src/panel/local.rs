//! In-process panel service.
//!
//! Creates the panel runtime in the same process, connected to the host by
//! the message channel. Whoever drives the UI reaches the live panel through
//! [`LocalPanelService::runtime_mut`].

use crate::channel::{message_channel, HostEndpoint};
use crate::host::{PanelService, PanelSpec};
use crate::models::Snapshot;
use crate::Result;

use super::runtime::PanelRuntime;

#[derive(Debug, Default)]
pub struct LocalPanelService {
    runtime: Option<PanelRuntime>,
    spec: Option<PanelSpec>,
    reveal_count: usize,
}

impl LocalPanelService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.runtime.is_some()
    }

    #[must_use]
    pub const fn runtime(&self) -> Option<&PanelRuntime> {
        self.runtime.as_ref()
    }

    pub fn runtime_mut(&mut self) -> Option<&mut PanelRuntime> {
        self.runtime.as_mut()
    }

    /// Options the current panel was created with
    #[must_use]
    pub const fn spec(&self) -> Option<&PanelSpec> {
        self.spec.as_ref()
    }

    /// How many times the host brought the panel forward
    #[must_use]
    pub const fn reveal_count(&self) -> usize {
        self.reveal_count
    }

    /// Close the panel as the user would; the host hears about it through
    /// the channel. Returns whether a panel was open.
    pub fn close_by_user(&mut self) -> bool {
        match self.runtime.take() {
            Some(runtime) => {
                runtime.close();
                self.spec = None;
                true
            }
            None => false,
        }
    }
}

impl PanelService for LocalPanelService {
    fn create(&mut self, spec: &PanelSpec, initial: Snapshot) -> Result<HostEndpoint> {
        let (host_end, panel_end) = message_channel();
        self.runtime = Some(PanelRuntime::new(initial, panel_end));
        self.spec = Some(spec.clone());
        tracing::debug!("Created panel '{}'", spec.title);
        Ok(host_end)
    }

    fn reveal(&mut self) {
        if self.runtime.is_some() {
            self.reveal_count += 1;
        }
    }

    fn dispose(&mut self) {
        self.runtime = None;
        self.spec = None;
    }
}
