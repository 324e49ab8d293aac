//! Ordered, fire-and-forget message channel between host and panel.
//!
//! One unbounded queue per direction. Sends never block and carry no
//! acknowledgment; each side drains its own queue in send order.

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::error::{Error, Result};
use crate::protocol::{HostMessage, PanelMessage};

/// What the host can receive from a panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    Message(PanelMessage),
    /// The panel was closed on its own side
    Disposed,
}

/// Create a connected pair of endpoints
pub fn message_channel() -> (HostEndpoint, PanelEndpoint) {
    let (to_panel, from_host) = mpsc::unbounded_channel();
    let (to_host, from_panel) = mpsc::unbounded_channel();
    (
        HostEndpoint {
            outbound: to_panel,
            inbound: from_panel,
        },
        PanelEndpoint {
            outbound: to_host,
            inbound: from_host,
        },
    )
}

/// The host's end of the channel
#[derive(Debug)]
pub struct HostEndpoint {
    outbound: UnboundedSender<HostMessage>,
    inbound: UnboundedReceiver<PanelEvent>,
}

impl HostEndpoint {
    /// Post a message to the panel
    pub fn post(&self, message: HostMessage) -> Result<()> {
        self.outbound.send(message).map_err(|_| Error::PanelClosed)
    }

    /// Next queued event without waiting
    ///
    /// A panel side that went away without a dispose notification reads as
    /// [`PanelEvent::Disposed`].
    pub fn try_next(&mut self) -> Option<PanelEvent> {
        match self.inbound.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(PanelEvent::Disposed),
        }
    }

    /// Wait for the next event
    pub async fn next(&mut self) -> PanelEvent {
        self.inbound.recv().await.unwrap_or(PanelEvent::Disposed)
    }
}

/// The panel's end of the channel
#[derive(Debug)]
pub struct PanelEndpoint {
    outbound: UnboundedSender<PanelEvent>,
    inbound: UnboundedReceiver<HostMessage>,
}

impl PanelEndpoint {
    /// Post a message to the host
    pub fn post(&self, message: PanelMessage) -> Result<()> {
        self.outbound
            .send(PanelEvent::Message(message))
            .map_err(|_| Error::PanelClosed)
    }

    /// Next queued host message without waiting
    pub fn try_next(&mut self) -> Option<HostMessage> {
        self.inbound.try_recv().ok()
    }

    /// Notify the host that the panel is gone
    pub fn dispose(self) {
        let _ = self.outbound.send(PanelEvent::Disposed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Note, Snapshot};

    #[test]
    fn messages_arrive_in_send_order() {
        let (mut host, panel) = message_channel();
        panel.post(PanelMessage::go_to_line("/a.ts", 1)).unwrap();
        panel.post(PanelMessage::go_to_line("/b.ts", 2)).unwrap();

        assert_eq!(
            host.try_next(),
            Some(PanelEvent::Message(PanelMessage::go_to_line("/a.ts", 1)))
        );
        assert_eq!(
            host.try_next(),
            Some(PanelEvent::Message(PanelMessage::go_to_line("/b.ts", 2)))
        );
        assert_eq!(host.try_next(), None);
    }

    #[test]
    fn dropped_panel_reads_as_disposed() {
        let (mut host, panel) = message_channel();
        drop(panel);
        assert_eq!(host.try_next(), Some(PanelEvent::Disposed));
        assert!(host.post(HostMessage::update(&Snapshot::default())).is_err());
    }

    #[test]
    fn host_messages_reach_panel() {
        let (host, mut panel) = message_channel();
        let snapshot = Snapshot::new(vec![Note::personal("buy milk")], Vec::new());
        host.post(HostMessage::update(&snapshot)).unwrap();

        let received = panel.try_next().unwrap();
        assert_eq!(received.into_snapshot(), snapshot);
        assert!(panel.try_next().is_none());
    }

    #[tokio::test]
    async fn next_waits_for_dispose() {
        let (mut host, panel) = message_channel();
        panel.dispose();
        assert_eq!(host.next().await, PanelEvent::Disposed);
    }
}
