//! The panel side of the channel: engine plus message endpoint.

use crate::channel::PanelEndpoint;
use crate::models::Snapshot;
use crate::Result;

use super::engine::{Applied, PanelAction, PanelEngine};
use super::markup::render_document;
use super::view::PanelView;

/// A live panel instance.
///
/// It can only reach the host by posting messages; it never sees the store or
/// the editor.
#[derive(Debug)]
pub struct PanelRuntime {
    engine: PanelEngine,
    endpoint: PanelEndpoint,
}

impl PanelRuntime {
    #[must_use]
    pub fn new(initial: Snapshot, endpoint: PanelEndpoint) -> Self {
        Self {
            engine: PanelEngine::new(initial),
            endpoint,
        }
    }

    /// Apply every host message queued so far
    pub fn sync_inbound(&mut self) -> Applied {
        let mut combined = Applied::default();
        while let Some(message) = self.endpoint.try_next() {
            let applied = self.engine.receive(message);
            for region in applied.rendered {
                if !combined.rendered.contains(&region) {
                    combined.rendered.push(region);
                }
            }
        }
        combined
    }

    /// Handle one user interaction.
    ///
    /// Queued host messages are applied first, so the action sees the latest
    /// pushed snapshot.
    pub fn dispatch(&mut self, action: PanelAction) -> Result<Applied> {
        self.sync_inbound();
        let applied = self.engine.apply(action);
        if let Some(message) = &applied.message {
            tracing::debug!("Panel posting {}", message.command());
            self.endpoint.post(message.clone())?;
        }
        Ok(applied)
    }

    #[must_use]
    pub const fn engine(&self) -> &PanelEngine {
        &self.engine
    }

    #[must_use]
    pub fn view(&self) -> PanelView {
        self.engine.view()
    }

    #[must_use]
    pub fn markup(&self) -> String {
        render_document(&self.engine.view())
    }

    /// Close the panel from its own side
    pub fn close(self) {
        self.endpoint.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{message_channel, PanelEvent};
    use crate::models::Note;
    use crate::panel::{InputField, Region};
    use crate::protocol::{HostMessage, PanelMessage};

    #[test]
    fn dispatch_posts_save_to_host() {
        let (mut host, panel) = message_channel();
        let mut runtime = PanelRuntime::new(Snapshot::default(), panel);

        runtime
            .dispatch(PanelAction::Input {
                field: InputField::NewPersonalNote,
                text: "buy milk".to_string(),
            })
            .unwrap();
        runtime.dispatch(PanelAction::AddPersonalNote).unwrap();

        let Some(PanelEvent::Message(PanelMessage::SaveNotes { notes, .. })) = host.try_next()
        else {
            panic!("expected saveNotes");
        };
        assert_eq!(notes[0].text, "buy milk");
        assert_eq!(host.try_next(), None);
    }

    #[test]
    fn inbound_updates_apply_before_next_action() {
        let (host, panel) = message_channel();
        let mut runtime = PanelRuntime::new(Snapshot::default(), panel);

        let pushed = Snapshot::new(vec![Note::personal("from host")], Vec::new());
        host.post(HostMessage::update(&pushed)).unwrap();
        host.post(HostMessage::update(&pushed)).unwrap();

        let applied = runtime.sync_inbound();
        assert_eq!(applied.rendered, Region::ALL.to_vec());
        assert_eq!(runtime.engine().snapshot(), &pushed);
        assert!(runtime.markup().contains("from host"));
    }

    #[test]
    fn close_notifies_host() {
        let (mut host, panel) = message_channel();
        PanelRuntime::new(Snapshot::default(), panel).close();
        assert_eq!(host.try_next(), Some(PanelEvent::Disposed));
    }
}
