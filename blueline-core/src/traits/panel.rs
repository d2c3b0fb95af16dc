//! Panel capability trait

use blueline_protocol::ControlEvent;

use crate::session::Responder;

/// Trait for the application behind a remote panel.
///
/// The session holds a panel and calls into it as validated commands
/// arrive. `state` and `event` default to no-ops so a panel only implements
/// what it reacts to.
pub trait Panel {
    /// Layout description reported verbatim to `LAYOUT` queries.
    ///
    /// The string is opaque to the protocol layer; only the app parses it.
    fn layout(&self) -> &str;

    /// Report current control values.
    ///
    /// Called on a `STATE` query. Send one update per stateful control
    /// through `out`; the app uses them to refresh its view.
    fn state(&mut self, out: &mut Responder<'_>) {
        let _ = out;
    }

    /// Apply a control update sent by the app.
    fn event(&mut self, event: &ControlEvent<'_>) {
        let _ = event;
    }
}
