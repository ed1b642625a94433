//! Components that react to named events.

use anyhow::Result;

use crate::renderer::Renderer;

/// Handles named application events.
///
/// Every subscriber sees every event; the name decides whether it cares.
/// The renderer gives access to the panels and views for the duration of
/// the call. Returning an error stops delivery to later subscribers.
pub trait Subscriber {
    fn on(&mut self, event: &str, ui: &mut Renderer<'_>) -> Result<()>;
}

impl<F> Subscriber for F
where
    F: FnMut(&str, &mut Renderer<'_>) -> Result<()>,
{
    fn on(&mut self, event: &str, ui: &mut Renderer<'_>) -> Result<()> {
        self(event, ui)
    }
}
