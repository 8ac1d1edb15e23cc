//! Intents the rendering layer forwards to the session controller.

mod intents;

pub use intents::Intent;
