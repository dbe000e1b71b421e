mod error;
mod events;
mod form;
mod keybindings;
mod loading;

pub use error::render_error;
pub use events::render_events;
pub use form::render_form;
pub use keybindings::render_keybindings;
pub use loading::render_loading;
