mod controls;
mod keyboard;
mod pointer;

pub use controls::wire_controls;
pub use keyboard::wire_global_keydown;
pub use pointer::wire_pointer_handlers;

use crate::app::{App, AppHandle};

/// Run `f` on the app unless a handler further up the stack holds it.
pub(crate) fn with_app(app: &AppHandle, f: impl FnOnce(&mut App)) {
    match app.try_borrow_mut() {
        Ok(mut a) => f(&mut a),
        Err(_) => log::warn!("event dropped: app busy"),
    }
}
