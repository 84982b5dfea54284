//! # Locale Commands

use tracing::debug;

use till_core::Locale;

use crate::events::StateChange;
use crate::session::Session;

pub fn get_locale(session: &Session) -> Locale {
    session.locale().get()
}

/// Switches the UI language. Cart, history and catalog are untouched.
pub fn set_locale(session: &Session, locale: Locale) -> Locale {
    let previous = session.locale().set(locale);
    debug!(from = previous.code(), to = locale.code(), "set_locale command");

    if previous != locale {
        session.notify(StateChange::LocaleChanged);
    }
    locale
}
