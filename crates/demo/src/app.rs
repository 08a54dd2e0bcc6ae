//! Demo page: a login/logout collaborator for the shared flag

use authflag_web::{use_auth_state, use_is_authenticated, AuthProvider, BrowserSessionStore};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <AuthProvider>
            <SessionPanel />
        </AuthProvider>
    }
}

#[function_component(SessionPanel)]
fn session_panel() -> Html {
    let state = use_auth_state();
    let authenticated = use_is_authenticated();

    let toggle = Callback::from(move |_: MouseEvent| {
        let next = !state.get();
        persist(next);
        state.set(next);
    });

    html! {
        <main>
            <p>{ if authenticated { "Signed in" } else { "Signed out" } }</p>
            <button onclick={toggle}>
                { if authenticated { "Log out" } else { "Log in" } }
            </button>
        </main>
    }
}

/// Keep the session key in step so a reload restores the flag
fn persist(authenticated: bool) {
    if let Err(e) =
        BrowserSessionStore::from_window().and_then(|store| store.set_flag(authenticated))
    {
        tracing::warn!(error = %e, "Failed to persist session flag");
    }
}
