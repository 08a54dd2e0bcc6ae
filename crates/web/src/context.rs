//! Authentication context provider and hooks

use crate::storage::detect_session_store;
use authflag_core::AuthState;
use yew::prelude::*;

/// Auth provider props
#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    /// State to share; built from the detected session store when absent
    #[prop_or_default]
    pub state: Option<AuthState>,
    pub children: Children,
}

/// Auth provider component
///
/// Holds the single [`AuthState`] for the page and hands it to descendants
/// through context.
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let state = use_memo(props.state.clone(), |provided| {
        resolve_state(provided.as_ref())
    });

    html! {
        <ContextProvider<AuthState> context={(*state).clone()}>
            {props.children.clone()}
        </ContextProvider<AuthState>>
    }
}

/// Use the state handed to the provider, or restore one from the host session
fn resolve_state(provided: Option<&AuthState>) -> AuthState {
    provided.cloned().unwrap_or_else(|| {
        let store = detect_session_store();
        AuthState::from_store(store.as_ref())
    })
}

/// Hook to get the shared auth state
#[hook]
pub fn use_auth_state() -> AuthState {
    use_context::<AuthState>()
        .expect("AuthState not found. Make sure to wrap your component with AuthProvider")
}

/// Hook to check if authenticated
///
/// Re-renders the calling component whenever the flag changes.
#[hook]
pub fn use_is_authenticated() -> bool {
    let state = use_auth_state();
    let authenticated = use_state_eq(|| state.get());

    {
        let setter = authenticated.setter();
        use_effect_with(state, move |state| {
            let subscription = state.subscribe(move |value| setter.set(value));
            move || subscription.unsubscribe()
        });
    }

    *authenticated
}
