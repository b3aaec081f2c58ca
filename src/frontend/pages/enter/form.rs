use crate::backend::utils::debounce::Debouncer;
use crate::frontend::services::context::{AuthState, Backend};
use crate::frontend::services::toast::use_toasts;
use crate::frontend::services::username::{
    CHECK_DELAY, UsernameDraft, UsernameStatus, claim_username, debounced_check,
};
use dioxus::prelude::*;

#[component]
pub fn UsernameForm() -> Element {
    let backend = use_context::<Backend>();
    let auth = use_context::<AuthState>();
    let toasts = use_toasts();
    let mut draft = use_signal(UsernameDraft::default);
    let debouncer = use_hook(|| Debouncer::new(CHECK_DELAY));

    let on_change = {
        let backend = backend.clone();
        move |e: FormEvent| {
            let Some(candidate) = draft.write().on_change(&e.value()) else {
                return;
            };
            let backend = backend.clone();
            let debouncer = debouncer.clone();
            spawn(async move {
                match debounced_check(&debouncer, backend.store.as_ref(), &candidate).await {
                    Some(Ok(exists)) => {
                        draft.write().apply_check(&candidate, exists);
                    }
                    Some(Err(e)) => {
                        draft.write().abandon_check(&candidate);
                        toasts.error(e.to_string());
                    }
                    None => {}
                }
            });
        }
    };

    let on_submit = move |e: FormEvent| {
        e.prevent_default();
        let Some(user) = auth.user.read().clone() else {
            return;
        };
        if !draft.read().can_submit() {
            return;
        }
        let username = draft.read().text().to_string();
        let backend = backend.clone();
        let mut auth = auth;
        spawn(async move {
            match claim_username(backend.store.as_ref(), &user, &username).await {
                Ok(()) => auth.username.set(Some(username)),
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    // Nothing to choose once the profile has a username
    if auth.username.read().is_some() {
        return rsx! {};
    }

    let state = draft.read().clone();
    let text = state.text().to_string();
    let loading = state.is_loading();
    let valid = state.is_valid();

    rsx! {
        section {
            class: "username-section",
            h3 { "Choose Username" }
            form {
                onsubmit: on_submit,
                input {
                    r#type: "text",
                    name: "username",
                    placeholder: "username",
                    value: "{text}",
                    oninput: on_change,
                }
                UsernameMessage {
                    username: text.clone(),
                    is_valid: valid,
                    loading,
                }
                button {
                    r#type: "submit",
                    class: "btn-green",
                    disabled: !state.can_submit(),
                    "Choose"
                }
                h3 { "Debug State" }
                div {
                    class: "debug-state",
                    "Username: {text}"
                    br {}
                    "Loading: {loading}"
                    br {}
                    "Username Valid: {valid}"
                }
            }
        }
    }
}

#[component]
fn UsernameMessage(username: String, is_valid: bool, loading: bool) -> Element {
    let status = UsernameStatus::from_flags(&username, is_valid, loading);
    let message = status.message(&username);

    rsx! {
        p { class: status.class(), "{message}" }
    }
}
