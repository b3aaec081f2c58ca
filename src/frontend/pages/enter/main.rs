use super::form::UsernameForm;
use crate::backend::identity::AuthUser;
use crate::backend::utils::resources::ResourceLoader;
use crate::frontend::services::context::{AuthState, Backend};
use crate::frontend::services::toast::use_toasts;
use dioxus::prelude::*;

/// Which control the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterView {
    SignIn,
    ChooseUsername,
    SignOut,
}

impl EnterView {
    pub fn select(user: Option<&AuthUser>, username: Option<&str>) -> Self {
        match (user, username) {
            (None, _) => Self::SignIn,
            (Some(_), None) => Self::ChooseUsername,
            (Some(_), Some(_)) => Self::SignOut,
        }
    }
}

#[component]
pub fn Enter() -> Element {
    let auth = use_context::<AuthState>();
    let view = EnterView::select(auth.user.read().as_ref(), auth.username.read().as_deref());

    let content = match view {
        EnterView::SignIn => rsx! { SignInButton {} },
        EnterView::ChooseUsername => rsx! { UsernameForm {} },
        EnterView::SignOut => rsx! { SignOutButton {} },
    };

    rsx! {
        main { {content} }
    }
}

#[component]
fn SignInButton() -> Element {
    let backend = use_context::<Backend>();
    let mut auth = use_context::<AuthState>();
    let toasts = use_toasts();
    let google = ResourceLoader::get_asset("google");

    let sign_in_with_google = move |_| {
        let backend = backend.clone();
        spawn(async move {
            if let Err(e) = auth.sign_in(&backend).await {
                toasts.error(e.to_string());
            }
        });
    };

    rsx! {
        button {
            class: "btn-google",
            onclick: sign_in_with_google,
            img { src: "{google}", alt: "google logo" }
            "Sign in with Google"
        }
    }
}

#[component]
fn SignOutButton() -> Element {
    let backend = use_context::<Backend>();
    let mut auth = use_context::<AuthState>();
    let toasts = use_toasts();

    let sign_out = move |_| {
        let backend = backend.clone();
        spawn(async move {
            if let Err(e) = auth.sign_out(&backend).await {
                toasts.error(e.to_string());
            }
        });
    };

    rsx! {
        button { onclick: sign_out, "Sign Out" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            uid: "u-1".to_string(),
            display_name: None,
            photo_url: None,
            email: None,
        }
    }

    #[test]
    fn test_no_user_shows_sign_in() {
        assert_eq!(EnterView::select(None, None), EnterView::SignIn);
        assert_eq!(EnterView::select(None, Some("bob")), EnterView::SignIn);
    }

    #[test]
    fn test_user_without_username_chooses_one() {
        assert_eq!(EnterView::select(Some(&user()), None), EnterView::ChooseUsername);
    }

    #[test]
    fn test_existing_username_never_shows_form() {
        for _ in 0..3 {
            assert_eq!(EnterView::select(Some(&user()), Some("bob")), EnterView::SignOut);
        }
    }
}
