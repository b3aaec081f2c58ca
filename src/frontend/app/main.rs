//! Application root and routing.

use crate::backend::utils::resources::ResourceLoader;
use crate::frontend::components::ToastHost;
use crate::frontend::pages::enter::Enter;
use crate::frontend::services::context::AuthState;
use crate::frontend::services::toast::{ToastQueue, Toasts};

use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

/// Main routing enum for the application.
#[derive(Clone, Routable, Debug, PartialEq, Eq)]
pub enum Route {
    /// Sign-in and username page, also the landing page.
    #[redirect("/", || Route::Enter {})]
    #[route("/enter")]
    Enter {},
}

#[component]
pub fn App() -> Element {
    let user = use_signal(|| None);
    let username = use_signal(|| None);
    let queue = use_signal(ToastQueue::default);
    use_context_provider(|| AuthState { user, username });
    use_context_provider(|| Toasts { queue });

    rsx! {
        style { dangerous_inner_html: ResourceLoader::get_app_css() }
        Router::<Route> {}
        ToastHost {}
    }
}
