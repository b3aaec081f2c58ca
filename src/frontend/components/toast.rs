//! Renders the notification queue.

use crate::frontend::services::toast::{ToastKind, use_toasts};
use dioxus::prelude::*;

#[component]
pub fn ToastHost() -> Element {
    let toasts = use_toasts();
    let queue = toasts.queue.read().toasts().to_vec();

    rsx! {
        div {
            class: "toast-host",
            for toast in queue {
                div {
                    key: "{toast.id}",
                    class: match toast.kind {
                        ToastKind::Error => "toast toast-error",
                    },
                    role: "alert",
                    onclick: move |_| toasts.dismiss(toast.id),
                    "{toast.message}"
                }
            }
        }
    }
}
