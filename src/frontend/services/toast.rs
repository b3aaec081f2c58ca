//! Transient notifications.

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use std::time::Duration;

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Handle to the notification surface, shared through context.
#[derive(Clone, Copy)]
pub struct Toasts {
    pub queue: Signal<ToastQueue>,
}

impl Toasts {
    /// Shows `message` as an error and schedules its removal.
    ///
    /// The removal task belongs to the root scope, so it outlives the
    /// component that reported the error.
    pub fn error(self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        let mut queue = self.queue;
        let id = queue.write().push(ToastKind::Error, message);
        spawn_forever(async move {
            tokio::time::sleep(TOAST_LIFETIME).await;
            queue.write().dismiss(id);
        });
    }

    pub fn dismiss(mut self, id: u64) {
        self.queue.write().dismiss(id);
    }
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_push_assigns_distinct_ids() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastKind::Error, "first");
        let b = queue.push(ToastKind::Error, "second");

        assert_ne!(a, b);
        assert_eq!(queue.toasts().len(), 2);
        assert_eq!(queue.toasts()[0].message, "first");
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastKind::Error, "first");
        let b = queue.push(ToastKind::Error, "second");

        queue.dismiss(a);
        queue.dismiss(a);

        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].id, b);
    }

    /// Queue lengths seen by the host, one entry per render.
    #[derive(Clone, Default)]
    struct Lengths(Rc<RefCell<Vec<usize>>>);

    #[component]
    fn Host() -> Element {
        let queue = use_signal(ToastQueue::default);
        let toasts = use_context_provider(|| Toasts { queue });
        let shown = use_signal(|| true);
        let len = toasts.queue.read().toasts().len();
        use_context::<Lengths>().0.borrow_mut().push(len);

        if shown() {
            rsx! { Reporter { shown } }
        } else {
            rsx! {}
        }
    }

    /// Reports an error, then removes itself from the tree.
    #[component]
    fn Reporter(shown: Signal<bool>) -> Element {
        let toasts = use_toasts();
        use_hook(move || {
            let mut shown = shown;
            spawn(async move {
                toasts.error("Network error");
                shown.set(false);
            });
        });
        rsx! {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_reporter_unmounts() {
        let lengths = Lengths::default();
        let mut dom = VirtualDom::new(Host).with_root_context(lengths.clone());
        dom.rebuild_in_place();
        for _ in 0..60 {
            let _ = tokio::time::timeout(Duration::from_millis(100), dom.wait_for_work()).await;
            dom.render_immediate_to_vec();
        }

        let lengths = lengths.0.borrow();
        assert!(lengths.contains(&1));
        assert_eq!(lengths.last(), Some(&0));
    }
}
