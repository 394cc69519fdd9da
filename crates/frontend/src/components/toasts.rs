//! Transient notification stack

use crate::services::ToastSink;
use fastadmin_session::{Severity, Toast};
use gloo::timers::callback::Timeout;
use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;

/// How long a toast stays on screen
const TOAST_MILLIS: u32 = 5_000;

#[derive(Clone, PartialEq)]
struct Entry {
    id: u64,
    toast: Toast,
}

#[derive(Default, PartialEq)]
struct Stack {
    entries: Vec<Entry>,
}

enum StackAction {
    Push(Entry),
    Dismiss(u64),
}

impl Reducible for Stack {
    type Action = StackAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut entries = self.entries.clone();
        match action {
            StackAction::Push(entry) => entries.push(entry),
            StackAction::Dismiss(id) => entries.retain(|entry| entry.id != id),
        }
        Rc::new(Self { entries })
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub sink: ToastSink,
}

/// Renders toasts published to `sink`; each dismisses itself after a few seconds
#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    let stack = use_reducer(Stack::default);

    {
        let stack = stack.clone();
        use_effect_with(props.sink.clone(), move |sink| {
            let next_id = Cell::new(0u64);
            let subscription = sink.subscribe(move |toast| {
                let id = next_id.replace(next_id.get() + 1);
                stack.dispatch(StackAction::Push(Entry {
                    id,
                    toast: toast.clone(),
                }));
                let stack = stack.clone();
                Timeout::new(TOAST_MILLIS, move || {
                    stack.dispatch(StackAction::Dismiss(id));
                })
                .forget();
            });
            move || drop(subscription)
        });
    }

    html! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 w-80">
            { for stack.entries.iter().map(|entry| {
                let onclick = {
                    let stack = stack.clone();
                    let id = entry.id;
                    Callback::from(move |_: MouseEvent| stack.dispatch(StackAction::Dismiss(id)))
                };
                let tone = match entry.toast.severity {
                    Severity::Success => "border-green-500",
                    Severity::Error => "border-red-500",
                };
                html! {
                    <div key={entry.id} {onclick} class={classes!("p-4", "rounded-md", "shadow-lg", "border-l-4", "bg-white", "dark:bg-gray-800", "cursor-pointer", tone)}>
                        <p class="font-medium text-gray-900 dark:text-white">{ entry.toast.title.clone() }</p>
                        <p class="text-sm text-gray-600 dark:text-gray-400">{ entry.toast.description.clone() }</p>
                    </div>
                }
            }) }
        </div>
    }
}
