//! Demo sign-in form. Any credentials are accepted.

use crate::live::sleep;
use crate::state::AppState;
use ctw_store::auth::{DEMO_EMAIL, DEMO_PASSWORD, LOGIN_DISPLAY_DELAY};
use dioxus::prelude::*;

#[component]
pub fn LoginForm() -> Element {
    let mut state = use_context::<AppState>();
    let mut email = use_signal(|| DEMO_EMAIL.to_string());
    let mut password = use_signal(|| DEMO_PASSWORD.to_string());
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: Event<FormData>| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        submitting.set(true);
        spawn(async move {
            sleep(LOGIN_DISPLAY_DELAY).await;
            if state.login(&email(), &password()) {
                state.notify("Signed in");
            }
            submitting.set(false);
        });
    };

    rsx! {
        form {
            style: "max-width: 360px; margin: 40px auto; padding: 24px; border-radius: 8px; box-shadow: 0 1px 4px rgba(0,0,0,0.15); display: flex; flex-direction: column; gap: 12px;",
            onsubmit: on_submit,
            h2 { style: "margin: 0;", "Nagpur CO₂ Digital Twin" }
            p {
                style: "margin: 0; font-size: 12px; color: #666;",
                "Demo credentials: {DEMO_EMAIL} / {DEMO_PASSWORD}"
            }
            input {
                r#type: "email",
                value: "{email}",
                oninput: move |evt| email.set(evt.value()),
            }
            input {
                r#type: "password",
                value: "{password}",
                oninput: move |evt| password.set(evt.value()),
            }
            button {
                r#type: "submit",
                disabled: submitting(),
                if submitting() { "Signing in..." } else { "Sign in" }
            }
        }
    }
}
