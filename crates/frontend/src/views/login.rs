use super::validation;
use crate::app::AppRoute;
use crate::auth::use_session;
use crate::components::{TextField, ThemeToggle};
use fastadmin_http::types::LoginForm;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let context = use_session();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let submitted = use_state(|| false);
    let submitting = use_state(|| false);

    // Editing the form dismisses the last login failure.
    let edit = |field: UseStateHandle<String>| {
        let session = context.session.clone();
        Callback::from(move |value: String| {
            if session.error().is_some() {
                session.reset_error();
            }
            field.set(value);
        })
    };
    let on_email = edit(email.clone());
    let on_password = edit(password.clone());

    let email_error = validation::email(&email);
    let password_error = password.is_empty().then_some(validation::PASSWORD_REQUIRED);

    let onsubmit = {
        let session = context.session.clone();
        let email = email.clone();
        let password = password.clone();
        let submitted = submitted.clone();
        let submitting = submitting.clone();
        let valid = email_error.is_none() && password_error.is_none();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submitted.set(true);
            if !valid || *submitting {
                return;
            }
            let session = session.clone();
            let form = LoginForm::new(email.trim(), (*password).clone());
            let submitting = submitting.clone();
            submitting.set(true);
            spawn_local(async move {
                session.login(form).await;
                submitting.set(false);
            });
        })
    };

    let shown = |error: Option<&'static str>| error.filter(|_| *submitted).map(AttrValue::Static);

    html! {
        <>
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"Log in"}</h1>
                <ThemeToggle />
            </div>
            <form {onsubmit} novalidate=true>
                <TextField label="Email" input_type="email" value={(*email).clone()} oninput={on_email} required=true error={shown(email_error)} />
                <TextField label="Password" input_type="password" value={(*password).clone()} oninput={on_password} required=true error={shown(password_error)} />
                if let Some(error) = &context.state.error {
                    <p class="mb-4 text-sm text-red-600 dark:text-red-400">{ error.clone() }</p>
                }
                <div class="mb-4 text-right">
                    <Link<AppRoute> to={AppRoute::RecoverPassword} classes={classes!("text-sm", "text-blue-600", "dark:text-blue-400")}>
                        {"Forgot Password?"}
                    </Link<AppRoute>>
                </div>
                <button type="submit" disabled={*submitting} class="w-full py-2 px-4 rounded-md text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50">
                    { if *submitting { "Logging in..." } else { "Log In" } }
                </button>
            </form>
            <p class="mt-6 text-center text-sm text-gray-600 dark:text-gray-400">
                {"Don't have an account? "}
                <Link<AppRoute> to={AppRoute::Signup} classes={classes!("text-blue-600", "dark:text-blue-400")}>{"Sign up"}</Link<AppRoute>>
            </p>
        </>
    }
}
