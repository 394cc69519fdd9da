use super::validation;
use crate::app::AppRoute;
use crate::auth::use_session;
use crate::components::TextField;
use fastadmin_http::types::UserRegister;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(SignupPage)]
pub fn signup_page() -> Html {
    let context = use_session();
    let full_name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let submitted = use_state(|| false);
    let submitting = use_state(|| false);

    let set = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |value: String| field.set(value))
    };

    let full_name_error = validation::full_name(&full_name);
    let email_error = validation::email(&email);
    let password_error = validation::password(&password);
    let confirm_error = validation::confirm_password(&password, &confirm);
    let valid = full_name_error.is_none()
        && email_error.is_none()
        && password_error.is_none()
        && confirm_error.is_none();

    let onsubmit = {
        let session = context.session.clone();
        let body = UserRegister {
            email: email.trim().to_string(),
            password: (*password).clone(),
            full_name: validation::optional(&full_name),
        };
        let submitted = submitted.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submitted.set(true);
            if !valid || *submitting {
                return;
            }
            let session = session.clone();
            let body = body.clone();
            let submitting = submitting.clone();
            submitting.set(true);
            spawn_local(async move {
                session.sign_up(body).await;
                submitting.set(false);
            });
        })
    };

    let shown = |error: Option<&'static str>| error.filter(|_| *submitted).map(AttrValue::Static);

    html! {
        <>
            <h1 class="text-2xl font-bold mb-6 text-gray-900 dark:text-white">{"Sign up"}</h1>
            <form {onsubmit} novalidate=true>
                <TextField label="Full Name" value={(*full_name).clone()} oninput={set(&full_name)} error={shown(full_name_error)} />
                <TextField label="Email" input_type="email" value={(*email).clone()} oninput={set(&email)} required=true error={shown(email_error)} />
                <TextField label="Password" input_type="password" value={(*password).clone()} oninput={set(&password)} required=true error={shown(password_error)} />
                <TextField label="Confirm Password" input_type="password" value={(*confirm).clone()} oninput={set(&confirm)} required=true error={shown(confirm_error)} />
                <button type="submit" disabled={*submitting} class="w-full py-2 px-4 rounded-md text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50">
                    {"Sign Up"}
                </button>
            </form>
            <p class="mt-6 text-center text-sm text-gray-600 dark:text-gray-400">
                {"Already have an account? "}
                <Link<AppRoute> to={AppRoute::Login} classes={classes!("text-blue-600", "dark:text-blue-400")}>{"Log In"}</Link<AppRoute>>
            </p>
        </>
    }
}
