use super::validation;
use crate::auth::use_session;
use crate::components::TextField;
use fastadmin_http::types::NewPassword;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// `token` from the query string of the recovery link
fn token_from_location() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "token")
        .map(|(_, value)| value.to_string())
        .filter(|token| !token.is_empty())
}

#[function_component(ResetPasswordPage)]
pub fn reset_password_page() -> Html {
    let context = use_session();
    let token = use_memo((), |()| token_from_location());
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let submitted = use_state(|| false);
    let submitting = use_state(|| false);

    let set = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |value: String| field.set(value))
    };

    let password_error = validation::password(&password);
    let confirm_error = validation::confirm_password(&password, &confirm);

    let onsubmit = {
        let session = context.session.clone();
        let token = (*token).clone();
        let new_password = (*password).clone();
        let submitted = submitted.clone();
        let submitting = submitting.clone();
        let valid = password_error.is_none() && confirm_error.is_none();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submitted.set(true);
            let Some(token) = token.clone() else {
                return;
            };
            if !valid || *submitting {
                return;
            }
            let session = session.clone();
            let body = NewPassword {
                token,
                new_password: new_password.clone(),
            };
            let submitting = submitting.clone();
            submitting.set(true);
            spawn_local(async move {
                session.reset_password(body).await;
                submitting.set(false);
            });
        })
    };

    let shown = |error: Option<&'static str>| error.filter(|_| *submitted).map(AttrValue::Static);

    html! {
        <>
            <h1 class="text-2xl font-bold mb-2 text-gray-900 dark:text-white">{"Reset Password"}</h1>
            if token.is_none() {
                <p class="mb-4 text-sm text-red-600 dark:text-red-400">
                    {"This link has no reset token. Request a new recovery email."}
                </p>
            }
            <form {onsubmit} novalidate=true>
                <TextField label="New Password" input_type="password" value={(*password).clone()} oninput={set(&password)} required=true error={shown(password_error)} />
                <TextField label="Confirm Password" input_type="password" value={(*confirm).clone()} oninput={set(&confirm)} required=true error={shown(confirm_error)} />
                <button type="submit" disabled={*submitting || token.is_none()} class="w-full py-2 px-4 rounded-md text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-50">
                    {"Reset Password"}
                </button>
            </form>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn no_token_on_a_plain_page() {
        // The test runner page carries no `token` parameter.
        assert_eq!(token_from_location(), None);
    }
}
