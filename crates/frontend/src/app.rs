use crate::auth::{SessionProvider, use_session};
use crate::components::{Navbar, ToastStack};
use crate::services::ToastSink;
use crate::theme::ThemeProvider;
use crate::views::{
    AdminPage, Dashboard, ItemsPage, LoginPage, NotFoundPage, RecoverPasswordPage,
    ResetPasswordPage, SettingsPage, SignupPage,
};
use fastadmin_core::AppConfig;
use fastadmin_session::{GuardDecision, Route};
use yew::prelude::*;
use yew_router::prelude::*;

/// Router table; mirrors [`Route`]
#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum AppRoute {
    #[at("/")]
    Home,
    #[at("/admin")]
    Admin,
    #[at("/items")]
    Items,
    #[at("/settings")]
    Settings,
    #[at("/settings/:tab")]
    SettingsTab { tab: String },
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/recover-password")]
    RecoverPassword,
    #[at("/reset-password")]
    ResetPassword,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<&AppRoute> for Route {
    fn from(route: &AppRoute) -> Self {
        match route {
            AppRoute::Home => Self::Home,
            AppRoute::Admin => Self::Admin,
            AppRoute::Items => Self::Items,
            AppRoute::Settings => Self::Settings { tab: None },
            AppRoute::SettingsTab { tab } => Self::Settings {
                tab: Some(tab.clone()),
            },
            AppRoute::Login => Self::Login,
            AppRoute::Signup => Self::Signup,
            AppRoute::RecoverPassword => Self::RecoverPassword,
            AppRoute::ResetPassword => Self::ResetPassword,
            AppRoute::NotFound => Self::NotFound,
        }
    }
}

impl From<Route> for AppRoute {
    fn from(route: Route) -> Self {
        match route {
            Route::Home => Self::Home,
            Route::Admin => Self::Admin,
            Route::Items => Self::Items,
            Route::Settings { tab: None } => Self::Settings,
            Route::Settings { tab: Some(tab) } => Self::SettingsTab { tab },
            Route::Login => Self::Login,
            Route::Signup => Self::Signup,
            Route::RecoverPassword => Self::RecoverPassword,
            Route::ResetPassword => Self::ResetPassword,
            Route::NotFound => Self::NotFound,
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct AppProps {
    pub config: AppConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let toasts = use_memo((), |()| ToastSink::new());

    html! {
        <BrowserRouter>
            <ThemeProvider>
                <SessionProvider config={props.config.clone()} toasts={(*toasts).clone()}>
                    <ToastStack sink={(*toasts).clone()} />
                    <Switch<AppRoute> render={switch} />
                </SessionProvider>
            </ThemeProvider>
        </BrowserRouter>
    }
}

fn switch(route: AppRoute) -> Html {
    html! { <Guarded route={route} /> }
}

#[derive(Properties, PartialEq)]
struct GuardedProps {
    route: AppRoute,
}

/// Runs the route guard before rendering a page
#[function_component(Guarded)]
fn guarded(props: &GuardedProps) -> Html {
    let context = use_session();
    let target = Route::from(&props.route);

    match context.session.guard().check(&target) {
        GuardDecision::Redirect(to) => html! { <Redirect<AppRoute> to={AppRoute::from(to)} /> },
        GuardDecision::Proceed if target.requires_auth() => html! {
            <div class="min-h-screen bg-gray-50 dark:bg-gray-900">
                <Navbar />
                <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                    { page(&props.route) }
                </main>
            </div>
        },
        GuardDecision::Proceed => html! {
            <div class="min-h-screen bg-gray-50 dark:bg-gray-900 flex items-center justify-center px-4">
                <div class="max-w-md w-full bg-white dark:bg-gray-800 rounded-lg shadow-lg p-8">
                    { page(&props.route) }
                </div>
            </div>
        },
    }
}

fn page(route: &AppRoute) -> Html {
    match route {
        AppRoute::Home => html! { <Dashboard /> },
        AppRoute::Admin => html! { <AdminPage /> },
        AppRoute::Items => html! { <ItemsPage /> },
        AppRoute::Settings => html! { <SettingsPage tab={None::<AttrValue>} /> },
        AppRoute::SettingsTab { tab } => html! { <SettingsPage tab={Some(AttrValue::from(tab.clone()))} /> },
        AppRoute::Login => html! { <LoginPage /> },
        AppRoute::Signup => html! { <SignupPage /> },
        AppRoute::RecoverPassword => html! { <RecoverPasswordPage /> },
        AppRoute::ResetPassword => html! { <ResetPasswordPage /> },
        AppRoute::NotFound => html! { <NotFoundPage /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn router_paths_match_session_routes() {
        for route in [
            AppRoute::Home,
            AppRoute::Admin,
            AppRoute::Items,
            AppRoute::Settings,
            AppRoute::SettingsTab {
                tab: "password".into(),
            },
            AppRoute::Login,
            AppRoute::Signup,
            AppRoute::RecoverPassword,
            AppRoute::ResetPassword,
            AppRoute::NotFound,
        ] {
            let session_route = Route::from(&route);
            assert_eq!(route.to_path(), session_route.path());
            assert_eq!(AppRoute::from(session_route), route);
        }
    }
}
