use crate::{
    components::error_alert::ErrorAlert, config::SIGNUP_REDIRECT_DELAY_MS,
    models::app_state::AppState, routes::MainRoute, session::use_session,
};
use gloo_timers::callback::Timeout;
use i18nrs::yew::use_translation;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_hooks::use_unmount;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

/// Redirect scheduled after a successful signup.
///
/// Once the view has unmounted nothing new can be scheduled, so a
/// registration that resolves late never navigates.
#[derive(Debug)]
struct PendingRedirect<T> {
    mounted: bool,
    timer: Option<T>,
}

impl<T> Default for PendingRedirect<T> {
    fn default() -> Self {
        Self {
            mounted: true,
            timer: None,
        }
    }
}

impl<T> PendingRedirect<T> {
    fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Replaces the pending timer with the one `schedule` creates. Returns
    /// `false` without calling it after unmount.
    fn arm(&mut self, schedule: impl FnOnce() -> T) -> bool {
        if !self.mounted {
            return false;
        }
        self.timer = Some(schedule());
        true
    }

    /// Drops the pending timer and refuses any later one.
    fn unmount(&mut self) {
        self.mounted = false;
        self.timer.take();
    }
}

#[function_component(SignupPage)]
pub fn signup_page() -> Html {
    let (i18n, _) = use_translation();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let registered = use_state(|| false);
    let is_loading = use_selector(|state: &AppState| state.is_loading);
    let error = use_selector(|state: &AppState| state.error.clone());
    let session = use_session();
    let navigator = use_navigator();
    // Pending redirect to the login view; dropping it cancels the timer.
    let redirect = use_mut_ref(PendingRedirect::<Timeout>::default);

    {
        let redirect = redirect.clone();
        use_unmount(move || redirect.borrow_mut().unmount());
    }

    let onsubmit = {
        let username_handle = username.clone();
        let password_handle = password.clone();
        let registered = registered.clone();
        let redirect = redirect.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            registered.set(false);
            let username_value = (*username_handle).clone();
            let password_value = (*password_handle).clone();
            let session = session.clone();
            let navigator_handle = navigator.clone();
            let registered = registered.clone();
            let redirect = redirect.clone();
            spawn_local(async move {
                if session.signup(&username_value, &password_value).await.is_err() {
                    return;
                }
                if !redirect.borrow().is_mounted() {
                    log::debug!("signup finished after the view closed");
                    return;
                }
                registered.set(true);
                if let Some(nav) = navigator_handle {
                    redirect.borrow_mut().arm(|| {
                        Timeout::new(SIGNUP_REDIRECT_DELAY_MS, move || {
                            nav.push(&MainRoute::Login);
                        })
                    });
                }
            });
        })
    };

    let on_username_change = {
        let username = username.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                username.set(input.value());
            }
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(input.value());
            }
        })
    };

    let is_busy = *is_loading;

    html! {
        <div class="flex items-center justify-center py-12">
            <div class="card w-full max-w-md shadow-lg bg-base-200">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl">{ i18n.t("signup.title") }</h2>
                    <div class="form-control">
                        <label class="label" for="username">
                            <span class="label-text">{ i18n.t("auth.username") }</span>
                        </label>
                        <input
                            id="username"
                            class="input input-bordered"
                            type="text"
                            required=true
                            value={(*username).clone()}
                            oninput={on_username_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{ i18n.t("auth.password") }</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password_change}
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={is_busy}>
                            {if is_busy { i18n.t("signup.submitting") } else { i18n.t("signup.submit") }}
                        </button>
                    </div>
                    <ErrorAlert message={(*error).clone().map(AttrValue::from)} />
                    if *registered {
                        <div class="alert alert-success" role="status">
                            <span>{ i18n.t("signup.success") }</span>
                        </div>
                    }
                    <p class="text-sm text-center">
                        { i18n.t("signup.switch_prompt") }{" "}
                        <Link<MainRoute> to={MainRoute::Login} classes="link link-primary">
                            { i18n.t("header.login") }
                        </Link<MainRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}
