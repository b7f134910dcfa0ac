use crate::{
    components::error_alert::ErrorAlert, models::app_state::AppState, routes::MainRoute,
    session::use_session,
};
use i18nrs::yew::use_translation;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let (i18n, _) = use_translation();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let is_loading = use_selector(|state: &AppState| state.is_loading);
    let error = use_selector(|state: &AppState| state.error.clone());
    let session = use_session();
    let navigator = use_navigator();

    let onsubmit = {
        let username_handle = username.clone();
        let password_handle = password.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let username_value = (*username_handle).clone();
            let password_value = (*password_handle).clone();
            let session = session.clone();
            let navigator_handle = navigator.clone();
            spawn_local(async move {
                if session.login(&username_value, &password_value).await.is_ok() {
                    if let Some(ref nav) = navigator_handle {
                        nav.push(&MainRoute::Home);
                    }
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
                    <h2 class="card-title text-2xl">{ i18n.t("login.title") }</h2>
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
                            {if is_busy { i18n.t("login.submitting") } else { i18n.t("login.submit") }}
                        </button>
                    </div>
                    <ErrorAlert message={(*error).clone().map(AttrValue::from)} />
                    <p class="text-sm text-center">
                        { i18n.t("login.switch_prompt") }{" "}
                        <Link<MainRoute> to={MainRoute::Signup} classes="link link-primary">
                            { i18n.t("header.signup") }
                        </Link<MainRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}
