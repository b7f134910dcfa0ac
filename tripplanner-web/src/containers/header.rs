use crate::{models::app_state::AppState, routes::MainRoute, session::use_session};
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    #[prop_or_default]
    pub current_route: Option<MainRoute>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let (i18n, ..) = use_translation();
    let is_authenticated = use_selector(|state: &AppState| state.is_authenticated());
    let session = use_session();
    let navigator = use_navigator();

    let nav_class = |route: MainRoute| {
        let active = props.current_route.as_ref() == Some(&route);
        classes!("btn", "btn-sm", active.then_some("btn-soft"))
    };

    let on_logout = Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        session.logout();
        if let Some(ref navigator) = navigator {
            navigator.push(&MainRoute::Login);
        }
    });

    html! {
        <header class="navbar justify-between bg-base-300">
            <div class="flex flex-col items-start">
                <Link<MainRoute> to={MainRoute::Home} classes="btn btn-ghost text-lg">
                    <span class="text-primary">{ i18n.t("app.brand") }</span>
                    { i18n.t("app.title") }
                </Link<MainRoute>>
                <p class="px-4 text-xs text-base-content/70">{ i18n.t("app.subtitle") }</p>
            </div>
            <nav class="flex gap-2">
                if *is_authenticated {
                    <button class="btn btn-outline btn-sm" onclick={on_logout}>
                        { i18n.t("header.logout") }
                    </button>
                } else {
                    <>
                    <Link<MainRoute> to={MainRoute::Login} classes={nav_class(MainRoute::Login)}>
                        { i18n.t("header.login") }
                    </Link<MainRoute>>
                    <Link<MainRoute> to={MainRoute::Signup} classes={classes!(nav_class(MainRoute::Signup), "btn-primary")}>
                        { i18n.t("header.signup") }
                    </Link<MainRoute>>
                    </>
                }
            </nav>
        </header>
    }
}
