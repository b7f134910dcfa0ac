use crate::components::page_transition::PageTransition;
use crate::containers::layout::Layout;
use crate::guards::{self, NavigationDecision, RouteGuard};
use crate::models::app_state::AppState;
use crate::pages::*;
use strum::EnumIter;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// The main routes
#[derive(Debug, Clone, PartialEq, Eq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Home,
    #[at("/plan")]
    Plan,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl MainRoute {
    /// Guard protecting this route's group.
    pub fn guard(&self) -> RouteGuard {
        match self {
            Self::Login | Self::Signup => RouteGuard::GuestOnly,
            Self::Home | Self::Plan => RouteGuard::AuthenticatedOnly,
            Self::NotFound => RouteGuard::Public,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let is_authenticated = use_selector(|state: &AppState| state.is_authenticated());
    let route = props.route.clone();

    if let NavigationDecision::Redirect(target) = guards::check(&route, *is_authenticated) {
        log::debug!("guard redirected {route:?} to {target:?}");
        return html! { <Redirect<MainRoute> to={target} /> };
    }

    let page = match &route {
        MainRoute::Home => html! { <HomePage /> },
        MainRoute::Plan => html! { <PlanPage /> },
        MainRoute::Login => html! { <LoginPage /> },
        MainRoute::Signup => html! { <SignupPage /> },
        MainRoute::NotFound => html! { <ErrorPage /> },
    };

    html! {
        <Layout current_route={Some(route.clone())}>
            <PageTransition path={route.to_path()}>
                {page}
            </PageTransition>
        </Layout>
    }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute) -> Html {
    log::debug!("switching to main route: {route:?}");
    html! { <MainRouteView {route} /> }
}
