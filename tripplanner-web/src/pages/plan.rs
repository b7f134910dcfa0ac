use crate::{models::app_state::AppState, routes::MainRoute, session::use_session};
use i18nrs::yew::use_translation;
use shared::models::PlanSource;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

fn source_key(source: PlanSource) -> &'static str {
    match source {
        PlanSource::CacheAdapted => "plan.source.cache_adapted",
        PlanSource::NewlyGenerated => "plan.source.newly_generated",
        PlanSource::Other => "plan.source.other",
    }
}

/// Displays the itinerary held by the session store.
#[function_component(PlanPage)]
pub fn plan_page() -> Html {
    let (i18n, _) = use_translation();
    let itinerary = use_selector(|state: &AppState| state.itinerary.clone());
    let source = use_selector(|state: &AppState| state.plan_source);
    let session = use_session();
    let navigator = use_navigator();

    let Some(itinerary) = (*itinerary).clone() else {
        return html! {
            <div class="card bg-base-200 shadow-xl">
                <div class="card-body items-center text-center">
                    <h2 class="card-title">{ i18n.t("plan.empty.title") }</h2>
                    <p>{ i18n.t("plan.empty.body") }</p>
                    <div class="card-actions">
                        <Link<MainRoute> to={MainRoute::Home} classes="btn btn-primary">
                            { i18n.t("plan.new_trip") }
                        </Link<MainRoute>>
                    </div>
                </div>
            </div>
        };
    };

    let on_new_trip = Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        session.clear_plan();
        if let Some(ref nav) = navigator {
            nav.push(&MainRoute::Home);
        }
    });

    html! {
        <div class="card bg-base-200 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between gap-4">
                    <h2 class="card-title">
                        <Icon icon_id={IconId::HeroiconsOutlineDocumentText} class="w-6 h-6" />
                        { i18n.t("plan.title") }
                    </h2>
                    if let Some(source) = *source {
                        <span class="badge badge-outline">{ i18n.t(source_key(source)) }</span>
                    }
                </div>
                <pre class="whitespace-pre-wrap font-sans text-base leading-relaxed">
                    { itinerary.display_text() }
                </pre>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary" onclick={on_new_trip}>
                        { i18n.t("plan.new_trip") }
                    </button>
                </div>
            </div>
        </div>
    }
}
