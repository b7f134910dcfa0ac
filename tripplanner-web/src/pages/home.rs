use crate::{
    components::{error_alert::ErrorAlert, loading::Loading},
    models::app_state::AppState,
    routes::MainRoute,
    session::use_session,
};
use chrono::Local;
use i18nrs::yew::use_translation;
use shared::models::{TripField, TripRequest, TripType};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::use_navigator;
use yewdux::prelude::use_selector;

/// Applies a raw input value to the form; values violating a field's
/// constraint are ignored and the previous value stays.
fn apply_field(form: &UseStateHandle<TripRequest>, name: &str, value: &str) {
    let field = match name.parse::<TripField>() {
        Ok(field) => field,
        Err(err) => {
            log::warn!("{err}");
            return;
        }
    };
    let mut next = (**form).clone();
    match next.set_field(field, value) {
        Ok(()) => form.set(next),
        Err(err) => log::debug!("ignoring edit: {err}"),
    }
}

/// Current value of a free-text field; `None` for fields edited through
/// another control.
fn text_value(form: &TripRequest, field: TripField) -> Option<String> {
    match field {
        TripField::Destination => Some(form.destination.clone()),
        TripField::FromLocation => Some(form.from_location.clone()),
        TripField::GroupDetails => Some(form.group_details.clone()),
        TripField::StartDate
        | TripField::EndDate
        | TripField::People
        | TripField::TripType
        | TripField::MinBudget
        | TripField::MaxBudget => None,
    }
}

/// Plan-submission page with pre-filled trip parameters.
#[function_component(HomePage)]
pub fn home_page() -> Html {
    let (i18n, _) = use_translation();
    let form = use_state(|| TripRequest::with_defaults(Local::now().date_naive()));
    let is_loading = use_selector(|state: &AppState| state.is_loading);
    let error = use_selector(|state: &AppState| state.error.clone());
    let session = use_session();
    let navigator = use_navigator();

    let on_input = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                apply_field(&form, &input.name(), &input.value());
            }
        })
    };

    let on_select = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                apply_field(&form, &select.name(), &select.value());
            }
        })
    };

    let onsubmit = {
        let form = form.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = (*form).clone();
            let session = session.clone();
            let navigator_handle = navigator.clone();
            spawn_local(async move {
                if session.generate_plan(&request).await.is_ok() {
                    if let Some(ref nav) = navigator_handle {
                        nav.push(&MainRoute::Plan);
                    }
                }
            });
        })
    };

    let text_input = |field: TripField, label: &str, required: bool| {
        let Some(value) = text_value(&form, field) else {
            log::error!("{field} is not a text field");
            return Html::default();
        };
        html! {
            <div class="form-control">
                <label class="label" for={field.name()}>
                    <span class="label-text">{ label.to_string() }</span>
                </label>
                <input
                    type="text"
                    class="input input-bordered"
                    id={field.name()}
                    name={field.name()}
                    value={value}
                    required={required}
                    placeholder={(field == TripField::GroupDetails).then(|| i18n.t("home.fields.group_details_placeholder"))}
                    oninput={on_input.clone()}
                />
            </div>
        }
    };

    let date_input = |field: TripField, label: &str| {
        let value = if field == TripField::StartDate {
            form.start_date.to_string()
        } else {
            form.end_date.to_string()
        };
        html! {
            <div class="form-control">
                <label class="label" for={field.name()}>
                    <span class="label-text">{ label.to_string() }</span>
                </label>
                <input
                    type="date"
                    class="input input-bordered"
                    id={field.name()}
                    name={field.name()}
                    value={value}
                    required=true
                    oninput={on_input.clone()}
                />
            </div>
        }
    };

    let number_input = |field: TripField, label: &str, value: String, min: &'static str| {
        html! {
            <div class="form-control">
                <label class="label" for={field.name()}>
                    <span class="label-text">{ label.to_string() }</span>
                </label>
                <input
                    type="number"
                    class="input input-bordered"
                    id={field.name()}
                    name={field.name()}
                    value={value}
                    min={min}
                    required=true
                    oninput={on_input.clone()}
                />
            </div>
        }
    };

    let is_busy = *is_loading;

    html! {
        <div class="card bg-base-200 shadow-xl">
            <form class="card-body space-y-6" onsubmit={onsubmit}>
                <div class="alert alert-info">
                    <Icon icon_id={IconId::HeroiconsOutlineInformationCircle} class="w-6 h-6" />
                    <span>
                        <strong>{ i18n.t("home.intro.title") }</strong>{" "}
                        { i18n.t("home.intro.body") }
                    </span>
                </div>

                <section>
                    <h2 class="text-lg font-semibold flex items-center gap-2">
                        <Icon icon_id={IconId::HeroiconsOutlineMapPin} class="w-5 h-5" />
                        { i18n.t("home.sections.logistics") }
                    </h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        { text_input(TripField::Destination, &i18n.t("home.fields.destination"), true) }
                        { text_input(TripField::FromLocation, &i18n.t("home.fields.from_location"), true) }
                        { date_input(TripField::StartDate, &i18n.t("home.fields.start_date")) }
                        { date_input(TripField::EndDate, &i18n.t("home.fields.end_date")) }
                    </div>
                </section>

                <section>
                    <h2 class="text-lg font-semibold flex items-center gap-2">
                        <Icon icon_id={IconId::HeroiconsOutlineUserGroup} class="w-5 h-5" />
                        { i18n.t("home.sections.travelers") }
                    </h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        { number_input(TripField::People, &i18n.t("home.fields.people"), form.people.to_string(), "1") }
                        <div class="form-control">
                            <label class="label" for={TripField::TripType.name()}>
                                <span class="label-text">{ i18n.t("home.fields.trip_type") }</span>
                            </label>
                            <select
                                class="select select-bordered"
                                id={TripField::TripType.name()}
                                name={TripField::TripType.name()}
                                required=true
                                onchange={on_select}
                            >
                                { for TripType::ALL.iter().map(|trip_type| html! {
                                    <option
                                        value={trip_type.as_str()}
                                        selected={*trip_type == form.trip_type}
                                    >
                                        { i18n.t(&format!("home.trip_types.{}", trip_type.as_str().replace(' ', "_").to_lowercase())) }
                                    </option>
                                }) }
                            </select>
                        </div>
                        <div class="md:col-span-2">
                            { text_input(TripField::GroupDetails, &i18n.t("home.fields.group_details"), false) }
                        </div>
                    </div>
                </section>

                <section>
                    <h2 class="text-lg font-semibold flex items-center gap-2">
                        <Icon icon_id={IconId::HeroiconsOutlineCurrencyDollar} class="w-5 h-5" />
                        { i18n.t("home.sections.budget") }
                    </h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        { number_input(TripField::MinBudget, &i18n.t("home.fields.min_budget"), form.min_budget.to_string(), "0") }
                        { number_input(TripField::MaxBudget, &i18n.t("home.fields.max_budget"), form.max_budget.to_string(), "0") }
                    </div>
                </section>

                <div class="flex flex-col gap-4">
                    <button type="submit" class="btn btn-primary" disabled={is_busy}>
                        {if is_busy { i18n.t("home.submitting") } else { i18n.t("home.submit") }}
                    </button>
                    if is_busy {
                        <Loading />
                    }
                    <ErrorAlert message={(*error).clone().map(AttrValue::from)} />
                </div>
            </form>
        </div>
    }
}
