use i18nrs::yew::use_translation;
use yew::{AttrValue, Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct ErrorAlertProps {
    #[prop_or_default]
    pub message: Option<AttrValue>,
}

/// Renders the session store's current error, if any.
#[function_component(ErrorAlert)]
pub fn error_alert(props: &ErrorAlertProps) -> Html {
    let (i18n, _) = use_translation();
    let Some(message) = props.message.clone() else {
        return html! {};
    };

    html! {
        <div class="alert alert-error" role="alert">
            <span><strong>{ i18n.t("common.error") }</strong>{" "}{message}</span>
        </div>
    }
}
