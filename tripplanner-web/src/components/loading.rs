use i18nrs::yew::use_translation;
use yew::{Html, function_component, html};
use yew_icons::{Icon, IconId};

#[function_component(Loading)]
pub fn loading() -> Html {
    let (i18n, _) = use_translation();

    html! {
        <div class="flex flex-col items-center justify-center animate-fadeIn">
            <div class="bg-base-200 p-6 rounded-lg shadow-md flex flex-col items-center">
                <div class="flex items-center gap-4 text-primary">
                    <Icon icon_id={IconId::HeroiconsOutlinePaperAirplane} class="w-8 h-8 animate-pulse" />
                    <Icon icon_id={IconId::HeroiconsOutlineMap} class="w-8 h-8 animate-pulse" />
                    <Icon icon_id={IconId::HeroiconsOutlineBuildingOffice} class="w-8 h-8 animate-pulse" />
                    <Icon icon_id={IconId::HeroiconsOutlineSun} class="w-8 h-8 animate-pulse" />
                </div>
                <h2 class="mt-3 text-xl font-medium">{ i18n.t("loading.title") }</h2>
                <div class="mt-1 flex items-center text-sm text-base-content/70">
                    <span>{ i18n.t("loading.subtitle") }</span>
                    <span class="typing-dot"></span>
                    <span class="typing-dot"></span>
                    <span class="typing-dot"></span>
                </div>
            </div>
        </div>
    }
}
