pub(crate) mod error_alert;
pub(crate) mod loading;
pub(crate) mod page_transition;
