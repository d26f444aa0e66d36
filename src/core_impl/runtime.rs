use super::form_controls::{
    form_data_entries, is_effectively_disabled, is_hidden_input, is_submit_control, radio_group,
    resolve_form_owner,
};
use super::html::parse_html;
use super::*;

mod assertions;
mod bootstrap;
mod event_dispatch;
mod timers;
mod trace;
mod user_actions;
