use super::*;

mod html_parsing;
mod page_chrome_behaviours;
mod timers_and_trace;
