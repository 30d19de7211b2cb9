//! MyTodoist Frontend Entry Point

mod actions;
mod app;
mod components;
mod context;
mod dates;
mod filter;
mod models;
mod store;
mod supabase;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
