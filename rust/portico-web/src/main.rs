#[macro_use]
extern crate tracing;

mod api;
mod app;
mod browser;
mod generator;
mod storage;
mod tabs;
mod viewer;

use leptos::*;
use tracing_subscriber::{fmt::format::Pretty, layer::SubscriberExt, util::SubscriberInitExt};
use tracing_web::{performance_layer, MakeWebConsoleWriter};

use app::App;

fn main() {
    console_error_panic_hook::set_once();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(perf_layer)
        .init();

    mount_to_body(|| view! { <App /> })
}
