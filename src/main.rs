mod app;
mod calendar;
mod cli;
mod constants;
mod domain;
mod error;
mod history;
mod logging;
mod selection;
mod settings;
mod sound;
mod storage;
mod timer;

fn main() {
    cli::run_cli();
}
