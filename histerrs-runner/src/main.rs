mod app;
mod cli;
mod discovery;
mod execution;
mod metadata;
mod runner;

fn main() {
    app::run();
}
