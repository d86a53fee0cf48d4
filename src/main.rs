mod audio;
mod catalog;
mod config;
mod mpris;
mod player;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
