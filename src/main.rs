mod cli;
mod model;
mod store;

fn main() -> anyhow::Result<()> {
    cli::run()
}
