mod action;
mod app;
mod error;
mod models;
mod route;
mod state;
mod tui;

use app::App;

fn main() -> anyhow::Result<()> {
    let mut app = App::new();
    app.run()?;
    Ok(())
}
