use anyhow::Context;
use macroquad::prelude::*;
use tile_scroll::{DemoConfig, Flow, MacroquadPlatform, MacroquadSurface, ScopedContext, Scroller, TileMap};
use tracing::{error, info};

fn window_conf() -> Conf {
    DemoConfig::default().window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // everything acquired inside `run` is dropped before we exit
    if let Err(err) = run(DemoConfig::default()).await {
        error!("{:#}", err);
        std::process::exit(-1);
    }
}

async fn run(config: DemoConfig) -> anyhow::Result<()> {
    let context = ScopedContext::init(MacroquadPlatform::new(&config))
        .context("Bootstrapping the window")?;
    let map = TileMap::load(&config).context("Building the tile map")?;

    let mut scroller = Scroller::new(&map, config.window_width, config.window_height);
    let mut surface = MacroquadSurface;

    prevent_quit();
    info!(camera = ?scroller.camera(), "entering frame loop");

    loop {
        if scroller.tick(is_key_down, is_quit_requested()) == Flow::Quit {
            break;
        }

        clear_background(BLACK);
        scroller.render(&map, &mut surface);

        next_frame().await;
    }

    drop(map);
    drop(context);
    Ok(())
}
