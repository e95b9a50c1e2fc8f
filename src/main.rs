//! `chemview <scene.json> [options.toml]`
//!
//! Opens a window showing the representations described in a scene file.

use std::path::Path;

use chemview::{Options, ViewerWindow};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(scene_path) = args.next() else {
        log::error!("usage: chemview <scene.json> [options.toml]");
        std::process::exit(2);
    };

    let options = match args.next() {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load options from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let title = Path::new(&scene_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .map_or_else(|| "Chemview".to_owned(), |s| format!("Chemview - {s}"));

    if let Err(e) = ViewerWindow::new()
        .with_scene_path(&scene_path)
        .with_options(options)
        .with_title(title)
        .run()
    {
        log::error!("{e}");
        std::process::exit(1);
    }
}
