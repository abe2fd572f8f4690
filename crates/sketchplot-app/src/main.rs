//! Main application entry point (native).
//!
//! Replays a JSON event script against an in-memory surface and prints the
//! generated Octave code. Reads the script from stdin when no path is given.

#[cfg(feature = "native")]
fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("sketchplot: {err}");
        std::process::exit(1);
    }
}

#[cfg(feature = "native")]
fn run() -> Result<(), sketchplot_app::AppError> {
    use kurbo::Size;
    use sketchplot_app::{App, AppError, Script, VecRowList};
    use sketchplot_render::RecordingSurface;
    use std::io::Read;
    use std::path::PathBuf;

    let json = match std::env::args_os().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            std::fs::read_to_string(&path).map_err(|source| AppError::Io { path, source })?
        }
        None => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .map_err(|source| AppError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            json
        }
    };

    let script = Script::from_json(&json)?;
    let surface = RecordingSurface::new(Size::new(script.width, script.height));
    let mut app = App::with_options(surface, VecRowList::new(), script.options.clone())?;
    let exports = script.run(&mut app)?;
    log::info!(
        "replayed {} steps, {} shapes in history",
        script.steps.len(),
        app.canvas().history().len()
    );

    if exports.is_empty() {
        print!("{}", app.export());
    } else {
        for code in exports {
            print!("{code}");
        }
    }
    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
