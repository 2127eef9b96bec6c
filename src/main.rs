use std::process::ExitCode;

use glasscape::config::ViewerConfig;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Optional source image for the disintegration panel.
    let mut config = ViewerConfig::default();
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.with_image_path(path);
    }

    match glasscape::viewer::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("glasscape: {}", e);
            ExitCode::FAILURE
        }
    }
}
