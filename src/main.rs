use std::process::ExitCode;

use droplert_client::app;
use droplert_client::config::Config;

fn main() -> ExitCode {
    let conf = match Config::from_any() {
        Ok(conf) => conf,
        Err(e) => {
            eprintln!("Could not load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Setup simplelog
    if let Err(e) = droplert_client::log::setup(&conf.log) {
        eprintln!("Could not set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = app::launch(&conf) {
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
