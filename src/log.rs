use crate::config::LogConf;
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::str::FromStr;

pub fn setup(conf: &LogConf) -> Result<(), Box<dyn Error>> {
    let level = LevelFilter::from_str(&conf.level)?;

    CombinedLogger::init(vec![
        TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(
            level,
            Config::default(),
            File::create(&conf.file)?,
        ),
    ])?;

    Ok(())
}
