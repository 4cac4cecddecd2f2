use std::path::PathBuf;
use std::time::SystemTime;

use color_eyre::Result;
use color_eyre::eyre::Context;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Route `log` records to stderr and, when a path is given, to a log file.
///
/// Each sink has its own level so the console can stay quiet while the file
/// keeps a full trace.
pub fn setup_logging(
    console_level: LevelFilter,
    log_file: Option<PathBuf>,
    file_level: LevelFilter,
) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let console = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(console_level)
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new()
        // sqlx logs every statement at info
        .level_for("sqlx", LevelFilter::Warn)
        .level_for("sea_orm_migration", LevelFilter::Info)
        .chain(console);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context(format!(
                "Failed to create log directory: {}",
                parent.display()
            ))?;
        }

        let file = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    humantime::format_rfc3339_millis(SystemTime::now()),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(file_level)
            .chain(
                fern::log_file(&path)
                    .context(format!("Failed to open log file: {}", path.display()))?,
            );
        dispatch = dispatch.chain(file);
    }

    dispatch.apply().context("Failed to install logger")?;
    Ok(())
}
