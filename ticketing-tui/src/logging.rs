use crate::settings::Settings;

/// Sends everything logged through the `log` facade to the configured file.
pub fn init(settings: &Settings) -> Result<(), fern::InitError> {
    let file = fern::log_file(&settings.log_file)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(settings.log_level)
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(file)
        .apply()?;

    log::info!(
        "Logging at {} to {}",
        settings.log_level,
        settings.log_file.display()
    );
    Ok(())
}
