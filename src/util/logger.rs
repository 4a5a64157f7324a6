use config;
use fern;
use log;
use time;

/// Sets up logging to STDOUT via fern/log, with the level coming from the
/// `loglevel` config value.
pub fn setup_logger() {
    let levelstr: String = config::get_or(&["loglevel"], String::from("warn"));
    let level = match levelstr.to_lowercase().as_ref() {
        "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => {
            println!("logger::setup_logger() -- bad `loglevel` value (\"{}\"), defaulting to \"warn\"", levelstr);
            log::LevelFilter::Warn
        }
    };
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            let stamp = match time::now().strftime("%Y-%m-%dT%H:%M:%S") {
                Ok(x) => format!("{}", x),
                Err(_) => String::from("-"),
            };
            out.finish(format_args!(
                "{} - [{}][{}] {}",
                stamp,
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());
    match dispatch.apply() {
        Ok(_) => {}
        Err(e) => {
            trace!("logger::setup_logger() -- looks like the logger was already init: {}", e);
        }
    }
}
