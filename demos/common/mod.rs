//! Setup shared by the demos.

use creational_patterns::builder::LogLevel;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

/// Logs to stderr at the level named by `DEMO_LOG_LEVEL` (default `info`).
pub fn init_logger() {
    let level = std::env::var("DEMO_LOG_LEVEL")
        .ok()
        .and_then(|level| level.parse::<LogLevel>().ok())
        .map(LevelFilter::from)
        .unwrap_or(LevelFilter::Info);

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("   [{l}] {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .expect("valid logger configuration");

    log4rs::init_config(config).expect("Failed to initialize logger");
}
