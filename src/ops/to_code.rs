//! Build directive emission for a validated configuration.

use tracing::debug;

use crate::core::config::{
    PlatformConfig, CONF_FRAMEWORK, CONF_VERSION, FRAMEWORK_NAME, PLATFORM_NAME,
};
use crate::core::directive::{Directive, DirectiveSink, Expression};
use crate::core::errors::ConfigError;
use crate::core::version::validate_version_constraint;
use crate::schema::ConfigPath;

/// C++ namespace of the platform's runtime support code.
pub const LIBRETUYA_NS: &str = "libretuya";

/// Value of `USE_ARDUINO_VERSION_CODE`. The framework version is not
/// encoded yet; the macro always expands to version 0.0.0.
pub const VERSION_CODE_PLACEHOLDER: &str = "VERSION_CODE(0, 0, 0)";

/// Compute the ordered directive list for `config`.
pub fn directives(config: &PlatformConfig) -> Result<Vec<Directive>, ConfigError> {
    let mut out = Vec::with_capacity(14);

    out.push(Directive::statement(Expression::call(
        format!("{}::setup_preferences", LIBRETUYA_NS),
        vec![],
    )));

    // board
    out.push(Directive::platformio_option("board", config.board.as_str()));
    out.push(Directive::build_flag("-DUSE_LIBRETUYA"));
    out.push(Directive::define_str("ESPHOME_BOARD", config.board.as_str()));
    out.push(Directive::define_str("ESPHOME_VARIANT", "LibreTuya"));

    // LT logger output goes through the host logger, which adds its own
    // caller, task and color decorations
    out.push(Directive::build_flag("-DLT_LOGGER_CALLER=0"));
    out.push(Directive::build_flag("-DLT_LOGGER_TASK=0"));
    out.push(Directive::build_flag("-DLT_LOGGER_COLOR=1"));

    out.push(Directive::platformio_option("framework", FRAMEWORK_NAME));
    out.push(Directive::build_flag("-DUSE_ARDUINO"));

    out.push(Directive::platformio_option("lib_ldf_mode", "off"));
    out.push(Directive::platformio_option("build_src_flags", "-include Arduino.h"));

    let version = config.framework.version.to_string();
    let path = ConfigPath::root()
        .join(PLATFORM_NAME)
        .join(CONF_FRAMEWORK)
        .join(CONF_VERSION);
    validate_version_constraint(&version, &path)?;
    out.push(Directive::platformio_option(
        "platform",
        format!("{} @ {}", PLATFORM_NAME, version),
    ));

    out.push(Directive::define_expr(
        "USE_ARDUINO_VERSION_CODE",
        Expression::raw(VERSION_CODE_PLACEHOLDER),
    ));

    Ok(out)
}

/// Emit the directives for `config` into `sink`.
///
/// Nothing is written to the sink if any check fails.
pub fn to_code(config: &PlatformConfig, sink: &mut impl DirectiveSink) -> Result<(), ConfigError> {
    let directives = directives(config)?;
    debug!(count = directives.len(), board = %config.board, "emitting directives");
    sink.extend(directives);
    Ok(())
}
