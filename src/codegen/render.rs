//! Text rendering of a [`BuildConfiguration`].

use crate::core::directive::OptionValue;

use super::BuildConfiguration;

impl BuildConfiguration {
    /// Render a `platformio.ini` environment section.
    ///
    /// Options are written in key order. Build flags are merged into the
    /// `build_flags` option and written one per line.
    pub fn render_platformio_ini(&self, env_name: &str) -> String {
        let mut options = self.options.clone();

        if !self.build_flags.is_empty() {
            let mut flags: Vec<String> = self.build_flags.iter().cloned().collect();
            match options.remove("build_flags") {
                Some(OptionValue::List(extra)) => flags.extend(extra),
                Some(OptionValue::Single(extra)) => flags.push(extra),
                None => {}
            }
            options.insert("build_flags".to_string(), OptionValue::List(flags));
        }

        let mut out = String::new();
        out.push_str(&format!("[env:{}]\n", env_name));
        for (key, value) in &options {
            match value {
                OptionValue::Single(v) => out.push_str(&format!("{} = {}\n", key, v)),
                OptionValue::List(items) => {
                    out.push_str(&format!("{} =\n", key));
                    for item in items {
                        out.push_str(&format!("    {}\n", item));
                    }
                }
            }
        }
        out
    }

    /// Render the generated defines header, sorted by macro name.
    pub fn render_defines_header(&self) -> String {
        let mut out = String::from("#pragma once\n\n");
        for (name, value) in &self.defines {
            match value {
                Some(value) => out.push_str(&format!("#define {} {}\n", name, value)),
                None => out.push_str(&format!("#define {}\n", name)),
            }
        }
        out
    }

    /// Render the setup statements, one per line.
    pub fn render_setup(&self) -> String {
        self.statements
            .iter()
            .map(|expr| format!("{};\n", expr))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::directive::{Directive, DirectiveSink, Expression};

    fn sample() -> BuildConfiguration {
        let mut cfg = BuildConfiguration::new();
        cfg.add(Directive::statement(Expression::call("ns::setup", vec![])));
        cfg.add(Directive::platformio_option("framework", "arduino"));
        cfg.add(Directive::build_flag("-DUSE_B"));
        cfg.add(Directive::platformio_option("board", "wb2l"));
        cfg.add(Directive::build_flag("-DUSE_A"));
        cfg.add(Directive::define_str("ZETA", "z"));
        cfg.add(Directive::define_expr("ALPHA", Expression::raw("F(1)")));
        cfg
    }

    #[test]
    fn test_render_platformio_ini() {
        let ini = sample().render_platformio_ini("device");
        assert_eq!(
            ini,
            "[env:device]\n\
             board = wb2l\n\
             build_flags =\n    -DUSE_A\n    -DUSE_B\n\
             framework = arduino\n"
        );
    }

    #[test]
    fn test_render_defines_header() {
        let header = sample().render_defines_header();
        assert_eq!(
            header,
            "#pragma once\n\n#define ALPHA F(1)\n#define ZETA \"z\"\n"
        );
    }

    #[test]
    fn test_render_setup() {
        assert_eq!(sample().render_setup(), "ns::setup();\n");
    }

    #[test]
    fn test_explicit_build_flags_option_is_merged() {
        let mut cfg = BuildConfiguration::new();
        cfg.add(Directive::build_flag("-DA"));
        cfg.add(Directive::platformio_option("build_flags", vec!["-Wall".to_string()]));

        let ini = cfg.render_platformio_ini("e");
        assert!(ini.contains("build_flags =\n    -DA\n    -Wall\n"));
    }
}
