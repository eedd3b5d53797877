use log::LevelFilter;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}

/// Array literal of `depth` nested levels around a single element.
pub fn nested_literal(depth: usize, element: &str) -> String {
    format!("{}{element}{}", "{".repeat(depth), "}".repeat(depth))
}

/// Array literal whose elements are quoted and escaped as the server does.
pub fn quoted_literal<'a>(elements: impl IntoIterator<Item = &'a str>) -> String {
    let elements = elements
        .into_iter()
        .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect::<Vec<_>>();
    format!("{{{}}}", elements.join(","))
}
