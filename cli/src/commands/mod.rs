use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};
use liquidi_core::config::{API_URL_ENV, DEFAULT_API_URL, STORE_DIR_ENV};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("liquidi")
        .about("Command-line client for the Liquidi API")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL every request path is appended to")
                .default_value(DEFAULT_API_URL)
                .env(API_URL_ENV)
                .global(true),
        )
        .arg(
            Arg::new("store-dir")
                .long("store-dir")
                .help("Directory holding the per-origin credential files")
                .env(STORE_DIR_ENV)
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("LIQUIDI_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("login")
                .about("Authenticate and store the access token")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("company-name")
                        .long("company-name")
                        .required(true),
                )
                .arg(
                    Arg::new("cnpj")
                        .long("cnpj")
                        .help("Fourteen digits, no dots or dashes")
                        .required(true),
                )
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(
            Command::new("fetch")
                .about("Send an authenticated request and print the JSON response")
                .arg(
                    Arg::new("path")
                        .help("Request path, e.g. /dashboard/summary")
                        .required(true),
                )
                .arg(
                    Arg::new("method")
                        .short('X')
                        .long("method")
                        .default_value("GET"),
                )
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .help("Request body, sent verbatim"),
                )
                .arg(
                    Arg::new("header")
                        .short('H')
                        .long("header")
                        .help("Extra header as 'Name: value', overrides defaults")
                        .action(ArgAction::Append),
                ),
        )
}
