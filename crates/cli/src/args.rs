use std::ffi::OsString;
use std::time::Duration;

use clap::{Arg, ArgAction, Command, value_parser};
use client::RequestOptions;
use logging::VerbosityConfig;

pub(crate) const PROGRAM_NAME: &str = "oc-ident";

pub(crate) const HELP_TEXT: &str = concat!(
    "oc-ident ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: oc-ident [OPTIONS] ADDRESS SERVER_PORT CLIENT_PORT\n",
    "\n",
    "Asks the identd (RFC 1413) at ADDRESS which user owns the TCP connection\n",
    "between SERVER_PORT on ADDRESS and CLIENT_PORT on this host.\n",
    "\n",
    "Options:\n",
    "  -p, --port PORT      Port the identd listens on (default 113).\n",
    "      --no-abort       Keep reading replies longer than 1000 bytes.\n",
    "      --timeout SECS   Give up after SECS seconds.\n",
    "      --verify-ports   Reject replies naming a different port pair.\n",
    "      --json           Print the reply (or failure) as JSON.\n",
    "  -v, --verbose        Increase diagnostic output on stderr (repeatable).\n",
    "      --debug FLAGS    Enable diagnostics per category: connect, reply,\n",
    "                       request; append a digit for the level (reply2).\n",
    "  -h, --help           Show this help message and exit.\n",
    "  -V, --version        Output version information and exit.\n",
    "\n",
    "Exit status is 0 for any well-formed reply, including ERROR replies,\n",
    "1 when the request fails and 2 for usage errors.\n",
);

/// Output format selected on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) format: OutputFormat,
    pub(crate) verbosity: VerbosityConfig,
    pub(crate) options: RequestOptions,
}

fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .short('p')
                .value_name("PORT")
                .help("Port the identd listens on.")
                .value_parser(value_parser!(u16).range(1..))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("no-abort")
                .long("no-abort")
                .help("Keep reading replies longer than the abort threshold.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .help("Give up after SECS seconds.")
                .value_parser(value_parser!(u64).range(1..))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verify-ports")
                .long("verify-ports")
                .help("Reject replies naming a different port pair.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the reply as JSON.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output on stderr.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAGS")
                .help("Enable diagnostics per category.")
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("address")
                .value_name("ADDRESS")
                .required_unless_present_any(["help", "version"]),
        )
        .arg(
            Arg::new("server-port")
                .value_name("SERVER_PORT")
                .value_parser(value_parser!(u16))
                .required_unless_present_any(["help", "version"]),
        )
        .arg(
            Arg::new("client-port")
                .value_name("CLIENT_PORT")
                .value_parser(value_parser!(u16))
                .required_unless_present_any(["help", "version"]),
        )
}

pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let matches = clap_command().try_get_matches_from(args)?;

    let mut verbosity = VerbosityConfig::from_verbose_level(matches.get_count("verbose"));
    if let Some(tokens) = matches.get_many::<String>("debug") {
        for token in tokens {
            verbosity.apply_debug_flag(token).map_err(|message| {
                clap_command().error(
                    clap::error::ErrorKind::InvalidValue,
                    format!("--debug: {message}"),
                )
            })?;
        }
    }

    let mut options = RequestOptions::new().with_abort(!matches.get_flag("no-abort"));
    if let Some(address) = matches.get_one::<String>("address") {
        options = options.with_address(address.clone());
    }
    if let Some(&port) = matches.get_one::<u16>("port") {
        options = options.with_port(port);
    }
    if let Some(&server_port) = matches.get_one::<u16>("server-port") {
        options = options.with_server_port(server_port);
    }
    if let Some(&client_port) = matches.get_one::<u16>("client-port") {
        options = options.with_client_port(client_port);
    }
    if let Some(&seconds) = matches.get_one::<u64>("timeout") {
        options = options.with_timeout(Duration::from_secs(seconds));
    }
    options = options.with_verify_ports(matches.get_flag("verify-ports"));

    let format = if matches.get_flag("json") {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        format,
        verbosity,
        options,
    })
}
