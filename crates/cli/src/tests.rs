use std::io::{BufRead, BufReader, Write as _};
use std::net::TcpListener;
use std::thread;

use super::*;
use crate::output::render_human;

/// Serves one ident query on a background thread and answers with `reply`.
fn identd(reply: &'static [u8]) -> (u16, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let handle = thread::spawn(move || {
        let (socket, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(socket);
        let mut query = String::new();
        reader.read_line(&mut query).expect("read query");
        reader.get_mut().write_all(reply).expect("write reply");
        query
    });
    (port, handle)
}

fn run_captured(args: &[&str]) -> (i32, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = run(args.iter().copied(), &mut stdout, &mut stderr);
    (
        status,
        String::from_utf8(stdout).expect("utf-8 stdout"),
        String::from_utf8(stderr).expect("utf-8 stderr"),
    )
}

#[test]
fn help_lists_every_option() {
    let (status, stdout, stderr) = run_captured(&["oc-ident", "--help"]);
    assert_eq!(status, EXIT_SUCCESS);
    assert!(stderr.is_empty());
    for option in [
        "--port",
        "--no-abort",
        "--timeout",
        "--verify-ports",
        "--json",
        "--verbose",
        "--debug",
    ] {
        assert!(stdout.contains(option), "help should mention {option}");
    }
}

#[test]
fn usage_errors_exit_with_two() {
    let (status, stdout, stderr) = run_captured(&["oc-ident", "--definitely-invalid-option"]);
    assert_eq!(status, EXIT_USAGE);
    assert!(stdout.is_empty());
    assert!(!stderr.is_empty());

    let (status, _, _) = run_captured(&["oc-ident"]);
    assert_eq!(status, EXIT_USAGE);
}

#[test]
fn configuration_errors_exit_with_one() {
    let (status, stdout, stderr) = run_captured(&["oc-ident", "localhost", "6193", "0"]);
    assert_eq!(status, EXIT_FAILURE);
    assert!(stdout.is_empty());
    assert!(stderr.contains("UNDEFINED_LOCAL_PORT"), "stderr: {stderr}");
}

#[test]
fn userid_reply_is_printed_canonically() {
    let (port, server) = identd(b"6193, 23 : USERID : UNIX : stjohns\r\n");
    let port = port.to_string();

    let (status, stdout, stderr) =
        run_captured(&["oc-ident", "-p", &port, "127.0.0.1", "6193", "23"]);
    assert_eq!(status, EXIT_SUCCESS, "stderr: {stderr}");
    assert_eq!(stdout, "6193, 23 : USERID : UNIX : stjohns\n");
    assert_eq!(server.join().expect("server"), "6193, 23\r\n");
}

#[test]
fn error_reply_exits_successfully() {
    let (port, _server) = identd(b"6195, 23 : ERROR : NO-USER\r\n");
    let port = port.to_string();

    let (status, stdout, _) = run_captured(&["oc-ident", "-p", &port, "127.0.0.1", "6195", "23"]);
    assert_eq!(status, EXIT_SUCCESS);
    assert_eq!(stdout, "6195, 23 : ERROR : NO-USER\n");
}

#[test]
fn json_output_is_tagged_by_status() {
    let (port, _server) = identd(b"6193, 23 : USERID : UNIX : stjohns\r\n");
    let port = port.to_string();

    let (status, stdout, _) =
        run_captured(&["oc-ident", "--json", "-p", &port, "127.0.0.1", "6193", "23"]);
    assert_eq!(status, EXIT_SUCCESS);

    let value: serde_json::Value = serde_json::from_str(stdout.trim()).expect("json");
    assert_eq!(value["status"], "USERID");
    assert_eq!(value["server_port"], 6193);
    assert_eq!(value["client_port"], 23);
    assert_eq!(value["opsys"], "UNIX");
    assert_eq!(value["userid"], "stjohns");
}

#[test]
fn malformed_reply_reports_its_kind() {
    let (port, _server) = identd(b"6195, 23 : FOOBAR : NO-USER\r\n");
    let port = port.to_string();

    let (status, stdout, stderr) =
        run_captured(&["oc-ident", "--json", "-p", &port, "127.0.0.1", "6195", "23"]);
    assert_eq!(status, EXIT_FAILURE);
    assert!(stderr.contains("INVALID_STATUS_RESPONSE"));

    let value: serde_json::Value = serde_json::from_str(stdout.trim()).expect("json");
    assert_eq!(value["error"], "INVALID_STATUS_RESPONSE");
}

#[test]
fn refused_connection_is_a_failure() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };
    let port = port.to_string();

    let (status, stdout, stderr) = run_captured(&["oc-ident", "-p", &port, "127.0.0.1", "1", "2"]);
    assert_eq!(status, EXIT_FAILURE);
    assert!(stdout.is_empty());
    assert!(stderr.contains("TRANSPORT_ERROR"), "stderr: {stderr}");
}

#[cfg(feature = "charset")]
#[test]
fn charset_userids_are_decoded_for_display() {
    let (port, _server) = identd(b"1, 2 : USERID : UNIX , ISO-8859-1 : j\xf6rg\r\n");
    let port = port.to_string();

    let (status, stdout, _) = run_captured(&["oc-ident", "-p", &port, "127.0.0.1", "1", "2"]);
    assert_eq!(status, EXIT_SUCCESS);
    assert_eq!(stdout, "1, 2 : USERID : UNIX,ISO-8859-1 : j\u{f6}rg\n");
}

#[test]
fn render_human_matches_display_for_plain_userids() {
    let response =
        protocol::parse_ident_reply(b"6193, 23 : USERID : OTHER : x y").expect("valid reply");
    assert_eq!(render_human(&response), response.to_string());
}

#[test]
fn exit_codes_are_clamped() {
    assert_eq!(exit_code_from(0), std::process::ExitCode::SUCCESS);
    assert_eq!(exit_code_from(-5), std::process::ExitCode::from(0));
    assert_eq!(exit_code_from(1000), std::process::ExitCode::from(u8::MAX));
}
