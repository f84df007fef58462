use proptest::prelude::*;
use protocol::{IdentQuery, format_ident_request, parse_ident_reply, parse_ident_request};

proptest! {
    #[test]
    fn rendered_request_parses_back_to_the_same_ports(
        server_port in 1u16..=u16::MAX,
        client_port in 1u16..=u16::MAX,
    ) {
        let rendered = format_ident_request(IdentQuery::new(server_port, client_port));
        prop_assert!(rendered.ends_with("\r\n"));
        prop_assert_eq!(rendered.matches(", ").count(), 1);

        let parsed = parse_ident_request(rendered.as_bytes()).expect("rendered request parses");
        prop_assert_eq!(parsed, (u32::from(server_port), u32::from(client_port)));
    }

    #[test]
    fn request_port_pair_is_accepted_as_reply_port_pair(
        server_port in 1u16..=u16::MAX,
        client_port in 1u16..=u16::MAX,
    ) {
        let rendered = format_ident_request(IdentQuery::new(server_port, client_port));
        let line = format!("{} : ERROR : NO-USER", rendered.trim_end());
        let response = parse_ident_reply(line.as_bytes()).expect("valid reply");
        prop_assert!(response.matches_ports(server_port, client_port));
    }

    #[test]
    fn parsing_the_same_line_twice_is_identical(
        userid in "[a-zA-Z0-9._ -]{1,64}",
        opsys in prop::sample::select(vec!["UNIX", "OTHER", "WIN32", "LINUX"]),
    ) {
        let line = format!("6193, 23 : USERID : {opsys} :{userid}");
        let first = parse_ident_reply(line.as_bytes());
        let second = parse_ident_reply(line.as_bytes());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn arbitrary_bytes_never_panic(line in prop::collection::vec(any::<u8>(), 0..600)) {
        let _ = parse_ident_reply(&line);
    }
}
