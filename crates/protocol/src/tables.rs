//! Constants and token tables defined by RFC 1413 and the assigned-numbers
//! registries it defers to.

/// Well-known TCP port of the identd service.
pub const DEFAULT_IDENT_PORT: u16 = 113;

/// Line terminator used by both request and reply lines.
pub const EOL: &[u8; 2] = b"\r\n";

/// Number of unterminated reply bytes tolerated before the client aborts.
pub const ABORT_THRESHOLD: usize = 1000;

/// Size of each read issued while waiting for a reply.
pub const READ_CHUNK_LEN: usize = 256;

/// Reply status announcing a user identifier.
pub const STATUS_USERID: &str = "USERID";

/// Reply status announcing a failed lookup.
pub const STATUS_ERROR: &str = "ERROR";

/// Opsys value for identifiers that follow no operating-system format.
pub const OPSYS_OTHER: &str = "OTHER";

/// Leading character reserved for implementation-defined error tokens.
pub const ERROR_EXTENSION_PREFIX: char = 'X';

/// Shortest permitted extension error token (`X` plus one character).
pub const ERROR_EXTENSION_MIN_LEN: usize = 2;

/// Longest permitted protocol token.
pub const TOKEN_MAX_LEN: usize = 64;

/// Longest permitted userid, in octets.
pub const USERID_MAX_LEN: usize = 512;

/// Error tokens defined by RFC 1413 itself.
pub const ERROR_TOKENS: &[&str] = &["INVALID-PORT", "NO-USER", "HIDDEN-USER", "UNKNOWN-ERROR"];

/// Operating-system names from the assigned-numbers registry.
pub const OPSYS_TOKENS: &[&str] = &[
    "AEGIS",
    "AIX-PS/2",
    "AIX/370",
    "AMIGA-OS",
    "APOLLO",
    "BS-2000",
    "CEDAR",
    "CGW",
    "CHORUS",
    "CHRYSALIS",
    "CMOS",
    "CMS",
    "COS",
    "CPIX",
    "CTOS",
    "CTSS",
    "DCN",
    "DDNOS",
    "DOMAIN",
    "DOS",
    "EDX",
    "ELF",
    "EMBOS",
    "EMMOS",
    "EPOS",
    "FOONEX",
    "FREEBSD",
    "FUZZ",
    "GCOS",
    "GPOS",
    "HDOS",
    "IMAGEN",
    "IMPRESS",
    "INSTANT",
    "INTERCOM",
    "INTERLISP",
    "IOS",
    "IRIX",
    "ISI-68020",
    "ITS",
    "KOSOS",
    "LINUX",
    "LISP",
    "LISPM",
    "LOCUS",
    "MACOS",
    "MINOS",
    "MOS",
    "MPE/IX",
    "MPE/V",
    "MPE5",
    "MSDOS",
    "MULTICS",
    "MUSIC",
    "MUSIC/SP",
    "MVS",
    "MVS/SP",
    "NETBSD",
    "NETWARE-386",
    "NEXUS",
    "NMS",
    "NONSTOP",
    "NOS-2",
    "NTOS",
    "OPENBSD",
    "OPENVMS",
    "OS/2",
    "OS/DDP",
    "OS4",
    "OS86",
    "OSX",
    "PCDOS",
    "PERQ/OS",
    "PLI",
    "PRIMOS",
    "PSDOS/MIT",
    "RMX/RDOS",
    "ROS",
    "RSX11M",
    "RTE-A",
    "SATOPS",
    "SCO-XENIX/386",
    "SCS",
    "SIMP",
    "SUN",
    "SUN OS 3.5",
    "SUN OS 4.0",
    "SWIFT",
    "TAC",
    "TANDEM",
    "TENEX",
    "THE MAJOR BBS",
    "TOPS10",
    "TOPS20",
    "TOS",
    "TP3010",
    "TRSDOS",
    "ULTRIX",
    "UNIX",
    "UNIX-BSD",
    "UNIX-PC",
    "UNIX-V",
    "UNIX-V.1",
    "UNIX-V.2",
    "UNIX-V.3",
    "UNIX-V1AT",
    "UNKNOWN",
    "UT2D",
    "V",
    "VM",
    "VM/370",
    "VM/CMS",
    "VM/SP",
    "VMS",
    "VMS/EUNICE",
    "VRTX",
    "WAITS",
    "WANG",
    "WIN32",
    "X11R3",
    "XDE",
    "XENIX",
];

/// Character-set names from the IANA registry.
pub const CHARSET_TOKENS: &[&str] = &[
    "US-ASCII",
    "ASCII",
    "ANSI_X3.4-1968",
    "ISO-8859-1",
    "ISO-8859-2",
    "ISO-8859-3",
    "ISO-8859-4",
    "ISO-8859-5",
    "ISO-8859-6",
    "ISO-8859-7",
    "ISO-8859-8",
    "ISO-8859-9",
    "ISO-8859-10",
    "ISO-8859-13",
    "ISO-8859-14",
    "ISO-8859-15",
    "ISO-8859-16",
    "ISO-10646-UTF-1",
    "ISO-10646-UCS-2",
    "ISO-10646-UCS-4",
    "ISO-2022-JP",
    "ISO-2022-JP-2",
    "ISO-2022-KR",
    "ISO-2022-CN",
    "ISO-2022-CN-EXT",
    "UTF-7",
    "UTF-8",
    "UTF-16",
    "UTF-16BE",
    "UTF-16LE",
    "UTF-32",
    "UTF-32BE",
    "UTF-32LE",
    "Shift_JIS",
    "EUC-JP",
    "EUC-KR",
    "GB2312",
    "GBK",
    "GB18030",
    "Big5",
    "Big5-HKSCS",
    "KOI8-R",
    "KOI8-U",
    "IBM437",
    "IBM850",
    "IBM852",
    "IBM855",
    "IBM857",
    "IBM860",
    "IBM861",
    "IBM862",
    "IBM863",
    "IBM864",
    "IBM865",
    "IBM866",
    "IBM869",
    "IBM037",
    "IBM500",
    "IBM1047",
    "windows-874",
    "windows-1250",
    "windows-1251",
    "windows-1252",
    "windows-1253",
    "windows-1254",
    "windows-1255",
    "windows-1256",
    "windows-1257",
    "windows-1258",
    "macintosh",
    "TIS-620",
    "VISCII",
    "HZ-GB-2312",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unique(table: &[&str]) {
        for (index, token) in table.iter().enumerate() {
            assert!(
                !table[index + 1..].contains(token),
                "duplicate table entry {token:?}"
            );
        }
    }

    #[test]
    fn tables_have_no_duplicates() {
        assert_unique(OPSYS_TOKENS);
        assert_unique(CHARSET_TOKENS);
        assert_unique(ERROR_TOKENS);
    }

    #[test]
    fn table_entries_fit_token_length() {
        for token in OPSYS_TOKENS.iter().chain(CHARSET_TOKENS).chain(ERROR_TOKENS) {
            assert!(!token.is_empty());
            assert!(token.len() <= TOKEN_MAX_LEN, "{token:?} is too long");
            assert!(!token.contains([':', ',']), "{token:?} holds a separator");
        }
    }

    #[test]
    fn other_is_not_listed_as_an_opsys() {
        assert!(!OPSYS_TOKENS.contains(&OPSYS_OTHER));
    }
}
