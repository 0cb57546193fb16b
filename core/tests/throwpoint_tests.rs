use vimstack::errors::StackError;
use vimstack::throwpoint::{Link, Throwpoint, normalize, split_links};

#[test]
fn normalizes_live_throwpoint() {
    assert_eq!(
        normalize("function A[1]..B, line 2"),
        "function A[1]..B[2]"
    );
    assert_eq!(
        normalize("function <SNR>13_test[1]..<SNR>13_test2[1]..F[3]..<lambda>1[1]..<SNR>13_test3, line 2"),
        "function <SNR>13_test[1]..<SNR>13_test2[1]..F[3]..<lambda>1[1]..<SNR>13_test3[2]"
    );
}

#[test]
fn normalizes_history_header() {
    assert_eq!(
        normalize("Error detected while processing function A[1]..B:\nline    2:"),
        "function A[1]..B[2]"
    );
    assert_eq!(
        normalize("Error detected while processing /path/to/file.vim:\nline   33:\n"),
        "/path/to/file.vim[33]"
    );
}

#[test]
fn normalizes_file_position() {
    assert_eq!(
        normalize("/path/to/file.vim, line 23"),
        "/path/to/file.vim[23]"
    );
}

#[test]
fn canonical_throwpoints_are_unchanged() {
    for canonical in [
        "function A[1]..B[2]",
        "/path/to/file.vim[23]",
        "function <SNR>13_test3",
        "",
    ] {
        assert_eq!(normalize(canonical), canonical);
    }
}

#[test]
fn normalize_is_idempotent() {
    for raw in [
        "function A[1]..B, line 2",
        "Error detected while processing function A[1]..B:\nline    2:",
        "Error detected while processing function A[1]..B, line 2",
        "Error detected while processing Error detected while processing F:\nline 1:",
        "/path/to/file.vim, line 23",
        "function 14[14]",
        "Error detected while processing /path/to/file.vim:",
        "garbage",
    ] {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once, "normalize not idempotent for {raw:?}");
    }
}

#[test]
fn splits_links_on_rightmost_bracket() {
    assert_eq!(Link::parse("<SNR>13_test[1]"), Link::new("<SNR>13_test", 1));
    assert_eq!(Link::parse("[14].vim[24]"), Link::new("[14].vim", 24));
    assert_eq!(Link::parse("<SNR>14_nolnum"), Link::new("<SNR>14_nolnum", 0));
    assert_eq!(Link::parse("/tmp/a[b]/x.vim[3]"), Link::new("/tmp/a[b]/x.vim", 3));
}

#[test]
fn splits_function_chain_in_call_order() {
    let links = split_links("F[5]..<lambda>3[1]..G[2]");
    assert_eq!(
        links,
        vec![
            Link::new("F", 5),
            Link::new("<lambda>3", 1),
            Link::new("G", 2),
        ]
    );
    assert_eq!(links[1].to_string(), "<lambda>3[1]");
}

#[test]
fn parses_both_chain_shapes() {
    assert_eq!(
        Throwpoint::parse("function F[5]..G[2]").expect("function chain should parse"),
        Throwpoint::Function(vec![Link::new("F", 5), Link::new("G", 2)])
    );
    let file = Throwpoint::parse("[14].vim[24]").expect("file position should parse");
    assert_eq!(file, Throwpoint::File(Link::new("[14].vim", 24)));
    assert_eq!(file.links(), &[Link::new("[14].vim", 24)]);
}

#[test]
fn rejects_unrecognized_chains() {
    for chain in ["", "/path/to/file.vim", "F[1]..G", "/path/to/file.vim[x]"] {
        let err = Throwpoint::parse(chain).expect_err("chain should be rejected");
        assert!(
            matches!(err, StackError::InvalidThrowpoint { ref throwpoint } if throwpoint == chain),
            "unexpected error {err:?}"
        );
    }
}
