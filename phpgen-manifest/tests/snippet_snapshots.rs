//! Snapshot tests for rendering snippet manifests.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::io::Write;

use phpgen_manifest::{Error, Snippet, SnippetFile};

fn render(toml: &str) -> String {
    let snippet: Snippet = toml.parse().expect("Failed to parse snippet");
    snippet.render().expect("Failed to render snippet").join("\n")
}

#[test]
fn test_chain_assignment() {
    let output = render(
        r#"
        [[statements]]
        kind = "assign"
        target = { name = "user" }
        chain = [
            { owner = "\\App\\Models\\User", name = "query" },
            { name = "where", args = [{ value = "email" }, { reference = { name = "email" } }] },
            { name = "first" },
        ]

        [[statements]]
        kind = "assign"
        target = { owner = "this", name = "seen", index = "[]" }
        reference = { name = "user" }
        "#,
    );

    insta::assert_snapshot!(output, @r#"
    $user = \App\Models\User::query()
        ->where( "email", $email )
        ->first();
    $this->seen[] = $user;
    "#);
}

#[test]
fn test_switch_and_loops() {
    let output = render(
        r#"
        [[statements]]
        kind = "switch"
        condition = { left = { reference = { name = "action" } } }

            [[statements.body]]
            kind = "case"
            condition = { value = "start" }

                [[statements.body.body]]
                kind = "call"
                call = { owner = "this", name = "start" }

            [[statements.body]]
            kind = "default"

                [[statements.body.body]]
                kind = "return"

        [[statements]]
        kind = "do-while"
        condition = { left = { call = { name = "more" } }, op = "===", right = { value = true } }

            [[statements.body]]
            kind = "assign"
            target = { name = "count" }
            op = "+="
            value = 1
        "#,
    );

    insta::assert_snapshot!(output, @r#"
    switch( $action ) {
        case "start" :
            $this->start();
            break;
        default :
            return;
            break;
    } // end switch
    do {
        $count += 1;
    } while( more() === true );
    "#);
}

#[test]
fn test_format_table_controls_output() {
    let snippet: Snippet = r#"
        [format]
        indent = "  "
        base_indent = "    "
        eol = "crlf"

        [[statements]]
        kind = "while"
        condition = { value = true }

            [[statements.body]]
            kind = "raw"
            lines = ["tick();", "", "sleep( 1 );"]
    "#
    .parse()
    .unwrap();

    assert_eq!(
        snippet.render_joined().unwrap(),
        "    while( true ) {\r\n      tick();\r\n\r\n      sleep( 1 );\r\n    } // end while\r\n"
    );
}

#[test]
fn test_if_elseif_else_chain() {
    let output = render(
        r#"
        [[statements]]
        kind = "if"
        condition = { left = { reference = { name = "n" } }, op = "<", right = { value = 0 } }
            [[statements.body]]
            kind = "return"
            value = -1

        [[statements]]
        kind = "elseif"
        condition = { left = { reference = { name = "n" } }, op = "==", right = { value = 0 } }
            [[statements.body]]
            kind = "return"
            value = 0

        [[statements]]
        kind = "else"
            [[statements.body]]
            kind = "return"
            value = 1.5
        "#,
    );

    insta::assert_snapshot!(output, @r"
    if( $n < 0 ) {
        return -1;
    } elseif( $n == 0 ) {
        return 0;
    } else {
        return 1.5;
    } // end if
    ");
}

#[test]
fn test_foreign_chain_owner_is_codegen_error() {
    let snippet: Snippet = r#"
        [[statements]]
        kind = "call"
        chain = [
            { owner = "this", name = "load" },
            { owner = "self", name = "save" },
        ]
    "#
    .parse()
    .unwrap();

    let err = snippet.render().unwrap_err();
    assert!(matches!(*err, Error::Codegen { .. }));
}

#[test]
fn test_snippet_file_roundtrip_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snippet.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[[statements]]\nkind = \"return\"\nvalue = 44.4444444444").unwrap();

    let snippet_file = SnippetFile::open(&path).unwrap();
    assert_eq!(snippet_file.render().unwrap(), vec!["return 44.4444444444;"]);
}

#[test]
fn test_parse_error_has_span() {
    let err = Snippet::from_str_with_filename("[[statements]\nkind = ", "broken.toml").unwrap_err();
    match *err {
        Error::Parse { span, .. } => assert!(span.is_some()),
        other => panic!("unexpected error: {other:?}"),
    }
}
