//! Stability properties: rendered HTML re-parses unchanged, and the parser
//! accepts arbitrary input.

use chatmark::{parse, to_html, Dialect};
use proptest::prelude::*;

#[test]
fn rendered_html_parses_back_unchanged() {
    let sources = [
        "hello **world**",
        "a\n\nb",
        "# Title\n",
        "- one\n- two\n",
        "visit https://example.com now",
        "> quoted text\n",
    ];
    for source in sources {
        let first = to_html(source, Dialect::Standard).expect("source to parse");
        let second = to_html(&first, Dialect::Standard).expect("rendered output to parse");
        assert_eq!(second, first, "unstable output for {source:?}");
    }
}

proptest! {
    #[test]
    fn parsing_never_fails(input in any::<String>()) {
        prop_assert!(parse(&input, Dialect::Standard).is_ok());
        prop_assert!(parse(&input, Dialect::Chat).is_ok());
    }
}
