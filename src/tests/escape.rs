use anyhow::Result;

macro_rules! test {
    ($from:expr, $to:expr) => {
        let doc = crate::from_str($from)?;
        assert_eq!(doc.as_str(), Some($to));
    };
}

#[test]
fn double_quotes() -> Result<()> {
    test!("\"a \\n b\"", "a \n b");
    test!("\"a \\t b\"", "a \t b");
    test!("\"a \\r b\"", "a \r b");
    test!("\"a \\0 b\"", "a \x00 b");
    test!("\"a \\b b\"", "a \x08 b");
    test!("\"a \\f b\"", "a \x0c b");
    test!("\"a \\/ b\"", "a / b");
    test!("\"a \\\\ b\"", "a \\ b");
    test!("\"a \\\" b\"", "a \" b");

    test!("\"a \\x77 b\"", "a \x77 b");
    test!("\"a \\u79c1 b\"", "a 私 b");
    Ok(())
}

#[test]
fn single_quotes() -> Result<()> {
    test!("'It is a party!'", "It is a party!");
    test!("'It''s a party!'", "It's a party!");
    Ok(())
}

#[test]
fn line_continuation() -> Result<()> {
    test!("\"a \\\n   b\"", "a b");
    Ok(())
}

#[test]
fn quoted_line_folding() -> Result<()> {
    test!("'a\n b'", "a b");
    test!("\"a\n b\"", "a b");
    test!("\"a\n\n b\"", "a\nb");
    Ok(())
}

#[test]
fn bad_escapes() {
    assert!(crate::from_str("\"a \\q b\"").is_err());
    assert!(crate::from_str("\"a \\x7g b\"").is_err());
    assert!(crate::from_str("\"a \\u123\"").is_err());
    assert!(crate::from_str("\"unterminated").is_err());
    assert!(crate::from_str("'unterminated").is_err());
}
