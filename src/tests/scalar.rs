use anyhow::Result;

#[test]
fn null_literals() -> Result<()> {
    assert!(crate::from_str("~")?.is_null());
    assert!(crate::from_str("null")?.is_null());
    assert!(crate::from_str("Null")?.is_null());
    assert!(crate::from_str("NULL")?.is_null());

    // Quoting makes it the string.
    assert_eq!(crate::from_str("\"null\"")?.as_str(), Some("null"));
    assert_eq!(crate::from_str("'null'")?.as_str(), Some("null"));
    Ok(())
}

#[test]
fn plain_scalars() -> Result<()> {
    let doc = crate::from_str("Water Bucket (Filled)")?;
    assert_eq!(doc.as_str(), Some("Water Bucket (Filled)"));

    // A colon not followed by whitespace stays in the scalar.
    let doc = crate::from_str("a:b")?;
    assert_eq!(doc.as_str(), Some("a:b"));

    let doc = crate::from_str("trailing   ")?;
    assert_eq!(doc.as_str(), Some("trailing"));
    Ok(())
}

#[test]
fn comments_discarded() -> Result<()> {
    let doc = crate::from_str("# leading\na: 1 # trailing\n# inner\nb: 2")?;
    assert_eq!(doc.get("a").and_then(|v| v.as_u32()), Some(1));
    assert_eq!(doc.get("b").and_then(|v| v.as_u32()), Some(2));
    Ok(())
}

#[test]
fn numbers() -> Result<()> {
    assert_eq!(crate::from_str("42")?.as_u32(), Some(42));
    assert_eq!(crate::from_str("-42")?.as_i32(), Some(-42));
    assert_eq!(crate::from_str("3.1415")?.as_f64(), Some(3.1415));
    Ok(())
}

#[test]
fn tab_indentation_rejected() {
    let error = crate::from_str("a: 1\n\tb: 2").unwrap_err();
    assert_eq!(error.location().map(|l| l.line), Some(2));
}

#[test]
fn tab_inside_scalar_tolerated() -> Result<()> {
    let doc = crate::from_str("a: b\tc")?;
    assert_eq!(doc.get("a").and_then(|v| v.as_str()), Some("b\tc"));
    Ok(())
}

#[test]
fn block_scalars_unsupported() {
    assert!(crate::from_str("a: |\n  text").is_err());
    assert!(crate::from_str("a: >-\n  text").is_err());
}

#[test]
fn empty_input_is_null() -> Result<()> {
    assert!(crate::from_str("")?.is_null());
    assert!(crate::from_str("\n\n")?.is_null());
    Ok(())
}
