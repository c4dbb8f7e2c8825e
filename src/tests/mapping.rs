use anyhow::{Context, Result};

#[test]
fn simple_block_mapping() -> Result<()> {
    let doc = crate::from_str("part_no: A4786\nprice: 1.47\nquantity: 4")?;
    let entries = doc.as_mapping().context("missing root mapping")?;

    assert_eq!(entries.len(), 3);
    assert_eq!(doc.get("part_no").and_then(|v| v.as_str()), Some("A4786"));
    assert_eq!(doc.get("price").and_then(|v| v.as_str()), Some("1.47"));
    assert_eq!(doc.get("quantity").and_then(|v| v.as_str()), Some("4"));
    Ok(())
}

#[test]
fn null_disambiguation() -> Result<()> {
    let doc = crate::from_str(
        "part_no: A4786\ndescrip2: 'null'\ndescrip: \"null\"\nquantity: null",
    )?;

    assert_eq!(doc.get("descrip2").and_then(|v| v.as_str()), Some("null"));
    assert_eq!(doc.get("descrip").and_then(|v| v.as_str()), Some("null"));
    assert!(doc.get("quantity").context("missing quantity")?.is_null());
    assert_ne!(doc.get("descrip"), doc.get("quantity"));
    Ok(())
}

#[test]
fn nested_mapping() -> Result<()> {
    let doc = crate::from_str("one: 1\ntwo: 2\nthree:\n  four: 4\n  five: 5")?;
    let three = doc.get("three").context("missing three")?;

    assert_eq!(three.get("four").and_then(|v| v.as_u32()), Some(4));
    assert_eq!(three.get("five").and_then(|v| v.as_u32()), Some(5));
    Ok(())
}

#[test]
fn empty_value_is_null() -> Result<()> {
    let doc = crate::from_str("a:\nb: 2")?;

    assert!(doc.get("a").context("missing a")?.is_null());
    assert_eq!(doc.get("b").and_then(|v| v.as_u32()), Some(2));
    Ok(())
}

#[test]
fn trailing_empty_value_is_null() -> Result<()> {
    let doc = crate::from_str("a: 1\nb:")?;
    assert!(doc.get("b").context("missing b")?.is_null());
    Ok(())
}

#[test]
fn insertion_order_preserved() -> Result<()> {
    let doc = crate::from_str("z: 1\na: 2\nm: 3")?;

    let keys: Vec<_> = doc
        .as_mapping()
        .context("missing root mapping")?
        .iter()
        .filter_map(|(key, _)| key.as_str())
        .collect();

    assert_eq!(keys, ["z", "a", "m"]);
    Ok(())
}

#[test]
fn indent_independence() -> Result<()> {
    let plain = crate::from_str("a: 1\nb:\n  c: 2")?;
    let shifted = crate::from_str("    a: 1\n    b:\n      c: 2")?;
    assert_eq!(plain, shifted);
    Ok(())
}

#[test]
fn duplicate_keys_kept_in_order() -> Result<()> {
    let doc = crate::from_str("a: 1\na: 2")?;
    assert_eq!(doc.as_mapping().context("missing root mapping")?.len(), 2);
    Ok(())
}

#[test]
fn value_then_key_on_one_line_fails() {
    assert!(crate::from_str("a: b: c").is_err());
}
