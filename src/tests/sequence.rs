use anyhow::{Context, Result};

#[test]
fn block_sequence() -> Result<()> {
    let doc = crate::from_str("- one\n- two\n- three")?;
    let items = doc.as_sequence().context("missing root sequence")?;

    assert_eq!(items.len(), 3);
    assert_eq!(items[1].as_str(), Some("two"));
    Ok(())
}

#[test]
fn sequence_at_key_column() -> Result<()> {
    let doc = crate::from_str(
        "t:\n- part_no: A4786\n  descrip: Water Bucket (Filled)\n  price: 1.47\n  quantity: 4",
    )?;

    let items = doc
        .get("t")
        .and_then(|v| v.as_sequence())
        .context("missing t")?;

    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].get("part_no").and_then(|v| v.as_str()),
        Some("A4786")
    );
    assert_eq!(
        items[0].get("descrip").and_then(|v| v.as_str()),
        Some("Water Bucket (Filled)")
    );
    Ok(())
}

#[test]
fn sequence_indented_under_key() -> Result<()> {
    let doc = crate::from_str("t:\n  - 1\n  - 2")?;

    let items = doc
        .get("t")
        .and_then(|v| v.as_sequence())
        .context("missing t")?;

    assert_eq!(items.len(), 2);
    Ok(())
}

#[test]
fn nested_sequence() -> Result<()> {
    let doc = crate::from_str("- - a\n  - b\n- c")?;
    let items = doc.as_sequence().context("missing root sequence")?;

    assert_eq!(items.len(), 2);

    let inner = items[0].as_sequence().context("missing inner sequence")?;
    assert_eq!(inner.len(), 2);
    assert_eq!(items[1].as_str(), Some("c"));
    Ok(())
}

#[test]
fn dash_alone_is_null_item() -> Result<()> {
    let doc = crate::from_str("-\n- a")?;
    let items = doc.as_sequence().context("missing root sequence")?;

    assert!(items[0].is_null());
    assert_eq!(items[1].as_str(), Some("a"));
    Ok(())
}

#[test]
fn sequence_ends_on_dedent() -> Result<()> {
    let doc = crate::from_str("t:\n- 1\nu: 2")?;

    assert_eq!(
        doc.get("t").and_then(|v| v.as_sequence()).map(<[_]>::len),
        Some(1)
    );
    assert_eq!(doc.get("u").and_then(|v| v.as_u32()), Some(2));
    Ok(())
}

#[test]
fn negative_number_is_not_a_dash() -> Result<()> {
    let doc = crate::from_str("- -42")?;
    let items = doc.as_sequence().context("missing root sequence")?;
    assert_eq!(items[0].as_i32(), Some(-42));
    Ok(())
}
