use anyhow::{anyhow, Context, Result};

/// Documents which exercise structure, quoting and null handling.
const DOCS: &[&str] = &[
    "part_no: A4786\nprice: 1.47\nquantity: 4",
    "a: true\nb: false\nc: null",
    "t:\n- part_no: A4786\n  descrip: Water Bucket (Filled)",
    "nested:\n  seq:\n  - 1\n  - 2.5\n  - x",
    "{a: [1, 2], b: {c: d}}",
    "s1: 'single'\ns2: \"double\"\nn: 'null'",
    "- one\n- two\n- - deep\n  - deeper",
];

/// Compare the processing of documents with a known good implementation:
/// whatever we emit for a decoded document must parse, under `serde_yaml`,
/// to the same value as the original input.
#[test]
fn round_trip_agrees_with_serde_yaml() -> Result<()> {
    for doc in DOCS {
        let reference: serde_yaml::Value =
            serde_yaml::from_str(doc).context("serde_yaml failed to parse the input")?;

        let decoded = yamlet::from_str(doc).with_context(|| anyhow!("decode: {doc:?}"))?;
        let encoded =
            yamlet::to_string(&decoded).with_context(|| anyhow!("encode: {doc:?}"))?;

        let round: serde_yaml::Value = serde_yaml::from_str(&encoded)
            .with_context(|| anyhow!("serde_yaml failed to parse our output {encoded:?}"))?;

        anyhow::ensure!(
            round == reference,
            "output {encoded:?} for {doc:?} diverged: {round:?} != {reference:?}"
        );
    }

    Ok(())
}
