//! Read a YAML document on stdin and re-emit it block- and flow-preferred.
//!
//! ```sh
//! cargo run --example transcode < config.yml
//! ```

use std::io::Read;

use anyhow::{Context, Result};
use yamlet::Config;

fn main() -> Result<()> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("reading stdin")?;

    let doc = yamlet::from_str(&input).context("decoding input")?;

    println!("# block");
    print!("{}", yamlet::to_string(&doc)?);
    println!("# flow");
    print!("{}", yamlet::to_string_with(&Config::flow(), &doc)?);
    Ok(())
}
