//! Prints the value range validator of a node.
//!
//! Run with: `cargo run --example value_range [node.xml]`
//!
//! Without an argument a built-in demo node is used. Set `RUST_LOG=debug`
//! to see the generator's tracing output.

use objdictgen::prelude::*;
use tracing_subscriber::EnvFilter;

const DEMO_NODE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<node name="DemoSlave" id="0x02" type="slave" description="Value range demo">
    <entry index="0x0005" name="UNSIGNED8"/>
    <entry index="0x00A0" name="UNS8[0-100]">
        <sub index="1" value="0x05"/>
        <sub index="2" value="0"/>
        <sub index="3" value="100"/>
    </entry>
    <entry index="0x00A1" name="INTEGER16[-500-500]">
        <sub index="1" value="0x03"/>
        <sub index="2" value="-500"/>
        <sub index="3" value="500"/>
    </entry>
    <entry index="0x1000" name="Device Type">
        <sub index="0" value="0x191"/>
    </entry>
    <entry index="0x1400" name="Receive PDO 1 Parameter"/>
    <entry index="0x2000" name="Motor Speed">
        <sub index="0" value="1500"/>
    </entry>
</node>"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let xml = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEMO_NODE.to_string(),
    };

    let node = parse_node(&xml)?;
    let generated = Generator::new(&node).generate()?;

    println!("/* Node {} */", generated.context.metadata().node_name);
    for category in IndexCategory::ALL {
        let indices = generated.indices.in_category(category);
        if !indices.is_empty() {
            println!("/* {}: {:04X?} */", category.name(), indices);
        }
    }
    for range in &generated.value_ranges {
        println!(
            "/* {} -> {} */",
            format_name(&range.name),
            c_type_name(&range.base.target)
        );
    }
    print!("{}", generated.value_range_content);

    Ok(())
}
