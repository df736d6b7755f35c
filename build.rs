use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";
const REQUIRED_SECTIONS: &[&str] = &["page", "font", "layout", "styles", "table"];

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let content = fs::read_to_string(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("Failed to read {DEFAULT_CONFIG}: {e}"));

    // The compiled-in defaults must at least be well-formed TOML with every section present.
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid {DEFAULT_CONFIG}: {e}"),
    };

    for section in REQUIRED_SECTIONS {
        if !table.get(*section).is_some_and(toml::Value::is_table) {
            panic!("{DEFAULT_CONFIG} is missing the [{section}] section");
        }
    }
}
