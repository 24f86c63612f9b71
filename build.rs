use std::fs;

use toml::Value;

#[derive(Clone, Copy)]
enum Kind {
    Number,
    Text,
    Bool,
    HexColor,
}

/// Every key of the default config and the type `Config` expects for it.
const KEYS: [(&str, &str, Kind); 8] = [
    ("bullet", "color", Kind::HexColor),
    ("bullet", "gap_width", Kind::Number),
    ("bullet", "radius", Kind::Number),
    ("code", "background", Kind::HexColor),
    ("code", "font", Kind::Text),
    ("quote", "margin", Kind::Number),
    ("quote", "size", Kind::Number),
    ("page", "numbers", Kind::Bool),
];

fn main() {
    // The default config is embedded with include_str!, so reject a broken
    // one before it ships.
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for section in ["bullet", "code", "quote", "page"] {
        if !table.get(section).is_some_and(Value::is_table) {
            panic!("default_config.toml is missing the [{}] table", section);
        }
    }

    for (section, key, kind) in KEYS {
        let Some(value) = table[section].get(key) else {
            continue;
        };
        let valid = match kind {
            Kind::Number => value.is_float() || value.is_integer(),
            Kind::Text => value.is_str(),
            Kind::Bool => value.is_bool(),
            Kind::HexColor => value.as_str().is_some_and(is_hex_color),
        };
        if !valid {
            panic!(
                "{}.{} in default_config.toml has the wrong type (expected {})",
                section,
                key,
                match kind {
                    Kind::Number => "a number",
                    Kind::Text => "a string",
                    Kind::Bool => "a boolean",
                    Kind::HexColor => "#rrggbb or #rrggbbaa",
                }
            );
        }
    }
}

fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#').is_some_and(|hex| {
        (hex.len() == 6 || hex.len() == 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}
