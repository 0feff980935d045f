//! Build script for ksplink-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates link.toml and bakes it into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use ksplink_core::LinkConfig;

/// Baud rate used when link.toml has no `[uart]` section
const DEFAULT_BAUDRATE: u32 = 38400;

fn main() {
    setup_linker();
    generate_link_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse link.toml, validate it, and write `link_config.rs` to OUT_DIR
fn generate_link_config() {
    println!("cargo:rerun-if-changed=link.toml");

    let config_path = Path::new("link.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: link.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a link.toml next to its Cargo.toml.       ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Failed to read link.toml                                 ║\n\
            ║                                                                  ║\n\
            ║  Error: {:<56} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            e
        ),
    };

    let value: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid TOML syntax in link.toml                         ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&e.to_string())
        ),
    };

    let link = parse_link_section(&value);
    let baudrate = parse_baudrate(&value);

    if let Err(e) = link.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid [link] section in link.toml                      ║\n\
            ║                                                                  ║\n\
            ║  {:<64} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}", e)
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let generated = format!(
        "/// Link timing baked in from link.toml\n\
         pub const LINK_CONFIG: ksplink_core::LinkConfig = ksplink_core::LinkConfig {{\n    \
             idle_timeout_ms: {},\n    \
             control_refresh_ms: {},\n\
         }};\n\
         \n\
         /// UART baud rate baked in from link.toml\n\
         pub const UART_BAUDRATE: u32 = {};\n",
        link.idle_timeout_ms, link.control_refresh_ms, baudrate
    );
    fs::write(out_dir.join("link_config.rs"), generated).unwrap();

    println!(
        "cargo:warning=link.toml validated: idle timeout {} ms, control refresh {} ms, {} baud",
        link.idle_timeout_ms, link.control_refresh_ms, baudrate
    );
}

/// Deserialize `[link]`, falling back to defaults for missing keys
fn parse_link_section(config: &toml::Value) -> LinkConfig {
    let Some(section) = config.get("link") else {
        return LinkConfig::default();
    };

    match section.clone().try_into::<LinkConfig>() {
        Ok(link) => link,
        Err(e) => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid [link] section in link.toml                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&e.to_string())
        ),
    }
}

/// Read `uart.baudrate`
fn parse_baudrate(config: &toml::Value) -> u32 {
    let Some(value) = config.get("uart").and_then(|uart| uart.get("baudrate")) else {
        return DEFAULT_BAUDRATE;
    };

    match value.as_integer() {
        Some(baud) if baud > 0 && baud <= u32::MAX as i64 => baud as u32,
        _ => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: uart.baudrate must be a positive integer                 ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        ),
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
