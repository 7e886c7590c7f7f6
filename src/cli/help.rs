//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::Config;

/// Print help message based on configuration state.
pub fn print_smart_help(config: &Config) {
    if needs_setup(config) {
        print_first_time_help();
    } else {
        print_configured_help();
    }
}

/// Whether the configuration lacks a default taxonomy.
fn needs_setup(config: &Config) -> bool {
    config.defaults.taxonomy.is_none()
}

/// Print setup guide for first-time users.
pub fn print_first_time_help() {
    println!("No default taxonomy configured. Get started with taxonomer:");
    println!();
    println!("1. Initialize configuration:");
    println!("   taxonomer config init");
    println!();
    println!("2. Point it at a taxonomy file (JSON or CSV) by editing the file");
    println!("   printed by 'taxonomer config path':");
    println!();
    println!("   [defaults]");
    println!("   taxonomy = \"/path/to/taxonomy.csv\"");
    println!();
    println!("3. Check the taxonomy loads:");
    println!("   taxonomer inspect /path/to/taxonomy.csv");
    println!();
    println!("4. Resolve a score vector:");
    println!("   taxonomer scores.json");
    println!();
    println!("Run 'taxonomer -h' for all options.");
}

/// Print brief usage reminder for configured users.
pub fn print_configured_help() {
    println!("Usage: taxonomer [FILES]... [OPTIONS]");
    println!();
    println!("Example: taxonomer scores.json -t 0.8 -k 5 -f text");
    println!();
    println!("Run 'taxonomer -h' for all options.");
}
