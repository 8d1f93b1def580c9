//! Build script for the jobly crate.
//!
//! Loads the backend address at compile time so `option_env!("JOBLY_BASE_URL")`
//! can see it from wasm builds, where there is no process environment.
//!
//! Priority order:
//! 1. Environment variables already set (e.g., from CI/CD, system env)
//! 2. Variables from `.env` file (if it exists)
//! 3. Variables from `.env.example` file (fallback for CI builds)

use std::env;
use std::fs;
use std::path::PathBuf;

const CONFIG_VARS: [&str; 1] = ["JOBLY_BASE_URL"];

fn main() {
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-changed=.env.example");
    for var in CONFIG_VARS {
        println!("cargo:rerun-if-env-changed={}", var);
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let env_file = manifest_dir.join(".env");
    let env_example_file = manifest_dir.join(".env.example");

    let env_vars_set = CONFIG_VARS
        .iter()
        .filter(|&var| env::var(var).is_ok())
        .count();

    let file_to_load = if env_file.exists() {
        Some(env_file)
    } else if env_vars_set == 0 && env_example_file.exists() {
        Some(env_example_file)
    } else {
        None
    };

    let Some(file_path) = file_to_load else {
        if env_vars_set == 0 {
            println!(
                "cargo:warning=JOBLY_BASE_URL not set; the client will use its built-in default"
            );
        }
        return;
    };

    let contents = fs::read_to_string(&file_path).expect("Failed to read env file");

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // Only forward our own keys, and never override the real environment
            if CONFIG_VARS.contains(&key) && env::var(key).is_err() {
                println!("cargo:rustc-env={}={}", key, value);
            }
        }
    }
}
