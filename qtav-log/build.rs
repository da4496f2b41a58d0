// SPDX-FileCopyrightText: 2025 2025 Contributors to the Media eXchange Layer project.
// SPDX-License-Identifier: Apache-2.0

//! Build script for the `qtav-log` crate.
//!
//! This script generates `constants.rs` containing compile-time facts about
//! the build (target triple and profile). The banner module prints them once
//! on the first enabled log call.

use std::env;
use std::path::PathBuf;

fn main() {
    // Cargo always sets both for build scripts; fall back rather than fail the build.
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    let variant = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    // Generate constants.rs in the build output directory
    let out_path = PathBuf::from(env::var("OUT_DIR").expect("failed to get output directory"))
        .join("constants.rs");

    let data = format!(
        "pub const QTAV_LOG_BUILD_TARGET: &str = {target:?};\n\
        pub const QTAV_LOG_BUILD_VARIANT: &str = {variant:?};\n"
    );
    std::fs::write(out_path, data).expect("Unable to write file");
    println!("cargo:rerun-if-changed=build.rs");
}
