// Build script that mirrors the static site (page, config, wasm pkg) into `dist/`.
// `dist/` is the deploy artifact for static hosting; `cargo run` serves `static/`.
use std::path::Path;

use fs_extra::dir::{copy, create_all, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }

    // Start from an empty dist/ so removed assets don't linger.
    let out_dir = Path::new("dist");
    if let Err(err) = create_all(out_dir, true) {
        println!("cargo:warning=could not prepare dist/: {err}");
        return;
    }

    let options = CopyOptions {
        content_only: true,
        ..CopyOptions::new()
    };
    if let Err(err) = copy(static_dir, out_dir, &options) {
        println!("cargo:warning=copying static/ to dist/ failed: {err}");
    }
}
