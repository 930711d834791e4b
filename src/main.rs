//! Host-side helper: `cargo run` checks `static/config.json`, builds the WASM
//! bundle into `static/pkg`, and serves `static/` on a local HTTP server.

use std::process::{Command, Stdio};
use std::{env, fs, thread, time::Duration};

use lava_wasm::Config;

const CONFIG_PATH: &str = "static/config.json";

fn main() {
    // 1. The page refuses to start on a bad config, so catch it here first.
    let config = match fs::read_to_string(CONFIG_PATH)
        .map_err(|err| err.to_string())
        .and_then(|json| Config::from_json(&json).map_err(|err| err.to_string()))
    {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{CONFIG_PATH} is unusable: {err}");
            std::process::exit(1);
        }
    };
    println!(
        "{CONFIG_PATH}: {} base + {} highlight blobs, {:?} rendering, {:?} edges",
        config.base_blobs,
        config.highlight_blobs,
        config.render_mode,
        config.effective_boundary()
    );

    // 2. Build wasm bundle
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    // 3. Serve `static/` on 8000
    let port = env::var("LAVA_PORT").unwrap_or_else(|_| "8000".into());
    println!("Launching local server at http://127.0.0.1:{port} …");
    let server = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(err) = server {
        eprintln!("failed to start http server: {err}");
        std::process::exit(1);
    }

    // Keep process alive
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}
