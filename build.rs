#![allow(clippy::indexing_slicing, clippy::exit, clippy::unwrap_used)]

use std::{
    env,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

/// Badge configuration picked up from the package root.
const CONFIG_FILE: &str = "config.json";

fn main() {
    if env::var("PROFILE").unwrap_or_default() == "release" {
        println!("cargo:rustc-env=DEFMT_LOG=off");
    }

    embed_config();

    linker_be_nice();
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

/// Write `embedded_files.rs` into `OUT_DIR`. A missing config file is not a
/// build error: the firmware reports it at startup.
fn embed_config() {
    println!("cargo:rerun-if-changed={CONFIG_FILE}");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let config_path = manifest_dir.join(CONFIG_FILE);
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let contents = if Path::new(&config_path).is_file() {
        format!(
            "/// `{CONFIG_FILE}` as found at build time.\npub const CONFIG_JSON: Option<&[u8]> = Some(include_bytes!({:?}));\n",
            config_path.display().to_string()
        )
    } else {
        println!("cargo:warning={CONFIG_FILE} not found, the badge will refuse to start");
        format!("/// `{CONFIG_FILE}` was missing at build time.\npub const CONFIG_JSON: Option<&[u8]> = None;\n")
    };

    fs::write(out_dir.join("embedded_files.rs"), contents).unwrap();
}

fn linker_be_nice() {
    let args: Vec<String> = env::args().collect();
    if args.len() > 1 {
        let kind = &args[1];
        let what = &args[2];

        match kind.as_str() {
            "undefined-symbol" => match what.as_str() {
                "_defmt_timestamp" => {
                    eprintln!();
                    eprintln!(
                        "💡 `defmt` not found - make sure `defmt.x` is added as a linker script and you have included `use defmt_rtt as _;`"
                    );
                    eprintln!();
                }
                "_stack_start" => {
                    eprintln!();
                    eprintln!("💡 Is the linker script `linkall.x` missing?");
                    eprintln!();
                }
                _ => (),
            },
            _ => {
                std::process::exit(1);
            }
        }

        std::process::exit(0);
    }

    println!(
        "cargo:rustc-link-arg=-Wl,--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );
}
