//! Files baked into the firmware image by `build.rs`.

use pride_core::{
    ConfigSource,
    config::CONFIG_PATH,
};

include!(concat!(env!("OUT_DIR"), "/embedded_files.rs"));

/// Serves the configuration embedded at build time.
pub struct EmbeddedFiles;

impl ConfigSource for EmbeddedFiles {
    fn read(&self, path: &str) -> Option<&[u8]> {
        if path == CONFIG_PATH { CONFIG_JSON } else { None }
    }
}
