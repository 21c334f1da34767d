//! `buf build` invocation (descriptor set acquisition).

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub(crate) fn build_descriptor_set_json(
    root: &Path,
    out: &Path,
    exclude_imports: bool,
    exclude_source_info: bool,
) -> Result<()> {
    let mut cmd = Command::new("buf");
    cmd.arg("build")
        .arg(root)
        .arg("--as-file-descriptor-set")
        .arg("-o")
        .arg(out);

    if exclude_imports {
        cmd.arg("--exclude-imports");
    }
    if exclude_source_info {
        cmd.arg("--exclude-source-info");
    }

    // In sandboxed environments, Buf may not be able to write to
    // `$HOME/.cache`. Default to a workspace-local cache to keep
    // `buf build` working.
    let cache_dir = PathBuf::from("build/buf_cache");
    let _ = fs::create_dir_all(&cache_dir);
    cmd.env("XDG_CACHE_HOME", cache_dir);

    let output = cmd.output().with_context(|| "failed to run `buf build`")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("buf build failed:\n{stderr}"));
    }
    Ok(())
}
