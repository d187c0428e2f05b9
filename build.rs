//! Build script: embeds the crate version from `COPY_MAPPING_VERSION` or `git describe`.

use std::process::Command;

fn main() {
    // Prefer COPY_MAPPING_VERSION if set (e.g. by a release pipeline),
    // otherwise fall back to git describe for local builds.
    if let Ok(version) = std::env::var("COPY_MAPPING_VERSION") {
        println!("cargo:rustc-env=COPY_MAPPING_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=COPY_MAPPING_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=COPY_MAPPING_VERSION");
}
