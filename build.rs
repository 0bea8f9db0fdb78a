//! Build script: embeds the `DOTINST_VERSION` used by `--version`.

use std::process::Command;

fn main() {
    // DOTINST_VERSION wins when set (release builds); otherwise describe the
    // working tree so local builds are traceable.
    if let Ok(version) = std::env::var("DOTINST_VERSION") {
        println!("cargo:rustc-env=DOTINST_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=DOTINST_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=DOTINST_VERSION");
}
