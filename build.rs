fn main() {
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_PYTHON");

    let python = std::env::var_os("CARGO_FEATURE_PYTHON").is_some();
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    // The `python` cdylib resolves libpython symbols at import time on macOS.
    if python && target_os == "macos" {
        println!("cargo:rustc-cdylib-link-arg=-undefined");
        println!("cargo:rustc-cdylib-link-arg=dynamic_lookup");
    }
}
