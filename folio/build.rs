fn main() {
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");
    println!("cargo::rerun-if-env-changed=RUST_LOG_PRETTY");
    let pretty = std::env::var("RUST_LOG_PRETTY").unwrap_or_default();
    if matches!(pretty.as_str(), "1" | "true") {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
