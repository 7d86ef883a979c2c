// Sets RIFF_VERSION for `riffctl --version`

fn main() {
    // RIFF_VERSION from the environment wins over the crate version
    let version =
        std::env::var("RIFF_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=RIFF_VERSION={}", version);
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=RIFF_VERSION");
}
