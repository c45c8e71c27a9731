use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let include_dir = PathBuf::from(&crate_dir).join("include");
    if let Err(e) = std::fs::create_dir_all(&include_dir) {
        println!("cargo:warning=cannot create {}: {}", include_dir.display(), e);
        return;
    }

    println!("cargo:rerun-if-changed=src/ffi/mod.rs");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("NAMESPACE_NAMING_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(include_dir.join("namespace_naming.h"));
        }
        // header generation must not break the Rust build
        Err(e) => println!("cargo:warning=cbindgen failed: {}", e),
    }
}
