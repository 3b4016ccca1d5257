//! Generates foreign-language bindings for the recipe catalog.
//!
//! Build the library first, then point the generator at it:
//! ```bash
//! cargo build --release
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/librecipe_catalog.so --language kotlin --out-dir ./bindings
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
