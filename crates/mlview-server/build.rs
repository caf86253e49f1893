// build.rs for mlview-server
//
// rust_embed requires the embedded folder to exist at compile time.
// When the frontend has not been built with `trunk build`, frontend/dist
// won't exist yet. Create a placeholder so the crate always compiles.

use std::path::Path;

fn main() {
    let dist = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../frontend/dist");

    if !dist.exists() {
        std::fs::create_dir_all(&dist).expect("failed to create placeholder frontend/dist");
        std::fs::write(
            dist.join("index.html"),
            "<!-- placeholder: run `trunk build` in frontend/ to build the dashboard -->\n",
        )
        .expect("failed to write placeholder index.html");
    }

    println!("cargo:rerun-if-changed=../../frontend/dist");
}
