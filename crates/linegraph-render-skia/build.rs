// File: crates/linegraph-render-skia/build.rs
// Summary: Link Windows system libraries that Skia's font manager needs.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
