// File: crates/chart-core/build.rs
// Summary: Windows link fix for the Skia raster backend (ICU reads the registry via advapi32).

fn main() {
    #[cfg(target_os = "windows")]
    println!("cargo:rustc-link-lib=advapi32");
}
