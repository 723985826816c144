use std::env;

fn main() {
    // Host builds (unit and integration tests) link without the kernel's linker script.
    if let Ok(linker_file) = env::var("LINKER_FILE") {
        // Tells Cargo to run again if the file or directory at $path changes.
        println!("cargo:rerun-if-changed={}", linker_file);
    }
    println!("cargo:rerun-if-env-changed=LINKER_FILE");
}
