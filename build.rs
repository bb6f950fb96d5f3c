#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    // Only embed the icon when it ships with the sources
    if !std::path::Path::new("res/rzinesync.ico").exists() {
        return;
    }

    let mut res = WindowsResource::new();
    res.set_icon("res/rzinesync.ico")
        .set("FileDescription", "rZineSync CLI")
        .set("ProductName", "rZineSync")
        .set("OriginalFilename", "rzinesync.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed icon resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
