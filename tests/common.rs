#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small but complete LST file: series line, preamble, directive, header,
/// a decorative row, plain rows, a mailing link and an external link.
pub const SAMPLE_LST: &str = r#"Fanac Test Zine;Bob Tucker;1950-1952;Genzine

<p>A short-lived genzine.</p>

<!-- fanac-instructions: Alphabetize individually -->

Issue;Year;Month;Pages;APA Mailing
<h2>1950</h2>;
tz01.pdf>Issue 1;1950;May;12;<a href="https://fanac.org/fanzines/APA_Mailings/FAPA/FAPA51.html">FAPA 51</a>
tz02.pdf>Issue 2;1950;Aug;10;
http://example.com/tz03.html>Issue 3;1951;;8;
"#;

/// Command with HOME pointed at `home`, so config, journals and the upload
/// log stay inside the test's temp dir.
pub fn rzs(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("rzinesync");
    cmd.env("HOME", home).env("APPDATA", home);
    cmd
}

pub fn temp_home() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Write `content` to `dir/name` and return the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, content).expect("write file");
    path
}

pub fn path_str(p: &Path) -> String {
    p.to_string_lossy().to_string()
}
