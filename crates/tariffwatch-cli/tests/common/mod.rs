use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

#[allow(dead_code)]
pub const WEEK1: &str = "\
HTS Number,Indent,Description,General Rate of Duty,Special Rate of Duty,Column 2 Rate of Duty,Additional Duties
0101.21.00.10,2,Purebred breeding horses,Free,,Free,
6111.20.60.10,3,\"Babies' garments, of cotton\",8.1%,\"Free (AU,BH)\",90%,
8471.30.01.00,1,Portable automatic data processing machines,Free,,35%,
,0,Heading row without a code,,,,
8703.23.01.90,2,Passenger motor vehicles,2.5%,Free (A+),10%,
";

#[allow(dead_code)]
pub const WEEK2: &str = "\
HTS Number,Indent,Description,General Rate of Duty,Special Rate of Duty,Column 2 Rate of Duty,Additional Duties
0101.21.00.10,2,Purebred breeding horses,Free,,Free,
6111.20.60.10,3,\"Babies' garments, of cotton\",10%,\"Free (AU,BH)\",90%,
8703.23.01.90,2,Passenger motor vehicles,2.5%,Free (A+),10%,See 9903.88.15
9903.88.15,1,Articles the product of China,The duty provided in the applicable subheading + 7.5%,,,
";

/// Write both exports into `dir`
#[allow(dead_code)]
pub fn write_exports(dir: &Path) -> (PathBuf, PathBuf) {
    let week1 = dir.join("week1.csv");
    let week2 = dir.join("week2.csv");
    fs::write(&week1, WEEK1).unwrap();
    fs::write(&week2, WEEK2).unwrap();
    (week1, week2)
}

#[allow(dead_code)]
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

/// Run the CLI binary inside `dir`
#[allow(dead_code)]
pub fn tariffwatch(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tariffwatch"))
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
