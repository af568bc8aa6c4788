use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::{fs, io};

use crate::BootstrapArgs;
use crate::decompress::decompress_files;

const CONFIG_SAMPLE: &str = r#"[site]
title = "My Blog"
url = "https://blog.example.net"
description = "A personal blog about web development"
default_lang = "en"

# For the file locations, if you want them to be relative to the executable
# directory, use ${exe_dir}/location
[paths]
posts_dir = "posts"
template_dir = "template"
public_dir = "public"
output_dir = "dist"
# font_file = "fonts/NotoSansCJKjp-Bold.otf"
"#;

fn write_futaba_cfg(out_dir: &PathBuf) -> io::Result<()> {
    let file = File::create(out_dir.join("futaba.toml"))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(CONFIG_SAMPLE.as_bytes())?;

    writer.flush()
}

pub fn bootstrap_cmd(args: BootstrapArgs) {
    let out_path = PathBuf::from(&args.out_dir);
    let out_path = match fs::canonicalize(out_path) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error converting path to absolute: {} - {}", &args.out_dir, e);
            return;
        }
    };

    if !out_path.is_dir() {
        eprintln!("Output path must be a directory: {}", out_path.display());
        return;
    }

    if let Err(e) = decompress_files(&out_path) {
        eprintln!("Error bootstrapping: {}", e);
        return;
    };

    if let Err(e) = write_futaba_cfg(&out_path) {
        eprintln!("Error writing configuration: {}", e);
        return;
    }

    println!("New blog created in {}", out_path.display());
    println!("Drop your posts into posts/ and run futaba from that directory");
}
