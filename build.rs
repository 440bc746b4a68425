use std::{env, fs, path::Path};
use std::io::{BufRead, BufReader};

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("phoneme_data.rs");

    // 读取音素数据文件
    let data_file = "data/phonemes.txt";
    let file = fs::File::open(data_file).expect("Failed to open phoneme data file");
    let reader = BufReader::new(file);

    let mut element_array = Vec::new();

    for line in reader.lines() {
        let line = line.expect("Error reading line");
        if line.trim().is_empty() {
            continue; // 跳过空行
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != 2 {
            panic!("Invalid data format: {}", line);
        }

        let text = parts[0].trim();
        if text.is_empty() || text.len() > 2 || !text.chars().all(|c| c.is_ascii_lowercase()) {
            panic!("Invalid phoneme spelling: {}", line);
        }

        // 标记：C 辅音, V 元音, D 双字母, N 不可作开头
        let mut flags = Vec::new();
        for mark in parts[1].split_whitespace() {
            let flag = match mark {
                "C" => "CONSONANT",
                "V" => "VOWEL",
                "D" => "DIPHTHONG",
                "N" => "NOT_FIRST",
                _ => panic!("Unknown phoneme flag '{}' in line: {}", mark, line),
            };
            flags.push(flag);
        }

        let class_count = flags.iter().filter(|f| **f == "CONSONANT" || **f == "VOWEL").count();
        if class_count != 1 {
            panic!("Phoneme must be exactly one of consonant or vowel: {}", line);
        }

        let flags_expr = flags.iter()
            .skip(1)
            .fold(format!("ElementFlags::{}", flags[0]), |acc, f| format!("{}.union(ElementFlags::{})", acc, f));

        element_array.push(format!(
            "PhoneticElement {{ text: \"{}\", flags: {} }}",
            text, flags_expr
        ));
    }

    if element_array.is_empty() {
        panic!("Phoneme data file is empty: {}", data_file);
    }

    // 生成Rust代码
    let code = format!(
        "pub(crate) static ELEMENTS: [PhoneticElement; {}] = [\n    {},\n];\n",
        element_array.len(),
        element_array.join(",\n    ")
    );

    fs::write(dest_path, code).expect("Failed to write generated file");

    // 确保数据文件变化时重建
    println!("cargo:rerun-if-changed={}", data_file);
}
