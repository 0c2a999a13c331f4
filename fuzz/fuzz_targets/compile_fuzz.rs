//! Compiler fuzz target: split arbitrary bytes into a type row (one descriptor per line)
//! and compile it. The compiler must not panic; it should return Ok(FieldTree) or Err(SchemaError).
//! Build with: cargo fuzz run compile_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    let types: Vec<&str> = s.lines().take(4096).collect();
    if let Ok(tree) = tabconf::compile_types(&types) {
        let row: Vec<String> = (0..tree.column_count()).map(|i| i.to_string()).collect();
        let _ = tabconf::render_row(&tree, &row, &tabconf::ExportOptions::default());
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run compile_fuzz");
}
