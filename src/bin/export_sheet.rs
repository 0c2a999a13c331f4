//! Export sheet files (CSV / TSV) to Lua tables.
//!
//! Usage:
//!   export_sheet [OPTIONS] FILE ...
//!
//! Options:
//!   --target=T, -t T    all (default), server or client: drop columns whose mode excludes T
//!   --out=DIR, -o DIR   write <stem>.lua into DIR instead of printing to stdout
//!   --delimiter=C       field delimiter (default: tab for .tsv/.txt, comma otherwise)
//!   --verbose, -v       debug logging (RUST_LOG overrides)
//!
//! Exit code 1 if any file fails to load, compile or render.

use anyhow::{anyhow, bail, Context};
use std::path::{Path, PathBuf};
use tabconf::logging::init_logging;
use tabconf::source::{delimiter_for_path, read_table};
use tabconf::{ExportOptions, ExportTarget, Sheet};

fn take_flag(args: &mut Vec<String>, long: &str, short: &str) -> bool {
    if let Some(pos) = args.iter().position(|a| a == long || a == short) {
        args.remove(pos);
        true
    } else {
        false
    }
}

/// `--name=value`, `--name value` or `-s value`.
fn take_value(args: &mut Vec<String>, long: &str, short: &str) -> anyhow::Result<Option<String>> {
    let prefix = format!("{}=", long);
    if let Some(pos) = args.iter().position(|a| a.starts_with(&prefix)) {
        let arg = args.remove(pos);
        return Ok(Some(arg[prefix.len()..].to_string()));
    }
    if let Some(pos) = args.iter().position(|a| a == long || a == short) {
        args.remove(pos);
        if pos >= args.len() {
            bail!("{} needs a value", long);
        }
        return Ok(Some(args.remove(pos)));
    }
    Ok(None)
}

fn export_file(path: &Path, delimiter: Option<u8>, out_dir: Option<&Path>, options: &ExportOptions) -> anyhow::Result<()> {
    let delimiter = delimiter.unwrap_or_else(|| delimiter_for_path(path));
    let rows = read_table(path, delimiter).with_context(|| format!("{}: read failed", path.display()))?;
    let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("sheet");
    let compiled = Sheet::from_rows(name, rows)
        .compile()
        .with_context(|| format!("{}: bad header", path.display()))?;
    tracing::debug!("{}: field tree\n{}", path.display(), compiled.tree);
    let export = compiled
        .export(options)
        .with_context(|| format!("{}: export failed", path.display()))?;
    let text = export.to_lua();
    match out_dir {
        Some(dir) => {
            let target = dir.join(format!("{}.lua", export.name));
            std::fs::write(&target, text).with_context(|| format!("{}: write failed", target.display()))?;
            eprintln!("{} -> {} ({} row(s))", path.display(), target.display(), export.data.len());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = take_flag(&mut args, "--verbose", "-v");
    init_logging(verbose);

    let target = match take_value(&mut args, "--target", "-t")? {
        Some(t) => ExportTarget::parse(&t).ok_or_else(|| anyhow!("unknown target `{}` (all, server, client)", t))?,
        None => ExportTarget::All,
    };
    let out_dir = take_value(&mut args, "--out", "-o")?.map(PathBuf::from);
    let delimiter = match take_value(&mut args, "--delimiter", "-d")? {
        Some(d) if d == "\\t" || d == "tab" => Some(b'\t'),
        Some(d) if d.len() == 1 => Some(d.as_bytes()[0]),
        Some(d) => bail!("delimiter must be a single byte, got `{}`", d),
        None => None,
    };
    if args.is_empty() {
        bail!("usage: export_sheet [--target=all|server|client] [--out=DIR] [--delimiter=C] FILE ...");
    }
    if let Some(dir) = &out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let options = ExportOptions::new().with_target(target);
    let mut failed = 0usize;
    for path in &args {
        if let Err(e) = export_file(Path::new(path), delimiter, out_dir.as_deref(), &options) {
            eprintln!("{:#}", e);
            failed += 1;
        }
    }
    if failed > 0 {
        eprintln!("export: {} of {} file(s) failed", failed, args.len());
        std::process::exit(1);
    }
    Ok(())
}
