use std::io::{self, Write};
use std::path::Path;

use frag_prep::{BuildReport, Library};

use crate::util::text::{truncate, truncate_start};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_FRAGMENT_ROWS: usize = 15;

pub fn print_library_info(library: &Library) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let rows = vec![
        ("Directory", library.root.display().to_string()),
        ("Format", library.format.to_string()),
        ("Fragments", library.len().to_string()),
    ];

    print_kv_table(&mut out, "Fragment Library", &rows);
}

pub fn print_fragment_results(report: &BuildReport) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows: Vec<(String, String, bool)> = report
        .instructions
        .iter()
        .map(|i| (file_name(&i.fragment), i.fragment_atom.clone(), true))
        .collect();
    rows.extend(
        report
            .skipped
            .iter()
            .map(|s| (file_name(&s.path), s.reason.clone(), false)),
    );
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    print_fragment_table(&mut out, &rows);
}

pub fn print_run_summary(rows: &[(&str, String)]) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    print_kv_table(&mut out, "Summary", rows);
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_fragment_table(out: &mut impl Write, rows: &[(String, String, bool)]) {
    let name_w = 20usize;
    let status_w = 4usize;
    let sep_overhead = 10;
    let atom_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + status_w + sep_overhead);

    let _ = writeln!(out, "{}┌─ Fragments ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{name_line}┬{status_line}┬{atom_line}┐",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        status_line = "─".repeat(status_w + 2),
        atom_line = "─".repeat(atom_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:^status_w$} │ {:<atom_w$} │",
        INDENT,
        "File",
        "OK",
        "Atom / Reason",
    );
    let _ = writeln!(
        out,
        "{}├{name_line}┼{status_line}┼{atom_line}┤",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        status_line = "─".repeat(status_w + 2),
        atom_line = "─".repeat(atom_w + 2)
    );

    for (name, detail, ok) in rows.iter().take(MAX_FRAGMENT_ROWS) {
        let mark = if *ok { "✓" } else { "✗" };
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:^status_w$} │ {:<atom_w$} │",
            INDENT,
            truncate_start(name, name_w),
            mark,
            truncate(detail, atom_w),
        );
    }

    if rows.len() > MAX_FRAGMENT_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:^status_w$} │ {:<atom_w$} │",
            INDENT,
            "...",
            "",
            format!("({} more fragments)", rows.len() - MAX_FRAGMENT_ROWS),
        );
    }

    let _ = writeln!(
        out,
        "{}└{name_line}┴{status_line}┴{atom_line}┘",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        status_line = "─".repeat(status_w + 2),
        atom_line = "─".repeat(atom_w + 2)
    );
    let _ = writeln!(out);
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 12usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);
    let k_line = "─".repeat(key_w + 2);
    let v_line = "─".repeat(val_w + 2);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{INDENT}┌{k_line}┬{v_line}┐");

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate_start(val, val_w),
        );
    }

    let _ = writeln!(out, "{INDENT}└{k_line}┴{v_line}┘");
    let _ = writeln!(out);
}
