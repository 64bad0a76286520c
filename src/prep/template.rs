//! Global-library configuration templates.
//!
//! Templates use `$NAME` / `${NAME}` placeholders. Substitution is lenient:
//! placeholders without a value and stray `$` characters are copied through
//! unchanged, and `$$` collapses to a single `$`.

use super::error::Error;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Template bundled with the crate.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/global_template.conf");

/// Returns the template at `path`, or [`DEFAULT_TEMPLATE`].
pub fn load_template(path: Option<&Path>) -> Result<Cow<'static, str>, Error> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|source| Error::Template {
                path: path.to_path_buf(),
                source,
            }),
        None => Ok(Cow::Borrowed(DEFAULT_TEMPLATE)),
    }
}

/// Fills `$ATOM` with the scaffold heavy atom and `$PATH` with the library.
pub fn render_global(template: &str, heavy_atom: &str, library: &Path) -> String {
    let library = library.display().to_string();
    safe_substitute(template, &[("ATOM", heavy_atom), ("PATH", &library)])
}

/// Replaces known placeholders and leaves everything else verbatim.
pub fn safe_substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let lookup = |name: &str| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
            continue;
        }

        if let Some(braced) = after.strip_prefix('{') {
            let name_len = identifier_len(braced);
            if name_len > 0 && braced[name_len..].starts_with('}') {
                let name = &braced[..name_len];
                match lookup(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &braced[name_len + 1..];
                continue;
            }
        } else {
            let name_len = identifier_len(after);
            if name_len > 0 {
                let name = &after[..name_len];
                match lookup(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('$');
                        out.push_str(name);
                    }
                }
                rest = &after[name_len..];
                continue;
            }
        }

        out.push('$');
        rest = after;
    }

    out.push_str(rest);
    out
}

fn identifier_len(text: &str) -> usize {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    chars
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
