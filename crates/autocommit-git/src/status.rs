//! Parsing of `git status --porcelain` (v1) output
//!
//! Each record is `XY PATH`, or `XY ORIG -> PATH` for renames and copies.
//! Paths with unusual characters arrive C-quoted (`"a\tb.py"`).

const RENAME_ARROW: &str = " -> ";

/// One line of porcelain status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// The raw two-character `XY` field
    pub code: String,
    pub path: String,
    /// Source path of a rename or copy
    pub orig_path: Option<String>,
}

impl StatusEntry {
    /// Status code with the blank index/worktree column removed (` M` -> `M`)
    pub fn status(&self) -> &str {
        self.code.trim()
    }

    pub fn is_rename_or_copy(&self) -> bool {
        has_orig_path(&self.code)
    }
}

fn has_orig_path(code: &str) -> bool {
    code.contains(['R', 'C'])
}

/// Parse every well-formed record, in output order
pub fn parse_porcelain(output: &str) -> Vec<StatusEntry> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let entry = parse_status_line(line);
            if entry.is_none() {
                tracing::warn!(line = line, "skipping unrecognised status line");
            }
            entry
        })
        .collect()
}

pub fn parse_status_line(line: &str) -> Option<StatusEntry> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let code = line.get(..2)?;
    let field = line.get(2..)?.strip_prefix(' ')?;

    let (orig_path, path) = if has_orig_path(code) {
        let (orig, rest) = take_path(field, true)?;
        let rest = rest.strip_prefix(RENAME_ARROW)?;
        let (path, rest) = take_path(rest, false)?;
        if !rest.is_empty() {
            return None;
        }
        (Some(orig), path)
    } else {
        let (path, rest) = take_path(field, false)?;
        if !rest.is_empty() {
            return None;
        }
        (None, path)
    };

    if path.is_empty() {
        return None;
    }

    Some(StatusEntry {
        code: code.to_string(),
        path,
        orig_path,
    })
}

/// Read one path token, returning it with the unconsumed remainder.
fn take_path(s: &str, before_arrow: bool) -> Option<(String, &str)> {
    if s.starts_with('"') {
        return unquote(s);
    }
    if before_arrow {
        let end = s.find(RENAME_ARROW)?;
        Some((s[..end].trim().to_string(), &s[end..]))
    } else {
        Some((s.trim().to_string(), ""))
    }
}

/// Undo git's C-style quoting. Octal escapes are raw bytes of a UTF-8 path.
fn unquote(s: &str) -> Option<(String, &str)> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 1;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let path = String::from_utf8_lossy(&out).into_owned();
                return Some((path, &s[i + 1..]));
            }
            b'\\' => {
                let escaped = *bytes.get(i + 1)?;
                match escaped {
                    b'0'..=b'7' => {
                        let digits = s.get(i + 1..i + 4)?;
                        out.push(u8::from_str_radix(digits, 8).ok()?);
                        i += 4;
                        continue;
                    }
                    b'a' => out.push(0x07),
                    b'b' => out.push(0x08),
                    b't' => out.push(b'\t'),
                    b'n' => out.push(b'\n'),
                    b'v' => out.push(0x0b),
                    b'f' => out.push(0x0c),
                    b'r' => out.push(b'\r'),
                    b'"' | b'\\' => out.push(escaped),
                    _ => return None,
                }
                i += 2;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    // unterminated
    None
}
