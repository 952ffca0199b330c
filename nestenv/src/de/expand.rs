//! Shell-style expansion of `$NAME` and `${NAME}` references

use std::env;

use log::debug;

/// Replace `$NAME` and `${NAME}` with the values of the process environment.
///
/// Unset variables expand to the empty string. A `$` that is not followed by a
/// name is kept, `${}` and an unterminated `${` are dropped. The single
/// character shell parameters (`$1`, `$*`, `$#`, `$$`, `$@`, `$!`, `$?`, `$-`)
/// are looked up like any other name.
pub(crate) fn expand(raw: &str) -> String {
    expand_with(raw, |name| {
        env::var(name).unwrap_or_else(|_| {
            debug!("Unresolved environment variable '{name}' expands to an empty string");
            String::new()
        })
    })
}

fn expand_with(raw: &str, mut lookup: impl FnMut(&str) -> String) -> String {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut start = 0;
    let mut j = 0;

    while j < bytes.len() {
        if bytes[j] == b'$' && j + 1 < bytes.len() {
            out.push_str(&raw[start..j]);
            match reference(&raw[j + 1..]) {
                Reference::Name(name, width) => {
                    out.push_str(&lookup(name));
                    j += width;
                }
                Reference::Invalid(width) => j += width,
                Reference::None => out.push('$'),
            }
            start = j + 1;
        }
        j += 1;
    }

    out.push_str(&raw[start..]);
    out
}

enum Reference<'a> {
    /// Name and number of bytes it occupies after the `$`
    Name(&'a str, usize),
    /// Bad syntax spanning that many bytes, dropped from the output
    Invalid(usize),
    None,
}

/// Parse the reference following a `$`. `rest` is never empty.
fn reference(rest: &str) -> Reference<'_> {
    let bytes = rest.as_bytes();

    if bytes[0] == b'{' {
        if bytes.len() > 2 && is_special(bytes[1]) && bytes[2] == b'}' {
            return Reference::Name(&rest[1..2], 3);
        }
        return match rest[1..].find('}') {
            Some(0) => Reference::Invalid(2),
            Some(end) => Reference::Name(&rest[1..=end], end + 2),
            None => Reference::Invalid(1),
        };
    }

    if is_special(bytes[0]) {
        return Reference::Name(&rest[..1], 1);
    }

    let width = bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    if width == 0 {
        Reference::None
    } else {
        Reference::Name(&rest[..width], width)
    }
}

fn is_special(b: u8) -> bool {
    matches!(b, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-') || b.is_ascii_digit()
}
