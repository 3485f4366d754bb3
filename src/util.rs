/// Tokens that can be rendered as text in trace output.
pub trait Preview: Sized {
    fn preview(tokens: &[Self]) -> String;
}

impl Preview for char {
    fn preview(tokens: &[char]) -> String {
        tokens.iter().collect()
    }
}

impl Preview for u8 {
    fn preview(tokens: &[u8]) -> String {
        String::from_utf8_lossy(tokens).into_owned()
    }
}

/// Upcoming input, escaped, cut to 33 chars and boxed in `|..|`, padded to a
/// fixed column.
pub(crate) fn formatter_str(s: &str) -> String {
    let s: String = s.chars().take(33).collect();
    let s = s.escape_default().to_string();
    let s = s.replace("\\\"", "\"");
    let s = s.replace("\\\'", "\'");
    let s: String = s.chars().take(33).collect();
    format!("{:<35}", "|".to_string() + &s + "|")
}

/// Long spans shown as their first and last ten chars.
pub(crate) fn abbreviate(s: &str) -> String {
    let n = s.chars().count();
    if n <= 20 {
        return s.to_string();
    }
    let head: String = s.chars().take(10).collect();
    let tail: String = s.chars().skip(n - 10).collect();
    format!("{head}...{tail}")
}
