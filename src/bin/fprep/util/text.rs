/// Greedy word wrap. Words longer than `width` are split across lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current.is_empty() {
            current.extend(word);
        } else if current_len + 1 + word.len() <= width {
            current.push(' ');
            current.extend(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.into_iter().collect()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Cuts `s` to at most `max_len` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        return s.to_string();
    }
    if max_len == 0 {
        return String::new();
    }

    let mut out: String = s.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

/// Like [`truncate`] but keeps the end of `s`, which is where file names live.
pub fn truncate_start(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        return s.to_string();
    }
    if max_len == 0 {
        return String::new();
    }

    let mut out = String::from('…');
    out.extend(s.chars().skip(len - (max_len - 1)));
    out
}
