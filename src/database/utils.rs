/// Normalizes a query written with `?` placeholders into Postgres `$n`
/// placeholders, collapsing the indentation whitespace of raw string literals.
pub fn sql(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut param_index = 0;

    for (i, word) in query.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        for ch in word.chars() {
            if ch == '?' {
                param_index += 1;
                out.push('$');
                out.push_str(&param_index.to_string());
            } else {
                out.push(ch);
            }
        }
    }

    out
}
