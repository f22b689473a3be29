//! List splitting for config values and title words.
//!
//! Reject-word lists, format lists and the ranker's word-overlap sets all
//! start as comma- or whitespace-separated strings. Splitting honors
//! shell-style quoting so multi-word entries (`'large print'`) survive as
//! single tokens.

/// Split a string into tokens on whitespace and commas.
///
/// Single- and double-quoted spans group into one token with the quotes
/// removed, and a backslash escapes the following character outside
/// single quotes. Malformed input never fails: an unterminated quote
/// consumes the rest of the string as one token.
pub fn split_list(text: &str) -> Vec<String> {
    enum State {
        Plain,
        Single,
        Double,
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut has_token = false;
    let mut state = State::Plain;
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        match state {
            State::Plain => match ch {
                '\'' => {
                    state = State::Single;
                    has_token = true;
                }
                '"' => {
                    state = State::Double;
                    has_token = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                        has_token = true;
                    }
                }
                c if c.is_whitespace() || c == ',' => {
                    if has_token {
                        tokens.push(std::mem::take(&mut current));
                        has_token = false;
                    }
                }
                c => {
                    current.push(c);
                    has_token = true;
                }
            },
            State::Single => match ch {
                '\'' => state = State::Plain,
                c => current.push(c),
            },
            State::Double => match ch {
                '"' => state = State::Plain,
                // Inside double quotes a backslash only escapes quotes
                // and backslashes; otherwise it stays literal.
                '\\' => match chars.next() {
                    Some(c @ ('"' | '\\')) => current.push(c),
                    Some(c) => {
                        current.push('\\');
                        current.push(c);
                    }
                    None => current.push('\\'),
                },
                c => current.push(c),
            },
        }
    }
    if has_token {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated() {
        assert_eq!(split_list("epub, mobi, pdf"), vec!["epub", "mobi", "pdf"]);
    }

    #[test]
    fn test_whitespace_separated() {
        assert_eq!(split_list("one two\tthree"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_mixed_delimiters_collapse() {
        assert_eq!(split_list("a,b c,,  d"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_single_quotes_group_words() {
        assert_eq!(
            split_list("sample, 'large print', abridged"),
            vec!["sample", "large print", "abridged"]
        );
    }

    #[test]
    fn test_double_quotes_group_words() {
        assert_eq!(
            split_list("\"special edition\" extra"),
            vec!["special edition", "extra"]
        );
    }

    #[test]
    fn test_quotes_join_adjacent_text() {
        assert_eq!(split_list("pre'fix'post"), vec!["prefixpost"]);
    }

    #[test]
    fn test_backslash_escapes_delimiter() {
        assert_eq!(split_list(r"multi\ word next"), vec!["multi word", "next"]);
    }

    #[test]
    fn test_quoted_empty_string_is_a_token() {
        assert_eq!(split_list("a '' b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_unterminated_quote_takes_remainder() {
        assert_eq!(split_list("'large print"), vec!["large print"]);
        assert_eq!(split_list("ok \"half"), vec!["ok", "half"]);
    }

    #[test]
    fn test_empty_and_delimiter_only_input() {
        assert_eq!(split_list(""), Vec::<String>::new());
        assert_eq!(split_list(" , ,, "), Vec::<String>::new());
    }

    #[test]
    fn test_trailing_comma_ignored() {
        assert_eq!(split_list("audiobook,"), vec!["audiobook"]);
    }
}
