//! Verification-code extraction from message text.
//!
//! One-time codes are overwhelmingly 6 or 8 digits. Subject and body are
//! scanned (after stripping markup) for maximal digit runs of exactly
//! those lengths, so a user can copy a code without opening the message.

/// Lengths of digit runs treated as verification codes.
const CODE_LENGTHS: [usize; 2] = [6, 8];

/// Strips markup tags from text, replacing each tag with a space.
///
/// Replacing rather than deleting keeps digit runs on either side of a
/// tag from fusing into one longer run. An unterminated tag swallows the
/// rest of the input, which is the safe direction for untrusted markup.
#[must_use]
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => out.push(c),
        }
    }
    out
}

/// Extracts candidate verification codes from a subject and body.
///
/// Returns the de-duplicated codes in first-seen order; subject is
/// scanned before body.
#[must_use]
pub fn extract_codes(subject: &str, body: &str) -> Vec<String> {
    let text = format!("{} {}", strip_markup(subject), strip_markup(body));
    let mut codes: Vec<String> = Vec::new();
    let mut run = String::new();
    for c in text.chars().chain(std::iter::once(' ')) {
        if c.is_ascii_digit() {
            run.push(c);
            continue;
        }
        if CODE_LENGTHS.contains(&run.len()) && !codes.iter().any(|seen| seen == &run) {
            codes.push(run.clone());
        }
        run.clear();
    }
    codes
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn finds_six_and_eight_digit_codes_in_order() {
        let codes = extract_codes("", "Your code is 123456, backup: 78901234");
        assert_eq!(codes, vec!["123456", "78901234"]);
    }

    #[test]
    fn no_candidate_runs_yields_empty() {
        assert!(extract_codes("Hello", "no codes here 12345 1234567 123456789").is_empty());
    }

    #[test]
    fn subject_is_scanned_first_and_duplicates_dropped() {
        let codes = extract_codes("code 654321", "again 654321 and 111111");
        assert_eq!(codes, vec!["654321", "111111"]);
    }

    #[test]
    fn markup_does_not_fuse_digit_runs() {
        // "123<br>456" must not become a 6-digit run.
        assert!(extract_codes("", "123<br>456").is_empty());
        assert_eq!(extract_codes("", "<b>123456</b>"), vec!["123456"]);
    }

    #[test]
    fn strip_markup_replaces_tags_with_spaces() {
        assert_eq!(strip_markup("a<b>c</b>d"), "a c d");
        assert_eq!(strip_markup("plain"), "plain");
    }

    #[test]
    fn unterminated_tag_swallows_remainder() {
        assert_eq!(strip_markup("ok<img src=x onerror=1"), "ok ");
    }

    proptest! {
        #[test]
        fn extraction_never_panics_and_codes_are_well_formed(
            subject in ".{0,64}",
            body in ".{0,256}"
        ) {
            for code in extract_codes(&subject, &body) {
                prop_assert!(code.len() == 6 || code.len() == 8);
                prop_assert!(code.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }
}
