/// Canonicalize a free-text field for comparison only; display values are
/// never replaced by this form.
///
/// Uppercases ASCII letters, turns every character that is not an ASCII
/// letter, digit or space into a space, then collapses whitespace runs and
/// trims. "Newark Airport" and "NEWARK  AIRPORT!" normalize identically.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}
