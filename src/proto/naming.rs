/// Converts a camelCase or PascalCase name to lower_snake_case.
///
/// Word boundaries are lowercase-to-uppercase transitions. Input that is
/// already snake_case passes through unchanged, so the conversion is
/// idempotent.
pub fn lower_snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if prev_lower {
                result.push('_');
            }
            c.to_lowercase().for_each(|l| result.push(l));
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    result
}
