/// A column the header must mention, with the spellings accepted for it.
#[derive(Debug, Clone, Copy)]
pub struct HeaderToken {
    pub label: &'static str,
    pub aliases: &'static [&'static str],
}

impl HeaderToken {
    fn found_in(&self, header_lower: &str) -> bool {
        self.aliases.iter().any(|a| header_lower.contains(a))
    }
}

/// Return the labels of required tokens absent from the header line.
///
/// Matching is a case-insensitive substring search over the whole line, so
/// "Code Examen" satisfies the "code" token.
pub fn missing_header_tokens(header: &str, required: &[HeaderToken]) -> Vec<&'static str> {
    let lower = header.to_lowercase();
    required
        .iter()
        .filter(|t| !t.found_in(&lower))
        .map(|t| t.label)
        .collect()
}
