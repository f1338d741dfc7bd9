//! Serialized List Parsing
//!
//! Ingredient and procedure fields have been persisted in several shapes over
//! the app's lifetime: a JSON array string, a bracket-and-single-quote list,
//! or plain delimited text. These parsers accept all of them and fall back to
//! showing the raw text as a single entry instead of failing.

/// Strip list punctuation left over from bracketed representations.
fn clean_fragment(fragment: &str) -> String {
    fragment
        .trim()
        .trim_matches(|c| matches!(c, '[' | ']' | '"' | '\''))
        .trim()
        .to_string()
}

fn parse_json_list(raw: &str) -> Option<Vec<String>> {
    let list: Vec<String> = serde_json::from_str(raw).ok()?;
    Some(
        list.into_iter()
            .map(|entry| entry.trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect(),
    )
}

/// Best-effort split of an ingredient list.
///
/// Tries strict JSON first, then treats the text as a comma-delimited list
/// with optional bracket/quote noise.
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if let Some(list) = parse_json_list(trimmed) {
        return list;
    }
    let parts: Vec<String> = trimmed
        .split(',')
        .map(clean_fragment)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        vec![trimmed.to_string()]
    } else {
        parts
    }
}

/// Best-effort split of a procedure into ordered steps.
///
/// Steps routinely contain commas, so the quote-comma boundary of the
/// bracket-quoted form is preferred over a bare comma split.
pub fn parse_procedure(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if let Some(list) = parse_json_list(trimmed) {
        return list;
    }
    if trimmed.contains("',") {
        let steps: Vec<String> = trimmed
            .split("',")
            .map(clean_fragment)
            .filter(|step| !step.is_empty())
            .collect();
        if !steps.is_empty() {
            return steps;
        }
    }
    let cleaned = clean_fragment(trimmed);
    if cleaned.is_empty() {
        vec![trimmed.to_string()]
    } else {
        vec![cleaned]
    }
}

/// Encode an ingredients textarea (one entry per line) as the JSON array
/// string the edit actions expect.
pub fn encode_ingredient_lines(text: &str) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    serde_json::to_string(&lines).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredients_json_array() {
        let parsed = parse_ingredients(r#"["2 cups flour", "1 tsp salt"]"#);
        assert_eq!(parsed, vec!["2 cups flour", "1 tsp salt"]);
    }

    #[test]
    fn test_ingredients_bracket_quoted() {
        let parsed = parse_ingredients("['butter', 'sugar', 'eggs']");
        assert_eq!(parsed, vec!["butter", "sugar", "eggs"]);
    }

    #[test]
    fn test_ingredients_plain_text_falls_back_to_single_entry() {
        let parsed = parse_ingredients("just a note about leftovers");
        assert_eq!(parsed, vec!["just a note about leftovers"]);
    }

    #[test]
    fn test_ingredients_empty() {
        assert!(parse_ingredients("").is_empty());
        assert!(parse_ingredients("   ").is_empty());
    }

    #[test]
    fn test_procedure_keeps_commas_inside_steps() {
        let parsed = parse_procedure("['Chop the onions, finely', 'Fry until golden']");
        assert_eq!(parsed, vec!["Chop the onions, finely", "Fry until golden"]);
    }

    #[test]
    fn test_procedure_json_array() {
        let parsed = parse_procedure(r#"["Boil water", "Add pasta"]"#);
        assert_eq!(parsed, vec!["Boil water", "Add pasta"]);
    }

    #[test]
    fn test_procedure_plain_text_is_one_step() {
        let parsed = parse_procedure("Mix everything and bake");
        assert_eq!(parsed, vec!["Mix everything and bake"]);
    }

    #[test]
    fn test_encode_ingredient_lines() {
        let encoded = encode_ingredient_lines("2 cups flour\n\n  1 tsp salt  \n");
        assert_eq!(encoded, r#"["2 cups flour","1 tsp salt"]"#);
    }

    #[test]
    fn test_encode_then_parse_round_trip() {
        let encoded = encode_ingredient_lines("milk\nhalf an onion");
        assert_eq!(parse_ingredients(&encoded), vec!["milk", "half an onion"]);
    }
}
