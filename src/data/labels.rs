//! Short display labels for drivers.

/// Build the label shown for a driver everywhere in the dashboard.
///
/// Uses the three-letter code when present, then "F. Surname", then the raw id.
pub fn driver_label(
    driver_id: i64,
    code: Option<&str>,
    forename: Option<&str>,
    surname: Option<&str>,
) -> String {
    if let Some(code) = code {
        return code.to_string();
    }
    if let (Some(forename), Some(surname)) = (forename, surname) {
        if let Some(initial) = forename.chars().next() {
            return format!("{initial}. {surname}");
        }
    }
    driver_id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_wins_over_names() {
        assert_eq!(
            driver_label(1, Some("HAM"), Some("Lewis"), Some("Hamilton")),
            "HAM"
        );
    }

    #[test]
    fn test_initial_and_surname_without_code() {
        assert_eq!(
            driver_label(1, None, Some("Lewis"), Some("Hamilton")),
            "L. Hamilton"
        );
    }

    #[test]
    fn test_falls_back_to_id() {
        assert_eq!(driver_label(44, None, None, None), "44");
        assert_eq!(driver_label(44, None, Some("Lewis"), None), "44");
    }

    #[test]
    fn test_multibyte_initial() {
        assert_eq!(
            driver_label(7, None, Some("Étienne"), Some("Dupont")),
            "É. Dupont"
        );
    }
}
