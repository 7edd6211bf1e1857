//! Field validator — pure logic, no I/O.
//!
//! Maps a typed field (type tag + raw value + rule set) to a verdict:
//! `None` for a passing value, `Some(message)` for a failing one. The same
//! input always yields the same verdict.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::ExtractedDocument;
use crate::field::{ExtractedField, FieldType, ValidationRules};
use crate::types::FieldId;

static SSN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{2}-\d{4}$").expect("valid regex"));

static EIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{7}$").expect("valid regex"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("valid regex"));

/// Validate a single field against its type and rule set.
///
/// Returns `None` when the value passes, or the error message to surface
/// inline next to the field.
pub fn validate_field(field: &ExtractedField) -> Option<String> {
    let value = field.value.trim();

    if value.is_empty() {
        if field.required() {
            return Some("This field is required".to_string());
        }
        return None;
    }

    let rules = field.validation_rules.as_ref();

    match field.field_type {
        FieldType::Ssn => validate_ssn(value),
        FieldType::Ein => validate_ein(value),
        FieldType::Currency => validate_currency(value, rules),
        FieldType::Percentage => validate_percentage(value),
        FieldType::Date => validate_date(value),
        FieldType::Text => validate_text(value, rules),
        FieldType::Number => validate_number(value, rules),
    }
}

/// Run the validator over every field of a document.
///
/// Returns the full error map keyed by field ID; an empty map means the
/// document passes the save/submit gate.
pub fn validate_document(document: &ExtractedDocument) -> BTreeMap<FieldId, String> {
    document
        .fields
        .iter()
        .filter_map(|(id, field)| validate_field(field).map(|msg| (id.clone(), msg)))
        .collect()
}

fn validate_ssn(value: &str) -> Option<String> {
    if SSN_RE.is_match(value) {
        None
    } else {
        Some("SSN must be in format XXX-XX-XXXX".to_string())
    }
}

fn validate_ein(value: &str) -> Option<String> {
    if EIN_RE.is_match(value) {
        None
    } else {
        Some("EIN must be in format XX-XXXXXXX".to_string())
    }
}

fn validate_currency(value: &str, rules: Option<&ValidationRules>) -> Option<String> {
    let cleaned: String = value.chars().filter(|c| *c != '$' && *c != ',').collect();
    let amount: f64 = match cleaned.trim().parse() {
        Ok(n) => n,
        Err(_) => return Some("Invalid currency amount".to_string()),
    };
    if amount.is_nan() {
        return Some("Invalid currency amount".to_string());
    }
    check_bounds(amount, rules, "$")
}

fn validate_percentage(value: &str) -> Option<String> {
    let cleaned = value.trim_end_matches('%').trim();
    match cleaned.parse::<f64>() {
        Ok(pct) if (0.0..=100.0).contains(&pct) => None,
        _ => Some("Percentage must be between 0 and 100".to_string()),
    }
}

fn validate_date(value: &str) -> Option<String> {
    let error = || Some("Date must be in format MM/DD/YYYY".to_string());

    let caps = match DATE_RE.captures(value) {
        Some(caps) => caps,
        None => return error(),
    };

    // Captures are all-digit by construction; 0 falls outside both ranges.
    let month: u32 = caps[1].parse().unwrap_or(0);
    let day: u32 = caps[2].parse().unwrap_or(0);

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return error();
    }
    None
}

fn validate_text(value: &str, rules: Option<&ValidationRules>) -> Option<String> {
    let rules = rules?;

    if let Some(min) = rules.min_length {
        if value.len() < min {
            return Some(format!("Must be at least {min} characters"));
        }
    }
    if let Some(max) = rules.max_length {
        if value.len() > max {
            return Some(format!("Must be no more than {max} characters"));
        }
    }
    if let Some(ref pattern) = rules.pattern {
        // An invalid pattern silently passes, same as unknown rule types.
        if let Ok(re) = Regex::new(pattern) {
            if !re.is_match(value) {
                return Some(
                    rules
                        .message
                        .clone()
                        .unwrap_or_else(|| "Invalid format".to_string()),
                );
            }
        }
    }
    None
}

fn validate_number(value: &str, rules: Option<&ValidationRules>) -> Option<String> {
    let amount: f64 = match value.parse() {
        Ok(n) => n,
        Err(_) => return Some("Must be a valid number".to_string()),
    };
    if amount.is_nan() {
        return Some("Must be a valid number".to_string());
    }
    check_bounds(amount, rules, "")
}

fn check_bounds(amount: f64, rules: Option<&ValidationRules>, unit: &str) -> Option<String> {
    let rules = rules?;

    if let Some(min) = rules.min_value {
        if amount < min {
            return Some(format!("Value must be at least {unit}{min}"));
        }
    }
    if let Some(max) = rules.max_value {
        if amount > max {
            return Some(format!("Value must not exceed {unit}{max}"));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_field(field_type: FieldType, value: &str) -> ExtractedField {
        ExtractedField {
            id: "test_field".to_string(),
            label: "Test Field".to_string(),
            value: value.to_string(),
            original_value: value.to_string(),
            confidence: 0.95,
            field_type,
            validation_rules: None,
            is_modified: false,
            validation_error: None,
        }
    }

    fn with_rules(mut field: ExtractedField, rules: ValidationRules) -> ExtractedField {
        field.validation_rules = Some(rules);
        field
    }

    #[test]
    fn test_empty_optional_field_passes() {
        let field = make_field(FieldType::Ssn, "");
        assert_eq!(validate_field(&field), None);
    }

    #[test]
    fn test_empty_required_field_fails() {
        let field = with_rules(
            make_field(FieldType::Text, "   "),
            ValidationRules {
                required: true,
                ..ValidationRules::default()
            },
        );
        assert_eq!(
            validate_field(&field),
            Some("This field is required".to_string())
        );
    }

    #[test]
    fn test_ssn_accepts_matching_format() {
        let field = make_field(FieldType::Ssn, "123-45-6789");
        assert_eq!(validate_field(&field), None);
    }

    #[test]
    fn test_ssn_rejects_non_matching_values() {
        for value in ["123456789", "123-45-678", "12-345-6789", "abc-de-fghi", "123-45-67890"] {
            let field = make_field(FieldType::Ssn, value);
            assert_eq!(
                validate_field(&field),
                Some("SSN must be in format XXX-XX-XXXX".to_string()),
                "value {value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_ein_accepts_matching_format() {
        let field = make_field(FieldType::Ein, "12-3456789");
        assert_eq!(validate_field(&field), None);
    }

    #[test]
    fn test_ein_rejects_non_matching_values() {
        for value in ["123456789", "1-23456789", "12-345678", "12-34567890"] {
            let field = make_field(FieldType::Ein, value);
            assert_eq!(
                validate_field(&field),
                Some("EIN must be in format XX-XXXXXXX".to_string()),
                "value {value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_currency_strips_symbols_and_parses() {
        let field = make_field(FieldType::Currency, "$1,234.56");
        assert_eq!(validate_field(&field), None);
    }

    #[test]
    fn test_currency_rejects_unparseable_value() {
        let field = make_field(FieldType::Currency, "twelve dollars");
        assert_eq!(
            validate_field(&field),
            Some("Invalid currency amount".to_string())
        );
    }

    #[test]
    fn test_currency_enforces_max_bound() {
        let field = with_rules(
            make_field(FieldType::Currency, "1,234.5"),
            ValidationRules {
                min_value: Some(0.0),
                max_value: Some(1000.0),
                ..ValidationRules::default()
            },
        );
        assert_eq!(
            validate_field(&field),
            Some("Value must not exceed $1000".to_string())
        );
    }

    #[test]
    fn test_currency_enforces_min_bound() {
        let field = with_rules(
            make_field(FieldType::Currency, "-5.00"),
            ValidationRules {
                min_value: Some(0.0),
                ..ValidationRules::default()
            },
        );
        assert_eq!(
            validate_field(&field),
            Some("Value must be at least $0".to_string())
        );
    }

    #[test]
    fn test_currency_within_bounds_passes() {
        let field = with_rules(
            make_field(FieldType::Currency, "$999.99"),
            ValidationRules {
                min_value: Some(0.0),
                max_value: Some(1000.0),
                ..ValidationRules::default()
            },
        );
        assert_eq!(validate_field(&field), None);
    }

    #[test]
    fn test_percentage_accepts_in_range_values() {
        for value in ["0", "25.5%", "100", "100%"] {
            let field = make_field(FieldType::Percentage, value);
            assert_eq!(validate_field(&field), None, "value {value:?} should pass");
        }
    }

    #[test]
    fn test_percentage_rejects_out_of_range_values() {
        for value in ["-1", "100.1", "150%", "abc"] {
            let field = make_field(FieldType::Percentage, value);
            assert_eq!(
                validate_field(&field),
                Some("Percentage must be between 0 and 100".to_string()),
                "value {value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_date_accepts_valid_format() {
        for value in ["01/31/2024", "12/01/1999", "02/29/2024"] {
            let field = make_field(FieldType::Date, value);
            assert_eq!(validate_field(&field), None, "value {value:?} should pass");
        }
    }

    #[test]
    fn test_date_rejects_invalid_month() {
        let field = make_field(FieldType::Date, "13/01/2024");
        assert_eq!(
            validate_field(&field),
            Some("Date must be in format MM/DD/YYYY".to_string())
        );
    }

    #[test]
    fn test_date_rejects_bad_shapes() {
        for value in ["2024-01-31", "1/31/2024", "01/32/2024", "00/10/2024", "01/00/2024"] {
            let field = make_field(FieldType::Date, value);
            assert_eq!(
                validate_field(&field),
                Some("Date must be in format MM/DD/YYYY".to_string()),
                "value {value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_text_length_bounds() {
        let rules = ValidationRules {
            min_length: Some(3),
            max_length: Some(5),
            ..ValidationRules::default()
        };
        let short = with_rules(make_field(FieldType::Text, "ab"), rules.clone());
        assert_eq!(
            validate_field(&short),
            Some("Must be at least 3 characters".to_string())
        );

        let long = with_rules(make_field(FieldType::Text, "abcdef"), rules.clone());
        assert_eq!(
            validate_field(&long),
            Some("Must be no more than 5 characters".to_string())
        );

        let ok = with_rules(make_field(FieldType::Text, "abcd"), rules);
        assert_eq!(validate_field(&ok), None);
    }

    #[test]
    fn test_text_pattern_uses_custom_message() {
        let field = with_rules(
            make_field(FieldType::Text, "lower case"),
            ValidationRules {
                pattern: Some("^[A-Z ]+$".to_string()),
                message: Some("Must be upper case".to_string()),
                ..ValidationRules::default()
            },
        );
        assert_eq!(
            validate_field(&field),
            Some("Must be upper case".to_string())
        );
    }

    #[test]
    fn test_text_pattern_default_message() {
        let field = with_rules(
            make_field(FieldType::Text, "abc123"),
            ValidationRules {
                pattern: Some("^[a-z]+$".to_string()),
                ..ValidationRules::default()
            },
        );
        assert_eq!(validate_field(&field), Some("Invalid format".to_string()));
    }

    #[test]
    fn test_text_invalid_pattern_silently_passes() {
        let field = with_rules(
            make_field(FieldType::Text, "anything"),
            ValidationRules {
                pattern: Some("[unclosed".to_string()),
                ..ValidationRules::default()
            },
        );
        assert_eq!(validate_field(&field), None);
    }

    #[test]
    fn test_number_parses_and_bounds() {
        let field = make_field(FieldType::Number, "42.5");
        assert_eq!(validate_field(&field), None);

        let bad = make_field(FieldType::Number, "4,200");
        assert_eq!(
            validate_field(&bad),
            Some("Must be a valid number".to_string())
        );

        let over = with_rules(
            make_field(FieldType::Number, "12"),
            ValidationRules {
                max_value: Some(10.0),
                ..ValidationRules::default()
            },
        );
        assert_eq!(
            validate_field(&over),
            Some("Value must not exceed 10".to_string())
        );
    }

    #[test]
    fn test_validator_is_deterministic() {
        let field = make_field(FieldType::Ssn, "123-45-678");
        assert_eq!(validate_field(&field), validate_field(&field));
    }

    #[test]
    fn test_validate_document_collects_per_field_errors() {
        use crate::document::{DocumentStatus, ExtractedDocument};
        use std::collections::BTreeMap;

        let good = make_field(FieldType::Ssn, "123-45-6789");
        let mut bad = make_field(FieldType::Ein, "nope");
        bad.id = "ein".to_string();

        let document = ExtractedDocument {
            document_id: "doc-1".to_string(),
            document_type: "W-9".to_string(),
            fields: BTreeMap::from([
                ("ssn".to_string(), good),
                ("ein".to_string(), bad),
            ]),
            validation_errors: Vec::new(),
            status: DocumentStatus::PendingReview,
            updated_at: None,
        };

        let errors = validate_document(&document);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("ein"),
            Some(&"EIN must be in format XX-XXXXXXX".to_string())
        );
    }
}
