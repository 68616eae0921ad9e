use super::{AnnotationError, AnnotationSpan};
use crate::model::IngredientRecord;

/// Decode the annotation at `span` into an ingredient record.
///
/// The text between the braces is split on its first two semicolons into
/// quantity, unit and name. Any later semicolons belong to the name. Unit and
/// name are kept verbatim; the quantity must be a finite decimal number.
pub fn decode_annotation(
    text: &str,
    span: AnnotationSpan,
) -> Result<IngredientRecord, AnnotationError> {
    let inner = span
        .inner(text)
        .ok_or_else(|| AnnotationError::MalformedAnnotation {
            span,
            text: text.get(span.start..=span.end).unwrap_or_default().to_string(),
        })?;

    let malformed = || AnnotationError::MalformedAnnotation {
        span,
        text: inner.to_string(),
    };
    let (quantity, rest) = inner.split_once(';').ok_or_else(malformed)?;
    let (unit, name) = rest.split_once(';').ok_or_else(malformed)?;

    let quantity = parse_quantity(quantity).ok_or_else(|| AnnotationError::InvalidQuantity {
        span,
        text: inner.to_string(),
        quantity: quantity.to_string(),
    })?;

    Ok(IngredientRecord {
        quantity,
        unit: unit.to_string(),
        name: name.to_string(),
    })
}

fn parse_quantity(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Result<IngredientRecord, AnnotationError> {
        let span = AnnotationSpan::new(0, text.len() - 1);
        decode_annotation(text, span)
    }

    #[test]
    fn test_decode_basic() {
        let record = decode("{2;cup;flour}").unwrap();
        assert_eq!(record.quantity, 2.0);
        assert_eq!(record.unit, "cup");
        assert_eq!(record.name, "flour");
    }

    #[test]
    fn test_decode_fractional_and_exponent_quantities() {
        assert_eq!(decode("{0.25;tsp;salt}").unwrap().quantity, 0.25);
        assert_eq!(decode("{.5;cup;milk}").unwrap().quantity, 0.5);
        assert_eq!(decode("{1e3;g;flour}").unwrap().quantity, 1000.0);
    }

    #[test]
    fn test_decode_quantity_surrounding_whitespace_allowed() {
        let record = decode("{ 2 ;cup;flour}").unwrap();
        assert_eq!(record.quantity, 2.0);
    }

    #[test]
    fn test_decode_span_in_middle_of_text() {
        let text = "Add {2;cup;flour} then {1;tsp;salt}.";
        let record = decode_annotation(text, AnnotationSpan::new(23, 34)).unwrap();
        assert_eq!(record.quantity, 1.0);
        assert_eq!(record.unit, "tsp");
        assert_eq!(record.name, "salt");
    }

    #[test]
    fn test_decode_empty_unit_and_name() {
        let record = decode("{3;;}").unwrap();
        assert_eq!(record.quantity, 3.0);
        assert_eq!(record.unit, "");
        assert_eq!(record.name, "");
    }

    #[test]
    fn test_decode_extra_semicolons_belong_to_name() {
        let record = decode("{1;tbsp;soy sauce; low sodium;}").unwrap();
        assert_eq!(record.unit, "tbsp");
        assert_eq!(record.name, "soy sauce; low sodium;");
    }

    #[test]
    fn test_decode_missing_semicolons() {
        let err = decode("{2 cups flour}").unwrap_err();
        assert_eq!(
            err,
            AnnotationError::MalformedAnnotation {
                span: AnnotationSpan::new(0, 13),
                text: "2 cups flour".to_string(),
            }
        );

        let err = decode("{2;cups flour}").unwrap_err();
        assert!(matches!(err, AnnotationError::MalformedAnnotation { .. }));
    }

    #[test]
    fn test_decode_invalid_quantity() {
        let err = decode("{abc;cup;flour}").unwrap_err();
        assert_eq!(
            err,
            AnnotationError::InvalidQuantity {
                span: AnnotationSpan::new(0, 14),
                text: "abc;cup;flour".to_string(),
                quantity: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_rejects_empty_and_non_finite_quantity() {
        assert!(matches!(
            decode("{;cup;flour}").unwrap_err(),
            AnnotationError::InvalidQuantity { .. }
        ));
        assert!(matches!(
            decode("{NaN;cup;flour}").unwrap_err(),
            AnnotationError::InvalidQuantity { .. }
        ));
        assert!(matches!(
            decode("{inf;cup;flour}").unwrap_err(),
            AnnotationError::InvalidQuantity { .. }
        ));
    }

    #[test]
    fn test_decode_span_outside_text() {
        let err = decode_annotation("{1;g;salt}", AnnotationSpan::new(0, 50)).unwrap_err();
        assert_eq!(
            err,
            AnnotationError::MalformedAnnotation {
                span: AnnotationSpan::new(0, 50),
                text: String::new(),
            }
        );
    }
}
