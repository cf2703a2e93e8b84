//! Validation of raw review service responses.
//!
//! The service normally answers with an object. Some deployments wrap it in
//! a single-element list; both are normalized here so nothing downstream has
//! to care.

use serde_json::{Map, Value};

use crate::error::ReviewError;

/// Field carrying the checkpoint the service wants us to resume from.
pub const CURRENT_DATE_FIELD: &str = "current_date";

/// A response that passed validation and has at least one record.
///
/// Records are kept in wire form; only the first one is ever interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    /// First record of the list, as sent.
    pub first: Value,
    /// Records following the first one.
    pub rest: Vec<Value>,
    /// Checkpoint candidate echoed back by the service.
    pub current_date: Option<i64>,
}

impl Classified {
    /// Number of records in the response.
    pub fn record_count(&self) -> usize {
        1 + self.rest.len()
    }
}

/// Validate `body` and extract the record list stored under `field`.
///
/// An empty list is reported as [`ReviewError::NoChanges`], which still
/// carries the checkpoint candidate. The records themselves are not
/// inspected here.
pub fn check_response(body: &Value, field: &str) -> Result<Classified, ReviewError> {
    let object = normalize(body)?;
    let current_date = object.get(CURRENT_DATE_FIELD).and_then(Value::as_i64);

    let raw = object
        .get(field)
        .ok_or_else(|| ReviewError::MissingField(field.to_string()))?;
    let items = raw
        .as_array()
        .ok_or_else(|| ReviewError::NotAList(field.to_string()))?;

    let Some((first, rest)) = items.split_first() else {
        return Err(ReviewError::NoChanges { current_date });
    };

    Ok(Classified {
        first: first.clone(),
        rest: rest.to_vec(),
        current_date,
    })
}

fn normalize(body: &Value) -> Result<&Map<String, Value>, ReviewError> {
    match body {
        Value::Object(map) => Ok(map),
        Value::Array(items) => items
            .first()
            .and_then(Value::as_object)
            .ok_or(ReviewError::UnexpectedShape),
        _ => Err(ReviewError::UnexpectedShape),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const FIELD: &str = "homeworks";

    #[test]
    fn test_single_record_with_checkpoint() {
        let body = json!({
            "homeworks": [{"homework_name": "X", "status": "approved"}],
            "current_date": 1000
        });
        let classified = check_response(&body, FIELD).unwrap();
        assert_eq!(
            classified,
            Classified {
                first: json!({"homework_name": "X", "status": "approved"}),
                rest: vec![],
                current_date: Some(1000),
            }
        );
    }

    #[test]
    fn test_list_wrapped_object_is_normalized() {
        let body = json!([{"homeworks": [{"homework_name": "X", "status": "rejected"}]}]);
        let classified = check_response(&body, FIELD).unwrap();
        assert_eq!(classified.record_count(), 1);
        assert_eq!(classified.current_date, None);
    }

    #[test]
    fn test_records_keep_order() {
        let body = json!({"homeworks": [
            {"homework_name": "first", "status": "approved"},
            {"homework_name": "second", "status": "reviewing"}
        ]});
        let classified = check_response(&body, FIELD).unwrap();
        assert_eq!(classified.record_count(), 2);
        assert_eq!(classified.first["homework_name"], "first");
        assert_eq!(classified.rest[0]["homework_name"], "second");
    }

    #[test]
    fn test_empty_list_is_non_critical_and_keeps_checkpoint() {
        let body = json!({"homeworks": [], "current_date": 1234});
        let err = check_response(&body, FIELD).unwrap_err();
        assert_eq!(
            err,
            ReviewError::NoChanges {
                current_date: Some(1234)
            }
        );
        assert_eq!(err.severity(), crate::error::Severity::NonCritical);
    }

    #[test]
    fn test_empty_list_without_checkpoint() {
        let err = check_response(&json!({"homeworks": []}), FIELD).unwrap_err();
        assert_eq!(err.checkpoint_candidate(), None);
    }

    #[test]
    fn test_missing_field_is_shape_error() {
        let err = check_response(&json!({"current_date": 5}), FIELD).unwrap_err();
        assert_eq!(err, ReviewError::MissingField("homeworks".to_string()));
        assert_eq!(err.severity(), crate::error::Severity::DataShape);
    }

    #[test]
    fn test_field_not_a_list() {
        let err = check_response(&json!({"homeworks": {"homework_name": "X"}}), FIELD).unwrap_err();
        assert_eq!(err, ReviewError::NotAList("homeworks".to_string()));
    }

    #[test]
    fn test_unexpected_top_level_shapes() {
        for body in [json!("text"), json!(17), json!([]), json!([1, 2]), Value::Null] {
            assert_eq!(
                check_response(&body, FIELD).unwrap_err(),
                ReviewError::UnexpectedShape,
                "body: {body}"
            );
        }
    }

    #[test]
    fn test_trailing_records_are_not_inspected() {
        let body = json!({"homeworks": [
            {"homework_name": "X", "status": "approved"},
            {"homework_name": 42, "status": "approved"},
            "garbage"
        ]});
        let classified = check_response(&body, FIELD).unwrap();
        assert_eq!(classified.record_count(), 3);
        assert_eq!(classified.first["homework_name"], "X");
    }

    #[test]
    fn test_non_object_first_record_passes_classification() {
        let classified = check_response(&json!({"homeworks": ["X"]}), FIELD).unwrap();
        assert_eq!(classified.first, json!("X"));
    }

    #[test]
    fn test_non_integer_checkpoint_is_ignored() {
        let body = json!({
            "homeworks": [{"homework_name": "X", "status": "approved"}],
            "current_date": "soon"
        });
        assert_eq!(check_response(&body, FIELD).unwrap().current_date, None);
    }
}
