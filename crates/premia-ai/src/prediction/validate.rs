use serde_json::Value;

use super::domain::ValidatedRequest;

pub const BMI_FIELD: &str = "bmi";
pub const AGE_FIELD: &str = "age";
pub const SMOKER_FIELD: &str = "New_Smoker";

pub const BMI_MIN: f64 = 15.0;
pub const BMI_MAX: f64 = 60.0;
pub const AGE_MIN: i64 = 18;
pub const AGE_MAX: i64 = 100;

/// Client-caused input failures. Each variant names the offending
/// field and its constraint so the message can be surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("field '{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("BMI must be between 15 and 60")]
    BmiOutOfRange,
    #[error("Age must be between 18 and 100")]
    AgeOutOfRange,
    #[error("New_Smoker must be 0 or 1")]
    SmokerOutOfRange,
}

/// Check the raw payload against the input domain. Missing fields are
/// hard failures, never defaulted; out-of-range values are rejected,
/// never clamped. No side effects on any path.
pub fn validate(payload: &Value) -> Result<ValidatedRequest, ValidationError> {
    let bmi = required(payload, BMI_FIELD)?
        .as_f64()
        .filter(|value| value.is_finite())
        .ok_or(ValidationError::WrongType {
            field: BMI_FIELD,
            expected: "a number",
        })?;
    if !(BMI_MIN..=BMI_MAX).contains(&bmi) {
        return Err(ValidationError::BmiOutOfRange);
    }

    let age = required(payload, AGE_FIELD)?
        .as_i64()
        .ok_or(ValidationError::WrongType {
            field: AGE_FIELD,
            expected: "an integer",
        })?;
    if !(AGE_MIN..=AGE_MAX).contains(&age) {
        return Err(ValidationError::AgeOutOfRange);
    }

    let smoker = match required(payload, SMOKER_FIELD)?.as_i64() {
        Some(0) => false,
        Some(1) => true,
        Some(_) => return Err(ValidationError::SmokerOutOfRange),
        None => {
            return Err(ValidationError::WrongType {
                field: SMOKER_FIELD,
                expected: "an integer",
            })
        }
    };

    Ok(ValidatedRequest {
        bmi,
        smoker,
        age: age as u8,
    })
}

fn required<'a>(payload: &'a Value, field: &'static str) -> Result<&'a Value, ValidationError> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(bmi: Value, age: Value, smoker: Value) -> Value {
        json!({ "bmi": bmi, "age": age, "New_Smoker": smoker })
    }

    #[test]
    fn accepts_in_range_request() {
        let request = validate(&payload(json!(27.9), json!(19), json!(1))).expect("valid input");
        assert_eq!(request.bmi, 27.9);
        assert_eq!(request.age, 19);
        assert!(request.smoker);
        assert_eq!(request.smoker_flag(), 1);
    }

    #[test]
    fn bmi_boundaries_are_inclusive() {
        assert!(validate(&payload(json!(15.0), json!(30), json!(0))).is_ok());
        assert!(validate(&payload(json!(60.0), json!(30), json!(0))).is_ok());
        assert_eq!(
            validate(&payload(json!(14.999), json!(30), json!(0))),
            Err(ValidationError::BmiOutOfRange)
        );
        assert_eq!(
            validate(&payload(json!(60.001), json!(30), json!(0))),
            Err(ValidationError::BmiOutOfRange)
        );
    }

    #[test]
    fn age_boundaries_are_inclusive() {
        assert!(validate(&payload(json!(25.0), json!(18), json!(0))).is_ok());
        assert!(validate(&payload(json!(25.0), json!(100), json!(0))).is_ok());
        assert_eq!(
            validate(&payload(json!(25.0), json!(17), json!(0))),
            Err(ValidationError::AgeOutOfRange)
        );
        assert_eq!(
            validate(&payload(json!(25.0), json!(101), json!(0))),
            Err(ValidationError::AgeOutOfRange)
        );
    }

    #[test]
    fn smoker_flag_accepts_only_zero_and_one() {
        assert!(validate(&payload(json!(25.0), json!(30), json!(0))).is_ok());
        assert!(validate(&payload(json!(25.0), json!(30), json!(1))).is_ok());
        assert_eq!(
            validate(&payload(json!(25.0), json!(30), json!(2))),
            Err(ValidationError::SmokerOutOfRange)
        );
        assert_eq!(
            validate(&payload(json!(25.0), json!(30), json!(-1))),
            Err(ValidationError::SmokerOutOfRange)
        );
        assert!(matches!(
            validate(&payload(json!(25.0), json!(30), json!("yes"))),
            Err(ValidationError::WrongType {
                field: SMOKER_FIELD,
                ..
            })
        ));
    }

    #[test]
    fn missing_fields_are_rejected_not_defaulted() {
        assert_eq!(
            validate(&json!({ "age": 30, "New_Smoker": 0 })),
            Err(ValidationError::MissingField(BMI_FIELD))
        );
        assert_eq!(
            validate(&json!({ "bmi": 25.0, "New_Smoker": 0 })),
            Err(ValidationError::MissingField(AGE_FIELD))
        );
        assert_eq!(
            validate(&json!({ "bmi": 25.0, "age": 30 })),
            Err(ValidationError::MissingField(SMOKER_FIELD))
        );
        assert_eq!(
            validate(&json!({ "bmi": null, "age": 30, "New_Smoker": 0 })),
            Err(ValidationError::MissingField(BMI_FIELD))
        );
    }

    #[test]
    fn fractional_age_is_rejected() {
        assert!(matches!(
            validate(&payload(json!(25.0), json!(28.5), json!(0))),
            Err(ValidationError::WrongType {
                field: AGE_FIELD,
                ..
            })
        ));
    }

    #[test]
    fn error_messages_name_field_and_constraint() {
        assert_eq!(
            ValidationError::BmiOutOfRange.to_string(),
            "BMI must be between 15 and 60"
        );
        assert_eq!(
            ValidationError::AgeOutOfRange.to_string(),
            "Age must be between 18 and 100"
        );
        assert_eq!(
            ValidationError::SmokerOutOfRange.to_string(),
            "New_Smoker must be 0 or 1"
        );
    }
}
