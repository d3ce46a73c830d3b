//! Request-body validation. Each inbound payload is checked against its
//! declared rules and the FULL set of field violations comes back at once,
//! so clients never fix fields one at a time.

use service::auth::domain::{LoginInput, SignupInput};
use service::probe::ProbeDraft;
use service::tracker::TrackerSpec;
use url::Url;

use crate::errors::{ApiError, FieldError};

const MAX_FIELD_LEN: usize = 255;
const MAX_URL_LEN: usize = 2048;
const MIN_PASSWORD_LEN: usize = 6;

pub trait ValidateBody {
    fn validate_body(&self) -> Result<(), ApiError>;
}

fn finish(violations: Vec<FieldError>) -> Result<(), ApiError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(violations))
    }
}

fn check_len(violations: &mut Vec<FieldError>, field: &'static str, value: &str, max: usize) {
    if value.is_empty() {
        violations.push(FieldError { field, message: format!("{field} must not be empty") });
    } else if value.len() > max {
        violations.push(FieldError { field, message: format!("{field} must be at most {max} characters") });
    }
}

fn check_email(violations: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if models::user::validate_email(value).is_err() {
        violations.push(FieldError { field, message: "must be a valid email address".into() });
    }
}

fn check_url(violations: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.len() > MAX_URL_LEN {
        violations.push(FieldError { field, message: format!("{field} must be at most {MAX_URL_LEN} characters") });
        return;
    }
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => violations.push(FieldError { field, message: "must be a valid http(s) URL".into() }),
    }
}

impl ValidateBody for SignupInput {
    fn validate_body(&self) -> Result<(), ApiError> {
        let mut violations = Vec::new();
        if models::user::validate_full_name(&self.full_name).is_err() {
            violations.push(FieldError { field: "fullName", message: "fullName must not be empty".into() });
        }
        check_email(&mut violations, "email", &self.email);
        if self.password.len() < MIN_PASSWORD_LEN {
            violations.push(FieldError {
                field: "password",
                message: format!("password must be at least {MIN_PASSWORD_LEN} characters"),
            });
        }
        finish(violations)
    }
}

impl ValidateBody for LoginInput {
    fn validate_body(&self) -> Result<(), ApiError> {
        let mut violations = Vec::new();
        check_email(&mut violations, "email", &self.email);
        finish(violations)
    }
}

impl ValidateBody for TrackerSpec {
    fn validate_body(&self) -> Result<(), ApiError> {
        let mut violations = Vec::new();
        check_len(&mut violations, "name", &self.name, MAX_FIELD_LEN);
        // Stored opaque; only shape is checked, nothing schedules it.
        check_len(&mut violations, "cronExpr", &self.cron_expr, MAX_FIELD_LEN);
        check_len(&mut violations, "selector", &self.selector, MAX_FIELD_LEN);
        check_url(&mut violations, "websiteUrl", &self.website_url);
        finish(violations)
    }
}

impl ValidateBody for ProbeDraft {
    fn validate_body(&self) -> Result<(), ApiError> {
        let mut violations = Vec::new();
        check_len(&mut violations, "selector", &self.selector, MAX_FIELD_LEN);
        check_url(&mut violations, "websiteUrl", &self.website_url);
        finish(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::tracker::CompareMode;

    #[test]
    fn collects_every_violation() {
        let input = SignupInput { full_name: "".into(), email: "nope".into(), password: "abc".into() };
        let err = input.validate_body().unwrap_err();
        match err {
            ApiError::Validation(v) => {
                let fields: Vec<_> = v.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec!["fullName", "email", "password"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn tracker_spec_url_rules() {
        let mut spec = TrackerSpec {
            name: "watch".into(),
            cron_expr: "0 * * * *".into(),
            compare_mode: CompareMode::InnerText,
            website_url: "ftp://example.com".into(),
            selector: "#x".into(),
        };
        assert!(spec.validate_body().is_err());
        spec.website_url = "https://example.com/page".into();
        assert!(spec.validate_body().is_ok());
    }

    #[test]
    fn valid_bodies_pass() {
        let signup = SignupInput {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
        };
        assert!(signup.validate_body().is_ok());
        let probe = ProbeDraft {
            website_url: "http://example.com".into(),
            selector: "#price".into(),
            compare_mode: CompareMode::InnerHtml,
        };
        assert!(probe.validate_body().is_ok());
    }
}
