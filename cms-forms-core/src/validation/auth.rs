//! Registration and login schemas

use crate::types::{FieldErrors, LoginForm, RegistrationForm};

use super::rules::{Checker, NAME_MAX_LENGTH, NAME_MIN_LENGTH};

pub fn validate_registration(form: &RegistrationForm) -> FieldErrors {
    let mut c = Checker::new();
    c.length_between(
        "firstName",
        &form.first_name,
        "First name",
        NAME_MIN_LENGTH,
        NAME_MAX_LENGTH,
    );
    c.length_between(
        "lastName",
        &form.last_name,
        "Last name",
        NAME_MIN_LENGTH,
        NAME_MAX_LENGTH,
    );
    c.email("email", &form.email);
    c.password("password", &form.password, true);

    if form.confirm_password.is_empty() {
        c.fail("confirmPassword", "Please confirm your password");
    } else if form.confirm_password != form.password {
        c.fail("confirmPassword", "Passwords must match.");
    }

    if !form.terms {
        c.fail("terms", "You must accept the terms and conditions");
    }
    c.finish()
}

pub fn validate_login(form: &LoginForm) -> FieldErrors {
    let mut c = Checker::new();
    c.email("email", &form.email);
    c.password("password", &form.password, false);
    c.finish()
}
