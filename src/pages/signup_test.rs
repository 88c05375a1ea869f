use super::*;

#[test]
fn validate_signup_input_trims_fields() {
    let req = validate_signup_input(" Ann ", " a@b.com ", "secret1", " 555 ").unwrap();
    assert_eq!(req.name, "Ann");
    assert_eq!(req.email, "a@b.com");
    assert_eq!(req.phone, "555");
    assert_eq!(req.password, "secret1");
}

#[test]
fn validate_signup_input_requires_every_field() {
    assert_eq!(validate_signup_input("", "a@b.com", "secret1", "555"), Err("All fields are required."));
    assert_eq!(validate_signup_input("Ann", "a@b.com", "secret1", "  "), Err("All fields are required."));
}

#[test]
fn validate_signup_input_keeps_password_verbatim() {
    let req = validate_signup_input("Ann", "a@b.com", " pw ", "555").unwrap();
    assert_eq!(req.password, " pw ");
}
