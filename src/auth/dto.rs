use serde::Deserialize;

/// Form body for `POST /register`.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterForm {
    /// Field-level checks run before the service sees the request.
    /// Messages are `"<field>: <reason>"`.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        length_rule("username", self.username.trim(), 3, 64, &mut errors);
        length_rule("password", &self.password, 6, 72, &mut errors);
        errors
    }
}

fn length_rule(field: &str, value: &str, min: usize, max: usize, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{field}: must not be blank"));
        return;
    }
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(format!("{field}: size must be between {min} and {max}"));
    }
}

/// Form body for `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub registered: Option<String>,
}
