//! Form model and field validation.
//!
//! A [`Form`] is an ordered list of named text fields, each with a list of
//! [`Rule`]s.  Validation reports the *first* failing rule of every field,
//! so a field shows one message at a time.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid regex"));

static UPPERCASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid regex"));

static AARUNYA_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^AR-\d{2}-\d{4}$").expect("valid regex"));

// ───────────────────────────────────────── aarunya id ────────

/// An account identifier of the shape `AR-##-####`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AarunyaId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid Aarunya-ID {0:?}, expected AR-##-####")]
pub struct InvalidAarunyaId(pub String);

impl AarunyaId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AarunyaId {
    type Err = InvalidAarunyaId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if AARUNYA_ID_RE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidAarunyaId(s.to_string()))
        }
    }
}

impl fmt::Display for AarunyaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ───────────────────────────────────────── rules ─────────────

/// A single predicate on a field value, with the message shown on failure.
#[derive(Debug, Clone)]
pub enum Rule {
    Required(&'static str),
    MinLength(usize, &'static str),
    Pattern(&'static Lazy<Regex>, &'static str),
    /// Value must equal the value of another field of the same form.
    Matches(&'static str, &'static str),
}

impl Rule {
    /// Check `value`; `lookup` resolves other fields for [`Rule::Matches`].
    fn check<'a>(&self, value: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> Option<&'static str> {
        match self {
            Rule::Required(msg) => value.is_empty().then_some(*msg),
            Rule::MinLength(n, msg) => (value.chars().count() < *n).then_some(*msg),
            Rule::Pattern(re, msg) => (!re.is_match(value)).then_some(*msg),
            Rule::Matches(other, msg) => (lookup(*other) != Some(value)).then_some(*msg),
        }
    }
}

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

// ───────────────────────────────────────── fields ────────────

/// Static description of a form field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Wire name, e.g. `"confirmPassword"`.
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    /// Rendered masked.
    pub secret: bool,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub spec: FieldSpec,
    pub value: String,
    pub error: Option<String>,
}

/// Ordered fields plus the index of the one receiving input.
#[derive(Debug, Clone)]
pub struct Form {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub fields: Vec<Field>,
    pub focused: usize,
}

impl Form {
    pub fn new(title: &'static str, subtitle: &'static str, specs: Vec<FieldSpec>) -> Self {
        Self {
            title,
            subtitle,
            fields: specs
                .into_iter()
                .map(|spec| Field {
                    spec,
                    value: String::new(),
                    error: None,
                })
                .collect(),
            focused: 0,
        }
    }

    /// The "NEW GAME" account creation form.
    pub fn registration() -> Self {
        Self::new(
            "NEW GAME",
            "Initialize Your Aarunya Account",
            vec![
                FieldSpec {
                    name: "fullName",
                    label: "PLAYER NAME",
                    placeholder: "> Enter your full name",
                    secret: false,
                    rules: vec![
                        Rule::Required("Full name is required"),
                        Rule::MinLength(2, "Name must be at least 2 characters"),
                    ],
                },
                FieldSpec {
                    name: "email",
                    label: "CONTACT TERMINAL",
                    placeholder: "> Enter your email",
                    secret: false,
                    rules: vec![
                        Rule::Required("Email is required"),
                        Rule::Pattern(&EMAIL_RE, "Invalid email address"),
                    ],
                },
                FieldSpec {
                    name: "college",
                    label: "PLAYER FACTION",
                    placeholder: "> Enter your college",
                    secret: false,
                    rules: vec![Rule::Required("College is required")],
                },
                FieldSpec {
                    name: "password",
                    label: "ACCESS CODE",
                    placeholder: "> Enter password",
                    secret: true,
                    rules: vec![
                        Rule::Required("Password is required"),
                        Rule::MinLength(8, "Password must be at least 8 characters"),
                        Rule::Pattern(&UPPERCASE_RE, "Password must contain an uppercase letter"),
                    ],
                },
                FieldSpec {
                    name: "confirmPassword",
                    label: "VERIFY CODE",
                    placeholder: "> Confirm password",
                    secret: true,
                    rules: vec![
                        Rule::Required("Please confirm your password"),
                        Rule::Matches("password", "Passwords do not match"),
                    ],
                },
            ],
        )
    }

    /// The "RESUME GAME" sign-in form.
    pub fn login() -> Self {
        Self::new(
            "RESUME GAME",
            "Access Your Aarunya Account",
            vec![
                FieldSpec {
                    name: "aarunyaId",
                    label: "PLAYER ID",
                    placeholder: "> AR-26-XXXX",
                    secret: false,
                    rules: vec![
                        Rule::Required("Aarunya-ID is required"),
                        Rule::Pattern(&AARUNYA_ID_RE, "Invalid format. Use: AR-26-XXXX"),
                    ],
                },
                FieldSpec {
                    name: "password",
                    label: "ACCESS CODE",
                    placeholder: "> Enter your password",
                    secret: true,
                    rules: vec![Rule::Required("Password is required")],
                },
            ],
        )
    }

    pub fn value(&self, name: &str) -> &str {
        self.lookup(name).unwrap_or("")
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.spec.name == name)
            .map(|f| f.value.as_str())
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.spec.name == name) {
            field.value = value.into();
        }
    }

    /// Errors for the current values, without touching the form.
    pub fn check(&self) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .spec
                    .rules
                    .iter()
                    .find_map(|rule| rule.check(&field.value, |name| self.lookup(name)))
                    .map(|msg| FieldError {
                        field: field.spec.name,
                        message: msg.to_string(),
                    })
            })
            .collect()
    }

    /// Validate and record each field's error (or clear it).
    pub fn validate(&mut self) -> Result<(), Vec<FieldError>> {
        let errors = self.check();
        for field in &mut self.fields {
            field.error = errors
                .iter()
                .find(|e| e.field == field.spec.name)
                .map(|e| e.message.clone());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            // Jump to the first broken field.
            if let Some(idx) = self
                .fields
                .iter()
                .position(|f| f.error.is_some())
            {
                self.focused = idx;
            }
            Err(errors)
        }
    }

    /// Reset every value and error.
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.error = None;
        }
        self.focused = 0;
    }

    // ── editing ─────────────────────────────────────────────────

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.push(c);
            field.error = None;
        }
    }

    pub fn push_str(&mut self, s: &str) {
        for c in s.chars().filter(|c| !c.is_control()) {
            self.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.pop();
        }
    }
}
