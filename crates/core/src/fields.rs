//! Raw form input, input kinds, and type coercion.
//!
//! A renderer reports every edit as a [`FieldInput`]: the logical field name,
//! the raw text (or checked state), the kind of control that produced it, and
//! optionally the nested group and sub-field being edited. Coercion depends
//! only on the input kind; how the coerced value lands in the draft depends on
//! the target field's storage type.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field name enums
// ---------------------------------------------------------------------------

/// Define a closed set of field names with their wire/form keys.
///
/// Generates `ALL`, `as_str`, `parse`, and `Display`.
macro_rules! define_field_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $key:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// The key used by the form model and the error tree.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $key ),+
                }
            }

            /// Resolve a key; unknown keys yield `None`.
            pub fn parse(key: &str) -> Option<Self> {
                match key {
                    $( $key => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use define_field_enum;

// ---------------------------------------------------------------------------
// Input kinds and coerced values
// ---------------------------------------------------------------------------

/// The semantic type of the control an edit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    TextArea,
    Select,
    Number,
    Date,
    Checkbox,
}

impl InputKind {
    /// Coerce a raw control value.
    ///
    /// - `Date` passes the string through; empty means "unset".
    /// - `Number` parses, keeping the raw text when parsing fails.
    /// - `Checkbox` takes the checked state.
    /// - Everything else passes the string through.
    pub fn coerce(self, value: &str, checked: bool) -> FieldValue {
        match self {
            InputKind::Number => FieldValue::Number(NumberInput::parse(value)),
            InputKind::Checkbox => FieldValue::Bool(checked),
            InputKind::Date | InputKind::Text | InputKind::TextArea | InputKind::Select => {
                FieldValue::Text(value.to_string())
            }
        }
    }
}

/// Content of a numeric input: a parsed number, or the text the user typed
/// when it does not parse yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(serde_json::Number),
    Raw(String),
}

/// `[-2^63, 2^63)`: the floats that convert to `i64` exactly.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

impl Default for NumberInput {
    fn default() -> Self {
        NumberInput::Number(0.into())
    }
}

impl From<i64> for NumberInput {
    fn from(value: i64) -> Self {
        NumberInput::Number(value.into())
    }
}

impl NumberInput {
    /// Parse typed text. Empty input and non-numeric input are kept verbatim.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return NumberInput::Raw(raw.to_string());
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return NumberInput::Number(n.into());
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => serde_json::Number::from_f64(f)
                .map(NumberInput::Number)
                .unwrap_or_else(|| NumberInput::Raw(raw.to_string())),
            _ => NumberInput::Raw(raw.to_string()),
        }
    }

    /// Numeric value, parsing raw text if needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberInput::Number(n) => n.as_f64(),
            NumberInput::Raw(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        }
    }

    /// Integral value, if the content is a whole number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumberInput::Number(n) => n.as_i64().or_else(|| {
                // `as` saturates; out-of-range floats are not integers here.
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(f))
                    .map(|f| f as i64)
            }),
            NumberInput::Raw(s) => match NumberInput::parse(s) {
                parsed @ NumberInput::Number(_) => parsed.as_i64(),
                NumberInput::Raw(_) => None,
            },
        }
    }

    /// `true` when the content is a number strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.as_f64().is_some_and(|f| f > 0.0)
    }

    /// Wire form: a JSON number when the content parses, otherwise the raw
    /// string.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            NumberInput::Number(n) => serde_json::Value::Number(n.clone()),
            NumberInput::Raw(s) => match NumberInput::parse(s) {
                NumberInput::Number(n) => serde_json::Value::Number(n),
                NumberInput::Raw(s) => serde_json::Value::String(s),
            },
        }
    }
}

impl fmt::Display for NumberInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberInput::Number(n) => write!(f, "{n}"),
            NumberInput::Raw(s) => f.write_str(s),
        }
    }
}

/// A coerced input value, ready to be stored into a draft field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(NumberInput),
    Bool(bool),
}

impl FieldValue {
    /// Store into a text field.
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }

    /// Store into a numeric field. Text passes through as raw content.
    pub fn into_number(self) -> NumberInput {
        match self {
            FieldValue::Number(n) => n,
            FieldValue::Text(s) => NumberInput::Raw(s),
            FieldValue::Bool(b) => NumberInput::Raw(b.to_string()),
        }
    }

    /// Store into a boolean field. Text from a `"true"`/`"false"` select is
    /// compared literally.
    pub fn into_bool(self) -> bool {
        match self {
            FieldValue::Bool(b) => b,
            FieldValue::Text(s) => s == "true",
            FieldValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Field input
// ---------------------------------------------------------------------------

/// One edit reported by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInput<'a> {
    /// Logical field name (top-level property when `group` is `None`).
    pub name: &'a str,
    /// Raw control text.
    pub value: &'a str,
    /// Checked state, meaningful for checkboxes only.
    pub checked: bool,
    /// Control kind, which selects the coercion.
    pub kind: InputKind,
    /// Nested group being edited, if any.
    pub group: Option<&'a str>,
    /// Sub-field within `group`.
    pub sub_field: Option<&'a str>,
}

impl<'a> FieldInput<'a> {
    pub fn new(name: &'a str, kind: InputKind, value: &'a str) -> Self {
        Self {
            name,
            value,
            checked: false,
            kind,
            group: None,
            sub_field: None,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self::new(name, InputKind::Text, value)
    }

    pub fn number(name: &'a str, value: &'a str) -> Self {
        Self::new(name, InputKind::Number, value)
    }

    pub fn date(name: &'a str, value: &'a str) -> Self {
        Self::new(name, InputKind::Date, value)
    }

    pub fn checkbox(name: &'a str, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, InputKind::Checkbox, "")
        }
    }

    /// An edit of `group.sub_field`.
    pub fn grouped(group: &'a str, sub_field: &'a str, kind: InputKind, value: &'a str) -> Self {
        Self {
            group: Some(group),
            sub_field: Some(sub_field),
            ..Self::new(sub_field, kind, value)
        }
    }

    /// The coerced value of this edit.
    pub fn coerced(&self) -> FieldValue {
        self.kind.coerce(self.value, self.checked)
    }
}
