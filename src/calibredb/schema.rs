/*!
schema.rs - declarative option tables + the validator / argument builder that
interpret them.

Each sub-command's option struct implements `CommandOptions` by returning its
fields, in calibredb's declaration order, as a `Vec<Field>`. Nothing here
inspects struct layout at runtime; the table *is* the contract.

Encoding rules (per `Value` kind):
  Text(s)            --name=s            (omitted when empty)
  Switch(Some(_))    --name              (None omitted; Some(false) still emitted)
  Choice(Some(c))    --name=c
  Repeated([a, b])   --name=a --name=b   (order preserved)
  Number(n, policy)  --name=n            (OmitZero: zero is "unset")
  Positional(s)      s                   (placed right after the sub-command)
  Positionals([..])  each element

Vector layout produced by `build_args`:
  <command> [positionals...] [flags...] [extra...]
The library argument (and remote credentials) are appended by the caller that
owns the configuration.
*/

use std::fmt;

use super::error::{CalibreError, Result};

/* ---- Field Model ---- */

/// What a zero means for a numeric option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroPolicy {
    /// Zero is the "not set" sentinel; the flag is left out.
    OmitZero,
    /// Zero is a real value; the flag is emitted whenever a value is present.
    KeepZero,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(n) => *n == 0,
            Number::Float(f) => *f == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Switch(Option<bool>),
    Choice(Option<&'static str>),
    Repeated(&'a [String]),
    Number(Option<Number>, ZeroPolicy),
    Positional(&'a str),
    Positionals(&'a [String]),
}

/// One row of a sub-command's option table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field<'a> {
    /// Long flag name as calibredb spells it (also used in validation messages).
    pub name: &'static str,
    pub value: Value<'a>,
    pub required: bool,
}

impl<'a> Field<'a> {
    fn new(name: &'static str, value: Value<'a>) -> Self {
        Self {
            name,
            value,
            required: false,
        }
    }

    pub fn text(name: &'static str, value: &'a str) -> Self {
        Self::new(name, Value::Text(value))
    }

    pub fn switch(name: &'static str, value: Option<bool>) -> Self {
        Self::new(name, Value::Switch(value))
    }

    pub fn choice(name: &'static str, value: Option<&'static str>) -> Self {
        Self::new(name, Value::Choice(value))
    }

    pub fn repeated(name: &'static str, values: &'a [String]) -> Self {
        Self::new(name, Value::Repeated(values))
    }

    /// Integer where zero means "use calibredb's default".
    pub fn int(name: &'static str, value: i64) -> Self {
        Self::new(
            name,
            Value::Number(Some(Number::Int(value)), ZeroPolicy::OmitZero),
        )
    }

    /// Float where zero means "use calibredb's default".
    pub fn float(name: &'static str, value: f64) -> Self {
        Self::new(
            name,
            Value::Number(Some(Number::Float(value)), ZeroPolicy::OmitZero),
        )
    }

    /// Float where zero is meaningful (e.g. a series index of 0).
    pub fn kept_float(name: &'static str, value: Option<f64>) -> Self {
        Self::new(
            name,
            Value::Number(value.map(Number::Float), ZeroPolicy::KeepZero),
        )
    }

    pub fn arg(name: &'static str, value: &'a str) -> Self {
        Self::new(name, Value::Positional(value))
    }

    pub fn args(name: &'static str, values: &'a [String]) -> Self {
        Self::new(name, Value::Positionals(values))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_positional(&self) -> bool {
        matches!(self.value, Value::Positional(_) | Value::Positionals(_))
    }

    /// Whether the field holds nothing that would satisfy a mandatory contract.
    pub fn is_missing(&self) -> bool {
        match self.value {
            Value::Text(s) | Value::Positional(s) => s.is_empty(),
            Value::Switch(b) => b.is_none(),
            Value::Choice(c) => c.is_none_or(str::is_empty),
            Value::Repeated(v) | Value::Positionals(v) => v.is_empty(),
            Value::Number(None, _) => true,
            Value::Number(Some(n), ZeroPolicy::OmitZero) => n.is_zero(),
            Value::Number(Some(_), ZeroPolicy::KeepZero) => false,
        }
    }

    fn encode(&self, out: &mut Vec<String>) {
        let name = self.name;
        match self.value {
            Value::Text(s) => {
                if !s.is_empty() {
                    out.push(format!("--{name}={s}"));
                }
            }
            Value::Switch(Some(_)) => out.push(format!("--{name}")),
            Value::Switch(None) => {}
            Value::Choice(Some(c)) if !c.is_empty() => out.push(format!("--{name}={c}")),
            Value::Choice(_) => {}
            Value::Repeated(values) => {
                for v in values {
                    out.push(format!("--{name}={v}"));
                }
            }
            Value::Number(Some(n), policy) => {
                if policy == ZeroPolicy::KeepZero || !n.is_zero() {
                    out.push(format!("--{name}={n}"));
                }
            }
            Value::Number(None, _) => {}
            Value::Positional(s) => {
                if !s.is_empty() {
                    out.push(s.to_string());
                }
            }
            Value::Positionals(values) => out.extend(values.iter().cloned()),
        }
    }
}

/* ---- Option Contract ---- */

/// Implemented by every sub-command option struct.
pub trait CommandOptions {
    /// calibredb sub-command name (e.g. `add_format`).
    const COMMAND: &'static str;

    /// Option table in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/* ---- Validator ---- */

/// Reject the option set if any mandatory field is empty.
///
/// Every missing field is reported, in declaration order.
pub fn validate<O: CommandOptions>(opts: &O) -> Result<()> {
    let missing: Vec<&'static str> = opts
        .fields()
        .iter()
        .filter(|f| f.required && f.is_missing())
        .map(|f| f.name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CalibreError::MissingRequiredField {
            command: O::COMMAND,
            fields: missing,
        })
    }
}

/* ---- Argument Builder ---- */

/// Encode a (validated) option set plus free-form arguments.
pub fn build_args<O: CommandOptions>(opts: &O, extra: &[String]) -> Vec<String> {
    let fields = opts.fields();
    let mut argv = vec![O::COMMAND.to_string()];

    for field in fields.iter().filter(|f| f.is_positional()) {
        field.encode(&mut argv);
    }
    for field in fields.iter().filter(|f| !f.is_positional()) {
        field.encode(&mut argv);
    }
    argv.extend(extra.iter().cloned());
    argv
}
