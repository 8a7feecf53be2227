//! Scalar literal rendering.

use std::fmt;

use phpgen_core::is_digits;

/// Magnitude below which floats are formatted through the scaled branch.
const SMALL_FLOAT_THRESHOLD: f64 = 0.0001;
/// Scale applied to small floats before measuring their fractional digits.
const SMALL_FLOAT_SCALE: f64 = 1_000_000.0;
/// Extra precision added for small floats.
const SMALL_FLOAT_PRECISION_PAD: usize = 7;
/// Significant digits of PHP's default float-to-string conversion.
const FLOAT_STRING_PRECISION: i32 = 14;
/// Magnitudes at or above this render in exponent form.
const EXPONENT_UPPER_BOUND: f64 = 1e15;
/// Nonzero magnitudes below this render in exponent form.
const EXPONENT_LOWER_BOUND: f64 = 1e-10;

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Type a scalar is expected to render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    Int,
    Float,
    String,
}

impl Scalar {
    pub fn string(v: impl Into<String>) -> Self {
        Self::String(v.into())
    }

    /// Render as PHP source text.
    ///
    /// ```
    /// use phpgen_codegen::expr::Scalar;
    ///
    /// assert_eq!(Scalar::from(44.4444444444).render(), "44.4444444444");
    /// assert_eq!(Scalar::from("plain").render(), "\"plain\"");
    /// assert_eq!(Scalar::from("42").render(), "42");
    /// ```
    pub fn render(&self) -> String {
        self.render_as(None)
    }

    /// Render with an expected type; only [`ScalarType::String`] changes the
    /// output, forcing numbers and digit strings to be quoted.
    pub fn render_as(&self, expected: Option<ScalarType>) -> String {
        let as_string = expected == Some(ScalarType::String);
        match self {
            Self::Bool(v) => v.to_string(),
            Self::Int(v) if as_string => quote(&v.to_string()),
            Self::Int(v) => v.to_string(),
            Self::Float(v) if as_string => quote(&render_float(*v)),
            Self::Float(v) => render_float(*v),
            Self::String(s) if !as_string && is_integer_string(s) => s.clone(),
            Self::String(s) => quote(s),
        }
    }

    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Self::Bool(_) => ScalarType::Bool,
            Self::Int(_) => ScalarType::Int,
            Self::Float(_) => ScalarType::Float,
            Self::String(_) => ScalarType::String,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// Digit-only strings render bare, except a leading zero which PHP would
/// read as octal.
fn is_integer_string(s: &str) -> bool {
    is_digits(s) && (s == "0" || !s.starts_with('0'))
}

/// Quote with double quotes unless the payload already contains one.
/// The payload is never escaped.
fn quote(s: &str) -> String {
    if s.contains('"') {
        format!("'{}'", s)
    } else {
        format!("\"{}\"", s)
    }
}

/// Render a float keeping the number of fractional digits it was typed with.
///
/// Negative zero renders as `0.0`. Magnitudes outside
/// [`EXPONENT_LOWER_BOUND`, `EXPONENT_UPPER_BOUND`) switch to PHP exponent
/// notation (`1.0E+20`) at 14 significant digits.
pub(crate) fn render_float(v: f64) -> String {
    if v.is_nan() {
        return "NAN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if v == 0.0 {
        return "0.0".to_string();
    }
    if !(EXPONENT_LOWER_BOUND..EXPONENT_UPPER_BOUND).contains(&v.abs()) {
        return exponent_form(v);
    }

    let formatted = if v.abs() < SMALL_FLOAT_THRESHOLD {
        let scaled = float_to_string(v * SMALL_FLOAT_SCALE);
        let precision = fraction_digits(&scaled) + SMALL_FLOAT_PRECISION_PAD;
        format!("{:.*}", precision, v)
    } else {
        let precision = fraction_digits(&float_to_string(v));
        format!("{:.*}", precision, v)
    };
    keep_decimal_point(trim_fraction(&formatted))
}

/// Shortest decimal form at 14 significant digits, trailing zeros removed.
fn float_to_string(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let magnitude = v.abs().log10().floor() as i32;
    let decimals = (FLOAT_STRING_PRECISION - 1 - magnitude).max(0) as usize;
    let formatted = format!("{:.*}", decimals, v);
    trim_fraction(&formatted)
        .trim_end_matches('.')
        .to_string()
}

fn exponent_form(v: f64) -> String {
    let formatted = format!("{:.*e}", (FLOAT_STRING_PRECISION - 1) as usize, v);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let sign = if exponent.starts_with('-') { "" } else { "+" };
            format!(
                "{}E{}{}",
                keep_decimal_point(trim_fraction(mantissa)),
                sign,
                exponent
            )
        }
        None => formatted,
    }
}

fn fraction_digits(s: &str) -> usize {
    s.split_once('.').map_or(0, |(_, fraction)| fraction.len())
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0')
    } else {
        s
    }
}

fn keep_decimal_point(s: &str) -> String {
    if s.ends_with('.') {
        format!("{}0", s)
    } else if !s.contains('.') {
        format!("{}.0", s)
    } else {
        s.to_string()
    }
}
