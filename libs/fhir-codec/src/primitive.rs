//! FHIR primitive types and their value representations
//!
//! Every FHIR primitive maps onto one of four value shapes: boolean, integer,
//! decimal, or string. The [`PrimitiveType`] decides which JSON type carries
//! the value and how the XML `value` attribute is parsed.

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::str::FromStr;

/// FHIR primitive datatype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Integer,
    UnsignedInt,
    PositiveInt,
    Decimal,
    String,
    Code,
    Id,
    Markdown,
    Uri,
    Url,
    Canonical,
    Oid,
    Uuid,
    Base64Binary,
    Date,
    DateTime,
    Instant,
    Time,
    /// Narrative XHTML; a JSON string, raw XHTML in XML
    Xhtml,
}

impl PrimitiveType {
    /// The FHIR type code (e.g. `dateTime`)
    pub const fn code(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Integer => "integer",
            PrimitiveType::UnsignedInt => "unsignedInt",
            PrimitiveType::PositiveInt => "positiveInt",
            PrimitiveType::Decimal => "decimal",
            PrimitiveType::String => "string",
            PrimitiveType::Code => "code",
            PrimitiveType::Id => "id",
            PrimitiveType::Markdown => "markdown",
            PrimitiveType::Uri => "uri",
            PrimitiveType::Url => "url",
            PrimitiveType::Canonical => "canonical",
            PrimitiveType::Oid => "oid",
            PrimitiveType::Uuid => "uuid",
            PrimitiveType::Base64Binary => "base64Binary",
            PrimitiveType::Date => "date",
            PrimitiveType::DateTime => "dateTime",
            PrimitiveType::Instant => "instant",
            PrimitiveType::Time => "time",
            PrimitiveType::Xhtml => "xhtml",
        }
    }

    /// Suffix used when this type is an alternative of a choice field
    /// (`value[x]` holding a `dateTime` is written as `valueDateTime`).
    pub const fn suffix(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Integer => "Integer",
            PrimitiveType::UnsignedInt => "UnsignedInt",
            PrimitiveType::PositiveInt => "PositiveInt",
            PrimitiveType::Decimal => "Decimal",
            PrimitiveType::String => "String",
            PrimitiveType::Code => "Code",
            PrimitiveType::Id => "Id",
            PrimitiveType::Markdown => "Markdown",
            PrimitiveType::Uri => "Uri",
            PrimitiveType::Url => "Url",
            PrimitiveType::Canonical => "Canonical",
            PrimitiveType::Oid => "Oid",
            PrimitiveType::Uuid => "Uuid",
            PrimitiveType::Base64Binary => "Base64Binary",
            PrimitiveType::Date => "Date",
            PrimitiveType::DateTime => "DateTime",
            PrimitiveType::Instant => "Instant",
            PrimitiveType::Time => "Time",
            PrimitiveType::Xhtml => "Xhtml",
        }
    }

    fn shape(self) -> ValueShape {
        match self {
            PrimitiveType::Boolean => ValueShape::Boolean,
            PrimitiveType::Integer | PrimitiveType::UnsignedInt | PrimitiveType::PositiveInt => {
                ValueShape::Integer
            }
            PrimitiveType::Decimal => ValueShape::Decimal,
            _ => ValueShape::String,
        }
    }

    /// Read a primitive value from its JSON representation.
    pub fn value_from_json(self, field: &str, value: &Value) -> Result<PrimitiveValue> {
        match (self.shape(), value) {
            (ValueShape::Boolean, Value::Bool(b)) => Ok(PrimitiveValue::Boolean(*b)),
            (ValueShape::Integer, Value::Number(n)) => n
                .as_i64()
                .map(PrimitiveValue::Integer)
                .ok_or_else(|| Error::InvalidPrimitive {
                    field: field.to_string(),
                    value: n.to_string(),
                    expected: self.code(),
                }),
            (ValueShape::Decimal, Value::Number(n)) => {
                parse_decimal(field, &n.to_string()).map(PrimitiveValue::Decimal)
            }
            (ValueShape::String, Value::String(s)) => Ok(PrimitiveValue::String(s.clone())),
            _ => Err(Error::type_mismatch(field, self.code())),
        }
    }

    /// Parse a primitive value from its lexical form (the XML `value` attribute).
    pub fn value_from_lexical(self, field: &str, text: &str) -> Result<PrimitiveValue> {
        let invalid = || Error::InvalidPrimitive {
            field: field.to_string(),
            value: text.to_string(),
            expected: self.code(),
        };
        match self.shape() {
            ValueShape::Boolean => match text {
                "true" => Ok(PrimitiveValue::Boolean(true)),
                "false" => Ok(PrimitiveValue::Boolean(false)),
                _ => Err(invalid()),
            },
            ValueShape::Integer => text
                .parse::<i64>()
                .map(PrimitiveValue::Integer)
                .map_err(|_| invalid()),
            ValueShape::Decimal => parse_decimal(field, text).map(PrimitiveValue::Decimal),
            ValueShape::String => Ok(PrimitiveValue::String(text.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueShape {
    Boolean,
    Integer,
    Decimal,
    String,
}

// `Decimal` holds at most 28 significant digits and rounds anything longer.
// A value that would not re-encode with the digits it was read with is
// rejected instead.
fn parse_decimal(field: &str, text: &str) -> Result<Decimal> {
    let invalid = || Error::InvalidPrimitive {
        field: field.to_string(),
        value: text.to_string(),
        expected: "decimal",
    };
    let decimal = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| invalid())?;
    if mantissa_digits(&decimal) < significant_digits(text) {
        return Err(invalid());
    }
    Ok(decimal)
}

fn significant_digits(text: &str) -> usize {
    let mantissa = text.split(['e', 'E']).next().unwrap_or(text);
    mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .skip_while(|&b| b == b'0')
        .count()
}

fn mantissa_digits(decimal: &Decimal) -> usize {
    match decimal.mantissa().unsigned_abs() {
        0 => 0,
        mantissa => mantissa.to_string().len(),
    }
}

/// The value slot of a primitive node
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    String(String),
}

impl PrimitiveValue {
    /// JSON representation of the value. Decimals keep their lexical scale.
    pub fn to_json(&self) -> Result<Value> {
        Ok(match self {
            PrimitiveValue::Boolean(b) => Value::Bool(*b),
            PrimitiveValue::Integer(i) => Value::Number((*i).into()),
            PrimitiveValue::Decimal(d) => Value::Number(Number::from_str(&d.to_string())?),
            PrimitiveValue::String(s) => Value::String(s.clone()),
        })
    }

    /// Lexical form used in the XML `value` attribute
    pub fn to_lexical(&self) -> String {
        match self {
            PrimitiveValue::Boolean(b) => b.to_string(),
            PrimitiveValue::Integer(i) => i.to_string(),
            PrimitiveValue::Decimal(d) => d.to_string(),
            PrimitiveValue::String(s) => s.clone(),
        }
    }
}

/// Rust value types that can sit in the value slot of a primitive element.
pub trait PrimitiveData: Sized {
    fn to_primitive(&self) -> PrimitiveValue;
    fn from_primitive(value: PrimitiveValue) -> Option<Self>;
}

impl PrimitiveData for bool {
    fn to_primitive(&self) -> PrimitiveValue {
        PrimitiveValue::Boolean(*self)
    }

    fn from_primitive(value: PrimitiveValue) -> Option<Self> {
        match value {
            PrimitiveValue::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

impl PrimitiveData for i32 {
    fn to_primitive(&self) -> PrimitiveValue {
        PrimitiveValue::Integer(i64::from(*self))
    }

    fn from_primitive(value: PrimitiveValue) -> Option<Self> {
        match value {
            PrimitiveValue::Integer(i) => i32::try_from(i).ok(),
            _ => None,
        }
    }
}

impl PrimitiveData for u32 {
    fn to_primitive(&self) -> PrimitiveValue {
        PrimitiveValue::Integer(i64::from(*self))
    }

    fn from_primitive(value: PrimitiveValue) -> Option<Self> {
        match value {
            PrimitiveValue::Integer(i) => u32::try_from(i).ok(),
            _ => None,
        }
    }
}

impl PrimitiveData for Decimal {
    fn to_primitive(&self) -> PrimitiveValue {
        PrimitiveValue::Decimal(*self)
    }

    fn from_primitive(value: PrimitiveValue) -> Option<Self> {
        match value {
            PrimitiveValue::Decimal(d) => Some(d),
            PrimitiveValue::Integer(i) => Some(Decimal::from(i)),
            _ => None,
        }
    }
}

impl PrimitiveData for String {
    fn to_primitive(&self) -> PrimitiveValue {
        PrimitiveValue::String(self.clone())
    }

    fn from_primitive(value: PrimitiveValue) -> Option<Self> {
        match value {
            PrimitiveValue::String(s) => Some(s),
            _ => None,
        }
    }
}
