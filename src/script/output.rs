//! Conversion of script replies according to an [`OutputType`] selector.

use bytes::Bytes;

use crate::core::command::{reply, unexpected};
use crate::proto::frame::Frame;
use crate::script::OutputType;

/// A converted script reply.
///
/// The variant produced by a call matches the [`OutputType`] the caller
/// selected; `Multi` elements are converted structurally and may hold any
/// variant except `Boolean`.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    /// A flag derived from an integer or null reply.
    Boolean(bool),
    /// An integer reply.
    Integer(i64),
    /// A simple-string reply.
    Status(String),
    /// A bulk reply; `None` for null.
    Value(Option<Bytes>),
    /// An array reply.
    Multi(Vec<ScriptValue>),
}

impl ScriptValue {
    /// Returns the integer payload, if this is an `Integer`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ScriptValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the bulk payload, if this is a non-null `Value`.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ScriptValue::Value(Some(b)) => Some(b),
            _ => None,
        }
    }
}

/// Converts a raw reply frame according to the selected output type.
///
/// Server error replies always surface as errors, whatever the selector.
pub(crate) fn convert(output: OutputType, frame: Frame) -> crate::Result<ScriptValue> {
    let frame = reply(frame)?;
    match output {
        OutputType::Boolean => match frame {
            Frame::Integer(n) => Ok(ScriptValue::Boolean(n != 0)),
            f if f.is_null() => Ok(ScriptValue::Boolean(false)),
            other => Err(unexpected(&other)),
        },
        OutputType::Integer => match frame {
            Frame::Integer(n) => Ok(ScriptValue::Integer(n)),
            other => Err(unexpected(&other)),
        },
        OutputType::Status => match frame {
            Frame::SimpleString(s) => Ok(ScriptValue::Status(
                String::from_utf8_lossy(&s).into_owned(),
            )),
            other => Err(unexpected(&other)),
        },
        OutputType::Value => match frame {
            Frame::BulkString(b) => Ok(ScriptValue::Value(b)),
            Frame::Null => Ok(ScriptValue::Value(None)),
            other => Err(unexpected(&other)),
        },
        OutputType::Multi => match frame {
            Frame::Array(items) => Ok(ScriptValue::Multi(
                items
                    .into_iter()
                    .map(convert_element)
                    .collect::<crate::Result<_>>()?,
            )),
            // A script returning Lua false yields a null reply.
            Frame::Null => Ok(ScriptValue::Multi(Vec::new())),
            other => Err(unexpected(&other)),
        },
    }
}

fn convert_element(frame: Frame) -> crate::Result<ScriptValue> {
    match reply(frame)? {
        Frame::Integer(n) => Ok(ScriptValue::Integer(n)),
        Frame::SimpleString(s) => Ok(ScriptValue::Status(
            String::from_utf8_lossy(&s).into_owned(),
        )),
        Frame::BulkString(b) => Ok(ScriptValue::Value(b)),
        Frame::Null => Ok(ScriptValue::Value(None)),
        Frame::Array(items) => Ok(ScriptValue::Multi(
            items
                .into_iter()
                .map(convert_element)
                .collect::<crate::Result<_>>()?,
        )),
        Frame::Error(_) => unreachable!("reply() surfaces error frames"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_from_integer() {
        assert_eq!(
            convert(OutputType::Boolean, Frame::Integer(1)).unwrap(),
            ScriptValue::Boolean(true)
        );
        assert_eq!(
            convert(OutputType::Boolean, Frame::Integer(0)).unwrap(),
            ScriptValue::Boolean(false)
        );
    }

    #[test]
    fn boolean_from_null_is_false() {
        // Lua false comes back as a null reply.
        assert_eq!(
            convert(OutputType::Boolean, Frame::BulkString(None)).unwrap(),
            ScriptValue::Boolean(false)
        );
        assert_eq!(
            convert(OutputType::Boolean, Frame::Null).unwrap(),
            ScriptValue::Boolean(false)
        );
    }

    #[test]
    fn integer_requires_integer_reply() {
        assert_eq!(
            convert(OutputType::Integer, Frame::Integer(-7)).unwrap(),
            ScriptValue::Integer(-7)
        );
        assert!(convert(OutputType::Integer, Frame::BulkString(None)).is_err());
    }

    #[test]
    fn status_from_simple_string() {
        assert_eq!(
            convert(OutputType::Status, Frame::SimpleString(b"OK".to_vec())).unwrap(),
            ScriptValue::Status("OK".to_string())
        );
        assert!(convert(OutputType::Status, Frame::Integer(1)).is_err());
    }

    #[test]
    fn value_from_bulk_and_null() {
        assert_eq!(
            convert(OutputType::Value, Frame::BulkString(Some("x".into()))).unwrap(),
            ScriptValue::Value(Some(Bytes::from("x")))
        );
        assert_eq!(
            convert(OutputType::Value, Frame::BulkString(None)).unwrap(),
            ScriptValue::Value(None)
        );
    }

    #[test]
    fn multi_converts_elements_structurally() {
        let frame = Frame::Array(vec![
            Frame::Integer(1),
            Frame::BulkString(Some("two".into())),
            Frame::Array(vec![Frame::SimpleString(b"OK".to_vec()), Frame::Null]),
        ]);
        assert_eq!(
            convert(OutputType::Multi, frame).unwrap(),
            ScriptValue::Multi(vec![
                ScriptValue::Integer(1),
                ScriptValue::Value(Some(Bytes::from("two"))),
                ScriptValue::Multi(vec![
                    ScriptValue::Status("OK".to_string()),
                    ScriptValue::Value(None),
                ]),
            ])
        );
    }

    #[test]
    fn multi_from_null_is_empty() {
        assert_eq!(
            convert(OutputType::Multi, Frame::Null).unwrap(),
            ScriptValue::Multi(Vec::new())
        );
    }

    #[test]
    fn error_reply_wins_over_selector() {
        let err = convert(
            OutputType::Value,
            Frame::Error(b"NOSCRIPT No matching script. Use EVAL.".to_vec()),
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::NoScript { .. }));
    }

    #[test]
    fn accessors() {
        assert_eq!(ScriptValue::Integer(5).as_integer(), Some(5));
        assert_eq!(ScriptValue::Boolean(true).as_integer(), None);
        let value = ScriptValue::Value(Some(Bytes::from("v")));
        assert_eq!(value.as_bytes(), Some(&Bytes::from("v")));
    }
}
