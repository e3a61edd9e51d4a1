use core::fmt;

use chrono::SecondsFormat;

use crate::value::Value;

fn write_seq<'a>(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = &'a Value>) -> fmt::Result {
    f.write_str("[")?;
    for (index, item) in items.enumerate() {
        if index > 0 {
            f.write_str(" ")?;
        }
        fmt::Display::fmt(item, f)?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("<nil>"),
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::I8(v) => fmt::Display::fmt(v, f),
            Self::I16(v) => fmt::Display::fmt(v, f),
            Self::I32(v) => fmt::Display::fmt(v, f),
            Self::I64(v) => fmt::Display::fmt(v, f),
            Self::Isize(v) => fmt::Display::fmt(v, f),
            Self::U8(v) => fmt::Display::fmt(v, f),
            Self::U16(v) => fmt::Display::fmt(v, f),
            Self::U32(v) => fmt::Display::fmt(v, f),
            Self::U64(v) => fmt::Display::fmt(v, f),
            Self::Usize(v) | Self::Uintptr(v) => fmt::Display::fmt(v, f),
            Self::F32(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
            Self::C64(v) => fmt::Display::fmt(v, f),
            Self::C128(v) => fmt::Display::fmt(v, f),
            Self::String(v) => f.write_str(v),
            Self::Bytes(v) => {
                f.write_str("[")?;
                for (index, byte) in v.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{byte}")?;
                }
                f.write_str("]")
            }
            Self::Timestamp(v) => f.write_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Array(v) => write_seq(f, v.iter()),
            Self::List(v) => write_seq(f, v.iter()),
            Self::Map(v) => {
                f.write_str("map[")?;
                for (index, (key, value)) in v.sorted_entries().into_iter().enumerate() {
                    if index > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_str("]")
            }
            Self::Record(v) => {
                f.write_str("{")?;
                for (index, value) in v.values().iter().enumerate() {
                    if index > 0 {
                        f.write_str(" ")?;
                    }
                    fmt::Display::fmt(value, f)?;
                }
                f.write_str("}")
            }
            Self::Pointer(v) => match v.target() {
                None => f.write_str("<nil>"),
                Some(target) => match target.try_borrow() {
                    Ok(inner) => write!(f, "&{}", *inner),
                    Err(_) => f.write_str("&<borrowed>"),
                },
            },
        }
    }
}
