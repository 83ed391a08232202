use std::fmt;

/// Kind tag for an attribute value.
///
/// The managed host has no visibility into native types, so every attribute
/// is described by one of these nine shapes. The set is closed: the remote
/// call encoding in [`ValueKind::signature`] is exhaustive over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    Bool,
    Text,
    /// An `i32` followed by an `f32` (e.g. a unit plus a dimension).
    IntFloat,
    /// Two `f32`s.
    FloatFloat,
    /// Three `i32`s.
    IntTriple,
    /// Four `i32`s (paddings, drawable bounds).
    IntQuad,
    /// Three `f32`s followed by an `i32` (e.g. a shadow layer).
    FloatTripleInt,
}

impl ValueKind {
    /// Typed-call signature fragment expected by the host for this kind.
    ///
    /// The mapping is part of the wire contract: a remote setter for an
    /// attribute of this kind is always invoked with exactly this argument
    /// encoding.
    pub fn signature(self) -> &'static str {
        match self {
            ValueKind::Int => "(I)V",
            ValueKind::Float => "(F)V",
            ValueKind::Bool => "(Z)V",
            ValueKind::Text => "(Ljava/lang/String;)V",
            ValueKind::IntFloat => "(IF)V",
            ValueKind::FloatFloat => "(FF)V",
            ValueKind::IntTriple => "(III)V",
            ValueKind::IntQuad => "(IIII)V",
            ValueKind::FloatTripleInt => "(FFFI)V",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Text => "text",
            ValueKind::IntFloat => "int+float",
            ValueKind::FloatFloat => "float+float",
            ValueKind::IntTriple => "int triple",
            ValueKind::IntQuad => "int quad",
            ValueKind::FloatTripleInt => "float triple+int",
        };
        f.write_str(name)
    }
}

/// A stored attribute value, one variant per [`ValueKind`].
///
/// `Text` owns its string; replacing or dropping the value releases the
/// payload through normal ownership.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    Text(String),
    IntFloat(i32, f32),
    FloatFloat(f32, f32),
    IntTriple(i32, i32, i32),
    IntQuad(i32, i32, i32, i32),
    FloatTripleInt(f32, f32, f32, i32),
}

impl AttrValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            AttrValue::Int(_) => ValueKind::Int,
            AttrValue::Float(_) => ValueKind::Float,
            AttrValue::Bool(_) => ValueKind::Bool,
            AttrValue::Text(_) => ValueKind::Text,
            AttrValue::IntFloat(..) => ValueKind::IntFloat,
            AttrValue::FloatFloat(..) => ValueKind::FloatFloat,
            AttrValue::IntTriple(..) => ValueKind::IntTriple,
            AttrValue::IntQuad(..) => ValueKind::IntQuad,
            AttrValue::FloatTripleInt(..) => ValueKind::FloatTripleInt,
        }
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        AttrValue::Float(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<(i32, f32)> for AttrValue {
    fn from((a, b): (i32, f32)) -> Self {
        AttrValue::IntFloat(a, b)
    }
}

impl From<(f32, f32)> for AttrValue {
    fn from((a, b): (f32, f32)) -> Self {
        AttrValue::FloatFloat(a, b)
    }
}

impl From<(i32, i32, i32)> for AttrValue {
    fn from((a, b, c): (i32, i32, i32)) -> Self {
        AttrValue::IntTriple(a, b, c)
    }
}

impl From<(i32, i32, i32, i32)> for AttrValue {
    fn from((a, b, c, d): (i32, i32, i32, i32)) -> Self {
        AttrValue::IntQuad(a, b, c, d)
    }
}

impl From<(f32, f32, f32, i32)> for AttrValue {
    fn from((a, b, c, d): (f32, f32, f32, i32)) -> Self {
        AttrValue::FloatTripleInt(a, b, c, d)
    }
}
