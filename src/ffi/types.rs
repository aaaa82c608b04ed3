//! Boundary Type System
//!
//! Classifies every C type that appears in a boundary prototype, and says
//! how ownership moves when a value of that type crosses.

use std::fmt;

/// Types that appear in boundary function parameters and return values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfiType {
    /// Void (no value)
    Void,
    /// C `bool`
    Bool,
    /// 32-bit signed integer
    I32,
    /// 32-bit unsigned integer
    U32,
    /// `size_t`, element counts
    Size,
    /// Mutable NUL-terminated string (`char*`), always an owned string
    OwnedStr,
    /// Read-only NUL-terminated string (`const char*`)
    BorrowedStr,
    /// Read-only array of u32 (`const uint32_t*`)
    ConstU32Ptr,
    /// Writable array of i32 (`int32_t*`)
    MutI32Ptr,
    /// Writable u32 slot or array (`uint32_t*`)
    MutU32Ptr,
    /// Two-field aggregate passed by value
    Tuple,
    /// Opaque zip code database handle (`ZipCodeDatabase*`)
    Handle,
    /// Read-only opaque zip code database handle (`const ZipCodeDatabase*`)
    ConstHandle,
}

/// How a value moves across the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Copied whole; nothing to release
    Copied,
    /// Read by the callee for the duration of the call
    Borrowed,
    /// Read and written by the callee for the duration of the call
    BorrowedMut,
    /// Ownership changes hands; exactly one release is owed
    Transferred,
}

impl FfiType {
    /// Whether a value of this type can carry ownership to the caller
    pub fn is_transferable(&self) -> bool {
        matches!(self, FfiType::OwnedStr | FfiType::Handle)
    }

    /// Ownership when returned from a boundary function
    pub fn return_ownership(&self) -> Ownership {
        if self.is_transferable() {
            Ownership::Transferred
        } else {
            Ownership::Copied
        }
    }

    /// Ownership when passed as an argument to an ordinary (non-releasing)
    /// boundary function
    pub fn param_ownership(&self) -> Ownership {
        match self {
            FfiType::Void
            | FfiType::Bool
            | FfiType::I32
            | FfiType::U32
            | FfiType::Size
            | FfiType::Tuple => Ownership::Copied,
            FfiType::BorrowedStr | FfiType::ConstU32Ptr | FfiType::ConstHandle => {
                Ownership::Borrowed
            }
            FfiType::OwnedStr | FfiType::MutI32Ptr | FfiType::MutU32Ptr | FfiType::Handle => {
                Ownership::BorrowedMut
            }
        }
    }

    /// Parse from a C type spelling
    pub fn from_c(s: &str) -> Option<Self> {
        match normalize_c_type(s).as_str() {
            "void" => Some(FfiType::Void),
            "bool" | "_Bool" => Some(FfiType::Bool),
            "int32_t" | "int" => Some(FfiType::I32),
            "uint32_t" => Some(FfiType::U32),
            "size_t" => Some(FfiType::Size),
            "char*" => Some(FfiType::OwnedStr),
            "const char*" | "char const*" => Some(FfiType::BorrowedStr),
            "const uint32_t*" | "uint32_t const*" => Some(FfiType::ConstU32Ptr),
            "int32_t*" => Some(FfiType::MutI32Ptr),
            "uint32_t*" => Some(FfiType::MutU32Ptr),
            "Tuple" => Some(FfiType::Tuple),
            "ZipCodeDatabase*" => Some(FfiType::Handle),
            "const ZipCodeDatabase*" | "ZipCodeDatabase const*" => Some(FfiType::ConstHandle),
            _ => None,
        }
    }
}

/// Collapse whitespace and attach `*` to the type name: `const char *` -> `const char*`.
fn normalize_c_type(s: &str) -> String {
    let joined = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '*' && out.ends_with(' ') {
            out.pop();
        }
        out.push(c);
    }
    out
}

impl fmt::Display for FfiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiType::Void => write!(f, "void"),
            FfiType::Bool => write!(f, "bool"),
            FfiType::I32 => write!(f, "int32_t"),
            FfiType::U32 => write!(f, "uint32_t"),
            FfiType::Size => write!(f, "size_t"),
            FfiType::OwnedStr => write!(f, "char*"),
            FfiType::BorrowedStr => write!(f, "const char*"),
            FfiType::ConstU32Ptr => write!(f, "const uint32_t*"),
            FfiType::MutI32Ptr => write!(f, "int32_t*"),
            FfiType::MutU32Ptr => write!(f, "uint32_t*"),
            FfiType::Tuple => write!(f, "Tuple"),
            FfiType::Handle => write!(f, "ZipCodeDatabase*"),
            FfiType::ConstHandle => write!(f, "const ZipCodeDatabase*"),
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ownership::Copied => write!(f, "copied"),
            Ownership::Borrowed => write!(f, "borrowed"),
            Ownership::BorrowedMut => write!(f, "borrowed mut"),
            Ownership::Transferred => write!(f, "transferred"),
        }
    }
}

/// Function signature at the boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiSignature {
    /// Function name
    pub name: String,
    /// Parameter types
    pub params: Vec<FfiType>,
    /// Return type
    pub return_type: FfiType,
}

impl FfiSignature {
    /// Create a new function signature
    pub fn new(name: impl Into<String>, params: Vec<FfiType>, return_type: FfiType) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
        }
    }

    /// Parse from a C prototype
    /// Format: "return_type function_name(param1_type name1, param2_type name2[], ...)"
    pub fn parse(signature: &str) -> Option<Self> {
        let signature = signature.trim().trim_end_matches(';').trim();

        let open = signature.find('(')?;
        let close = signature.rfind(')')?;
        if close < open {
            return None;
        }
        let before_paren = signature[..open].trim();
        let inside = signature[open + 1..close].trim();

        // Split return type and name; `char *name` puts the star on the name side
        let (return_type_str, name) = split_trailing_ident(before_paren);
        if name.is_empty() || return_type_str.is_empty() {
            return None;
        }
        let return_type = FfiType::from_c(return_type_str)?;

        let mut params = Vec::new();
        if !inside.is_empty() && inside != "void" {
            for param in inside.split(',') {
                params.push(parse_param(param)?);
            }
        }

        Some(Self {
            name: name.to_string(),
            params,
            return_type,
        })
    }
}

/// Split `"const char* s"` into `("const char*", "s")`.
fn split_trailing_ident(s: &str) -> (&str, &str) {
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
        .last()
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    (s[..start].trim(), &s[start..])
}

fn parse_param(param: &str) -> Option<FfiType> {
    let param = param.trim();
    let (param, is_array) = match param.strip_suffix("[]") {
        Some(stripped) => (stripped.trim_end(), true),
        None => (param, false),
    };

    let (type_str, name) = split_trailing_ident(param);
    // Unnamed parameter: the trailing identifier is part of the type
    let type_str = if type_str.is_empty() || name.is_empty() || FfiType::from_c(param).is_some() {
        param
    } else {
        type_str
    };

    if is_array {
        FfiType::from_c(&format!("{}*", type_str))
    } else {
        FfiType::from_c(type_str)
    }
}

impl fmt::Display for FfiSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        if self.params.is_empty() {
            write!(f, "void")?;
        }
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")
    }
}
