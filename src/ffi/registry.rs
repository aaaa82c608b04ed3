//! Contract Registry
//!
//! Central table of every function on the boundary, which side implements
//! it, and who releases what it hands out.

use std::collections::HashMap;
use std::fmt;

use interop_abi::Side;

use super::types::{FfiSignature, FfiType, Ownership};
use crate::error::{BoundaryError, BoundaryResult};

/// What a boundary function does with ownership
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// Takes and returns only copied or borrowed values
    Plain,
    /// Returns an owned value that must be given to `releaser`
    Producer { releaser: String },
    /// Consumes an owned value of type `releases`
    Releaser { releases: FfiType },
}

/// Information about a boundary function
#[derive(Debug, Clone)]
pub struct FfiFunctionInfo {
    /// Runtime that implements the function
    pub side: Side,
    /// Function signature
    pub signature: FfiSignature,
    /// Description
    pub description: String,
    /// Ownership role
    pub role: Role,
}

impl FfiFunctionInfo {
    /// Create a new function info
    pub fn new(side: Side, signature: FfiSignature, description: impl Into<String>) -> Self {
        Self {
            side,
            signature,
            description: description.into(),
            role: Role::Plain,
        }
    }

    /// Mark the return value as owned, released by `releaser`
    pub fn producing(mut self, releaser: impl Into<String>) -> Self {
        self.role = Role::Producer {
            releaser: releaser.into(),
        };
        self
    }

    /// Mark this function as the destructor for `ty`
    pub fn releasing(mut self, ty: FfiType) -> Self {
        self.role = Role::Releaser { releases: ty };
        self
    }

    pub fn name(&self) -> &str {
        &self.signature.name
    }

    /// Ownership of parameter `index`, or `None` if out of range
    pub fn param_ownership(&self, index: usize) -> Option<Ownership> {
        let ty = self.signature.params.get(index)?;
        match &self.role {
            Role::Releaser { releases } if releases == ty => Some(Ownership::Transferred),
            _ => Some(ty.param_ownership()),
        }
    }

    /// Ownership of the return value
    pub fn return_ownership(&self) -> Ownership {
        self.signature.return_type.return_ownership()
    }
}

impl fmt::Display for FfiFunctionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.side, self.signature)?;
        match &self.role {
            Role::Plain => Ok(()),
            Role::Producer { releaser } => write!(f, "  -> release with {}", releaser),
            Role::Releaser { releases } => write!(f, "  <- releases {}", releases),
        }
    }
}

/// Difference between a declared prototype and the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureMismatch {
    /// Registered but not declared
    Missing(String),
    /// Declared but not registered
    Undeclared(String),
    /// Declared for one side but implemented by the other
    WrongSide { name: String, implemented_by: Side },
    /// Declared with a different prototype
    Differs {
        expected: FfiSignature,
        found: FfiSignature,
    },
}

impl fmt::Display for SignatureMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureMismatch::Missing(name) => write!(f, "missing declaration: {}", name),
            SignatureMismatch::Undeclared(name) => write!(f, "unknown function: {}", name),
            SignatureMismatch::WrongSide {
                name,
                implemented_by,
            } => write!(f, "{} is implemented on the {} side", name, implemented_by),
            SignatureMismatch::Differs { expected, found } => {
                write!(f, "expected `{}`, found `{}`", expected, found)
            }
        }
    }
}

/// Contract Registry - one entry per boundary function
#[derive(Debug, Default)]
pub struct ContractRegistry {
    /// Registered functions (name -> function_info)
    functions: HashMap<String, FfiFunctionInfo>,
}

impl ContractRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// The registry for every function this crate exports or links against
    pub fn builtin() -> Self {
        use FfiType::*;

        let managed = |name: &str, params: Vec<FfiType>, ret: FfiType, desc: &str| {
            FfiFunctionInfo::new(Side::Managed, FfiSignature::new(name, params, ret), desc)
        };
        let native = |name: &str, params: Vec<FfiType>, ret: FfiType, desc: &str| {
            FfiFunctionInfo::new(Side::Native, FfiSignature::new(name, params, ret), desc)
        };

        let entries = vec![
            managed("println_hello_world", vec![], Void, "Print a greeting to stdout"),
            managed("return_hello_world", vec![], OwnedStr, "Produce an owned greeting")
                .producing("free_rust_allocated_string"),
            managed(
                "free_rust_allocated_string",
                vec![OwnedStr],
                Void,
                "Release a string produced by the managed side",
            )
            .releasing(OwnedStr),
            managed(
                "contains_hotdog",
                vec![BorrowedStr],
                Bool,
                "Report whether the forbidden food is mentioned",
            ),
            managed("double_input", vec![I32], I32, "Double with overflow guard"),
            managed(
                "double_input_via_c",
                vec![I32],
                I32,
                "Double through the native helper",
            ),
            managed(
                "how_many_characters",
                vec![BorrowedStr],
                U32,
                "Count extended grapheme clusters",
            ),
            managed("how_many_bytes", vec![BorrowedStr], U32, "Count bytes"),
            managed(
                "sum_of_even",
                vec![ConstU32Ptr, Size],
                U32,
                "Sum the even elements of an array view",
            ),
            managed(
                "flip_things_around",
                vec![Tuple],
                Tuple,
                "Swap and perturb a by-value tuple",
            ),
            managed(
                "zip_code_database_new",
                vec![],
                Handle,
                "Create an empty zip code database",
            )
            .producing("zip_code_database_free"),
            managed(
                "zip_code_database_free",
                vec![Handle],
                Void,
                "Destroy a zip code database",
            )
            .releasing(Handle),
            managed(
                "zip_code_database_populate",
                vec![Handle],
                Void,
                "Fill a zip code database with the default dataset",
            ),
            managed(
                "zip_code_database_population_of",
                vec![ConstHandle, BorrowedStr],
                U32,
                "Population of a zip code, 0 if absent",
            ),
            managed(
                "zip_code_database_lookup",
                vec![ConstHandle, BorrowedStr, MutU32Ptr],
                Bool,
                "Population of a zip code with a found flag",
            ),
            managed(
                "zip_code_database_len",
                vec![ConstHandle],
                Size,
                "Number of zip codes stored",
            ),
            managed(
                "increment_array",
                vec![Size, MutI32Ptr],
                Void,
                "Increment an array view in place",
            ),
            managed(
                "increment_array_via_c",
                vec![Size, MutI32Ptr],
                Void,
                "Increment an array view through the native helper",
            ),
            native("c_double_input", vec![I32], I32, "Double with overflow guard"),
            native(
                "c_increment_int_array",
                vec![Size, MutI32Ptr],
                Size,
                "Increment in place, returning the number of skipped elements",
            ),
        ];

        let mut registry = Self::new();
        for info in entries {
            registry.functions.insert(info.name().to_string(), info);
        }
        registry
    }

    /// Register a function
    pub fn register(&mut self, info: FfiFunctionInfo) -> BoundaryResult<()> {
        if self.functions.contains_key(info.name()) {
            return Err(BoundaryError::Contract(format!(
                "function '{}' registered twice",
                info.name()
            )));
        }
        self.functions.insert(info.name().to_string(), info);
        Ok(())
    }

    /// Get a function by name
    pub fn get_function(&self, name: &str) -> Option<&FfiFunctionInfo> {
        self.functions.get(name)
    }

    /// List all registered functions, sorted by name
    pub fn list_functions(&self) -> Vec<&FfiFunctionInfo> {
        let mut functions: Vec<_> = self.functions.values().collect();
        functions.sort_by(|a, b| a.name().cmp(b.name()));
        functions
    }

    /// Functions implemented by one side, sorted by name
    pub fn on_side(&self, side: Side) -> Vec<&FfiFunctionInfo> {
        self.list_functions()
            .into_iter()
            .filter(|info| info.side == side)
            .collect()
    }

    /// The single function that releases what `producer` returns
    pub fn releaser_for(&self, producer: &str) -> Option<&FfiFunctionInfo> {
        match &self.functions.get(producer)?.role {
            Role::Producer { releaser } => self.functions.get(releaser),
            _ => None,
        }
    }

    /// Check the ownership invariants:
    /// every owned return names exactly one releaser, on the same side,
    /// taking exactly that type, and no type has two releasers.
    pub fn validate(&self) -> BoundaryResult<()> {
        let mut releasers: HashMap<(Side, FfiType), &str> = HashMap::new();

        for info in self.list_functions() {
            match &info.role {
                Role::Releaser { releases } => {
                    if !releases.is_transferable() {
                        return Err(violation(info, format!("{} cannot carry ownership", releases)));
                    }
                    if info.signature.params != [*releases]
                        || info.signature.return_type != FfiType::Void
                    {
                        return Err(violation(
                            info,
                            format!("a releaser must be `void {}({})`", info.name(), releases),
                        ));
                    }
                    if let Some(other) = releasers.insert((info.side, *releases), info.name()) {
                        return Err(violation(
                            info,
                            format!("{} is already released by {}", releases, other),
                        ));
                    }
                }
                Role::Producer { releaser } => {
                    if info.return_ownership() != Ownership::Transferred {
                        return Err(violation(info, "produces nothing that needs releasing"));
                    }
                    let release = self
                        .functions
                        .get(releaser)
                        .ok_or_else(|| violation(info, format!("releaser '{}' is not registered", releaser)))?;
                    if release.side != info.side {
                        return Err(violation(
                            info,
                            format!(
                                "allocated on the {} side but released on the {} side by {}",
                                info.side, release.side, releaser
                            ),
                        ));
                    }
                    if release.role
                        != (Role::Releaser {
                            releases: info.signature.return_type,
                        })
                    {
                        return Err(violation(
                            info,
                            format!("{} does not release {}", releaser, info.signature.return_type),
                        ));
                    }
                }
                Role::Plain => {
                    if info.return_ownership() == Ownership::Transferred {
                        return Err(violation(info, "returns an owned value without a releaser"));
                    }
                }
            }
        }

        Ok(())
    }

    /// Compare declared prototypes for one side against the registry
    pub fn diff(&self, side: Side, declared: &[FfiSignature]) -> Vec<SignatureMismatch> {
        let mut mismatches = Vec::new();
        let declared_by_name: HashMap<&str, &FfiSignature> =
            declared.iter().map(|sig| (sig.name.as_str(), sig)).collect();

        for info in self.on_side(side) {
            match declared_by_name.get(info.name()) {
                None => mismatches.push(SignatureMismatch::Missing(info.name().to_string())),
                Some(found) if **found != info.signature => {
                    mismatches.push(SignatureMismatch::Differs {
                        expected: info.signature.clone(),
                        found: (*found).clone(),
                    })
                }
                Some(_) => {}
            }
        }

        for sig in declared {
            match self.functions.get(&sig.name) {
                Some(info) if info.side == side => {}
                Some(info) if info.side == side.opposite() => {
                    mismatches.push(SignatureMismatch::WrongSide {
                        name: sig.name.clone(),
                        implemented_by: info.side,
                    })
                }
                _ => mismatches.push(SignatureMismatch::Undeclared(sig.name.clone())),
            }
        }

        mismatches
    }
}

fn violation(info: &FfiFunctionInfo, msg: impl fmt::Display) -> BoundaryError {
    BoundaryError::Contract(format!("{}: {}", info.name(), msg))
}
