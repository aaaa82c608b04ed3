//! FFI Module Tests

use interop_abi::Side;

use super::*;

#[test]
fn test_ffi_type_parsing() {
    assert_eq!(FfiType::from_c("int32_t"), Some(FfiType::I32));
    assert_eq!(FfiType::from_c("int"), Some(FfiType::I32));
    assert_eq!(FfiType::from_c("uint32_t"), Some(FfiType::U32));
    assert_eq!(FfiType::from_c("const char *"), Some(FfiType::BorrowedStr));
    assert_eq!(FfiType::from_c("char*"), Some(FfiType::OwnedStr));
    assert_eq!(FfiType::from_c("const  ZipCodeDatabase *"), Some(FfiType::ConstHandle));
    assert_eq!(FfiType::from_c("double"), None);
}

#[test]
fn test_ffi_type_transferable() {
    assert!(FfiType::OwnedStr.is_transferable());
    assert!(FfiType::Handle.is_transferable());
    assert!(!FfiType::BorrowedStr.is_transferable());
    assert!(!FfiType::ConstHandle.is_transferable());
    assert!(!FfiType::Tuple.is_transferable());
}

#[test]
fn test_ownership_classes() {
    assert_eq!(FfiType::OwnedStr.return_ownership(), Ownership::Transferred);
    assert_eq!(FfiType::Handle.return_ownership(), Ownership::Transferred);
    assert_eq!(FfiType::Tuple.return_ownership(), Ownership::Copied);

    assert_eq!(FfiType::BorrowedStr.param_ownership(), Ownership::Borrowed);
    assert_eq!(FfiType::ConstU32Ptr.param_ownership(), Ownership::Borrowed);
    assert_eq!(FfiType::MutI32Ptr.param_ownership(), Ownership::BorrowedMut);
    assert_eq!(FfiType::Handle.param_ownership(), Ownership::BorrowedMut);
    assert_eq!(FfiType::Tuple.param_ownership(), Ownership::Copied);
}

#[test]
fn test_signature_parsing() {
    let sig = FfiSignature::parse("int32_t double_input(int32_t input)").unwrap();
    assert_eq!(sig.name, "double_input");
    assert_eq!(sig.return_type, FfiType::I32);
    assert_eq!(sig.params, vec![FfiType::I32]);

    // Star attached to the name
    let sig = FfiSignature::parse("char *return_hello_world(void);").unwrap();
    assert_eq!(sig.name, "return_hello_world");
    assert_eq!(sig.return_type, FfiType::OwnedStr);
    assert!(sig.params.is_empty());

    // Array parameter
    let sig = FfiSignature::parse("size_t c_increment_int_array(size_t length, int32_t array[])")
        .unwrap();
    assert_eq!(sig.params, vec![FfiType::Size, FfiType::MutI32Ptr]);
    assert_eq!(sig.return_type, FfiType::Size);

    // Unnamed parameters
    let sig = FfiSignature::parse("Tuple flip_things_around(Tuple)").unwrap();
    assert_eq!(sig.params, vec![FfiType::Tuple]);
    let sig = FfiSignature::parse("bool contains_hotdog(const char*)").unwrap();
    assert_eq!(sig.params, vec![FfiType::BorrowedStr]);
}

#[test]
fn test_signature_parsing_rejects_unknown_types() {
    assert!(FfiSignature::parse("double sqrt(double x)").is_none());
    assert!(FfiSignature::parse("not a prototype").is_none());
}

#[test]
fn test_signature_display() {
    let sig = FfiSignature::new(
        "sum_of_even",
        vec![FfiType::ConstU32Ptr, FfiType::Size],
        FfiType::U32,
    );
    assert_eq!(sig.to_string(), "uint32_t sum_of_even(const uint32_t*, size_t)");

    let sig = FfiSignature::new("println_hello_world", vec![], FfiType::Void);
    assert_eq!(sig.to_string(), "void println_hello_world(void)");
}

#[test]
fn test_builtin_registry_is_valid() {
    let registry = ContractRegistry::builtin();
    registry.validate().unwrap();
    assert_eq!(registry.on_side(Side::Native).len(), 2);
    assert_eq!(registry.on_side(Side::Managed).len(), 18);
}

#[test]
fn test_releaser_lookup() {
    let registry = ContractRegistry::builtin();

    let releaser = registry.releaser_for("zip_code_database_new").unwrap();
    assert_eq!(releaser.name(), "zip_code_database_free");
    assert_eq!(releaser.param_ownership(0), Some(Ownership::Transferred));

    assert!(registry.releaser_for("double_input").is_none());
    assert!(registry.releaser_for("no_such_function").is_none());
}

#[test]
fn test_handle_methods_borrow() {
    let registry = ContractRegistry::builtin();

    let populate = registry.get_function("zip_code_database_populate").unwrap();
    assert_eq!(populate.param_ownership(0), Some(Ownership::BorrowedMut));

    let query = registry.get_function("zip_code_database_population_of").unwrap();
    assert_eq!(query.param_ownership(0), Some(Ownership::Borrowed));
    assert_eq!(query.param_ownership(1), Some(Ownership::Borrowed));
    assert_eq!(query.param_ownership(2), None);
}

#[test]
fn test_validate_rejects_producer_without_releaser() {
    let mut registry = ContractRegistry::new();
    registry
        .register(FfiFunctionInfo::new(
            Side::Managed,
            FfiSignature::new("leaky", vec![], FfiType::OwnedStr),
            "Returns a string nobody can free",
        ))
        .unwrap();

    let err = registry.validate().unwrap_err();
    assert!(err.to_string().contains("leaky"));
}

#[test]
fn test_validate_rejects_cross_side_release() {
    let mut registry = ContractRegistry::new();
    registry
        .register(
            FfiFunctionInfo::new(
                Side::Managed,
                FfiSignature::new("make", vec![], FfiType::OwnedStr),
                "",
            )
            .producing("native_free"),
        )
        .unwrap();
    registry
        .register(
            FfiFunctionInfo::new(
                Side::Native,
                FfiSignature::new("native_free", vec![FfiType::OwnedStr], FfiType::Void),
                "",
            )
            .releasing(FfiType::OwnedStr),
        )
        .unwrap();

    let err = registry.validate().unwrap_err();
    assert!(err.to_string().contains("released on the native side"));
}

#[test]
fn test_validate_rejects_double_releaser() {
    let mut registry = ContractRegistry::new();
    for name in ["free_a", "free_b"] {
        registry
            .register(
                FfiFunctionInfo::new(
                    Side::Managed,
                    FfiSignature::new(name, vec![FfiType::Handle], FfiType::Void),
                    "",
                )
                .releasing(FfiType::Handle),
            )
            .unwrap();
    }

    assert!(registry.validate().is_err());
}

#[test]
fn test_register_duplicate_name() {
    let mut registry = ContractRegistry::new();
    let info = FfiFunctionInfo::new(
        Side::Managed,
        FfiSignature::new("double_input", vec![FfiType::I32], FfiType::I32),
        "",
    );
    registry.register(info.clone()).unwrap();
    assert!(registry.register(info).is_err());
}

#[test]
fn test_header_parsing() {
    let header = r#"
#pragma once
#include <stdint.h>

/* A struct
   spanning lines; with a semicolon */
typedef struct {
    uint32_t x;
    uint32_t y;
} Tuple;

// line comment; ignored
int32_t double_input(int32_t input);

uint32_t sum_of_even(
    const uint32_t* n,
    size_t len);
"#;

    let sigs = parse_header(header).unwrap();
    assert_eq!(sigs.len(), 2);
    assert_eq!(sigs[0].name, "double_input");
    assert_eq!(sigs[1].to_string(), "uint32_t sum_of_even(const uint32_t*, size_t)");
}

#[test]
fn test_header_parse_errors() {
    let err = parse_header("int32_t ok(int32_t a);\n\nfloat nope(float x);").unwrap_err();
    assert!(err.to_string().contains("line 3"));

    assert!(parse_header("int32_t unterminated(int32_t a)").is_err());
}

#[test]
fn test_registry_diff() {
    let registry = ContractRegistry::builtin();
    let declared = vec![
        FfiSignature::new("c_double_input", vec![FfiType::I32], FfiType::U32),
        FfiSignature::new("c_surprise", vec![], FfiType::Void),
    ];

    let mismatches = registry.diff(Side::Native, &declared);
    assert!(mismatches.contains(&SignatureMismatch::Missing(
        "c_increment_int_array".to_string()
    )));
    assert!(mismatches.contains(&SignatureMismatch::Undeclared("c_surprise".to_string())));
    assert!(mismatches
        .iter()
        .any(|m| matches!(m, SignatureMismatch::Differs { found, .. } if found.name == "c_double_input")));
}

#[test]
fn test_registry_diff_wrong_side() {
    let registry = ContractRegistry::builtin();
    let declared = vec![
        FfiSignature::new("c_double_input", vec![FfiType::I32], FfiType::I32),
        FfiSignature::new("double_input", vec![FfiType::I32], FfiType::I32),
    ];

    let mismatches = registry.diff(Side::Native, &declared);
    let wrong_side = SignatureMismatch::WrongSide {
        name: "double_input".to_string(),
        implemented_by: Side::Managed,
    };
    assert!(mismatches.contains(&wrong_side));
    assert_eq!(wrong_side.to_string(), "double_input is implemented on the managed side");
    assert!(!mismatches.contains(&SignatureMismatch::Undeclared("double_input".to_string())));
}
