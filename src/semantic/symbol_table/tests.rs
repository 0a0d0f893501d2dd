#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::base::Span;
use crate::options::ExtractOptions;
use crate::parser::{ExtractError, Severity, Warning};
use crate::semantic::{ResolveError, Resolved, SymbolTable, UnresolvedReference};
use crate::syntax::{Namespace, SymbolKind, TypeDescriptor};

fn table(source: &str) -> SymbolTable {
    crate::extract(source).unwrap_or_else(|e| panic!("{source}: {e}"))
}

fn conflict(source: &str) -> ExtractError {
    crate::extract(source).expect_err(source)
}

#[test]
fn test_empty_table() {
    let table = SymbolTable::new();
    assert_eq!(table.symbol_count(), 0);
    assert!(table.is_complete());
    assert!(table.lookup(SymbolKind::Struct, "Color").is_none());
}

#[test]
fn test_symbols_in_declaration_order() {
    let table = table("typedef int id_t;\nstruct Color { int r; };\nenum E { A };\nvoid f(void);");
    let symbols: Vec<_> = table
        .iter_symbols()
        .map(|s| (s.kind, s.name.as_str()))
        .collect();
    assert_eq!(
        symbols,
        vec![
            (SymbolKind::TypedefAlias, "id_t"),
            (SymbolKind::Struct, "Color"),
            (SymbolKind::Enum, "E"),
            (SymbolKind::Function, "f"),
        ]
    );
}

#[test]
fn test_lookup_spans() {
    let table = table("\nstruct Color {\n  int r;\n};\n");
    let color = table.lookup(SymbolKind::Struct, "Color").unwrap();
    assert_eq!(color.span, Span::new(2, 4));
    assert!(color.is_type());
    assert_eq!(color.namespace(), Some(Namespace::Struct));
}

#[test]
fn test_tag_and_typedef_share_a_name() {
    let table = table("typedef struct Color { int r; } Color;");
    assert!(table.struct_type("Color").is_some());
    assert_eq!(
        table.typedef("Color"),
        Some(&TypeDescriptor::named(Namespace::Struct, "Color"))
    );
    assert_eq!(table.symbol_count(), 2);
}

#[test]
fn test_anonymous_enum_constants() {
    let table = table("enum { A, B = 5, C };");
    assert_eq!(table.enumerator_value("A"), Some(0));
    assert_eq!(table.enumerator_value("C"), Some(6));
    assert_eq!(table.anonymous_enums().len(), 1);
    assert!(table.enums().is_empty());
}

// ============================================================================
// Duplicate rules
// ============================================================================

#[test]
fn test_identical_prototype_is_tolerated() {
    let table = table("int f(int);\nint f(int x);");
    assert_eq!(table.function("f").len(), 1);
    assert_eq!(
        table.warnings(),
        &[Warning::DuplicatePrototype {
            name: "f".into(),
            line: 2,
            first_line: 1,
        }]
    );
    assert_eq!(table.warnings()[0].severity(), Severity::Hint);
}

#[rstest]
#[case("long f(void);\nlong int f(void) { return 0; }", "f", 2)]
#[case("int g(signed x);\nint g(int x) { return x; }", "g", 2)]
#[case("unsigned h(short int s);\nunsigned int h(signed short s);", "h", 1)]
#[case("char *k(unsigned long long n);\nchar *k(long long unsigned int n) { return 0; }", "k", 2)]
fn test_equivalent_spellings_are_compatible(
    #[case] source: &str,
    #[case] name: &str,
    #[case] stored: usize,
) {
    let table = table(source);
    assert_eq!(table.function(name).len(), stored);
    assert!(table.warnings().iter().all(|w| w.severity() == Severity::Hint));
}

#[rstest]
#[case("typedef unsigned int U;\ntypedef unsigned U;")]
#[case("typedef long int L;\ntypedef long L;")]
#[case("typedef signed S;\ntypedef int S;")]
fn test_equivalent_typedef_spellings_are_identical(#[case] source: &str) {
    let table = table(source);
    assert_eq!(table.typedefs().len(), 1);
    assert!(matches!(
        table.warnings(),
        [Warning::IdenticalRedefinition { line: 2, first_line: 1, .. }]
    ));
}

#[test]
fn test_char_signedness_is_distinct() {
    let err = conflict("typedef char byte;\ntypedef unsigned char byte;");
    assert!(matches!(
        err,
        ExtractError::DuplicateSymbol { kind: SymbolKind::TypedefAlias, .. }
    ));
}

#[test]
fn test_conflicting_prototypes() {
    let err = conflict("int add(int a, int b);\nlong add(int a, int b);");
    assert_eq!(
        err,
        ExtractError::DuplicateSymbol {
            line: 2,
            kind: SymbolKind::Function,
            name: "add".into(),
            previous_line: 1,
        }
    );
}

#[test]
fn test_variadic_mismatch_conflicts() {
    let err = conflict("int log(char *fmt);\nint log(char *fmt, ...);");
    assert!(matches!(err, ExtractError::DuplicateSymbol { .. }));
}

#[test]
fn test_prototype_and_definition_are_both_stored() {
    let table = table("int add(int a, int b);\nint add(int x, int y) { return x + y; }");
    let add = table.function("add");
    assert_eq!(add.len(), 2);
    assert!(!add[0].has_body);
    assert!(add[1].has_body);
    assert_eq!(table.definition("add"), Some(&add[1]));
    assert!(table.warnings().is_empty());
}

#[test]
fn test_two_definitions_conflict() {
    let err = conflict("void f(void) {}\nvoid f(void) {}");
    assert_eq!(err.line(), 2);
    assert!(matches!(err, ExtractError::DuplicateSymbol { previous_line: 1, .. }));
}

#[test]
fn test_identical_typedef_redefinition() {
    let table = table("typedef int number;\ntypedef int number;");
    assert_eq!(table.typedefs().len(), 1);
    assert_eq!(
        table.warnings(),
        &[Warning::IdenticalRedefinition {
            kind: SymbolKind::TypedefAlias,
            name: "number".into(),
            line: 2,
            first_line: 1,
        }]
    );
}

#[test]
fn test_different_typedef_redefinition() {
    let err = conflict("typedef int number;\ntypedef long number;");
    assert!(matches!(
        err,
        ExtractError::DuplicateSymbol { kind: SymbolKind::TypedefAlias, line: 2, .. }
    ));
}

#[test]
fn test_struct_bodies() {
    let table = table("struct P { int x; };\nstruct P { int x; };");
    assert_eq!(table.warnings().len(), 1);

    let err = conflict("struct P { int x; };\nstruct P { int y; };");
    assert!(matches!(err, ExtractError::DuplicateSymbol { kind: SymbolKind::Struct, .. }));
}

#[test]
fn test_forward_declaration_never_conflicts() {
    let table = table("struct P;\nstruct P { int x; };\nstruct P;");
    assert!(table.struct_type("P").is_some());
    assert!(table.is_forward_declared(Namespace::Struct, "P"));
    assert!(table.warnings().is_empty());
}

#[test]
fn test_enumerator_reused_by_another_enum() {
    let err = conflict("enum a { X };\n\nenum b { X };");
    assert_eq!(
        err,
        ExtractError::DuplicateSymbol {
            line: 3,
            kind: SymbolKind::Enumerator,
            name: "X".into(),
            previous_line: 1,
        }
    );
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolve_each_namespace() {
    let table = table("typedef int id_t;\nstruct S { id_t id; };\nenum E { A };");
    assert_eq!(
        table.resolve("id_t", Namespace::Typedef),
        Ok(Resolved::Typedef(&TypeDescriptor::primitive("int")))
    );
    assert!(matches!(table.resolve("S", Namespace::Struct), Ok(Resolved::Struct(s)) if s.fields.len() == 1));
    assert!(matches!(table.resolve("E", Namespace::Enum), Ok(Resolved::Enum(_))));
    assert_eq!(
        table.resolve("S", Namespace::Enum),
        Err(UnresolvedReference {
            name: "S".into(),
            namespace: Namespace::Enum,
        })
    );
}

#[test]
fn test_forward_declared_tag_is_opaque() {
    let table = table("struct handle;\nvoid close_handle(struct handle *h);");
    assert_eq!(table.resolve("handle", Namespace::Struct), Ok(Resolved::Opaque));
    assert!(table.is_complete());
}

#[test]
fn test_resolve_descriptor_follows_typedef_chain() {
    let table = table("typedef unsigned int a;\ntypedef a b;\ntypedef b c;");
    let c = table.typedef("c").unwrap();
    assert_eq!(
        table.resolve_descriptor(c),
        Ok(&TypeDescriptor::primitive("unsigned int"))
    );
}

#[test]
fn test_resolve_descriptor_stops_at_tags() {
    let table = table("struct P { int x; };\ntypedef struct P point;");
    let point = TypeDescriptor::named(Namespace::Typedef, "point");
    assert_eq!(
        table.resolve_descriptor(&point),
        Ok(&TypeDescriptor::named(Namespace::Struct, "P"))
    );
}

#[test]
fn test_resolve_descriptor_detects_cycle() {
    let table = table("typedef a b;\ntypedef b a;");
    let a = TypeDescriptor::named(Namespace::Typedef, "a");
    assert_eq!(table.resolve_descriptor(&a), Err(ResolveError::Cycle("a".into())));
}

#[test]
fn test_unresolved_reference_warns_once() {
    let table = table("struct S {\n  struct Missing m;\n  struct Missing *n;\n};");
    assert!(!table.is_complete());
    assert_eq!(
        table.warnings(),
        &[Warning::UnresolvedReference {
            name: "Missing".into(),
            namespace: Namespace::Struct,
            line: 2,
        }]
    );
    assert!(table.warnings()[0].is_unresolved_reference());
}

#[test]
fn test_unresolved_warnings_can_be_disabled() {
    let options = ExtractOptions::default().with_unresolved_warnings(false);
    let table = crate::extract_with("struct S { struct Missing m; };", &options).unwrap();
    assert!(table.warnings().is_empty());
    assert!(!table.is_complete());
}

#[test]
fn test_struct_used_before_its_definition() {
    let table = table(
        "void paint(struct Color c);\nstruct Palette { struct Color *colors; };\n\
         struct Color { int r; int g; int b; };",
    );
    assert!(table.is_complete());
    assert!(table.warnings().is_empty());
    assert!(matches!(
        table.resolve("Color", Namespace::Struct),
        Ok(Resolved::Struct(color)) if color.fields.len() == 3
    ));
}

#[test]
fn test_self_referential_struct_resolves() {
    let table = table("struct node { struct node *next; int value; };");
    assert!(table.is_complete());
    assert!(table.warnings().is_empty());
}
