//! Parser tests at the declaration level, before any symbol table is built

use rstest::rstest;

use super::*;
use crate::options::ExtractOptions;
use crate::syntax::{Declaration, FunctionSignature, Namespace, TypeDescriptor};

fn parse_ok(input: &str) -> ParsedUnit {
    parse(input, &ExtractOptions::default()).unwrap_or_else(|e| panic!("{input}: {e}"))
}

fn functions(unit: &ParsedUnit) -> Vec<&FunctionSignature> {
    unit.declarations
        .iter()
        .filter_map(|d| match d {
            Declaration::Function(f) => Some(f),
            _ => None,
        })
        .collect()
}

fn typedef_type<'u>(unit: &'u ParsedUnit, wanted: &str) -> &'u TypeDescriptor {
    unit.declarations
        .iter()
        .find_map(|d| match d {
            Declaration::Typedef { name, ty, .. } if name == wanted => Some(ty),
            _ => None,
        })
        .unwrap_or_else(|| panic!("typedef {wanted} not found"))
}

#[rstest]
#[case("int", "int")]
#[case("signed", "int")]
#[case("signed int", "int")]
#[case("unsigned", "unsigned int")]
#[case("int unsigned", "unsigned int")]
#[case("short int", "short")]
#[case("signed short", "short")]
#[case("unsigned short int", "unsigned short")]
#[case("long", "long")]
#[case("long int", "long")]
#[case("long unsigned int", "unsigned long")]
#[case("long long int", "long long")]
#[case("unsigned long long", "unsigned long long")]
#[case("char", "char")]
#[case("signed char", "signed char")]
#[case("char unsigned", "unsigned char")]
#[case("long double", "long double")]
#[case("_Bool", "_Bool")]
fn test_primitive_spellings_are_canonical(#[case] spelling: &str, #[case] canonical: &str) {
    let unit = parse_ok(&format!("typedef {spelling} alias_t;"));
    assert_eq!(typedef_type(&unit, "alias_t"), &TypeDescriptor::primitive(canonical));
}

#[test]
fn test_typedef_of_anonymous_struct() {
    let unit = parse_ok("typedef struct { int x; int y; } Point;");
    let TypeDescriptor::AnonymousStruct(aggregate) = typedef_type(&unit, "Point") else {
        panic!("expected anonymous struct");
    };
    assert_eq!(aggregate.field_names().collect::<Vec<_>>(), vec!["x", "y"]);
    assert_eq!(unit.declarations.len(), 1);
}

#[test]
fn test_typedef_of_tagged_struct_emits_both() {
    let unit = parse_ok("typedef struct node { struct node *next; } Node;");
    assert!(matches!(
        &unit.declarations[0],
        Declaration::Struct { aggregate, .. } if aggregate.tag.as_deref() == Some("node")
    ));
    assert_eq!(
        typedef_type(&unit, "Node"),
        &TypeDescriptor::named(Namespace::Struct, "node")
    );
}

#[test]
fn test_multiple_typedef_declarators() {
    let unit = parse_ok("typedef int number, *number_ptr, numbers[8];");
    assert_eq!(typedef_type(&unit, "number").to_string(), "int");
    assert_eq!(typedef_type(&unit, "number_ptr").to_string(), "int *");
    assert_eq!(typedef_type(&unit, "numbers").to_string(), "int[8]");
}

#[test]
fn test_function_pointer_typedef() {
    let unit = parse_ok("typedef void (*handler_t)(int signal);");
    let ty = typedef_type(&unit, "handler_t");
    assert_eq!(ty.to_string(), "void (*)(int)");
}

#[test]
fn test_function_pointer_parameter() {
    let unit = parse_ok(
        "void init_server(int port, int maxthread, void (*handler)(int));",
    );
    let init = functions(&unit)[0];
    assert_eq!(init.params.len(), 3);
    assert_eq!(init.params[2].name.as_deref(), Some("handler"));
    assert_eq!(init.params[2].ty.to_string(), "void (*)(int)");
}

#[test]
fn test_function_returning_function_pointer() {
    let unit = parse_ok("int (*pick(int which))(int, int);");
    let pick = functions(&unit)[0];
    assert_eq!(pick.name, "pick");
    assert_eq!(pick.params.len(), 1);
    assert_eq!(pick.returns.to_string(), "int (*)(int, int)");
}

#[test]
fn test_array_parameters_decay() {
    let unit = parse_ok("int main(int argc, char *argv[]);");
    let main = functions(&unit)[0];
    assert_eq!(main.params[1].ty.to_string(), "char **");
}

#[test]
fn test_abstract_and_void_parameters() {
    let unit = parse_ok("int add(int, int); void reset(void); int legacy();");
    let fns = functions(&unit);
    assert!(fns[0].params.iter().all(|p| p.name.is_none()));
    assert!(fns[1].params.is_empty());
    assert!(fns[2].params.is_empty());
}

#[test]
fn test_variadic_prototype() {
    let unit = parse_ok("int printf(const char *format, ...);");
    let printf = functions(&unit)[0];
    assert!(printf.variadic);
    assert_eq!(printf.params.len(), 1);
    assert_eq!(printf.params[0].ty.to_string(), "char *");
}

#[test]
fn test_storage_class_and_qualifiers_are_accepted() {
    let unit = parse_ok("static inline const char *name(volatile int * const p) { return 0; }");
    let name = functions(&unit)[0];
    assert!(name.has_body);
    assert_eq!(name.returns.to_string(), "char *");
    assert_eq!(name.params[0].ty.to_string(), "int *");
}

#[test]
fn test_comma_separated_prototypes() {
    let unit = parse_ok("int first(void), second(int x);");
    let names: Vec<_> = functions(&unit).iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn test_enum_constant_expressions() {
    let unit = parse_ok(
        "enum flags { READ = 1 << 0, WRITE = 1 << 1, RW = READ | WRITE, NEG = -(2 * 3), \
         HEX = 0x10, OCT = 010, CH = 'A', NEXT };",
    );
    let Declaration::Enum { enumeration, .. } = &unit.declarations[0] else {
        panic!("expected enum");
    };
    let values: Vec<_> = enumeration.enumerators.iter().map(|e| e.value).collect();
    assert_eq!(values, vec![1, 2, 3, -6, 16, 8, 65, 66]);
    assert_eq!(enumeration.enumerators[7].explicit, None);
}

#[test]
fn test_unsigned_literals_wrap_into_range() {
    let unit = parse_ok("enum big { ALL = 0xFFFFFFFFFFFFFFFFull, TOP = 9223372036854775808u };");
    let Declaration::Enum { enumeration, .. } = &unit.declarations[0] else {
        panic!("expected enum");
    };
    assert_eq!(enumeration.value_of("ALL"), Some(-1));
    assert_eq!(enumeration.value_of("TOP"), Some(i64::MIN));
}

#[test]
fn test_overflowing_division_wraps() {
    let unit = parse_ok("enum e { MIN = 0x8000000000000000, Q = MIN / -1, R = MIN % -1 };");
    let Declaration::Enum { enumeration, .. } = &unit.declarations[0] else {
        panic!("expected enum");
    };
    assert_eq!(enumeration.value_of("Q"), Some(i64::MIN));
    assert_eq!(enumeration.value_of("R"), Some(0));
}

#[test]
fn test_enum_trailing_comma() {
    let unit = parse_ok("enum e { A, B, };");
    let Declaration::Enum { enumeration, .. } = &unit.declarations[0] else {
        panic!("expected enum");
    };
    assert_eq!(enumeration.enumerators.len(), 2);
}

#[test]
fn test_array_length_from_enumerator() {
    let unit = parse_ok("enum { SIZE = 4 }; struct buf { char data[SIZE * 2]; };");
    let Declaration::Struct { aggregate, .. } = &unit.declarations[1] else {
        panic!("expected struct");
    };
    assert_eq!(aggregate.fields[0].ty.to_string(), "char[8]");
}

#[test]
fn test_forward_declaration() {
    let unit = parse_ok("struct opaque;");
    assert_eq!(
        unit.declarations,
        vec![Declaration::TagForward {
            namespace: Namespace::Struct,
            name: "opaque".into(),
            line: 1,
        }]
    );
}

#[test]
fn test_nested_struct_definition_is_hoisted() {
    let unit = parse_ok("struct outer { struct inner { int a; } in; int b; };");
    let tags: Vec<_> = unit
        .declarations
        .iter()
        .filter_map(|d| match d {
            Declaration::Struct { aggregate, .. } => aggregate.tag.as_deref(),
            _ => None,
        })
        .collect();
    assert_eq!(tags, vec!["inner", "outer"]);
}

#[test]
fn test_references_are_recorded_with_lines() {
    let unit = parse_ok("struct S {\n  struct Missing m;\n  Point p;\n};");
    let refs: Vec<_> = unit
        .references
        .iter()
        .map(|r| (r.namespace, r.name.as_str(), r.line))
        .collect();
    assert_eq!(
        refs,
        vec![(Namespace::Struct, "Missing", 2), (Namespace::Typedef, "Point", 3)]
    );
}

#[test]
fn test_body_calls_are_collected_once() {
    let unit = parse_ok(
        "int main(void) {\n  if (check(1)) { log(\"a(\"); }\n  check(2);\n  p.fn(3);\n  return sizeof(int);\n}",
    );
    let main = functions(&unit)[0];
    assert_eq!(main.calls, vec!["check", "log"]);
    assert_eq!(main.span, crate::base::Span::new(1, 6));
}

#[test]
fn test_calls_not_collected_when_disabled() {
    let options = ExtractOptions::default().with_calls(false);
    let unit = parse("void f(void) { g(); }", &options).unwrap();
    assert!(functions(&unit)[0].calls.is_empty());
}

#[test]
fn test_line_splice_inside_body() {
    let unit = parse_ok("int f(void) {\n  return 1 + \\\n 2;\n}\nint g(void);\n");
    let fns = functions(&unit);
    assert_eq!(fns[0].span, crate::base::Span::new(1, 4));
    assert_eq!(fns[1].span.start_line, 5);
}

#[test]
fn test_includes_collected() {
    let unit = parse_ok("#include <stdio.h>\n#include \"local.h\"\n#define X 1\n");
    let paths: Vec<_> = unit.includes.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(paths, vec!["stdio.h", "local.h"]);
    assert!(unit.declarations.is_empty());
}

// ============================================================================
// Errors
// ============================================================================

fn parse_err(input: &str) -> ExtractError {
    parse(input, &ExtractOptions::default()).expect_err(input)
}

#[test]
fn test_unbalanced_body_cites_opening_line() {
    let err = parse_err("\n\nint f() { \n  if (x) {\n");
    assert_eq!(err, ExtractError::UnbalancedBraces { line: 3 });
}

#[test]
fn test_top_level_variable_is_unsupported() {
    let err = parse_err("int counter;");
    assert!(matches!(err, ExtractError::UnsupportedDeclaration { line: 1, .. }));
}

#[test]
fn test_function_pointer_variable_is_unsupported() {
    let err = parse_err("int (*callback)(int);");
    assert!(matches!(err, ExtractError::UnsupportedDeclaration { .. }));
}

#[test]
fn test_union_is_unsupported() {
    let err = parse_err("union value { int i; float f; };");
    assert!(matches!(err, ExtractError::UnsupportedDeclaration { .. }));
}

#[test]
fn test_bit_field_is_unsupported() {
    let err = parse_err("struct flags {\n  int ready : 1;\n};");
    assert!(matches!(err, ExtractError::UnsupportedDeclaration { line: 2, .. }));
}

#[test]
fn test_missing_semicolon() {
    let err = parse_err("int add(int a, int b)\nint sub(int a, int b);");
    assert!(matches!(err, ExtractError::UnexpectedToken { line: 2, .. }));
}

#[test]
fn test_unterminated_struct_body() {
    let err = parse_err("struct Color { int r;");
    assert_eq!(err.to_string(), "line 1: expected `}`, found end of input");
}

#[test]
fn test_empty_enum_is_rejected() {
    let err = parse_err("enum empty {};");
    assert!(matches!(err, ExtractError::UnexpectedToken { .. }));
}

#[test]
fn test_unknown_constant_in_enum() {
    let err = parse_err("enum e { A = UNDEFINED_MACRO };");
    assert!(matches!(err, ExtractError::UnexpectedToken { .. }));
}

#[rstest]
#[case("enum e { A = 1 / 0 };")]
#[case("enum e { A = 1 % (2 - 2) };")]
fn test_division_by_zero_in_constant(#[case] input: &str) {
    let err = parse_err(input);
    assert!(matches!(err, ExtractError::UnexpectedToken { .. }));
}

#[test]
fn test_lex_error_propagates() {
    let err = parse_err("int f(void);\n/* unterminated");
    assert!(matches!(err, ExtractError::Lex(LexError { line: 2, .. })));
}
