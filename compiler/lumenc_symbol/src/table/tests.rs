use derive_more::From;
use enum_as_inner::EnumAsInner;
use lumenc_base::{handler::Storage, source_file::SourceFile};

use super::Table;
use crate::{
    ty::{PrimitiveType, Type},
    Routine, RoutineCode, RoutineKind, SymbolID, VariableKind,
};

#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner, From)]
enum AnyError {
    Lexical(lumenc_lexical::error::Error),
    Syntax(lumenc_syntax::error::Error),
    Binding(crate::error::Error),
}

fn build(source: &str) -> (Table, super::Result<()>, Vec<AnyError>) {
    let source_file = SourceFile::temp(source).unwrap();

    let storage: Storage<AnyError> = Storage::new();
    let (table, result) = Table::build(source_file, &storage);

    (table, result.map(|_| ()), storage.into_vec())
}

fn routine_named<'a>(table: &'a Table, name: &str) -> &'a Routine {
    table
        .routines()
        .items()
        .find(|routine| routine.name == name)
        .unwrap_or_else(|| panic!("no routine named `{name}`"))
}

fn subroutine_names(table: &Table, routine: &Routine) -> Vec<String> {
    routine
        .routine_ids
        .iter()
        .map(|id| table.routines()[*id].name.clone())
        .collect()
}

#[test]
fn scope_depth_is_balanced_for_every_declaration_path() {
    let (table, result, errors) = build(
        "program main; \
         procedure alpha; begin end; \
         function beta(x: integer): real; forward; \
         procedure gamma; forward; \
         procedure gamma; begin end; \
         function beta; begin end; \
         begin end.",
    );

    assert!(result.is_ok());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    // only the global scope stays open after the parse
    assert_eq!(table.scope_depth(), 1);
}

#[test]
fn forwarded_routine_shares_its_scope_with_the_defining_occurrence() {
    let (table, result, errors) = build(
        "program main; \
         procedure alpha; begin end; \
         function beta(x: integer): real; forward; \
         procedure gamma; forward; \
         procedure gamma; begin end; \
         function beta; begin end; \
         begin end.",
    );

    assert!(result.is_ok());
    assert!(errors.is_empty());

    // one scope per distinct routine name plus the global scope; the
    // defining occurrences reused the forwarded scopes instead of creating
    // fresh ones
    assert_eq!(table.scopes().len(), 5);

    let beta = routine_named(&table, "beta");
    assert_eq!(beta.code, RoutineCode::Declared);

    // the parameter bound at the forward occurrence is visible in the scope
    // attached to the defining occurrence
    let beta_scope = &table.scopes()[beta.scope_id.unwrap()];
    assert!(matches!(beta_scope.lookup("x"), Some(SymbolID::Variable(..))));

    // declared exactly once in the program's subroutine list
    let program = &table.routines()[table.program_id().unwrap()];
    assert_eq!(
        subroutine_names(&table, program),
        ["alpha", "gamma", "beta"]
    );
}

#[test]
fn forward_then_declared_without_restated_header() {
    let (table, result, errors) = build(
        "program main; \
         procedure p(x: integer); forward; \
         procedure p; begin end; \
         begin end.",
    );

    assert!(result.is_ok());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    let p = routine_named(&table, "p");
    assert_eq!(p.code, RoutineCode::Declared);
    assert!(p.body.is_some());

    // the header was bound exactly once, at the forward occurrence
    assert_eq!(p.parameter_ids.len(), 1);
    assert_eq!(table.variables()[p.parameter_ids[0]].name, "x");

    let program = &table.routines()[table.program_id().unwrap()];
    assert_eq!(subroutine_names(&table, program), ["p"]);
}

#[test]
fn forward_then_declared_with_restated_header() {
    let (table, result, errors) = build(
        "program main; \
         procedure p; forward; \
         procedure p(x: integer); begin end; \
         begin end.",
    );

    assert!(result.is_ok());

    // exactly one condition: the restated parameter list
    assert_eq!(errors.len(), 1, "unexpected errors: {errors:?}");
    let error = errors[0].as_binding().unwrap().as_already_forwarded().unwrap();
    assert_eq!(error.routine_name, "p");

    // the re-parsed header bound nothing; the forwarded signature stays
    let p = routine_named(&table, "p");
    assert_eq!(p.code, RoutineCode::Declared);
    assert!(p.parameter_ids.is_empty());

    let program = &table.routines()[table.program_id().unwrap()];
    assert_eq!(subroutine_names(&table, program), ["p"]);
}

#[test]
fn missing_semicolon_after_header_is_recovered() {
    let (table, result, errors) = build(
        "program main; \
         procedure p(x: integer) begin end; \
         begin end.",
    );

    assert!(result.is_ok());

    assert_eq!(errors.len(), 1, "unexpected errors: {errors:?}");
    assert!(errors[0]
        .as_binding()
        .unwrap()
        .is_missing_semicolon());

    // the body was still parsed
    let p = routine_named(&table, "p");
    assert_eq!(p.code, RoutineCode::Declared);
    assert!(p.body.is_some());
}

#[test]
fn nested_declarations_are_registered_in_source_order() {
    let (table, result, errors) = build(
        "program main; \
         procedure first; begin end; \
         procedure second; begin end; \
         procedure third; begin end; \
         begin end.",
    );

    assert!(result.is_ok());
    assert!(errors.is_empty());

    let program = &table.routines()[table.program_id().unwrap()];
    assert_eq!(
        subroutine_names(&table, program),
        ["first", "second", "third"]
    );

    // each subroutine owns a distinct scope
    let mut scope_ids = program
        .routine_ids
        .iter()
        .map(|id| table.routines()[*id].scope_id.unwrap())
        .collect::<Vec<_>>();
    scope_ids.sort();
    scope_ids.dedup();
    assert_eq!(scope_ids.len(), 3);
}

#[test]
fn bare_compilation_unit_defaults_to_program() {
    let (table, result, errors) = build("begin end.");

    assert!(result.is_ok());

    let program = &table.routines()[table.program_id().unwrap()];
    assert_eq!(program.kind, RoutineKind::Program);
    assert_eq!(program.name, "dummyprogramname");
    assert_eq!(program.code, RoutineCode::Declared);

    // the missing name and the missing terminator are both flagged
    assert_eq!(errors.len(), 2, "unexpected errors: {errors:?}");
    assert!(errors[0]
        .as_syntax()
        .unwrap()
        .is_identifier_expected());
    assert!(errors[1]
        .as_binding()
        .unwrap()
        .is_missing_semicolon());

    assert_eq!(table.scope_depth(), 1);
}

#[test]
fn forward_only_routine_never_joins_its_parents_subroutines() {
    let (table, result, errors) = build(
        "program main; \
         procedure ghost; forward; \
         begin end.",
    );

    assert!(result.is_ok());
    assert!(errors.is_empty());

    let ghost = routine_named(&table, "ghost");
    assert_eq!(ghost.code, RoutineCode::Forward);
    assert!(ghost.body.is_none());
    assert!(ghost.scope_id.is_some());

    let program = &table.routines()[table.program_id().unwrap()];
    assert!(program.routine_ids.is_empty());
}

#[test]
fn redefining_a_declared_routine_is_flagged() {
    let (table, result, errors) = build(
        "program main; \
         procedure p; begin end; \
         procedure p; begin end; \
         begin end.",
    );

    assert!(result.is_ok());

    assert_eq!(errors.len(), 1, "unexpected errors: {errors:?}");
    let error = errors[0]
        .as_binding()
        .unwrap()
        .as_identifier_redefined()
        .unwrap();
    assert_eq!(error.name, "p");
    assert!(error.previous_span.is_some());

    // the second occurrence parsed under a placeholder entry
    let program = &table.routines()[table.program_id().unwrap()];
    assert_eq!(
        subroutine_names(&table, program),
        ["p", "dummyprocedurename_001"]
    );
}

#[test]
fn placeholder_names_are_unique_and_monotonic() {
    let (table, result, errors) = build(
        "program main; \
         procedure; begin end; \
         procedure; begin end; \
         begin end.",
    );

    assert!(result.is_ok());

    // one missing identifier per nameless declaration
    assert_eq!(errors.len(), 2, "unexpected errors: {errors:?}");
    assert!(errors
        .iter()
        .all(|error| error.as_syntax().unwrap().is_identifier_expected()));

    let program = &table.routines()[table.program_id().unwrap()];
    assert_eq!(
        subroutine_names(&table, program),
        ["dummyprocedurename_001", "dummyprocedurename_002"]
    );
}

#[test]
fn var_sections_and_parameters_bind_variables() {
    let (table, result, errors) = build(
        "program main; \
         var total, count: integer; \
         procedure scale(var factor: real); \
         var local: integer; \
         begin end; \
         begin end.",
    );

    assert!(result.is_ok());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    let program = &table.routines()[table.program_id().unwrap()];
    let program_scope = &table.scopes()[program.scope_id.unwrap()];

    for name in ["total", "count"] {
        let variable_id =
            program_scope.lookup(name).unwrap().into_variable().unwrap();
        let variable = &table.variables()[variable_id];
        assert_eq!(variable.kind, VariableKind::Variable);
        assert_eq!(variable.ty, Type::Primitive(PrimitiveType::Integer));
    }

    let scale = routine_named(&table, "scale");
    assert_eq!(scale.parameter_ids.len(), 1);

    let factor = &table.variables()[scale.parameter_ids[0]];
    assert_eq!(factor.kind, VariableKind::VarParameter);
    assert_eq!(factor.ty, Type::Primitive(PrimitiveType::Real));

    let scale_scope = &table.scopes()[scale.scope_id.unwrap()];
    assert!(scale_scope.lookup("factor").is_some());
    assert!(scale_scope.lookup("local").is_some());
    assert!(scale_scope.lookup("total").is_none());

    // after the parse only the global scope is open, holding the program name
    assert!(matches!(table.lookup("Main"), Some(SymbolID::Routine(..))));
}

#[test]
fn forwarded_function_keeps_its_signature_for_the_defining_occurrence() {
    let (table, result, errors) = build(
        "program main; \
         function twice(x: integer): integer; forward; \
         function twice; begin twice := x + x end; \
         begin end.",
    );

    assert!(result.is_ok());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    let twice = routine_named(&table, "twice");
    assert_eq!(twice.kind, RoutineKind::Function);
    assert_eq!(twice.code, RoutineCode::Declared);
    assert_eq!(
        twice.return_type,
        Some(Type::Primitive(PrimitiveType::Integer))
    );
    assert_eq!(twice.parameter_ids.len(), 1);
    assert!(twice.body.is_some());
}

#[test]
fn deeply_nested_routines_mirror_scope_nesting() {
    let (table, result, errors) = build(
        "program main; \
         procedure outer; \
         procedure inner; begin end; \
         begin end; \
         begin end.",
    );

    assert!(result.is_ok());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    let program = &table.routines()[table.program_id().unwrap()];
    assert_eq!(subroutine_names(&table, program), ["outer"]);

    let outer = routine_named(&table, "outer");
    assert_eq!(subroutine_names(&table, outer), ["inner"]);

    let inner = routine_named(&table, "inner");
    assert_eq!(
        table.scopes()[inner.scope_id.unwrap()].nesting_level(),
        3
    );
    assert_eq!(
        table.scopes()[outer.scope_id.unwrap()].nesting_level(),
        2
    );
    assert_eq!(
        table.scopes()[program.scope_id.unwrap()].nesting_level(),
        1
    );
}
