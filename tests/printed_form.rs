use breadcrumb::functions::{ApplyToAll, Fork, Nary, NaryOp, Quantifier, QuantifierKind, RegexFind};
use breadcrumb::{
    BreadcrumbError, Function, FunctionSpec, Query, Settings, Value, print_function, read_function,
};

#[test]
fn functions_read_back_what_they_print() {
    let functions: Vec<Box<dyn Function>> = vec![
        Box::new(RegexFind::new("b+").unwrap()),
        Box::new(Quantifier::exists()),
        Box::new(Nary::new(NaryOp::Concat, 3)),
        Box::new(Fork::new(2)),
        Box::new(ApplyToAll::new(Box::new(Quantifier::for_all())).unwrap()),
    ];
    for function in functions {
        let printed = print_function(function.as_ref()).unwrap();
        let read = read_function(&printed).unwrap();
        assert_eq!(read.spec(), function.spec());
        assert_eq!(read.name(), function.name());
    }
}

#[test]
fn printed_form_is_tagged_json() {
    let printed = print_function(&Nary::new(NaryOp::Add, 2)).unwrap();
    assert_eq!(printed, r#"{"function":"nary","op":"add","arity":2}"#);
    let read = read_function(r#"{"function":"quantifier","kind":"for_all"}"#).unwrap();
    assert_eq!(
        read.spec(),
        FunctionSpec::Quantifier {
            kind: QuantifierKind::ForAll
        }
    );
}

#[test]
fn read_function_builds_a_working_function() {
    let read = read_function(r#"{"function":"regex_find","pattern":"o+"}"#).unwrap();
    let evaluation = read.evaluate(&[Value::from("foo")]).unwrap();
    assert_eq!(evaluation.outputs, vec![Value::from("oo")]);
}

#[test]
fn unreadable_forms_fail_with_read() {
    for printed in [
        "not json",
        r#"{"function":"teleport"}"#,
        r#"{"function":"regex_find","pattern":"("}"#,
        r#"{"function":"apply_to_all","template":{"function":"fork","arity":2}}"#,
    ] {
        assert!(
            matches!(read_function(printed), Err(BreadcrumbError::Read(_))),
            "{printed}"
        );
    }
}

#[test]
fn template_must_be_unary() {
    assert!(matches!(
        ApplyToAll::new(Box::new(Nary::new(NaryOp::Add, 2))),
        Err(BreadcrumbError::InvalidArity { expected: 1, actual: 2, .. })
    ));
}

#[test]
fn settings_default_when_nothing_is_configured() {
    let settings = Settings::default();
    assert_eq!(settings.query, Query::Provenance);
    assert_eq!(settings.max_depth, None);
    assert_eq!(settings.log_filter, "info");
    let loaded = Settings::load("no-such-settings-file").unwrap();
    assert_eq!(loaded.query, Query::Provenance);
}
