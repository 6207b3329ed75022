//! Tests for template substitution

use super::*;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn scope() -> TemplateScope {
    TemplateScope::new()
        .with_var("var", "42")
        .with_var("bucket", "travel-sample")
        .with_values("cities", ["Paris", "Nice"])
}

#[test]
fn test_resolve_dollar_variable() {
    let scope = TemplateScope::new().with_var("var", "42");
    assert_eq!(
        resolve("select * from b where id = $var", &scope),
        "select * from b where id = 42"
    );
}

#[test]
fn test_unbound_variable_passes_through() {
    assert_eq!(resolve("select $missing", &TemplateScope::new()), "select $missing");
    assert_eq!(resolve("select ${missing:csv}", &scope()), "select ${missing:csv}");
}

#[test]
fn test_all_placeholder_syntaxes() {
    let sql = "select * from `${bucket}` where a = $var and b = [[var]] and c = ${var:raw}";
    assert_eq!(
        resolve(sql, &scope()),
        "select * from `travel-sample` where a = 42 and b = 42 and c = 42"
    );
}

#[test]
fn test_multi_value_formats() {
    let scope = scope();
    assert_eq!(resolve("$cities", &scope), "{Paris,Nice}");
    assert_eq!(
        resolve("city IN [${cities:sqlstring}]", &scope),
        "city IN ['Paris','Nice']"
    );
    assert_eq!(resolve("[[cities:pipe]]", &scope), "Paris|Nice");
}

#[test]
fn test_empty_multi_value_resolves_to_nothing() {
    let scope = TemplateScope::new().with_values("v", Vec::<String>::new());
    assert_eq!(resolve("x IN $v", &scope), "x IN ");
}

#[test]
fn test_unknown_format_passes_through() {
    assert_eq!(resolve("${var:percentencode}", &scope()), "${var:percentencode}");
}

#[test]
fn test_malformed_placeholders_pass_through() {
    for text in ["${var", "[[var", "$", "${}", "cost is $ 5"] {
        assert_eq!(resolve(text, &scope()), text);
    }
}

#[test]
fn test_variables_inside_string_literals_are_replaced() {
    assert_eq!(
        resolve("select * from b where city = '$var'", &scope()),
        "select * from b where city = '42'"
    );
}

#[test]
fn test_longest_name_wins() {
    let scope = TemplateScope::new().with_var("var", "1");
    assert_eq!(resolve("$var_suffix $var", &scope), "$var_suffix 1");
}

#[test]
fn test_multiline_query() {
    let sql = indoc! {"
        SELECT name, country
        FROM `${bucket}`
        WHERE type = 'airline' AND id = $var
    "};
    let expected = indoc! {"
        SELECT name, country
        FROM `travel-sample`
        WHERE type = 'airline' AND id = 42
    "};
    assert_eq!(resolve(sql, &scope()), expected);
}

#[test]
fn test_custom_service_closure() {
    let upper = |text: &str, _scope: &TemplateScope| text.to_uppercase();
    assert_eq!(upper.replace("select $var", &scope()), "SELECT $VAR");
}

#[test]
fn test_extract_variables_dedupes_in_order() {
    let names = extract_variables("select $b, ${a:csv}, [[b]], $c, $a");
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn test_contains_variables() {
    assert!(contains_variables("select $var"));
    assert!(contains_variables("select [[var]]"));
    assert!(!contains_variables("select 1"));
}
