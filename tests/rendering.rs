//! End-to-end rendering through a tag library.

use serde_json::{json, Value};

use tag_parser::tag::grammar::Element;
use tag_parser::tag::registry::Entity;
use tag_parser::tag::testing::{assert_compile_fails, context_with, registry_with};
use tag_parser::tag::{EntityRegistry, RenderContext, RenderError, TagLibrary};

fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn library() -> (TagLibrary, EntityRegistry) {
    let mut library = TagLibrary::new();

    library.register(
        "greet",
        vec![
            Element::constant("for"),
            Element::variable("val"),
            Element::optional(vec![Element::constant("as"), Element::name("name")]),
        ],
        |context, arguments| {
            let value = arguments.value("val")?.clone();
            match arguments.text("name") {
                Ok(name) => {
                    context.set(name.to_string(), value);
                    Ok(String::new())
                }
                Err(_) => Ok(display(&value)),
            }
        },
    );

    library.register(
        "dimensions",
        vec![
            Element::optional(vec![Element::constant("width"), Element::variable("width")]),
            Element::optional(vec![
                Element::constant("height"),
                Element::variable("height"),
            ]),
        ],
        |_context, arguments| {
            let width = match arguments.value("width") {
                Ok(value) => display(value),
                Err(_) => "none".to_string(),
            };
            let height = match arguments.value("height") {
                Ok(value) => display(value),
                Err(_) => "none".to_string(),
            };
            Ok(format!("{}, {}", width, height))
        },
    );

    library.register(
        "pairs",
        vec![Element::sequence(
            Element::optional(vec![Element::name("key"), Element::variable("value")]),
            "pairs",
        )],
        |context, arguments| {
            let items = arguments.items("pairs")?;
            let mut parts = Vec::new();
            for pair in items.chunks(2) {
                if let [key, value] = pair {
                    let key = key.resolve(context)?;
                    let value = value.resolve(context)?;
                    parts.push(format!("{}: {}", display(&key), display(&value)));
                }
            }
            Ok(format!("{{{}}}", parts.join(", ")))
        },
    );

    library.register(
        "books",
        vec![Element::entity_ref("entity"), Element::variable("limit")],
        |_context, arguments| {
            let entity = arguments.entity("entity")?;
            let limit = arguments.value("limit")?.as_u64().unwrap_or(0) as usize;
            let rows = entity.data.as_array().cloned().unwrap_or_default();
            let shown: Vec<String> = rows.iter().take(limit).map(display).collect();
            Ok(shown.join(", "))
        },
    );

    let registry = registry_with(vec![Entity::new("shop", "Book")
        .with_data(json!(["Pro Parsing", "Borrowed Time", "Crate Expectations"]))]);

    (library, registry)
}

fn render(invocation: &str, context: &mut RenderContext) -> String {
    let (library, registry) = library();
    let node = library.compile(invocation, &registry).unwrap();
    node.render(context).unwrap()
}

#[test]
fn renders_a_string_literal() {
    let mut context = RenderContext::new();
    assert_eq!(render("greet for \"alex\"", &mut context), "alex");
}

#[test]
fn as_clause_writes_back_into_the_context() {
    let mut context = RenderContext::new();
    assert_eq!(render("greet for \"brian\" as name", &mut context), "");
    assert_eq!(context.get("name"), Some(&json!("brian")));
}

#[test]
fn renders_a_context_variable() {
    let mut context = context_with(&[("variable", json!([1, 2, 3]))]);
    assert_eq!(render("greet for variable", &mut context), "[1,2,3]");
}

#[test]
fn both_optional_clauses_present() {
    let mut context = RenderContext::new();
    assert_eq!(
        render("dimensions width 100 height 200", &mut context),
        "100, 200"
    );
}

#[test]
fn missing_optional_clauses_fall_back() {
    let mut context = RenderContext::new();
    assert_eq!(render("dimensions width 100", &mut context), "100, none");
    assert_eq!(render("dimensions height 100", &mut context), "none, 100");
    assert_eq!(render("dimensions", &mut context), "none, none");
}

#[test]
fn dangling_optional_keyword_fails_with_usage() {
    let (library, registry) = library();
    assert_compile_fails(
        library.compile("dimensions width", &registry),
        "dimensions has the following syntax: {% dimensions [width <width>] [height <height>] %}",
    );
}

#[test]
fn empty_sequence_renders_empty_mapping() {
    let mut context = RenderContext::new();
    assert_eq!(render("pairs", &mut context), "{}");
}

#[test]
fn sequence_collects_literal_pairs() {
    let mut context = RenderContext::new();
    assert_eq!(
        render("pairs width 100 height 200", &mut context),
        "{width: 100, height: 200}"
    );
}

#[test]
fn sequence_values_resolve_against_the_context() {
    let mut context = context_with(&[("w", json!(100)), ("h", json!(200))]);
    assert_eq!(
        render("pairs width w height h", &mut context),
        "{width: 100, height: 200}"
    );
}

#[test]
fn odd_trailing_pair_token_fails_with_usage() {
    let (library, registry) = library();
    assert_compile_fails(
        library.compile("pairs width 100 height", &registry),
        "pairs has the following syntax: {% pairs [[<key> <value>]]... %}",
    );
}

#[test]
fn entity_handler_reads_registered_data() {
    let mut context = RenderContext::new();
    assert_eq!(
        render("books shop.Book 2", &mut context),
        "Pro Parsing, Borrowed Time"
    );
}

#[test]
fn unregistered_entity_fails_compilation() {
    let (library, registry) = library();
    assert_compile_fails(
        library.compile("books shop.Magazine 2", &registry),
        "no entity registered under shop.Magazine",
    );
}

#[test]
fn unresolvable_variable_fails_at_render_time() {
    // Compilation defers the lookup; the failure belongs to render.
    let (library, registry) = library();
    let node = library.compile("greet for missing", &registry).unwrap();
    let mut context = RenderContext::new();
    let error = node.render(&mut context).unwrap_err();
    assert_eq!(
        error.to_string(),
        "'missing' did not resolve in the render context"
    );
}

#[test]
fn handler_failures_propagate_unchanged() {
    let mut library = TagLibrary::new();
    library.register("fail", vec![], |_context, _arguments| {
        Err(RenderError::Other("boom".to_string()))
    });
    let node = library.compile("fail", &EntityRegistry::new()).unwrap();
    let mut context = RenderContext::new();
    assert_eq!(node.render(&mut context).unwrap_err().to_string(), "boom");
}

#[test]
fn nodes_render_repeatedly_with_fresh_contexts() {
    let (library, registry) = library();
    let node = library.compile("greet for who", &registry).unwrap();

    let mut first = context_with(&[("who", json!("ada"))]);
    let mut second = context_with(&[("who", json!("brian"))]);
    assert_eq!(node.render(&mut first).unwrap(), "ada");
    assert_eq!(node.render(&mut second).unwrap(), "brian");
}
